// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::SQL_API_VERSION;
use crate::ArmClient;
use azsample_core::Result;
use serde::{Deserialize, Serialize};

/// Child resources expanded when fetching a database.
pub const SQL_DATABASE_EXPAND: &str = "serviceTierAdvisors,transparentDataEncryption";

/// An Azure SQL database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlDatabase {
    #[serde(default)]
    pub id: String,
    /// Database name.
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub properties: SqlDatabaseProperties,
}

/// Properties of a SQL database, including the expanded child resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlDatabaseProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_tier_advisors: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_data_encryption: Option<Vec<serde_json::Value>>,
}

/// Client of `Microsoft.Sql/servers/databases`.
#[derive(Debug, Clone)]
pub struct SqlDatabasesClient {
    arm: ArmClient,
}

impl SqlDatabasesClient {
    /// Create a SQL databases client on top of `arm`.
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    /// Get a database together with its service tier advisors and
    /// transparent data encryption settings.
    pub async fn get(
        &self,
        resource_group: &str,
        server_name: &str,
        database_name: &str,
    ) -> Result<SqlDatabase> {
        let mut url = self.arm.resource_group_url(
            resource_group,
            &[
                "providers",
                "Microsoft.Sql",
                "servers",
                server_name,
                "databases",
                database_name,
            ],
            SQL_API_VERSION,
        );
        url.push_str("&$expand=");
        url.push_str(SQL_DATABASE_EXPAND);

        self.arm.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{test_signer, MockHttpSend};
    use http::Method;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_get_database_with_expansions() {
        let http = MockHttpSend::new();
        http.on(
            Method::GET,
            "/servers/sqlsrv/databases/inventory",
            200,
            r#"{"id":"/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Sql/servers/sqlsrv/databases/inventory",
                "name":"inventory","location":"West US","type":"Microsoft.Sql/servers/databases",
                "properties":{"status":"Online","edition":"Basic",
                    "serviceTierAdvisors":[{"name":"Current","properties":{"usedServiceLevelObjective":"Basic"}}],
                    "transparentDataEncryption":[{"name":"current","properties":{"status":"Enabled"}}]}}"#,
        );
        let client = SqlDatabasesClient::new(ArmClient::new(test_signer(&http), "sub"));

        let db = client.get("rg", "sqlsrv", "inventory").await.unwrap();
        assert_eq!(db.name, "inventory");
        assert_eq!(db.properties.status.as_deref(), Some("Online"));
        assert_eq!(
            db.properties.transparent_data_encryption.map(|v| v.len()),
            Some(1)
        );

        assert_eq!(
            http.arm_requests()[0].uri,
            "https://management.azure.com/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Sql/servers/sqlsrv/databases/inventory?api-version=2014-04-01&$expand=serviceTierAdvisors,transparentDataEncryption"
        );
    }
}
