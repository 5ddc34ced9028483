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

use crate::constants::DOCUMENTDB_API_VERSION;
use crate::ArmClient;
use azsample_core::Result;
use serde::{Deserialize, Serialize};

/// A DocumentDB / Cosmos DB database account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseAccount {
    /// Fully qualified resource id.
    #[serde(default)]
    pub id: String,
    /// Account name.
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// `GlobalDocumentDB`, `MongoDB` or `Parse`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub properties: DatabaseAccountProperties,
}

/// Properties of a database account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseAccountProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_account_offer_type: Option<String>,
}

/// Client of `Microsoft.DocumentDB/databaseAccounts`.
///
/// DocumentDB and Cosmos DB accounts share this resource type.
#[derive(Debug, Clone)]
pub struct DatabaseAccountsClient {
    arm: ArmClient,
}

impl DatabaseAccountsClient {
    /// Create a database accounts client on top of `arm`.
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    /// Get a database account.
    ///
    /// - [Database Accounts - Get](https://learn.microsoft.com/en-us/rest/api/cosmos-db-resource-provider/database-accounts/get)
    pub async fn get(&self, resource_group: &str, account_name: &str) -> Result<DatabaseAccount> {
        let url = self.arm.resource_group_url(
            resource_group,
            &[
                "providers",
                "Microsoft.DocumentDB",
                "databaseAccounts",
                account_name,
            ],
            DOCUMENTDB_API_VERSION,
        );
        self.arm.get(&url).await
    }
}
