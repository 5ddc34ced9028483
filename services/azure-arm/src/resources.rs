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

use crate::constants::{PATH_SEGMENT_ENCODE_SET, RESOURCES_API_VERSION};
use crate::ArmClient;
use azsample_core::{Error, Result};
use log::debug;
use percent_encoding::utf8_percent_encode;
use serde::{Deserialize, Serialize};

/// Resource type of Azure Database for MySQL servers.
pub const MYSQL_SERVER_TYPE: &str = "Microsoft.DBforMySQL/servers";
/// Resource type of Azure Database for PostgreSQL servers.
pub const POSTGRESQL_SERVER_TYPE: &str = "Microsoft.DBforPostgreSQL/servers";

/// A resource as returned by the resource group listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericResource {
    #[serde(default)]
    pub id: String,
    /// Resource name.
    pub name: String,
    /// Resource type, e.g. `Microsoft.DBforMySQL/servers`.
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceListResult {
    #[serde(default)]
    value: Vec<GenericResource>,
    next_link: Option<String>,
}

/// Client of the generic resources API.
///
/// - [Resources - List By Resource Group](https://learn.microsoft.com/en-us/rest/api/resources/resources/list-by-resource-group)
#[derive(Debug, Clone)]
pub struct ResourcesClient {
    arm: ArmClient,
}

impl ResourcesClient {
    /// Create a resources client on top of `arm`.
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    fn list_url(&self, resource_group: &str, resource_type: Option<&str>, top: Option<u32>) -> String {
        let mut url =
            self.arm
                .resource_group_url(resource_group, &["resources"], RESOURCES_API_VERSION);
        if let Some(t) = resource_type {
            let filter = format!("resourceType eq '{t}'");
            url.push_str("&$filter=");
            url.push_str(&utf8_percent_encode(&filter, PATH_SEGMENT_ENCODE_SET).to_string());
        }
        if let Some(n) = top {
            url.push_str(&format!("&$top={n}"));
        }
        url
    }

    /// List the resources of a resource group, optionally only those of
    /// `resource_type`. All result pages are followed.
    pub async fn list_by_resource_group(
        &self,
        resource_group: &str,
        resource_type: Option<&str>,
    ) -> Result<Vec<GenericResource>> {
        let mut resources = Vec::new();
        let mut url = self.list_url(resource_group, resource_type, None);

        loop {
            let page: ResourceListResult = self.arm.get(&url).await?;
            resources.extend(page.value);
            match page.next_link.filter(|l| !l.is_empty()) {
                Some(next) => url = next,
                None => break,
            }
        }

        debug!(
            "listed {} resources in resource group {resource_group}",
            resources.len()
        );
        Ok(resources)
    }

    /// Return the first resource of `resource_type` in a resource group.
    ///
    /// Pages may come back empty while `nextLink` is still set, so pages are
    /// followed until a match is found. Running out of pages is reported as
    /// a not found error.
    pub async fn first_by_type(
        &self,
        resource_group: &str,
        resource_type: &str,
    ) -> Result<GenericResource> {
        let mut url = self.list_url(resource_group, Some(resource_type), Some(1));

        loop {
            let page: ResourceListResult = self.arm.get(&url).await?;
            if let Some(resource) = page
                .value
                .into_iter()
                .find(|r| r.resource_type.eq_ignore_ascii_case(resource_type))
            {
                return Ok(resource);
            }
            match page.next_link.filter(|l| !l.is_empty()) {
                Some(next) => url = next,
                None => break,
            }
        }

        Err(Error::not_found(format!(
            "no resource of type {resource_type} in resource group {resource_group}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{test_signer, MockHttpSend};
    use azsample_core::ErrorKind;
    use http::Method;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(MYSQL_SERVER_TYPE, "mysql-1" ; "mysql")]
    #[test_case(POSTGRESQL_SERVER_TYPE, "pg-1" ; "postgresql")]
    #[tokio::test]
    async fn test_first_by_type(resource_type: &str, name: &str) {
        let http = MockHttpSend::new();
        http.on(
            Method::GET,
            "/resourceGroups/rg/resources",
            200,
            &format!(r#"{{"value":[{{"id":"/x/{name}","name":"{name}","type":"{resource_type}","location":"westus"}}]}}"#),
        );
        let client = ResourcesClient::new(ArmClient::new(test_signer(&http), "sub"));

        let resource = client.first_by_type("rg", resource_type).await.unwrap();
        assert_eq!(resource.name, name);

        let uri = &http.arm_requests()[0].uri;
        let expected_filter = format!(
            "$filter=resourceType%20eq%20%27{}%27",
            resource_type.replace('/', "%2F")
        );
        assert!(uri.contains(&expected_filter), "{uri}");
        assert!(uri.ends_with("&$top=1"), "{uri}");
    }

    #[tokio::test]
    async fn test_first_by_type_empty_group() {
        let http = MockHttpSend::new();
        http.on(Method::GET, "/resourceGroups/rg/resources", 200, r#"{"value":[]}"#);
        let client = ResourcesClient::new(ArmClient::new(test_signer(&http), "sub"));

        let err = client
            .first_by_type("rg", MYSQL_SERVER_TYPE)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.message().contains(MYSQL_SERVER_TYPE));
    }

    #[tokio::test]
    async fn test_first_by_type_follows_next_link() {
        let http = MockHttpSend::new();
        http.on(
            Method::GET,
            "skiptoken=page2",
            200,
            r#"{"value":[{"name":"mysql-1","type":"Microsoft.DBforMySQL/servers"}]}"#,
        );
        http.on(
            Method::GET,
            "/resourceGroups/rg/resources",
            200,
            r#"{"value":[],
                "nextLink":"https://management.azure.com/subscriptions/sub/resourceGroups/rg/resources?api-version=2017-05-10&$skiptoken=page2"}"#,
        );
        let client = ResourcesClient::new(ArmClient::new(test_signer(&http), "sub"));

        let resource = client.first_by_type("rg", MYSQL_SERVER_TYPE).await.unwrap();
        assert_eq!(resource.name, "mysql-1");

        let requests = http.arm_requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].uri.ends_with("$skiptoken=page2"));
    }

    #[tokio::test]
    async fn test_list_follows_next_link() {
        let http = MockHttpSend::new();
        // Registered first so the more specific page 2 route wins.
        http.on(
            Method::GET,
            "skiptoken=page2",
            200,
            r#"{"value":[{"name":"b","type":"Microsoft.Web/sites"}]}"#,
        );
        http.on(
            Method::GET,
            "/resourceGroups/rg/resources",
            200,
            r#"{"value":[{"name":"a","type":"Microsoft.Web/sites"}],
                "nextLink":"https://management.azure.com/subscriptions/sub/resourceGroups/rg/resources?api-version=2017-05-10&$skiptoken=page2"}"#,
        );
        let client = ResourcesClient::new(ArmClient::new(test_signer(&http), "sub"));

        let resources = client.list_by_resource_group("rg", None).await.unwrap();
        let names: Vec<_> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(http.arm_requests().len(), 2);
    }
}
