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

use crate::constants::*;
use crate::{Credential, RequestSigner, StaticCredentialProvider};
use azsample_core::{Context, Error, Result, Signer};
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use log::{debug, info};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Public access level of a newly created container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicAccess {
    /// Data is only readable by the account owner.
    #[default]
    Private,
    /// Blob data is publicly readable, containers are not listable.
    Blob,
    /// Container and blob data are publicly readable and listable.
    Container,
}

impl PublicAccess {
    fn header_value(self) -> Option<&'static str> {
        match self {
            PublicAccess::Private => None,
            PublicAccess::Blob => Some("blob"),
            PublicAccess::Container => Some("container"),
        }
    }
}

/// A container as returned by the List Containers operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDescriptor {
    /// Container name.
    pub name: String,
    /// System properties of the container.
    pub properties: ContainerProperties,
}

/// System properties of a container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerProperties {
    /// `Last-Modified` in HTTP date format.
    pub last_modified: String,
    /// Entity tag of the container.
    pub etag: String,
    /// `locked` or `unlocked`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_status: Option<String>,
    /// `available`, `leased`, `expired`, `breaking` or `broken`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_state: Option<String>,
    /// `infinite` or `fixed`, only present while leased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_duration: Option<String>,
    /// `container` or `blob`, absent for private containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_access: Option<String>,
}

/// Client of the Azure Blob service of one storage account.
///
/// - [Blob service REST API](https://learn.microsoft.com/en-us/rest/api/storageservices/blob-service-rest-api)
#[derive(Debug, Clone)]
pub struct BlobServiceClient {
    ctx: Context,
    signer: Signer<Credential>,
    account_name: String,
    endpoint: String,
}

impl BlobServiceClient {
    /// Create a client for `account_name` in the Azure public cloud.
    pub fn new(ctx: Context, account_name: &str, account_key: &str) -> Self {
        let endpoint = format!("https://{account_name}.blob.{DEFAULT_ENDPOINT_SUFFIX}");
        let signer = Signer::new(
            ctx.clone(),
            StaticCredentialProvider::new_shared_key(account_name, account_key),
            RequestSigner::new(),
        );

        Self {
            ctx,
            signer,
            account_name: account_name.to_string(),
            endpoint,
        }
    }

    /// Use the endpoint of another cloud, for example `core.chinacloudapi.cn`.
    pub fn with_endpoint_suffix(mut self, suffix: &str) -> Self {
        self.endpoint = format!(
            "https://{}.blob.{}",
            self.account_name,
            suffix.trim_matches('.')
        );
        self
    }

    /// Override the full service endpoint, e.g. for an emulator.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Service endpoint used by this client.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create container `name` unless it already exists.
    ///
    /// Returns `true` if the container was created by this call.
    ///
    /// - [Create Container](https://learn.microsoft.com/en-us/rest/api/storageservices/create-container)
    pub async fn create_container_if_not_exists(
        &self,
        name: &str,
        access: PublicAccess,
    ) -> Result<bool> {
        validate_container_name(name)?;

        let url = format!(
            "{}/{}?restype=container",
            self.endpoint,
            utf8_percent_encode(name, NON_ALPHANUMERIC)
        );
        let mut builder = Request::builder().method(Method::PUT).uri(url);
        if let Some(v) = access.header_value() {
            builder = builder.header(X_MS_BLOB_PUBLIC_ACCESS, v);
        }

        let resp = self.send(builder.body(Bytes::new())?).await?;
        match resp.status() {
            StatusCode::CREATED => {
                info!("created container {name}");
                Ok(true)
            }
            StatusCode::CONFLICT if error_code(&resp) == Some("ContainerAlreadyExists") => {
                debug!("container {name} already exists");
                Ok(false)
            }
            status => Err(remote_error("create container", status, &resp)),
        }
    }

    /// List all containers of the account, following continuation markers.
    ///
    /// - [List Containers](https://learn.microsoft.com/en-us/rest/api/storageservices/list-containers2)
    pub async fn list_containers(&self) -> Result<Vec<ContainerDescriptor>> {
        let mut containers = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut url = format!("{}/?comp=list", self.endpoint);
            if let Some(m) = &marker {
                url.push_str("&marker=");
                url.push_str(&utf8_percent_encode(m, NON_ALPHANUMERIC).to_string());
            }

            let req = Request::builder()
                .method(Method::GET)
                .uri(url)
                .body(Bytes::new())?;
            let resp = self.send(req).await?;
            if resp.status() != StatusCode::OK {
                return Err(remote_error("list containers", resp.status(), &resp));
            }

            let page = parse_list_containers(resp.body())?;
            containers.extend(page.containers);
            match page.next_marker {
                Some(m) => marker = Some(m),
                None => break,
            }
        }

        debug!("listed {} containers", containers.len());
        Ok(containers)
    }

    async fn send(&self, req: Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (mut parts, body) = req.into_parts();
        self.signer.sign(&mut parts).await?;
        self.ctx.http_send(Request::from_parts(parts, body)).await
    }
}

/// Container names must be 3-63 characters of lowercase letters, digits and
/// single hyphens, starting and ending with a letter or digit.
///
/// - [Naming and referencing containers](https://learn.microsoft.com/en-us/rest/api/storageservices/naming-and-referencing-containers--blobs--and-metadata)
fn validate_container_name(name: &str) -> Result<()> {
    let valid_chars = name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    let valid = (3..=63).contains(&name.len())
        && valid_chars
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--");

    if valid {
        Ok(())
    } else {
        Err(Error::request_invalid(format!(
            "invalid container name {name:?}"
        )))
    }
}

fn error_code(resp: &http::Response<Bytes>) -> Option<&str> {
    resp.headers()
        .get(X_MS_ERROR_CODE)
        .and_then(|v| v.to_str().ok())
}

fn remote_error(op: &str, status: StatusCode, resp: &http::Response<Bytes>) -> Error {
    let code = error_code(resp).unwrap_or("unknown");
    let body = String::from_utf8_lossy(resp.body());
    let message = format!("{op} failed with status {status} ({code}): {body}");
    if status == StatusCode::NOT_FOUND {
        Error::not_found(message)
    } else if status == StatusCode::FORBIDDEN {
        Error::credential_invalid(message)
    } else {
        Error::remote_service(message)
    }
}

struct ListContainersPage {
    containers: Vec<ContainerDescriptor>,
    next_marker: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EnumerationResults {
    #[serde(default)]
    containers: ContainersXml,
    next_marker: Option<String>,
}

#[derive(Deserialize, Default)]
struct ContainersXml {
    #[serde(rename = "Container", default)]
    container: Vec<ContainerXml>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContainerXml {
    name: String,
    properties: PropertiesXml,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PropertiesXml {
    #[serde(rename = "Last-Modified")]
    last_modified: String,
    etag: String,
    lease_status: Option<String>,
    lease_state: Option<String>,
    lease_duration: Option<String>,
    public_access: Option<String>,
}

fn parse_list_containers(body: &[u8]) -> Result<ListContainersPage> {
    let text = String::from_utf8_lossy(body);
    // The service prefixes its XML documents with a byte order mark.
    let text = text.trim_start_matches('\u{feff}');

    let results: EnumerationResults = quick_xml::de::from_str(text).map_err(|e| {
        Error::unexpected("failed to parse list containers response").with_source(e)
    })?;

    let containers = results
        .containers
        .container
        .into_iter()
        .map(|c| ContainerDescriptor {
            name: c.name,
            properties: ContainerProperties {
                last_modified: c.properties.last_modified,
                etag: c.properties.etag,
                lease_status: c.properties.lease_status,
                lease_state: c.properties.lease_state,
                lease_duration: c.properties.lease_duration,
                public_access: c.properties.public_access,
            },
        })
        .collect();

    Ok(ListContainersPage {
        containers,
        next_marker: results.next_marker.filter(|m| !m.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use azsample_core::HttpSend;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays queued responses and records every request it receives.
    #[derive(Debug, Default, Clone)]
    struct ReplayHttpSend {
        responses: Arc<Mutex<VecDeque<http::Response<Bytes>>>>,
        requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    }

    impl ReplayHttpSend {
        fn push(&self, status: u16, headers: &[(&str, &str)], body: &str) {
            let mut builder = http::Response::builder().status(status);
            for (k, v) in headers {
                builder = builder.header(*k, *v);
            }
            self.responses
                .lock()
                .unwrap()
                .push_back(builder.body(Bytes::from(body.to_string())).unwrap());
        }

        fn requests(&self) -> Vec<(Method, String)> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| (r.method().clone(), r.uri().to_string()))
                .collect()
        }
    }

    #[async_trait]
    impl HttpSend for ReplayHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            assert!(req.headers().contains_key("authorization"));
            self.requests.lock().unwrap().push(req);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::unexpected("no response queued"))
        }
    }

    const LIST_PAGE_1: &str = "\u{feff}<?xml version=\"1.0\" encoding=\"utf-8\"?>\
<EnumerationResults ServiceEndpoint=\"https://myaccount.blob.core.windows.net/\">\
<Containers><Container><Name>logs</Name><Properties>\
<Last-Modified>Tue, 01 Mar 2022 08:12:34 GMT</Last-Modified><Etag>\"0x8D9FB\"</Etag>\
<LeaseStatus>unlocked</LeaseStatus><LeaseState>available</LeaseState>\
</Properties></Container></Containers><NextMarker>/myaccount/samples</NextMarker>\
</EnumerationResults>";

    const LIST_PAGE_2: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
<EnumerationResults ServiceEndpoint=\"https://myaccount.blob.core.windows.net/\">\
<Containers><Container><Name>samples</Name><Properties>\
<Last-Modified>Wed, 02 Mar 2022 10:00:00 GMT</Last-Modified><Etag>\"0x8D9FC\"</Etag>\
<LeaseStatus>unlocked</LeaseStatus><LeaseState>available</LeaseState>\
<PublicAccess>blob</PublicAccess></Properties></Container></Containers><NextMarker />\
</EnumerationResults>";

    fn client(http: &ReplayHttpSend) -> BlobServiceClient {
        let ctx = Context::new().with_http_send(http.clone());
        BlobServiceClient::new(ctx, "myaccount", "bXlrZXk=")
    }

    #[tokio::test]
    async fn test_create_container() {
        let http = ReplayHttpSend::default();
        http.push(201, &[], "");

        let created = client(&http)
            .create_container_if_not_exists("samples", PublicAccess::Private)
            .await
            .unwrap();

        assert!(created);
        assert_eq!(
            http.requests(),
            vec![(
                Method::PUT,
                "https://myaccount.blob.core.windows.net/samples?restype=container".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_create_existing_container_is_not_an_error() {
        let http = ReplayHttpSend::default();
        http.push(409, &[(X_MS_ERROR_CODE, "ContainerAlreadyExists")], "");

        let created = client(&http)
            .create_container_if_not_exists("samples", PublicAccess::Private)
            .await
            .unwrap();

        assert!(!created);
    }

    #[tokio::test]
    async fn test_create_container_conflict_other_than_exists() {
        let http = ReplayHttpSend::default();
        http.push(409, &[(X_MS_ERROR_CODE, "ContainerBeingDeleted")], "");

        let err = client(&http)
            .create_container_if_not_exists("samples", PublicAccess::Private)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), azsample_core::ErrorKind::RemoteService);
        assert!(err.to_string().contains("ContainerBeingDeleted"));
    }

    #[tokio::test]
    async fn test_create_container_public_access_header() {
        let http = ReplayHttpSend::default();
        http.push(201, &[], "");

        client(&http)
            .create_container_if_not_exists("samples", PublicAccess::Blob)
            .await
            .unwrap();

        let requests = http.requests.lock().unwrap();
        assert_eq!(requests[0].headers()[X_MS_BLOB_PUBLIC_ACCESS], "blob");
    }

    #[tokio::test]
    async fn test_create_container_rejects_invalid_name() {
        let http = ReplayHttpSend::default();

        for name in ["ab", "Samples", "-samples", "sam--ples", "samples-"] {
            let err = client(&http)
                .create_container_if_not_exists(name, PublicAccess::Private)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), azsample_core::ErrorKind::RequestInvalid);
        }
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_containers_follows_marker() {
        let http = ReplayHttpSend::default();
        http.push(200, &[], LIST_PAGE_1);
        http.push(200, &[], LIST_PAGE_2);

        let containers = client(&http).list_containers().await.unwrap();

        assert_eq!(
            containers,
            vec![
                ContainerDescriptor {
                    name: "logs".to_string(),
                    properties: ContainerProperties {
                        last_modified: "Tue, 01 Mar 2022 08:12:34 GMT".to_string(),
                        etag: "\"0x8D9FB\"".to_string(),
                        lease_status: Some("unlocked".to_string()),
                        lease_state: Some("available".to_string()),
                        lease_duration: None,
                        public_access: None,
                    },
                },
                ContainerDescriptor {
                    name: "samples".to_string(),
                    properties: ContainerProperties {
                        last_modified: "Wed, 02 Mar 2022 10:00:00 GMT".to_string(),
                        etag: "\"0x8D9FC\"".to_string(),
                        lease_status: Some("unlocked".to_string()),
                        lease_state: Some("available".to_string()),
                        lease_duration: None,
                        public_access: Some("blob".to_string()),
                    },
                },
            ]
        );
        assert_eq!(
            http.requests()[1].1,
            "https://myaccount.blob.core.windows.net/?comp=list&marker=%2Fmyaccount%2Fsamples"
        );
    }

    #[test]
    fn test_endpoint_suffix() {
        let client = BlobServiceClient::new(Context::new(), "myaccount", "bXlrZXk=")
            .with_endpoint_suffix("core.chinacloudapi.cn");
        assert_eq!(
            client.endpoint(),
            "https://myaccount.blob.core.chinacloudapi.cn"
        );
    }

    #[tokio::test]
    async fn test_list_containers_empty_account() {
        let http = ReplayHttpSend::default();
        http.push(
            200,
            &[],
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><EnumerationResults ServiceEndpoint=\"https://myaccount.blob.core.windows.net/\"><Containers /><NextMarker /></EnumerationResults>",
        );

        let containers = client(&http).list_containers().await.unwrap();
        assert!(containers.is_empty());
    }

    #[tokio::test]
    async fn test_list_containers_forbidden() {
        let http = ReplayHttpSend::default();
        http.push(
            403,
            &[(X_MS_ERROR_CODE, "AuthenticationFailed")],
            "<Error><Code>AuthenticationFailed</Code></Error>",
        );

        let err = client(&http).list_containers().await.unwrap_err();
        assert_eq!(err.kind(), azsample_core::ErrorKind::CredentialInvalid);
    }

    #[test]
    fn test_container_descriptor_json() {
        let descriptor = ContainerDescriptor {
            name: "logs".to_string(),
            properties: ContainerProperties {
                last_modified: "Tue, 01 Mar 2022 08:12:34 GMT".to_string(),
                etag: "etag".to_string(),
                ..Default::default()
            },
        };

        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            serde_json::json!({
                "name": "logs",
                "properties": {
                    "last_modified": "Tue, 01 Mar 2022 08:12:34 GMT",
                    "etag": "etag"
                }
            })
        );
    }
}
