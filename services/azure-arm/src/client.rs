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

use crate::constants::{AZURE_PUBLIC_CLOUD_RESOURCE_MANAGER, PATH_SEGMENT_ENCODE_SET};
use crate::Credential;
use azsample_core::{Error, Result, Signer};
use bytes::Bytes;
use http::{header, Method, Request, StatusCode};
use log::debug;
use percent_encoding::utf8_percent_encode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Client of the Azure Resource Manager API for one subscription.
///
/// Every request is authorized with the bearer token of `signer`; the typed
/// clients in this crate wrap an `ArmClient` for their resource provider.
#[derive(Debug, Clone)]
pub struct ArmClient {
    signer: Signer<Credential>,
    subscription_id: String,
    endpoint: String,
}

impl ArmClient {
    /// Create a client for `subscription_id` in the Azure public cloud.
    pub fn new(signer: Signer<Credential>, subscription_id: &str) -> Self {
        Self {
            signer,
            subscription_id: subscription_id.to_string(),
            endpoint: AZURE_PUBLIC_CLOUD_RESOURCE_MANAGER.to_string(),
        }
    }

    /// Use another Resource Manager endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Build the url of `path` below a resource group, e.g.
    /// `providers/Microsoft.Cache/Redis/{name}`.
    ///
    /// `segments` are percent-encoded and joined with `/` after
    /// `/subscriptions/{id}/resourceGroups/{group}`.
    pub fn resource_group_url(
        &self,
        resource_group: &str,
        segments: &[&str],
        api_version: &str,
    ) -> String {
        let mut url = format!(
            "{}/subscriptions/{}/resourceGroups/{}",
            self.endpoint,
            encode_segment(&self.subscription_id),
            encode_segment(resource_group),
        );
        for segment in segments {
            url.push('/');
            url.push_str(&encode_segment(segment));
        }
        url.push_str("?api-version=");
        url.push_str(api_version);
        url
    }

    /// Send a GET request and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send(Method::GET, url, None).await
    }

    /// Send a PUT request carrying `body` as JSON.
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let body = encode_body(body)?;
        self.send(Method::PUT, url, Some(body)).await
    }

    /// Send a PATCH request carrying `body` as JSON.
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let body = encode_body(body)?;
        self.send(Method::PATCH, url, Some(body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<T> {
        let mut builder = Request::builder()
            .method(method.clone())
            .uri(url)
            .header(header::ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let req = builder.body(body.unwrap_or_default())?;

        let (mut parts, body) = req.into_parts();
        self.signer.sign(&mut parts).await?;
        let resp = self
            .signer
            .context()
            .http_send(Request::from_parts(parts, body))
            .await?;

        let status = resp.status();
        debug!("{method} {url} returned {status}");
        if !status.is_success() {
            return Err(remote_error(&method, status, resp.body()));
        }

        serde_json::from_slice(resp.body()).map_err(|e| {
            Error::unexpected(format!("failed to decode response of {method} request"))
                .with_source(e)
        })
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET).to_string()
}

fn encode_body<B: Serialize>(body: &B) -> Result<Bytes> {
    serde_json::to_vec(body)
        .map(Bytes::from)
        .map_err(|e| Error::unexpected("failed to encode request body").with_source(e))
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: String,
    #[serde(default)]
    message: String,
}

/// Map a failed Resource Manager response onto an error kind.
///
/// - [Resource Manager error format](https://learn.microsoft.com/en-us/rest/api/azure/#error-response)
fn remote_error(method: &Method, status: StatusCode, body: &[u8]) -> Error {
    let detail = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(resp) => format!("{}: {}", resp.error.code, resp.error.message),
        Err(_) => String::from_utf8_lossy(body).to_string(),
    };
    let message = format!("{method} request failed with status {status}: {detail}");

    match status {
        StatusCode::NOT_FOUND => Error::not_found(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::credential_invalid(message),
        _ => Error::remote_service(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{test_signer, MockHttpSend};
    use azsample_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_resource_group_url() {
        let http = MockHttpSend::new();
        let client = ArmClient::new(test_signer(&http), "sub-1")
            .with_endpoint("https://management.usgovcloudapi.net/");

        assert_eq!(
            client.resource_group_url(
                "my group",
                &["providers", "Microsoft.Cache", "Redis", "cache(1)"],
                "2016-04-01"
            ),
            "https://management.usgovcloudapi.net/subscriptions/sub-1/resourceGroups/my%20group/providers/Microsoft.Cache/Redis/cache(1)?api-version=2016-04-01"
        );
    }

    #[tokio::test]
    async fn test_get_sends_bearer_token() {
        let http = MockHttpSend::new();
        http.on(Method::GET, "/resourceGroups/rg/things/a", 200, r#"{"name":"a"}"#);
        let client = ArmClient::new(test_signer(&http), "sub");

        let url = client.resource_group_url("rg", &["things", "a"], "2020-01-01");
        let value: serde_json::Value = client.get(&url).await.unwrap();
        assert_eq!(value["name"], "a");

        let last = http.requests().pop().unwrap();
        assert_eq!(last.authorization.as_deref(), Some("Bearer eyJ0eXAi"));
    }

    #[test_case(404, r#"{"error":{"code":"ResourceNotFound","message":"gone"}}"#, ErrorKind::NotFound ; "not found")]
    #[test_case(403, r#"{"error":{"code":"AuthorizationFailed","message":"denied"}}"#, ErrorKind::CredentialInvalid ; "forbidden")]
    #[test_case(401, "", ErrorKind::CredentialInvalid ; "unauthorized")]
    #[test_case(500, "oops", ErrorKind::RemoteService ; "server error")]
    #[test_case(409, r#"{"error":{"code":"Conflict","message":"busy"}}"#, ErrorKind::RemoteService ; "conflict")]
    #[tokio::test]
    async fn test_error_mapping(status: u16, body: &str, kind: ErrorKind) {
        let http = MockHttpSend::new();
        http.on(Method::GET, "/resourceGroups/rg/", status, body);
        let client = ArmClient::new(test_signer(&http), "sub");

        let url = client.resource_group_url("rg", &["x"], "2020-01-01");
        let err = client.get::<serde_json::Value>(&url).await.unwrap_err();
        assert_eq!(err.kind(), kind);
    }

    #[tokio::test]
    async fn test_error_message_carries_remote_code() {
        let http = MockHttpSend::new();
        http.on(
            Method::GET,
            "/resourceGroups/rg/",
            404,
            r#"{"error":{"code":"ResourceGroupNotFound","message":"Resource group 'rg' could not be found."}}"#,
        );
        let client = ArmClient::new(test_signer(&http), "sub");

        let url = client.resource_group_url("rg", &["x"], "2020-01-01");
        let err = client.get::<serde_json::Value>(&url).await.unwrap_err();
        assert!(err.message().contains("ResourceGroupNotFound"));
    }

    #[tokio::test]
    async fn test_undecodable_response() {
        let http = MockHttpSend::new();
        http.on(Method::GET, "/resourceGroups/rg/", 200, "not json");
        let client = ArmClient::new(test_signer(&http), "sub");

        let url = client.resource_group_url("rg", &["x"], "2020-01-01");
        let err = client.get::<serde_json::Value>(&url).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
