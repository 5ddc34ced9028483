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
use crate::{Config, Credential};
use async_trait::async_trait;
use azsample_core::utils::Redact;
use azsample_core::{Context, Error, ProvideCredential, Result};
use log::{debug, warn};
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Application identity used to authenticate without user interaction.
#[derive(Clone, PartialEq, Eq)]
pub struct ServicePrincipal {
    /// Directory (tenant) id.
    pub tenant_id: String,
    /// Application (client) id.
    pub client_id: String,
    /// Client secret of the application.
    pub client_secret: String,
}

impl Debug for ServicePrincipal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServicePrincipal")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .finish()
    }
}

impl ServicePrincipal {
    /// Load the service principal from `AZURE_TENANT_ID`, `AZURE_CLIENT_ID`
    /// and `AZURE_CLIENT_SECRET`.
    ///
    /// Missing or empty values are reported as configuration errors.
    pub fn from_env(ctx: &Context) -> Result<Self> {
        let required = |key: &str| {
            ctx.env_var(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::config_invalid(format!("missing environment variable {key}")))
        };

        Ok(Self {
            tenant_id: required(AZURE_TENANT_ID)?,
            client_id: required(AZURE_CLIENT_ID)?,
            client_secret: required(AZURE_CLIENT_SECRET)?,
        })
    }
}

/// Load credential from Azure Client Secret.
///
/// This loader implements the OAuth 2.0 client credentials flow, which allows
/// applications to authenticate to Azure Resource Manager using a client ID
/// and client secret.
///
/// Reference: <https://learn.microsoft.com/en-us/entra/identity-platform/v2-oauth2-client-creds-grant-flow>
#[derive(Debug, Clone)]
pub struct ClientSecretCredentialProvider {
    principal: ServicePrincipal,
    authority_host: String,
    scope: String,
}

impl ClientSecretCredentialProvider {
    /// Create a new client secret loader for the Resource Manager of `config`.
    pub fn new(principal: ServicePrincipal, config: &Config) -> Self {
        Self {
            principal,
            authority_host: config.authority_host.clone(),
            scope: config.resource_manager_scope(),
        }
    }
}

#[async_trait]
impl ProvideCredential for ClientSecretCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let token = get_client_secret_token(
            &self.principal,
            &self.authority_host,
            &self.scope,
            ctx,
        )
        .await?;

        let expires_on = azsample_core::time::now()
            + chrono::TimeDelta::try_seconds(token.expires_in as i64)
                .unwrap_or_else(|| chrono::TimeDelta::try_minutes(10).expect("in bounds"));
        debug!(
            "obtained token for client {} expiring at {expires_on}",
            self.principal.client_id
        );

        Ok(Some(Credential::with_bearer_token(
            &token.access_token,
            Some(expires_on),
        )))
    }
}

#[derive(Deserialize)]
struct ClientSecretTokenResponse {
    access_token: String,
    #[serde(deserialize_with = "deserialize_seconds")]
    expires_in: u64,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Identity endpoints answer `expires_in` either as number or as string.
fn deserialize_seconds<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(u64),
        Text(String),
    }

    match Seconds::deserialize(deserializer)? {
        Seconds::Number(n) => Ok(n),
        Seconds::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

async fn get_client_secret_token(
    principal: &ServicePrincipal,
    authority_host: &str,
    scope: &str,
    ctx: &Context,
) -> Result<ClientSecretTokenResponse> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        authority_host.trim_end_matches('/'),
        utf8_percent_encode(&principal.tenant_id, PATH_SEGMENT_ENCODE_SET)
    );

    let body = form_urlencoded::Serializer::new(String::new())
        .append_pair("scope", scope)
        .append_pair("client_id", &principal.client_id)
        .append_pair("client_secret", &principal.client_secret)
        .append_pair("grant_type", "client_credentials")
        .finish();

    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri(&url)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(bytes::Bytes::from(body))?;

    let resp = ctx.http_send(req).await.map_err(|e| {
        Error::credential_invalid("failed to reach identity endpoint").with_source(e)
    })?;

    if !resp.status().is_success() {
        let status = resp.status();
        let detail = match serde_json::from_slice::<TokenErrorResponse>(resp.body()) {
            Ok(err) => format!("{}: {}", err.error, err.error_description),
            Err(_) => String::from_utf8_lossy(resp.body()).to_string(),
        };
        warn!(
            "token request for client {} failed with status {status}",
            principal.client_id
        );
        return Err(Error::credential_invalid(format!(
            "client secret token request failed with status {status}: {detail}"
        )));
    }

    serde_json::from_slice(resp.body()).map_err(|e| {
        Error::credential_invalid("failed to parse client secret token response").with_source(e)
    })
}
