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
use crate::Credential;
use async_trait::async_trait;
use azsample_core::hash::{base64_decode, base64_hmac_sha256};
use azsample_core::time::{format_http_date, now, DateTime};
use azsample_core::{Context, Error, Result, SignRequest, SigningRequest};
use http::header;
use http::header::HeaderName;
use http::request::Parts;
use http::HeaderValue;
use log::debug;

/// RequestSigner that implement Azure Storage Shared Key Authorization.
///
/// - [Authorize with Shared Key](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for Azure Storage.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::request_invalid("credential is required"));
        };

        let mut ctx = SigningRequest::build(req)?;

        if !ctx.headers.contains_key(X_MS_VERSION) {
            ctx.headers
                .insert(X_MS_VERSION, HeaderValue::from_static(AZURE_STORAGE_VERSION));
        }

        let now_time = self.time.unwrap_or_else(now);
        let string_to_sign = string_to_sign(&mut ctx, &cred.account_name, now_time)?;
        let decode_content = base64_decode(&cred.account_key)
            .map_err(|e| Error::credential_invalid("failed to decode account key").with_source(e))?;
        let signature = base64_hmac_sha256(&decode_content, string_to_sign.as_bytes());

        ctx.headers.insert(header::AUTHORIZATION, {
            let mut value: HeaderValue =
                format!("SharedKey {}:{signature}", cred.account_name).parse()?;
            value.set_sensitive(true);
            value
        });

        ctx.apply(req)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-Encoding + "\n" +
/// Content-Language + "\n" +
/// Content-Length + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// If-Modified-Since + "\n" +
/// If-Match + "\n" +
/// If-None-Match + "\n" +
/// If-Unmodified-Since + "\n" +
/// Range + "\n" +
/// CanonicalizedHeaders +
/// CanonicalizedResource;
/// ```
///
/// ## Reference
///
/// - [Blob, Queue, and File Services (Shared Key authorization)](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
fn string_to_sign(
    ctx: &mut SigningRequest,
    account_name: &str,
    now_time: DateTime,
) -> Result<String> {
    let content_md5 = HeaderName::from_static(CONTENT_MD5);
    let standard_headers = [
        &header::CONTENT_ENCODING,
        &header::CONTENT_LANGUAGE,
        &header::CONTENT_LENGTH,
        &content_md5,
        &header::CONTENT_TYPE,
        &header::DATE,
        &header::IF_MODIFIED_SINCE,
        &header::IF_MATCH,
        &header::IF_NONE_MATCH,
        &header::IF_UNMODIFIED_SINCE,
        &header::RANGE,
    ];

    let mut lines = Vec::with_capacity(standard_headers.len() + 3);
    lines.push(ctx.method.as_str().to_string());
    for name in standard_headers {
        let value = ctx.header_get_or_default(name)?;
        // Content-Length must be empty for zero-length bodies since 2015-02-21.
        if *name == header::CONTENT_LENGTH && value == "0" {
            lines.push(String::new());
        } else {
            lines.push(value.to_string());
        }
    }
    lines.push(canonicalize_header(ctx, now_time)?);
    lines.push(canonicalize_resource(ctx, account_name));

    let s = lines.join("\n");
    debug!("string to sign: {}", &s);

    Ok(s)
}

/// ## Reference
///
/// - [Constructing the canonicalized headers string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-headers-string)
fn canonicalize_header(ctx: &mut SigningRequest, now_time: DateTime) -> Result<String> {
    ctx.headers
        .insert(X_MS_DATE, format_http_date(now_time).parse()?);

    Ok(SigningRequest::header_to_string(
        ctx.header_to_vec_with_prefix("x-ms-")?,
        ":",
        "\n",
    ))
}

/// ## Reference
///
/// - [Constructing the canonicalized resource string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-resource-string)
fn canonicalize_resource(ctx: &SigningRequest, account_name: &str) -> String {
    if ctx.query.is_empty() {
        return format!("/{}{}", account_name, ctx.path);
    }

    let query = ctx
        .query
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.clone()))
        .collect();

    format!(
        "/{}{}\n{}",
        account_name,
        ctx.path,
        SigningRequest::query_to_percent_decoded_string(query, ":", "\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use http::Request;
    use pretty_assertions::assert_eq;

    fn signing_time() -> DateTime {
        chrono::Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34).unwrap()
    }

    #[tokio::test]
    async fn test_shared_key_list_containers() {
        let _ = env_logger::builder().is_test(true).try_init();

        let cred = Credential::with_shared_key("myaccount", "bXlrZXk=");
        let signer = RequestSigner::new().with_time(signing_time());

        let (mut parts, _) = Request::get("https://myaccount.blob.core.windows.net/?comp=list")
            .body(())
            .unwrap()
            .into_parts();

        signer
            .sign_request(&Context::new(), &mut parts, Some(&cred))
            .await
            .unwrap();

        assert_eq!(parts.headers["x-ms-date"], "Tue, 01 Mar 2022 08:12:34 GMT");
        assert_eq!(parts.headers["x-ms-version"], AZURE_STORAGE_VERSION);
        assert_eq!(
            parts.headers["authorization"],
            "SharedKey myaccount:J+IX/QHTU46IzHxycVOrob9D6wyG7kNtTgeMgupFxPU="
        );
        assert_eq!(
            parts.uri.to_string(),
            "https://myaccount.blob.core.windows.net/?comp=list"
        );
    }

    #[tokio::test]
    async fn test_shared_key_create_container() {
        let cred = Credential::with_shared_key("myaccount", "bXlrZXk=");
        let signer = RequestSigner::new().with_time(signing_time());

        let (mut parts, _) =
            Request::put("https://myaccount.blob.core.windows.net/samples?restype=container")
                .header(header::CONTENT_LENGTH, "0")
                .body(())
                .unwrap()
                .into_parts();

        signer
            .sign_request(&Context::new(), &mut parts, Some(&cred))
            .await
            .unwrap();

        assert_eq!(
            parts.headers["authorization"],
            "SharedKey myaccount:A4PRsICyLltAgEnrS+jwB2FZpZIkNj81M5bDkkxscJE="
        );
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let (mut parts, _) = Request::get("https://myaccount.blob.core.windows.net/")
            .body(())
            .unwrap()
            .into_parts();

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), azsample_core::ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_invalid_account_key() {
        let cred = Credential::with_shared_key("myaccount", "not base64!");
        let (mut parts, _) = Request::get("https://myaccount.blob.core.windows.net/")
            .body(())
            .unwrap()
            .into_parts();

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, Some(&cred))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), azsample_core::ErrorKind::CredentialInvalid);
    }
}
