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

//! Reqwest-based HTTP client implementation for azsample.
//!
//! This crate provides `ReqwestHttpSend`, an HTTP client that implements
//! the `HttpSend` trait from `azsample_core` using the popular reqwest library.
//!
//! ## Example
//!
//! ```no_run
//! use azsample_core::{Context, OsEnv};
//! use azsample_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::with_timeout(Duration::from_secs(10)).unwrap())
//!     .with_env(OsEnv);
//! ```

use async_trait::async_trait;
use azsample_core::{Error, HttpSend, Result};
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use std::time::Duration;

/// Timeout applied to every remote call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a new ReqwestHttpSend whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::unexpected("failed to build http client").with_source(e))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        debug!("sending {} {}", req.method(), req.uri().path());

        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                let msg = if e.is_timeout() {
                    "http request timed out"
                } else {
                    "failed to send http request"
                };
                Error::unexpected(msg).with_source(e)
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azsample_core::ErrorKind;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_request_without_authority_is_rejected() {
        let sender = ReqwestHttpSend::with_timeout(Duration::from_secs(1)).unwrap();
        let req = http::Request::get("/no-host").body(Bytes::new()).unwrap();

        let err = sender.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept the connection and never answer.
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let sender = ReqwestHttpSend::with_timeout(Duration::from_millis(200)).unwrap();
        let req = http::Request::get(format!("http://{addr}/"))
            .body(Bytes::new())
            .unwrap();

        let err = sender.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.message(), "http request timed out");
    }
}
