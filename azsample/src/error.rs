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

use crate::response::respond;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use azsample_core::ErrorKind;
use log::{error, warn};
use serde::Serialize;
use thiserror::Error;

/// Result type of the route handlers.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures a route handler reports to its caller.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required env value or credential field is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The service principal could not be exchanged for a token, or the
    /// remote service rejected the credential.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The remote call failed.
    #[error("remote service error: {0}")]
    RemoteService(String),

    /// The remote resource does not exist, or a listing came back empty.
    #[error("not found: {0}")]
    NotFound(String),

    /// The response could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<azsample_core::Error> for AppError {
    fn from(err: azsample_core::Error) -> Self {
        let message = match std::error::Error::source(&err) {
            Some(source) => format!("{err}: {source}"),
            None => err.to_string(),
        };

        match err.kind() {
            ErrorKind::ConfigInvalid | ErrorKind::RequestInvalid => {
                AppError::Configuration(message)
            }
            ErrorKind::CredentialInvalid => AppError::Authentication(message),
            ErrorKind::NotFound => AppError::NotFound(message),
            ErrorKind::RemoteService | ErrorKind::Unexpected => AppError::RemoteService(message),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine readable error type.
    pub error: String,
    /// Human readable description.
    pub message: String,
}

impl AppError {
    /// HTTP status and error type reported for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
            }
            AppError::Authentication(_) => (StatusCode::BAD_GATEWAY, "authentication_error"),
            AppError::RemoteService(_) => (StatusCode::BAD_GATEWAY, "remote_service_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error")
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Configuration(msg)
            | AppError::Authentication(msg)
            | AppError::RemoteService(msg)
            | AppError::NotFound(msg)
            | AppError::Serialization(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();
        match &self {
            AppError::NotFound(_) => warn!("{self}"),
            _ => error!("{self}"),
        }

        respond(
            status,
            &ErrorResponse {
                error: error_type.to_string(),
                message: self.message().to_string(),
            },
        )
    }
}
