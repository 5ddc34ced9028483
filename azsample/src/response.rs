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

use crate::error::AppError;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use log::error;
use serde::Serialize;

/// Write `body` as JSON with the given status.
///
/// The body is encoded before the response is built. If encoding fails the
/// error is logged and the response keeps `status` with an empty body.
pub fn respond<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    let content_type = [(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    )];

    match serde_json::to_vec(body) {
        Ok(bs) => (status, content_type, bs).into_response(),
        Err(err) => {
            let err = AppError::Serialization(format!(
                "failed to encode response with status {status}: {err}"
            ));
            error!("{err}");
            (status, content_type).into_response()
        }
    }
}
