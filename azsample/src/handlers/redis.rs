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

use crate::config::require_env;
use crate::error::{AppError, Result};
use crate::response::respond;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use azsample_azure_arm::{RedisClient, RedisUpdateParameters};
use log::info;

pub const REDIS_RESOURCE_GROUP: &str = "REDIS_RESOURGE_GROUP";
pub const REDIS_NAME: &str = "REDIS_NAME";

/// `GET /test-redis`: enable the non-SSL port of the cache and report the
/// resulting flag as `<name>:<true|false>`.
pub async fn test_redis(State(state): State<AppState>) -> Result<Response> {
    info!("azure redis cache sample");

    let (subscription_id, principal) = state.arm_identity()?;
    let resource_group = require_env(state.ctx(), REDIS_RESOURCE_GROUP)?;
    let name = require_env(state.ctx(), REDIS_NAME)?;

    let client = RedisClient::new(state.arm_client(&subscription_id, &principal));
    let cache = client
        .update(
            &resource_group,
            &name,
            &RedisUpdateParameters::enable_non_ssl_port(true),
        )
        .await?;

    let enabled = cache.properties.enable_non_ssl_port.ok_or_else(|| {
        AppError::RemoteService(format!(
            "redis cache {} did not report enableNonSslPort",
            cache.name
        ))
    })?;

    let result = format!("{}:{enabled}", cache.name);
    Ok(respond(StatusCode::OK, &result))
}
