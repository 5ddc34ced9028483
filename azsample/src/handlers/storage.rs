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

use crate::config::{require_env, StorageAccountCredential, VcapServices, AZURE_STORAGE_SERVICE};
use crate::error::Result;
use crate::response::respond;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use azsample_azure_storage::{BlobServiceClient, PublicAccess};
use log::{debug, info};

pub const STORAGE_CONTAINER_NAME: &str = "STORAGE_CONTAINER_NAME";

/// `GET /test-storage`: create the configured container unless it exists,
/// then list all containers of the account.
pub async fn test_storage(State(state): State<AppState>) -> Result<Response> {
    info!("azure storage sample");

    let vcap = VcapServices::from_env(state.ctx())?;
    let cred: StorageAccountCredential = vcap.typed(AZURE_STORAGE_SERVICE)?;
    let container = require_env(state.ctx(), STORAGE_CONTAINER_NAME)?;

    let client = BlobServiceClient::new(
        state.ctx().clone(),
        &cred.storage_account_name,
        &cred.primary_access_key,
    )
    .with_endpoint_suffix(state.storage_endpoint_suffix());

    let created = client
        .create_container_if_not_exists(&container, PublicAccess::Private)
        .await?;
    debug!("container {container} created: {created}");

    let containers = client.list_containers().await?;
    Ok(respond(StatusCode::OK, &containers))
}
