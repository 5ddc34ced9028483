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
use crate::error::Result;
use crate::response::respond;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use azsample_azure_arm::DatabaseAccountsClient;
use log::info;

pub const DOCUMENTDB_RESOURCE_GROUP: &str = "DOCUMENTDB_RESOURGE_GROUP";
pub const DOCUMENTDB_ACCOUNT_NAME: &str = "DOCUMENTDB_ACCOUNT_NAME";
pub const COSMOSDB_RESOURCE_GROUP: &str = "COSMOSDB_RESOURCE_GROUP";
pub const COSMOSDB_ACCOUNT_NAME: &str = "COSMOSDB_ACCOUNT_NAME";

/// `GET /test-documentdb`: fetch the DocumentDB account and return its name.
pub async fn test_documentdb(State(state): State<AppState>) -> Result<Response> {
    info!("azure documentdb sample");
    get_account_name(&state, DOCUMENTDB_RESOURCE_GROUP, DOCUMENTDB_ACCOUNT_NAME).await
}

/// `GET /test-cosmosdb`: fetch the Cosmos DB account and return its name.
pub async fn test_cosmosdb(State(state): State<AppState>) -> Result<Response> {
    info!("azure cosmosdb sample");
    get_account_name(&state, COSMOSDB_RESOURCE_GROUP, COSMOSDB_ACCOUNT_NAME).await
}

async fn get_account_name(
    state: &AppState,
    resource_group_var: &str,
    account_name_var: &str,
) -> Result<Response> {
    let (subscription_id, principal) = state.arm_identity()?;
    let resource_group = require_env(state.ctx(), resource_group_var)?;
    let account_name = require_env(state.ctx(), account_name_var)?;

    let client = DatabaseAccountsClient::new(state.arm_client(&subscription_id, &principal));
    let account = client.get(&resource_group, &account_name).await?;

    Ok(respond(StatusCode::OK, &account.name))
}
