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
use azsample_azure_arm::{
    ResourcesClient, SqlDatabasesClient, MYSQL_SERVER_TYPE, POSTGRESQL_SERVER_TYPE,
};
use log::info;

pub const SQL_RESOURCE_GROUP: &str = "SQL_RESOURCE_GROUP";
pub const SQL_SERVER_NAME: &str = "SQL_SERVER_NAME";
pub const SQL_DATABASE_NAME: &str = "SQL_DATABASE_NAME";
pub const MYSQL_RESOURCE_GROUP: &str = "MYSQL_RESOURCE_GROUP";
pub const POSTGRESQL_RESOURCE_GROUP: &str = "POSTGRESQL_RESOURCE_GROUP";

/// `GET /test-sqldb`: fetch the SQL database with its advisors and
/// encryption settings expanded, and return its name.
pub async fn test_sqldb(State(state): State<AppState>) -> Result<Response> {
    info!("azure sql database sample");

    let (subscription_id, principal) = state.arm_identity()?;
    let resource_group = require_env(state.ctx(), SQL_RESOURCE_GROUP)?;
    let server_name = require_env(state.ctx(), SQL_SERVER_NAME)?;
    let database_name = require_env(state.ctx(), SQL_DATABASE_NAME)?;

    let client = SqlDatabasesClient::new(state.arm_client(&subscription_id, &principal));
    let database = client
        .get(&resource_group, &server_name, &database_name)
        .await?;

    Ok(respond(StatusCode::OK, &database.name))
}

/// `GET /test-mysqldb`: return the first MySQL server of the resource group.
pub async fn test_mysqldb(State(state): State<AppState>) -> Result<Response> {
    info!("azure database for mysql sample");
    first_server_name(&state, MYSQL_RESOURCE_GROUP, MYSQL_SERVER_TYPE).await
}

/// `GET /test-postgresqldb`: return the first PostgreSQL server of the
/// resource group.
pub async fn test_postgresqldb(State(state): State<AppState>) -> Result<Response> {
    info!("azure database for postgresql sample");
    first_server_name(&state, POSTGRESQL_RESOURCE_GROUP, POSTGRESQL_SERVER_TYPE).await
}

async fn first_server_name(
    state: &AppState,
    resource_group_var: &str,
    resource_type: &str,
) -> Result<Response> {
    let (subscription_id, principal) = state.arm_identity()?;
    let resource_group = require_env(state.ctx(), resource_group_var)?;

    let client = ResourcesClient::new(state.arm_client(&subscription_id, &principal));
    let server = client.first_by_type(&resource_group, resource_type).await?;

    Ok(respond(StatusCode::OK, &server.name))
}
