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
use azsample_azure_arm::{ServiceBusQueueProperties, ServiceBusQueuesClient};
use log::info;

pub const SERVICEBUS_RESOURCE_GROUP: &str = "SERVICEBUS_RESOURGE_GROUP";
pub const SERVICEBUS_NAME: &str = "SERVICEBUS_NAME";
pub const SERVICEBUS_QUEUE_NAME: &str = "SERVICEBUS_QUEUE_NAME";

/// `GET /test-servicebus`: create or update the queue and return its name.
pub async fn test_servicebus(State(state): State<AppState>) -> Result<Response> {
    info!("azure service bus sample");

    let (subscription_id, principal) = state.arm_identity()?;
    let resource_group = require_env(state.ctx(), SERVICEBUS_RESOURCE_GROUP)?;
    let namespace = require_env(state.ctx(), SERVICEBUS_NAME)?;
    let queue_name = require_env(state.ctx(), SERVICEBUS_QUEUE_NAME)?;

    let client = ServiceBusQueuesClient::new(state.arm_client(&subscription_id, &principal));
    let queue = client
        .create_or_update(
            &resource_group,
            &namespace,
            &queue_name,
            &ServiceBusQueueProperties::default(),
        )
        .await?;

    Ok(respond(StatusCode::OK, &queue.name))
}
