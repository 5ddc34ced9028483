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

use azsample_azure_arm::{ArmClient, Config, ServicePrincipal, TokenCache};
use azsample_azure_storage::DEFAULT_ENDPOINT_SUFFIX;
use azsample_core::{Context, Result};

/// Env value overriding the storage endpoint suffix.
pub const AZURE_STORAGE_ENDPOINT_SUFFIX: &str = "AZURE_STORAGE_ENDPOINT_SUFFIX";
/// Env value naming the subscription of every Resource Manager call.
pub const AZURE_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";

/// State shared by all route handlers.
///
/// Holds no credentials; handlers resolve them per request.
#[derive(Clone, Debug)]
pub struct AppState {
    ctx: Context,
    tokens: TokenCache,
    arm: Config,
    storage_endpoint_suffix: String,
}

impl AppState {
    /// Build the state, reading the cloud endpoints from `ctx`.
    pub fn new(ctx: Context) -> Self {
        let arm = Config::from_env(&ctx);
        let storage_endpoint_suffix = ctx
            .env_var(AZURE_STORAGE_ENDPOINT_SUFFIX)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT_SUFFIX.to_string());

        Self {
            ctx,
            tokens: TokenCache::new(),
            arm,
            storage_endpoint_suffix,
        }
    }

    /// Runtime context of outbound calls.
    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    /// Endpoint suffix of storage accounts.
    pub fn storage_endpoint_suffix(&self) -> &str {
        &self.storage_endpoint_suffix
    }

    /// Build a Resource Manager client for the configured subscription and
    /// service principal.
    ///
    /// `subscription_id` and `principal` are resolved by the caller so that
    /// missing configuration is reported before any remote call.
    pub fn arm_client(&self, subscription_id: &str, principal: &ServicePrincipal) -> ArmClient {
        let signer = self.tokens.signer(&self.ctx, &self.arm, principal);
        ArmClient::new(signer, subscription_id).with_endpoint(&self.arm.resource_manager_endpoint)
    }

    /// Resolve subscription and service principal from the environment.
    pub fn arm_identity(&self) -> Result<(String, ServicePrincipal)> {
        let subscription_id = crate::config::require_env(&self.ctx, AZURE_SUBSCRIPTION_ID)?;
        let principal = ServicePrincipal::from_env(&self.ctx)?;
        Ok((subscription_id, principal))
    }
}
