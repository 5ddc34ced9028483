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

use crate::constants::REDIS_API_VERSION;
use crate::ArmClient;
use azsample_core::Result;
use log::info;
use serde::{Deserialize, Serialize};

/// An Azure Cache for Redis resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisResource {
    /// Fully qualified resource id.
    #[serde(default)]
    pub id: String,
    /// Cache name.
    pub name: String,
    /// Region of the cache.
    #[serde(default)]
    pub location: String,
    /// Cache properties.
    #[serde(default)]
    pub properties: RedisProperties,
}

/// Properties of a Redis cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisProperties {
    /// Whether the non-SSL port 6379 is enabled, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_non_ssl_port: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redis_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// Body of an update request; unset fields keep their current value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RedisUpdateParameters {
    /// Properties to change.
    pub properties: RedisUpdateProperties,
}

/// Changeable properties of a Redis cache.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisUpdateProperties {
    /// Enable or disable the non-SSL port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_non_ssl_port: Option<bool>,
}

/// Client of `Microsoft.Cache/Redis`.
///
/// - [Redis REST API](https://learn.microsoft.com/en-us/rest/api/redis/redis)
#[derive(Debug, Clone)]
pub struct RedisClient {
    arm: ArmClient,
}

impl RedisClient {
    /// Create a Redis client on top of `arm`.
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    fn url(&self, resource_group: &str, name: &str) -> String {
        self.arm.resource_group_url(
            resource_group,
            &["providers", "Microsoft.Cache", "Redis", name],
            REDIS_API_VERSION,
        )
    }

    /// Update an existing Redis cache and return the resulting resource.
    pub async fn update(
        &self,
        resource_group: &str,
        name: &str,
        parameters: &RedisUpdateParameters,
    ) -> Result<RedisResource> {
        let cache: RedisResource = self
            .arm
            .patch(&self.url(resource_group, name), parameters)
            .await?;
        info!("updated redis cache {}", cache.name);
        Ok(cache)
    }
}

impl RedisUpdateParameters {
    /// Parameters that only toggle the non-SSL port.
    pub fn enable_non_ssl_port(enabled: bool) -> Self {
        Self {
            properties: RedisUpdateProperties {
                enable_non_ssl_port: Some(enabled),
            },
        }
    }
}
