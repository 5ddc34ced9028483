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

use crate::constants::*;
use azsample_core::Context;

/// Config carries the cloud endpoints used for Resource Manager calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `authority_host` will be loaded from
    ///
    /// - env value: [`AZURE_AUTHORITY_HOST`]
    /// - default: `https://login.microsoftonline.com`
    pub authority_host: String,
    /// `resource_manager_endpoint` will be loaded from
    ///
    /// - env value: [`AZURE_RESOURCE_MANAGER_ENDPOINT`]
    /// - default: `https://management.azure.com`
    pub resource_manager_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            authority_host: AZURE_PUBLIC_CLOUD_AUTHORITY.to_string(),
            resource_manager_endpoint: AZURE_PUBLIC_CLOUD_RESOURCE_MANAGER.to_string(),
        }
    }
}

impl Config {
    /// Load config from env, falling back to the public cloud.
    pub fn from_env(ctx: &Context) -> Self {
        let mut config = Self::default();

        if let Some(v) = ctx.env_var(AZURE_AUTHORITY_HOST).filter(|v| !v.is_empty()) {
            config.authority_host = v.trim_end_matches('/').to_string();
        }

        if let Some(v) = ctx
            .env_var(AZURE_RESOURCE_MANAGER_ENDPOINT)
            .filter(|v| !v.is_empty())
        {
            config.resource_manager_endpoint = v.trim_end_matches('/').to_string();
        }

        config
    }

    /// Scope requested for Resource Manager tokens.
    pub fn resource_manager_scope(&self) -> String {
        format!("{}/.default", self.resource_manager_endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azsample_core::StaticEnv;

    #[test]
    fn test_defaults_to_public_cloud() {
        let config = Config::from_env(&Context::new());

        assert_eq!(config.authority_host, "https://login.microsoftonline.com");
        assert_eq!(
            config.resource_manager_scope(),
            "https://management.azure.com/.default"
        );
    }

    #[test]
    fn test_from_env() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (AZURE_AUTHORITY_HOST, "https://login.chinacloudapi.cn/"),
            (AZURE_RESOURCE_MANAGER_ENDPOINT, "https://management.chinacloudapi.cn/"),
        ]));
        let config = Config::from_env(&ctx);

        assert_eq!(config.authority_host, "https://login.chinacloudapi.cn");
        assert_eq!(
            config.resource_manager_endpoint,
            "https://management.chinacloudapi.cn"
        );
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(AZURE_AUTHORITY_HOST, "")]));

        assert_eq!(Config::from_env(&ctx), Config::default());
    }
}
