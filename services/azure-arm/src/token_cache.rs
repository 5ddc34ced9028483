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

use crate::{ClientSecretCredentialProvider, Config, Credential, RequestSigner, ServicePrincipal};
use azsample_core::{Context, Signer};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct CacheEntry {
    client_secret: String,
    authority_host: String,
    resource_manager_endpoint: String,
    signer: Signer<Credential>,
}

/// TokenCache hands out Resource Manager signers shared per service principal.
///
/// Signers are keyed by `(tenant_id, client_id)`. Each signer holds its bearer
/// token and refreshes it once it is about to expire, so concurrent requests
/// for the same principal reuse one token. An entry is rebuilt when the secret
/// or the cloud endpoints of the principal change.
#[derive(Clone, Debug, Default)]
pub struct TokenCache {
    entries: Arc<Mutex<HashMap<(String, String), CacheEntry>>>,
}

impl TokenCache {
    /// Create an empty token cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the signer for `principal`, creating it on first use.
    pub fn signer(
        &self,
        ctx: &Context,
        config: &Config,
        principal: &ServicePrincipal,
    ) -> Signer<Credential> {
        let key = (principal.tenant_id.clone(), principal.client_id.clone());
        let mut entries = self.entries.lock().expect("lock poisoned");

        if let Some(entry) = entries.get(&key) {
            if entry.client_secret == principal.client_secret
                && entry.authority_host == config.authority_host
                && entry.resource_manager_endpoint == config.resource_manager_endpoint
            {
                return entry.signer.clone();
            }
            debug!(
                "service principal {} changed, dropping cached token",
                principal.client_id
            );
        }

        let signer = Signer::new(
            ctx.clone(),
            ClientSecretCredentialProvider::new(principal.clone(), config),
            RequestSigner::new(),
        );
        entries.insert(
            key,
            CacheEntry {
                client_secret: principal.client_secret.clone(),
                authority_host: config.authority_host.clone(),
                resource_manager_endpoint: config.resource_manager_endpoint.clone(),
                signer: signer.clone(),
            },
        );
        signer
    }
}
