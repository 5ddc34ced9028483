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

use crate::constants::TOKEN_REFRESH_MARGIN_SECS;
use azsample_core::time::{now, DateTime};
use azsample_core::utils::Redact;
use azsample_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Bearer token issued for Azure Resource Manager.
#[derive(Clone)]
pub struct Credential {
    /// Access token presented as `Authorization: Bearer`.
    pub access_token: String,
    /// Expiration time for this credential.
    pub expires_on: Option<DateTime>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }

        // Refresh ahead of expiry so in-flight calls never carry a stale token.
        match self.expires_on {
            Some(expires_on) => {
                expires_on
                    > now()
                        + chrono::TimeDelta::try_seconds(TOKEN_REFRESH_MARGIN_SECS)
                            .expect("in bounds")
            }
            None => true,
        }
    }
}

impl Credential {
    /// Create a new bearer credential.
    pub fn with_bearer_token(access_token: &str, expires_on: Option<DateTime>) -> Self {
        Self {
            access_token: access_token.to_string(),
            expires_on,
        }
    }
}
