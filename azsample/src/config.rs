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

//! Configuration sources of the sample: the `VCAP_SERVICES` service bindings
//! and plain environment variables.

use azsample_core::hash::base64_decode;
use azsample_core::{Context, Error, Result};
use azsample_http_send_reqwest::DEFAULT_TIMEOUT;
use log::error;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Env value holding the platform service bindings.
pub const VCAP_SERVICES: &str = "VCAP_SERVICES";

/// Env value bounding every outbound call, in seconds.
pub const AZSAMPLE_HTTP_TIMEOUT_SECS: &str = "AZSAMPLE_HTTP_TIMEOUT_SECS";

/// Binding name of the storage account service.
pub const AZURE_STORAGE_SERVICE: &str = "azure-storage";

/// Parsed `VCAP_SERVICES` document.
///
/// The document maps a service name to its bindings:
///
/// ```json
/// { "azure-storage": [ { "credentials": { "storage_account_name": "..." } } ] }
/// ```
#[derive(Clone, Debug)]
pub struct VcapServices {
    services: Map<String, Value>,
}

impl VcapServices {
    /// Load the bindings from [`VCAP_SERVICES`].
    pub fn from_env(ctx: &Context) -> Result<Self> {
        let raw = require_env(ctx, VCAP_SERVICES)?;
        Self::parse(&raw)
    }

    /// Parse a `VCAP_SERVICES` document.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            Error::config_invalid(format!("{VCAP_SERVICES} is not valid JSON")).with_source(e)
        })?;

        match value {
            Value::Object(services) => Ok(Self { services }),
            _ => Err(Error::config_invalid(format!(
                "{VCAP_SERVICES} must be a JSON object"
            ))),
        }
    }

    /// Return the `credentials` object of the first binding of `service`.
    pub fn credentials(&self, service: &str) -> Result<&Map<String, Value>> {
        let bindings = self
            .services
            .get(service)
            .ok_or_else(|| {
                Error::config_invalid(format!("service {service} not found in {VCAP_SERVICES}"))
            })?
            .as_array()
            .ok_or_else(|| {
                Error::config_invalid(format!("bindings of service {service} must be a list"))
            })?;

        let binding = bindings
            .first()
            .ok_or_else(|| Error::config_invalid(format!("service {service} has no bindings")))?;

        binding
            .get("credentials")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                Error::config_invalid(format!(
                    "binding of service {service} has no credentials object"
                ))
            })
    }

    /// Deserialize the credentials of `service` into `T`.
    pub fn typed<T: DeserializeOwned + Validate>(&self, service: &str) -> Result<T> {
        let credentials = self.credentials(service)?;
        let typed: T = serde_json::from_value(Value::Object(credentials.clone())).map_err(|e| {
            Error::config_invalid(format!("invalid credentials of service {service}: {e}"))
        })?;
        typed.validate()?;
        Ok(typed)
    }
}

/// Checks applied after a credential bundle was deserialized.
pub trait Validate {
    /// Reject values that deserialized fine but are unusable.
    fn validate(&self) -> Result<()>;
}

/// Credentials of a storage account binding.
#[derive(Clone, Deserialize)]
pub struct StorageAccountCredential {
    /// Name of the storage account.
    pub storage_account_name: String,
    /// Base64 encoded account key.
    pub primary_access_key: String,
}

impl Debug for StorageAccountCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAccountCredential")
            .field("storage_account_name", &self.storage_account_name)
            .field(
                "primary_access_key",
                &azsample_core::utils::Redact::from(&self.primary_access_key),
            )
            .finish()
    }
}

impl Validate for StorageAccountCredential {
    fn validate(&self) -> Result<()> {
        if self.storage_account_name.is_empty() {
            return Err(Error::config_invalid("storage_account_name is empty"));
        }
        if self.primary_access_key.is_empty() {
            return Err(Error::config_invalid("primary_access_key is empty"));
        }
        base64_decode(&self.primary_access_key).map_err(|e| {
            Error::config_invalid("primary_access_key is not valid base64").with_source(e)
        })?;
        Ok(())
    }
}

/// Fetch a required env value, failing the current request if it is
/// missing or empty.
pub fn require_env(ctx: &Context, name: &str) -> Result<String> {
    ctx.env_var(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::config_invalid(format!("missing environment variable {name}")))
}

/// Timeout of outbound calls from [`AZSAMPLE_HTTP_TIMEOUT_SECS`], or
/// [`DEFAULT_TIMEOUT`] when unset.
///
/// Zero and non-numeric values are rejected.
pub fn http_timeout(ctx: &Context) -> Result<Duration> {
    let Some(raw) = ctx.env_var(AZSAMPLE_HTTP_TIMEOUT_SECS) else {
        return Ok(DEFAULT_TIMEOUT);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(Error::config_invalid(format!(
            "{AZSAMPLE_HTTP_TIMEOUT_SECS} must be greater than zero"
        ))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(Error::config_invalid(format!(
            "invalid {AZSAMPLE_HTTP_TIMEOUT_SECS}: {raw}"
        ))
        .with_source(e)),
    }
}

/// Fetch a required env value at startup, terminating the process when it
/// is missing or empty.
pub fn env_var_or_exit(ctx: &Context, name: &str) -> String {
    match require_env(ctx, name) {
        Ok(v) => v,
        Err(err) => {
            error!("{err}");
            std::process::exit(1)
        }
    }
}
