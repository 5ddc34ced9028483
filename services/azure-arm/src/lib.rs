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

//! Azure Resource Manager support for azsample.
//!
//! This crate provides:
//! - Service principal (client secret) token exchange against Microsoft Entra ID
//! - Bearer token request signing and a token cache keyed by tenant and client
//! - Small typed clients for the Resource Manager operations used by the samples:
//!   Redis caches, DocumentDB / Cosmos DB accounts, SQL databases, resource
//!   group listings and Service Bus queues
//!
//! # Example
//!
//! ```rust,no_run
//! use azsample_azure_arm::{ArmClient, Config, DatabaseAccountsClient, ServicePrincipal, TokenCache};
//! use azsample_core::{Context, OsEnv, Result};
//! use azsample_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! let config = Config::from_env(&ctx);
//! let principal = ServicePrincipal::from_env(&ctx)?;
//! let tokens = TokenCache::new();
//!
//! let arm = ArmClient::new(tokens.signer(&ctx, &config, &principal), "subscription-id")
//!     .with_endpoint(&config.resource_manager_endpoint);
//! let account = DatabaseAccountsClient::new(arm)
//!     .get("my-group", "my-account")
//!     .await?;
//! println!("{}", account.name);
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::{ClientSecretCredentialProvider, ServicePrincipal};

mod sign_request;
pub use sign_request::RequestSigner;

mod token_cache;
pub use token_cache::TokenCache;

mod client;
pub use client::ArmClient;

mod redis;
pub use redis::{
    RedisClient, RedisProperties, RedisResource, RedisUpdateParameters, RedisUpdateProperties,
};

mod documentdb;
pub use documentdb::{DatabaseAccount, DatabaseAccountProperties, DatabaseAccountsClient};

mod sql;
pub use sql::{SqlDatabase, SqlDatabaseProperties, SqlDatabasesClient, SQL_DATABASE_EXPAND};

mod resources;
pub use resources::{GenericResource, ResourcesClient, MYSQL_SERVER_TYPE, POSTGRESQL_SERVER_TYPE};

mod servicebus;
pub use servicebus::{ServiceBusQueue, ServiceBusQueueProperties, ServiceBusQueuesClient};
