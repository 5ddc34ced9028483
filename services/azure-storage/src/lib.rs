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

//! Azure Blob Storage support for azsample.
//!
//! This crate provides:
//! - Shared Key credential and request signing
//! - A small Blob service client able to create containers and list them
//!
//! # Example
//!
//! ```rust,no_run
//! use azsample_azure_storage::{BlobServiceClient, PublicAccess};
//! use azsample_core::{Context, OsEnv, Result};
//! use azsample_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! let client = BlobServiceClient::new(ctx, "myaccount", "bXlrZXk=");
//! client
//!     .create_container_if_not_exists("samples", PublicAccess::Private)
//!     .await?;
//! for container in client.list_containers().await? {
//!     println!("{}", container.name);
//! }
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::DEFAULT_ENDPOINT_SUFFIX;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::StaticCredentialProvider;

mod sign_request;
pub use sign_request::RequestSigner;

mod blob;
pub use blob::{BlobServiceClient, ContainerDescriptor, ContainerProperties, PublicAccess};
