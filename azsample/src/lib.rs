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

//! A sample gateway calling Azure managed services.
//!
//! Each route performs one call sequence against an Azure REST API and
//! returns a small JSON projection of the result:
//!
//! | Path | Call |
//! |---|---|
//! | `/test-storage` | create a blob container if absent, list containers |
//! | `/test-redis` | enable the non-SSL port of a Redis cache |
//! | `/test-documentdb`, `/test-cosmosdb` | get a database account |
//! | `/test-sqldb` | get a SQL database |
//! | `/test-mysqldb`, `/test-postgresqldb` | first server of a resource group |
//! | `/test-servicebus` | create or update a queue |
//!
//! Credentials come from `VCAP_SERVICES` (storage) and the `AZURE_*`
//! environment (Resource Manager). Failures are answered with a JSON error
//! body; the process keeps serving.
//!
//! # Example
//!
//! ```no_run
//! use azsample::{build_router, AppState};
//! use azsample_core::{Context, OsEnv};
//! use azsample_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! let app = build_router(AppState::new(ctx));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub use azsample_core::*;

pub mod config;
pub mod error;
pub mod response;

mod handlers;

mod router;
pub use router::build_router;

mod state;
pub use state::AppState;

pub use error::AppError;

/// Azure Storage clients.
pub mod storage {
    pub use azsample_azure_storage::*;
}

/// Azure Resource Manager clients.
pub mod arm {
    pub use azsample_azure_arm::*;
}
