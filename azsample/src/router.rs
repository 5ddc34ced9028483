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

use crate::handlers;
use crate::AppState;
use axum::routing::get;
use axum::Router;

/// Build the router serving every sample route.
///
/// Only `GET` is routed; other methods on a known path answer
/// `405 Method Not Allowed`, unknown paths `404 Not Found`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/test-storage", get(handlers::test_storage))
        .route("/test-redis", get(handlers::test_redis))
        .route("/test-documentdb", get(handlers::test_documentdb))
        .route("/test-cosmosdb", get(handlers::test_cosmosdb))
        .route("/test-sqldb", get(handlers::test_sqldb))
        .route("/test-mysqldb", get(handlers::test_mysqldb))
        .route("/test-postgresqldb", get(handlers::test_postgresqldb))
        .route("/test-servicebus", get(handlers::test_servicebus))
        .with_state(state)
}
