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

//! Route handlers.
//!
//! Every handler resolves its configuration first, then builds one client
//! and issues its remote calls. A missing env value therefore fails the
//! request before anything is sent.

mod database;
mod documentdb;
mod redis;
mod servicebus;
mod storage;

pub use database::{test_mysqldb, test_postgresqldb, test_sqldb};
pub use documentdb::{test_cosmosdb, test_documentdb};
pub use redis::test_redis;
pub use servicebus::test_servicebus;
pub use storage::test_storage;
