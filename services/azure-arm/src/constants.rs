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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Env values used to locate the Azure cloud.
pub const AZURE_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const AZURE_RESOURCE_MANAGER_ENDPOINT: &str = "AZURE_RESOURCE_MANAGER_ENDPOINT";
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";

// Endpoints of the Azure public cloud.
pub const AZURE_PUBLIC_CLOUD_AUTHORITY: &str = "https://login.microsoftonline.com";
pub const AZURE_PUBLIC_CLOUD_RESOURCE_MANAGER: &str = "https://management.azure.com";

// Resource Manager api-versions per resource provider.
pub const REDIS_API_VERSION: &str = "2016-04-01";
pub const DOCUMENTDB_API_VERSION: &str = "2015-04-08";
pub const SQL_API_VERSION: &str = "2014-04-01";
pub const RESOURCES_API_VERSION: &str = "2017-05-10";
pub const SERVICEBUS_API_VERSION: &str = "2017-04-01";

/// Tokens are refreshed this many seconds before they expire.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;

/// Characters kept verbatim in a resource path segment.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'(')
    .remove(b')');
