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

// Headers used in azure storage services.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_VERSION: &str = "x-ms-version";
pub const X_MS_ERROR_CODE: &str = "x-ms-error-code";
pub const X_MS_BLOB_PUBLIC_ACCESS: &str = "x-ms-blob-public-access";
pub const CONTENT_MD5: &str = "content-md5";

/// Storage service version sent with every request.
pub const AZURE_STORAGE_VERSION: &str = "2019-12-12";

/// Endpoint suffix of the Azure public cloud.
pub const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";
