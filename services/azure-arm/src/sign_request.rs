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

use crate::Credential;
use async_trait::async_trait;
use azsample_core::{Context, Error, Result, SignRequest};
use http::header;
use http::request::Parts;
use http::HeaderValue;

/// RequestSigner that authorizes Resource Manager calls with a bearer token.
#[derive(Debug, Default)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new bearer signer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::request_invalid("credential is required"));
        };

        let mut value: HeaderValue = format!("Bearer {}", cred.access_token).parse()?;
        value.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, value);

        Ok(())
    }
}
