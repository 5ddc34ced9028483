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

use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};
use log::debug;
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// The loaded credential is cached and shared between clones; a new one is
/// only requested from the loader once the cached one reports itself invalid.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// The context this signer sends its credential requests through.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Return the cached credential, loading a fresh one if needed.
    pub async fn credential(&self) -> Result<Option<K>> {
        let cred = self.credential.lock().expect("lock poisoned").clone();
        if cred.is_valid() {
            return Ok(cred);
        }

        debug!("cached credential is missing or expiring, loading a new one");
        let cred = self.loader.provide_credential(&self.ctx).await?;
        *self.credential.lock().expect("lock poisoned") = cred.clone();
        Ok(cred)
    }

    /// Signing request.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        let cred = self.credential().await?;

        self.builder
            .sign_request(&self.ctx, req, cred.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential {
        value: String,
        valid: bool,
    }

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            self.valid
        }
    }

    #[derive(Debug)]
    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        valid: bool,
    }

    #[async_trait]
    impl ProvideCredential for CountingLoader {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<TestCredential>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential {
                value: format!("token-{n}"),
                valid: self.valid,
            }))
        }
    }

    #[derive(Debug)]
    struct HeaderBuilder;

    #[async_trait]
    impl SignRequest for HeaderBuilder {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            credential: Option<&TestCredential>,
        ) -> Result<()> {
            let cred = credential.ok_or_else(|| Error::request_invalid("credential is required"))?;
            req.headers
                .insert(http::header::AUTHORIZATION, cred.value.parse()?);
            Ok(())
        }
    }

    fn parts() -> http::request::Parts {
        http::Request::get("https://example.com")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_credential_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            calls: calls.clone(),
            valid: true,
        };
        let signer = Signer::new(Context::new(), loader, HeaderBuilder);

        let mut first = parts();
        signer.sign(&mut first).await.unwrap();
        let mut second = parts();
        signer.clone().sign(&mut second).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.headers["authorization"], "token-0");
    }

    #[tokio::test]
    async fn test_invalid_credential_is_reloaded() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            calls: calls.clone(),
            valid: false,
        };
        let signer = Signer::new(Context::new(), loader, HeaderBuilder);

        let mut req = parts();
        signer.sign(&mut req).await.unwrap();
        signer.sign(&mut req).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(req.headers["authorization"], "token-1");
    }
}
