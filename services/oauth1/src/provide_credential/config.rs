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

use async_trait::async_trait;
use oauthsign_core::Result;
use oauthsign_core::{Context, ProvideCredential};
use std::sync::Arc;

use crate::config::Config;
use crate::credential::{Credential, TokenCredential};

/// ConfigCredentialProvider will load credential from config.
///
/// Unset config fields are filled from env before the credential is built.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new loader via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref().clone().from_env(ctx);

        let (Some(ck), Some(cs)) = (config.consumer_key, config.consumer_secret) else {
            return Ok(None);
        };

        let token = config.token.map(|token| TokenCredential {
            token,
            token_secret: config.token_secret.unwrap_or_default(),
            verifier: config.verifier,
        });

        Ok(Some(Credential {
            consumer_key: ck,
            consumer_secret: cs,
            token,
        }))
    }
}
