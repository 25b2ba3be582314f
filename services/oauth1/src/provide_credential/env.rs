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

use crate::{constants::*, Credential, TokenCredential};
use async_trait::async_trait;
use oauthsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads OAuth 1.0 credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `OAUTH1_CONSUMER_KEY`: The consumer key
/// - `OAUTH1_CONSUMER_SECRET`: The consumer secret
/// - `OAUTH1_TOKEN`: The token (optional)
/// - `OAUTH1_TOKEN_SECRET`: The token secret (optional, defaults to empty)
/// - `OAUTH1_VERIFIER`: The verifier (optional)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let consumer_key = envs.get(OAUTH1_CONSUMER_KEY);
        let consumer_secret = envs.get(OAUTH1_CONSUMER_SECRET);

        let (Some(ck), Some(cs)) = (consumer_key, consumer_secret) else {
            return Ok(None);
        };

        let token = envs.get(OAUTH1_TOKEN).map(|token| TokenCredential {
            token: token.clone(),
            token_secret: envs.get(OAUTH1_TOKEN_SECRET).cloned().unwrap_or_default(),
            verifier: envs.get(OAUTH1_VERIFIER).cloned(),
        });

        Ok(Some(Credential {
            consumer_key: ck.clone(),
            consumer_secret: cs.clone(),
            token,
        }))
    }
}
