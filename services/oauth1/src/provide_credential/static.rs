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

use crate::{Credential, TokenCredential};
use async_trait::async_trait;
use oauthsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides static OAuth 1.0 credentials.
///
/// This provider is used when you have the consumer key and secret (and
/// optionally a token) directly and want to use them without any dynamic
/// loading.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with consumer key and consumer secret.
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Self {
        Self {
            credential: Credential::new(consumer_key, consumer_secret),
        }
    }

    /// Set the token and token secret.
    pub fn with_token(mut self, token: &str, token_secret: &str) -> Self {
        self.credential.token = Some(TokenCredential::new(token, token_secret));
        self
    }

    /// Set the verifier.
    ///
    /// Only takes effect together with a token.
    pub fn with_verifier(mut self, verifier: &str) -> Self {
        if let Some(token) = self.credential.token.as_mut() {
            token.verifier = Some(verifier.to_string());
        }
        self
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
