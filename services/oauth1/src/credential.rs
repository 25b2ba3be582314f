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

use std::fmt::{Debug, Formatter};

use oauthsign_core::{utils::Redact, SigningCredential};

/// Credential for OAuth 1.0.
///
/// Without `token` the signer is requesting temporary credentials and sends
/// `oauth_callback` instead of `oauth_token`.
#[derive(Clone)]
pub struct Credential {
    /// Consumer key, sent as `oauth_consumer_key`.
    pub consumer_key: String,
    /// Consumer secret, first half of the signing key.
    pub consumer_secret: String,
    /// Token credential issued by the server, if any.
    pub token: Option<TokenCredential>,
}

impl Credential {
    /// Create a new credential without a token.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
        }
    }

    /// Attach a token credential.
    pub fn with_token(mut self, token: TokenCredential) -> Self {
        self.token = Some(token);
        self
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("token", &self.token)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.consumer_key.is_empty() && !self.consumer_secret.is_empty()
    }
}

/// Token credential: an access or request token and its secret.
#[derive(Clone)]
pub struct TokenCredential {
    /// Token, sent as `oauth_token`.
    pub token: String,
    /// Token secret, second half of the signing key.
    pub token_secret: String,
    /// Verifier, sent as `oauth_verifier` when not empty.
    pub verifier: Option<String>,
}

impl TokenCredential {
    /// Create a new token credential.
    pub fn new(token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_secret: token_secret.into(),
            verifier: None,
        }
    }

    /// Set the verifier.
    pub fn with_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.verifier = Some(verifier.into());
        self
    }
}

impl Debug for TokenCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCredential")
            .field("token", &Redact::from(&self.token))
            .field("token_secret", &Redact::from(&self.token_secret))
            .field("verifier", &Redact::from(&self.verifier))
            .finish()
    }
}
