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

use crate::constants::*;
use oauthsign_core::{utils::Redact, Context};

/// Config carries all the configuration for OAuth 1.0 signing.
///
/// Credential fields feed [`crate::ConfigCredentialProvider`], while
/// `proxy_prefix` and `redirect_uri` are signer settings read by
/// [`crate::RequestSigner::from_config`].
#[derive(Clone, Default)]
pub struct Config {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH1_CONSUMER_KEY`]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH1_CONSUMER_SECRET`]
    pub consumer_secret: Option<String>,
    /// `token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH1_TOKEN`]
    pub token: Option<String>,
    /// `token_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH1_TOKEN_SECRET`]
    pub token_secret: Option<String>,
    /// `verifier` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH1_VERIFIER`]
    pub verifier: Option<String>,
    /// `proxy_prefix` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH1_PROXY_PREFIX`]
    ///
    /// The first occurrence of this string is removed from request urls
    /// before they are signed.
    pub proxy_prefix: Option<String>,
    /// `redirect_uri` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH1_REDIRECT_URI`]
    ///
    /// Sent as `oauth_callback` while no token credential is present.
    pub redirect_uri: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set consumer_key
    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = Some(consumer_key.into());
        self
    }

    /// Set consumer_secret
    pub fn with_consumer_secret(mut self, consumer_secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(consumer_secret.into());
        self
    }

    /// Set token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set token_secret
    pub fn with_token_secret(mut self, token_secret: impl Into<String>) -> Self {
        self.token_secret = Some(token_secret.into());
        self
    }

    /// Set verifier
    pub fn with_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.verifier = Some(verifier.into());
        self
    }

    /// Set proxy_prefix
    pub fn with_proxy_prefix(mut self, proxy_prefix: impl Into<String>) -> Self {
        self.proxy_prefix = Some(proxy_prefix.into());
        self
    }

    /// Set redirect_uri
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set win over env values.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(OAUTH1_CONSUMER_KEY) {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH1_CONSUMER_SECRET) {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH1_TOKEN) {
            self.token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH1_TOKEN_SECRET) {
            self.token_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH1_VERIFIER) {
            self.verifier.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH1_PROXY_PREFIX) {
            self.proxy_prefix.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH1_REDIRECT_URI) {
            self.redirect_uri.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("token", &self.token.as_ref().map(Redact::from))
            .field("token_secret", &Redact::from(&self.token_secret))
            .field("verifier", &self.verifier.as_ref().map(Redact::from))
            .field("proxy_prefix", &self.proxy_prefix)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}
