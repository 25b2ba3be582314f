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

//! OAuth 1.0 HMAC-SHA1 signing.
//!
//! This crate signs outgoing requests with the `HMAC-SHA1` method of
//! [RFC 5849](https://datatracker.ietf.org/doc/html/rfc5849) and writes the
//! result into the `Authorization` header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oauthsign_core::{Context, OsEnv, Result, Signer};
//! use oauthsign_oauth1::{DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//!
//! // Reads OAUTH1_CONSUMER_KEY / OAUTH1_CONSUMER_SECRET (and optional token vars).
//! let loader = DefaultCredentialProvider::new();
//! let builder = RequestSigner::new().with_redirect_uri("https://client.example.com/callback");
//! let signer = Signer::new(ctx, loader, builder);
//!
//! let (mut parts, body) = http::Request::post("https://api.example.com/oauth/request_token")
//!     .header("content-type", "application/x-www-form-urlencoded")
//!     .body("scope=read".to_string())
//!     .unwrap()
//!     .into_parts();
//!
//! signer.sign(&mut parts, body.as_bytes()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! - [`StaticCredentialProvider`]: fixed consumer and token credentials
//! - [`EnvCredentialProvider`]: `OAUTH1_*` environment variables
//! - [`ConfigCredentialProvider`]: a [`Config`], completed from env
//! - [`DefaultCredentialProvider`]: a chain starting with env

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::{Credential, TokenCredential};

mod sign_request;
pub use sign_request::{base_string, normalize_url, percent_encode, RequestSigner};

mod provide_credential;
pub use provide_credential::*;
