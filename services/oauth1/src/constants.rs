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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Protocol parameters used in OAuth 1.0.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_VERSION: &str = "oauth_version";
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_VERIFIER: &str = "oauth_verifier";
pub const OAUTH_CALLBACK: &str = "oauth_callback";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";

pub const VERSION_1_0: &str = "1.0";
pub const HMAC_SHA1: &str = "HMAC-SHA1";

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

// Env values used in OAuth 1.0.
pub const OAUTH1_CONSUMER_KEY: &str = "OAUTH1_CONSUMER_KEY";
pub const OAUTH1_CONSUMER_SECRET: &str = "OAUTH1_CONSUMER_SECRET";
pub const OAUTH1_TOKEN: &str = "OAUTH1_TOKEN";
pub const OAUTH1_TOKEN_SECRET: &str = "OAUTH1_TOKEN_SECRET";
pub const OAUTH1_VERIFIER: &str = "OAUTH1_VERIFIER";
pub const OAUTH1_PROXY_PREFIX: &str = "OAUTH1_PROXY_PREFIX";
pub const OAUTH1_REDIRECT_URI: &str = "OAUTH1_REDIRECT_URI";

/// AsciiSet for [RFC 3986 percent-encoding](https://datatracker.ietf.org/doc/html/rfc5849#section-3.6)
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static OAUTH1_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
