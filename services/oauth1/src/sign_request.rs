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

//! OAuth 1.0 HMAC-SHA1 request signer.

use std::borrow::Cow;
use std::fmt::Write;

use http::header::AUTHORIZATION;
use http::Method;
use http::Uri;
use log::debug;
use percent_encoding::utf8_percent_encode;

use oauthsign_core::hash::base64_hmac_sha1;
use oauthsign_core::time::format_unix_timestamp;
use oauthsign_core::{Context, Error, Result, SignRequest, SigningCredential, SigningRequest};

use crate::config::Config;
use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner that implements [OAuth 1.0 HMAC-SHA1](https://datatracker.ietf.org/doc/html/rfc5849#section-3.4.2).
///
/// Settings are owned by the signer and never change during a call, so every
/// signature is computed against one consistent view of them.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    proxy_prefix: Option<String>,
    redirect_uri: Option<String>,
}

impl RequestSigner {
    /// Create a signer without proxy prefix or redirect uri.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signer from the settings in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            proxy_prefix: config.proxy_prefix.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Strip the first occurrence of `proxy_prefix` from request urls before signing.
    pub fn with_proxy_prefix(mut self, proxy_prefix: impl Into<String>) -> Self {
        self.proxy_prefix = Some(proxy_prefix.into());
        self
    }

    /// Send `redirect_uri` as `oauth_callback` when no token credential is present.
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Compute the `Authorization` header value for this request.
    fn authorization(
        &self,
        ctx: &Context,
        req: &SigningRequest,
        body: &[u8],
        cred: &Credential,
    ) -> Result<String> {
        let url = normalize_url(&req.uri.to_string(), self.proxy_prefix.as_deref())?;

        let mut params = collect_oauth_params(cred, self.redirect_uri.as_deref());
        params.push((OAUTH_SIGNATURE_METHOD, HMAC_SHA1.to_string()));
        params.push((OAUTH_TIMESTAMP, format_unix_timestamp(ctx.now())));
        params.push((OAUTH_NONCE, ctx.nonce()));

        let mut all_params = collect_request_params(req, body);
        all_params.extend(params.iter().map(|(k, v)| (k.to_string(), v.clone())));

        let string_to_sign = base_string(&req.method, &url, all_params);
        let signature = base64_hmac_sha1(signing_key(cred).as_bytes(), string_to_sign.as_bytes());
        params.push((OAUTH_SIGNATURE, signature));

        authorization_header(&params)
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let k = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        if !k.is_valid() {
            return Err(Error::credential_invalid(
                "consumer key and consumer secret must not be empty",
            ));
        }

        let mut req = SigningRequest::build(parts);

        let signed = self
            .authorization(ctx, &req, body, k)
            .and_then(|value| req.header_insert_sensitive(AUTHORIZATION, &value));

        match signed {
            Ok(()) => req.apply(parts),
            Err(err) => {
                req.restore(parts);
                Err(err)
            }
        }
    }
}

/// Percent-encode input per [RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986#section-2.1).
///
/// Every byte except `A-Z a-z 0-9 - . _ ~` is encoded, non-ASCII characters
/// byte by byte in their UTF-8 form.
///
/// ```
/// use oauthsign_oauth1::percent_encode;
///
/// assert_eq!("%21%27%28%29%2A", percent_encode("!'()*"));
/// ```
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, &OAUTH1_ENCODE_SET).to_string()
}

/// Normalize url into the base string uri.
///
/// - Remove the first occurrence of `proxy_prefix` if configured.
/// - Lowercase scheme and host.
/// - Drop `:80` for http and `:443` for https.
/// - Drop query and fragment, and use `/` for an empty path.
///
/// ## Reference
///
/// - [Base String URI](https://datatracker.ietf.org/doc/html/rfc5849#section-3.4.1.2)
pub fn normalize_url(url: &str, proxy_prefix: Option<&str>) -> Result<String> {
    let url = match proxy_prefix {
        Some(prefix) if !prefix.is_empty() => Cow::Owned(url.replacen(prefix, "", 1)),
        _ => Cow::Borrowed(url),
    };

    let uri: Uri = url.parse()?;
    let scheme = uri
        .scheme_str()
        .ok_or_else(|| Error::request_invalid(format!("malformed url {url}: missing scheme")))?
        .to_ascii_lowercase();
    let host = uri
        .host()
        .ok_or_else(|| Error::request_invalid(format!("malformed url {url}: missing host")))?
        .to_ascii_lowercase();

    let authority = match (scheme.as_str(), uri.port_u16()) {
        (_, None) | ("http", Some(80)) | ("https", Some(443)) => host,
        (_, Some(port)) => format!("{host}:{port}"),
    };
    let path = match uri.path() {
        "" => "/",
        v => v,
    };

    Ok(format!("{scheme}://{authority}{path}"))
}

/// Construct the signature base string.
///
/// ## Format
///
/// ```text
/// UPPERCASE(METHOD) + "&" +
/// encode(normalized url) + "&" +
/// encode(sorted "name=value" pairs joined with "&")
/// ```
///
/// Names and values are encoded before sorting, and sorting compares the
/// encoded bytes.
///
/// ## Reference
///
/// - [Signature Base String](https://datatracker.ietf.org/doc/html/rfc5849#section-3.4.1)
pub fn base_string(
    method: &Method,
    normalized_url: &str,
    params: impl IntoIterator<Item = (String, String)>,
) -> String {
    let params = params
        .into_iter()
        .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
        .collect();
    let params = SigningRequest::params_to_string(params, "=", "&");

    let mut s = String::new();
    s.push_str(&method.as_str().to_ascii_uppercase());
    s.push('&');
    s.push_str(&percent_encode(normalized_url));
    s.push('&');
    s.push_str(&percent_encode(&params));

    debug!("string to sign: {}", &s);
    s
}

/// Protocol parameters derived from the credential.
///
/// Signature method, timestamp, nonce and signature are added by the signer.
fn collect_oauth_params(
    cred: &Credential,
    redirect_uri: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        (OAUTH_CONSUMER_KEY, cred.consumer_key.clone()),
        (OAUTH_VERSION, VERSION_1_0.to_string()),
    ];

    match &cred.token {
        Some(token) => {
            params.push((OAUTH_TOKEN, token.token.clone()));
            if let Some(verifier) = token.verifier.as_deref().filter(|v| !v.is_empty()) {
                params.push((OAUTH_VERIFIER, verifier.to_string()));
            }
        }
        None => {
            if let Some(redirect_uri) = redirect_uri {
                params.push((OAUTH_CALLBACK, redirect_uri.to_string()));
            }
        }
    }

    params
}

/// Query parameters, plus body fields for form-urlencoded requests.
fn collect_request_params(req: &SigningRequest, body: &[u8]) -> Vec<(String, String)> {
    let mut params = req.query.clone();

    match req.content_type() {
        Some(FORM_URLENCODED) => params.extend(SigningRequest::parse_form(body)),
        content_type => {
            debug!("body is not signed for content type {content_type:?}");
        }
    }

    params
}

/// `encode(consumer_secret) & encode(token_secret)`
///
/// Token secret is empty when no token credential is present.
fn signing_key(cred: &Credential) -> String {
    let token_secret = cred
        .token
        .as_ref()
        .map(|t| t.token_secret.as_str())
        .unwrap_or_default();

    format!(
        "{}&{}",
        percent_encode(&cred.consumer_secret),
        percent_encode(token_secret)
    )
}

/// `OAuth k1="v1", k2="v2"` in parameter insertion order.
fn authorization_header(params: &[(&'static str, String)]) -> Result<String> {
    let mut s = String::from("OAuth ");
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push_str(", ");
        }
        write!(s, "{k}=\"{}\"", percent_encode(v))?;
    }

    Ok(s)
}
