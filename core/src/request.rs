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

use std::mem;

use http::header::HeaderName;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;

use crate::Result;

/// Signing context for request.
///
/// Built from `http::request::Parts` and applied back once the signer is
/// done. Between the two calls the request's headers live here, so a
/// signer that bails out with `?` before `apply` must hand them back with
/// [`SigningRequest::restore`].
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Full request uri, including any query.
    pub uri: Uri,
    /// HTTP query parameters, form-urlencoded decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Self {
        SigningRequest {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            query: parts
                .uri
                .query()
                .map(|q| Self::parse_form(q))
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        }
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        self.restore(parts);
        Ok(())
    }

    /// Hand the headers back without applying anything else.
    pub fn restore(&mut self, parts: &mut http::request::Parts) {
        mem::swap(&mut parts.headers, &mut self.headers);
    }

    /// Parse `application/x-www-form-urlencoded` content into pairs.
    ///
    /// Pairs keep their original order and duplicates are preserved.
    pub fn parse_form(content: impl AsRef<[u8]>) -> Vec<(String, String)> {
        form_urlencoded::parse(content.as_ref())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Get the content type of this request.
    ///
    /// Returns `None` if the header is absent or not visible ASCII.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Insert a sensitive header, replacing any previous value.
    pub fn header_insert_sensitive(&mut self, key: HeaderName, value: &str) -> Result<()> {
        let mut value: HeaderValue = value.parse()?;
        value.set_sensitive(true);
        self.headers.insert(key, value);
        Ok(())
    }

    /// Convert sorted params to string.
    ///
    /// Unlike a header list every param keeps its separator, even when the
    /// value is empty.
    ///
    /// ```shell
    /// [(c, ""), (a, b)] => "a=b&c="
    /// ```
    pub fn params_to_string(mut params: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via name first, value next. Ordinal comparison on both.
        params.sort();

        for (idx, (k, v)) in params.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}
