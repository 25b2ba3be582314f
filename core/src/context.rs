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

use crate::hash::hex_encode;
use crate::time::{self, DateTime};
use rand::RngCore;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the ambient collaborators for request signing.
///
/// Everything a signer would otherwise read from the process (environment
/// variables, the wall clock, the random source used for nonces) is reached
/// through this value, so tests can swap any of them out.
///
/// ## Defaults
///
/// - env: [`NoopEnv`], no variables are visible until an env is configured.
/// - clock: [`SystemClock`].
/// - nonce: [`RandomNonce`].
///
/// ## Example
///
/// ```
/// use oauthsign_core::{Context, OsEnv, StaticClock, StaticNonce};
/// use oauthsign_core::time::from_unix_timestamp;
///
/// let ctx = Context::new()
///     .with_env(OsEnv)
///     .with_clock(StaticClock::new(from_unix_timestamp(1_000_000_000).unwrap()))
///     .with_nonce(StaticNonce::new("abc123"));
/// assert_eq!("abc123", ctx.nonce());
/// ```
#[derive(Clone)]
pub struct Context {
    env: Arc<dyn Env>,
    clock: Arc<dyn Clock>,
    nonce: Arc<dyn GenerateNonce>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("env", &self.env)
            .field("clock", &self.clock)
            .field("nonce", &self.nonce)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with default implementations.
    pub fn new() -> Self {
        Self {
            env: Arc::new(NoopEnv),
            clock: Arc::new(SystemClock),
            nonce: Arc::new(RandomNonce::default()),
        }
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the clock implementation.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the nonce generator implementation.
    pub fn with_nonce(mut self, nonce: impl GenerateNonce) -> Self {
        self.nonce = Arc::new(nonce);
        self
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables visible to this context.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }

    /// Current time as seen by the configured clock.
    #[inline]
    pub fn now(&self) -> DateTime {
        self.clock.now()
    }

    /// A fresh nonce from the configured generator.
    #[inline]
    pub fn nonce(&self) -> String {
        self.nonce.generate_nonce()
    }
}

/// Env gives access to environment variables.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns an hashmap of (variable, value) pairs of strings.
    fn vars(&self) -> HashMap<String, String>;
}

/// Implements Env for the OS process.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}

/// NoopEnv is a no-op implementation that always returns None/empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }

    fn vars(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Clock returns the time used for signing timestamps.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Current time.
    fn now(&self) -> DateTime;
}

/// SystemClock reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        time::now()
    }
}

/// StaticClock always returns the same instant.
///
/// # Note
///
/// Signatures must always take the current time. Only use this for testing.
#[derive(Debug, Clone, Copy)]
pub struct StaticClock(DateTime);

impl StaticClock {
    /// Create a clock frozen at `time`.
    pub fn new(time: DateTime) -> Self {
        Self(time)
    }
}

impl Clock for StaticClock {
    fn now(&self) -> DateTime {
        self.0
    }
}

/// GenerateNonce produces single-use values that prevent signature replay.
pub trait GenerateNonce: Debug + Send + Sync + 'static {
    /// Generate a new nonce. Every call must return a fresh value.
    fn generate_nonce(&self) -> String;
}

/// RandomNonce hex-encodes random bytes from a cryptographically secure rng.
#[derive(Debug, Clone, Copy)]
pub struct RandomNonce {
    len: usize,
}

impl RandomNonce {
    /// Create a generator producing `len` random bytes per nonce.
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Default for RandomNonce {
    /// 16 random bytes, 32 hex characters.
    fn default() -> Self {
        Self::new(16)
    }
}

impl GenerateNonce for RandomNonce {
    fn generate_nonce(&self) -> String {
        let mut bs = vec![0u8; self.len];
        rand::thread_rng().fill_bytes(&mut bs);
        hex_encode(&bs)
    }
}

/// StaticNonce always returns the same nonce.
///
/// # Note
///
/// A repeated nonce lets a server reject the request as a replay. Only use
/// this for testing.
#[derive(Debug, Clone)]
pub struct StaticNonce(String);

impl StaticNonce {
    /// Create a generator that always yields `nonce`.
    pub fn new(nonce: impl Into<String>) -> Self {
        Self(nonce.into())
    }
}

impl GenerateNonce for StaticNonce {
    fn generate_nonce(&self) -> String {
        self.0.clone()
    }
}
