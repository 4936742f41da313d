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

use log::debug;
use volcsign_core::utils::Redact;
use volcsign_core::{Context, Result};

use crate::constants::*;
use crate::Credential;

/// Config carries all the configuration for Volcengine services.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VOLC_ACCESSKEY`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VOLC_SECRETKEY`]
    pub secret_access_key: Option<String>,
    /// `session_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VOLC_SESSION_TOKEN`]
    pub session_token: Option<String>,
    /// `region` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VOLC_REGION`]
    /// - default to [`DEFAULT_REGION`]
    pub region: Option<String>,
    /// `service` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VOLC_SERVICE`]
    /// - default to [`DEFAULT_SERVICE`]
    pub service: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    pub fn from_env(ctx: &Context) -> Self {
        Self::default().fill_from_env(ctx)
    }

    /// Fill the fields that are still unset from environment variables.
    ///
    /// Values already set are kept.
    pub fn fill_from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        for (field, key) in [
            (&mut self.access_key_id, VOLC_ACCESSKEY),
            (&mut self.secret_access_key, VOLC_SECRETKEY),
            (&mut self.session_token, VOLC_SESSION_TOKEN),
            (&mut self.region, VOLC_REGION),
            (&mut self.service, VOLC_SERVICE),
        ] {
            if field.is_none() {
                *field = envs.get(key).cloned();
            }
        }

        self
    }

    /// Set the access key id.
    pub fn with_access_key_id(mut self, v: impl Into<String>) -> Self {
        self.access_key_id = Some(v.into());
        self
    }

    /// Set the secret access key.
    pub fn with_secret_access_key(mut self, v: impl Into<String>) -> Self {
        self.secret_access_key = Some(v.into());
        self
    }

    /// Set the session token.
    pub fn with_session_token(mut self, v: impl Into<String>) -> Self {
        self.session_token = Some(v.into());
        self
    }

    /// Set the region.
    pub fn with_region(mut self, v: impl Into<String>) -> Self {
        self.region = Some(v.into());
        self
    }

    /// Set the service.
    pub fn with_service(mut self, v: impl Into<String>) -> Self {
        self.service = Some(v.into());
        self
    }

    /// Build a credential out of this config.
    ///
    /// Returns `None` unless both keys are set. Keys that are set but empty
    /// are reported as a config error by [`Credential::new`].
    pub fn to_credential(&self) -> Result<Option<Credential>> {
        let (Some(ak), Some(sk)) = (&self.access_key_id, &self.secret_access_key) else {
            debug!("config has no complete key pair, skipping");
            return Ok(None);
        };

        let cred = Credential::new(
            ak.as_str(),
            sk.as_str(),
            self.service.as_deref().unwrap_or(DEFAULT_SERVICE),
            self.region.as_deref().unwrap_or(DEFAULT_REGION),
        )?;

        Ok(Some(match &self.session_token {
            Some(token) => cred.with_session_token(token.as_str()),
            None => cred,
        }))
    }
}
