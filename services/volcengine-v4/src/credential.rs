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

use volcsign_core::utils::Redact;
use volcsign_core::{Error, Result, SigningCredential};

/// Credential holds the long-term key pair and the scope it signs for.
///
/// It cannot be changed once built; share it by reference or clone it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_key_id: String,
    secret_access_key: String,
    service: String,
    region: String,
    session_token: Option<String>,
}

impl Credential {
    /// Build a credential scoped to `service` in `region`.
    ///
    /// Fails with a config error if any part is empty.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        service: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self> {
        let cred = Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            service: service.into(),
            region: region.into(),
            session_token: None,
        };

        for (name, value) in [
            ("access key id", &cred.access_key_id),
            ("secret access key", &cred.secret_access_key),
            ("service", &cred.service),
            ("region", &cred.region),
        ] {
            if value.is_empty() {
                return Err(Error::config_invalid(format!("{name} is empty")));
            }
        }

        Ok(cred)
    }

    /// Return this credential carrying a temporary session token.
    ///
    /// An empty token is ignored.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.session_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Access key id.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Secret access key.
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Service name of the credential scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region of the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Session token of temporary credentials.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("service", &self.service)
            .field("region", &self.region)
            .field("session_token", &Redact::from(&self.session_token))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}
