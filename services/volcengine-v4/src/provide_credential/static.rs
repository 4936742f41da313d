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

use async_trait::async_trait;
use volcsign_core::{Context, ProvideCredential, Result};

use crate::constants::{DEFAULT_REGION, DEFAULT_SERVICE};
use crate::Credential;

/// StaticCredentialProvider provides a fixed Volcengine credential.
///
/// Use it when the key pair is already at hand and needs no loading.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
    service: String,
    region: String,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider scoped to the default service and region.
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: None,
            service: DEFAULT_SERVICE.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }

    /// Set the session token.
    pub fn with_session_token(mut self, token: &str) -> Self {
        self.session_token = Some(token.to_string());
        self
    }

    /// Set the service of the credential scope.
    pub fn with_service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    /// Set the region of the credential scope.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let cred = Credential::new(
            self.access_key_id.as_str(),
            self.secret_access_key.as_str(),
            self.service.as_str(),
            self.region.as_str(),
        )?;

        Ok(Some(match &self.session_token {
            Some(token) => cred.with_session_token(token.as_str()),
            None => cred,
        }))
    }
}
