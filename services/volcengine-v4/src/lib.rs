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

//! Volcengine V4 signing implementation for volcsign.
//!
//! Signs requests to Volcengine OpenAPI services such as the knowledge base
//! and memory APIs with the `HMAC-SHA256` scheme.
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use volcsign_core::{Context, OsEnv, Result, Signer};
//! use volcsign_http_send_reqwest::ReqwestHttpSend;
//! use volcsign_volcengine_v4::{DefaultCredentialProvider, RequestSigner, KNOWLEDGE_BASE_ENDPOINT};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::default(), RequestSigner::new());
//!
//! let req = http::Request::post(format!(
//!     "https://{KNOWLEDGE_BASE_ENDPOINT}/api/memory/collection/create"
//! ))
//! .header("content-type", "application/json")
//! .body(Bytes::from_static(br#"{"CollectionName":"vibe_coding"}"#))?;
//!
//! let resp = signer.send(req).await?;
//! println!("status: {}", resp.status());
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{
    ALGORITHM, DEFAULT_REGION, DEFAULT_SERVICE, KNOWLEDGE_BASE_ENDPOINT, SECRET_KEY_PREFIX,
    TERMINAL_LITERAL, VOLC_ACCESSKEY, VOLC_REGION, VOLC_SECRETKEY, VOLC_SERVICE,
    VOLC_SESSION_TOKEN,
};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::RequestSigner;
