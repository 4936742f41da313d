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

use std::env;
use anyhow::Result;
use bytes::Bytes;
use http::{Request, StatusCode};
use log::{debug, warn};
use volcsign_core::{Context, OsEnv, Signer};
use volcsign_http_send_reqwest::ReqwestHttpSend;
use volcsign_volcengine_v4::{
    Config, Credential, DefaultCredentialProvider, RequestSigner, KNOWLEDGE_BASE_ENDPOINT,
};

/// Build a signer against the live service, or `None` when live tests are off.
fn init_live_signer() -> Option<Signer<Credential>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("VOLCSIGN_VOLCENGINE_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::from_env(&ctx);

    Some(Signer::new(
        ctx,
        DefaultCredentialProvider::new(config),
        RequestSigner::new(),
    ))
}

#[tokio::test]
async fn test_live_signature_accepted() -> Result<()> {
    let Some(signer) = init_live_signer() else {
        warn!("VOLCSIGN_VOLCENGINE_TEST is not set, skipped");
        return Ok(());
    };

    let endpoint =
        env::var("VOLCSIGN_VOLCENGINE_ENDPOINT").unwrap_or_else(|_| KNOWLEDGE_BASE_ENDPOINT.into());
    let req = Request::post(format!("https://{endpoint}/api/memory/event/search"))
        .header("content-type", "application/json")
        .body(Bytes::from(serde_json::to_vec(&serde_json::json!({
            "collection_name": "vibe_coding",
            "query": "volcsign live test",
            "limit": 1,
        }))?))?;

    let resp = signer.send(req).await?;
    debug!(
        "live response: {} {}",
        resp.status(),
        String::from_utf8_lossy(resp.body())
    );

    // Business errors are fine here, signature errors are not.
    assert_ne!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_ne!(resp.status(), StatusCode::FORBIDDEN);
    Ok(())
}
