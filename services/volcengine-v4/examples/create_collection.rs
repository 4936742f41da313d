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

//! Create the `vibe_coding` memory collection.
//!
//! Credentials are read from `VOLC_ACCESSKEY` and `VOLC_SECRETKEY`, a `.env`
//! file is honored. Run with:
//!
//! ```shell
//! RUST_LOG=debug cargo run --example create_collection
//! ```

use anyhow::Result;
use bytes::Bytes;
use serde_json::json;
use volcsign_core::{Context, OsEnv, Signer};
use volcsign_http_send_reqwest::ReqwestHttpSend;
use volcsign_volcengine_v4::{DefaultCredentialProvider, RequestSigner, KNOWLEDGE_BASE_ENDPOINT};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    env_logger::init();

    let event_schema = json!({
        "EventType": "sys_event_vibe_coding_v1",
        "Version": "1",
        "Description": "Summarize the technical context of a coding session: decisions, bugs and their fixes.",
        "Properties": [{
            "PropertyName": "summary",
            "PropertyValueType": "string",
            "Description": "A narrative of the complete implementation or debugging process.",
        }],
    });
    let profile_schema = json!({
        "ProfileType": "sys_profile_vibe_coding_v1",
        "Version": "1",
        "Description": "Developer profile, recorded in the language the user writes in.",
        "Role": "user",
        "Properties": [{
            "PropertyName": "user_profile",
            "PropertyValueType": "string",
            "Description": "Background, preferred stacks, coding habits and collaboration style.",
        }],
    });
    let payload = json!({
        "Description": "vibe_coding",
        "ProjectName": "default",
        "CollectionName": "vibe_coding",
        "CustomEventTypeSchemas": [event_schema],
        "CustomProfileTypeSchemas": [profile_schema],
    });

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let signer = Signer::new(ctx, DefaultCredentialProvider::default(), RequestSigner::new());

    let req = http::Request::post(format!(
        "https://{KNOWLEDGE_BASE_ENDPOINT}/api/memory/collection/create"
    ))
    .header("content-type", "application/json")
    .body(Bytes::from(serde_json::to_vec(&payload)?))?;

    let resp = signer.send(req).await?;
    println!("status: {}", resp.status());

    match serde_json::from_slice::<serde_json::Value>(resp.body()) {
        Ok(v) => println!("{}", serde_json::to_string_pretty(&v)?),
        Err(_) => println!("{}", String::from_utf8_lossy(resp.body())),
    }
    Ok(())
}
