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

use std::time::{Duration, Instant};

use anyhow::Result;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use tokio::net::TcpListener;
use volcsign_core::time::parse_iso8601;
use volcsign_core::{Context, ErrorKind, SignRequest, TransportKind};
use volcsign_volcengine_v4::{RequestSigner, StaticCredentialProvider};

use super::{local_signer, respond_once};

const CREATE_COLLECTION: &[u8] = br#"{"CollectionName":"vibe_coding","ProjectName":"default"}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResponseMetadata {
    request_id: String,
    error: Option<ResponseError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResponseError {
    code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Response {
    response_metadata: ResponseMetadata,
}

fn create_collection(base: &str) -> Request<Bytes> {
    Request::post(format!("{base}/api/memory/collection/create"))
        .header("content-type", "application/json")
        .body(Bytes::from_static(CREATE_COLLECTION))
        .expect("request must be valid")
}

#[tokio::test]
async fn test_send_reaches_server_signed() -> Result<()> {
    let (base, received) =
        respond_once("200 OK", r#"{"ResponseMetadata":{"RequestId":"req-1"}}"#).await;

    let signer = local_signer(StaticCredentialProvider::new("AKLTexample", "secret_key"));
    let resp = signer.send(create_collection(&base)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let parsed: Response = serde_json::from_slice(resp.body())?;
    assert_eq!(parsed.response_metadata.request_id, "req-1");

    let received = received.await?;
    assert_eq!(received.body, CREATE_COLLECTION);
    assert_eq!(
        received.header("x-content-sha256"),
        Some("3d93bbc89995a6855eae252514fcd840be27f02a528b213e1914c7f5e67cd5a4")
    );

    // Signing the same request at the time the server saw must reproduce the
    // header it received.
    let x_date = received.header("x-date").expect("x-date must be sent");
    let cred = volcsign_volcengine_v4::Credential::new(
        "AKLTexample",
        "secret_key",
        volcsign_volcengine_v4::DEFAULT_SERVICE,
        volcsign_volcengine_v4::DEFAULT_REGION,
    )?;
    let (mut parts, body) = create_collection(&base).into_parts();
    RequestSigner::new()
        .with_time(parse_iso8601(x_date)?)
        .sign_request(&Context::new(), &mut parts, &body, Some(&cred))
        .await?;

    let expected = parts.headers[AUTHORIZATION].to_str()?;
    assert_eq!(received.header("authorization"), Some(expected));
    assert!(expected.starts_with("HMAC-SHA256 Credential=AKLTexample/"));
    Ok(())
}

#[tokio::test]
async fn test_error_status_returned_verbatim() -> Result<()> {
    let (base, _received) = respond_once(
        "403 Forbidden",
        r#"{"ResponseMetadata":{"RequestId":"req-2","Error":{"Code":"SignatureDoesNotMatch"}}}"#,
    )
    .await;

    let signer = local_signer(StaticCredentialProvider::new("AKLTexample", "secret_key"));
    let resp = signer.send(create_collection(&base)).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let parsed: Response = serde_json::from_slice(resp.body())?;
    let error = parsed
        .response_metadata
        .error
        .expect("error must be returned");
    assert_eq!(error.code, "SignatureDoesNotMatch");
    Ok(())
}

#[tokio::test]
async fn test_empty_secret_key_never_connects() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);

    let signer = local_signer(StaticCredentialProvider::new("AKLTexample", ""));
    let err = signer.send(create_collection(&base)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(!err.is_retryable());

    let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(accepted.is_err(), "no connection must be attempted");
    Ok(())
}

#[tokio::test]
async fn test_hung_server_times_out() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let ctx = Context::new().with_http_send(
        volcsign_http_send_reqwest::ReqwestHttpSend::default()
            .with_timeout(Duration::from_millis(200)),
    );
    let signer = volcsign_core::Signer::new(
        ctx,
        StaticCredentialProvider::new("AKLTexample", "secret_key"),
        RequestSigner::new(),
    );

    let start = Instant::now();
    let err = signer.send(create_collection(&base)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport(TransportKind::Timeout));
    assert!(err.is_retryable());
    assert!(start.elapsed() < Duration::from_secs(1));
    Ok(())
}
