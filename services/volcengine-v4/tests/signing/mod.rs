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

mod live;
mod local;

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use volcsign_core::{Context, Signer};
use volcsign_http_send_reqwest::ReqwestHttpSend;
use volcsign_volcengine_v4::{Credential, RequestSigner, StaticCredentialProvider};

/// A request as seen by the server.
#[derive(Debug)]
pub struct Received {
    pub head: String,
    pub body: Vec<u8>,
}

impl Received {
    /// Value of header `name` as sent on the wire.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().find_map(|line| {
            let (k, v) = line.split_once(':')?;
            (k.eq_ignore_ascii_case(name)).then(|| v.trim())
        })
    }
}

/// Read one request from `stream`, using `content-length` to find the body.
async fn read_request(stream: &mut TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await.expect("read must succeed");
        assert!(n > 0, "connection closed before the request head");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut received = Received {
        head,
        body: buf[head_end..].to_vec(),
    };
    let length: usize = received
        .header("content-length")
        .map(|v| v.parse().expect("content-length must be a number"))
        .unwrap_or(0);

    while received.body.len() < length {
        let n = stream.read(&mut chunk).await.expect("read must succeed");
        assert!(n > 0, "connection closed before the request body");
        received.body.extend_from_slice(&chunk[..n]);
    }
    received
}

/// Serve one request with `status` and a JSON `body`, reporting what was received.
pub async fn respond_once(
    status: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind must succeed");
    let addr = listener.local_addr().expect("local addr must exist");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept must succeed");
        let received = read_request(&mut stream).await;

        let resp = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(resp.as_bytes())
            .await
            .expect("write must succeed");
        let _ = tx.send(received);
    });

    (format!("http://{addr}"), rx)
}

/// Signer sending to the local servers with a short deadline.
pub fn local_signer(provider: StaticCredentialProvider) -> Signer<Credential> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default().with_timeout(Duration::from_secs(5)));
    Signer::new(ctx, provider, RequestSigner::new())
}
