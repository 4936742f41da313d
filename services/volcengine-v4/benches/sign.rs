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

use bytes::Bytes;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use volcsign_core::{Context, SignRequest};
use volcsign_volcengine_v4::{Credential, RequestSigner, DEFAULT_REGION, DEFAULT_SERVICE};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("must success");

    let mut group = c.benchmark_group("volcengine_v4");

    let cred = Credential::new(
        "access_key_id",
        "secret_access_key",
        DEFAULT_SERVICE,
        DEFAULT_REGION,
    )
    .expect("credential must be valid");
    let signer = RequestSigner::new();
    let ctx = Context::new();

    group.bench_function("get", |b| {
        b.to_async(&runtime).iter(|| async {
            let req = http::Request::get("https://127.0.0.1:9000/api/memory/collection/list?Limit=10")
                .body(())
                .expect("request must be valid");

            let (mut parts, _) = req.into_parts();
            signer
                .sign_request(&ctx, &mut parts, &[], Some(&cred))
                .await
                .expect("must success")
        })
    });

    group.bench_function("post_json", |b| {
        let body = Bytes::from_static(br#"{"CollectionName":"vibe_coding","ProjectName":"default"}"#);

        b.to_async(&runtime).iter(|| async {
            let req = http::Request::post("https://127.0.0.1:9000/api/memory/collection/create")
                .header("content-type", "application/json")
                .body(())
                .expect("request must be valid");

            let (mut parts, _) = req.into_parts();
            signer
                .sign_request(&ctx, &mut parts, &body, Some(&cred))
                .await
                .expect("must success")
        })
    });

    group.finish();
}
