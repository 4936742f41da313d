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

use std::fmt::Write;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use http::request::Parts;
use http::{HeaderValue, Method};
use log::debug;
use percent_encoding::utf8_percent_encode;
use volcsign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256, EMPTY_STRING_SHA256};
use volcsign_core::time::{format_date, format_iso8601, now, DateTime};
use volcsign_core::{Context, Error, Result, SignRequest, SigningCredential, SigningRequest};

use crate::constants::*;
use crate::Credential;

/// RequestSigner that implements Volcengine V4 signing.
///
/// - [Volcengine signature mechanism](https://www.volcengine.com/docs/6369/67269)
///
/// The service and region of the credential scope come from the [`Credential`].
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new Volcengine V4 request signer.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::config_invalid("no credential available for signing"));
        };
        if !cred.is_valid() {
            return Err(Error::config_invalid("credential has an empty key"));
        }

        let now = self.time.unwrap_or_else(now);
        let mut signed_req = SigningRequest::build(req)?;

        // canonicalize context
        canonicalize_header(&mut signed_req, cred, body, now)?;
        canonicalize_query(&mut signed_req);

        // build canonical request and string to sign.
        let creq = canonical_request_string(&signed_req)?;
        debug!("calculated canonical request: {creq}");

        // Scope: "20240102/<region>/<service>/request"
        let scope = format!(
            "{}/{}/{}/{TERMINAL_LITERAL}",
            format_date(now),
            cred.region(),
            cred.service()
        );
        debug!("calculated scope: {scope}");

        let string_to_sign = string_to_sign(now, &scope, &hex_sha256(creq.as_bytes()))?;
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            cred.secret_access_key(),
            now,
            cred.region(),
            cred.service(),
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
            cred.access_key_id(),
            signed_header_names(&signed_req).join(";"),
        ))?;
        authorization.set_sensitive(true);
        signed_req.headers.insert(AUTHORIZATION, authorization);

        // Apply to the request.
        signed_req.apply(req)
    }
}

/// Names of the headers covered by the signature, sorted.
///
/// `content-type`, `content-md5`, `host` and every `x-*` header are signed.
fn signed_header_names(ctx: &SigningRequest) -> Vec<&str> {
    let mut names: Vec<&str> = ctx
        .headers
        .keys()
        .map(|k| k.as_str())
        .filter(|k| {
            matches!(*k, "content-type" | CONTENT_MD5 | "host") || k.starts_with("x-")
        })
        .collect();
    names.sort_unstable();
    names
}

fn canonical_request_string(ctx: &SigningRequest) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", ctx.method.as_str().to_ascii_uppercase())?;
    // Insert encoded path
    let path = ctx.path_percent_decoded()?;
    if path.is_empty() {
        writeln!(f, "/")?;
    } else {
        writeln!(f, "{}", utf8_percent_encode(&path, &URI_ENCODE_SET))?;
    }
    // Insert query
    writeln!(
        f,
        "{}",
        ctx.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    )?;
    // Insert signed headers
    let signed_headers = signed_header_names(ctx);
    for header in signed_headers.iter() {
        let values = ctx
            .headers
            .get_all(*header)
            .iter()
            .map(|v| {
                v.to_str().map_err(|e| {
                    Error::encoding(format!("header {header} is not visible ascii"))
                        .with_source(e)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        writeln!(f, "{header}:{}", values.join(","))?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;

    // The payload hash is always present: canonicalize_header inserts it.
    match ctx.headers.get(X_CONTENT_SHA256) {
        Some(v) => write!(f, "{}", v.to_str()?)?,
        None => write!(f, "{EMPTY_STRING_SHA256}")?,
    }

    Ok(f)
}

fn canonicalize_header(
    ctx: &mut SigningRequest,
    cred: &Credential,
    body: &[u8],
    now: DateTime,
) -> Result<()> {
    for (_, value) in ctx.headers.iter_mut() {
        SigningRequest::header_value_normalize(value)
    }

    // Insert HOST header if not present. A default port is dropped either way.
    let host = match ctx.headers.get(HOST) {
        Some(v) => strip_default_port(v.to_str()?).to_string(),
        None => ctx.host_without_default_port().to_string(),
    };
    ctx.headers.insert(HOST, HeaderValue::from_str(&host)?);

    if ctx.method != Method::GET && ctx.headers.get(CONTENT_TYPE).is_none() {
        ctx.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    }

    ctx.headers
        .insert(X_DATE, HeaderValue::try_from(format_iso8601(now))?);
    ctx.headers
        .insert(X_CONTENT_SHA256, HeaderValue::try_from(hex_sha256(body))?);

    // Insert X_SECURITY_TOKEN header if security token exists.
    if let Some(token) = cred.session_token() {
        let mut value = HeaderValue::from_str(token)?;
        // Set token value sensitive to avoid leaking.
        value.set_sensitive(true);

        ctx.headers.insert(X_SECURITY_TOKEN, value);
    }

    Ok(())
}

fn strip_default_port(host: &str) -> &str {
    host.strip_suffix(":80")
        .or_else(|| host.strip_suffix(":443"))
        .unwrap_or(host)
}

/// Sort the query by decoded key then value and percent encode both sides.
///
/// The encoded pairs are written back into the request as-is.
fn canonicalize_query(ctx: &mut SigningRequest) {
    if ctx.query.is_empty() {
        return;
    }

    ctx.query.sort();

    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
}

// StringToSign:
//
// HMAC-SHA256
// 20240102T030405Z
// 20240102/<region>/<service>/request
// <hashed_canonical_request>
fn string_to_sign(now: DateTime, scope: &str, hashed_creq: &str) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "{ALGORITHM}")?;
    writeln!(f, "{}", format_iso8601(now))?;
    writeln!(f, "{scope}")?;
    write!(f, "{hashed_creq}")?;
    Ok(f)
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("{SECRET_KEY_PREFIX}{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), TERMINAL_LITERAL.as_bytes())
}
