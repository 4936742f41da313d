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

use std::borrow::Cow;
use std::mem;
use std::str::FromStr;

use bytes::Bytes;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// HTTP query parameters, in the order they will be written back.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Query pairs are written verbatim, so they must already be percent encoded.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let mut paq = if self.path.is_empty() {
                    "/".to_string()
                } else {
                    self.path
                };

                for (i, (k, v)) in self.query.iter().enumerate() {
                    paq.push(if i == 0 { '?' } else { '&' });
                    paq.push_str(k);
                    paq.push('=');
                    paq.push_str(v);
                }

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get the path percent decoded.
    ///
    /// Returns an encoding error if the decoded bytes are not valid utf-8.
    pub fn path_percent_decoded(&self) -> Result<Cow<'_, str>> {
        percent_encoding::percent_decode_str(&self.path)
            .decode_utf8()
            .map_err(|e| Error::encoding("request path is not valid utf-8").with_source(e))
    }

    /// Get the authority without a default port for its scheme.
    ///
    /// `example.com:443` and `example.com:80` both become `example.com`.
    pub fn host_without_default_port(&self) -> &str {
        match self.authority.port_u16() {
            Some(80) | Some(443) => self.authority.host(),
            _ => self.authority.as_str(),
        }
    }

    /// Normalize header value by trimming surrounding spaces and tabs.
    pub fn header_value_normalize(v: &mut HeaderValue) {
        let bs = v.as_bytes();
        let is_ows = |b: &u8| matches!(*b, b' ' | b'\t');

        let starting_index = bs.iter().position(|b| !is_ows(b)).unwrap_or(bs.len());
        let ending_offset = bs.iter().rev().position(|b| !is_ows(b)).unwrap_or(0);
        let ending_index = (bs.len() - ending_offset).max(starting_index);

        if starting_index == 0 && ending_index == bs.len() {
            return;
        }

        let sensitive = v.is_sensitive();
        // Trimming whitespace from a valid header value always leaves a valid one.
        if let Ok(mut trimmed) = HeaderValue::from_bytes(&bs[starting_index..ending_index]) {
            trimmed.set_sensitive(sensitive);
            *v = trimmed;
        }
    }
}

/// SignedRequest is a request that carries a valid signature.
///
/// It can only be read, dispatched or consumed whole: changing any of its
/// signed parts would invalidate the signature.
#[derive(Debug)]
pub struct SignedRequest {
    inner: http::Request<Bytes>,
}

impl SignedRequest {
    pub(crate) fn new(inner: http::Request<Bytes>) -> Self {
        Self { inner }
    }

    /// HTTP method of the request.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Full URI of the request.
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// Headers of the request, including the signature headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Body of the request.
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Consume the signed request and return the plain http request.
    pub fn into_inner(self) -> http::Request<Bytes> {
        self.inner
    }
}

impl From<SignedRequest> for http::Request<Bytes> {
    fn from(req: SignedRequest) -> Self {
        req.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri).body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_build_and_apply() -> Result<()> {
        let mut p = parts("https://example.com/a%20b//c?z=1&a=2");
        let req = SigningRequest::build(&mut p)?;

        assert_eq!(req.scheme, Scheme::HTTPS);
        assert_eq!(req.authority.as_str(), "example.com");
        assert_eq!(req.path, "/a%20b//c");
        assert_eq!(
            req.query,
            vec![
                ("z".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string())
            ]
        );
        assert_eq!(req.path_percent_decoded()?, "/a b//c");

        req.apply(&mut p)?;
        assert_eq!(p.uri.to_string(), "https://example.com/a%20b//c?z=1&a=2");
        Ok(())
    }

    #[test]
    fn test_build_without_authority() {
        let mut p = parts("/only/path");
        let err = SigningRequest::build(&mut p).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_path_invalid_utf8() -> Result<()> {
        let mut p = parts("http://example.com/%ff%fe");
        let req = SigningRequest::build(&mut p)?;
        let err = req.path_percent_decoded().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Encoding);
        Ok(())
    }

    #[test]
    fn test_host_without_default_port() -> Result<()> {
        let cases = vec![
            ("http://example.com:80/", "example.com"),
            ("https://example.com:443/", "example.com"),
            ("http://example.com:8080/", "example.com:8080"),
            ("http://127.0.0.1/", "127.0.0.1"),
        ];

        for (uri, expected) in cases {
            let mut p = parts(uri);
            let req = SigningRequest::build(&mut p)?;
            assert_eq!(req.host_without_default_port(), expected, "uri: {uri}");
        }
        Ok(())
    }

    #[test]
    fn test_header_value_normalize() {
        let cases = vec![
            ("  spaced  ", "spaced"),
            ("none", "none"),
            ("   ", ""),
            ("", ""),
            (" in ner ", "in ner"),
            ("\tv\t", "v"),
            (" \t mixed\t ", "mixed"),
            ("in\tner", "in\tner"),
        ];

        for (input, expected) in cases {
            let mut v = HeaderValue::from_static(input);
            SigningRequest::header_value_normalize(&mut v);
            assert_eq!(v.as_bytes(), expected.as_bytes(), "input: {input:?}");
        }
    }
}
