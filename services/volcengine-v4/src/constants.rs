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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Scope literals. These are part of the wire contract: the service derives the
// same key from them.

/// Algorithm identifier written in the string to sign and `Authorization`.
pub const ALGORITHM: &str = "HMAC-SHA256";
/// Last element of the credential scope and last input of the key chain.
pub const TERMINAL_LITERAL: &str = "request";
/// Prepended to the secret key to form the first key of the chain.
///
/// Volcengine uses the secret key as-is, where AWS SigV4 prepends `AWS4`.
pub const SECRET_KEY_PREFIX: &str = "";
/// Service name of the knowledge base and memory APIs.
pub const DEFAULT_SERVICE: &str = "air";
/// Region the knowledge base credential scope is bound to.
pub const DEFAULT_REGION: &str = "cn-north-1";
/// Host of the knowledge base API.
pub const KNOWLEDGE_BASE_ENDPOINT: &str = "api-knowledgebase.mlp.cn-beijing.volces.com";

/// Content type assumed for requests with a body and no explicit type.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

// Headers used in volcengine services.
pub const X_DATE: &str = "x-date";
pub const X_CONTENT_SHA256: &str = "x-content-sha256";
pub const X_SECURITY_TOKEN: &str = "x-security-token";
pub const CONTENT_MD5: &str = "content-md5";

// Env values used in volcengine services.
pub const VOLC_ACCESSKEY: &str = "VOLC_ACCESSKEY";
pub const VOLC_SECRETKEY: &str = "VOLC_SECRETKEY";
pub const VOLC_SESSION_TOKEN: &str = "VOLC_SESSION_TOKEN";
pub const VOLC_REGION: &str = "VOLC_REGION";
pub const VOLC_SERVICE: &str = "VOLC_SERVICE";

/// AsciiSet for the canonical URI.
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', '~' and the path separator '/'.
pub static URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for canonical query keys and values.
///
/// Same as [`URI_ENCODE_SET`] but '/' is encoded too.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
