// Hale HL7 - HL7v2 Message Toolkit
//
// Copyright (c) 2025 Hale Interop B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error context helpers.
//!
//! Extension methods on `Result<T, Hl7Error>` for annotating errors as they
//! propagate, without losing the original kind or message.
//!
//! # Examples
//!
//! ```rust
//! use hale::{parse, Hl7ResultExt};
//!
//! fn load(feed: &str, raw: &str) -> Result<hale::Message, hale::Hl7Error> {
//!     parse(raw).with_context(|| format!("while parsing a message from feed {feed}"))
//! }
//! ```

use hale_core::{Hl7Error, Hl7Result};

/// Extension trait for adding context to `Result<T, Hl7Error>`.
pub trait Hl7ResultExt<T> {
    /// Annotate the error with a fixed context message.
    fn context(self, context: impl Into<String>) -> Hl7Result<T>;

    /// Annotate the error with a lazily built context message.
    fn with_context<C, F>(self, build: F) -> Hl7Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> Hl7ResultExt<T> for Hl7Result<T> {
    fn context(self, context: impl Into<String>) -> Hl7Result<T> {
        self.map_err(|err| chain_context(err, context.into()))
    }

    fn with_context<C, F>(self, build: F) -> Hl7Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| chain_context(err, build().into()))
    }
}

fn chain_context(mut err: Hl7Error, context: String) -> Hl7Error {
    err.context = Some(match err.context.take() {
        Some(existing) => format!("{existing}; {context}"),
        None => context,
    });
    err
}
