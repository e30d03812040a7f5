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

//! Error types for HL7v2 parsing and addressing.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hl7ErrorKind {
    /// Message does not start with MSH, or the header is too short to
    /// declare the delimiter table.
    MalformedHeader,
    /// Input is empty or whitespace-only.
    EmptyMessage,
    /// Path address syntax violation (including any 0 index).
    InvalidPath,
    /// The addressed segment occurrence does not exist in the message.
    PathNotFound,
    /// Malformed escape sequence in field content.
    Encoding,
    /// Parse limit exceeded.
    Limit,
}

impl fmt::Display for Hl7ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader => write!(f, "MalformedHeaderError"),
            Self::EmptyMessage => write!(f, "EmptyMessageError"),
            Self::InvalidPath => write!(f, "InvalidPathError"),
            Self::PathNotFound => write!(f, "PathNotFoundError"),
            Self::Encoding => write!(f, "EncodingError"),
            Self::Limit => write!(f, "LimitError"),
        }
    }
}

/// An error produced while parsing, addressing, or serializing a message.
#[derive(Debug, Clone, Error)]
#[error("{kind} at segment {segment}: {message}")]
pub struct Hl7Error {
    /// The kind of error.
    pub kind: Hl7ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// 1-based segment ordinal (0 when the error is not tied to a segment).
    pub segment: usize,
    /// Additional context (e.g. "while applying mutation").
    pub context: Option<String>,
}

impl Hl7Error {
    /// Create a new error.
    pub fn new(kind: Hl7ErrorKind, message: impl Into<String>, segment: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            segment,
            context: None,
        }
    }

    /// Attach a segment ordinal.
    pub fn with_segment(mut self, segment: usize) -> Self {
        self.segment = segment;
        self
    }

    /// Attach context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind

    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::MalformedHeader, message, 1)
    }

    pub fn empty_message(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::EmptyMessage, message, 0)
    }

    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::InvalidPath, message, 0)
    }

    pub fn path_not_found(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::PathNotFound, message, 0)
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::Encoding, message, 0)
    }

    pub fn limit(message: impl Into<String>, segment: usize) -> Self {
        Self::new(Hl7ErrorKind::Limit, message, segment)
    }
}

/// Result alias used throughout the crate.
pub type Hl7Result<T> = Result<T, Hl7Error>;
