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

//! # Hale - HL7v2 Message Toolkit
//!
//! Hale parses, queries, and transforms HL7v2 messages: the
//! pipe-and-caret-delimited format used for clinical data exchange. The
//! delimiters are never assumed; they are derived from each message's own
//! MSH header, so messages with non-standard delimiter tables work
//! unchanged.
//!
//! ## Quick Start
//!
//! ```rust
//! use hale::{parse, serialize, transform};
//!
//! let raw = "MSH|^~\\&|SIMHOSP|SFAC|RAPP|RFAC|20200501140643||ORU^R01|1|T|2.3\r\
//!            PID|1|2590157853^^^SIMULATOR MRN^MRN|||Esterkin^AKI^^^Miss\r";
//!
//! // Parse and read by path.
//! let msg = parse(raw).expect("failed to parse");
//! assert_eq!(msg.get("PID.5.1").unwrap(), "Esterkin");
//! assert_eq!(msg.get("MSH.9.2").unwrap(), "R01");
//!
//! // Round-trip is byte-identical without writes.
//! assert_eq!(serialize(&msg).unwrap(), raw);
//!
//! // Or parse, mutate, and re-serialize in one call.
//! let out = transform(raw, |msg| msg.set("PID.5.1", "Smith")).unwrap();
//! assert!(out.contains("Smith^AKI"));
//! ```
//!
//! ## Addressing
//!
//! Paths are `SEG[occ].field[rep].component.subcomponent` with 1-based
//! indices: `PID.5.1`, `PID.3[2].1`, `NTE[2].3`. Parse one into a typed
//! [`Path`] to reuse a coordinate without re-parsing the address string.
//!
//! ## Crates
//!
//! - `hale-core`: data model, tokenizer, escape codec, path resolver
//! - `hale-wire`: wire-format serialization
//! - `hale` (this crate): facade plus the transform pipeline
//!
//! Transport (MLLP framing), persistence, and message-type schema
//! validation are deliberately out of scope; they are collaborators that
//! feed raw text in and send serialized text onward.

// Re-export core types
pub use hale_core::{
    // Functions
    parse,
    parse_with_limits,
    // Main types
    Component,
    Delimiters,
    Field,
    // Errors
    Hl7Error,
    Hl7ErrorKind,
    Hl7Result,
    Limits,
    Message,
    Path,
    Repeat,
    Segment,
    Terminator,
};

// Re-export serialization
pub use hale_wire::{serialize_with_config, WireConfig};

// Error handling extensions
mod error_ext;
pub use error_ext::Hl7ResultExt;

// Transform pipeline
mod transform;
pub use transform::transform;

// Re-export the escape codec
pub mod escape {
    //! Escape-sequence codec for field content.
    pub use hale_core::escape::{decode, encode};
}

/// Read the decoded text at `path` (an address string such as `PID.5.1`).
pub fn get(message: &Message, path: &str) -> Hl7Result<String> {
    message.get(path)
}

/// Write `value` at `path`, escape-encoding it first.
pub fn set(message: &mut Message, path: &str, value: &str) -> Hl7Result<()> {
    message.set(path, value)
}

/// Serialize a message back to wire text with default options.
pub fn serialize(message: &Message) -> Hl7Result<String> {
    hale_wire::serialize(message)
}
