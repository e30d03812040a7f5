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

//! Wire writer.
//!
//! Walks the message top-down and re-joins the tree with the message's own
//! delimiter table. Leaves carry raw (already escaped) wire text, so the
//! writer never re-escapes; path writes encode values before they reach the
//! tree. Output is byte-identical to the parsed input for any message that
//! was not mutated.

use hale_core::{Hl7Error, Hl7Result, Message};

use crate::config::WireConfig;

/// Initial buffer capacity for output.
///
/// Typical clinical messages are under 4KB; pre-allocating avoids early
/// reallocation churn.
const INITIAL_OUTPUT_BUFFER_CAPACITY: usize = 4096;

/// Serialize a message with the default [`WireConfig`].
pub fn serialize(message: &Message) -> Hl7Result<String> {
    serialize_with_config(message, &WireConfig::default())
}

/// Serialize a message, overriding output options with `config`.
pub fn serialize_with_config(message: &Message, config: &WireConfig) -> Hl7Result<String> {
    if message.segments.is_empty() {
        return Err(Hl7Error::empty_message(
            "message has no segments to serialize",
        ));
    }
    let terminator = config.terminator.unwrap_or_else(|| message.terminator());
    let mut out = String::with_capacity(INITIAL_OUTPUT_BUFFER_CAPACITY);
    for (index, segment) in message.segments.iter().enumerate() {
        if index > 0 {
            out.push_str(terminator.as_str());
        }
        out.push_str(&segment.wire_text(message.delimiters()));
    }
    for _ in 0..message.trailing_terminators() {
        out.push_str(terminator.as_str());
    }
    Ok(out)
}
