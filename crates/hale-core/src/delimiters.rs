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

//! Delimiter table derived from the MSH header.
//!
//! HL7v2 messages are self-describing: the five structural delimiters are
//! declared by the message itself. The character immediately after the
//! literal `MSH` is the field separator, and the following four characters
//! (conventionally `^~\&`) are the component, repetition, escape, and
//! sub-component separators, in that fixed order. The table is derived once
//! per message and never changes afterwards.

use crate::error::{Hl7Error, Hl7Result};

/// Length of a segment identifier (`MSH`, `PID`, ...).
pub const SEGMENT_ID_LEN: usize = 3;

/// The five delimiter characters of one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delimiters {
    /// Field separator (conventionally `|`).
    pub field: char,
    /// Component separator (conventionally `^`).
    pub component: char,
    /// Repetition separator (conventionally `~`).
    pub repetition: char,
    /// Escape character (conventionally `\`).
    pub escape: char,
    /// Sub-component separator (conventionally `&`).
    pub subcomponent: char,
}

impl Default for Delimiters {
    /// The conventional `|^~\&` table. Convenience for constructing messages
    /// programmatically; parsing always derives the table from the input.
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Derive the delimiter table from the start of a raw message.
    ///
    /// The input must begin with the literal, case-sensitive `MSH` followed
    /// by at least five delimiter-defining characters.
    pub fn from_msh(raw: &str) -> Hl7Result<Self> {
        if !raw.starts_with("MSH") {
            return Err(Hl7Error::malformed_header(
                "message does not start with an MSH segment",
            ));
        }
        // The declaration must fit before the first segment terminator; a
        // CR/LF inside the five-character run means the header is short.
        let mut chars = raw[SEGMENT_ID_LEN..]
            .chars()
            .take_while(|&c| c != '\r' && c != '\n');
        let mut next = |name: &str| {
            chars.next().ok_or_else(|| {
                Hl7Error::malformed_header(format!(
                    "header ends before declaring the {name} separator"
                ))
            })
        };
        let field = next("field")?;
        let component = next("component")?;
        let repetition = next("repetition")?;
        let escape = next("escape")?;
        let subcomponent = next("sub-component")?;
        let table = Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
        };
        if !table.is_distinct() {
            return Err(Hl7Error::malformed_header(
                "delimiter characters must be pairwise distinct",
            ));
        }
        Ok(table)
    }

    /// The four-character run emitted as MSH-2 on the wire.
    pub fn encoding_characters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }

    /// Whether `c` is one of the five delimiter characters.
    pub fn is_delimiter(&self, c: char) -> bool {
        c == self.field
            || c == self.component
            || c == self.repetition
            || c == self.escape
            || c == self.subcomponent
    }

    fn is_distinct(&self) -> bool {
        let set = [
            self.field,
            self.component,
            self.repetition,
            self.escape,
            self.subcomponent,
        ];
        for (i, a) in set.iter().enumerate() {
            if set[i + 1..].contains(a) {
                return false;
            }
        }
        true
    }
}
