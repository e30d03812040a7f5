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

//! Tokenizer: raw wire text to the nested message tree.
//!
//! Parsing is pure splitting. The delimiter table is derived from the MSH
//! header first, then the input is cut into segments on CR / LF / CRLF, and
//! each segment is cut on the field, repetition, component, and
//! sub-component separators in turn. Every split preserves empty strings as
//! empty nodes, and leaves keep their raw escaped text, so an unmutated
//! message re-serializes byte-identically.

use memchr::memchr2;

use crate::delimiters::Delimiters;
use crate::error::{Hl7Error, Hl7Result};
use crate::limits::Limits;
use crate::message::{Component, Field, Message, Repeat, Segment, Terminator};

/// Parse a raw HL7v2 message with default [`Limits`].
pub fn parse(input: &str) -> Hl7Result<Message> {
    parse_with_limits(input, &Limits::default())
}

/// Parse a raw HL7v2 message, bounding resource usage with `limits`.
pub fn parse_with_limits(input: &str, limits: &Limits) -> Hl7Result<Message> {
    if input.trim().is_empty() {
        return Err(Hl7Error::empty_message("input is empty or whitespace-only"));
    }
    if input.len() > limits.max_message_size {
        return Err(Hl7Error::limit(
            format!(
                "message size {} exceeds limit {}",
                input.len(),
                limits.max_message_size
            ),
            0,
        ));
    }
    let delimiters = Delimiters::from_msh(input)?;
    let split = split_segments(input);
    if split.entries.len() > limits.max_segments {
        return Err(Hl7Error::limit(
            format!(
                "segment count {} exceeds limit {}",
                split.entries.len(),
                limits.max_segments
            ),
            0,
        ));
    }
    let mut segments = Vec::with_capacity(split.entries.len());
    for (index, entry) in split.entries.iter().enumerate() {
        segments.push(tokenize_segment(entry, &delimiters, limits, index + 1)?);
    }
    Ok(Message::from_parts(
        delimiters,
        segments,
        split.terminator,
        split.trailing_terminators,
    ))
}

struct SegmentSplit<'a> {
    entries: Vec<&'a str>,
    terminator: Terminator,
    trailing_terminators: usize,
}

/// Cut the input on segment terminators. CR, LF, and CRLF are all accepted;
/// a CRLF pair counts as a single terminator. The terminator style of the
/// first boundary is remembered so serialization can reproduce it. Trailing
/// empty entries are discarded but counted; interior empty entries survive
/// as zero-field segments.
fn split_segments(input: &str) -> SegmentSplit<'_> {
    let bytes = input.as_bytes();
    let mut entries = Vec::new();
    let mut terminator = None;
    let mut start = 0;
    while let Some(offset) = memchr2(b'\r', b'\n', &bytes[start..]) {
        let at = start + offset;
        entries.push(&input[start..at]);
        let style = if bytes[at] == b'\r' {
            if bytes.get(at + 1) == Some(&b'\n') {
                Terminator::CrLf
            } else {
                Terminator::Cr
            }
        } else {
            Terminator::Lf
        };
        terminator.get_or_insert(style);
        start = at + style.as_str().len();
    }
    // The final remainder is pushed even when empty so that a message
    // ending in terminators yields trailing empty entries to count below.
    entries.push(&input[start..]);
    let mut trailing_terminators = 0;
    while entries.last().is_some_and(|e| e.is_empty()) {
        entries.pop();
        trailing_terminators += 1;
    }
    SegmentSplit {
        entries,
        terminator: terminator.unwrap_or_default(),
        trailing_terminators,
    }
}

fn tokenize_segment(
    raw: &str,
    delimiters: &Delimiters,
    limits: &Limits,
    ordinal: usize,
) -> Hl7Result<Segment> {
    if raw.is_empty() {
        // Preserved blank interior segment.
        return Ok(Segment::default());
    }
    let mut parts = raw.split(delimiters.field);
    let name = parts.next().unwrap_or_default().to_string();
    let mut segment = Segment::new(name);
    let push_field = |segment: &mut Segment, field: Field| -> Hl7Result<()> {
        if segment.fields.len() >= limits.max_fields {
            return Err(Hl7Error::limit(
                format!("field count exceeds limit {}", limits.max_fields),
                ordinal,
            ));
        }
        segment.fields.push(field);
        Ok(())
    };
    if segment.name == "MSH" {
        // MSH-1 is the field separator itself; MSH-2 is the delimiter run.
        // Both are opaque single leaves, never split or escape-decoded, and
        // both count toward the field limit like any other field.
        push_field(&mut segment, Field::leaf(delimiters.field.to_string()))?;
        if let Some(encoding_chars) = parts.next() {
            push_field(&mut segment, Field::leaf(encoding_chars))?;
        }
    }
    for part in parts {
        let field = tokenize_field(part, delimiters, limits, ordinal)?;
        push_field(&mut segment, field)?;
    }
    Ok(segment)
}

fn tokenize_field(
    raw: &str,
    delimiters: &Delimiters,
    limits: &Limits,
    ordinal: usize,
) -> Hl7Result<Field> {
    let mut field = Field::default();
    for repeat in raw.split(delimiters.repetition) {
        if field.repeats.len() >= limits.max_repeats {
            return Err(Hl7Error::limit(
                format!("repetition count exceeds limit {}", limits.max_repeats),
                ordinal,
            ));
        }
        field.repeats.push(tokenize_repeat(repeat, delimiters));
    }
    Ok(field)
}

fn tokenize_repeat(raw: &str, delimiters: &Delimiters) -> Repeat {
    Repeat {
        components: raw
            .split(delimiters.component)
            .map(|component| Component {
                subcomponents: component
                    .split(delimiters.subcomponent)
                    .map(str::to_string)
                    .collect(),
            })
            .collect(),
    }
}
