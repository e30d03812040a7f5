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

//! In-memory message tree.
//!
//! A parsed message is a nested structure of
//! Segment → Field → Repeat → Component → sub-component leaves. Leaves store
//! RAW wire text: escape sequences are left exactly as they appeared in the
//! input and are only decoded by path reads (and encoded by path writes).
//! Re-joining the raw leaves therefore reproduces the input byte-for-byte,
//! which is how the round-trip guarantee is kept.
//!
//! All index-taking accessors use 1-based indices, matching the HL7
//! convention (`PID.5.1` is field 5, component 1).

use crate::delimiters::Delimiters;

/// Terminator style between segments on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terminator {
    /// Carriage return, the standard terminator.
    #[default]
    Cr,
    /// Bare line feed, common in files that passed through Unix tooling.
    Lf,
    /// CRLF pair.
    CrLf,
}

impl Terminator {
    /// The literal characters of this terminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cr => "\r",
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A component: an ordered run of sub-component leaves.
///
/// An undivided component is simply a single-leaf run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    /// Raw (still escaped) sub-component text, in wire order.
    pub subcomponents: Vec<String>,
}

impl Component {
    /// A component holding a single leaf.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            subcomponents: vec![text.into()],
        }
    }

    /// An empty (unset) component.
    pub fn empty() -> Self {
        Self::leaf("")
    }

    /// Raw text of the 1-based sub-component, if present.
    pub fn subcomponent(&self, index: usize) -> Option<&str> {
        debug_assert!(index >= 1);
        self.subcomponents.get(index - 1).map(String::as_str)
    }

    /// Set the 1-based sub-component, growing the run with empty leaves.
    pub fn set_subcomponent(&mut self, index: usize, raw: impl Into<String>) {
        debug_assert!(index >= 1);
        while self.subcomponents.len() < index {
            self.subcomponents.push(String::new());
        }
        self.subcomponents[index - 1] = raw.into();
    }

    /// Re-join this component to wire text.
    pub fn wire_text(&self, delimiters: &Delimiters) -> String {
        join(self.subcomponents.iter().map(String::as_str), delimiters.subcomponent)
    }
}

/// A repetition: an ordered run of components.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Repeat {
    pub components: Vec<Component>,
}

impl Repeat {
    /// A repetition holding a single undivided leaf.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            components: vec![Component::leaf(text)],
        }
    }

    /// An empty (unset) repetition.
    pub fn empty() -> Self {
        Self::leaf("")
    }

    /// The 1-based component, if present.
    pub fn component(&self, index: usize) -> Option<&Component> {
        debug_assert!(index >= 1);
        self.components.get(index - 1)
    }

    /// Mutable access to the 1-based component, growing with empty ones.
    pub fn ensure_component(&mut self, index: usize) -> &mut Component {
        debug_assert!(index >= 1);
        while self.components.len() < index {
            self.components.push(Component::empty());
        }
        &mut self.components[index - 1]
    }

    /// Re-join this repetition to wire text.
    pub fn wire_text(&self, delimiters: &Delimiters) -> String {
        join(
            self.components.iter().map(|c| c.wire_text(delimiters)),
            delimiters.component,
        )
    }
}

/// A field: an ordered run of repetitions. Most fields have exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub repeats: Vec<Repeat>,
}

impl Field {
    /// A field holding a single undivided leaf.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            repeats: vec![Repeat::leaf(text)],
        }
    }

    /// An empty (unset) field.
    pub fn empty() -> Self {
        Self::leaf("")
    }

    /// The 1-based repetition, if present.
    pub fn repeat(&self, index: usize) -> Option<&Repeat> {
        debug_assert!(index >= 1);
        self.repeats.get(index - 1)
    }

    /// Mutable access to the 1-based repetition, growing with empty ones.
    pub fn ensure_repeat(&mut self, index: usize) -> &mut Repeat {
        debug_assert!(index >= 1);
        while self.repeats.len() < index {
            self.repeats.push(Repeat::empty());
        }
        &mut self.repeats[index - 1]
    }

    /// Re-join this field to wire text.
    pub fn wire_text(&self, delimiters: &Delimiters) -> String {
        join(
            self.repeats.iter().map(|r| r.wire_text(delimiters)),
            delimiters.repetition,
        )
    }
}

/// A named segment: one row of the message.
///
/// `fields[0]` is HL7 field 1. A preserved blank interior segment has an
/// empty name and no fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Segment {
    /// Create an empty segment with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The 1-based field, if present.
    pub fn field(&self, index: usize) -> Option<&Field> {
        debug_assert!(index >= 1);
        self.fields.get(index - 1)
    }

    /// Mutable access to the 1-based field, growing with empty ones.
    pub fn ensure_field(&mut self, index: usize) -> &mut Field {
        debug_assert!(index >= 1);
        while self.fields.len() < index {
            self.fields.push(Field::empty());
        }
        &mut self.fields[index - 1]
    }

    /// Re-join this segment to wire text.
    ///
    /// MSH is special: field 1 is the field separator itself and is emitted
    /// as the separator that follows the segment name, and field 2 (the
    /// delimiter run) is an opaque leaf re-emitted verbatim.
    pub fn wire_text(&self, delimiters: &Delimiters) -> String {
        let mut out = String::with_capacity(self.name.len() + self.fields.len() * 8);
        out.push_str(&self.name);
        let emitted = if self.name == "MSH" && !self.fields.is_empty() {
            &self.fields[1..]
        } else {
            &self.fields[..]
        };
        if self.name == "MSH" && !self.fields.is_empty() && emitted.is_empty() {
            // MSH with only field 1: the separator still appears on the wire.
            out.push(delimiters.field);
        }
        for field in emitted {
            out.push(delimiters.field);
            out.push_str(&field.wire_text(delimiters));
        }
        out
    }
}

/// A parsed HL7v2 message: an ordered run of segments plus the delimiter
/// table and terminator memory needed to reproduce the wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    delimiters: Delimiters,
    pub segments: Vec<Segment>,
    terminator: Terminator,
    trailing_terminators: usize,
}

impl Message {
    /// Create a message containing only a seed MSH segment declaring the
    /// given delimiter table.
    pub fn new(delimiters: Delimiters) -> Self {
        let mut msh = Segment::new("MSH");
        msh.fields.push(Field::leaf(delimiters.field.to_string()));
        msh.fields.push(Field::leaf(delimiters.encoding_characters()));
        Self {
            delimiters,
            segments: vec![msh],
            terminator: Terminator::Cr,
            trailing_terminators: 1,
        }
    }

    /// Assemble a message from already-tokenized parts. Used by the parser.
    pub(crate) fn from_parts(
        delimiters: Delimiters,
        segments: Vec<Segment>,
        terminator: Terminator,
        trailing_terminators: usize,
    ) -> Self {
        Self {
            delimiters,
            segments,
            terminator,
            trailing_terminators,
        }
    }

    /// The delimiter table this message was parsed with. Immutable for the
    /// lifetime of the message.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Terminator style detected at parse time.
    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    /// Number of terminators after the final segment in the input.
    pub fn trailing_terminators(&self) -> usize {
        self.trailing_terminators
    }

    /// The header segment.
    pub fn msh(&self) -> Option<&Segment> {
        self.segments.first().filter(|s| s.name == "MSH")
    }

    /// First segment with the given name.
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name == name)
    }

    /// All segments with the given name, in message order.
    ///
    /// The returned items borrow only from the message, not from `name`.
    pub fn segments_named(&self, name: &str) -> impl Iterator<Item = &Segment> {
        let name = name.to_string();
        self.segments.iter().filter(move |s| s.name == name)
    }

    /// The 1-based `occurrence`-th segment with the given name.
    pub fn segment_occurrence(&self, name: &str, occurrence: usize) -> Option<&Segment> {
        debug_assert!(occurrence >= 1);
        self.segments_named(name).nth(occurrence - 1)
    }

    /// Mutable variant of [`segment_occurrence`](Self::segment_occurrence).
    pub fn segment_occurrence_mut(
        &mut self,
        name: &str,
        occurrence: usize,
    ) -> Option<&mut Segment> {
        debug_assert!(occurrence >= 1);
        self.segments
            .iter_mut()
            .filter(|s| s.name == name)
            .nth(occurrence - 1)
    }

    /// Append a segment, preserving insertion order.
    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }
}

fn join<I, S>(parts: I, separator: char) -> String
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, part) in parts.enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(part.as_ref());
    }
    out
}
