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

//! Path addressing: typed coordinates for reads and writes.
//!
//! Address strings follow `SEG[occ].field[rep].component.subcomponent`,
//! with all indices 1-based and every selector after the segment optional:
//!
//! - `PID.5.1` — field 5, component 1
//! - `PID.3[2].1` — field 3, second repetition, component 1
//! - `NTE[2].3` — field 3 of the second NTE segment
//!
//! An address is parsed once into a [`Path`] and then used for any number
//! of reads and writes, so callers addressing the same coordinate
//! repeatedly pay the string parse a single time.

use std::fmt;
use std::str::FromStr;

use crate::error::{Hl7Error, Hl7Result};
use crate::escape;
use crate::message::{Field, Message};

/// A parsed address: structural coordinates into the message tree.
///
/// Omitted levels are `None`; reads treat an omitted repetition, component,
/// or sub-component as 1, while writes distinguish a bare field path (which
/// overwrites the whole field) from an explicit component coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Three-character segment name.
    pub segment: String,
    /// 1-based occurrence among same-named segments (default 1).
    pub occurrence: usize,
    /// 1-based field number.
    pub field: Option<usize>,
    /// 1-based repetition selector.
    pub repeat: Option<usize>,
    /// 1-based component number.
    pub component: Option<usize>,
    /// 1-based sub-component number.
    pub subcomponent: Option<usize>,
}

impl Path {
    /// A bare segment coordinate (first occurrence).
    pub fn segment(name: impl Into<String>) -> Self {
        Self {
            segment: name.into(),
            occurrence: 1,
            field: None,
            repeat: None,
            component: None,
            subcomponent: None,
        }
    }

    /// Select the 1-based occurrence among same-named segments.
    pub fn occurrence(mut self, occurrence: usize) -> Self {
        self.occurrence = occurrence;
        self
    }

    /// Select a field.
    pub fn field(mut self, field: usize) -> Self {
        self.field = Some(field);
        self
    }

    /// Select a repetition within the field.
    pub fn repeat(mut self, repeat: usize) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Select a component.
    pub fn component(mut self, component: usize) -> Self {
        self.component = Some(component);
        self
    }

    /// Select a sub-component.
    pub fn subcomponent(mut self, subcomponent: usize) -> Self {
        self.subcomponent = Some(subcomponent);
        self
    }
}

impl FromStr for Path {
    type Err = Hl7Error;

    fn from_str(address: &str) -> Hl7Result<Self> {
        let mut parts = address.split('.');
        let head = parts.next().unwrap_or_default();
        let (name, occurrence) = split_indexed(head, address)?;
        if name.len() != 3
            || !name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(Hl7Error::invalid_path(format!(
                "segment name must be 3 uppercase alphanumeric characters in {address:?}"
            )));
        }
        let mut path = Path::segment(name).occurrence(occurrence.unwrap_or(1));
        if let Some(part) = parts.next() {
            let (number, repeat) = split_indexed(part, address)?;
            path.field = Some(parse_index(number, "field", address)?);
            path.repeat = repeat;
        }
        if let Some(part) = parts.next() {
            path.component = Some(parse_index(part, "component", address)?);
        }
        if let Some(part) = parts.next() {
            path.subcomponent = Some(parse_index(part, "sub-component", address)?);
        }
        if parts.next().is_some() {
            return Err(Hl7Error::invalid_path(format!(
                "too many levels in {address:?}: at most segment.field.component.subcomponent"
            )));
        }
        if path.field.is_none() && (path.component.is_some() || path.repeat.is_some()) {
            // Unreachable through the grammar, kept as a guard for
            // hand-built addresses.
            return Err(Hl7Error::invalid_path(format!(
                "component selector without field in {address:?}"
            )));
        }
        Ok(path)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segment)?;
        if self.occurrence != 1 {
            write!(f, "[{}]", self.occurrence)?;
        }
        if let Some(field) = self.field {
            write!(f, ".{field}")?;
            if let Some(repeat) = self.repeat {
                write!(f, "[{repeat}]")?;
            }
        }
        if let Some(component) = self.component {
            write!(f, ".{component}")?;
        }
        if let Some(subcomponent) = self.subcomponent {
            write!(f, ".{subcomponent}")?;
        }
        Ok(())
    }
}

/// Split a path element into its token and optional bracketed selector.
fn split_indexed<'a>(part: &'a str, address: &str) -> Hl7Result<(&'a str, Option<usize>)> {
    let Some(open) = part.find('[') else {
        return Ok((part, None));
    };
    let Some(inner) = part[open + 1..].strip_suffix(']') else {
        return Err(Hl7Error::invalid_path(format!(
            "unclosed bracket selector in {address:?}"
        )));
    };
    Ok((&part[..open], Some(parse_index(inner, "selector", address)?)))
}

fn parse_index(token: &str, what: &str, address: &str) -> Hl7Result<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Hl7Error::invalid_path(format!(
            "{what} in {address:?} must be a positive integer, got {token:?}"
        )));
    }
    let value: usize = token.parse().map_err(|_| {
        Hl7Error::invalid_path(format!("{what} in {address:?} is out of range"))
    })?;
    if value == 0 {
        return Err(Hl7Error::invalid_path(format!(
            "{what} in {address:?} is 0; indices are 1-based"
        )));
    }
    Ok(value)
}

impl Message {
    /// Read the decoded text at a coordinate.
    ///
    /// Returns an empty string for a coordinate that is within the declared
    /// structure but unset, and `PathNotFoundError` when the addressed
    /// segment occurrence is absent. A bare segment path returns the
    /// segment's raw wire text. MSH-1 and MSH-2 are returned raw, since the
    /// delimiter declaration itself is never escape-decoded.
    pub fn get_at(&self, path: &Path) -> Hl7Result<String> {
        let Some(segment) = self.segment_occurrence(&path.segment, path.occurrence) else {
            return Err(missing_segment(path));
        };
        let delimiters = self.delimiters();
        let Some(field_number) = path.field else {
            return Ok(segment.wire_text(delimiters));
        };
        if segment.name == "MSH" && field_number <= 2 {
            return Ok(segment
                .field(field_number)
                .map(|f| f.wire_text(delimiters))
                .unwrap_or_default());
        }
        let Some(field) = segment.field(field_number) else {
            return Ok(String::new());
        };
        let Some(repeat) = field.repeat(path.repeat.unwrap_or(1)) else {
            return Ok(String::new());
        };
        let Some(component) = repeat.component(path.component.unwrap_or(1)) else {
            return Ok(String::new());
        };
        let Some(raw) = component.subcomponent(path.subcomponent.unwrap_or(1)) else {
            return Ok(String::new());
        };
        escape::decode(raw, delimiters)
    }

    /// Write `value` at a coordinate, escape-encoding it first.
    ///
    /// The full path is validated before any mutation, then the field,
    /// repetition, component, and sub-component runs grow with empty
    /// placeholders as needed. A bare field path overwrites the entire
    /// field, destroying other repetitions; with any deeper selector the
    /// write lands on a single leaf and preserves its siblings. MSH-1 and
    /// MSH-2 are not writable: the delimiter table is immutable once
    /// derived.
    pub fn set_at(&mut self, path: &Path, value: &str) -> Hl7Result<()> {
        let Some(field_number) = path.field else {
            return Err(Hl7Error::invalid_path(format!(
                "a write must address at least a field, got bare segment {:?}",
                path.segment
            )));
        };
        if path.segment == "MSH" && field_number <= 2 {
            return Err(Hl7Error::invalid_path(
                "MSH-1 and MSH-2 declare the delimiter table and cannot be written",
            ));
        }
        let encoded = escape::encode(value, self.delimiters());
        let Some(segment) = self.segment_occurrence_mut(&path.segment, path.occurrence) else {
            return Err(missing_segment(path));
        };
        if path.repeat.is_none() && path.component.is_none() && path.subcomponent.is_none() {
            // Bare field path: set the field value wholesale, never merge.
            *segment.ensure_field(field_number) = Field::leaf(encoded);
            return Ok(());
        }
        segment
            .ensure_field(field_number)
            .ensure_repeat(path.repeat.unwrap_or(1))
            .ensure_component(path.component.unwrap_or(1))
            .set_subcomponent(path.subcomponent.unwrap_or(1), encoded);
        Ok(())
    }

    /// Read via an address string; parses the address and calls
    /// [`get_at`](Self::get_at).
    pub fn get(&self, address: &str) -> Hl7Result<String> {
        self.get_at(&address.parse()?)
    }

    /// Write via an address string; parses the address and calls
    /// [`set_at`](Self::set_at).
    pub fn set(&mut self, address: &str, value: &str) -> Hl7Result<()> {
        self.set_at(&address.parse()?, value)
    }
}

fn missing_segment(path: &Path) -> Hl7Error {
    if path.occurrence == 1 {
        Hl7Error::path_not_found(format!(
            "segment {:?} does not occur in the message",
            path.segment
        ))
    } else {
        Hl7Error::path_not_found(format!(
            "occurrence {} of segment {:?} is not present",
            path.occurrence, path.segment
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Hl7ErrorKind;
    use crate::parser::parse;

    const SAMPLE: &str =
        "MSH|^~\\&|A|B|C|D|20230101||ADT^A01|1|P|2.2\rPID|||123||DOE^JANE";

    #[test]
    fn parses_address_forms() {
        let path: Path = "PID.5.1".parse().unwrap();
        assert_eq!(path, Path::segment("PID").field(5).component(1));

        let path: Path = "PID.3[2].1".parse().unwrap();
        assert_eq!(path, Path::segment("PID").field(3).repeat(2).component(1));

        let path: Path = "NTE[2].3".parse().unwrap();
        assert_eq!(path, Path::segment("NTE").occurrence(2).field(3));

        let path: Path = "OBX.5.2.3".parse().unwrap();
        assert_eq!(path.subcomponent, Some(3));

        let path: Path = "PV1".parse().unwrap();
        assert_eq!(path, Path::segment("PV1"));
    }

    #[test]
    fn display_formats_back_to_address_syntax() {
        for address in ["PID.5.1", "PID.3[2].1", "NTE[2].3", "OBX.5.2.3", "PV1"] {
            let path: Path = address.parse().unwrap();
            assert_eq!(path.to_string(), address);
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for address in [
            "",
            "P.5",
            "PID!",
            "pid.5",  // HL7 segment names are case-sensitive
            "Pid.5",
            "LONGNAME.1",
            "PID.",
            "PID..1",
            "PID.x",
            "PID.5[",
            "PID.5[2",
            "PID.5[a]",
            "PID.5.1.2.3",
            "PID.-1",
        ] {
            let err: Hl7Error = address.parse::<Path>().unwrap_err();
            assert_eq!(err.kind, Hl7ErrorKind::InvalidPath, "address {address:?}");
        }
    }

    #[test]
    fn zero_indices_are_invalid_everywhere() {
        for address in ["PID.0", "PID.3[0].1", "PID.5.0", "PID.5.1.0", "NTE[0].1"] {
            let err: Hl7Error = address.parse::<Path>().unwrap_err();
            assert_eq!(err.kind, Hl7ErrorKind::InvalidPath, "address {address:?}");
        }
    }

    #[test]
    fn reads_sample_coordinates() {
        let msg = parse(SAMPLE).unwrap();
        assert_eq!(msg.get("PID.5.1").unwrap(), "DOE");
        assert_eq!(msg.get("PID.5.2").unwrap(), "JANE");
        assert_eq!(msg.get("MSH.3").unwrap(), "A");
        assert_eq!(msg.get("MSH.9.2").unwrap(), "A01");
    }

    #[test]
    fn omitted_indices_default_to_one() {
        let msg = parse(SAMPLE).unwrap();
        assert_eq!(msg.get("PID.5").unwrap(), "DOE");
        assert_eq!(msg.get("PID.3").unwrap(), "123");
    }

    #[test]
    fn msh_header_fields_read_raw() {
        let msg = parse(SAMPLE).unwrap();
        assert_eq!(msg.get("MSH.1").unwrap(), "|");
        assert_eq!(msg.get("MSH.2").unwrap(), "^~\\&");
    }

    #[test]
    fn unset_in_bounds_coordinates_read_empty() {
        let msg = parse(SAMPLE).unwrap();
        assert_eq!(msg.get("PID.4").unwrap(), "");
        assert_eq!(msg.get("PID.99").unwrap(), "");
        assert_eq!(msg.get("PID.5.3").unwrap(), "");
        assert_eq!(msg.get("PID.5.1.2").unwrap(), "");
        assert_eq!(msg.get("PID.3[2]").unwrap(), "");
    }

    #[test]
    fn absent_segment_is_path_not_found() {
        let msg = parse(SAMPLE).unwrap();
        let err = msg.get("ZZZ.1").unwrap_err();
        assert_eq!(err.kind, Hl7ErrorKind::PathNotFound);
        let err = msg.get("PID[2].3").unwrap_err();
        assert_eq!(err.kind, Hl7ErrorKind::PathNotFound);
    }

    #[test]
    fn bare_segment_reads_wire_text() {
        let msg = parse(SAMPLE).unwrap();
        assert_eq!(msg.get("PID").unwrap(), "PID|||123||DOE^JANE");
    }

    #[test]
    fn write_then_read_coheres() {
        let mut msg = parse(SAMPLE).unwrap();
        msg.set("PID.5.1", "SMITH").unwrap();
        assert_eq!(msg.get("PID.5.1").unwrap(), "SMITH");
        assert_eq!(msg.get("PID.5.2").unwrap(), "JANE");
    }

    #[test]
    fn writes_escape_delimiters_in_values() {
        let mut msg = parse(SAMPLE).unwrap();
        msg.set("PID.6", "A|B^C").unwrap();
        assert_eq!(msg.get("PID.6").unwrap(), "A|B^C");
        let raw = msg.segment("PID").unwrap().wire_text(msg.delimiters());
        assert!(raw.contains("A\\F\\B\\S\\C"), "raw {raw:?}");
    }

    #[test]
    fn writes_grow_structure_sparsely() {
        let mut msg = parse(SAMPLE).unwrap();
        msg.set("PID.13[3].2", "555-1234").unwrap();
        assert_eq!(msg.get("PID.13[3].2").unwrap(), "555-1234");
        assert_eq!(msg.get("PID.13[1]").unwrap(), "");
        assert_eq!(msg.get("PID.13[2]").unwrap(), "");
        assert_eq!(msg.get("PID.10").unwrap(), "");
    }

    #[test]
    fn bare_field_write_replaces_all_repetitions() {
        let mut msg = parse("MSH|^~\\&|A\rPID|||111~222~333").unwrap();
        msg.set("PID.3", "ONLY").unwrap();
        assert_eq!(msg.segment("PID").unwrap().field(3).unwrap().repeats.len(), 1);
        assert_eq!(msg.get("PID.3").unwrap(), "ONLY");
    }

    #[test]
    fn component_write_preserves_sibling_repetitions() {
        let mut msg = parse("MSH|^~\\&|A\rPID|||111~222").unwrap();
        msg.set("PID.3[2].1", "NEW").unwrap();
        assert_eq!(msg.get("PID.3[1]").unwrap(), "111");
        assert_eq!(msg.get("PID.3[2]").unwrap(), "NEW");
    }

    #[test]
    fn writes_to_msh_header_fields_are_rejected() {
        let mut msg = parse(SAMPLE).unwrap();
        for address in ["MSH.1", "MSH.2"] {
            let err = msg.set(address, "#").unwrap_err();
            assert_eq!(err.kind, Hl7ErrorKind::InvalidPath, "address {address:?}");
        }
        // MSH-3 onwards is ordinary content.
        msg.set("MSH.3", "NEWAPP").unwrap();
        assert_eq!(msg.get("MSH.3").unwrap(), "NEWAPP");
    }

    #[test]
    fn failed_write_leaves_message_untouched() {
        let mut msg = parse(SAMPLE).unwrap();
        let before = msg.clone();
        assert!(msg.set("ZZZ.1", "value").is_err());
        assert!(msg.set("PID", "value").is_err());
        assert_eq!(msg, before);
    }

    #[test]
    fn occurrence_selector_distinguishes_same_named_segments() {
        let mut msg = parse("MSH|^~\\&|A\rNTE|1|first\rOBX|1\rNTE|2|second").unwrap();
        assert_eq!(msg.get("NTE.2").unwrap(), "first");
        assert_eq!(msg.get("NTE[2].2").unwrap(), "second");
        msg.set("NTE[2].2", "changed").unwrap();
        assert_eq!(msg.get("NTE[2].2").unwrap(), "changed");
        assert_eq!(msg.get("NTE.2").unwrap(), "first");
    }
}
