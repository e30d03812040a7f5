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

//! Escape-sequence codec for field content.
//!
//! Delimiter characters occurring inside content are escaped on the wire as
//! sequences wrapped in the message's escape character: `\F\` (field), `\S\`
//! (component), `\T\` (sub-component), `\R\` (repetition), `\E\` (escape),
//! and `\Xdd..\` for raw hex-encoded bytes. Sequences the codec does not
//! recognize are vendor extensions and pass through unresolved rather than
//! failing.
//!
//! Decoding happens on path reads and encoding on path writes; parsed leaves
//! keep their wire form, so messages that are never written round-trip
//! byte-identically no matter what escapes they carry.

use crate::delimiters::Delimiters;
use crate::error::{Hl7Error, Hl7Result};

/// Decode escape sequences in `text` using the message's delimiter table.
///
/// Fails with an `EncodingError` on a truncated sequence (an escape
/// character with no closing escape before end of input) or a malformed
/// `\X..\` hex run.
pub fn decode(text: &str, delimiters: &Delimiters) -> Hl7Result<String> {
    if !text.contains(delimiters.escape) {
        return Ok(text.to_string());
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(delimiters.escape) {
        out.push_str(&rest[..start]);
        let after = &rest[start + delimiters.escape.len_utf8()..];
        let Some(end) = after.find(delimiters.escape) else {
            return Err(Hl7Error::encoding(
                "unterminated escape sequence at end of content",
            ));
        };
        let body = &after[..end];
        decode_sequence(body, delimiters, &mut out)?;
        rest = &after[end + delimiters.escape.len_utf8()..];
    }
    out.push_str(rest);
    Ok(out)
}

fn decode_sequence(body: &str, delimiters: &Delimiters, out: &mut String) -> Hl7Result<()> {
    match body {
        "F" => out.push(delimiters.field),
        "S" => out.push(delimiters.component),
        "T" => out.push(delimiters.subcomponent),
        "R" => out.push(delimiters.repetition),
        "E" => out.push(delimiters.escape),
        _ if body.starts_with('X') => out.push_str(&decode_hex(&body[1..])?),
        // Unrecognized sequence: vendor extension, keep it literal.
        _ => {
            out.push(delimiters.escape);
            out.push_str(body);
            out.push(delimiters.escape);
        }
    }
    Ok(())
}

fn decode_hex(digits: &str) -> Hl7Result<String> {
    if digits.is_empty() || digits.len() % 2 != 0 {
        return Err(Hl7Error::encoding(format!(
            "hex escape needs an even, non-zero digit count, got {}",
            digits.len()
        )));
    }
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    let raw = digits.as_bytes();
    for pair in raw.chunks(2) {
        let hi = hex_value(pair[0])?;
        let lo = hex_value(pair[1])?;
        bytes.push(hi << 4 | lo);
    }
    String::from_utf8(bytes)
        .map_err(|_| Hl7Error::encoding("hex escape does not decode to valid UTF-8"))
}

fn hex_value(digit: u8) -> Hl7Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        _ => Err(Hl7Error::encoding(format!(
            "invalid hex digit {:?} in escape sequence",
            digit as char
        ))),
    }
}

/// Encode raw content for the wire: every delimiter character becomes its
/// escape sequence, and segment-terminator characters become hex escapes so
/// a written value can never break message framing.
pub fn encode(text: &str, delimiters: &Delimiters) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == delimiters.escape {
            push_sequence(&mut out, 'E', delimiters);
        } else if c == delimiters.field {
            push_sequence(&mut out, 'F', delimiters);
        } else if c == delimiters.component {
            push_sequence(&mut out, 'S', delimiters);
        } else if c == delimiters.subcomponent {
            push_sequence(&mut out, 'T', delimiters);
        } else if c == delimiters.repetition {
            push_sequence(&mut out, 'R', delimiters);
        } else if c == '\r' {
            push_hex(&mut out, "0D", delimiters);
        } else if c == '\n' {
            push_hex(&mut out, "0A", delimiters);
        } else {
            out.push(c);
        }
    }
    out
}

fn push_sequence(out: &mut String, code: char, delimiters: &Delimiters) {
    out.push(delimiters.escape);
    out.push(code);
    out.push(delimiters.escape);
}

fn push_hex(out: &mut String, digits: &str, delimiters: &Delimiters) {
    out.push(delimiters.escape);
    out.push('X');
    out.push_str(digits);
    out.push(delimiters.escape);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Hl7ErrorKind;

    fn delims() -> Delimiters {
        Delimiters::default()
    }

    #[test]
    fn decodes_the_five_delimiter_sequences() {
        assert_eq!(decode("a\\F\\b", &delims()).unwrap(), "a|b");
        assert_eq!(decode("a\\S\\b", &delims()).unwrap(), "a^b");
        assert_eq!(decode("a\\T\\b", &delims()).unwrap(), "a&b");
        assert_eq!(decode("a\\R\\b", &delims()).unwrap(), "a~b");
        assert_eq!(decode("a\\E\\b", &delims()).unwrap(), "a\\b");
    }

    #[test]
    fn decodes_hex_runs() {
        assert_eq!(decode("\\X0D\\", &delims()).unwrap(), "\r");
        assert_eq!(decode("\\X414243\\", &delims()).unwrap(), "ABC");
        assert_eq!(decode("\\X0a\\", &delims()).unwrap(), "\n");
    }

    #[test]
    fn unknown_sequences_pass_through_literally() {
        assert_eq!(decode("a\\Zq\\b", &delims()).unwrap(), "a\\Zq\\b");
        assert_eq!(decode("\\H\\bold\\N\\", &delims()).unwrap(), "\\H\\bold\\N\\");
    }

    #[test]
    fn truncated_sequence_is_an_encoding_error() {
        let err = decode("trailing\\F", &delims()).unwrap_err();
        assert_eq!(err.kind, Hl7ErrorKind::Encoding);
        let err = decode("\\X4\\", &delims()).unwrap_err();
        assert_eq!(err.kind, Hl7ErrorKind::Encoding);
        let err = decode("\\XGG\\", &delims()).unwrap_err();
        assert_eq!(err.kind, Hl7ErrorKind::Encoding);
    }

    #[test]
    fn encodes_all_delimiters_and_framing_characters() {
        assert_eq!(
            encode("a|b^c&d~e\\f", &delims()),
            "a\\F\\b\\S\\c\\T\\d\\R\\e\\E\\f"
        );
        assert_eq!(encode("line1\rline2\n", &delims()), "line1\\X0D\\line2\\X0A\\");
    }

    #[test]
    fn respects_custom_escape_character() {
        let table = Delimiters::from_msh("MSH#!*e+#").unwrap();
        assert_eq!(encode("a#b", &table), "aeFeb");
        assert_eq!(decode("aeFeb", &table).unwrap(), "a#b");
    }

    #[test]
    fn decode_encode_roundtrip_units() {
        for s in ["", "plain", "|^~\\&", "mixed|data\\with^everything\r"] {
            assert_eq!(decode(&encode(s, &delims()), &delims()).unwrap(), s);
        }
    }
}
