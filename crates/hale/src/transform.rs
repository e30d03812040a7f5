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

//! The transform pipeline: tokenize → mutate → serialize.

use hale_core::{Hl7Result, Message};

/// Parse `input`, hand the message to `mutate`, and serialize the result.
///
/// Delimiter extraction and tokenization run first; any structural error
/// short-circuits before `mutate` is called, so the caller never observes a
/// partially built message. Mutation is synchronous and runs exactly once.
///
/// # Examples
///
/// ```
/// use hale::transform;
///
/// let raw = "MSH|^~\\&|A|B|C|D|20230101||ADT^A01|1|P|2.2\rPID|||123||DOE^JANE";
/// let out = transform(raw, |msg| {
///     msg.set("PID.5.1", "SMITH")?;
///     msg.set("PID.8", "F")
/// })
/// .unwrap();
/// assert!(out.ends_with("PID|||123||SMITH^JANE|||F"));
/// ```
pub fn transform<F>(input: &str, mutate: F) -> Hl7Result<String>
where
    F: FnOnce(&mut Message) -> Hl7Result<()>,
{
    let mut message = hale_core::parse(input)?;
    mutate(&mut message)?;
    hale_wire::serialize(&message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hale_core::{Hl7Error, Hl7ErrorKind};

    const SAMPLE: &str =
        "MSH|^~\\&|A|B|C|D|20230101||ADT^A01|1|P|2.2\rPID|||123||DOE^JANE";

    #[test]
    fn identity_transform_roundtrips() {
        let out = transform(SAMPLE, |_| Ok(())).unwrap();
        assert_eq!(out, SAMPLE);
    }

    #[test]
    fn mutations_are_applied_in_order() {
        let out = transform(SAMPLE, |msg| {
            msg.set("PID.5.1", "SMITH")?;
            msg.set("PID.5.1", "JONES")
        })
        .unwrap();
        assert!(out.contains("JONES^JANE"));
        assert!(!out.contains("SMITH"));
    }

    #[test]
    fn parse_errors_short_circuit_before_mutation() {
        let mut ran = false;
        let err = transform("EVN|nothing here", |_| {
            ran = true;
            Ok(())
        })
        .unwrap_err();
        assert_eq!(err.kind, Hl7ErrorKind::MalformedHeader);
        assert!(!ran);
    }

    #[test]
    fn mutation_errors_propagate() {
        let err = transform(SAMPLE, |msg| msg.set("ZZZ.1", "x")).unwrap_err();
        assert_eq!(err.kind, Hl7ErrorKind::PathNotFound);
        let err = transform(SAMPLE, |_| {
            Err(Hl7Error::invalid_path("caller rejected the message"))
        })
        .unwrap_err();
        assert_eq!(err.kind, Hl7ErrorKind::InvalidPath);
    }
}
