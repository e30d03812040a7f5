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

//! End-to-end scenarios against the public API.

use hale::{get, parse, serialize, set, transform, Hl7ErrorKind, Terminator, WireConfig};

const ADT: &str = "MSH|^~\\&|A|B|C|D|20230101||ADT^A01|1|P|2.2\rPID|||123||DOE^JANE";

/// A cut-down ORU^R01 in the shape produced by hospital simulators.
const ORU: &str = "MSH|^~\\&|SIMHOSP|SFAC|RAPP|RFAC|20200501140643||ORU^R01|1|T|2.3\r\
PID|1|2590157853^^^SIMULATOR MRN^MRN|2590157853^^^SIMULATOR MRN^MRN~2478684691^^^NHSNBR^NHSNMBR||Esterkin^AKI Scenario 6^^^Miss^^CURRENT||19890118000000|F\r\
OBR|1|1892929505|4262718364|us-0003^UREA AND ELECTROLYTES^WinPath^^\r\
OBX|1|NM|tt-0003-01^Creatinine^WinPath^^||98.00|UMOLL|49 - 92|H|||F\r\
NTE|0||Task cow administration\r\
NTE|1||Grapefruit garlic resale camera\r";

#[test]
fn reads_nested_coordinates() {
    let msg = parse(ADT).unwrap();
    assert_eq!(get(&msg, "PID.5.1").unwrap(), "DOE");
    assert_eq!(get(&msg, "PID.5.2").unwrap(), "JANE");
    assert_eq!(get(&msg, "MSH.3").unwrap(), "A");
}

#[test]
fn write_read_serialize_coherence() {
    let mut msg = parse(ADT).unwrap();
    set(&mut msg, "PID.5.1", "SMITH").unwrap();
    assert_eq!(get(&msg, "PID.5.1").unwrap(), "SMITH");
    assert_eq!(
        serialize(&msg).unwrap(),
        "MSH|^~\\&|A|B|C|D|20230101||ADT^A01|1|P|2.2\rPID|||123||SMITH^JANE"
    );
}

#[test]
fn escaped_field_separator_stays_literal_until_read() {
    let raw = "MSH|^~\\&|A|B|C|D|20230101||ADT^A01|1|P|2.2\rOBX|1|TX|n||result \\F\\ flagged";
    let msg = parse(raw).unwrap();
    // The wire form keeps the sequence unresolved...
    assert_eq!(serialize(&msg).unwrap(), raw);
    // ...while reads decode it to the embedded field separator.
    assert_eq!(get(&msg, "OBX.5").unwrap(), "result | flagged");
}

#[test]
fn missing_msh_fails_with_malformed_header() {
    let err = parse("PID|||123||DOE^JANE").unwrap_err();
    assert_eq!(err.kind, Hl7ErrorKind::MalformedHeader);
}

#[test]
fn index_zero_fails_with_invalid_path() {
    let msg = parse(ADT).unwrap();
    let err = get(&msg, "PID.3[0].1").unwrap_err();
    assert_eq!(err.kind, Hl7ErrorKind::InvalidPath);
}

#[test]
fn segment_order_is_preserved() {
    let msg = parse(ORU).unwrap();
    let names: Vec<&str> = msg.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["MSH", "PID", "OBR", "OBX", "NTE", "NTE"]);
}

#[test]
fn oru_repetitions_and_occurrences_resolve() {
    let msg = parse(ORU).unwrap();
    assert_eq!(get(&msg, "PID.3[2].1").unwrap(), "2478684691");
    assert_eq!(get(&msg, "PID.3[2].4").unwrap(), "NHSNBR");
    assert_eq!(get(&msg, "OBX.3.2").unwrap(), "Creatinine");
    assert_eq!(get(&msg, "NTE.3").unwrap(), "Task cow administration");
    assert_eq!(get(&msg, "NTE[2].3").unwrap(), "Grapefruit garlic resale camera");
}

#[test]
fn oru_roundtrips_byte_identically() {
    let msg = parse(ORU).unwrap();
    assert_eq!(serialize(&msg).unwrap(), ORU);
}

#[test]
fn transform_composes_parse_mutate_serialize() {
    let out = transform(ORU, |msg| {
        msg.set("OBX.5", "101.00")?;
        msg.set("OBX.8", "HH")
    })
    .unwrap();
    assert!(out.contains("||101.00|UMOLL|49 - 92|HH|"));
    // Everything the mutation did not touch is unchanged.
    assert!(out.contains("Esterkin^AKI Scenario 6"));
    assert!(out.ends_with("NTE|1||Grapefruit garlic resale camera\r"));
}

#[test]
fn transform_reports_structural_errors_before_mutating() {
    let err = transform("", |_| Ok(())).unwrap_err();
    assert_eq!(err.kind, Hl7ErrorKind::EmptyMessage);
}

#[test]
fn terminator_can_be_normalized_on_output() {
    let msg = parse("MSH|^~\\&|A\nPID|1\n").unwrap();
    assert_eq!(msg.terminator(), Terminator::Lf);
    let config = WireConfig::new().with_terminator(Terminator::Cr);
    assert_eq!(
        hale::serialize_with_config(&msg, &config).unwrap(),
        "MSH|^~\\&|A\rPID|1\r"
    );
}

#[test]
fn values_with_delimiters_survive_a_full_cycle() {
    let mut msg = parse(ADT).unwrap();
    set(&mut msg, "PID.11", "12 Pipe|Caret^Amp& Lane").unwrap();
    let reparsed = parse(&serialize(&msg).unwrap()).unwrap();
    assert_eq!(get(&reparsed, "PID.11").unwrap(), "12 Pipe|Caret^Amp& Lane");
}
