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

//! HL7v2 wire-format serialization.
//!
//! Re-emits a parsed [`Message`](hale_core::Message) as pipe-and-caret wire
//! text, re-joining the tree with the delimiters the message itself
//! declared. Round-trip fidelity is the design anchor: for any message that
//! was parsed and never written to, `serialize(parse(m)) == m`
//! byte-for-byte.
//!
//! # Examples
//!
//! ```
//! use hale_wire::{serialize, serialize_with_config, WireConfig};
//! use hale_core::{parse, Terminator};
//!
//! # fn example() -> Result<(), hale_core::Hl7Error> {
//! let msg = parse("MSH|^~\\&|APP|FAC|||20230101||ADT^A01|1|P|2.2\r")?;
//!
//! // Preserves the input terminator style by default.
//! let wire = serialize(&msg)?;
//!
//! // Or force a specific terminator.
//! let config = WireConfig::new().with_terminator(Terminator::CrLf);
//! let wire = serialize_with_config(&msg, &config)?;
//! # Ok(())
//! # }
//! ```

mod config;
mod writer;

pub use config::WireConfig;
pub use writer::{serialize, serialize_with_config};
