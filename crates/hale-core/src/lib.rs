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

//! Core parser and data model for HL7v2 messages.
//!
//! This crate turns raw pipe-and-caret wire text into a nested
//! Segment → Field → Repetition → Component → Sub-component tree, using the
//! delimiter table the message declares in its own MSH header, and provides
//! path addressing (`PID.5.1`, `PID.3[2].1`) for reads and writes against
//! that tree.
//!
//! Leaves store raw wire text; the [`escape`] codec decodes on read and
//! encodes on write, which is what makes unmutated messages re-serialize
//! byte-identically.
//!
//! Serialization back to wire format lives in the companion `hale-wire`
//! crate; the `hale` facade crate composes both into the transform
//! pipeline.

mod delimiters;
mod error;
pub mod escape;
mod limits;
mod message;
mod parser;
mod path;

pub use delimiters::{Delimiters, SEGMENT_ID_LEN};
pub use error::{Hl7Error, Hl7ErrorKind, Hl7Result};
pub use limits::Limits;
pub use message::{Component, Field, Message, Repeat, Segment, Terminator};
pub use parser::{parse, parse_with_limits};
pub use path::Path;
