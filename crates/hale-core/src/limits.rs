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

//! Parse limits.
//!
//! Bounds the resources consumed while tokenizing untrusted input. The
//! defaults are far beyond anything a real clinical feed produces.

/// Configurable limits for parser resource usage.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum message size in bytes (default: 64MB).
    pub max_message_size: usize,
    /// Maximum number of segments (default: 100k).
    pub max_segments: usize,
    /// Maximum fields per segment (default: 10k).
    pub max_fields: usize,
    /// Maximum repetitions per field (default: 10k).
    pub max_repeats: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_message_size: 64 * 1024 * 1024, // 64MB
            max_segments: 100_000,
            max_fields: 10_000,
            max_repeats: 10_000,
        }
    }
}

impl Limits {
    /// Limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_message_size: usize::MAX,
            max_segments: usize::MAX,
            max_fields: usize::MAX,
            max_repeats: usize::MAX,
        }
    }
}
