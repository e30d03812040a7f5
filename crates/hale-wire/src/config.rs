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

//! Serialization configuration.

use hale_core::Terminator;

/// Configuration for wire output.
///
/// # Examples
///
/// ```
/// use hale_wire::WireConfig;
/// use hale_core::Terminator;
///
/// // Default: preserve the terminator style detected at parse time.
/// let config = WireConfig::default();
/// assert_eq!(config.terminator, None);
///
/// // Force CRLF between segments.
/// let config = WireConfig::new().with_terminator(Terminator::CrLf);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct WireConfig {
    /// Segment terminator override.
    ///
    /// `None` preserves the style detected when the message was parsed
    /// (CR, the standard terminator, for messages built programmatically).
    pub terminator: Option<Terminator>,
}

impl WireConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a specific segment terminator.
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = Some(terminator);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preserves_parsed_terminator() {
        assert_eq!(WireConfig::new().terminator, None);
    }

    #[test]
    fn builder_sets_override() {
        let config = WireConfig::new().with_terminator(Terminator::Lf);
        assert_eq!(config.terminator, Some(Terminator::Lf));
    }
}
