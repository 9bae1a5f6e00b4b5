// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Translation of engine codes into caller-facing diagnostics.

use core::fmt;

use expunge_core::{ValueKind, WipeError};
use thiserror::Error;

/// Broad class of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Misuse or unsafe input: wrong type, null, empty, signed or shared.
    Value,
    /// The wipe length does not fit in `usize`.
    Overflow,
    /// An unrecognised code. Advisory, not a hard error.
    Warning,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Value => "ValueError",
            Category::Overflow => "OverflowError",
            Category::Warning => "Warning",
        })
    }
}

/// Why a `zero_*` call did not wipe its argument.
///
/// The argument is left exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{category}: {message}")]
pub struct Diagnostic {
    category: Category,
    kind: ValueKind,
    code: u8,
    message: &'static str,
}

fn wrong_type_message(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Text => "argument isn't text type",
        ValueKind::Bytes => "argument isn't bytes type",
        ValueKind::Integer => "argument isn't integer type",
    }
}

impl Diagnostic {
    /// Builds the diagnostic for `code` returned by the `kind` zeroizer.
    ///
    /// Unknown codes become [`Category::Warning`].
    pub fn from_code(kind: ValueKind, code: u8) -> Self {
        let (category, message) = match WipeError::from_code(code) {
            Some(WipeError::WrongKind) => (Category::Value, wrong_type_message(kind)),
            Some(WipeError::NullReference) => (Category::Value, "argument was null"),
            Some(WipeError::EmptyValue) => (Category::Value, "argument was of zero length"),
            Some(WipeError::SharedSingleton) => (
                Category::Value,
                "argument was a preallocated integer between 0 & 256",
            ),
            Some(WipeError::SignedValue) => (Category::Value, "argument was a signed integer"),
            Some(WipeError::SizeOverflow) => (
                Category::Overflow,
                "argument size overflows the wipe length",
            ),
            Some(WipeError::LayoutMismatch) => (
                Category::Value,
                "host object layout does not match the layout table",
            ),
            None => {
                log::warn!("unknown zeroization code {code} for {kind} value");
                (Category::Warning, "unknown zeroization failure")
            }
        };

        Self {
            category,
            kind,
            code,
            message,
        }
    }

    /// Broad class of the failure.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Kind the failing entry point expected.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Numeric code reported by the engine.
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// The engine error behind this diagnostic, if the code is known.
    pub fn error(&self) -> Option<WipeError> {
        WipeError::from_code(self.code)
    }

    /// Whether this is an advisory rather than a hard error.
    pub fn is_warning(&self) -> bool {
        self.category == Category::Warning
    }
}
