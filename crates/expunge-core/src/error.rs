// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for expunge-core.

use thiserror::Error;

use crate::kind::ValueKind;

/// Reasons a wipe was refused.
///
/// Every variant carries a stable numeric code (see [`WipeError::code`]).
/// A refused wipe never writes a byte.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum WipeError {
    /// The value is not of the kind the zeroizer handles.
    #[error("value has the wrong kind")]
    WrongKind = 1,

    /// The caller passed a null reference.
    #[error("value reference is null")]
    NullReference = 2,

    /// The value has no payload to erase.
    #[error("value has zero length")]
    EmptyValue = 3,

    /// The integer lies in a range the runtime shares process-wide.
    #[error("integer is a runtime-shared singleton")]
    SharedSingleton = 4,

    /// The integer is negative.
    #[error("integer is signed")]
    SignedValue = 5,

    /// `length * element_width` does not fit in `usize`.
    #[error("payload byte count overflows usize")]
    SizeOverflow = 6,

    /// The configured layout table does not describe the running host.
    #[error("host layout does not match the layout table")]
    LayoutMismatch = 7,
}

impl WipeError {
    /// Returns the stable numeric code of this error.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Maps a numeric code back to its error, `None` for unknown codes.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::WrongKind),
            2 => Some(Self::NullReference),
            3 => Some(Self::EmptyValue),
            4 => Some(Self::SharedSingleton),
            5 => Some(Self::SignedValue),
            6 => Some(Self::SizeOverflow),
            7 => Some(Self::LayoutMismatch),
            _ => None,
        }
    }
}

/// Mismatches between a [`LayoutTable`](crate::LayoutTable) and the host it
/// is validated against.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum LayoutError {
    /// The host reports a different layout version.
    #[error("layout version mismatch: table {expected}, host {found}")]
    VersionMismatch {
        /// Version the table was written for.
        expected: u32,
        /// Version the host reports.
        found: u32,
    },

    /// A probed empty instance does not match the configured header size.
    #[error("{kind} header size mismatch: table {configured}, host {probed}")]
    HeaderMismatch {
        /// Kind being validated.
        kind: ValueKind,
        /// Header size in the table.
        configured: usize,
        /// Header size measured on the host.
        probed: usize,
    },

    /// A probed one-element instance does not match the configured width.
    #[error("{kind} element width mismatch: table {configured}, host {probed}")]
    WidthMismatch {
        /// Kind being validated.
        kind: ValueKind,
        /// Element width in the table.
        configured: usize,
        /// Element width measured on the host.
        probed: usize,
    },

    /// The host could not build a probe instance.
    #[error("{kind} probe of {len} elements could not be built")]
    ProbeFailed {
        /// Kind being validated.
        kind: ValueKind,
        /// Element count of the probe.
        len: usize,
    },

    /// The configured header is smaller than its own terminator.
    #[error("{kind} header size {header_size} is smaller than its terminator")]
    TerminatorOutsideHeader {
        /// Kind being validated.
        kind: ValueKind,
        /// Header size in the table.
        header_size: usize,
    },
}

impl From<LayoutError> for WipeError {
    fn from(_: LayoutError) -> Self {
        WipeError::LayoutMismatch
    }
}
