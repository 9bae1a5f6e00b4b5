// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Value kinds and their type-level markers.

use core::fmt;

/// The three kinds of runtime value the engine knows how to wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Immutable text, stored compactly with 1, 2 or 4 bytes per character.
    Text,
    /// Immutable opaque byte sequence.
    Bytes,
    /// Arbitrary-precision signed integer.
    Integer,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValueKind; 3] = [ValueKind::Text, ValueKind::Bytes, ValueKind::Integer];

    /// Short lowercase name used in logs and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Bytes => "bytes",
            ValueKind::Integer => "integer",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-level tag selecting the kind a [`Zeroizer`](crate::Zeroizer) handles.
///
/// Sealed: the engine only knows three layouts.
pub trait Kind: sealed::Sealed {
    /// The runtime kind this marker stands for.
    const KIND: ValueKind;
}

/// Marker for [`ValueKind::Text`].
#[derive(Debug)]
pub enum Text {}

/// Marker for [`ValueKind::Bytes`].
#[derive(Debug)]
pub enum Bytes {}

/// Marker for [`ValueKind::Integer`].
#[derive(Debug)]
pub enum Integer {}

impl sealed::Sealed for Text {}
impl sealed::Sealed for Bytes {}
impl sealed::Sealed for Integer {}

impl Kind for Text {
    const KIND: ValueKind = ValueKind::Text;
}

impl Kind for Bytes {
    const KIND: ValueKind = ValueKind::Bytes;
}

impl Kind for Integer {
    const KIND: ValueKind = ValueKind::Integer;
}
