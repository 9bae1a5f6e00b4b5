// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::num::NonZeroUsize;
use core::ptr::NonNull;

use crate::kind::ValueKind;

/// Non-owning view of a runtime value, valid for the duration of one call.
///
/// The engine only reads layout metadata through this trait and writes
/// zero bytes into the region the metadata describes.
///
/// # Safety
///
/// Implementors guarantee that, for as long as `&self` is borrowed:
///
/// - `base_address()` is the start of a live object of kind `kind()`, laid
///   out as described by the [`LayoutTable`](crate::LayoutTable) the handle
///   is used with;
/// - the `length() * width + terminator` bytes starting at the payload
///   offset belong to that object and are valid for writes;
/// - no Rust reference to those bytes is alive.
pub unsafe trait ValueHandle {
    /// Actual kind of the referenced value.
    fn kind(&self) -> ValueKind;

    /// Address of the first byte of the object (its header).
    fn base_address(&self) -> NonNull<u8>;

    /// Element count reported by the runtime for this instance.
    ///
    /// For integers this is the digit count, regardless of sign.
    fn length(&self) -> usize;

    /// Bytes per character, for kinds whose width varies per instance.
    fn char_width(&self) -> NonZeroUsize {
        NonZeroUsize::MIN
    }

    /// Whether the value is a negative integer.
    fn is_negative(&self) -> bool {
        false
    }

    /// Magnitude of an integer when it fits in a `u64`, `None` otherwise.
    fn small_magnitude(&self) -> Option<u64> {
        None
    }
}
