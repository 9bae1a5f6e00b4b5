// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::num::NonZeroUsize;
use core::ptr::NonNull;

use expunge_core::{ValueHandle, ValueKind};

use crate::digits::small_magnitude;
use crate::object::{ObjRef, Tag};

// Safety: an `ObjRef` keeps its object alive, `base()` is the start of the
// allocation, the headers match `layout_table()`, and payload bytes are only
// ever borrowed transiently by `ObjRef` accessors on the same thread.
unsafe impl ValueHandle for ObjRef {
    fn kind(&self) -> ValueKind {
        ObjRef::kind(self)
    }

    fn base_address(&self) -> NonNull<u8> {
        self.base()
    }

    fn length(&self) -> usize {
        self.len()
    }

    fn char_width(&self) -> NonZeroUsize {
        NonZeroUsize::new(ObjRef::char_width(self)).unwrap_or(NonZeroUsize::MIN)
    }

    fn is_negative(&self) -> bool {
        self.tag() == Tag::Integer && self.signed_size() < 0
    }

    fn small_magnitude(&self) -> Option<u64> {
        if self.tag() != Tag::Integer {
            return None;
        }

        small_magnitude(&self.first_digits_if_small()?)
    }
}
