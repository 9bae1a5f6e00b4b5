// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The runtime: value constructors and the small-integer cache.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::num::NonZeroUsize;

use expunge_core::{ElementWidth, HostIntrospect, KindLayout, LayoutTable, ValueKind};

use crate::digits::to_digits;
use crate::error::HostError;
use crate::object::ObjRef;

/// Version of the object layout described by [`layout_table`].
pub const LAYOUT_VERSION: u32 = 1;

/// Smallest cached integer.
pub const SMALL_INT_MIN: i128 = -5;

/// Largest cached integer.
pub const SMALL_INT_MAX: i128 = 256;

#[cfg(target_pointer_width = "64")]
mod sizes {
    pub(super) const TEXT_HEADER: usize = 41;
    pub(super) const BYTES_HEADER: usize = 33;
    pub(super) const INTEGER_HEADER: usize = 24;
}

#[cfg(target_pointer_width = "32")]
mod sizes {
    pub(super) const TEXT_HEADER: usize = 21;
    pub(super) const BYTES_HEADER: usize = 17;
    pub(super) const INTEGER_HEADER: usize = 12;
}

const DIGIT_WIDTH: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(width) => width,
    None => unreachable!(),
};

/// Layout of this host's objects, version [`LAYOUT_VERSION`].
///
/// Header sizes include the NUL terminator of text and bytes objects.
/// Written out by hand; [`LayoutTable::validate`] against a [`Runtime`]
/// checks it still describes the allocator.
pub const fn layout_table() -> LayoutTable {
    LayoutTable {
        version: LAYOUT_VERSION,
        text: KindLayout::new(sizes::TEXT_HEADER, ElementWidth::PerInstance, 1),
        bytes: KindLayout::new(sizes::BYTES_HEADER, ElementWidth::Fixed(NonZeroUsize::MIN), 1),
        integer: KindLayout::new(sizes::INTEGER_HEADER, ElementWidth::Fixed(DIGIT_WIDTH), 0),
    }
}

/// A single-threaded managed heap.
///
/// Integers from [`SMALL_INT_MIN`] through [`SMALL_INT_MAX`] are created
/// once and shared: every [`Runtime::int`] call for them returns another
/// handle to the same object.
#[derive(Debug)]
pub struct Runtime {
    small_ints: Vec<ObjRef>,
}

impl Runtime {
    /// Creates a runtime and preallocates the small-integer cache.
    pub fn new() -> Result<Self, HostError> {
        let small_ints = (SMALL_INT_MIN..=SMALL_INT_MAX)
            .map(Self::int_uncached)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("runtime started with {} cached integers", small_ints.len());

        Ok(Self { small_ints })
    }

    fn int_uncached(value: i128) -> Result<ObjRef, HostError> {
        ObjRef::alloc_integer(value < 0, &to_digits(value.unsigned_abs()))
    }

    /// Creates a text value.
    pub fn text(&self, s: &str) -> Result<ObjRef, HostError> {
        ObjRef::alloc_text(s)
    }

    /// Creates a byte-sequence value.
    pub fn bytes(&self, bytes: &[u8]) -> Result<ObjRef, HostError> {
        ObjRef::alloc_bytes(bytes)
    }

    /// Returns an integer value, shared when it lies in the cached range.
    pub fn int(&self, value: i128) -> Result<ObjRef, HostError> {
        match self.cached_int(value) {
            Some(shared) => Ok(shared.clone()),
            None => Self::int_uncached(value),
        }
    }

    /// The cache's own handle to `value`, if cached.
    pub fn cached_int(&self, value: i128) -> Option<&ObjRef> {
        if !(SMALL_INT_MIN..=SMALL_INT_MAX).contains(&value) {
            return None;
        }

        self.small_ints.get(usize::try_from(value - SMALL_INT_MIN).ok()?)
    }
}

impl HostIntrospect for Runtime {
    fn layout_version(&self) -> u32 {
        Probe.layout_version()
    }

    fn instance_size(&self, kind: ValueKind, len: usize) -> Option<usize> {
        Probe.instance_size(kind, len)
    }
}

/// Measures freshly constructed probe objects without a [`Runtime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Probe;

impl Probe {
    fn build(kind: ValueKind, len: usize) -> Result<ObjRef, HostError> {
        match kind {
            ValueKind::Text => ObjRef::alloc_text(&"1".repeat(len)),
            ValueKind::Bytes => ObjRef::alloc_bytes(&vec![b'1'; len]),
            ValueKind::Integer => ObjRef::alloc_integer(false, &vec![1u32; len]),
        }
    }
}

impl HostIntrospect for Probe {
    fn layout_version(&self) -> u32 {
        LAYOUT_VERSION
    }

    fn instance_size(&self, kind: ValueKind, len: usize) -> Option<usize> {
        Self::build(kind, len)
            .inspect_err(|err| log::error!("{kind} probe of {len} elements failed: {err}"))
            .ok()
            .map(|probe| probe.sizeof())
    }
}

/// Human-readable summary of a value for logs: kind and length, never the
/// contents.
pub fn describe(value: &ObjRef) -> String {
    alloc::format!("{} of {} elements", value.kind(), value.len())
}
