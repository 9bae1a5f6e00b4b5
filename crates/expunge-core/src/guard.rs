// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Capability guard over runtime-shared integers.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::error::WipeError;
use crate::handle::ValueHandle;

/// Smallest integer the host caches as a process-wide singleton that the
/// sign check does not already reject.
pub const CACHED_INT_MIN: u64 = 0;

/// Largest integer the host caches as a process-wide singleton.
pub const CACHED_INT_MAX: u64 = 256;

/// Predicate deciding whether an integer may be mutated.
///
/// Holds the magnitude ranges the host shares between unrelated holders.
/// The check is independent of the wipe path so further cached ranges can be
/// protected with [`SingletonGuard::with_range`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingletonGuard {
    ranges: Vec<RangeInclusive<u64>>,
}

impl Default for SingletonGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl SingletonGuard {
    /// Guard protecting the host's small-integer cache (0 through 256).
    pub fn new() -> Self {
        Self {
            ranges: vec![CACHED_INT_MIN..=CACHED_INT_MAX],
        }
    }

    /// Adds another protected magnitude range.
    pub fn with_range(mut self, range: RangeInclusive<u64>) -> Self {
        self.ranges.push(range);
        self
    }

    /// Protected ranges, in insertion order.
    pub fn ranges(&self) -> &[RangeInclusive<u64>] {
        &self.ranges
    }

    /// Whether a non-negative integer of this magnitude is shared.
    #[inline]
    pub fn is_protected(&self, magnitude: u64) -> bool {
        self.ranges.iter().any(|range| range.contains(&magnitude))
    }

    /// Refuses negative integers, then shared singletons.
    ///
    /// Integers whose magnitude does not fit in a `u64` are never shared.
    pub fn check<H: ValueHandle + ?Sized>(&self, handle: &H) -> Result<(), WipeError> {
        if handle.is_negative() {
            return Err(WipeError::SignedValue);
        }

        match handle.small_magnitude() {
            Some(magnitude) if self.is_protected(magnitude) => Err(WipeError::SharedSingleton),
            _ => Ok(()),
        }
    }
}
