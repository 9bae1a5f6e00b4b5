// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Base 2^30 digit arithmetic for integer objects.

use smallvec::SmallVec;

/// Bits carried by one digit.
pub(crate) const DIGIT_BITS: u32 = 30;

const DIGIT_MASK: u32 = (1 << DIGIT_BITS) - 1;

/// Little-endian digits of a `u128` magnitude (at most 5).
pub(crate) type Digits = SmallVec<[u32; 5]>;

/// Splits a magnitude into little-endian 30-bit digits.
///
/// Zero is a single `0` digit, so an integer object never has an empty
/// digit array.
pub(crate) fn to_digits(mut magnitude: u128) -> Digits {
    let mut digits = Digits::new();

    loop {
        digits.push((magnitude as u32) & DIGIT_MASK);
        magnitude >>= DIGIT_BITS;

        if magnitude == 0 {
            return digits;
        }
    }
}

/// Joins little-endian digits back into a magnitude, `None` past `u128`.
pub(crate) fn from_digits(digits: &[u32]) -> Option<u128> {
    let mut acc: u128 = 0;

    for &digit in digits.iter().rev() {
        if acc > (u128::MAX >> DIGIT_BITS) {
            return None;
        }
        acc = (acc << DIGIT_BITS) | u128::from(digit & DIGIT_MASK);
    }

    Some(acc)
}

/// Most digits a `u64` magnitude can need.
pub(crate) const U64_DIGITS: usize = u64::BITS.div_ceil(DIGIT_BITS) as usize;

/// Magnitude when it fits in a `u64`, `None` otherwise.
pub(crate) fn small_magnitude(digits: &[u32]) -> Option<u64> {
    if digits.len() > U64_DIGITS {
        return None;
    }

    from_digits(digits).and_then(|m| u64::try_from(m).ok())
}
