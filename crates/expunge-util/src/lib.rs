// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Zeroization primitives for memory regions this crate does not own.
//!
//! The engine in `expunge-core` wipes payloads that live inside objects
//! allocated by a managed runtime, so most helpers here work on raw
//! `(pointer, length)` regions instead of Rust slices.

#![cfg_attr(not(test), no_std)]

/// Fills a byte slice with a repeating pattern byte.
///
/// # Example
///
/// ```
/// use expunge_util::fill_bytes_with_pattern;
///
/// let mut buffer = [0u8; 8];
/// fill_bytes_with_pattern(&mut buffer, 0xAB);
/// assert!(buffer.iter().all(|&b| b == 0xAB));
/// ```
#[inline]
pub fn fill_bytes_with_pattern(slice: &mut [u8], pattern: u8) {
    for byte in slice.iter_mut() {
        *byte = pattern;
    }
}

/// Verifies that a slice is zeroized.
///
/// # Example
///
/// ```
/// use expunge_util::is_slice_zeroized;
///
/// assert!(is_slice_zeroized(&[0u8; 10]));
/// assert!(!is_slice_zeroized(&[0u8, 1, 0, 0]));
/// ```
#[inline(always)]
pub fn is_slice_zeroized(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Fast bulk zeroization of a slice.
///
/// Uses `write_bytes` (memset) + volatile read to prevent the optimizer
/// from removing the zeroization.
///
/// # Example
///
/// ```
/// use expunge_util::fast_zeroize_slice;
///
/// let mut ints = vec![0xDEADBEEFu32; 10];
/// fast_zeroize_slice(&mut ints);
/// assert!(ints.iter().all(|&v| v == 0));
/// ```
#[inline(always)]
pub fn fast_zeroize_slice<T>(slice: &mut [T]) {
    let byte_len = core::mem::size_of_val(slice);

    // Safety: a `&mut [T]` is valid for writes of `size_of_val` bytes.
    unsafe { fast_zeroize_region(slice.as_mut_ptr() as *mut u8, byte_len) }
}

/// Overwrites `len` bytes starting at `ptr` with zero.
///
/// The store is a single `write_bytes` followed by a volatile read of the
/// first byte, so the memset cannot be elided even when the region is never
/// read again by Rust code. A zero `len` is a no-op and `ptr` is not touched.
///
/// # Safety
///
/// When `len > 0`, `ptr` must be non-null and valid for writes of `len`
/// bytes, and no live Rust reference may alias the region for the duration
/// of the call.
///
/// # Example
///
/// ```
/// use expunge_util::{fast_zeroize_region, is_slice_zeroized};
///
/// let mut secret = *b"hunter2";
/// unsafe { fast_zeroize_region(secret.as_mut_ptr(), secret.len()) };
/// assert!(is_slice_zeroized(&secret));
/// ```
#[inline(always)]
pub unsafe fn fast_zeroize_region(ptr: *mut u8, len: usize) {
    if len == 0 {
        return;
    }

    // Safety: upheld by the caller.
    unsafe {
        core::ptr::write_bytes(ptr, 0, len);
        // Volatile read prevents the optimizer from removing the write_bytes
        core::ptr::read_volatile(ptr);
    }
}

/// Checks whether `len` bytes starting at `ptr` are all zero.
///
/// Reads byte by byte through volatile loads so the check observes memory
/// rather than a value the compiler assumes is still there.
///
/// # Safety
///
/// When `len > 0`, `ptr` must be non-null and valid for reads of `len` bytes.
#[inline(never)]
pub unsafe fn is_region_zeroized(ptr: *const u8, len: usize) -> bool {
    for i in 0..len {
        // Safety: `i < len`, upheld by the caller.
        if unsafe { core::ptr::read_volatile(ptr.add(i)) } != 0 {
            return false;
        }
    }

    true
}

/// Computes `len * width + extra` without wrapping.
///
/// Returns `None` when `len * width` or the addition of `extra` would
/// overflow `usize`. The multiplication is refused up front
/// (`len > usize::MAX / width`) rather than computed and inspected.
///
/// # Example
///
/// ```
/// use core::num::NonZeroUsize;
/// use expunge_util::checked_region_len;
///
/// let four = NonZeroUsize::new(4).unwrap();
/// assert_eq!(checked_region_len(10, four, 1), Some(41));
/// assert_eq!(checked_region_len(usize::MAX, four, 0), None);
/// ```
#[inline]
pub fn checked_region_len(
    len: usize,
    width: core::num::NonZeroUsize,
    extra: usize,
) -> Option<usize> {
    if len > usize::MAX / width.get() {
        return None;
    }

    (len * width.get()).checked_add(extra)
}
