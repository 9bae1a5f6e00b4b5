// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The validate-then-overwrite step.

use expunge_util::{checked_region_len, fast_zeroize_region};

use crate::error::WipeError;
use crate::guard::SingletonGuard;
use crate::handle::ValueHandle;
use crate::kind::ValueKind;
use crate::resolve::Payload;

/// Outcome of a successful wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WipeReport {
    /// Kind of the wiped value.
    pub kind: ValueKind,
    /// Bytes overwritten with zero, terminator included.
    pub bytes_wiped: usize,
}

/// Validates `payload` and, when every check passes, zeroes it.
///
/// Checks run in a fixed order and the first failure wins:
///
/// 1. empty payload → [`WipeError::EmptyValue`]
/// 2. integers only: negative → [`WipeError::SignedValue`], shared
///    singleton → [`WipeError::SharedSingleton`]
/// 3. `length * width + terminator` overflows → [`WipeError::SizeOverflow`]
///
/// Nothing is written unless all checks pass. On success exactly
/// `length * width + terminator` bytes starting at the payload address are
/// zero.
pub fn guarded_wipe<H: ValueHandle + ?Sized>(
    handle: &H,
    payload: &Payload,
    guard: &SingletonGuard,
) -> Result<WipeReport, WipeError> {
    let kind = handle.kind();

    if payload.length() == 0 {
        log::debug!("refusing to wipe empty {kind} value");
        return Err(WipeError::EmptyValue);
    }

    if kind == ValueKind::Integer {
        guard.check(handle).inspect_err(|err| {
            log::debug!("refusing to wipe integer: {err}");
        })?;
    }

    let total = checked_region_len(
        payload.length(),
        payload.element_width(),
        payload.terminator(),
    )
    .ok_or_else(|| {
        log::debug!(
            "refusing to wipe {kind} value: {} x {} bytes overflows",
            payload.length(),
            payload.element_width()
        );
        WipeError::SizeOverflow
    })?;

    // Safety: `payload` was resolved from `handle`, whose `ValueHandle`
    // contract makes `total` bytes at the payload address writable and
    // unaliased for the duration of this borrow.
    unsafe { fast_zeroize_region(payload.address(), total) };

    log::debug!("wiped {total} bytes of {kind} payload");

    Ok(WipeReport {
        kind,
        bytes_wiped: total,
    })
}
