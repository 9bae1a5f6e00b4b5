// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use expunge_host::ObjRef;

/// Keeps a value alive for the length of one call.
///
/// Acquiring bumps the value's reference count; dropping the hold gives
/// it back, on every exit path.
pub(crate) struct Hold {
    value: ObjRef,
}

impl Hold {
    pub(crate) fn acquire(value: &ObjRef) -> Self {
        Self {
            value: value.clone(),
        }
    }

    pub(crate) fn value(&self) -> &ObjRef {
        &self.value
    }
}
