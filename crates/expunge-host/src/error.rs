// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for expunge-host.

use thiserror::Error;

/// Errors raised while constructing host objects.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum HostError {
    /// The object would not fit in the address space.
    #[error("object of {len} elements exceeds the addressable size")]
    TooLarge {
        /// Requested element count.
        len: usize,
    },

    /// The global allocator returned null.
    #[error("allocation of {size} bytes failed")]
    OutOfMemory {
        /// Requested allocation size.
        size: usize,
    },
}
