// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! In-place wiping of immutable values owned by a managed runtime.
//!
//! Managed runtimes free immutable text, byte sequences and big integers
//! without clearing them, so secrets linger in the heap. This crate locates
//! the payload of such a value inside its host object and overwrites it
//! with zero bytes, after checking that doing so cannot corrupt the runtime.
//!
//! # Pipeline
//!
//! 1. [`resolve_payload`] turns a [`ValueHandle`] and the kind's
//!    [`KindLayout`] into a [`Payload`] (address, length, element width).
//! 2. [`guarded_wipe`] refuses empty payloads, negative or shared integers
//!    and byte counts that overflow `usize`, then zeroes the region.
//!
//! [`Zeroizer`] bundles both steps per kind ([`TextZeroizer`],
//! [`BytesZeroizer`], [`IntegerZeroizer`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use expunge_core::{SingletonGuard, TextZeroizer};
//!
//! let table = host_layout_table();
//! table.validate(&host)?;
//!
//! let guard = SingletonGuard::new();
//! TextZeroizer::new(&table, &guard).zeroize(&handle)?;
//! // `handle`'s payload is now all zero bytes; discard it.
//! ```
//!
//! The engine never owns or frees a value. It does not protect against
//! copies the runtime, the OS (swap) or the CPU made before the call.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod guard;
mod handle;
mod kind;
mod layout;
mod resolve;
mod wipe;
mod zeroizer;

pub use error::{LayoutError, WipeError};
pub use guard::{CACHED_INT_MAX, CACHED_INT_MIN, SingletonGuard};
pub use handle::ValueHandle;
pub use kind::{Bytes, Integer, Kind, Text, ValueKind};
pub use layout::{ElementWidth, HostIntrospect, KindLayout, LayoutTable};
pub use resolve::{Payload, resolve_payload};
pub use wipe::{WipeReport, guarded_wipe};
pub use zeroizer::{BytesZeroizer, IntegerZeroizer, TextZeroizer, Zeroizer};
