// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! A small managed heap for `expunge`.
//!
//! Values are immutable, reference counted and stored the way a compact
//! managed runtime stores them: one allocation per object, a fixed
//! `#[repr(C)]` header, then the payload. Small integers are shared
//! singletons. [`ObjRef`] implements [`expunge_core::ValueHandle`] and
//! [`Runtime`] implements [`expunge_core::HostIntrospect`], so the engine can
//! resolve and wipe payloads in place.
//!
//! # Example
//!
//! ```rust
//! use expunge_host::{Runtime, layout_table};
//!
//! let rt = Runtime::new().unwrap();
//! layout_table().validate(&rt).unwrap();
//!
//! let key = rt.bytes(b"secret-key").unwrap();
//! assert_eq!(key.as_bytes().unwrap(), b"secret-key");
//!
//! // Cached integers are shared
//! let a = rt.int(42).unwrap();
//! let b = rt.int(42).unwrap();
//! assert!(a.is(&b));
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod digits;
mod error;
mod handle;
mod object;
mod runtime;

pub use error::HostError;
pub use object::ObjRef;
pub use runtime::{
    LAYOUT_VERSION, Probe, Runtime, SMALL_INT_MAX, SMALL_INT_MIN, describe, layout_table,
};
