// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Zero secrets held in immutable runtime values, in place.
//!
//! Immutable text, byte sequences and integers cannot be cleared through
//! their own API, and the runtime frees them without clearing them. The
//! `zero_*` functions overwrite the payload of such a value with zero bytes
//! after checking that the write cannot corrupt the runtime:
//!
//! - the value is not null and has the expected kind
//! - it is not empty
//! - an integer is non-negative and not one of the shared small integers
//! - the byte count fits in `usize`
//!
//! On failure a [`Diagnostic`] says why and the value is untouched.
//!
//! # Example
//!
//! ```rust
//! use expunge::{Category, zero_bytes, zero_integer};
//! use expunge_host::Runtime;
//!
//! let rt = Runtime::new().unwrap();
//!
//! let key = rt.bytes(b"secret-key").unwrap();
//! zero_bytes(Some(&key)).unwrap();
//! assert_eq!(key.as_bytes().unwrap(), [0u8; 10]);
//!
//! let answer = rt.int(42).unwrap();
//! let err = zero_integer(Some(&answer)).unwrap_err();
//! assert_eq!(err.category(), Category::Value);
//! assert_eq!(answer.to_i128(), Some(42));
//! ```
//!
//! A wiped value must not be used again; its contents are gone even though
//! the runtime still owns it. Copies made before the call (by the runtime,
//! swap or CPU caches) are out of reach.

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod diagnostic;
mod expunger;
mod hold;

pub use diagnostic::{Category, Diagnostic};
pub use expunger::Expunger;

pub use expunge_core::{LayoutError, LayoutTable, SingletonGuard, ValueKind, WipeError};
pub use expunge_host::ObjRef;

/// Version string of this build.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns [`VERSION`].
pub fn version() -> &'static str {
    VERSION
}

/// Zeroes the contents of a text value.
///
/// `None` stands for a null reference.
pub fn zero_text(value: Option<&ObjRef>) -> Result<(), Diagnostic> {
    Expunger::global().zero_text(value)
}

/// Zeroes the contents of a byte-sequence value.
///
/// `None` stands for a null reference.
pub fn zero_bytes(value: Option<&ObjRef>) -> Result<(), Diagnostic> {
    Expunger::global().zero_bytes(value)
}

/// Zeroes the digits of an integer.
///
/// Negative integers and integers from 0 through 256 are refused: the first
/// would keep their sign, the second are shared by the whole runtime.
pub fn zero_integer(value: Option<&ObjRef>) -> Result<(), Diagnostic> {
    Expunger::global().zero_integer(value)
}
