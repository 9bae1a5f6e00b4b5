// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Per-kind layout resolution plus guarded wipe.

use core::fmt;
use core::marker::PhantomData;

use crate::error::WipeError;
use crate::guard::SingletonGuard;
use crate::handle::ValueHandle;
use crate::kind::{Bytes, Integer, Kind, Text};
use crate::layout::{KindLayout, LayoutTable};
use crate::resolve::{Payload, resolve_payload};
use crate::wipe::{WipeReport, guarded_wipe};

/// Wipes values of kind `K`.
///
/// The three zeroizers are the same code instantiated for each kind; they
/// differ only in the [`KindLayout`] they read from the table and in the
/// integer-only guard step.
pub struct Zeroizer<'a, K: Kind> {
    layout: &'a KindLayout,
    guard: &'a SingletonGuard,
    _kind: PhantomData<K>,
}

/// Zeroizer for text values.
pub type TextZeroizer<'a> = Zeroizer<'a, Text>;

/// Zeroizer for byte sequences.
pub type BytesZeroizer<'a> = Zeroizer<'a, Bytes>;

/// Zeroizer for integers.
pub type IntegerZeroizer<'a> = Zeroizer<'a, Integer>;

impl<K: Kind> fmt::Debug for Zeroizer<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zeroizer")
            .field("kind", &K::KIND)
            .field("layout", self.layout)
            .field("guard", self.guard)
            .finish()
    }
}

impl<'a, K: Kind> Zeroizer<'a, K> {
    /// Creates a zeroizer reading its geometry from `table`.
    pub fn new(table: &'a LayoutTable, guard: &'a SingletonGuard) -> Self {
        Self {
            layout: table.get(K::KIND),
            guard,
            _kind: PhantomData,
        }
    }

    /// Layout this zeroizer resolves payloads with.
    pub fn layout(&self) -> &KindLayout {
        self.layout
    }

    /// Resolves the payload of `handle`, refusing values of another kind.
    pub fn resolve<H: ValueHandle + ?Sized>(&self, handle: &H) -> Result<Payload, WipeError> {
        if handle.kind() != K::KIND {
            log::debug!("refusing {} value in {} zeroizer", handle.kind(), K::KIND);
            return Err(WipeError::WrongKind);
        }

        Ok(resolve_payload(handle, self.layout))
    }

    /// Resolves and wipes the payload of `handle`.
    ///
    /// On success the value's payload is all zero bytes and the value must
    /// be treated as consumed: the host still owns it, but its contents are
    /// gone. On failure nothing was written.
    pub fn zeroize<H: ValueHandle + ?Sized>(&self, handle: &H) -> Result<WipeReport, WipeError> {
        let payload = self.resolve(handle)?;
        guarded_wipe(handle, &payload, self.guard)
    }
}
