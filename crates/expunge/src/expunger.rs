// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Wrapper dispatch: null check, hold, type check, zeroizer, translation.

use std::sync::OnceLock;

use expunge_core::{
    Bytes, HostIntrospect, Integer, Kind, LayoutError, LayoutTable, SingletonGuard, Text,
    WipeError, Zeroizer,
};
use expunge_host::{ObjRef, Probe, describe, layout_table};

use crate::diagnostic::Diagnostic;
use crate::hold::Hold;

/// Code reported by a wipe that went through.
const SUCCESS: u8 = 0;

static GLOBAL: OnceLock<Expunger> = OnceLock::new();

/// The three wipe operations over one layout table and guard.
///
/// An `Expunger` checks its table against a host once, at construction.
/// If the table does not describe the host, every operation fails with
/// [`WipeError::LayoutMismatch`] and writes nothing.
#[derive(Debug, Clone)]
pub struct Expunger {
    table: LayoutTable,
    guard: SingletonGuard,
    layout: Result<(), LayoutError>,
}

impl Expunger {
    /// Creates an expunger, validating `table` against `host`.
    pub fn new<H: HostIntrospect + ?Sized>(
        table: LayoutTable,
        guard: SingletonGuard,
        host: &H,
    ) -> Self {
        let layout = table.validate(host);

        Self {
            table,
            guard,
            layout,
        }
    }

    /// Expunger for the reference host with the default guard.
    pub fn reference() -> Self {
        Self::new(layout_table(), SingletonGuard::new(), &Probe)
    }

    /// Process-wide expunger used by [`crate::zero_text`] and friends.
    ///
    /// Built and validated on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::reference)
    }

    /// Outcome of the layout validation done at construction.
    pub fn layout_status(&self) -> Result<(), LayoutError> {
        self.layout
    }

    /// Layout table in use.
    pub fn table(&self) -> &LayoutTable {
        &self.table
    }

    /// Singleton guard in use.
    pub fn guard(&self) -> &SingletonGuard {
        &self.guard
    }

    /// Zeroes the contents of a text value.
    pub fn zero_text(&self, value: Option<&ObjRef>) -> Result<(), Diagnostic> {
        self.dispatch::<Text>(value)
    }

    /// Zeroes the contents of a byte-sequence value.
    pub fn zero_bytes(&self, value: Option<&ObjRef>) -> Result<(), Diagnostic> {
        self.dispatch::<Bytes>(value)
    }

    /// Zeroes the digits of a non-negative, non-shared integer.
    pub fn zero_integer(&self, value: Option<&ObjRef>) -> Result<(), Diagnostic> {
        self.dispatch::<Integer>(value)
    }

    fn dispatch<K: Kind>(&self, value: Option<&ObjRef>) -> Result<(), Diagnostic> {
        match self.wipe_code::<K>(value) {
            SUCCESS => Ok(()),
            code => Err(Diagnostic::from_code(K::KIND, code)),
        }
    }

    fn wipe_code<K: Kind>(&self, value: Option<&ObjRef>) -> u8 {
        let Some(value) = value else {
            log::debug!("null {} argument", K::KIND);
            return WipeError::NullReference.code();
        };

        let hold = Hold::acquire(value);
        let value = hold.value();

        if value.kind() != K::KIND {
            log::debug!("expected {}, got {}", K::KIND, describe(value));
            return WipeError::WrongKind.code();
        }

        if self.layout.is_err() {
            return WipeError::LayoutMismatch.code();
        }

        match Zeroizer::<K>::new(&self.table, &self.guard).zeroize(value) {
            Ok(report) => {
                log::debug!(
                    "zeroed {} ({} bytes)",
                    describe(value),
                    report.bytes_wiped
                );
                SUCCESS
            }
            Err(err) => err.code(),
        }
    }
}

impl Default for Expunger {
    fn default() -> Self {
        Self::reference()
    }
}
