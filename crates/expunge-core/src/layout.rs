// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Versioned per-kind layout configuration.
//!
//! Header sizes and element widths are a property of the host's object
//! representation, not of any single instance. They are written down once
//! in a [`LayoutTable`] and then checked against the running host with
//! [`LayoutTable::validate`], instead of being inferred from sample objects
//! at load time.

use core::num::NonZeroUsize;

use crate::error::LayoutError;
use crate::kind::ValueKind;

/// How many bytes one payload element occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementWidth {
    /// Every instance of the kind uses the same width.
    Fixed(NonZeroUsize),
    /// Each instance reports its own width (compact text storage).
    PerInstance,
}

/// Geometry shared by every instance of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindLayout {
    /// Size of an empty instance: the fixed header plus the terminator.
    pub header_size: usize,
    /// Bytes per payload element.
    pub width: ElementWidth,
    /// Terminator bytes that follow the payload and are counted in
    /// `header_size` (1 for text and bytes, 0 for integers).
    pub terminator: usize,
}

impl KindLayout {
    /// Creates a layout description.
    pub const fn new(header_size: usize, width: ElementWidth, terminator: usize) -> Self {
        Self {
            header_size,
            width,
            terminator,
        }
    }

    /// Width of the narrowest instance, the one a probe measures.
    #[inline]
    pub const fn probe_width(&self) -> NonZeroUsize {
        match self.width {
            ElementWidth::Fixed(width) => width,
            ElementWidth::PerInstance => NonZeroUsize::MIN,
        }
    }

    /// Offset of the first payload byte from the object base.
    ///
    /// The terminator counted in `header_size` sits after the payload, so
    /// the payload starts `terminator` bytes before `header_size`.
    #[inline]
    pub const fn payload_offset(&self) -> usize {
        self.header_size.saturating_sub(self.terminator)
    }
}

/// Size probes a host answers so a [`LayoutTable`] can be checked.
pub trait HostIntrospect {
    /// Version of the host's object representation.
    fn layout_version(&self) -> u32;

    /// Size in bytes of a freshly constructed instance of `kind` holding
    /// `len` elements of the narrowest width, `None` if it cannot be built.
    fn instance_size(&self, kind: ValueKind, len: usize) -> Option<usize>;
}

fn probe<H: HostIntrospect + ?Sized>(
    host: &H,
    kind: ValueKind,
    len: usize,
) -> Result<usize, LayoutError> {
    host.instance_size(kind, len).ok_or_else(|| {
        log::error!("{kind} probe of {len} elements could not be built");
        LayoutError::ProbeFailed { kind, len }
    })
}

/// Explicit, versioned layout of every kind on one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTable {
    /// Host layout version this table describes.
    pub version: u32,
    /// Text layout.
    pub text: KindLayout,
    /// Byte-sequence layout.
    pub bytes: KindLayout,
    /// Integer layout.
    pub integer: KindLayout,
}

impl LayoutTable {
    /// Returns the layout of `kind`.
    #[inline]
    pub const fn get(&self, kind: ValueKind) -> &KindLayout {
        match kind {
            ValueKind::Text => &self.text,
            ValueKind::Bytes => &self.bytes,
            ValueKind::Integer => &self.integer,
        }
    }

    /// Checks every entry against probes taken on `host`.
    ///
    /// For each kind, the size of an empty instance must equal the
    /// configured header size and the size difference between a
    /// one-element and an empty instance must equal the configured width.
    pub fn validate<H: HostIntrospect + ?Sized>(&self, host: &H) -> Result<(), LayoutError> {
        let found = host.layout_version();
        if found != self.version {
            log::error!(
                "layout table version {} does not match host version {}",
                self.version,
                found
            );
            return Err(LayoutError::VersionMismatch {
                expected: self.version,
                found,
            });
        }

        for kind in ValueKind::ALL {
            let layout = self.get(kind);

            if layout.header_size < layout.terminator {
                return Err(LayoutError::TerminatorOutsideHeader {
                    kind,
                    header_size: layout.header_size,
                });
            }

            let empty = probe(host, kind, 0)?;
            if empty != layout.header_size {
                log::error!(
                    "{kind} header size {} does not match probed {empty}",
                    layout.header_size
                );
                return Err(LayoutError::HeaderMismatch {
                    kind,
                    configured: layout.header_size,
                    probed: empty,
                });
            }

            let probed = probe(host, kind, 1)?.saturating_sub(empty);
            let configured = layout.probe_width().get();
            if probed != configured {
                log::error!("{kind} element width {configured} does not match probed {probed}");
                return Err(LayoutError::WidthMismatch {
                    kind,
                    configured,
                    probed,
                });
            }
        }

        log::info!("layout table version {} validated", self.version);
        Ok(())
    }
}
