// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Payload geometry. All address arithmetic of the engine lives here.

use core::num::NonZeroUsize;

use crate::handle::ValueHandle;
use crate::layout::{ElementWidth, KindLayout};

/// Where a value's payload lives and how large it is.
///
/// Only [`resolve_payload`] builds one, so a `Payload` always describes a
/// region inside the object its handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    address: *mut u8,
    length: usize,
    element_width: NonZeroUsize,
    terminator: usize,
}

impl Payload {
    /// Address of the first payload byte.
    #[inline]
    pub fn address(&self) -> *mut u8 {
        self.address
    }

    /// Element count.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Bytes per element.
    #[inline]
    pub fn element_width(&self) -> NonZeroUsize {
        self.element_width
    }

    /// Terminator bytes following the payload.
    #[inline]
    pub fn terminator(&self) -> usize {
        self.terminator
    }
}

/// Computes the payload geometry of `handle` under `layout`.
///
/// The address is `base + header_size - terminator`: the configured header
/// size of text and bytes includes their one-byte terminator, which sits
/// after the payload rather than before it.
///
/// Pure: nothing is dereferenced.
pub fn resolve_payload<H: ValueHandle + ?Sized>(handle: &H, layout: &KindLayout) -> Payload {
    let element_width = match layout.width {
        ElementWidth::Fixed(width) => width,
        ElementWidth::PerInstance => handle.char_width(),
    };

    let address = handle
        .base_address()
        .as_ptr()
        .wrapping_add(layout.payload_offset());

    let payload = Payload {
        address,
        length: handle.length(),
        element_width,
        terminator: layout.terminator,
    };

    log::trace!(
        "{} payload at {:p}: {} x {} bytes + {}",
        handle.kind(),
        payload.address,
        payload.length,
        payload.element_width,
        payload.terminator
    );

    payload
}
