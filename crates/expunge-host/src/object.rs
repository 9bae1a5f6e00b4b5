// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Heap objects and the reference-counted handle that owns them.
//!
//! Every object is one allocation: a `#[repr(C)]` header followed by the
//! payload. Text and bytes end with a NUL terminator byte.
//!
//! ```text
//! text:    [ refcnt | tag | size | hash | width ][ len * width code units ][ 0 ]
//! bytes:   [ refcnt | tag | size | hash ]        [ len bytes ]             [ 0 ]
//! integer: [ refcnt | tag | size ]               [ |size| u32 digits ]
//! ```
//!
//! For integers the sign of `size` is the sign of the value.

use alloc::alloc::{Layout, alloc_zeroed, dealloc};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;
use core::mem::{align_of, size_of};
use core::ptr::NonNull;

use expunge_core::ValueKind;
use expunge_util::fast_zeroize_slice;

use crate::digits::{Digits, U64_DIGITS, from_digits};
use crate::error::HostError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Tag {
    Text = 1,
    Bytes = 2,
    Integer = 3,
}

impl Tag {
    pub(crate) const fn kind(self) -> ValueKind {
        match self {
            Tag::Text => ValueKind::Text,
            Tag::Bytes => ValueKind::Bytes,
            Tag::Integer => ValueKind::Integer,
        }
    }
}

#[repr(C)]
pub(crate) struct ObjectHeader {
    refcnt: Cell<usize>,
    tag: Tag,
}

// Headers are read through pointer casts to their prefix, so the prefix
// fields and the cached hash are never read by name.
#[repr(C)]
#[allow(dead_code)]
pub(crate) struct VarHeader {
    ob: ObjectHeader,
    size: isize,
}

#[repr(C)]
#[allow(dead_code)]
pub(crate) struct TextHeader {
    var: VarHeader,
    hash: usize,
    width: u8,
}

#[repr(C)]
#[allow(dead_code)]
pub(crate) struct BytesHeader {
    var: VarHeader,
    hash: usize,
}

#[repr(C)]
#[allow(dead_code)]
pub(crate) struct IntegerHeader {
    var: VarHeader,
}

/// Bytes before the payload of a text object.
pub(crate) const TEXT_FIXED: usize = size_of::<TextHeader>();
/// Bytes before the payload of a bytes object.
pub(crate) const BYTES_FIXED: usize = size_of::<BytesHeader>();
/// Bytes before the digits of an integer object.
pub(crate) const INTEGER_FIXED: usize = size_of::<IntegerHeader>();
/// Bytes per integer digit.
pub(crate) const DIGIT_SIZE: usize = size_of::<u32>();
/// NUL byte after text and bytes payloads.
pub(crate) const TERMINATOR: usize = 1;

const ALIGN: usize = align_of::<TextHeader>();

const fn fixed_size(tag: Tag) -> usize {
    match tag {
        Tag::Text => TEXT_FIXED,
        Tag::Bytes => BYTES_FIXED,
        Tag::Integer => INTEGER_FIXED,
    }
}

/// Total allocation size of an object with `len` elements of `width` bytes.
pub(crate) fn allocation_size(tag: Tag, len: usize, width: usize) -> Option<usize> {
    let (unit, terminator) = match tag {
        Tag::Text => (width, TERMINATOR),
        Tag::Bytes => (1, TERMINATOR),
        Tag::Integer => (DIGIT_SIZE, 0),
    };

    len.checked_mul(unit)?
        .checked_add(fixed_size(tag))?
        .checked_add(terminator)
}

fn object_layout(tag: Tag, len: usize, width: usize) -> Result<Layout, HostError> {
    let size = allocation_size(tag, len, width).ok_or(HostError::TooLarge { len })?;
    Layout::from_size_align(size, ALIGN).map_err(|_| HostError::TooLarge { len })
}

/// FNV-1a, cached in the header of text and bytes objects.
fn fnv1a(bytes: &[u8]) -> usize {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash as usize
}

/// Text payload in its narrowest fixed-width encoding.
///
/// A staging copy of the caller's text; cleared when dropped.
pub(crate) struct EncodedText {
    pub(crate) width: u8,
    pub(crate) len: usize,
    pub(crate) units: Vec<u8>,
}

impl EncodedText {
    /// Zeroes the code units, keeping their length.
    pub(crate) fn scrub(&mut self) {
        fast_zeroize_slice(&mut self.units);
    }
}

impl Drop for EncodedText {
    fn drop(&mut self) {
        self.scrub();
    }
}

/// Encodes `s` with 1, 2 or 4 bytes per character, whichever is the
/// narrowest width that holds its largest code point.
pub(crate) fn encode_text(s: &str) -> EncodedText {
    let max = s.chars().map(u32::from).max().unwrap_or(0);
    let width: u8 = match max {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        _ => 4,
    };

    let mut units = Vec::with_capacity(s.len() * usize::from(width));
    let mut len = 0;
    for c in s.chars() {
        let code = u32::from(c);
        match width {
            1 => units.push(code as u8),
            2 => units.extend_from_slice(&(code as u16).to_ne_bytes()),
            _ => units.extend_from_slice(&code.to_ne_bytes()),
        }
        len += 1;
    }

    EncodedText { width, len, units }
}

/// Owning, reference-counted handle to a heap object.
///
/// Cloning increments the object's reference count and dropping
/// decrements it; the last drop frees the allocation. Handles are neither
/// `Send` nor `Sync`: the heap is single-threaded.
pub struct ObjRef {
    ptr: NonNull<ObjectHeader>,
}

impl ObjRef {
    fn allocate(tag: Tag, size: isize, width: u8, payload: &[u8]) -> Result<Self, HostError> {
        let len = size.unsigned_abs();
        let layout = object_layout(tag, len, usize::from(width))?;
        let fixed = fixed_size(tag);
        debug_assert!(fixed + payload.len() <= layout.size());

        // Safety: headers are never zero-sized, so neither is `layout`.
        let base = NonNull::new(unsafe { alloc_zeroed(layout) }).ok_or(HostError::OutOfMemory {
            size: layout.size(),
        })?;

        let var = VarHeader {
            ob: ObjectHeader {
                refcnt: Cell::new(1),
                tag,
            },
            size,
        };

        // Safety: `base` is a fresh allocation of `layout.size()` bytes,
        // aligned for every header, and `fixed + payload.len()` fits in it.
        // The terminator byte is already zero.
        unsafe {
            match tag {
                Tag::Text => base.cast::<TextHeader>().as_ptr().write(TextHeader {
                    var,
                    hash: fnv1a(payload),
                    width,
                }),
                Tag::Bytes => base.cast::<BytesHeader>().as_ptr().write(BytesHeader {
                    var,
                    hash: fnv1a(payload),
                }),
                Tag::Integer => base
                    .cast::<IntegerHeader>()
                    .as_ptr()
                    .write(IntegerHeader { var }),
            }
            core::ptr::copy_nonoverlapping(
                payload.as_ptr(),
                base.as_ptr().add(fixed),
                payload.len(),
            );
        }

        log::trace!("allocated {} object of {} bytes", tag.kind(), layout.size());

        Ok(Self { ptr: base.cast() })
    }

    pub(crate) fn alloc_text(s: &str) -> Result<Self, HostError> {
        let encoded = encode_text(s);
        let size = isize::try_from(encoded.len).map_err(|_| HostError::TooLarge {
            len: encoded.len,
        })?;
        Self::allocate(Tag::Text, size, encoded.width, &encoded.units)
    }

    pub(crate) fn alloc_bytes(bytes: &[u8]) -> Result<Self, HostError> {
        let size = isize::try_from(bytes.len()).map_err(|_| HostError::TooLarge {
            len: bytes.len(),
        })?;
        Self::allocate(Tag::Bytes, size, 1, bytes)
    }

    /// Integer object holding exactly `digits`; an empty slice is allowed
    /// here so size probes can measure the bare header.
    pub(crate) fn alloc_integer(negative: bool, digits: &[u32]) -> Result<Self, HostError> {
        let count = isize::try_from(digits.len()).map_err(|_| HostError::TooLarge {
            len: digits.len(),
        })?;
        let size = if negative { -count } else { count };

        let mut payload = Vec::with_capacity(digits.len() * DIGIT_SIZE);
        for digit in digits {
            payload.extend_from_slice(&digit.to_ne_bytes());
        }

        let object = Self::allocate(Tag::Integer, size, 1, &payload);
        fast_zeroize_slice(&mut payload);
        object
    }

    fn header(&self) -> &ObjectHeader {
        // Safety: `ptr` points at a live object for as long as `self` exists.
        unsafe { self.ptr.as_ref() }
    }

    fn var(&self) -> &VarHeader {
        // Safety: every object starts with a `VarHeader`.
        unsafe { self.ptr.cast::<VarHeader>().as_ref() }
    }

    fn text_header(&self) -> Option<&TextHeader> {
        // Safety: the tag says the object starts with a `TextHeader`.
        (self.tag() == Tag::Text).then(|| unsafe { self.ptr.cast::<TextHeader>().as_ref() })
    }

    pub(crate) fn tag(&self) -> Tag {
        self.header().tag
    }

    pub(crate) fn base(&self) -> NonNull<u8> {
        self.ptr.cast()
    }

    pub(crate) fn signed_size(&self) -> isize {
        self.var().size
    }

    fn payload_ptr(&self) -> *const u8 {
        // Safety: the payload starts right after the fixed header, inside
        // the allocation.
        unsafe { self.base().as_ptr().add(fixed_size(self.tag())) }
    }

    fn payload_len(&self) -> usize {
        match self.tag() {
            Tag::Text => self.len() * self.char_width(),
            Tag::Bytes => self.len(),
            Tag::Integer => self.len() * DIGIT_SIZE,
        }
    }

    /// Copies the payload (without terminator) out of the object.
    fn payload_bytes(&self) -> Vec<u8> {
        // Safety: `payload_len` bytes at `payload_ptr` belong to the object.
        unsafe { core::slice::from_raw_parts(self.payload_ptr(), self.payload_len()) }.to_vec()
    }

    /// Kind of the referenced value.
    pub fn kind(&self) -> ValueKind {
        self.tag().kind()
    }

    /// Number of live handles to this object.
    pub fn refcount(&self) -> usize {
        self.header().refcnt.get()
    }

    /// Whether both handles refer to the same object.
    pub fn is(&self, other: &ObjRef) -> bool {
        self.ptr == other.ptr
    }

    /// Element count: characters, bytes, or integer digits.
    pub fn len(&self) -> usize {
        self.signed_size().unsigned_abs()
    }

    /// Whether the element count is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per character for text, 1 for everything else.
    pub fn char_width(&self) -> usize {
        self.text_header().map_or(1, |h| usize::from(h.width))
    }

    /// Size of the whole allocation in bytes, header included.
    pub fn sizeof(&self) -> usize {
        allocation_size(self.tag(), self.len(), self.char_width()).unwrap_or(0)
    }

    /// Copy of every byte of the allocation, header included.
    pub fn object_bytes(&self) -> Vec<u8> {
        // Safety: the allocation is `sizeof()` bytes long.
        unsafe { core::slice::from_raw_parts(self.base().as_ptr(), self.sizeof()) }.to_vec()
    }

    /// Decodes a text object, `None` for other kinds.
    pub fn as_text(&self) -> Option<String> {
        let width = self.text_header()?.width;
        let units = self.payload_bytes();

        let text = units
            .chunks_exact(usize::from(width))
            .map(|unit| {
                let code = match *unit {
                    [a] => u32::from(a),
                    [a, b] => u32::from(u16::from_ne_bytes([a, b])),
                    [a, b, c, d] => u32::from_ne_bytes([a, b, c, d]),
                    _ => u32::from(char::REPLACEMENT_CHARACTER),
                };
                char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect();

        Some(text)
    }

    /// Copies a bytes object's payload, `None` for other kinds.
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        (self.tag() == Tag::Bytes).then(|| self.payload_bytes())
    }

    /// Little-endian base 2^30 digits of an integer, `None` for other kinds.
    pub fn digits(&self) -> Option<Vec<u32>> {
        if self.tag() != Tag::Integer {
            return None;
        }

        let digits = self
            .payload_bytes()
            .chunks_exact(DIGIT_SIZE)
            .map(|d| u32::from_ne_bytes([d[0], d[1], d[2], d[3]]))
            .collect();

        Some(digits)
    }

    /// The digits of an integer short enough to fit in a `u64`, `None`
    /// otherwise.
    pub(crate) fn first_digits_if_small(&self) -> Option<Digits> {
        if self.len() > U64_DIGITS {
            return None;
        }

        let mut digits = Digits::new();
        for i in 0..self.len() {
            // Safety: `i < len`, so the digit lies inside the allocation.
            let digit = unsafe { self.payload_ptr().cast::<u32>().add(i).read_unaligned() };
            digits.push(digit);
        }

        Some(digits)
    }

    /// Integer value when it fits in an `i128`.
    pub fn to_i128(&self) -> Option<i128> {
        let magnitude = from_digits(&self.digits()?)?;

        if self.signed_size() < 0 {
            if magnitude == 1u128 << 127 {
                Some(i128::MIN)
            } else {
                i128::try_from(magnitude).ok().map(|m| -m)
            }
        } else {
            i128::try_from(magnitude).ok()
        }
    }
}

impl Clone for ObjRef {
    fn clone(&self) -> Self {
        let refcnt = &self.header().refcnt;
        refcnt.set(refcnt.get() + 1);

        Self { ptr: self.ptr }
    }
}

impl Drop for ObjRef {
    fn drop(&mut self) {
        let refcnt = &self.header().refcnt;
        let remaining = refcnt.get() - 1;
        refcnt.set(remaining);

        if remaining > 0 {
            return;
        }

        // The layout was valid when the object was allocated.
        if let Ok(layout) = object_layout(self.tag(), self.len(), self.char_width()) {
            log::trace!("freeing {} object of {} bytes", self.kind(), layout.size());
            // Safety: last handle; allocated with this exact layout.
            unsafe { dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjRef")
            .field("kind", &self.kind())
            .field("len", &self.len())
            .field("refcount", &self.refcount())
            .finish_non_exhaustive()
    }
}
