// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use expunge_core::{
    BytesZeroizer, IntegerZeroizer, SingletonGuard, TextZeroizer, ValueHandle, ValueKind,
    WipeError, resolve_payload,
};
use expunge_util::is_slice_zeroized;

use crate::object::{INTEGER_FIXED, TEXT_FIXED};
use crate::{Runtime, layout_table};

fn runtime() -> Runtime {
    Runtime::new().expect("Failed to Runtime::new()")
}

#[test]
fn test_handle_reports_object_metadata() {
    let rt = runtime();

    let text = rt.text("Ωmega").expect("Failed to text(..)");
    assert_eq!(ValueHandle::kind(&text), ValueKind::Text);
    assert_eq!(text.length(), 5);
    assert_eq!(ValueHandle::char_width(&text).get(), 2);
    assert!(!text.is_negative());
    assert_eq!(text.small_magnitude(), None);

    let negative = rt.int(-100_000).expect("Failed to int(..)");
    assert!(negative.is_negative());
    assert_eq!(negative.small_magnitude(), Some(100_000));

    let wide = rt.int(1 << 62).expect("Failed to int(..)");
    assert_eq!(wide.length(), 3);
    assert_eq!(wide.small_magnitude(), Some(1 << 62));

    let max = rt.int(i128::from(u64::MAX)).expect("Failed to int(..)");
    assert_eq!(max.small_magnitude(), Some(u64::MAX));

    let huge = rt.int(1 << 100).expect("Failed to int(..)");
    assert_eq!(huge.length(), 4);
    assert_eq!(huge.small_magnitude(), None);
}

#[test]
fn test_resolved_text_payload_starts_after_header() {
    let rt = runtime();
    let text = rt.text("abc").expect("Failed to text(..)");

    let payload = resolve_payload(&text, &layout_table().text);
    let offset = payload.address() as usize - text.base_address().as_ptr() as usize;

    assert_eq!(offset, TEXT_FIXED);
    assert_eq!(unsafe { *payload.address() }, b'a');
}

#[test]
fn test_wipe_text_keeps_header() {
    let rt = runtime();
    let table = layout_table();
    let guard = SingletonGuard::new();

    let text = rt.text("パスワード").expect("Failed to text(..)");
    let alias = text.clone();
    let before = text.object_bytes();

    let report = TextZeroizer::new(&table, &guard)
        .zeroize(&text)
        .expect("Failed to zeroize(..)");

    let after = alias.object_bytes();
    assert_eq!(report.bytes_wiped, 5 * 2 + 1);
    assert_eq!(&after[..TEXT_FIXED], &before[..TEXT_FIXED]);
    assert!(is_slice_zeroized(&after[TEXT_FIXED..]));
    assert_eq!(alias.as_text().as_deref(), Some("\0\0\0\0\0"));
}

#[test]
fn test_wipe_bytes() {
    let rt = runtime();
    let table = layout_table();
    let guard = SingletonGuard::new();

    let bytes = rt.bytes(b"secret-key").expect("Failed to bytes(..)");
    BytesZeroizer::new(&table, &guard)
        .zeroize(&bytes)
        .expect("Failed to zeroize(..)");

    assert_eq!(bytes.as_bytes(), Some(vec![0u8; 10]));
}

#[test]
fn test_wipe_large_integer_digits() {
    let rt = runtime();
    let table = layout_table();
    let guard = SingletonGuard::new();

    let integer = rt.int(1 << 70).expect("Failed to int(..)");
    let before = integer.object_bytes();

    IntegerZeroizer::new(&table, &guard)
        .zeroize(&integer)
        .expect("Failed to zeroize(..)");

    let after = integer.object_bytes();
    assert_eq!(&after[..INTEGER_FIXED], &before[..INTEGER_FIXED]);
    assert_eq!(integer.digits(), Some(vec![0, 0, 0]));
}

#[test]
fn test_cached_integers_are_never_wiped() {
    let rt = runtime();
    let table = layout_table();
    let guard = SingletonGuard::new();
    let zeroizer = IntegerZeroizer::new(&table, &guard);

    for value in 0..=256 {
        let shared = rt.int(value).expect("Failed to int(..)");
        assert_eq!(zeroizer.zeroize(&shared), Err(WipeError::SharedSingleton));
        assert_eq!(rt.int(value).expect("Failed to int(..)").to_i128(), Some(value));
    }

    for value in -5..0 {
        let shared = rt.int(value).expect("Failed to int(..)");
        assert_eq!(zeroizer.zeroize(&shared), Err(WipeError::SignedValue));
        assert_eq!(shared.to_i128(), Some(value));
    }
}
