// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use super::doubles::{
    BYTES_HEADER, FakeValue, INTEGER_HEADER, PAYLOAD_FILL, TEXT_HEADER, table,
};
use crate::{ValueHandle, ValueKind, resolve_payload};

#[test]
fn test_resolve_text_uses_instance_width() {
    let value = FakeValue::text(5, 2);
    let payload = resolve_payload(&value, &table().text);

    let base = value.base_address().as_ptr();
    assert_eq!(payload.address(), base.wrapping_add(TEXT_HEADER - 1));
    assert_eq!(payload.length(), 5);
    assert_eq!(payload.element_width().get(), 2);
    assert_eq!(payload.terminator(), 1);
}

#[test]
fn test_resolve_bytes() {
    let value = FakeValue::bytes(10);
    let payload = resolve_payload(&value, &table().bytes);

    let base = value.base_address().as_ptr();
    assert_eq!(payload.address(), base.wrapping_add(BYTES_HEADER - 1));
    assert_eq!(payload.length(), 10);
    assert_eq!(payload.element_width().get(), 1);
    assert_eq!(payload.terminator(), 1);
}

#[test]
fn test_resolve_integer_has_no_terminator() {
    let value = FakeValue::integer(3, false, None);
    let payload = resolve_payload(&value, &table().integer);

    let base = value.base_address().as_ptr();
    assert_eq!(payload.address(), base.wrapping_add(INTEGER_HEADER));
    assert_eq!(payload.length(), 3);
    assert_eq!(payload.element_width().get(), 4);
    assert_eq!(payload.terminator(), 0);
}

#[test]
fn test_resolve_points_at_first_payload_byte() {
    let value = FakeValue::bytes(4);
    let payload = resolve_payload(&value, &table().bytes);

    assert_eq!(unsafe { *payload.address() }, PAYLOAD_FILL);
    assert_eq!(value.kind(), ValueKind::Bytes);
}

#[test]
fn test_resolve_is_side_effect_free() {
    let value = FakeValue::text(7, 4);
    let before = value.snapshot();

    let first = resolve_payload(&value, &table().text);
    let second = resolve_payload(&value, &table().text);

    assert_eq!(first, second);
    assert_eq!(value.snapshot(), before);
}
