// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use expunge_core::{ValueKind, WipeError};

use crate::diagnostic::{Category, Diagnostic};

#[test]
fn test_wrong_kind_message_names_expected_kind() {
    let text = Diagnostic::from_code(ValueKind::Text, WipeError::WrongKind.code());
    let bytes = Diagnostic::from_code(ValueKind::Bytes, WipeError::WrongKind.code());
    let integer = Diagnostic::from_code(ValueKind::Integer, WipeError::WrongKind.code());

    assert_eq!(text.message(), "argument isn't text type");
    assert_eq!(bytes.message(), "argument isn't bytes type");
    assert_eq!(integer.message(), "argument isn't integer type");
    assert_eq!(text.category(), Category::Value);
}

#[test]
fn test_known_codes() {
    let cases = [
        (WipeError::NullReference, Category::Value, "argument was null"),
        (WipeError::EmptyValue, Category::Value, "argument was of zero length"),
        (
            WipeError::SharedSingleton,
            Category::Value,
            "argument was a preallocated integer between 0 & 256",
        ),
        (WipeError::SignedValue, Category::Value, "argument was a signed integer"),
        (
            WipeError::SizeOverflow,
            Category::Overflow,
            "argument size overflows the wipe length",
        ),
    ];

    for (err, category, message) in cases {
        let diagnostic = Diagnostic::from_code(ValueKind::Integer, err.code());
        assert_eq!(diagnostic.category(), category);
        assert_eq!(diagnostic.message(), message);
        assert_eq!(diagnostic.error(), Some(err));
        assert_eq!(diagnostic.code(), err.code());
        assert_eq!(diagnostic.kind(), ValueKind::Integer);
        assert!(!diagnostic.is_warning());
    }
}

#[test]
fn test_layout_mismatch_is_value_error() {
    let diagnostic = Diagnostic::from_code(ValueKind::Text, WipeError::LayoutMismatch.code());
    assert_eq!(diagnostic.category(), Category::Value);
    assert_eq!(diagnostic.error(), Some(WipeError::LayoutMismatch));
}

#[test]
fn test_unknown_code_is_warning() {
    for code in [0u8, 8, 42, u8::MAX] {
        let diagnostic = Diagnostic::from_code(ValueKind::Bytes, code);
        assert!(diagnostic.is_warning());
        assert_eq!(diagnostic.category(), Category::Warning);
        assert_eq!(diagnostic.message(), "unknown zeroization failure");
        assert_eq!(diagnostic.error(), None);
    }
}

#[test]
fn test_display() {
    let diagnostic = Diagnostic::from_code(ValueKind::Text, WipeError::EmptyValue.code());
    assert_eq!(
        diagnostic.to_string(),
        "ValueError: argument was of zero length"
    );

    let overflow = Diagnostic::from_code(ValueKind::Text, WipeError::SizeOverflow.code());
    assert!(overflow.to_string().starts_with("OverflowError: "));

    let warning = Diagnostic::from_code(ValueKind::Text, 99);
    assert_eq!(warning.to_string(), "Warning: unknown zeroization failure");
}
