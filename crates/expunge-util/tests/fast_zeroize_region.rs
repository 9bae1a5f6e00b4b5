// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#[cfg(test)]
mod fast_zeroize_region_tests {
    use expunge_util::{
        fast_zeroize_region, fast_zeroize_slice, fill_bytes_with_pattern, is_region_zeroized,
        is_slice_zeroized,
    };

    #[test]
    fn test_fast_zeroize_region_zeros_all_bytes() {
        let mut data = vec![0xABu8; 1024];
        unsafe { fast_zeroize_region(data.as_mut_ptr(), data.len()) };
        assert!(is_slice_zeroized(&data));
    }

    #[test]
    fn test_fast_zeroize_region_zero_len_is_noop() {
        let mut data = vec![0xFFu8; 4];
        unsafe { fast_zeroize_region(data.as_mut_ptr(), 0) };
        assert_eq!(data, vec![0xFF; 4]);

        // Null is never dereferenced for an empty region
        unsafe { fast_zeroize_region(core::ptr::null_mut(), 0) };
    }

    #[test]
    fn test_fast_zeroize_region_leaves_neighbours_untouched() {
        let mut data = vec![0x11u8; 32];
        unsafe { fast_zeroize_region(data.as_mut_ptr().add(8), 16) };

        assert!(data[..8].iter().all(|&b| b == 0x11));
        assert!(is_slice_zeroized(&data[8..24]));
        assert!(data[24..].iter().all(|&b| b == 0x11));
    }

    #[test]
    fn test_is_region_zeroized_detects_single_byte() {
        let mut data = vec![0u8; 64];
        assert!(unsafe { is_region_zeroized(data.as_ptr(), data.len()) });

        data[63] = 1;
        assert!(!unsafe { is_region_zeroized(data.as_ptr(), data.len()) });
        assert!(unsafe { is_region_zeroized(data.as_ptr(), 63) });
    }

    #[test]
    fn test_fast_zeroize_slice_wide_elements() {
        let mut data = vec![0xDEADBEEFu32; 16];
        fast_zeroize_slice(&mut data);
        assert!(data.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_fill_then_zeroize() {
        let mut data = [0u8; 12];
        fill_bytes_with_pattern(&mut data, 0x5A);
        assert!(!is_slice_zeroized(&data));

        fast_zeroize_slice(&mut data);
        assert!(is_slice_zeroized(&data));
    }
}
