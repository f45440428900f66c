//! Key comparison helpers for the byte-string key case.

use bytes::Bytes;
use std::cmp::Ordering;

/// Key comparison using a u64 prefix for 8+ byte keys.
/// Falls back to slice comparison for shorter keys or when the prefix matches.
#[inline(always)]
pub fn compare_keys(a: &[u8], b: &[u8]) -> Ordering {
    // For 8+ byte keys, compare first 8 bytes as u64 (big-endian for sort order)
    if a.len() >= 8 && b.len() >= 8 {
        let a_prefix = u64::from_be_bytes([a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7]]);
        let b_prefix = u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]);
        if a_prefix != b_prefix {
            return a_prefix.cmp(&b_prefix);
        }
        // Prefix matched, compare remaining bytes
        if a.len() == 8 && b.len() == 8 {
            return Ordering::Equal;
        }
    }
    a.cmp(b)
}

/// Ready-made comparator for [`Bytes`] keys, the canonical key type when
/// the index backs a key-value store.
#[inline]
pub fn bytes_comparator() -> impl Fn(&Bytes, &Bytes) -> Ordering {
    |a: &Bytes, b: &Bytes| compare_keys(a.as_ref(), b.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_keys_short() {
        assert_eq!(compare_keys(b"abc", b"abd"), Ordering::Less);
        assert_eq!(compare_keys(b"abc", b"abc"), Ordering::Equal);
        assert_eq!(compare_keys(b"b", b"a"), Ordering::Greater);
        assert_eq!(compare_keys(b"", b"a"), Ordering::Less);
    }

    #[test]
    fn test_compare_keys_prefix_fast_path() {
        // 8+ byte keys with different prefixes
        assert_eq!(compare_keys(b"aaaaaaaa1", b"aaaaaaab0"), Ordering::Less);
        // Same prefix, decided by the tail
        assert_eq!(compare_keys(b"aaaaaaaa1", b"aaaaaaaa2"), Ordering::Less);
        assert_eq!(compare_keys(b"aaaaaaaa", b"aaaaaaaa"), Ordering::Equal);
        // Same prefix, shorter key sorts first
        assert_eq!(compare_keys(b"aaaaaaaa", b"aaaaaaaa1"), Ordering::Less);
    }

    #[test]
    fn test_compare_keys_matches_slice_order() {
        let keys: [&[u8]; 5] = [b"", b"a", b"aaaaaaaa", b"aaaaaaaa1", b"b"];
        for (i, a) in keys.iter().enumerate() {
            for (j, b) in keys.iter().enumerate() {
                assert_eq!(compare_keys(a, b), i.cmp(&j), "{a:?} vs {b:?}");
            }
        }
    }
}
