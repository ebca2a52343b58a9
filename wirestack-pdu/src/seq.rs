//! Serial number comparison for wrapping 32-bit counters (RFC 1982)

use std::cmp::Ordering;

// 2 ^ (SERIAL_BITS - 1)
const SERIAL_HALF: u32 = 1 << 31;

/// Compare two wrapping 32-bit sequence counters.
///
/// Ordering is circular: a counter that wrapped past `u32::MAX` is still
/// considered ahead of an older, numerically larger value as long as the
/// distance between them is less than half the number space.
pub fn seq_compare(lhs: u32, rhs: u32) -> Ordering {
    if lhs == rhs {
        return Ordering::Equal;
    }
    if lhs < rhs {
        if rhs - lhs < SERIAL_HALF {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    } else if lhs - rhs > SERIAL_HALF {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equal() {
        assert_eq!(seq_compare(5, 5), Ordering::Equal);
        assert_eq!(seq_compare(0, 0), Ordering::Equal);
        assert_eq!(seq_compare(u32::MAX, u32::MAX), Ordering::Equal);
    }

    #[test]
    fn test_numeric_order_without_wrap() {
        assert_eq!(seq_compare(1, 2), Ordering::Less);
        assert_eq!(seq_compare(2, 1), Ordering::Greater);
        // Distance of exactly 2^31 - 1 still compares numerically
        assert_eq!(seq_compare(1, 1 << 31), Ordering::Less);
    }

    #[test]
    fn test_wrap() {
        // The small value wrapped and is actually ahead
        assert_eq!(seq_compare(1, (1 << 31) + 1), Ordering::Greater);
        assert_eq!(seq_compare(0, u32::MAX), Ordering::Greater);
        assert_eq!(seq_compare(u32::MAX, 0), Ordering::Less);
        assert_eq!(seq_compare(u32::MAX, 10), Ordering::Less);
    }

    proptest! {
        #[test]
        fn prop_antisymmetric(a: u32, b: u32) {
            // RFC 1982 leaves the ordering of values exactly half the
            // space apart unresolved; skip that degenerate pair.
            prop_assume!(a.wrapping_sub(b) != 1 << 31);
            prop_assert_eq!(seq_compare(a, b), seq_compare(b, a).reverse());
        }

        #[test]
        fn prop_successor_is_greater(a: u32) {
            prop_assert_eq!(seq_compare(a.wrapping_add(1), a), Ordering::Greater);
        }
    }
}
