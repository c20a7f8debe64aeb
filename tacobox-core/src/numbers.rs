//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Apply a signed delta to a quantity, flooring at 1 and saturating at `u32::MAX`.
#[must_use]
pub fn apply_quantity_delta(current: u32, delta: i32) -> u32 {
    let next = i64::from(current) + i64::from(delta);
    let clamped = next.clamp(1, i64::from(u32::MAX));
    cast::<i64, u32>(clamped).unwrap_or(1)
}

/// Multiply a unit price by a quantity without overflowing.
#[must_use]
pub fn line_total_cents(price_cents: u32, quantity: u32) -> u64 {
    u64::from(price_cents).saturating_mul(u64::from(quantity))
}

/// Convert a collection length to a step ordinal, clamping to `u32::MAX`.
#[must_use]
pub fn usize_to_u32(value: usize) -> u32 {
    cast::<usize, u32>(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_delta_floors_at_one() {
        assert_eq!(apply_quantity_delta(1, -100), 1);
        assert_eq!(apply_quantity_delta(3, -2), 1);
        assert_eq!(apply_quantity_delta(1, i32::MIN), 1);
    }

    #[test]
    fn quantity_delta_saturates_at_max() {
        assert_eq!(apply_quantity_delta(u32::MAX, 5), u32::MAX);
        assert_eq!(apply_quantity_delta(2, 3), 5);
    }

    #[test]
    fn line_total_does_not_overflow() {
        assert_eq!(line_total_cents(300, 3), 900);
        assert_eq!(
            line_total_cents(u32::MAX, u32::MAX),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn usize_conversion_clamps() {
        assert_eq!(usize_to_u32(5), 5);
    }
}
