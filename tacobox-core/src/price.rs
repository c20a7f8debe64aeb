//! Euro price labels. All amounts are integer cents to avoid floating-point drift.

/// Format an amount as a euro label with two decimals, e.g. `5.50 €`.
#[must_use]
pub fn format_price(cents: u64) -> String {
    format!("{}.{:02} €", cents / 100, cents % 100)
}

/// Format a unit price as the add-on label shown on item cards, e.g. `+1.50 €`.
#[must_use]
pub fn format_addon(price_cents: u32) -> String {
    format!("+{}", format_price(u64::from(price_cents)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fractional_amounts() {
        assert_eq!(format_price(0), "0.00 €");
        assert_eq!(format_price(550), "5.50 €");
        assert_eq!(format_price(5), "0.05 €");
        assert_eq!(format_price(1_200), "12.00 €");
    }

    #[test]
    fn addon_label_is_signed() {
        assert_eq!(format_addon(150), "+1.50 €");
    }
}
