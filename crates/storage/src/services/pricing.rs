use rust_decimal::Decimal;

/// Flat entry fee charged per category. Placeholder pricing model: the fee
/// is a fixed unit price times the category count, not read from the
/// pageant's own per-category prices.
pub const ENTRY_FEE_PER_CATEGORY: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

pub fn fee_for_categories(category_count: usize) -> Decimal {
    ENTRY_FEE_PER_CATEGORY * Decimal::from(category_count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_scales_with_category_count() {
        assert_eq!(fee_for_categories(1), Decimal::from(5));
        assert_eq!(fee_for_categories(3), Decimal::from(15));
        assert_eq!(fee_for_categories(0), Decimal::ZERO);
    }
}
