use rust_decimal::Decimal;

use crate::modules::enterprise_fees::EnterpriseFee;
use crate::modules::products::{Variant, VariantOverride};

/// Estimates what a subscription line item will cost once an order is
/// placed for it.
///
/// Subscription screens preview charges before any order exists, so the
/// estimate applies the per-item fees the order cycle would charge on top
/// of the hub's price for the variant. Per-order fees are left out: they
/// depend on the eventual order composition.
pub struct SubscriptionPriceEstimator;

impl SubscriptionPriceEstimator {
    /// Estimated unit price: hub price plus per-item fees computed on it
    pub fn estimate_item_price(
        variant: &Variant,
        variant_override: Option<&VariantOverride>,
        fees: &[&EnterpriseFee],
    ) -> Decimal {
        let base = match variant_override {
            Some(vo) => vo.price_for(variant),
            None => variant.price,
        };

        let fee_total: Decimal = fees
            .iter()
            .filter(|fee| fee.calculator().is_per_item())
            .map(|fee| fee.compute(base, 1, variant.weight))
            .sum();

        base + fee_total
    }
}
