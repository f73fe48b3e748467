use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::enterprise_fees::{Enterprise, EnterpriseFee};
use crate::modules::orders::models::{
    Adjustable, Adjustment, LineItem, Order, Originator, ShippingMethod,
};
use crate::modules::taxes::TaxTable;

/// Recomputes every engine-owned adjustment on an order.
///
/// Invoked by the application layer whenever line items, the shipping
/// selection or the distribution (distributor / order cycle) change. The
/// pass is idempotent: with no intervening mutation it rebuilds the same
/// adjustment set, labels, amounts and tax breakdowns.
///
/// Open adjustments originated by fees, shipping or tax rates are dropped
/// and rebuilt; closed adjustments and manual entries pass through
/// untouched.
pub struct OrderAdjustmentRecalculator<'a> {
    enterprises: &'a [Enterprise],
    fees: &'a [EnterpriseFee],
    shipping_methods: &'a [ShippingMethod],
    taxes: &'a TaxTable,
}

impl<'a> OrderAdjustmentRecalculator<'a> {
    pub fn new(
        enterprises: &'a [Enterprise],
        fees: &'a [EnterpriseFee],
        shipping_methods: &'a [ShippingMethod],
        taxes: &'a TaxTable,
    ) -> Self {
        Self {
            enterprises,
            fees,
            shipping_methods,
            taxes,
        }
    }

    pub fn recalculate(&self, order: &mut Order) -> Result<()> {
        info!(
            order = %order.number,
            line_items = order.line_items.len(),
            "Recalculating order adjustments"
        );

        // Canceled orders keep only what cancellation left behind
        if order.is_canceled() {
            order.update_totals();
            return Ok(());
        }

        order.adjustments.retain(|a| !a.is_open() || a.is_manual());
        for item in &mut order.line_items {
            item.included_tax = Decimal::ZERO;
        }

        // Closed adjustments are frozen history: their originators are not
        // recomputed, even if the source fee or rate has changed since
        let frozen: HashSet<Originator> = order
            .adjustments
            .iter()
            .filter(|a| !a.is_open())
            .map(|a| a.originator)
            .collect();

        let tax_zone = order.tax_zone_id();
        let mut rebuilt: Vec<Adjustment> = Vec::new();

        self.apply_enterprise_fees(order, tax_zone, &mut rebuilt);
        let shipping_missing = self.apply_shipping(order, tax_zone, &mut rebuilt);
        self.apply_line_item_taxes(order, tax_zone, &mut rebuilt);

        rebuilt.retain(|a| !frozen.contains(&a.originator));

        debug!(
            order = %order.number,
            rebuilt = rebuilt.len(),
            "Rebuilt engine-owned adjustments"
        );

        order.adjustments.extend(rebuilt);
        order.update_totals();

        if shipping_missing {
            return Err(AppError::MissingShippingMethod);
        }

        Ok(())
    }

    /// Supplier fees per matching line item in their incoming exchange,
    /// distributor fees per line item, coordinator fees once per order
    fn apply_enterprise_fees(
        &self,
        order: &Order,
        tax_zone: Option<Uuid>,
        rebuilt: &mut Vec<Adjustment>,
    ) {
        let Some(cycle) = order.order_cycle.as_ref() else {
            return;
        };

        for exchange in cycle.incoming_exchanges() {
            for fee_id in &exchange.enterprise_fee_ids {
                let Some(fee) = self.fee(*fee_id) else { continue };
                for item in &order.line_items {
                    if item.supplier_id == fee.enterprise_id
                        && exchange.variant_ids.contains(&item.variant_id)
                    {
                        self.apply_fee_to_line(fee, "supplier", item, tax_zone, rebuilt);
                    }
                }
            }
        }

        if let Some(distributor_id) = order.distributor_id {
            if let Some(exchange) = cycle.outgoing_exchange_for(distributor_id) {
                for fee_id in &exchange.enterprise_fee_ids {
                    let Some(fee) = self.fee(*fee_id) else { continue };
                    for item in &order.line_items {
                        self.apply_fee_to_line(fee, "distributor", item, tax_zone, rebuilt);
                    }
                }
            }
        }

        let item_total: Decimal = order.line_items.iter().map(|li| li.amount()).sum();
        for fee_id in &cycle.coordinator_fee_ids {
            let Some(fee) = self.fee(*fee_id) else { continue };
            let amount = fee.compute(item_total, order.total_quantity(), order.total_weight());
            let mut adjustment = Adjustment::new(
                fee.label("coordinator", self.enterprise_name(fee.enterprise_id)),
                amount,
                Originator::EnterpriseFee(fee.id),
                Adjustable::Order,
            );
            // a per-order fee has no product to inherit a category from
            adjustment.tax_category_id = fee.tax_category_for(None);
            self.apply_tax(&mut adjustment, tax_zone, rebuilt);
            rebuilt.push(adjustment);
        }
    }

    fn apply_fee_to_line(
        &self,
        fee: &EnterpriseFee,
        role: &str,
        item: &LineItem,
        tax_zone: Option<Uuid>,
        rebuilt: &mut Vec<Adjustment>,
    ) {
        let amount = fee.compute(item.amount(), item.quantity as u32, item.total_weight());
        let mut adjustment = Adjustment::new(
            fee.label(role, self.enterprise_name(fee.enterprise_id)),
            amount,
            Originator::EnterpriseFee(fee.id),
            Adjustable::LineItem(item.id),
        );
        adjustment.tax_category_id = fee.tax_category_for(item.tax_category_id);
        self.apply_tax(&mut adjustment, tax_zone, rebuilt);
        rebuilt.push(adjustment);
    }

    /// The shipping adjustment reuses the cost captured at selection time;
    /// it is never re-derived from the method's calculator here, so a
    /// changed offering cannot move a historical selection. Returns whether
    /// a required shipping method is missing.
    fn apply_shipping(
        &self,
        order: &Order,
        tax_zone: Option<Uuid>,
        rebuilt: &mut Vec<Adjustment>,
    ) -> bool {
        let Some(shipment) = order.shipment() else {
            return order.requires_shipping();
        };

        let method = self
            .shipping_methods
            .iter()
            .find(|m| m.id == shipment.shipping_method_id);

        let label = method
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "Shipping".to_string());

        let mut adjustment = Adjustment::new(
            label,
            shipment.cost,
            Originator::ShippingMethod(shipment.shipping_method_id),
            Adjustable::Order,
        );
        adjustment.tax_category_id = method.and_then(|m| m.tax_category_id);
        self.apply_tax(&mut adjustment, tax_zone, rebuilt);
        rebuilt.push(adjustment);

        false
    }

    /// Included rates fill each line's included_tax; added rates produce one
    /// order-level tax adjustment per rate
    fn apply_line_item_taxes(
        &self,
        order: &mut Order,
        tax_zone: Option<Uuid>,
        rebuilt: &mut Vec<Adjustment>,
    ) {
        let Some(zone) = tax_zone else {
            return;
        };

        let rates: Vec<_> = self.taxes.rates_in_zone(zone).cloned().collect();
        for rate in rates {
            let mut added_total = Decimal::ZERO;

            for item in &mut order.line_items {
                if item.tax_category_id != Some(rate.tax_category_id) {
                    continue;
                }

                let portion = rate.tax_portion(item.amount());
                if rate.included_in_price {
                    item.included_tax += portion;
                } else {
                    added_total += portion;
                }
            }

            if !added_total.is_zero() {
                let mut adjustment = Adjustment::new(
                    rate.label(),
                    added_total,
                    Originator::TaxRate(rate.id),
                    Adjustable::Order,
                );
                adjustment.tax_category_id = Some(rate.tax_category_id);
                rebuilt.push(adjustment);
            }
        }
    }

    /// Attach the applicable tax to a fee or shipping adjustment: included
    /// rates split the tax out of the amount, added rates hang a tax
    /// sub-adjustment off it
    fn apply_tax(
        &self,
        adjustment: &mut Adjustment,
        tax_zone: Option<Uuid>,
        rebuilt: &mut Vec<Adjustment>,
    ) {
        let Some(zone) = tax_zone else {
            return;
        };
        let Some(rate) = self.taxes.rate_for(zone, adjustment.tax_category_id) else {
            return;
        };

        if rate.included_in_price {
            adjustment.included_tax = rate.tax_portion(adjustment.amount);
        } else {
            let mut tax = Adjustment::new(
                rate.label(),
                rate.tax_portion(adjustment.amount),
                Originator::TaxRate(rate.id),
                Adjustable::Adjustment(adjustment.id),
            );
            tax.tax_category_id = Some(rate.tax_category_id);
            rebuilt.push(tax);
        }
    }

    fn fee(&self, id: Uuid) -> Option<&EnterpriseFee> {
        self.fees.iter().find(|f| f.id == id)
    }

    fn enterprise_name(&self, id: Uuid) -> &str {
        self.enterprises
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
            .unwrap_or("unknown enterprise")
    }
}
