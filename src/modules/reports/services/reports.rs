use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::core::Result;
use crate::modules::orders::models::Order;
use crate::modules::products::{UnitConverter, Variant};
use crate::modules::reports::models::{FeeSummaryRow, GroupBuyRow};

/// Report builders over computed orders
pub struct Reports;

impl Reports {
    /// Aggregate eligible fee adjustments across orders, grouped by label.
    ///
    /// Rows come back sorted by label so repeated runs render identically.
    pub fn fee_summary(orders: &[Order]) -> Vec<FeeSummaryRow> {
        let mut totals: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();

        for order in orders {
            for adjustment in order.adjustments.iter().filter(|a| {
                a.eligible && matches!(a.originator, crate::modules::orders::models::Originator::EnterpriseFee(_))
            }) {
                let entry = totals
                    .entry(adjustment.label.clone())
                    .or_insert((Decimal::ZERO, 0));
                entry.0 += adjustment.amount;
                entry.1 += 1;
            }
        }

        let rows: Vec<FeeSummaryRow> = totals
            .into_iter()
            .map(|(fee_label, (total_amount, adjustment_count))| FeeSummaryRow {
                fee_label,
                total_amount,
                adjustment_count,
            })
            .collect();

        if rows.is_empty() {
            warn!("Fee summary report is empty");
        } else {
            info!(rows = rows.len(), "Fee summary report built");
        }

        rows
    }

    /// Group-buy fulfilment per group-buyable variant: ordered (and max)
    /// quantities in base units against the bundle size
    pub fn group_buy_summary(orders: &[Order], variants: &[Variant]) -> Result<Vec<GroupBuyRow>> {
        let mut rows = Vec::new();

        for variant in variants {
            let Some(unit_size) = variant.group_buy_unit_size else {
                continue;
            };

            let mut ordered: Vec<(Decimal, i64)> = Vec::new();
            let mut max_ordered: Vec<(Decimal, i64)> = Vec::new();

            for order in orders {
                for item in order.line_items.iter().filter(|li| li.variant_id == variant.id) {
                    ordered.push((item.unit_value, item.quantity as i64));
                    max_ordered.push((
                        item.unit_value,
                        item.max_quantity.unwrap_or(item.quantity) as i64,
                    ));
                }
            }

            rows.push(GroupBuyRow {
                variant_id: variant.id,
                variant_name: variant.name.clone(),
                fulfilled_units: UnitConverter::fulfilled_units(&ordered, unit_size)?,
                max_fulfilled_units: UnitConverter::fulfilled_units(&max_ordered, unit_size)?,
            });
        }

        Ok(rows)
    }
}
