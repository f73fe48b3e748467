use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fee aggregation grouped by adjustment label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSummaryRow {
    /// Adjustment label, e.g. "packing fee by supplier Fresh Farm"
    pub fee_label: String,
    /// Total collected under this label across the reported orders
    pub total_amount: Decimal,
    /// Number of adjustments that contributed to this total
    pub adjustment_count: i64,
}

/// Group-buy aggregation per variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBuyRow {
    pub variant_id: Uuid,
    pub variant_name: String,
    /// Ordered quantity in base units divided by the bundle size
    pub fulfilled_units: Decimal,
    /// Same aggregate computed from the max quantities customers would take
    pub max_fulfilled_units: Decimal,
}
