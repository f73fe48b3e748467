use uuid::Uuid;

use crate::modules::taxes::models::TaxRate;

/// Lookup over the admin-configured tax rates.
///
/// At most one rate applies per (zone, category) pair; when several are
/// configured the first wins, and iteration order is the configured order so
/// recalculation stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct TaxTable {
    rates: Vec<TaxRate>,
}

impl TaxTable {
    pub fn new(rates: Vec<TaxRate>) -> Self {
        Self { rates }
    }

    /// The applicable rate for a tax zone and category, if any.
    ///
    /// Entities without a tax category attract no tax.
    pub fn rate_for(&self, zone_id: Uuid, tax_category_id: Option<Uuid>) -> Option<&TaxRate> {
        let category = tax_category_id?;
        self.rates
            .iter()
            .find(|r| r.zone_id == zone_id && r.tax_category_id == category)
    }

    /// All rates applying in a zone, in configured order
    pub fn rates_in_zone(&self, zone_id: Uuid) -> impl Iterator<Item = &TaxRate> {
        self.rates.iter().filter(move |r| r.zone_id == zone_id)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
