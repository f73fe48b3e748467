use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ship or bill address. The zone is what the tax engine cares about;
/// the rest is carried for the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub address1: String,
    pub city: String,
    /// The tax zone this address falls in, resolved by the caller
    pub zone_id: Option<Uuid>,
}

impl Address {
    pub fn new(address1: impl Into<String>, city: impl Into<String>, zone_id: Option<Uuid>) -> Self {
        Self {
            address1: address1.into(),
            city: city.into(),
            zone_id,
        }
    }
}
