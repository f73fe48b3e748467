use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tax category groups products, fees and shipping methods under a common
/// tax treatment. Entities with no category attract no tax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxCategory {
    pub id: Uuid,
    pub name: String,
    /// The default category newly created products fall into
    pub is_default: bool,
}

impl TaxCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_default: false,
        }
    }

    pub fn default_category(name: impl Into<String>) -> Self {
        Self {
            is_default: true,
            ..Self::new(name)
        }
    }
}
