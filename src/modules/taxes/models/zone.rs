use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A geographic zone a tax rate applies in. Orders resolve their tax zone
/// from the ship address; only rates whose zone matches apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
