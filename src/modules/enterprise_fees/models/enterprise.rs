use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A marketplace organization. Whether it acts as supplier, distributor or
/// coordinator is positional: it depends on the exchange or order that
/// references it, not on the record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enterprise {
    pub id: Uuid,
    pub name: String,
}

impl Enterprise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
