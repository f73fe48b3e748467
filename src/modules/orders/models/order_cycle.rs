use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of an exchange within an order cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeDirection {
    /// Supplier -> coordinator
    Incoming,
    /// Coordinator -> distributor
    Outgoing,
}

/// A link in an order cycle carrying specific variants and the enterprise
/// fees charged along it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: Uuid,
    pub direction: ExchangeDirection,
    /// The supplier for incoming exchanges, the receiving distributor for
    /// outgoing ones
    pub enterprise_id: Uuid,
    pub variant_ids: Vec<Uuid>,
    pub enterprise_fee_ids: Vec<Uuid>,
}

impl Exchange {
    pub fn new(
        direction: ExchangeDirection,
        enterprise_id: Uuid,
        variant_ids: Vec<Uuid>,
        enterprise_fee_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            direction,
            enterprise_id,
            variant_ids,
            enterprise_fee_ids,
        }
    }
}

/// A time-boxed trading window linking suppliers to distributors through a
/// coordinator. Fees attach to the exchanges and to the coordinator itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCycle {
    pub id: Uuid,
    pub name: String,
    pub coordinator_id: Uuid,
    pub coordinator_fee_ids: Vec<Uuid>,
    pub exchanges: Vec<Exchange>,
}

impl OrderCycle {
    pub fn new(name: impl Into<String>, coordinator_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coordinator_id,
            coordinator_fee_ids: Vec::new(),
            exchanges: Vec::new(),
        }
    }

    pub fn incoming_exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges
            .iter()
            .filter(|e| e.direction == ExchangeDirection::Incoming)
    }

    /// The outgoing exchange serving a distributor, if the cycle trades
    /// with it
    pub fn outgoing_exchange_for(&self, distributor_id: Uuid) -> Option<&Exchange> {
        self.exchanges
            .iter()
            .find(|e| e.direction == ExchangeDirection::Outgoing && e.enterprise_id == distributor_id)
    }
}
