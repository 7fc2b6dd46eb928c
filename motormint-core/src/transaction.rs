//! Simulated ledger transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{Address, TransactionId, TxHash};

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Registration,
    Transfer,
    EscrowCreate,
    EscrowRelease,
    EscrowCancel,
}

/// Confirmation status. Every simulated transaction is confirmed on append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    #[default]
    Confirmed,
    Failed,
}

/// Append-only ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainTransaction {
    pub id: TransactionId,
    /// Unique across the ledger.
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub timestamp: DateTime<Utc>,
    pub from: Address,
    pub to: Address,
    /// Decimal value, `"0"` for non-value transfers.
    pub value: String,
    pub gas_used: u64,
    pub status: TransactionStatus,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
}

impl BlockchainTransaction {
    /// Check if `address` is the sender or recipient (exact match).
    pub fn involves(&self, address: &Address) -> bool {
        self.from == *address || self.to == *address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(from: &str, to: &str) -> BlockchainTransaction {
        BlockchainTransaction {
            id: TransactionId::new("tx_1"),
            tx_hash: TxHash::new(format!("0x{}", "a".repeat(64))),
            block_number: 18_000_001,
            timestamp: Utc::now(),
            from: Address::new(from),
            to: Address::new(to),
            value: "0".into(),
            gas_used: 21_000,
            status: TransactionStatus::Confirmed,
            tx_type: TransactionType::Transfer,
        }
    }

    #[test]
    fn test_involves_is_case_sensitive() {
        let t = tx("0xAbC", "0xdef");
        assert!(t.involves(&Address::new("0xAbC")));
        assert!(t.involves(&Address::new("0xdef")));
        assert!(!t.involves(&Address::new("0xabc")));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(tx("0x1", "0x2")).unwrap();
        assert_eq!(json["type"], "TRANSFER");
        assert_eq!(json["status"], "CONFIRMED");
        assert_eq!(json["gasUsed"], 21_000);
        assert!(json.get("txHash").is_some());
    }
}
