//! In-memory store.
//!
//! The process-lifetime backing for [`VehicleLedger`](crate::VehicleLedger).
//! Nothing is persisted; dropping the store drops the data.

use std::collections::HashMap;

use motormint_core::{
    BlockchainTransaction, DriveChainIdentity, Escrow, EscrowId, OwnershipRecord, Result, TxHash,
    VehicleId, VehicleRecord, VehicleVerification,
};

use super::traits::{
    EscrowStore, IdentityStore, LedgerStore, OwnershipLog, TransactionLedger, VehicleStore,
    VerificationStore,
};
use crate::snapshot::LedgerSnapshot;

/// HashMap-backed implementation of every ledger store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    vehicles: HashMap<VehicleId, VehicleRecord>,
    ownership: HashMap<VehicleId, Vec<OwnershipRecord>>,
    escrows: HashMap<EscrowId, Escrow>,
    escrow_order: Vec<EscrowId>,
    transactions: Vec<BlockchainTransaction>,
    identities: HashMap<VehicleId, DriveChainIdentity>,
    verifications: HashMap<VehicleId, Vec<VehicleVerification>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl VehicleStore for MemoryStore {
    fn get_vehicle(&self, id: &VehicleId) -> Result<Option<VehicleRecord>> {
        Ok(self.vehicles.get(id).cloned())
    }

    fn put_vehicle(&mut self, record: VehicleRecord) -> Result<()> {
        self.vehicles.insert(record.vehicle_id.clone(), record);
        Ok(())
    }

    fn vehicle_exists(&self, id: &VehicleId) -> Result<bool> {
        Ok(self.vehicles.contains_key(id))
    }
}

impl OwnershipLog for MemoryStore {
    fn append_ownership(&mut self, record: OwnershipRecord) -> Result<()> {
        self.ownership
            .entry(record.vehicle_id.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    fn ownership_history(&self, id: &VehicleId) -> Result<Vec<OwnershipRecord>> {
        Ok(self.ownership.get(id).cloned().unwrap_or_default())
    }
}

impl EscrowStore for MemoryStore {
    fn get_escrow(&self, id: &EscrowId) -> Result<Option<Escrow>> {
        Ok(self.escrows.get(id).cloned())
    }

    fn put_escrow(&mut self, escrow: Escrow) -> Result<()> {
        if !self.escrows.contains_key(&escrow.id) {
            self.escrow_order.push(escrow.id.clone());
        }
        self.escrows.insert(escrow.id.clone(), escrow);
        Ok(())
    }

    fn escrows(&self) -> Result<Vec<Escrow>> {
        Ok(self
            .escrow_order
            .iter()
            .filter_map(|id| self.escrows.get(id).cloned())
            .collect())
    }

    fn active_escrow_for(&self, vehicle_id: &VehicleId) -> Result<Option<Escrow>> {
        Ok(self
            .escrow_order
            .iter()
            .filter_map(|id| self.escrows.get(id))
            .find(|e| e.vehicle_id == *vehicle_id && e.is_active())
            .cloned())
    }
}

impl TransactionLedger for MemoryStore {
    fn append_transaction(&mut self, tx: BlockchainTransaction) -> Result<()> {
        self.transactions.push(tx);
        Ok(())
    }

    fn transactions(&self) -> Result<Vec<BlockchainTransaction>> {
        Ok(self.transactions.clone())
    }

    fn transaction_by_hash(&self, hash: &TxHash) -> Result<Option<BlockchainTransaction>> {
        Ok(self.transactions.iter().find(|tx| tx.tx_hash == *hash).cloned())
    }
}

impl IdentityStore for MemoryStore {
    fn get_identity(&self, vehicle_id: &VehicleId) -> Result<Option<DriveChainIdentity>> {
        Ok(self.identities.get(vehicle_id).cloned())
    }

    fn put_identity(&mut self, identity: DriveChainIdentity) -> Result<()> {
        self.identities.insert(identity.vehicle_id.clone(), identity);
        Ok(())
    }
}

impl VerificationStore for MemoryStore {
    fn append_verification(&mut self, verification: VehicleVerification) -> Result<()> {
        self.verifications
            .entry(verification.vehicle_id.clone())
            .or_default()
            .push(verification);
        Ok(())
    }

    fn verifications(&self, vehicle_id: &VehicleId) -> Result<Vec<VehicleVerification>> {
        Ok(self.verifications.get(vehicle_id).cloned().unwrap_or_default())
    }
}

impl LedgerStore for MemoryStore {
    fn snapshot(&self) -> Result<LedgerSnapshot> {
        Ok(LedgerSnapshot {
            vehicles: self
                .vehicles
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            ownership: self
                .ownership
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            escrows: self.escrows()?,
            transactions: self.transactions.clone(),
            identities: self
                .identities
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            verifications: self
                .verifications
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use motormint_core::{Address, Currency, EscrowStatus};

    fn escrow(id: &str, vehicle: &str, status: EscrowStatus) -> Escrow {
        let now = Utc::now();
        Escrow {
            id: EscrowId::new(id),
            vehicle_id: VehicleId::new(vehicle),
            seller_address: Address::new("0xa"),
            buyer_address: Address::new("0xb"),
            escrow_contract_address: Address::new("0xc"),
            amount: "1".into(),
            currency: Currency::Eth,
            status,
            creation_tx_hash: TxHash::new(format!("0x{id}")),
            release_tx_hash: None,
            cancel_tx_hash: None,
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(1),
            conditions: Vec::new(),
        }
    }

    #[test]
    fn test_escrow_order_preserved() {
        let mut store = MemoryStore::new();
        for id in ["e3", "e1", "e2"] {
            store.put_escrow(escrow(id, "V1", EscrowStatus::Cancelled)).unwrap();
        }
        // Replacing must not move the entry.
        store.put_escrow(escrow("e1", "V1", EscrowStatus::Completed)).unwrap();

        let ids: Vec<String> = store
            .escrows()
            .unwrap()
            .into_iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(ids, vec!["e3", "e1", "e2"]);
        assert_eq!(
            store.get_escrow(&EscrowId::new("e1")).unwrap().unwrap().status,
            EscrowStatus::Completed
        );
    }

    #[test]
    fn test_active_escrow_scan() {
        let mut store = MemoryStore::new();
        store.put_escrow(escrow("e1", "V1", EscrowStatus::Cancelled)).unwrap();
        store.put_escrow(escrow("e2", "V2", EscrowStatus::Active)).unwrap();
        store.put_escrow(escrow("e3", "V1", EscrowStatus::Active)).unwrap();

        let active = store.active_escrow_for(&VehicleId::new("V1")).unwrap().unwrap();
        assert_eq!(active.id.as_str(), "e3");
        assert!(store.active_escrow_for(&VehicleId::new("V9")).unwrap().is_none());
    }

    #[test]
    fn test_empty_history() {
        let store = MemoryStore::new();
        assert!(store.ownership_history(&VehicleId::new("V1")).unwrap().is_empty());
        assert!(store.verifications(&VehicleId::new("V1")).unwrap().is_empty());
        assert_eq!(store.snapshot().unwrap(), LedgerSnapshot::default());
    }
}
