//! Storage traits.
//!
//! Reads return owned values; writes take `&mut self` and are only ever
//! called with the ledger's store lock held, so a multi-store operation is
//! never observed half-applied.

use motormint_core::{
    Address, BlockchainTransaction, DriveChainIdentity, Escrow, EscrowId, OwnershipRecord, Result,
    TxHash, VehicleId, VehicleRecord, VehicleVerification,
};

use crate::snapshot::LedgerSnapshot;

/// Store for on-chain vehicle records.
pub trait VehicleStore {
    /// Get a record by vehicle id.
    fn get_vehicle(&self, id: &VehicleId) -> Result<Option<VehicleRecord>>;

    /// Insert or replace a record.
    fn put_vehicle(&mut self, record: VehicleRecord) -> Result<()>;

    /// Check if a record exists.
    fn vehicle_exists(&self, id: &VehicleId) -> Result<bool> {
        Ok(self.get_vehicle(id)?.is_some())
    }
}

/// Append-only ownership history.
pub trait OwnershipLog {
    /// Append an ownership record.
    fn append_ownership(&mut self, record: OwnershipRecord) -> Result<()>;

    /// History for a vehicle, oldest first.
    fn ownership_history(&self, id: &VehicleId) -> Result<Vec<OwnershipRecord>>;
}

/// Store for escrows. Iteration follows creation order.
pub trait EscrowStore {
    /// Get an escrow by id.
    fn get_escrow(&self, id: &EscrowId) -> Result<Option<Escrow>>;

    /// Insert or replace an escrow.
    fn put_escrow(&mut self, escrow: Escrow) -> Result<()>;

    /// All escrows in creation order.
    fn escrows(&self) -> Result<Vec<Escrow>>;

    /// First ACTIVE escrow referencing the vehicle.
    fn active_escrow_for(&self, vehicle_id: &VehicleId) -> Result<Option<Escrow>> {
        Ok(self
            .escrows()?
            .into_iter()
            .find(|e| e.vehicle_id == *vehicle_id && e.is_active()))
    }
}

/// Append-only transaction ledger.
pub trait TransactionLedger {
    /// Append a transaction.
    fn append_transaction(&mut self, tx: BlockchainTransaction) -> Result<()>;

    /// All transactions in append order.
    fn transactions(&self) -> Result<Vec<BlockchainTransaction>>;

    /// Transactions sent from or to `address` (exact match).
    fn transactions_by_address(&self, address: &Address) -> Result<Vec<BlockchainTransaction>> {
        Ok(self
            .transactions()?
            .into_iter()
            .filter(|tx| tx.involves(address))
            .collect())
    }

    /// First transaction with the given hash.
    fn transaction_by_hash(&self, hash: &TxHash) -> Result<Option<BlockchainTransaction>> {
        Ok(self.transactions()?.into_iter().find(|tx| tx.tx_hash == *hash))
    }
}

/// Store for DriveChain identities.
pub trait IdentityStore {
    /// Get the identity of a vehicle.
    fn get_identity(&self, vehicle_id: &VehicleId) -> Result<Option<DriveChainIdentity>>;

    /// Insert or replace an identity.
    fn put_identity(&mut self, identity: DriveChainIdentity) -> Result<()>;
}

/// Append-only vehicle verifications.
pub trait VerificationStore {
    /// Append a verification.
    fn append_verification(&mut self, verification: VehicleVerification) -> Result<()>;

    /// Verifications for a vehicle, oldest first.
    fn verifications(&self, vehicle_id: &VehicleId) -> Result<Vec<VehicleVerification>>;
}

/// Combined ledger store.
pub trait LedgerStore:
    VehicleStore
    + OwnershipLog
    + EscrowStore
    + TransactionLedger
    + IdentityStore
    + VerificationStore
{
    /// Copy of every store's contents.
    fn snapshot(&self) -> Result<LedgerSnapshot>;
}
