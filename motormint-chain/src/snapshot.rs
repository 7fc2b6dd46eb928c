//! Point-in-time copy of the ledger stores.

use std::collections::BTreeMap;

use motormint_core::{
    BlockchainTransaction, DriveChainIdentity, Escrow, EscrowStatus, OwnershipRecord, VehicleId,
    VehicleRecord, VehicleVerification,
};
use serde::{Deserialize, Serialize};

/// Cloned contents of every store, keyed deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub vehicles: BTreeMap<VehicleId, VehicleRecord>,
    pub ownership: BTreeMap<VehicleId, Vec<OwnershipRecord>>,
    /// Creation order.
    pub escrows: Vec<Escrow>,
    /// Append order.
    pub transactions: Vec<BlockchainTransaction>,
    pub identities: BTreeMap<VehicleId, DriveChainIdentity>,
    pub verifications: BTreeMap<VehicleId, Vec<VehicleVerification>>,
}

impl LedgerSnapshot {
    /// Escrows referencing a vehicle.
    pub fn escrows_for<'a>(
        &'a self,
        vehicle_id: &'a VehicleId,
    ) -> impl Iterator<Item = &'a Escrow> {
        self.escrows.iter().filter(move |e| e.vehicle_id == *vehicle_id)
    }

    /// Count of a vehicle's escrows in `status`.
    pub fn escrow_count(&self, vehicle_id: &VehicleId, status: EscrowStatus) -> usize {
        self.escrows_for(vehicle_id)
            .filter(|e| e.status == status)
            .count()
    }

    /// Number of registered vehicles.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }
}
