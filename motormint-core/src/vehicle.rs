//! On-chain vehicle records and ownership history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::drivechain::DriveChainIdentity;
use crate::error::{Error, ErrorCode, Result};
use crate::escrow::Escrow;
use crate::id::{Address, OwnershipId, RecordId, TxHash, VehicleId};
use crate::verification::VehicleVerification;

/// Length of a vehicle identification number.
pub const VIN_LEN: usize = 17;

/// Ownership status of a registered vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipStatus {
    /// Registered, not held by any escrow.
    Registered,
    /// Changed hands at least once, not held by any escrow.
    Transferred,
    /// Held by a disputed escrow.
    Locked,
    /// Held by an active escrow.
    InEscrow,
}

impl OwnershipStatus {
    /// Whether an escrow currently holds the vehicle.
    pub fn is_encumbered(self) -> bool {
        matches!(self, OwnershipStatus::InEscrow | OwnershipStatus::Locked)
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            OwnershipStatus::Registered => "REGISTERED",
            OwnershipStatus::Transferred => "TRANSFERRED",
            OwnershipStatus::Locked => "LOCKED",
            OwnershipStatus::InEscrow => "IN_ESCROW",
        }
    }
}

impl std::fmt::Display for OwnershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason an ownership record was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferType {
    /// Initial registration.
    Registration,
    /// Direct sale.
    Sale,
    /// Gift.
    Gift,
    /// Completion of an escrow.
    EscrowRelease,
}

impl TransferType {
    /// Whether this type may be requested by a caller of a plain transfer.
    pub fn is_direct(self) -> bool {
        matches!(self, TransferType::Sale | TransferType::Gift)
    }
}

/// Simulated on-chain record of a vehicle. One per vehicle id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: RecordId,
    pub vehicle_id: VehicleId,
    pub token_id: String,
    /// Shared placeholder contract, identical for every vehicle.
    pub contract_address: Address,
    pub registration_tx_hash: TxHash,
    pub registration_block_number: u64,
    pub registration_timestamp: DateTime<Utc>,
    pub current_owner: Address,
    pub ownership_status: OwnershipStatus,
    pub verification_hash: TxHash,
    pub metadata_uri: String,
    pub chain_id: u64,
    pub network: String,
}

/// Append-only ownership change entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipRecord {
    pub id: OwnershipId,
    pub vehicle_id: VehicleId,
    pub owner_address: Address,
    pub transfer_tx_hash: TxHash,
    pub transfer_block_number: u64,
    pub transfer_timestamp: DateTime<Utc>,
    /// `None` only for the registration entry.
    pub previous_owner: Option<Address>,
    pub transfer_type: TransferType,
}

/// Registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVehicle {
    pub vehicle_id: VehicleId,
    pub owner_address: Address,
    pub vin: String,
    pub metadata_uri: String,
}

impl RegisterVehicle {
    /// Create a registration request.
    pub fn new(
        vehicle_id: impl Into<VehicleId>,
        owner_address: impl Into<Address>,
        vin: impl Into<String>,
        metadata_uri: impl Into<String>,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            owner_address: owner_address.into(),
            vin: vin.into(),
            metadata_uri: metadata_uri.into(),
        }
    }

    /// Check required fields.
    pub fn validate(&self) -> Result<()> {
        if self.vehicle_id.as_str().is_empty() {
            return Err(Error::invalid_input("vehicle id is required"));
        }
        if self.owner_address.as_str().is_empty() {
            return Err(Error::invalid(
                ErrorCode::InvalidAddress,
                "owner address is required",
            ));
        }
        if self.vin.chars().count() != VIN_LEN {
            return Err(Error::invalid(
                ErrorCode::InvalidVin,
                format!("VIN must be {VIN_LEN} characters"),
            ));
        }
        Ok(())
    }
}

/// Result of a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub record: VehicleRecord,
    pub drive_chain_identity: DriveChainIdentity,
}

/// Everything the ledger knows about one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleChainData {
    pub record: Option<VehicleRecord>,
    pub ownership_history: Vec<OwnershipRecord>,
    pub drive_chain_identity: Option<DriveChainIdentity>,
    pub verifications: Vec<VehicleVerification>,
    pub active_escrow: Option<Escrow>,
}
