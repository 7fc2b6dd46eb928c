//! Vehicle ledger orchestration.
//!
//! [`VehicleLedger`] coordinates the stores to implement registration,
//! ownership transfer and the escrow lifecycle. Every public operation takes
//! the store lock once and holds it until it returns, and checks every
//! fallible precondition before its first write, so a failed call leaves
//! the stores untouched.
//!
//! # Escrow effects
//!
//! | status     | effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | COMPLETED  | release hash, ownership to buyer, ESCROW_RELEASE tx to seller |
//! | CANCELLED  | cancel hash, vehicle back to REGISTERED, ESCROW_CANCEL tx     |
//! | DISPUTED   | vehicle LOCKED (strict policy only)                          |
//!
//! Vehicle status updates on create/cancel/dispute are best effort: an
//! escrow may reference a vehicle that was never registered, in which case
//! the update is skipped and logged.

use chrono::{DateTime, Utc};
use motormint_core::{
    explorer_address_link, explorer_tx_link, network, shorten_address, supported_networks,
    Address, BlockchainTransaction, DisputeResolution, DriveChainIdentity, Error, ErrorCode,
    Escrow, EscrowId, EscrowStatus, EscrowTerms, GasEstimate, MaintenanceEntry, NetworkInfo,
    NewEscrow, OwnershipRecord, OwnershipStatus, RegisterVehicle, Registration, Result,
    TokenPrice, TransactionStatus, TransactionType, TransferType, TxHash, VehicleChainData,
    VehicleId, VehicleRecord, VehicleVerification, VerificationEvidence,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::{LedgerConfig, TransitionPolicy};
use crate::simulator::ChainSimulator;
use crate::snapshot::LedgerSnapshot;
use crate::store::{LedgerStore, MemoryStore};

/// Orchestration service over the ledger stores.
#[derive(Debug)]
pub struct VehicleLedger<S = MemoryStore> {
    config: LedgerConfig,
    sim: ChainSimulator,
    store: Mutex<S>,
}

impl VehicleLedger<MemoryStore> {
    /// Create a ledger backed by a fresh in-memory store.
    pub fn new(config: LedgerConfig) -> Result<Self> {
        Self::with_store(config, MemoryStore::new())
    }
}

/// Parameters of one ledger append.
struct TxSpec {
    tx_hash: TxHash,
    block_number: u64,
    from: Address,
    to: Address,
    value: String,
    tx_type: TransactionType,
}

impl<S: LedgerStore> VehicleLedger<S> {
    /// Create a ledger over an existing store.
    pub fn with_store(config: LedgerConfig, store: S) -> Result<Self> {
        config.validate()?;
        let sim = ChainSimulator::new(&config);
        info!(
            chain_id = config.chain_id,
            network = %config.network_name,
            policy = ?config.transition_policy,
            "vehicle ledger initialized"
        );
        Ok(Self {
            config,
            sim,
            store: Mutex::new(store),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn is_strict(&self) -> bool {
        self.config.transition_policy == TransitionPolicy::Strict
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a vehicle on the simulated chain.
    ///
    /// Writes the vehicle record, the REGISTRATION ownership entry and
    /// ledger transaction, the DriveChain identity and an initial VIN
    /// verification.
    pub fn register_vehicle(&self, request: RegisterVehicle) -> Result<Registration> {
        request.validate()?;
        let now = Utc::now();
        let mut store = self.store.lock();

        if store.vehicle_exists(&request.vehicle_id)? {
            warn!(vehicle_id = %request.vehicle_id, "registration rejected: already registered");
            return Err(Error::vehicle_already_registered(&request.vehicle_id));
        }
        if store.get_identity(&request.vehicle_id)?.is_some() {
            warn!(vehicle_id = %request.vehicle_id, "registration rejected: identity exists");
            return Err(Error::identity_exists(&request.vehicle_id));
        }
        let initial_status = self.initial_status(&store, &request.vehicle_id)?;

        let tx_hash = self.sim.tx_hash();
        let block_number = self.sim.block_number();
        let record = VehicleRecord {
            id: self.sim.id(now),
            vehicle_id: request.vehicle_id.clone(),
            token_id: self.sim.token_id(),
            contract_address: self.config.registry_contract.clone(),
            registration_tx_hash: tx_hash.clone(),
            registration_block_number: block_number,
            registration_timestamp: now,
            current_owner: request.owner_address.clone(),
            ownership_status: initial_status,
            verification_hash: self.sim.tx_hash(),
            metadata_uri: request.metadata_uri,
            chain_id: self.config.chain_id,
            network: self.config.network_name.clone(),
        };
        store.put_vehicle(record.clone())?;

        store.append_ownership(OwnershipRecord {
            id: self.sim.id(now),
            vehicle_id: request.vehicle_id.clone(),
            owner_address: request.owner_address.clone(),
            transfer_tx_hash: tx_hash.clone(),
            transfer_block_number: block_number,
            transfer_timestamp: now,
            previous_owner: None,
            transfer_type: TransferType::Registration,
        })?;

        self.append_tx(
            &mut store,
            TxSpec {
                tx_hash: tx_hash.clone(),
                block_number,
                from: request.owner_address.clone(),
                to: record.contract_address.clone(),
                value: "0".to_string(),
                tx_type: TransactionType::Registration,
            },
            now,
        )?;

        let identity = DriveChainIdentity {
            id: self.sim.id(now),
            vehicle_id: request.vehicle_id.clone(),
            vin: request.vin.clone(),
            drive_chain_id: self.sim.drive_chain_id(now),
            health_score: self.sim.health_score(),
            maintenance_log_hash: self.sim.tx_hash(),
            last_maintenance_update: now,
            fraud_score: self.sim.fraud_score(),
            is_authentic: true,
            registered_at: now,
        };
        store.put_identity(identity.clone())?;

        store.append_verification(VehicleVerification {
            id: self.sim.id(now),
            vehicle_id: request.vehicle_id.clone(),
            verification_hash: self.sim.tx_hash(),
            verified_at: now,
            verifier_address: self.sim.address(),
            expires_at: None,
            is_valid: true,
            evidence: VerificationEvidence::Vin { vin: request.vin },
        })?;

        info!(
            vehicle_id = %record.vehicle_id,
            owner = %record.current_owner,
            tx_hash = %tx_hash,
            block = block_number,
            "vehicle registered"
        );
        Ok(Registration {
            record,
            drive_chain_identity: identity,
        })
    }

    /// Status a new record starts in. Under the strict policy an escrow
    /// that already references the vehicle id holds it from the start.
    fn initial_status(&self, store: &S, vehicle_id: &VehicleId) -> Result<OwnershipStatus> {
        if !self.is_strict() {
            return Ok(OwnershipStatus::Registered);
        }
        let escrows = store.escrows()?;
        let held = |status: EscrowStatus| {
            escrows
                .iter()
                .any(|e| e.vehicle_id == *vehicle_id && e.status == status)
        };
        Ok(if held(EscrowStatus::Active) {
            OwnershipStatus::InEscrow
        } else if held(EscrowStatus::Disputed) {
            OwnershipStatus::Locked
        } else {
            OwnershipStatus::Registered
        })
    }

    // ========================================================================
    // Ownership
    // ========================================================================

    /// Move a vehicle to a new owner.
    ///
    /// `transfer_type` must be SALE, GIFT or ESCROW_RELEASE. Under the strict
    /// policy a vehicle held by an escrow cannot change hands this way.
    pub fn update_vehicle_owner(
        &self,
        vehicle_id: &VehicleId,
        new_owner: Address,
        transfer_type: TransferType,
    ) -> Result<VehicleRecord> {
        if transfer_type == TransferType::Registration {
            return Err(Error::invalid(
                ErrorCode::InvalidTransferType,
                "REGISTRATION is not a transfer type",
            ));
        }
        let now = Utc::now();
        let mut store = self.store.lock();
        let record = store
            .get_vehicle(vehicle_id)?
            .ok_or_else(|| Error::vehicle_not_found(vehicle_id))?;

        if self.is_strict() && record.ownership_status.is_encumbered() {
            warn!(
                vehicle_id = %vehicle_id,
                status = %record.ownership_status,
                "transfer rejected: vehicle held by escrow"
            );
            return Err(Error::vehicle_encumbered(vehicle_id));
        }
        self.apply_transfer(&mut store, record, new_owner, transfer_type, now)
    }

    /// Direct SALE or GIFT transfer.
    pub fn transfer_ownership(
        &self,
        vehicle_id: &VehicleId,
        new_owner: Address,
        transfer_type: TransferType,
    ) -> Result<VehicleRecord> {
        if !transfer_type.is_direct() {
            return Err(Error::invalid(
                ErrorCode::InvalidTransferType,
                "only SALE and GIFT transfers can be requested directly",
            ));
        }
        self.update_vehicle_owner(vehicle_id, new_owner, transfer_type)
    }

    fn apply_transfer(
        &self,
        store: &mut S,
        mut record: VehicleRecord,
        new_owner: Address,
        transfer_type: TransferType,
        now: DateTime<Utc>,
    ) -> Result<VehicleRecord> {
        let previous_owner = record.current_owner.clone();
        let tx_hash = self.sim.tx_hash();
        let block_number = self.sim.transfer_block(record.registration_block_number);

        record.current_owner = new_owner.clone();
        record.ownership_status = OwnershipStatus::Transferred;
        store.put_vehicle(record.clone())?;

        store.append_ownership(OwnershipRecord {
            id: self.sim.id(now),
            vehicle_id: record.vehicle_id.clone(),
            owner_address: new_owner.clone(),
            transfer_tx_hash: tx_hash.clone(),
            transfer_block_number: block_number,
            transfer_timestamp: now,
            previous_owner: Some(previous_owner.clone()),
            transfer_type,
        })?;

        self.append_tx(
            store,
            TxSpec {
                tx_hash: tx_hash.clone(),
                block_number,
                from: previous_owner.clone(),
                to: new_owner.clone(),
                value: "0".to_string(),
                tx_type: TransactionType::Transfer,
            },
            now,
        )?;

        info!(
            vehicle_id = %record.vehicle_id,
            from = %previous_owner,
            to = %new_owner,
            transfer_type = ?transfer_type,
            tx_hash = %tx_hash,
            "ownership transferred"
        );
        Ok(record)
    }

    /// Ownership history of a vehicle, oldest first. Empty if unknown.
    pub fn ownership_history(&self, vehicle_id: &VehicleId) -> Result<Vec<OwnershipRecord>> {
        self.store.lock().ownership_history(vehicle_id)
    }

    /// Get a vehicle record.
    pub fn vehicle_record(&self, vehicle_id: &VehicleId) -> Result<VehicleRecord> {
        self.store
            .lock()
            .get_vehicle(vehicle_id)?
            .ok_or_else(|| Error::vehicle_not_found(vehicle_id))
    }

    /// Everything known about a vehicle. Never fails for an unknown id.
    pub fn vehicle_chain_data(&self, vehicle_id: &VehicleId) -> Result<VehicleChainData> {
        let store = self.store.lock();
        Ok(VehicleChainData {
            record: store.get_vehicle(vehicle_id)?,
            ownership_history: store.ownership_history(vehicle_id)?,
            drive_chain_identity: store.get_identity(vehicle_id)?,
            verifications: store.verifications(vehicle_id)?,
            active_escrow: store.active_escrow_for(vehicle_id)?,
        })
    }

    // ========================================================================
    // Escrow
    // ========================================================================

    /// Create an ACTIVE escrow for a vehicle.
    pub fn create_escrow(&self, new: NewEscrow) -> Result<Escrow> {
        let now = Utc::now();
        let mut store = self.store.lock();

        if let Some(existing) = store.active_escrow_for(&new.vehicle_id)? {
            warn!(
                vehicle_id = %new.vehicle_id,
                existing = %existing.id,
                "escrow rejected: active escrow exists"
            );
            return Err(Error::active_escrow_exists(&new.vehicle_id));
        }
        if self.is_strict()
            && store
                .escrows()?
                .iter()
                .any(|e| e.vehicle_id == new.vehicle_id && e.status == EscrowStatus::Disputed)
        {
            warn!(vehicle_id = %new.vehicle_id, "escrow rejected: vehicle locked by dispute");
            return Err(Error::vehicle_encumbered(&new.vehicle_id));
        }

        let tx_hash = self.sim.tx_hash();
        let escrow = Escrow {
            id: self.sim.id(now),
            vehicle_id: new.vehicle_id,
            seller_address: new.seller_address,
            buyer_address: new.buyer_address,
            escrow_contract_address: self.sim.address(),
            amount: new.amount,
            currency: new.currency,
            status: EscrowStatus::Active,
            creation_tx_hash: tx_hash.clone(),
            release_tx_hash: None,
            cancel_tx_hash: None,
            created_at: now,
            updated_at: now,
            expires_at: new.expires_at,
            conditions: Vec::new(),
        };
        store.put_escrow(escrow.clone())?;

        self.set_vehicle_status(&mut store, &escrow.vehicle_id, OwnershipStatus::InEscrow)?;

        self.append_tx(
            &mut store,
            TxSpec {
                tx_hash,
                block_number: self.sim.block_number(),
                from: escrow.buyer_address.clone(),
                to: escrow.escrow_contract_address.clone(),
                value: escrow.amount.clone(),
                tx_type: TransactionType::EscrowCreate,
            },
            now,
        )?;

        info!(
            escrow_id = %escrow.id,
            vehicle_id = %escrow.vehicle_id,
            amount = %escrow.amount,
            currency = escrow.currency.symbol(),
            "escrow created"
        );
        Ok(escrow)
    }

    /// Validate escrow terms and create the escrow.
    pub fn open_escrow(&self, terms: EscrowTerms) -> Result<Escrow> {
        terms.validate()?;
        self.create_escrow(terms.into_new_escrow(Utc::now()))
    }

    /// Change an escrow's status and apply its effects.
    pub fn update_escrow_status(
        &self,
        escrow_id: &EscrowId,
        status: EscrowStatus,
    ) -> Result<Escrow> {
        let mut store = self.store.lock();
        let escrow = store
            .get_escrow(escrow_id)?
            .ok_or_else(|| Error::escrow_not_found(escrow_id))?;
        self.apply_status(&mut store, escrow, status, Utc::now())
    }

    /// Complete an escrow.
    pub fn release_escrow(&self, escrow_id: &EscrowId) -> Result<Escrow> {
        self.update_escrow_status(escrow_id, EscrowStatus::Completed)
    }

    /// Cancel an escrow.
    pub fn cancel_escrow(&self, escrow_id: &EscrowId) -> Result<Escrow> {
        self.update_escrow_status(escrow_id, EscrowStatus::Cancelled)
    }

    /// Dispute an escrow.
    pub fn dispute_escrow(&self, escrow_id: &EscrowId) -> Result<Escrow> {
        self.update_escrow_status(escrow_id, EscrowStatus::Disputed)
    }

    /// Close a DISPUTED escrow as completed or cancelled.
    pub fn resolve_dispute(
        &self,
        escrow_id: &EscrowId,
        resolution: DisputeResolution,
    ) -> Result<Escrow> {
        let target = resolution.target_status();
        let mut store = self.store.lock();
        let escrow = store
            .get_escrow(escrow_id)?
            .ok_or_else(|| Error::escrow_not_found(escrow_id))?;
        if escrow.status != EscrowStatus::Disputed {
            warn!(escrow_id = %escrow_id, status = %escrow.status, "escrow is not disputed");
            return Err(Error::invalid_transition(escrow.status, target));
        }
        info!(escrow_id = %escrow_id, resolution = ?resolution, "resolving dispute");
        self.apply_status(&mut store, escrow, target, Utc::now())
    }

    fn apply_status(
        &self,
        store: &mut S,
        mut escrow: Escrow,
        status: EscrowStatus,
        now: DateTime<Utc>,
    ) -> Result<Escrow> {
        let strict = self.is_strict();
        if strict && !escrow.status.can_transition_to(status) {
            warn!(
                escrow_id = %escrow.id,
                from = %escrow.status,
                to = %status,
                "escrow transition rejected"
            );
            return Err(Error::invalid_transition(escrow.status, status));
        }

        let vehicle = store.get_vehicle(&escrow.vehicle_id)?;
        if status == EscrowStatus::Completed && vehicle.is_none() {
            warn!(
                escrow_id = %escrow.id,
                vehicle_id = %escrow.vehicle_id,
                "escrow release rejected: vehicle not registered"
            );
            return Err(Error::vehicle_not_found(&escrow.vehicle_id));
        }
        if !strict && escrow.status.is_terminal() {
            warn!(
                escrow_id = %escrow.id,
                from = %escrow.status,
                to = %status,
                "re-entering escrow from terminal status"
            );
        }

        let previous = escrow.status;
        escrow.status = status;
        escrow.updated_at = now;

        match status {
            EscrowStatus::Completed => {
                let release_hash = self.sim.tx_hash();
                escrow.release_tx_hash = Some(release_hash.clone());
                if let Some(record) = vehicle {
                    self.apply_transfer(
                        store,
                        record,
                        escrow.buyer_address.clone(),
                        TransferType::EscrowRelease,
                        now,
                    )?;
                }
                self.append_tx(
                    store,
                    TxSpec {
                        tx_hash: release_hash,
                        block_number: self.sim.block_number(),
                        from: escrow.escrow_contract_address.clone(),
                        to: escrow.seller_address.clone(),
                        value: escrow.amount.clone(),
                        tx_type: TransactionType::EscrowRelease,
                    },
                    now,
                )?;
            }
            EscrowStatus::Cancelled => {
                let cancel_hash = self.sim.tx_hash();
                escrow.cancel_tx_hash = Some(cancel_hash.clone());
                self.set_vehicle_status(store, &escrow.vehicle_id, OwnershipStatus::Registered)?;
                self.append_tx(
                    store,
                    TxSpec {
                        tx_hash: cancel_hash,
                        block_number: self.sim.block_number(),
                        from: escrow.escrow_contract_address.clone(),
                        to: escrow.buyer_address.clone(),
                        value: escrow.amount.clone(),
                        tx_type: TransactionType::EscrowCancel,
                    },
                    now,
                )?;
            }
            EscrowStatus::Disputed if strict => {
                self.set_vehicle_status(store, &escrow.vehicle_id, OwnershipStatus::Locked)?;
            }
            EscrowStatus::Disputed | EscrowStatus::Active | EscrowStatus::Pending => {}
        }

        store.put_escrow(escrow.clone())?;
        info!(
            escrow_id = %escrow.id,
            vehicle_id = %escrow.vehicle_id,
            from = %previous,
            to = %status,
            "escrow status updated"
        );
        Ok(escrow)
    }

    /// Best-effort vehicle status update. Unknown vehicles are skipped.
    fn set_vehicle_status(
        &self,
        store: &mut S,
        vehicle_id: &VehicleId,
        status: OwnershipStatus,
    ) -> Result<()> {
        match store.get_vehicle(vehicle_id)? {
            Some(mut record) => {
                record.ownership_status = status;
                store.put_vehicle(record)
            }
            None => {
                warn!(
                    vehicle_id = %vehicle_id,
                    status = %status,
                    "vehicle not registered, status update skipped"
                );
                Ok(())
            }
        }
    }

    /// Get an escrow.
    pub fn escrow(&self, escrow_id: &EscrowId) -> Result<Escrow> {
        self.store
            .lock()
            .get_escrow(escrow_id)?
            .ok_or_else(|| Error::escrow_not_found(escrow_id))
    }

    /// The ACTIVE escrow of a vehicle, if any.
    pub fn active_escrow(&self, vehicle_id: &VehicleId) -> Result<Option<Escrow>> {
        self.store.lock().active_escrow_for(vehicle_id)
    }

    /// Escrows where `address` is seller or buyer (exact match).
    pub fn escrows_for_address(&self, address: &Address) -> Result<Vec<Escrow>> {
        Ok(self
            .store
            .lock()
            .escrows()?
            .into_iter()
            .filter(|e| e.involves(address))
            .collect())
    }

    /// ACTIVE escrows whose expiry has passed at `now`. Read-only.
    pub fn overdue_escrows(&self, now: DateTime<Utc>) -> Result<Vec<Escrow>> {
        Ok(self
            .store
            .lock()
            .escrows()?
            .into_iter()
            .filter(|e| e.is_active() && e.is_expired(now))
            .collect())
    }

    // ========================================================================
    // DriveChain & verification
    // ========================================================================

    /// Get a vehicle's DriveChain identity.
    pub fn drivechain_identity(&self, vehicle_id: &VehicleId) -> Result<DriveChainIdentity> {
        self.store
            .lock()
            .get_identity(vehicle_id)?
            .ok_or_else(|| Error::identity_not_found(vehicle_id))
    }

    /// Log maintenance: bump health by up to 4 and rotate the log hash.
    pub fn record_maintenance(
        &self,
        vehicle_id: &VehicleId,
        entry: MaintenanceEntry,
    ) -> Result<DriveChainIdentity> {
        let mut store = self.store.lock();
        let mut identity = store
            .get_identity(vehicle_id)?
            .ok_or_else(|| Error::identity_not_found(vehicle_id))?;

        let before = identity.health_score;
        identity.bump_health(self.sim.maintenance_bump());
        identity.maintenance_log_hash = self.sim.tx_hash();
        identity.last_maintenance_update = Utc::now();
        store.put_identity(identity.clone())?;

        info!(
            vehicle_id = %vehicle_id,
            health_before = before,
            health_after = identity.health_score,
            "maintenance recorded"
        );
        debug!(vehicle_id = %vehicle_id, entry = ?entry, "maintenance entry");
        Ok(identity)
    }

    /// Append a verification valid for one year.
    pub fn verify_vehicle(
        &self,
        vehicle_id: &VehicleId,
        verifier_address: Address,
        evidence: VerificationEvidence,
    ) -> Result<VehicleVerification> {
        let now = Utc::now();
        let verification = VehicleVerification {
            id: self.sim.id(now),
            vehicle_id: vehicle_id.clone(),
            verification_hash: self.sim.tx_hash(),
            verified_at: now,
            verifier_address,
            expires_at: Some(VehicleVerification::default_expiry(now)),
            is_valid: true,
            evidence,
        };
        self.store.lock().append_verification(verification.clone())?;
        info!(
            vehicle_id = %vehicle_id,
            kind = verification.evidence.kind(),
            verifier = %verification.verifier_address,
            "vehicle verified"
        );
        Ok(verification)
    }

    /// Verifications of a vehicle, oldest first.
    pub fn verifications(&self, vehicle_id: &VehicleId) -> Result<Vec<VehicleVerification>> {
        self.store.lock().verifications(vehicle_id)
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    fn append_tx(&self, store: &mut S, spec: TxSpec, now: DateTime<Utc>) -> Result<()> {
        let tx = BlockchainTransaction {
            id: self.sim.id(now),
            tx_hash: spec.tx_hash,
            block_number: spec.block_number,
            timestamp: now,
            from: spec.from,
            to: spec.to,
            value: spec.value,
            gas_used: self.sim.gas_used(),
            status: TransactionStatus::Confirmed,
            tx_type: spec.tx_type,
        };
        debug!(
            tx_hash = %tx.tx_hash,
            tx_type = ?tx.tx_type,
            block = tx.block_number,
            "transaction appended"
        );
        store.append_transaction(tx)
    }

    /// Transactions sent from or to `address` (exact, case-sensitive).
    pub fn transactions_by_address(
        &self,
        address: &Address,
    ) -> Result<Vec<BlockchainTransaction>> {
        self.store.lock().transactions_by_address(address)
    }

    /// Get a transaction by hash.
    pub fn transaction_by_hash(&self, tx_hash: &TxHash) -> Result<BlockchainTransaction> {
        self.store
            .lock()
            .transaction_by_hash(tx_hash)?
            .ok_or_else(|| Error::transaction_not_found(tx_hash))
    }

    // ========================================================================
    // Network & utilities
    // ========================================================================

    /// All supported networks.
    pub fn supported_networks(&self) -> Vec<NetworkInfo> {
        supported_networks()
    }

    /// Look up a network by chain id.
    pub fn network(&self, chain_id: u64) -> Result<NetworkInfo> {
        network(chain_id)
    }

    /// Static gas estimate.
    pub fn gas_estimate(&self) -> GasEstimate {
        GasEstimate::simulated()
    }

    /// Simulated token prices.
    pub fn token_prices(&self) -> Vec<TokenPrice> {
        self.sim.token_prices(Utc::now())
    }

    /// Explorer link for a transaction on the configured chain.
    pub fn explorer_tx_link(&self, tx_hash: &TxHash) -> String {
        explorer_tx_link(tx_hash.as_str(), self.config.chain_id)
    }

    /// Explorer link for an address on the configured chain.
    pub fn explorer_address_link(&self, address: &Address) -> String {
        explorer_address_link(address.as_str(), self.config.chain_id)
    }

    /// `{first 6}...{last 4}` display form.
    pub fn shorten_address(&self, address: &Address) -> String {
        shorten_address(address.as_str())
    }

    /// A freshly generated wallet address.
    pub fn mock_wallet_address(&self) -> Address {
        self.sim.address()
    }

    /// Copy of every store.
    pub fn snapshot(&self) -> Result<LedgerSnapshot> {
        self.store.lock().snapshot()
    }
}
