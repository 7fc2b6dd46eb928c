//! Ledger invariants.
//!
//! Each invariant inspects a [`LedgerSnapshot`]; transition invariants
//! compare two snapshots taken before and after an operation.

use std::collections::HashSet;

use motormint_chain::LedgerSnapshot;
use motormint_core::{
    EscrowStatus, OwnershipStatus, TransferType, MAX_FRAUD_SCORE, MAX_HEALTH_SCORE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An invariant that must hold for the ledger.
pub trait Invariant {
    /// Name of this invariant.
    fn name(&self) -> &'static str;

    /// Check if the invariant holds for a snapshot.
    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation>;

    /// Check if the invariant holds across a transition.
    fn check_transition(
        &self,
        _old: &LedgerSnapshot,
        new: &LedgerSnapshot,
    ) -> Result<(), InvariantViolation> {
        self.check(new)
    }
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("invariant '{name}' violated: {message}")]
pub struct InvariantViolation {
    /// Invariant name.
    pub name: String,
    /// Violation message.
    pub message: String,
    /// Offending entity (vehicle id, escrow id or tx hash), if any.
    pub subject: Option<String>,
}

impl InvariantViolation {
    /// Create a new violation.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            subject: None,
        }
    }

    /// Attach the offending entity.
    pub fn for_subject(mut self, subject: impl ToString) -> Self {
        self.subject = Some(subject.to_string());
        self
    }
}

/// Invariant: a vehicle is IN_ESCROW exactly when it has an ACTIVE escrow,
/// and LOCKED exactly when it has a DISPUTED one.
#[derive(Debug, Clone, Copy)]
pub struct EscrowStatusConsistency;

impl Invariant for EscrowStatusConsistency {
    fn name(&self) -> &'static str {
        "escrow_status_consistency"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation> {
        let pairs = [
            (OwnershipStatus::InEscrow, EscrowStatus::Active),
            (OwnershipStatus::Locked, EscrowStatus::Disputed),
        ];
        for (id, record) in &snapshot.vehicles {
            for (held, escrow_status) in pairs {
                let is_held = record.ownership_status == held;
                let has_escrow = snapshot.escrow_count(id, escrow_status) > 0;
                if is_held != has_escrow {
                    return Err(InvariantViolation::new(
                        self.name(),
                        format!(
                            "vehicle is {} but {} {} escrow",
                            record.ownership_status,
                            if has_escrow { "has an" } else { "has no" },
                            escrow_status
                        ),
                    )
                    .for_subject(id));
                }
            }
        }
        Ok(())
    }
}

/// Invariant: at most one ACTIVE escrow per vehicle id.
#[derive(Debug, Clone, Copy)]
pub struct SingleActiveEscrow;

impl Invariant for SingleActiveEscrow {
    fn name(&self) -> &'static str {
        "single_active_escrow"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        for escrow in snapshot.escrows.iter().filter(|e| e.is_active()) {
            if !seen.insert(&escrow.vehicle_id) {
                return Err(InvariantViolation::new(
                    self.name(),
                    format!("second ACTIVE escrow {}", escrow.id),
                )
                .for_subject(&escrow.vehicle_id));
            }
        }
        Ok(())
    }
}

/// Invariant: each vehicle's history starts with its REGISTRATION, every
/// entry names the prior owner, and the last owner is the current one.
#[derive(Debug, Clone, Copy)]
pub struct OwnershipChain;

impl Invariant for OwnershipChain {
    fn name(&self) -> &'static str {
        "ownership_chain"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation> {
        let violation = |id: &dyn ToString, message: String| {
            InvariantViolation::new("ownership_chain", message).for_subject(id.to_string())
        };

        for (id, record) in &snapshot.vehicles {
            let history = snapshot.ownership.get(id).map(Vec::as_slice).unwrap_or_default();
            let Some(first) = history.first() else {
                return Err(violation(id, "registered vehicle has no history".into()));
            };
            if first.transfer_type != TransferType::Registration || first.previous_owner.is_some()
            {
                return Err(violation(id, "history does not start with REGISTRATION".into()));
            }
            if let Some(late) = history[1..]
                .iter()
                .find(|r| r.transfer_type == TransferType::Registration)
            {
                return Err(violation(id, format!("late REGISTRATION entry {}", late.id)));
            }
            for pair in history.windows(2) {
                if pair[1].previous_owner.as_ref() != Some(&pair[0].owner_address) {
                    return Err(violation(
                        id,
                        format!("entry {} does not follow {}", pair[1].id, pair[0].id),
                    ));
                }
            }
            if let Some(last) = history.last() {
                if last.owner_address != record.current_owner {
                    return Err(violation(
                        id,
                        format!(
                            "last recorded owner {} differs from current owner {}",
                            last.owner_address, record.current_owner
                        ),
                    ));
                }
            }
        }

        if let Some(orphan) = snapshot
            .ownership
            .keys()
            .find(|id| !snapshot.vehicles.contains_key(*id))
        {
            return Err(violation(orphan, "history for an unregistered vehicle".into()));
        }
        Ok(())
    }
}

/// Invariant: ledger transaction hashes are unique.
#[derive(Debug, Clone, Copy)]
pub struct UniqueTxHashes;

impl Invariant for UniqueTxHashes {
    fn name(&self) -> &'static str {
        "unique_tx_hashes"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        for tx in &snapshot.transactions {
            if !seen.insert(&tx.tx_hash) {
                return Err(InvariantViolation::new(self.name(), "duplicate transaction hash")
                    .for_subject(&tx.tx_hash));
            }
        }
        Ok(())
    }
}

/// Invariant: every registered vehicle has exactly one identity, keyed by
/// its own vehicle id.
#[derive(Debug, Clone, Copy)]
pub struct UniqueDriveChainIdentity;

impl Invariant for UniqueDriveChainIdentity {
    fn name(&self) -> &'static str {
        "unique_drivechain_identity"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation> {
        if let Some(id) = snapshot
            .vehicles
            .keys()
            .find(|id| !snapshot.identities.contains_key(*id))
        {
            return Err(
                InvariantViolation::new(self.name(), "registered vehicle has no identity")
                    .for_subject(id),
            );
        }

        for (key, identity) in &snapshot.identities {
            if identity.vehicle_id != *key {
                return Err(InvariantViolation::new(
                    self.name(),
                    format!("identity stored under {key} names {}", identity.vehicle_id),
                )
                .for_subject(key));
            }
        }
        Ok(())
    }
}

/// Invariant: health in `0..=100`, fraud in `[0, 10)`.
#[derive(Debug, Clone, Copy)]
pub struct ScoreBounds;

impl Invariant for ScoreBounds {
    fn name(&self) -> &'static str {
        "score_bounds"
    }

    fn check(&self, snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation> {
        for (id, identity) in &snapshot.identities {
            if !identity.scores_in_bounds() {
                return Err(InvariantViolation::new(
                    self.name(),
                    format!(
                        "health {} (max {MAX_HEALTH_SCORE}), fraud {} (max {MAX_FRAUD_SCORE})",
                        identity.health_score, identity.fraud_score
                    ),
                )
                .for_subject(id));
            }
        }
        Ok(())
    }
}

/// Transition invariant: ownership histories and the transaction ledger
/// only ever grow, and never rewrite existing entries.
#[derive(Debug, Clone, Copy)]
pub struct AppendOnlyLogs;

impl Invariant for AppendOnlyLogs {
    fn name(&self) -> &'static str {
        "append_only_logs"
    }

    fn check(&self, _snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation> {
        // Single snapshot always satisfies
        Ok(())
    }

    fn check_transition(
        &self,
        old: &LedgerSnapshot,
        new: &LedgerSnapshot,
    ) -> Result<(), InvariantViolation> {
        if !new.transactions.starts_with(&old.transactions) {
            return Err(InvariantViolation::new(
                self.name(),
                format!(
                    "transaction ledger rewritten: {} -> {} entries",
                    old.transactions.len(),
                    new.transactions.len()
                ),
            ));
        }
        for (id, history) in &old.ownership {
            let kept = new
                .ownership
                .get(id)
                .is_some_and(|current| current.starts_with(history));
            if !kept {
                return Err(
                    InvariantViolation::new(self.name(), "ownership history rewritten")
                        .for_subject(id),
                );
            }
        }
        Ok(())
    }
}

/// Collection of ledger invariants.
#[derive(Debug, Clone, Default)]
pub struct LedgerInvariants {
    /// Enable the escrow/vehicle status check.
    pub escrow_status_consistency: bool,
    /// Enable the single ACTIVE escrow check.
    pub single_active_escrow: bool,
    /// Enable the ownership chain check.
    pub ownership_chain: bool,
    /// Enable the unique transaction hash check.
    pub unique_tx_hashes: bool,
    /// Enable the DriveChain identity check.
    pub unique_drivechain_identity: bool,
    /// Enable the score bounds check.
    pub score_bounds: bool,
    /// Enable the append-only check (transitions only).
    pub append_only_logs: bool,
}

impl LedgerInvariants {
    /// Create an empty invariant set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with all invariants enabled.
    pub fn all() -> Self {
        Self {
            escrow_status_consistency: true,
            single_active_escrow: true,
            ownership_chain: true,
            unique_tx_hashes: true,
            unique_drivechain_identity: true,
            score_bounds: true,
            append_only_logs: true,
        }
    }

    /// Require escrow/vehicle status consistency.
    pub fn require_escrow_status_consistency(mut self) -> Self {
        self.escrow_status_consistency = true;
        self
    }

    /// Require at most one ACTIVE escrow per vehicle.
    pub fn require_single_active_escrow(mut self) -> Self {
        self.single_active_escrow = true;
        self
    }

    /// Require a well-formed ownership chain.
    pub fn require_ownership_chain(mut self) -> Self {
        self.ownership_chain = true;
        self
    }

    /// Require unique transaction hashes.
    pub fn require_unique_tx_hashes(mut self) -> Self {
        self.unique_tx_hashes = true;
        self
    }

    /// Require one DriveChain identity per vehicle.
    pub fn require_unique_drivechain_identity(mut self) -> Self {
        self.unique_drivechain_identity = true;
        self
    }

    /// Require scores within bounds.
    pub fn require_score_bounds(mut self) -> Self {
        self.score_bounds = true;
        self
    }

    /// Require append-only logs across transitions.
    pub fn require_append_only_logs(mut self) -> Self {
        self.append_only_logs = true;
        self
    }

    fn enabled(&self) -> Vec<&'static dyn Invariant> {
        let table: [(bool, &'static dyn Invariant); 7] = [
            (self.escrow_status_consistency, &EscrowStatusConsistency),
            (self.single_active_escrow, &SingleActiveEscrow),
            (self.ownership_chain, &OwnershipChain),
            (self.unique_tx_hashes, &UniqueTxHashes),
            (self.unique_drivechain_identity, &UniqueDriveChainIdentity),
            (self.score_bounds, &ScoreBounds),
            (self.append_only_logs, &AppendOnlyLogs),
        ];
        table
            .into_iter()
            .filter_map(|(on, invariant)| on.then_some(invariant))
            .collect()
    }

    /// Names of the enabled invariants.
    pub fn names(&self) -> Vec<&'static str> {
        self.enabled().iter().map(|i| i.name()).collect()
    }

    /// Verify a snapshot, stopping at the first violation.
    pub fn verify(&self, snapshot: &LedgerSnapshot) -> Result<(), InvariantViolation> {
        for invariant in self.enabled() {
            invariant.check(snapshot)?;
        }
        Ok(())
    }

    /// Verify a state transition.
    pub fn verify_transition(
        &self,
        old: &LedgerSnapshot,
        new: &LedgerSnapshot,
    ) -> Result<(), InvariantViolation> {
        for invariant in self.enabled() {
            invariant.check_transition(old, new)?;
        }
        Ok(())
    }

    /// Every violation in a snapshot, one per failing invariant.
    pub fn violations(&self, snapshot: &LedgerSnapshot) -> Vec<InvariantViolation> {
        self.enabled()
            .into_iter()
            .filter_map(|invariant| invariant.check(snapshot).err())
            .collect()
    }
}
