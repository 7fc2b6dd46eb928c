//! Escrow agreements and their status machine.
//!
//! ```text
//!             ┌──────────► COMPLETED
//!             │                ▲
//!   ACTIVE ───┼──────────► DISPUTED
//!             │                ▼
//!             └──────────► CANCELLED
//! ```
//!
//! Escrows are created directly in `ACTIVE`; `PENDING` exists on the wire
//! but no operation produces it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorCode, Result};
use crate::id::{Address, EscrowId, TxHash, VehicleId};

/// Shortest escrow term accepted by [`EscrowTerms`].
pub const MIN_ESCROW_DAYS: u32 = 1;

/// Longest escrow term accepted by [`EscrowTerms`].
pub const MAX_ESCROW_DAYS: u32 = 90;

/// Settlement currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eth,
    Usdc,
    Moto,
}

impl Currency {
    /// Ticker symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Eth => "ETH",
            Currency::Usdc => "USDC",
            Currency::Moto => "MOTO",
        }
    }
}

/// Escrow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EscrowStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
    Disputed,
}

impl EscrowStatus {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            EscrowStatus::Pending => "PENDING",
            EscrowStatus::Active => "ACTIVE",
            EscrowStatus::Completed => "COMPLETED",
            EscrowStatus::Cancelled => "CANCELLED",
            EscrowStatus::Disputed => "DISPUTED",
        }
    }

    /// No automated transition leaves this status.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EscrowStatus::Completed | EscrowStatus::Cancelled | EscrowStatus::Disputed
        )
    }

    /// Funds have either been paid out or refunded.
    pub fn is_settled(self) -> bool {
        matches!(self, EscrowStatus::Completed | EscrowStatus::Cancelled)
    }

    /// Whether the strict status machine allows `self -> next`.
    pub fn can_transition_to(self, next: EscrowStatus) -> bool {
        use EscrowStatus::*;
        matches!(
            (self, next),
            (Active, Completed)
                | (Active, Cancelled)
                | (Active, Disputed)
                | (Disputed, Completed)
                | (Disputed, Cancelled)
        )
    }
}

impl std::fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release condition attached to an escrow. Carried, never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowCondition {
    pub id: String,
    pub escrow_id: EscrowId,
    pub description: String,
    pub is_met: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<Address>,
}

/// Sale agreement holding buyer funds against a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escrow {
    pub id: EscrowId,
    pub vehicle_id: VehicleId,
    pub seller_address: Address,
    pub buyer_address: Address,
    pub escrow_contract_address: Address,
    /// Decimal amount as supplied by the caller.
    pub amount: String,
    pub currency: Currency,
    pub status: EscrowStatus,
    pub creation_tx_hash: TxHash,
    pub release_tx_hash: Option<TxHash>,
    pub cancel_tx_hash: Option<TxHash>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Stored only. Nothing acts on expiry.
    pub expires_at: DateTime<Utc>,
    pub conditions: Vec<EscrowCondition>,
}

impl Escrow {
    /// Check if the escrow is active.
    pub fn is_active(&self) -> bool {
        self.status == EscrowStatus::Active
    }

    /// Check if `expires_at` has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Check if the address is the seller or the buyer (exact match).
    pub fn involves(&self, address: &Address) -> bool {
        self.seller_address == *address || self.buyer_address == *address
    }
}

/// Escrow creation input with an explicit expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEscrow {
    pub vehicle_id: VehicleId,
    pub seller_address: Address,
    pub buyer_address: Address,
    pub amount: String,
    pub currency: Currency,
    pub expires_at: DateTime<Utc>,
}

/// Escrow creation input expressed as a term in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowTerms {
    pub vehicle_id: VehicleId,
    pub seller_address: Address,
    pub buyer_address: Address,
    pub amount: String,
    pub currency: Currency,
    pub duration_days: u32,
}

impl EscrowTerms {
    /// Check amount and duration.
    pub fn validate(&self) -> Result<()> {
        if self.vehicle_id.as_str().is_empty() {
            return Err(Error::invalid_input("vehicle id is required"));
        }
        if self.amount.trim().is_empty() {
            return Err(Error::invalid(
                ErrorCode::InvalidEscrowTerms,
                "amount is required",
            ));
        }
        if !(MIN_ESCROW_DAYS..=MAX_ESCROW_DAYS).contains(&self.duration_days) {
            return Err(Error::invalid(
                ErrorCode::InvalidEscrowTerms,
                format!(
                    "duration must be between {MIN_ESCROW_DAYS} and {MAX_ESCROW_DAYS} days, got {}",
                    self.duration_days
                ),
            ));
        }
        Ok(())
    }

    /// Resolve the term against `now`.
    pub fn into_new_escrow(self, now: DateTime<Utc>) -> NewEscrow {
        NewEscrow {
            vehicle_id: self.vehicle_id,
            seller_address: self.seller_address,
            buyer_address: self.buyer_address,
            amount: self.amount,
            currency: self.currency,
            expires_at: now + Duration::days(i64::from(self.duration_days)),
        }
    }
}

/// Outcome of a disputed escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeResolution {
    /// Complete the sale: vehicle to buyer, funds to seller.
    ReleaseToBuyer,
    /// Cancel the sale: funds back to buyer.
    RefundBuyer,
}

impl DisputeResolution {
    /// Status the escrow ends in.
    pub fn target_status(self) -> EscrowStatus {
        match self {
            DisputeResolution::ReleaseToBuyer => EscrowStatus::Completed,
            DisputeResolution::RefundBuyer => EscrowStatus::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(days: u32) -> EscrowTerms {
        EscrowTerms {
            vehicle_id: VehicleId::new("V1"),
            seller_address: Address::new("0xaaaa"),
            buyer_address: Address::new("0xbbbb"),
            amount: "1.5".into(),
            currency: Currency::Eth,
            duration_days: days,
        }
    }

    #[test]
    fn test_strict_transitions() {
        use EscrowStatus::*;
        assert!(Active.can_transition_to(Completed));
        assert!(Active.can_transition_to(Cancelled));
        assert!(Active.can_transition_to(Disputed));
        assert!(Disputed.can_transition_to(Completed));
        assert!(Disputed.can_transition_to(Cancelled));

        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Active));
        assert!(!Active.can_transition_to(Active));
        assert!(!Active.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Active));
        assert!(!Disputed.can_transition_to(Active));
    }

    #[test]
    fn test_terminal_and_settled() {
        assert!(EscrowStatus::Disputed.is_terminal());
        assert!(!EscrowStatus::Disputed.is_settled());
        assert!(EscrowStatus::Completed.is_settled());
        assert!(!EscrowStatus::Active.is_terminal());
    }

    #[test]
    fn test_terms_validation() {
        assert!(terms(7).validate().is_ok());
        assert!(terms(MIN_ESCROW_DAYS).validate().is_ok());
        assert!(terms(MAX_ESCROW_DAYS).validate().is_ok());
        assert_eq!(
            terms(0).validate().unwrap_err().code(),
            ErrorCode::InvalidEscrowTerms
        );
        assert!(terms(91).validate().is_err());

        let mut t = terms(7);
        t.amount = "  ".into();
        assert_eq!(t.validate().unwrap_err().code(), ErrorCode::InvalidEscrowTerms);
    }

    #[test]
    fn test_terms_expiry() {
        let now = Utc::now();
        let new = terms(7).into_new_escrow(now);
        assert_eq!(new.expires_at - now, Duration::days(7));
        assert_eq!(new.amount, "1.5");
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Currency::Usdc).unwrap(), "\"USDC\"");
        assert_eq!(
            serde_json::to_string(&EscrowStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        let status: EscrowStatus = serde_json::from_str("\"DISPUTED\"").unwrap();
        assert_eq!(status, EscrowStatus::Disputed);
    }

    #[test]
    fn test_dispute_resolution_targets() {
        assert_eq!(
            DisputeResolution::ReleaseToBuyer.target_status(),
            EscrowStatus::Completed
        );
        assert_eq!(
            DisputeResolution::RefundBuyer.target_status(),
            EscrowStatus::Cancelled
        );
    }
}
