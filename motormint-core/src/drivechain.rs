//! DriveChain identities: per-vehicle health and authenticity records.
//!
//! A DriveChain identity is created alongside the on-chain record at
//! registration and is otherwise independent of ownership. Scores are
//! simulated:
//! - `health_score` in `0..=100`, seeded in `70..=99` and nudged upward by
//!   maintenance
//! - `fraud_score` in `[0, 10)`, lower is better

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::id::{IdentityId, TxHash, VehicleId};

/// Upper bound of `health_score`.
pub const MAX_HEALTH_SCORE: u8 = 100;

/// Exclusive upper bound of `fraud_score`.
pub const MAX_FRAUD_SCORE: f64 = 10.0;

/// Secondary health/authenticity record. At most one per vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveChainIdentity {
    pub id: IdentityId,
    pub vehicle_id: VehicleId,
    pub vin: String,
    pub drive_chain_id: String,
    pub health_score: u8,
    pub maintenance_log_hash: TxHash,
    pub last_maintenance_update: DateTime<Utc>,
    pub fraud_score: f64,
    pub is_authentic: bool,
    pub registered_at: DateTime<Utc>,
}

impl DriveChainIdentity {
    /// Apply a health bump, saturating at [`MAX_HEALTH_SCORE`].
    pub fn bump_health(&mut self, by: u8) {
        self.health_score = self.health_score.saturating_add(by).min(MAX_HEALTH_SCORE);
    }

    /// Check that both scores are inside their ranges.
    pub fn scores_in_bounds(&self) -> bool {
        self.health_score <= MAX_HEALTH_SCORE
            && self.fraud_score >= 0.0
            && self.fraud_score < MAX_FRAUD_SCORE
    }
}

/// Maintenance event logged against a DriveChain identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceEntry {
    OilChange {
        mileage: u64,
    },
    TireRotation {
        mileage: u64,
    },
    Inspection {
        passed: bool,
        #[serde(default)]
        notes: String,
    },
    Repair {
        description: String,
        #[serde(default)]
        cost: Option<String>,
    },
    /// Schema-less payload. The ledger does not look inside it.
    Other {
        payload: serde_json::Value,
    },
}

/// Human-facing DriveChain id: `DC-{millis base36}-{4 hex}`, uppercase.
pub fn drive_chain_id<R: RngCore + ?Sized>(at: DateTime<Utc>, rng: &mut R) -> String {
    let millis = u64::try_from(at.timestamp_millis()).unwrap_or_default();
    let suffix = rng.next_u32() & 0xffff;
    format!("DC-{}-{:04X}", to_base36(millis), suffix)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn identity(health: u8) -> DriveChainIdentity {
        let now = Utc::now();
        DriveChainIdentity {
            id: IdentityId::new("dc_1"),
            vehicle_id: VehicleId::new("V1"),
            vin: "1HGCM82633A004352".into(),
            drive_chain_id: "DC-X".into(),
            health_score: health,
            maintenance_log_hash: TxHash::new("0x00"),
            last_maintenance_update: now,
            fraud_score: 2.5,
            is_authentic: true,
            registered_at: now,
        }
    }

    #[test]
    fn test_bump_health_caps() {
        let mut id = identity(98);
        id.bump_health(4);
        assert_eq!(id.health_score, MAX_HEALTH_SCORE);

        let mut id = identity(70);
        id.bump_health(3);
        assert_eq!(id.health_score, 73);
        assert!(id.scores_in_bounds());
    }

    #[test]
    fn test_fraud_bound_is_exclusive() {
        let mut id = identity(80);
        id.fraud_score = MAX_FRAUD_SCORE;
        assert!(!id.scores_in_bounds());
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn test_drive_chain_id_shape() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let id = drive_chain_id(at, &mut StdRng::seed_from_u64(3));
        assert!(id.starts_with("DC-LOYW3V28-"));
        assert_eq!(id.len(), "DC-LOYW3V28-".len() + 4);
        assert_eq!(id, id.to_uppercase());
    }

    #[test]
    fn test_maintenance_entry_tagging() {
        let entry = MaintenanceEntry::OilChange { mileage: 42_000 };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "OIL_CHANGE");
        assert_eq!(json["mileage"], 42_000);

        let parsed: MaintenanceEntry =
            serde_json::from_str(r#"{"kind":"OTHER","payload":{"shop":"A1"}}"#).unwrap();
        assert!(matches!(parsed, MaintenanceEntry::Other { .. }));
    }
}
