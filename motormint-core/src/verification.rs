//! Vehicle verifications.
//!
//! A verification is an attestation about a vehicle signed (in simulation)
//! by a verifier address. Evidence is typed per verification kind, with an
//! opaque JSON variant for kinds the ledger has no schema for.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{Address, TxHash, VehicleId, VerificationId};

/// Validity period of a verification, in days.
pub const VERIFICATION_VALIDITY_DAYS: i64 = 365;

/// What a verification attests to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationEvidence {
    /// VIN matched the registered vehicle.
    Vin { vin: String },
    /// Title document checked.
    #[serde(rename_all = "camelCase")]
    Title { state: String, title_number: String },
    /// Physical inspection.
    Inspection {
        inspector: String,
        passed: bool,
        #[serde(default)]
        notes: String,
    },
    /// Third-party history report.
    #[serde(rename_all = "camelCase")]
    History { provider: String, report_id: String },
    /// Any other kind, payload kept as-is.
    Opaque {
        label: String,
        payload: serde_json::Value,
    },
}

impl VerificationEvidence {
    /// Short kind label.
    pub fn kind(&self) -> &str {
        match self {
            VerificationEvidence::Vin { .. } => "VIN",
            VerificationEvidence::Title { .. } => "TITLE",
            VerificationEvidence::Inspection { .. } => "INSPECTION",
            VerificationEvidence::History { .. } => "HISTORY",
            VerificationEvidence::Opaque { label, .. } => label,
        }
    }
}

/// Attestation appended to a vehicle's verification list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleVerification {
    pub id: VerificationId,
    pub vehicle_id: VehicleId,
    pub verification_hash: TxHash,
    pub verified_at: DateTime<Utc>,
    pub verifier_address: Address,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_valid: bool,
    pub evidence: VerificationEvidence,
}

impl VehicleVerification {
    /// Expiry for a verification made at `at`.
    pub fn default_expiry(at: DateTime<Utc>) -> DateTime<Utc> {
        at + Duration::days(VERIFICATION_VALIDITY_DAYS)
    }

    /// Valid and not yet expired at `now`.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.is_valid && self.expires_at.map_or(true, |exp| now < exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verification(expires_at: Option<DateTime<Utc>>) -> VehicleVerification {
        VehicleVerification {
            id: VerificationId::new("ver_1"),
            vehicle_id: VehicleId::new("V1"),
            verification_hash: TxHash::new("0x01"),
            verified_at: Utc::now(),
            verifier_address: Address::new("0x02"),
            expires_at,
            is_valid: true,
            evidence: VerificationEvidence::Vin {
                vin: "1HGCM82633A004352".into(),
            },
        }
    }

    #[test]
    fn test_is_current() {
        let now = Utc::now();
        assert!(verification(None).is_current(now));
        assert!(verification(Some(VehicleVerification::default_expiry(now))).is_current(now));
        assert!(!verification(Some(now)).is_current(now));

        let mut v = verification(None);
        v.is_valid = false;
        assert!(!v.is_current(now));
    }

    #[test]
    fn test_evidence_kinds() {
        let title = VerificationEvidence::Title {
            state: "CA".into(),
            title_number: "T-1".into(),
        };
        assert_eq!(title.kind(), "TITLE");

        let opaque = VerificationEvidence::Opaque {
            label: "EMISSIONS".into(),
            payload: serde_json::json!({ "co2": 120 }),
        };
        assert_eq!(opaque.kind(), "EMISSIONS");
    }

    #[test]
    fn test_evidence_wire_shape() {
        let json = serde_json::to_value(VerificationEvidence::History {
            provider: "carfax".into(),
            report_id: "R9".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "HISTORY");
        assert_eq!(json["reportId"], "R9");
    }
}
