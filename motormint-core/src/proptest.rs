//! Property-based tests for core types.
//!
//! Uses proptest to check generator shapes and status-machine properties
//! over arbitrary seeds and inputs.

use chrono::DateTime;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::drivechain::{drive_chain_id, DriveChainIdentity, MAX_HEALTH_SCORE};
use crate::escrow::{Currency, EscrowStatus, EscrowTerms, MAX_ESCROW_DAYS, MIN_ESCROW_DAYS};
use crate::id::{
    shorten_address, Address, EscrowId, GeneratedId, IdentityId, TxHash, VehicleId,
};

// ============================================================================
// Strategies
// ============================================================================

fn arb_escrow_status() -> impl Strategy<Value = EscrowStatus> {
    prop_oneof![
        Just(EscrowStatus::Pending),
        Just(EscrowStatus::Active),
        Just(EscrowStatus::Completed),
        Just(EscrowStatus::Cancelled),
        Just(EscrowStatus::Disputed),
    ]
}

/// Timestamps between 2001 and 2286.
fn arb_millis() -> impl Strategy<Value = i64> {
    1_000_000_000_000i64..10_000_000_000_000i64
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Generated hashes and addresses are always well formed and lowercase.
    #[test]
    fn prop_generated_shapes(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let hash = TxHash::generate(&mut rng);
        let address = Address::generate(&mut rng);
        prop_assert!(hash.is_well_formed());
        prop_assert!(address.is_well_formed());
        prop_assert_eq!(hash.as_str().to_lowercase(), hash.as_str());
        prop_assert_eq!(address.as_str().to_lowercase(), address.as_str());
    }

    /// Shortened addresses keep the head and tail of long inputs.
    #[test]
    fn prop_shorten_long_address(seed in any::<u64>()) {
        let address = Address::generate(&mut StdRng::seed_from_u64(seed));
        let short = shorten_address(address.as_str());
        prop_assert_eq!(short.len(), 13);
        prop_assert!(short.starts_with(&address.as_str()[..6]));
        prop_assert!(short.ends_with(&address.as_str()[38..]));
    }

    /// Entity ids embed prefix and timestamp.
    #[test]
    fn prop_entity_id_embeds_time(millis in arb_millis(), seed in any::<u64>()) {
        let at = DateTime::from_timestamp_millis(millis).unwrap();
        let id = EscrowId::generate(at, &mut StdRng::seed_from_u64(seed));
        let expected = format!("{}_{}_", EscrowId::PREFIX, millis);
        prop_assert!(id.as_str().starts_with(&expected));

        let dc = IdentityId::generate(at, &mut StdRng::seed_from_u64(seed));
        prop_assert!(dc.as_str().starts_with("dc_"));
    }

    /// DriveChain ids are uppercase and prefixed.
    #[test]
    fn prop_drive_chain_id_shape(millis in arb_millis(), seed in any::<u64>()) {
        let at = DateTime::from_timestamp_millis(millis).unwrap();
        let id = drive_chain_id(at, &mut StdRng::seed_from_u64(seed));
        prop_assert!(id.starts_with("DC-"));
        prop_assert_eq!(id.to_uppercase(), id);
    }

    /// Terminal statuses only ever lead to settlement, never back to ACTIVE.
    #[test]
    fn prop_no_transition_reopens(from in arb_escrow_status(), to in arb_escrow_status()) {
        if from.can_transition_to(to) {
            prop_assert!(to.is_terminal());
            prop_assert!(from == EscrowStatus::Active || from == EscrowStatus::Disputed);
        }
        if from.is_settled() {
            prop_assert!(!from.can_transition_to(to));
        }
    }

    /// Escrow term validation matches the day range exactly.
    #[test]
    fn prop_escrow_days_range(days in 0u32..200) {
        let terms = EscrowTerms {
            vehicle_id: VehicleId::new("V1"),
            seller_address: Address::new("0xa"),
            buyer_address: Address::new("0xb"),
            amount: "1".into(),
            currency: Currency::Moto,
            duration_days: days,
        };
        let in_range = (MIN_ESCROW_DAYS..=MAX_ESCROW_DAYS).contains(&days);
        prop_assert_eq!(terms.validate().is_ok(), in_range);
    }

    /// Health bumps never leave the score range.
    #[test]
    fn prop_health_bump_bounded(start in 0u8..=100, bump in any::<u8>()) {
        let now = chrono::Utc::now();
        let mut identity = DriveChainIdentity {
            id: IdentityId::new("dc_1"),
            vehicle_id: VehicleId::new("V1"),
            vin: "1HGCM82633A004352".into(),
            drive_chain_id: "DC-1".into(),
            health_score: start,
            maintenance_log_hash: TxHash::new("0x0"),
            last_maintenance_update: now,
            fraud_score: 0.0,
            is_authentic: true,
            registered_at: now,
        };
        identity.bump_health(bump);
        prop_assert!(identity.health_score <= MAX_HEALTH_SCORE);
        prop_assert!(identity.health_score >= start);
    }
}
