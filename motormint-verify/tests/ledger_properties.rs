//! Integration tests for ledger invariants under random operation sequences.
//!
//! Drives a strict-policy ledger through arbitrary registrations, transfers
//! and escrow moves, and checks after every step that:
//! - every invariant still holds,
//! - logs only grow,
//! - a failed operation leaves the ledger exactly as it was.

use chrono::{Duration, Utc};
use motormint_chain::{LedgerConfig, VehicleLedger};
use motormint_core::{
    Address, Currency, DisputeResolution, EscrowId, MaintenanceEntry, NewEscrow, RegisterVehicle,
    TransferType, VehicleId, VerificationEvidence,
};
use motormint_verify::{verify_ledger, verify_transition, LedgerInvariants};
use proptest::prelude::*;

const VEHICLES: usize = 3;
const WALLETS: [&str; 3] = [
    "0x1111111111111111111111111111111111111111",
    "0x2222222222222222222222222222222222222222",
    "0x3333333333333333333333333333333333333333",
];

#[derive(Debug, Clone)]
enum Op {
    Register { vehicle: usize, owner: usize },
    Transfer { vehicle: usize, to: usize, gift: bool },
    CreateEscrow { vehicle: usize, seller: usize, buyer: usize },
    Release { escrow: usize },
    Cancel { escrow: usize },
    Dispute { escrow: usize },
    Resolve { escrow: usize, refund: bool },
    Maintain { vehicle: usize },
    Verify { vehicle: usize },
}

fn arb_op() -> impl Strategy<Value = Op> {
    let vehicle = 0..VEHICLES;
    let wallet = 0..WALLETS.len();
    let escrow = 0..6usize;
    prop_oneof![
        (vehicle.clone(), wallet.clone())
            .prop_map(|(vehicle, owner)| Op::Register { vehicle, owner }),
        (vehicle.clone(), wallet.clone(), any::<bool>())
            .prop_map(|(vehicle, to, gift)| Op::Transfer { vehicle, to, gift }),
        (vehicle.clone(), wallet.clone(), wallet).prop_map(|(vehicle, seller, buyer)| {
            Op::CreateEscrow { vehicle, seller, buyer }
        }),
        escrow.clone().prop_map(|escrow| Op::Release { escrow }),
        escrow.clone().prop_map(|escrow| Op::Cancel { escrow }),
        escrow.clone().prop_map(|escrow| Op::Dispute { escrow }),
        (escrow, any::<bool>()).prop_map(|(escrow, refund)| Op::Resolve { escrow, refund }),
        vehicle.clone().prop_map(|vehicle| Op::Maintain { vehicle }),
        vehicle.prop_map(|vehicle| Op::Verify { vehicle }),
    ]
}

fn vid(index: usize) -> VehicleId {
    VehicleId::new(format!("V{index}"))
}

fn wallet(index: usize) -> Address {
    Address::new(WALLETS[index])
}

/// Escrow ids by creation order; unknown indices map to a missing id.
fn escrow_id(ledger: &VehicleLedger, index: usize) -> EscrowId {
    ledger
        .snapshot()
        .unwrap()
        .escrows
        .get(index)
        .map(|e| e.id.clone())
        .unwrap_or_else(|| EscrowId::new("escrow_0_00000000"))
}

/// Apply an op; returns whether it succeeded.
fn apply(ledger: &VehicleLedger, op: &Op) -> bool {
    match *op {
        Op::Register { vehicle, owner } => ledger
            .register_vehicle(RegisterVehicle::new(
                vid(vehicle),
                wallet(owner),
                "1HGCM82633A004352",
                "ipfs://meta",
            ))
            .is_ok(),
        Op::Transfer { vehicle, to, gift } => {
            let kind = if gift { TransferType::Gift } else { TransferType::Sale };
            ledger.transfer_ownership(&vid(vehicle), wallet(to), kind).is_ok()
        }
        Op::CreateEscrow { vehicle, seller, buyer } => ledger
            .create_escrow(NewEscrow {
                vehicle_id: vid(vehicle),
                seller_address: wallet(seller),
                buyer_address: wallet(buyer),
                amount: "1.25".into(),
                currency: Currency::Usdc,
                expires_at: Utc::now() + Duration::days(14),
            })
            .is_ok(),
        Op::Release { escrow } => ledger.release_escrow(&escrow_id(ledger, escrow)).is_ok(),
        Op::Cancel { escrow } => ledger.cancel_escrow(&escrow_id(ledger, escrow)).is_ok(),
        Op::Dispute { escrow } => ledger.dispute_escrow(&escrow_id(ledger, escrow)).is_ok(),
        Op::Resolve { escrow, refund } => {
            let resolution = if refund {
                DisputeResolution::RefundBuyer
            } else {
                DisputeResolution::ReleaseToBuyer
            };
            ledger
                .resolve_dispute(&escrow_id(ledger, escrow), resolution)
                .is_ok()
        }
        Op::Maintain { vehicle } => ledger
            .record_maintenance(&vid(vehicle), MaintenanceEntry::OilChange { mileage: 5_000 })
            .is_ok(),
        Op::Verify { vehicle } => ledger
            .verify_vehicle(
                &vid(vehicle),
                wallet(0),
                VerificationEvidence::History {
                    provider: "carfax".into(),
                    report_id: "r-1".into(),
                },
            )
            .is_ok(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_strict_ledger_keeps_invariants(
        seed in any::<u64>(),
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let ledger = VehicleLedger::new(LedgerConfig::mainnet().with_seed(seed)).unwrap();
        let invariants = LedgerInvariants::all();

        for op in &ops {
            let before = ledger.snapshot().unwrap();
            let ok = apply(&ledger, op);
            let after = verify_ledger(&ledger, &invariants)
                .map_err(|e| TestCaseError::fail(format!("{op:?}: {e}")))?;

            if !ok {
                prop_assert_eq!(&before, &after, "failed {:?} changed the ledger", op);
            }
            prop_assert!(
                verify_transition(&before, &after, &invariants).is_ok(),
                "{:?} rewrote a log",
                op
            );
        }
    }

    #[test]
    fn prop_completed_escrow_moves_vehicle_to_buyer(
        seed in any::<u64>(),
        seller in 0..WALLETS.len(),
        buyer in 0..WALLETS.len(),
    ) {
        let ledger = VehicleLedger::new(LedgerConfig::mainnet().with_seed(seed)).unwrap();
        let steps = [
            Op::Register { vehicle: 0, owner: seller },
            Op::CreateEscrow { vehicle: 0, seller, buyer },
            Op::Release { escrow: 0 },
        ];
        for op in &steps {
            let ok = apply(&ledger, op);
            prop_assert!(ok, "{:?} failed", op);
        }

        let record = ledger.vehicle_record(&vid(0)).unwrap();
        prop_assert_eq!(record.current_owner, wallet(buyer));
        prop_assert!(ledger.active_escrow(&vid(0)).unwrap().is_none());
    }
}
