//! Property-based tests for the simulator and the ledger service.

use proptest::prelude::*;

use motormint_core::{Address, RegisterVehicle, TransferType, VehicleId};

use crate::config::LedgerConfig;
use crate::ledger::VehicleLedger;
use crate::simulator::ChainSimulator;

fn arb_transfer() -> impl Strategy<Value = (u8, TransferType)> {
    (
        any::<u8>(),
        prop_oneof![Just(TransferType::Sale), Just(TransferType::Gift)],
    )
}

fn owner(byte: u8) -> Address {
    Address::new(format!("0x{}", hex::encode([byte; 20])))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Registration blocks stay inside any configured range.
    #[test]
    fn prop_block_in_configured_range(
        seed in any::<u64>(),
        base in 0u64..1_000_000_000,
        span in 1u64..10_000_000,
    ) {
        let config = LedgerConfig::mainnet().with_block_range(base, span).with_seed(seed);
        prop_assert!(config.validate().is_ok());
        let sim = ChainSimulator::new(&config);
        let block = sim.block_number();
        prop_assert!(block >= base && block < base + span);
        prop_assert!(sim.transfer_block(block) >= block);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Any run of direct transfers yields a linked history ending at the
    /// current owner.
    #[test]
    fn prop_transfers_link_history(
        seed in any::<u64>(),
        transfers in prop::collection::vec(arb_transfer(), 0..12),
    ) {
        let ledger = VehicleLedger::new(LedgerConfig::mainnet().with_seed(seed)).unwrap();
        let id = VehicleId::new("V1");
        let request = RegisterVehicle::new("V1", owner(0), "1HGCM82633A004352", "ipfs://x");
        ledger.register_vehicle(request).unwrap();

        for (byte, kind) in &transfers {
            ledger.transfer_ownership(&id, owner(*byte), *kind).unwrap();
        }

        let history = ledger.ownership_history(&id).unwrap();
        prop_assert_eq!(history.len(), transfers.len() + 1);
        for pair in history.windows(2) {
            prop_assert_eq!(pair[1].previous_owner.as_ref(), Some(&pair[0].owner_address));
        }
        let record = ledger.vehicle_record(&id).unwrap();
        prop_assert_eq!(&history[history.len() - 1].owner_address, &record.current_owner);

        // One REGISTRATION plus one TRANSFER per hop.
        prop_assert_eq!(ledger.snapshot().unwrap().transactions.len(), transfers.len() + 1);
    }
}
