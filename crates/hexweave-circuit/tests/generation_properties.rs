//! Property-based tests for circuit generation.

use hexweave_circuit::{Basis, MemoryConfig, NoiseParams, generate_memory_circuit};
use proptest::prelude::*;

fn arb_config() -> impl Strategy<Value = MemoryConfig> {
    (
        (1_u32..=3).prop_map(|k| 2 * k + 1),
        1_u32..=4,
        prop_oneof![Just(Basis::Z), Just(Basis::X)],
        0.0_f64..=0.01,
    )
        .prop_map(|(distance, rounds, basis, p)| {
            MemoryConfig::new(distance, rounds, basis).with_noise(NoiseParams::uniform(p))
        })
}

proptest! {
    /// Rebuilding the same configuration yields byte-identical text.
    #[test]
    fn test_generation_is_deterministic(config in arb_config()) {
        let first = generate_memory_circuit(&config).unwrap();
        let second = generate_memory_circuit(&config).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Structural invariants that hold for every valid configuration:
    /// one observable, newline termination, a repeat block exactly when
    /// more than one round was requested, and only negative rec offsets.
    #[test]
    fn test_structural_invariants(config in arb_config()) {
        let circuit = generate_memory_circuit(&config).unwrap();

        prop_assert!(circuit.ends_with('\n'));
        prop_assert_eq!(circuit.matches("OBSERVABLE_INCLUDE").count(), 1);
        prop_assert_eq!(circuit.contains("REPEAT"), config.rounds > 1);
        prop_assert!(!circuit.contains("rec[0]"));
        prop_assert!(!circuit.contains("rec[1"));

        // The observable is the final statement.
        let last = circuit.lines().last().unwrap();
        prop_assert!(last.starts_with("OBSERVABLE_INCLUDE(0)"));
        prop_assert_eq!(last.matches("rec[").count(), config.distance as usize);
    }

    /// Zero-probability channels leave no trace in the text.
    #[test]
    fn test_noiseless_means_no_channels(
        distance in (1_u32..=3).prop_map(|k| 2 * k + 1),
        rounds in 1_u32..=3,
        basis in prop_oneof![Just(Basis::Z), Just(Basis::X)],
    ) {
        let config = MemoryConfig::new(distance, rounds, basis);
        let circuit = generate_memory_circuit(&config).unwrap();
        for needle in ["X_ERROR", "Z_ERROR", "DEPOLARIZE1(", "DEPOLARIZE2("] {
            prop_assert!(!circuit.contains(needle));
        }
    }
}
