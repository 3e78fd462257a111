//! End-to-end tests for memory-experiment generation.
//!
//! The distance-3 expectations are golden transcripts derived by hand
//! from the extraction schedule and the measurement-stream arithmetic;
//! they pin the full emission order, every detector's back-references,
//! and the observable support.

use hexweave_circuit::{
    Basis, CircuitError, MemoryConfig, NoiseParams, generate_memory_circuit,
};

const HEADER_D3: &str = "\
QUBIT_COORDS(0, 0) 0
QUBIT_COORDS(0, 2) 2
QUBIT_COORDS(0, 4) 4
QUBIT_COORDS(2, 0) 10
QUBIT_COORDS(2, 2) 12
QUBIT_COORDS(2, 4) 14
QUBIT_COORDS(4, 0) 20
QUBIT_COORDS(4, 2) 22
QUBIT_COORDS(4, 4) 24
QUBIT_COORDS(0, 1) 1
QUBIT_COORDS(1, 3) 8
QUBIT_COORDS(3, 1) 16
QUBIT_COORDS(4, 3) 23
QUBIT_COORDS(1, 0) 5
QUBIT_COORDS(1, 2) 7
QUBIT_COORDS(1, 4) 9
QUBIT_COORDS(3, 0) 15
QUBIT_COORDS(3, 2) 17
QUBIT_COORDS(3, 4) 19
";

/// The Hadamard-bracketed X-check block for d = 3 (noiseless).
const X_CHECK_D3: &str = "\
H 1 8 16 23
CNOT 8 9 16 17
TICK
CNOT 8 7 9 4 16 15 17 12
TICK
CNOT 1 2 7 12 9 14 15 20 17 22
TICK
CNOT 1 0 7 2 8 9 15 10 16 17 23 24
TICK
CNOT 8 7 16 15 23 22
TICK
H 1 8 16 23
TICK
MR 7 9 15 17 1 8 16 23
";

/// The Z-check block for d = 3 (noiseless).
const Z_CHECK_D3: &str = "\
CNOT 0 5 4 9 12 17
TICK
CNOT 10 5 12 7 14 9 20 15 22 17 24 19
TICK
CNOT 2 7 10 15 14 19
TICK
MR 5 7 9 15 17 19
";

fn golden_d3_z_r1() -> String {
    let mut expected = String::new();
    expected.push_str(HEADER_D3);
    expected.push_str("R 0 2 4 10 12 14 20 22 24\n");
    expected.push_str("R 1 8 16 23\n");
    expected.push_str("R 5 7 9 15 17 19\n");
    expected.push_str("TICK\n");
    expected.push_str(X_CHECK_D3);
    expected.push_str(
        "DETECTOR(1, 2, 0) rec[-8]\n\
         DETECTOR(1, 4, 0) rec[-7]\n\
         DETECTOR(3, 0, 0) rec[-6]\n\
         DETECTOR(3, 2, 0) rec[-5]\n",
    );
    expected.push_str(Z_CHECK_D3);
    expected.push_str(
        "DETECTOR(1, 0, 0) rec[-6] rec[-5]\n\
         DETECTOR(1, 4, 0) rec[-4]\n\
         DETECTOR(3, 0, 0) rec[-3]\n\
         DETECTOR(3, 3, 0) rec[-2] rec[-1]\n",
    );
    expected.push_str(X_CHECK_D3);
    expected.push_str(
        "DETECTOR(0, 1, 0) rec[-4] rec[-18] rec[-2] rec[-16]\n\
         DETECTOR(1, 3, 0) rec[-3] rec[-17] rec[-1] rec[-15]\n\
         DETECTOR(1, 2, 0) rec[-8]\n\
         DETECTOR(1, 4, 0) rec[-7]\n\
         DETECTOR(3, 0, 0) rec[-6]\n\
         DETECTOR(3, 2, 0) rec[-5]\n",
    );
    expected.push_str("M 0 2 4 10 12 14 20 22 24\n");
    expected.push_str(
        "DETECTOR(1, 0, 1) rec[-23] rec[-22] rec[-9] rec[-6] rec[-8] rec[-5]\n\
         DETECTOR(1, 4, 1) rec[-21] rec[-7] rec[-16] rec[-4]\n\
         DETECTOR(3, 0, 1) rec[-20] rec[-6] rec[-15] rec[-3]\n\
         DETECTOR(3, 2, 1) rec[-19] rec[-18] rec[-5] rec[-2] rec[-4] rec[-1]\n",
    );
    expected.push_str("OBSERVABLE_INCLUDE(0) rec[-9] rec[-8] rec[-7]\n");
    expected
}

fn golden_d3_x_r1() -> String {
    let mut expected = String::new();
    expected.push_str(HEADER_D3);
    expected.push_str("RX 0 2 4 10 12 14 20 22 24\n");
    expected.push_str("R 1 8 16 23\n");
    expected.push_str("R 5 7 9 15 17 19\n");
    expected.push_str("TICK\n");
    expected.push_str(Z_CHECK_D3);
    expected.push_str(X_CHECK_D3);
    expected.push_str(
        "DETECTOR(0, 1, 0) rec[-4] rec[-2]\n\
         DETECTOR(1, 3, 0) rec[-3] rec[-1]\n\
         DETECTOR(1, 2, 0) rec[-8]\n\
         DETECTOR(1, 4, 0) rec[-7]\n\
         DETECTOR(3, 0, 0) rec[-6]\n\
         DETECTOR(3, 2, 0) rec[-5]\n",
    );
    expected.push_str(Z_CHECK_D3);
    expected.push_str(
        "DETECTOR(1, 1, 0) rec[-6] rec[-20] rec[-5] rec[-19]\n\
         DETECTOR(1, 4, 0) rec[-4] rec[-18]\n\
         DETECTOR(3, 0, 0) rec[-3] rec[-17]\n\
         DETECTOR(3, 3, 0) rec[-2] rec[-1] rec[-16] rec[-15]\n",
    );
    expected.push_str("MX 0 2 4 10 12 14 20 22 24\n");
    expected.push_str(
        "DETECTOR(0, 1, 1) rec[-19] rec[-9] rec[-8] rec[-17] rec[-6] rec[-5] rec[-3] rec[-2]\n\
         DETECTOR(1, 3, 1) rec[-18] rec[-8] rec[-7] rec[-5] rec[-4] rec[-16] rec[-2] rec[-1]\n",
    );
    expected.push_str("OBSERVABLE_INCLUDE(0) rec[-9] rec[-6] rec[-3]\n");
    expected
}

#[test]
fn test_golden_distance_three_z_basis() {
    let config = MemoryConfig::new(3, 1, Basis::Z);
    let circuit = generate_memory_circuit(&config).unwrap();
    assert_eq!(circuit, golden_d3_z_r1());
}

#[test]
fn test_golden_distance_three_x_basis() {
    let config = MemoryConfig::new(3, 1, Basis::X);
    let circuit = generate_memory_circuit(&config).unwrap();
    assert_eq!(circuit, golden_d3_x_r1());
}

#[test]
fn test_steady_round_block() {
    let config = MemoryConfig::new(3, 2, Basis::Z);
    let circuit = generate_memory_circuit(&config).unwrap();

    let block = "\
REPEAT 1 {
\tTICK
\tCNOT 0 5 4 9 12 17
\tTICK
\tCNOT 10 5 12 7 14 9 20 15 22 17 24 19
\tTICK
\tCNOT 2 7 10 15 14 19
\tTICK
\tMR 5 7 9 15 17 19
\tDETECTOR(1, 1, 0) rec[-6] rec[-20] rec[-5] rec[-19]
\tDETECTOR(1, 4, 0) rec[-4] rec[-18]
\tDETECTOR(3, 0, 0) rec[-3] rec[-17]
\tDETECTOR(3, 3, 0) rec[-2] rec[-1] rec[-16] rec[-15]
\tH 1 8 16 23
\tCNOT 8 9 16 17
\tTICK
\tCNOT 8 7 9 4 16 15 17 12
\tTICK
\tCNOT 1 2 7 12 9 14 15 20 17 22
\tTICK
\tCNOT 1 0 7 2 8 9 15 10 16 17 23 24
\tTICK
\tCNOT 8 7 16 15 23 22
\tTICK
\tH 1 8 16 23
\tTICK
\tMR 7 9 15 17 1 8 16 23
\tDETECTOR(0, 1, 0) rec[-4] rec[-18] rec[-2] rec[-16]
\tDETECTOR(1, 3, 0) rec[-3] rec[-17] rec[-1] rec[-15]
\tDETECTOR(1, 2, 0) rec[-8]
\tDETECTOR(1, 4, 0) rec[-7]
\tDETECTOR(3, 0, 0) rec[-6]
\tDETECTOR(3, 2, 0) rec[-5]
}
";
    assert!(circuit.contains(block), "steady block mismatch");

    // Terminal detectors carry the final round number; the offsets are
    // periodic, so they match the single-round circuit.
    assert!(circuit.contains(
        "DETECTOR(1, 0, 2) rec[-23] rec[-22] rec[-9] rec[-6] rec[-8] rec[-5]\n"
    ));
    assert!(circuit.ends_with("OBSERVABLE_INCLUDE(0) rec[-9] rec[-8] rec[-7]\n"));
}

#[test]
fn test_single_round_has_no_repeat() {
    for basis in [Basis::Z, Basis::X] {
        let config = MemoryConfig::new(3, 1, basis);
        let circuit = generate_memory_circuit(&config).unwrap();
        assert!(!circuit.contains("REPEAT"));
    }
}

#[test]
fn test_noiseless_circuit_has_no_error_channels() {
    for basis in [Basis::Z, Basis::X] {
        let config = MemoryConfig::new(5, 3, basis);
        let circuit = generate_memory_circuit(&config).unwrap();
        assert!(!circuit.contains("X_ERROR"));
        assert!(!circuit.contains("Z_ERROR"));
        assert!(!circuit.contains("DEPOLARIZE1("));
        assert!(!circuit.contains("DEPOLARIZE2("));
    }
}

#[test]
fn test_clifford_depolarization_follows_every_clifford() {
    let config = MemoryConfig::new(3, 3, Basis::Z).with_noise(NoiseParams {
        after_clifford_depolarization: 0.001,
        ..NoiseParams::default()
    });
    let circuit = generate_memory_circuit(&config).unwrap();

    assert_eq!(circuit.matches("REPEAT").count(), 1);
    assert!(circuit.contains("REPEAT 2 {\n"));

    let lines: Vec<&str> = circuit.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let body = line.trim_start_matches('\t');
        if body.starts_with("CNOT") {
            let next = lines[i + 1].trim_start_matches('\t');
            assert!(
                next.starts_with("DEPOLARIZE2(0.001)"),
                "CNOT at line {i} not followed by DEPOLARIZE2"
            );
        }
        if body.starts_with("H ") {
            let next = lines[i + 1].trim_start_matches('\t');
            assert!(
                next.starts_with("DEPOLARIZE1(0.001)"),
                "H at line {i} not followed by DEPOLARIZE1"
            );
        }
    }
    // Only the Clifford channel was enabled.
    assert!(!circuit.contains("X_ERROR"));
    assert!(!circuit.contains("Z_ERROR"));
}

#[test]
fn test_reset_and_measure_flips() {
    let config = MemoryConfig::new(3, 1, Basis::X).with_noise(NoiseParams {
        after_reset_flip_probability: 0.125,
        before_measure_flip_probability: 0.25,
        ..NoiseParams::default()
    });
    let circuit = generate_memory_circuit(&config).unwrap();

    // Data reset in X is corrupted by a Z flip; ancilla resets in Z by X.
    assert!(circuit.contains("RX 0 2 4 10 12 14 20 22 24\nZ_ERROR(0.125) 0 2 4 10 12 14 20 22 24\n"));
    assert!(circuit.contains("R 1 8 16 23\nX_ERROR(0.125) 1 8 16 23\n"));

    // Every MR is preceded by a pre-measure flip and followed by a
    // post-reset flip, both in Z.
    assert!(circuit.contains(
        "X_ERROR(0.25) 5 7 9 15 17 19\nMR 5 7 9 15 17 19\nX_ERROR(0.125) 5 7 9 15 17 19\n"
    ));
    assert!(circuit.contains(
        "X_ERROR(0.25) 7 9 15 17 1 8 16 23\nMR 7 9 15 17 1 8 16 23\nX_ERROR(0.125) 7 9 15 17 1 8 16 23\n"
    ));

    // Terminal data measurement in X gets a Z flip first.
    assert!(circuit.contains("Z_ERROR(0.25) 0 2 4 10 12 14 20 22 24\nMX 0 2 4 10 12 14 20 22 24\n"));
}

#[test]
fn test_before_round_depolarization_placement() {
    let config = MemoryConfig::new(3, 2, Basis::Z).with_noise(NoiseParams {
        before_round_data_depolarization: 0.01,
        ..NoiseParams::default()
    });
    let circuit = generate_memory_circuit(&config).unwrap();

    // Once before round 0 (right after the reset tick), once per steady
    // round inside the block.
    assert!(circuit.contains("TICK\nDEPOLARIZE1(0.01) 0 2 4 10 12 14 20 22 24\nH 1 8 16 23\n"));
    assert!(circuit.contains("\tTICK\n\tDEPOLARIZE1(0.01) 0 2 4 10 12 14 20 22 24\n"));
}

/// Count the measurements a sampler would execute, expanding `REPEAT`.
fn executed_measurements(circuit: &str) -> usize {
    let mut total = 0;
    let mut repeat_factor = 1;
    for line in circuit.lines() {
        let body = line.trim_start_matches('\t');
        if let Some(rest) = body.strip_prefix("REPEAT ") {
            repeat_factor = rest.trim_end_matches(" {").parse::<usize>().unwrap();
            continue;
        }
        if body == "}" {
            repeat_factor = 1;
            continue;
        }
        for prefix in ["MR ", "MX ", "M "] {
            if let Some(qubits) = body.strip_prefix(prefix) {
                total += repeat_factor * qubits.split_whitespace().count();
                break;
            }
        }
    }
    total
}

#[test]
fn test_measurement_accounting() {
    for d in [3_usize, 5] {
        for rounds in [1_usize, 2, 3] {
            for basis in [Basis::Z, Basis::X] {
                let config = MemoryConfig::new(d as u32, rounds as u32, basis);
                let circuit = generate_memory_circuit(&config).unwrap();

                let data = d * d;
                let x_gauge = (d * d - 1) / 2;
                let flags = (d - 1) * (d - 1);
                let z_gauge = d * (d - 1);
                // The preparation basis gets its checks once per round; the
                // conjugate basis is swept one extra time during projection.
                let (x_sweeps, z_sweeps) = match basis {
                    Basis::Z => (rounds + 1, rounds),
                    Basis::X => (rounds, rounds + 1),
                };
                let expected = (x_gauge + flags) * x_sweeps + z_gauge * z_sweeps + data;
                assert_eq!(
                    executed_measurements(&circuit),
                    expected,
                    "d={d} rounds={rounds} basis={basis}"
                );
            }
        }
    }
}

#[test]
fn test_observable_support() {
    for d in [3_u32, 5, 7] {
        for (basis, expected_support) in [
            // Logical Z runs along the first data row.
            (Basis::Z, (0..d).map(|k| 2 * k).collect::<Vec<_>>()),
            // Logical X runs down the first data column.
            (Basis::X, (0..d).map(|k| 2 * k * (2 * d - 1)).collect()),
        ] {
            let config = MemoryConfig::new(d, 1, basis);
            let circuit = generate_memory_circuit(&config).unwrap();

            assert_eq!(circuit.matches("OBSERVABLE_INCLUDE").count(), 1);
            let observable = circuit
                .lines()
                .find(|line| line.starts_with("OBSERVABLE_INCLUDE(0)"))
                .unwrap();
            assert_eq!(observable.matches("rec[").count(), d as usize);

            // The terminal data measurements appear in ascending qubit
            // order, so the rec offsets recover the supporting qubits.
            let data_count = (d * d) as i64;
            let m_line = circuit
                .lines()
                .find(|line| line.starts_with("M ") || line.starts_with("MX "))
                .unwrap();
            let data_ids: Vec<i64> = m_line
                .split_whitespace()
                .skip(1)
                .map(|tok| tok.parse().unwrap())
                .collect();
            let support: Vec<i64> = observable
                .split_whitespace()
                .skip(1)
                .map(|tok| {
                    let offset: i64 = tok
                        .trim_start_matches("rec[")
                        .trim_end_matches(']')
                        .parse()
                        .unwrap();
                    data_ids[(data_count + offset) as usize]
                })
                .collect();
            let expected: Vec<i64> = expected_support.iter().map(|&q| q as i64).collect();
            assert_eq!(support, expected, "d={d} basis={basis}");
        }
    }
}

#[test]
fn test_generation_is_reproducible() {
    let config = MemoryConfig::new(5, 3, Basis::Z).with_noise(NoiseParams::uniform(0.001));
    let first = generate_memory_circuit(&config).unwrap();
    let second = generate_memory_circuit(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_line_is_a_known_statement() {
    const PREFIXES: [&str; 16] = [
        "QUBIT_COORDS(",
        "RX ",
        "R ",
        "H ",
        "CNOT ",
        "MR ",
        "MX ",
        "M ",
        "X_ERROR(",
        "Z_ERROR(",
        "DEPOLARIZE1(",
        "DEPOLARIZE2(",
        "TICK",
        "DETECTOR(",
        "OBSERVABLE_INCLUDE(",
        "REPEAT ",
    ];
    for basis in [Basis::Z, Basis::X] {
        let config =
            MemoryConfig::new(5, 2, basis).with_noise(NoiseParams::uniform(0.001));
        let circuit = generate_memory_circuit(&config).unwrap();
        assert!(circuit.ends_with('\n'));
        for line in circuit.lines() {
            let body = line.trim_start_matches('\t');
            let known = body == "}" || PREFIXES.iter().any(|p| body.starts_with(p));
            assert!(known, "unrecognized statement: {line:?}");
        }
    }
}

#[test]
fn test_flag_measurement_cadence() {
    // d = 5, one round, Z basis: the first MR (X-check) and the second MR
    // (Z-check) both cover every flag qubit, so each flag has exactly two
    // readings after the opening projection pair, and three in total.
    let config = MemoryConfig::new(5, 1, Basis::Z);
    let circuit = generate_memory_circuit(&config).unwrap();

    let mr_lines: Vec<&str> = circuit
        .lines()
        .filter(|line| line.starts_with("MR "))
        .collect();
    assert_eq!(mr_lines.len(), 3);

    let layout = hexweave_lattice::HeavyHexLayout::new(5).unwrap();
    for &flag in layout.flag_qubits() {
        let id = flag.0.to_string();
        for mr in &mr_lines {
            assert!(
                mr.split_whitespace().skip(1).any(|tok| tok == id),
                "flag {flag} missing from {mr:?}"
            );
        }
    }
}

#[test]
fn test_invalid_configurations_are_fatal() {
    let even = MemoryConfig::new(4, 1, Basis::Z);
    assert!(matches!(
        generate_memory_circuit(&even),
        Err(CircuitError::Lattice(_))
    ));

    let tiny = MemoryConfig::new(1, 1, Basis::Z);
    assert!(generate_memory_circuit(&tiny).is_err());

    let no_rounds = MemoryConfig::new(3, 0, Basis::Z);
    assert!(matches!(
        generate_memory_circuit(&no_rounds),
        Err(CircuitError::InvalidRounds(0))
    ));

    let bad_probability = MemoryConfig::new(3, 1, Basis::Z).with_noise(NoiseParams {
        before_round_data_depolarization: 2.0,
        ..NoiseParams::default()
    });
    assert!(matches!(
        generate_memory_circuit(&bad_probability),
        Err(CircuitError::InvalidProbability { .. })
    ));
}
