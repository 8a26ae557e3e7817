use privote_api::zk::ProofBackend;
use privote_crypto::{recover_credential, LocalKeyWallet};
use privote_types::error::{ExecutionError, ProofError};
use zk_types::{CircuitArtifact, CircuitInputs, CircuitKind, HashScheme, ProveOptions};

use crate::{HonkDriver, HonkDriverConfig};

fn driver() -> HonkDriver {
    HonkDriver::new(HonkDriverConfig::default())
}

fn signed_circuit() -> CircuitArtifact {
    CircuitArtifact {
        kind: CircuitKind::SignedBallot,
        bytecode: b"signed-ballot bytecode".to_vec(),
    }
}

fn inscription_circuit() -> CircuitArtifact {
    CircuitArtifact {
        kind: CircuitKind::Inscription,
        bytecode: b"inscription bytecode".to_vec(),
    }
}

/// A shape-valid signed witness backed by a real key and signature.
fn signed_inputs(message: &str, is_upvote: bool) -> CircuitInputs {
    let wallet = LocalKeyWallet::random();
    let signature = wallet.sign_blocking(message).unwrap();
    let credential = recover_credential(message, &signature).unwrap();
    CircuitInputs::signed_ballot(
        &credential.public_key_x,
        &credential.public_key_y,
        is_upvote,
        &credential.digest,
        &credential.signature,
    )
    .unwrap()
}

#[tokio::test]
async fn execute_accepts_valid_signed_witness() {
    let circuit = signed_circuit();
    let inputs = signed_inputs("1700000000,1,0xaaaa,0,true", true);

    let trace = driver().execute(&circuit, &inputs).await.unwrap();
    assert_eq!(trace.circuit_id(), circuit.circuit_id());
    assert!(!trace.assignment().is_empty());
}

#[tokio::test]
async fn execute_rejects_signature_over_different_message() {
    let circuit = signed_circuit();
    let inputs = signed_inputs("1700000000,1,0xaaaa,0,true", true);

    // Same key and signature, different claimed digest.
    let tampered = match inputs {
        CircuitInputs::SignedBallot {
            public_key_x,
            public_key_y,
            is_upvote,
            signature,
            ..
        } => CircuitInputs::signed_ballot(
            &public_key_x,
            &public_key_y,
            is_upvote,
            &[0x42u8; 32],
            &signature,
        )
        .unwrap(),
        _ => unreachable!(),
    };

    let err = driver().execute(&circuit, &tampered).await.unwrap_err();
    assert!(matches!(err, ExecutionError::UnsatisfiedConstraint(_)));
}

#[tokio::test]
async fn execute_rejects_kind_mismatch() {
    let circuit = signed_circuit();
    let inputs = CircuitInputs::inscription("0x2", "0x1234", "0xff").unwrap();

    let err = driver().execute(&circuit, &inputs).await.unwrap_err();
    assert!(matches!(err, ExecutionError::AbiMismatch { .. }));
}

#[tokio::test]
async fn execute_rejects_zero_generator() {
    let circuit = inscription_circuit();
    let inputs = CircuitInputs::inscription("0x0", "0x1234", "0xff").unwrap();

    let err = driver().execute(&circuit, &inputs).await.unwrap_err();
    assert!(matches!(err, ExecutionError::UnsatisfiedConstraint(_)));
}

#[tokio::test]
async fn prove_then_verify_round_trips() {
    let driver = driver();
    let circuit = signed_circuit();
    let inputs = signed_inputs("1700000000,2,0xbbbb,0,false", false);
    let opts = ProveOptions {
        hash_scheme: HashScheme::Keccak,
    };

    let trace = driver.execute(&circuit, &inputs).await.unwrap();
    let proof = driver.prove(&circuit, &trace, &opts).await.unwrap();

    assert_eq!(proof.hash_scheme, HashScheme::Keccak);
    // message_hash and the ballot value are the disclosed publics.
    assert_eq!(proof.public_inputs.len(), 2);
    assert_eq!(proof.public_inputs[1], vec![0u8]);
    assert!(driver.verify(&proof).await.unwrap());
}

#[tokio::test]
async fn verify_rejects_tampered_public_input() {
    let driver = driver();
    let circuit = signed_circuit();
    let inputs = signed_inputs("1700000000,3,0xcccc,0,false", false);

    let trace = driver.execute(&circuit, &inputs).await.unwrap();
    let mut proof = driver
        .prove(&circuit, &trace, &ProveOptions::default())
        .await
        .unwrap();

    // Flip the ballot value after proving.
    proof.public_inputs[1] = vec![1u8];
    assert!(!driver.verify(&proof).await.unwrap());
}

#[tokio::test]
async fn verify_rejects_hash_scheme_mismatch() {
    let driver = driver();
    let circuit = signed_circuit();
    let inputs = signed_inputs("1700000000,4,0xdddd,0,true", true);
    let opts = ProveOptions {
        hash_scheme: HashScheme::Keccak,
    };

    let trace = driver.execute(&circuit, &inputs).await.unwrap();
    let mut proof = driver.prove(&circuit, &trace, &opts).await.unwrap();

    proof.hash_scheme = HashScheme::Poseidon;
    assert!(!driver.verify(&proof).await.unwrap());
}

#[tokio::test]
async fn verify_rejects_garbage_proof_bytes() {
    let driver = driver();
    let circuit = signed_circuit();
    let inputs = signed_inputs("1700000000,5,0xeeee,0,true", true);

    let trace = driver.execute(&circuit, &inputs).await.unwrap();
    let mut proof = driver
        .prove(&circuit, &trace, &ProveOptions::default())
        .await
        .unwrap();

    proof.proof = vec![0xff; 7];
    let err = driver.verify(&proof).await.unwrap_err();
    assert!(matches!(err, ProofError::MalformedProof(_)));
}

#[tokio::test]
async fn prove_rejects_unpinned_circuit() {
    let config = HonkDriverConfig {
        signed_ballot_circuit_hash: hex::encode([0u8; 32]),
        ..Default::default()
    };
    let driver = HonkDriver::new(config);
    let circuit = signed_circuit();
    let inputs = signed_inputs("1700000000,6,0xffff,0,true", true);

    let trace = driver.execute(&circuit, &inputs).await.unwrap();
    let err = driver
        .prove(&circuit, &trace, &ProveOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProofError::UnknownCircuit(_)));
}

#[tokio::test]
async fn prove_accepts_matching_pin() {
    let circuit = signed_circuit();
    let config = HonkDriverConfig {
        signed_ballot_circuit_hash: hex::encode(circuit.circuit_id()),
        ..Default::default()
    };
    let driver = HonkDriver::new(config);
    let inputs = signed_inputs("1700000000,7,0x1234,0,false", false);

    let trace = driver.execute(&circuit, &inputs).await.unwrap();
    let proof = driver
        .prove(&circuit, &trace, &ProveOptions::default())
        .await
        .unwrap();
    assert!(driver.verify(&proof).await.unwrap());
}

#[tokio::test]
async fn prove_rejects_trace_from_another_circuit() {
    let driver = driver();
    let circuit = signed_circuit();
    let other = CircuitArtifact {
        kind: CircuitKind::SignedBallot,
        bytecode: b"different bytecode".to_vec(),
    };
    let inputs = signed_inputs("1700000000,8,0x5678,0,true", true);

    let trace = driver.execute(&other, &inputs).await.unwrap();
    let err = driver
        .prove(&circuit, &trace, &ProveOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProofError::GenerationFailed(_)));
}
