//! # Tampering
//!
//! Certificates that were altered after issuance, or issued under a different
//! key or program, must be rejected by both the fold step and the gate.
//! Direct use of the engine cannot mint an output the program would not
//! compute.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ma_aggregation::{
        AggregationConfig, AggregationError, AggregationOutput, AggregationService,
        AttestationEngine, Certificate, MessageAggregationApi, Payload, StateGateApi, StepKind,
        ZkpAttestationEngine,
    };
    use ma_zkp::AttestationKey;

    use crate::integration::fixtures::{engine_with_key, harness, unordered_batch, valid_entry};

    fn relabel(certificate: &Certificate, highest: u64) -> Certificate {
        Certificate::new(
            certificate.step(),
            certificate.public_input(),
            AggregationOutput::new(highest),
            certificate.proof().to_vec(),
        )
    }

    #[tokio::test]
    async fn test_inflated_output_rejected_by_gate() {
        let h = harness(0);
        let proof = h.aggregator.aggregate(&unordered_batch()).unwrap();

        let err = h.gate.apply(relabel(&proof, 1_000_000)).await.unwrap_err();
        assert!(matches!(err, AggregationError::VerificationFailed { .. }));
        assert!(!err.is_retryable());
        assert_eq!(h.gate.current().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_flipped_proof_byte_rejected() {
        let h = harness(0);
        let proof = h.aggregator.aggregate(&unordered_batch()).unwrap();

        let mut bytes = proof.proof().to_vec();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = Certificate::new(proof.step(), proof.public_input(), proof.output(), bytes);

        assert!(h.gate.apply(tampered).await.is_err());
        assert_eq!(h.gate.current().await.unwrap(), 0);
    }

    #[test]
    fn test_inflated_prior_cannot_be_extended() {
        let h = harness(0);
        let proof = h.aggregator.aggregate(&[valid_entry(3)]).unwrap();

        let err = h
            .aggregator
            .fold(4, &relabel(&proof, 900), &valid_entry(4).payload)
            .unwrap_err();
        assert!(matches!(err, AggregationError::VerificationFailed { .. }));
    }

    #[tokio::test]
    async fn test_foreign_key_certificate_rejected() {
        let h = harness(0);

        let foreign_engine = engine_with_key(0x99);
        let foreign =
            AggregationService::new(foreign_engine, AggregationConfig::default()).unwrap();
        let proof = foreign.aggregate(&[valid_entry(500)]).unwrap();

        assert!(h.aggregator.fold(501, &proof, &valid_entry(501).payload).is_err());
        assert!(h.gate.apply(proof).await.is_err());
        assert_eq!(h.gate.current().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_other_program_certificate_rejected() {
        let h = harness(0);

        // Same key, different program name
        let config = AggregationConfig::default().with_program_name("OtherProgram");
        let engine =
            Arc::new(ZkpAttestationEngine::new(&config, AttestationKey::from_bytes([0x42; 32])).unwrap());
        let other = AggregationService::new(engine, config).unwrap();
        let proof = other.aggregate(&[valid_entry(8)]).unwrap();

        let err = h.gate.apply(proof).await.unwrap_err();
        assert!(matches!(err, AggregationError::VerificationFailed { .. }));
    }

    #[test]
    fn test_engine_refuses_genesis_with_claimed_value() {
        let h = harness(0);
        let err = h
            .engine
            .attest(StepKind::Genesis, 999, None, None)
            .unwrap_err();
        assert!(matches!(err, AggregationError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_direct_fold_of_invalid_payload_cannot_raise_counter() {
        let h = harness(0);
        let genesis = h.engine.attest(StepKind::Genesis, 0, None, None).unwrap();

        let cert = h
            .engine
            .attest(
                StepKind::Fold,
                10_000,
                Some(&genesis),
                Some(&Payload::new(2, 3, 5001, 1)),
            )
            .unwrap();
        assert_eq!(cert.highest_accepted_number(), 0);

        // Relabelling the honest result to the claimed number breaks the seal
        assert!(!h.engine.verify(&relabel(&cert, 10_000)));
        assert!(h.gate.apply(relabel(&cert, 10_000)).await.is_err());

        h.gate.apply(cert).await.unwrap();
        assert_eq!(h.gate.current().await.unwrap(), 0);
    }

    #[test]
    fn test_garbage_bytes_do_not_decode() {
        assert!(matches!(
            Certificate::from_bytes(&[0xff; 3]),
            Err(AggregationError::Encoding(_))
        ));
    }
}
