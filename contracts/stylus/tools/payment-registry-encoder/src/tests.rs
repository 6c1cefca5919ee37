#[cfg(test)]
mod tests {
    use crate::calldata::{
        decode_get_intent, decode_get_receipt, encode_cancel_intent, encode_create_intent,
        encode_update_intent, IIntentRegistry, IReceiptRegistry, ViewDecodeError,
    };
    use crate::facts::{decode_fact, FactDecodeError, RegistryFact};
    use crate::hash::{content_hash, parse_hash, reference_hash, HashParseError};
    use crate::replay::{LedgerMirror, ReceiptMismatch, ReplayError};
    use alloy_primitives::{address, keccak256, Address, B256, U256};
    use alloy_sol_types::{SolCall, SolEvent};
    use payment_registry_types::{
        revert::{encode_revert, revert_kind},
        CommitterUpdated, CreateIntentParams, ErrorKind, ExecutorUpdated, FailReason,
        IntentCancelled, IntentCreated, IntentStatus, IntentUpdated, PaymentIntent,
        ReceiptCommitted, ReceiptProof, RecipientType, RegistryError, RoutePreference,
        UpdateIntentParams,
    };

    const EXECUTOR: Address = address!("00000000000000000000000000000000000000e1");

    fn create_params() -> CreateIntentParams {
        CreateIntentParams {
            external_reference_id: reference_hash("order-8812"),
            amount: U256::from(1000u64),
            sender_hash: content_hash(b"sender"),
            recipient_type: RecipientType::Qr,
            recipient_hash: content_hash(b"recipient"),
            metadata_hash: content_hash(b"{\"memo\":\"rent\"}"),
            preference: RoutePreference::Default,
            chosen_provider_ref_hash: reference_hash("provider-a"),
            deadline: 3600,
        }
    }

    fn created(id: u64) -> RegistryFact {
        RegistryFact::IntentCreated(IntentCreated {
            id: U256::from(id),
            externalReferenceId: B256::repeat_byte(0xee),
            amount: U256::from(1000u64),
            senderHash: B256::repeat_byte(0x01),
            recipientType: RecipientType::Mobile as u8,
            recipientHash: B256::repeat_byte(0x02),
            metadataHash: B256::repeat_byte(0x03),
            deadline: 3600,
        })
    }

    fn updated(id: u64, status: IntentStatus) -> RegistryFact {
        RegistryFact::IntentUpdated(IntentUpdated {
            id: U256::from(id),
            status: status as u8,
            chosenProviderRefHash: B256::repeat_byte(0x04),
            lastFailReason: FailReason::None as u8,
        })
    }

    fn receipt(id: u64, final_status: IntentStatus, version: u32) -> RegistryFact {
        RegistryFact::ReceiptCommitted(ReceiptCommitted {
            intentId: U256::from(id),
            receiptHash: B256::repeat_byte(0x11),
            receiptVersion: version,
            providerRefHash: B256::repeat_byte(0x22),
            finalStatus: final_status as u8,
            finalReason: FailReason::None as u8,
        })
    }

    #[test]
    fn test_content_hash_is_keccak() {
        assert_eq!(content_hash(b"recipient"), keccak256(b"recipient"));
        assert_eq!(reference_hash("abc"), keccak256(b"abc"));
    }

    #[test]
    fn test_parse_hash() {
        let h = B256::repeat_byte(0xab);
        assert_eq!(parse_hash(&h.to_string()), Ok(h));
        assert_eq!(parse_hash(&"ab".repeat(32)), Ok(h));
        assert_eq!(parse_hash("0x1234"), Err(HashParseError::WrongLength(2)));
        assert_eq!(parse_hash(&"zz".repeat(32)), Err(HashParseError::InvalidHex));
    }

    #[test]
    fn test_create_intent_selector_matches_stylus_signature() {
        let calldata = encode_create_intent(&create_params());
        let signature =
            "createIntent((bytes32,uint256,bytes32,uint8,bytes32,bytes32,uint8,bytes32,uint64))";
        assert_eq!(&calldata[..4], &keccak256(signature.as_bytes())[..4]);
        // Static tuple: 9 inline words.
        assert_eq!(calldata.len(), 4 + 9 * 32);
    }

    #[test]
    fn test_update_and_cancel_calldata_layout() {
        let update = UpdateIntentParams {
            status: IntentStatus::Routed,
            chosen_provider_ref_hash: reference_hash("provider-b"),
            attempts: 2,
            last_fail_reason: FailReason::None,
            last_fail_detail_hash: B256::ZERO,
            deadline: 7200,
        };
        let calldata = encode_update_intent(U256::from(5u64), &update);
        assert_eq!(calldata.len(), 4 + 7 * 32);
        assert_eq!(U256::from_be_slice(&calldata[4..36]), U256::from(5u64));
        assert_eq!(calldata[4 + 32 + 31], IntentStatus::Routed as u8);

        let cancel = encode_cancel_intent(U256::from(5u64));
        assert_eq!(&cancel[..4], &keccak256(b"cancelIntent(uint256)")[..4]);
    }

    #[test]
    fn test_decode_get_intent_view() {
        let intent = PaymentIntent::create(U256::from(1u64), &create_params(), 42).unwrap();
        let returned = IIntentRegistry::getIntentCall::abi_encode_returns(&(intent.to_abi(),));
        assert_eq!(returned.len(), 16 * 32);
        assert_eq!(decode_get_intent(&returned), Ok(intent));

        let zero = PaymentIntent::default().to_abi();
        let empty = IIntentRegistry::getIntentCall::abi_encode_returns(&(zero,));
        assert_eq!(decode_get_intent(&empty), Ok(PaymentIntent::default()));

        assert_eq!(decode_get_intent(&[0u8; 10]), Err(ViewDecodeError::Malformed));
    }

    #[test]
    fn test_decode_get_receipt_rejects_out_of_range_status() {
        let mut abi = ReceiptProof::default().to_abi();
        abi.6 = 12;
        let returned = IReceiptRegistry::getReceiptCall::abi_encode_returns(&(abi,));
        assert!(matches!(
            decode_get_receipt(&returned),
            Err(ViewDecodeError::Registry(RegistryError::InvalidEnumValue { value: 12, .. }))
        ));
    }

    #[test]
    fn test_fact_log_roundtrip_preserves_field_order() {
        let fact = created(1);
        let log = fact.encode_log_data();
        assert_eq!(log.topics()[0], IntentCreated::SIGNATURE_HASH);
        assert_eq!(log.topics()[1], B256::from(U256::from(1u64)));
        assert_eq!(decode_fact(log.topics(), &log.data), Ok(fact));
    }

    #[test]
    fn test_decode_fact_errors() {
        assert_eq!(decode_fact(&[], &[]), Err(FactDecodeError::MissingTopic));

        let unknown = B256::repeat_byte(0x99);
        assert_eq!(
            decode_fact(&[unknown], &[]),
            Err(FactDecodeError::UnknownEvent(unknown))
        );

        let log = created(1).encode_log_data();
        assert_eq!(
            decode_fact(log.topics(), &log.data[..32]),
            Err(FactDecodeError::Malformed)
        );
    }

    #[test]
    fn test_replay_lifecycle_and_roles() {
        let facts = vec![
            RegistryFact::ExecutorUpdated(ExecutorUpdated {
                executor: EXECUTOR,
                authorized: true,
            }),
            created(1),
            updated(1, IntentStatus::Quoting),
            updated(1, IntentStatus::Routed),
            updated(1, IntentStatus::Sent),
            updated(1, IntentStatus::Confirmed),
            created(2),
            RegistryFact::IntentCancelled(IntentCancelled { id: U256::from(2u64) }),
            RegistryFact::CommitterUpdated(CommitterUpdated {
                committer: EXECUTOR,
                authorized: false,
            }),
            receipt(1, IntentStatus::Confirmed, 1),
        ];

        let mut mirror = LedgerMirror::new();
        mirror.apply_all(&facts).unwrap();

        assert_eq!(mirror.last_id(), U256::from(2u64));
        assert_eq!(
            mirror.intent(U256::from(1u64)).unwrap().status,
            IntentStatus::Confirmed
        );
        assert_eq!(
            mirror.intent(U256::from(2u64)).unwrap().status,
            IntentStatus::Cancelled
        );
        assert!(mirror.is_executor(EXECUTOR));
        assert!(!mirror.is_committer(EXECUTOR));
        assert!(mirror.receipt_mismatches().is_empty());
    }

    #[test]
    fn test_replay_rejects_impossible_histories() {
        let mut mirror = LedgerMirror::new();
        assert_eq!(
            mirror.apply(&created(2)),
            Err(ReplayError::NonSequentialId {
                expected: U256::from(1u64),
                got: U256::from(2u64)
            })
        );

        mirror
            .apply_all(&[created(1), updated(1, IntentStatus::Failed)])
            .unwrap();
        assert_eq!(
            mirror.apply(&updated(1, IntentStatus::Quoting)),
            Err(ReplayError::UpdateAfterTerminal {
                id: U256::from(1u64),
                status: IntentStatus::Failed
            })
        );
        assert_eq!(
            mirror.intent(U256::from(1u64)).unwrap().status,
            IntentStatus::Failed
        );

        mirror
            .apply_all(&[created(2), updated(2, IntentStatus::Pending)])
            .unwrap();
        assert_eq!(
            mirror.apply(&RegistryFact::IntentCancelled(IntentCancelled {
                id: U256::from(2u64)
            })),
            Err(ReplayError::CancelNotAllowed {
                id: U256::from(2u64),
                status: IntentStatus::Pending
            })
        );
    }

    #[test]
    fn test_replay_rejects_mutation_of_unseen_intent() {
        let mut mirror = LedgerMirror::new();
        mirror.apply(&created(1)).unwrap();

        assert_eq!(
            mirror.apply(&updated(2, IntentStatus::Quoting)),
            Err(ReplayError::UnknownIntent { id: U256::from(2u64) })
        );
        assert_eq!(
            mirror.apply(&RegistryFact::IntentCancelled(IntentCancelled {
                id: U256::from(2u64)
            })),
            Err(ReplayError::UnknownIntent { id: U256::from(2u64) })
        );
        assert!(mirror.intent(U256::from(2u64)).is_none());

        mirror.apply(&created(2)).unwrap();
        assert_eq!(
            mirror.intent(U256::from(2u64)).unwrap().status,
            IntentStatus::Created
        );
    }

    #[test]
    fn test_receipt_overwrite_and_mismatch_detection() {
        let mut mirror = LedgerMirror::new();
        mirror
            .apply_all(&[
                created(1),
                updated(1, IntentStatus::Failed),
                receipt(1, IntentStatus::Confirmed, 1),
                created(2),
                receipt(2, IntentStatus::Confirmed, 1),
                receipt(3, IntentStatus::Confirmed, 1),
            ])
            .unwrap();

        assert_eq!(
            mirror.receipt_mismatches(),
            vec![
                ReceiptMismatch {
                    intent_id: U256::from(1u64),
                    asserted: IntentStatus::Confirmed,
                    observed: Some(IntentStatus::Failed),
                },
                ReceiptMismatch {
                    intent_id: U256::from(2u64),
                    asserted: IntentStatus::Confirmed,
                    observed: Some(IntentStatus::Created),
                },
                ReceiptMismatch {
                    intent_id: U256::from(3u64),
                    asserted: IntentStatus::Confirmed,
                    observed: None,
                },
            ]
        );

        // A corrected receipt replaces the first one entirely.
        mirror.apply(&receipt(1, IntentStatus::Failed, 2)).unwrap();
        let stored = mirror.receipt(U256::from(1u64)).unwrap();
        assert_eq!(stored.receipt_version, 2);
        assert_eq!(stored.final_status, IntentStatus::Failed);
        assert_eq!(mirror.receipt_mismatches().len(), 2);
    }

    #[test]
    fn test_revert_payloads_classify_by_kind() {
        let err = RegistryError::IntentNotCancellable {
            id: U256::from(1u64),
            status: IntentStatus::Sent,
        };
        assert_eq!(revert_kind(&encode_revert(&err)), Some(ErrorKind::StateConflict));

        let unknown = RegistryError::UnknownIntent { id: U256::from(8u64) };
        assert_eq!(
            revert_kind(&encode_revert(&unknown)),
            Some(ErrorKind::StateConflict)
        );
    }
}
