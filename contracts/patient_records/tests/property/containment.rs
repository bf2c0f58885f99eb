//! Policy containment: a delegated request succeeds only while the referenced
//! policy names the caller and patient, is active and is unexpired.

use crate::support::{create_principal, setup_test_env, submit_bound_proof, text};
use patient_records::{DelegationPermission, RecordsError};
use proptest::prelude::*;
use soroban_sdk::testutils::Ledger as _;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_request_follows_policy_state(
        toggles in proptest::collection::vec(any::<bool>(), 0..8),
        validity in 1u64..10_000,
        at in 0u64..20_000,
    ) {
        let ctx = setup_test_env();
        let doctor = create_principal(&ctx, "did:med:d", Some("DOCTOR"), false);
        let patient = create_principal(&ctx, "did:med:p", None, false);
        let paramedic = create_principal(&ctx, "did:med:pa", Some("PARAMEDIC"), true);
        ctx.records.create_patient_record(&doctor, &patient);

        let id = ctx.records.create_policy(
            &patient,
            &paramedic,
            &text(&ctx, "vitals"),
            &DelegationPermission::Read,
            &validity,
        );
        let mut active = true;
        for toggle in toggles {
            ctx.records.update_policy(&patient, &id, &toggle);
            active = toggle;
        }

        ctx.env.ledger().set_timestamp(at);
        let (raw, _) = submit_bound_proof(&ctx, &paramedic);
        let result = ctx.records.try_request_delegated_emergency_access(
            &paramedic,
            &patient,
            &text(&ctx, "respiratory distress"),
            &raw,
            &id,
        );

        if !active {
            prop_assert_eq!(result, Err(Ok(RecordsError::PolicyInactive)));
        } else if at >= validity {
            prop_assert_eq!(result, Err(Ok(RecordsError::PolicyExpired)));
        } else {
            prop_assert!(result.is_ok());
        }
        prop_assert_eq!(ctx.records.get_policy(&id).unwrap().active, active);
    }

    #[test]
    fn prop_policy_ids_never_reused(
        count in 1usize..8,
        deactivate in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let ctx = setup_test_env();
        let doctor = create_principal(&ctx, "did:med:d", Some("DOCTOR"), false);
        let patient = create_principal(&ctx, "did:med:p", None, false);
        let nurse = create_principal(&ctx, "did:med:n", Some("NURSE"), false);
        ctx.records.create_patient_record(&doctor, &patient);

        let mut last = 0u64;
        for i in 0..count {
            let id = ctx.records.create_policy(
                &patient,
                &nurse,
                &text(&ctx, "labs"),
                &DelegationPermission::ReadWrite,
                &100,
            );
            prop_assert_eq!(id, last + 1);
            last = id;
            if deactivate[i] {
                ctx.records.update_policy(&patient, &id, &false);
            }
        }
        prop_assert_eq!(ctx.records.get_policy_count(), count as u64);
        prop_assert_eq!(ctx.records.get_patient_policies(&patient).len(), count as u32);
    }
}
