//! Break-glass friction: a reason under twenty characters never opens the
//! glass, whoever asks.

use crate::support::{create_principal, setup_test_env, submit_proof, text};
use patient_records::RecordsError;
use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, Address, String};

const ROLES: [Option<&str>; 7] = [
    None,
    Some("ADMIN"),
    Some("DOCTOR"),
    Some("NURSE"),
    Some("PARAMEDIC"),
    Some("PATIENT"),
    Some("RESEARCHER"),
];

fn reason_of(len: usize) -> std::string::String {
    "r".repeat(len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_short_reason_always_invalid(role in 0usize..ROLES.len(), len in 0usize..20) {
        let ctx = setup_test_env();
        let doctor = create_principal(&ctx, "did:med:d", Some("DOCTOR"), false);
        let patient = Address::generate(&ctx.env);
        ctx.records.create_patient_record(&doctor, &patient);

        let who = create_principal(&ctx, "did:med:who", ROLES[role], false);
        let p = submit_proof(&ctx, &who);
        let reason = String::from_str(&ctx.env, &reason_of(len));

        prop_assert_eq!(
            ctx.records.try_break_glass_access(&who, &patient, &reason, &p),
            Err(Ok(RecordsError::InvalidInput))
        );
        prop_assert!(ctx.records.get_emergency_grant(&patient, &who).is_none());
    }

    #[test]
    fn prop_long_reason_opens_for_clinicians_only(
        role in 0usize..ROLES.len(),
        len in 20usize..120,
    ) {
        let ctx = setup_test_env();
        let doctor = create_principal(&ctx, "did:med:d", Some("DOCTOR"), false);
        let patient = Address::generate(&ctx.env);
        ctx.records.create_patient_record(&doctor, &patient);

        let who = create_principal(&ctx, "did:med:who", ROLES[role], false);
        let p = submit_proof(&ctx, &who);
        let reason = String::from_str(&ctx.env, &reason_of(len));
        let clinical = matches!(ROLES[role], Some("DOCTOR") | Some("NURSE") | Some("PARAMEDIC"));

        let result = ctx.records.try_break_glass_access(&who, &patient, &reason, &p);
        if clinical {
            prop_assert!(result.is_ok());
            let any = text(&ctx, "any");
            prop_assert!(ctx.records.has_valid_emergency_access(&patient, &who, &any));
        } else {
            prop_assert_eq!(result, Err(Ok(RecordsError::NotClinicalRole)));
        }
    }
}
