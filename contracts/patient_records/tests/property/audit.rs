//! Audit completeness: every successful operation appends exactly one entry
//! naming the patient, every failed one appends nothing.

use crate::support::{create_principal, setup_test_env, submit_proof, text, TestContext};
use proptest::prelude::*;
use soroban_sdk::testutils::Ledger as _;
use soroban_sdk::{Address, Bytes};

#[derive(Debug, Clone)]
enum Op {
    Update { actor: usize },
    Read { actor: usize },
    BreakGlass { actor: usize, reason_len: usize },
    Revoke { provider: usize },
    Advance { seconds: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4).prop_map(|actor| Op::Update { actor }),
        (0usize..4).prop_map(|actor| Op::Read { actor }),
        (0usize..4, 10usize..40)
            .prop_map(|(actor, reason_len)| Op::BreakGlass { actor, reason_len }),
        (0usize..4).prop_map(|provider| Op::Revoke { provider }),
        (1u64..20_000).prop_map(|seconds| Op::Advance { seconds }),
    ]
}

fn staff(ctx: &TestContext) -> [Address; 4] {
    [
        create_principal(ctx, "did:med:doc", Some("DOCTOR"), false),
        create_principal(ctx, "did:med:nurse", Some("NURSE"), false),
        create_principal(ctx, "did:med:res", Some("RESEARCHER"), false),
        create_principal(ctx, "did:med:pa", Some("PARAMEDIC"), true),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_one_entry_per_success(ops in proptest::collection::vec(op_strategy(), 1..16)) {
        let ctx = setup_test_env();
        let staff = staff(&ctx);
        let patient = create_principal(&ctx, "did:med:pt", None, false);
        ctx.records.create_patient_record(&staff[0], &patient);
        let vitals = text(&ctx, "vitals");

        for op in ops {
            let before = ctx.audit.query_by_subject(&patient).len();
            let succeeded = match op {
                Op::Update { actor } => {
                    let p = submit_proof(&ctx, &staff[actor]);
                    let blob = Bytes::from_slice(&ctx.env, b"v");
                    ctx.records
                        .try_update_data(&staff[actor], &patient, &vitals, &blob, &p)
                        .is_ok()
                }
                Op::Read { actor } => {
                    let p = submit_proof(&ctx, &staff[actor]);
                    ctx.records.try_get_data(&staff[actor], &patient, &vitals, &p).is_ok()
                }
                Op::BreakGlass { actor, reason_len } => {
                    let p = submit_proof(&ctx, &staff[actor]);
                    let reason = soroban_sdk::String::from_str(&ctx.env, &"b".repeat(reason_len));
                    ctx.records.try_break_glass_access(&staff[actor], &patient, &reason, &p).is_ok()
                }
                Op::Revoke { provider } => ctx
                    .records
                    .try_revoke_emergency_access(&patient, &staff[provider])
                    .is_ok(),
                Op::Advance { seconds } => {
                    let now = ctx.env.ledger().timestamp();
                    ctx.env.ledger().set_timestamp(now + seconds);
                    continue;
                }
            };

            let after = ctx.audit.query_by_subject(&patient).len();
            prop_assert_eq!(after, before + u32::from(succeeded));
        }
        prop_assert!(ctx.audit.verify_chain());
    }
}
