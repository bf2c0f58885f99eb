#![no_main]

use access_control::{AccessControlContract, AccessControlContractClient};
use arbitrary::Arbitrary;
use audit_ledger::{AuditLedgerContract, AuditLedgerContractClient};
use common::combine_proof;
use identity::{IdentityContract, IdentityContractClient};
use libfuzzer_sys::fuzz_target;
use patient_records::{DelegationPermission, PatientRecordsContract, PatientRecordsContractClient};
use proof_ledger::{ProofLedgerContract, ProofLedgerContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{vec as svec, Address, Bytes, BytesN, Env, String, Symbol};

const ROLES: [&str; 6] = ["ADMIN", "DOCTOR", "NURSE", "PARAMEDIC", "PATIENT", "RESEARCHER"];
const CATEGORIES: [&str; 3] = ["vitals", "labs", "allergies"];

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    AssignRole { who: u8, role: u8, delegated: bool, validity: u16 },
    RevokeRole { who: u8 },
    CreateRecord { caller: u8, patient: u8 },
    Update { caller: u8, patient: u8, category: u8 },
    Read { caller: u8, patient: u8, category: u8 },
    CreatePolicy { patient: u8, delegatee: u8, category: u8, permission: u8, validity: u16 },
    TogglePolicy { patient: u8, policy: u8, active: bool },
    Delegated { caller: u8, patient: u8, policy: u8 },
    BreakGlass { caller: u8, patient: u8, reason_len: u8 },
    Revoke { patient: u8, provider: u8 },
    Advance { seconds: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);

    let identity_id = env.register(IdentityContract, ());
    let directory = IdentityContractClient::new(&env, &identity_id);
    let proof_id = env.register(ProofLedgerContract, ());
    let proofs = ProofLedgerContractClient::new(&env, &proof_id);
    let access_id = env.register(AccessControlContract, ());
    let access = AccessControlContractClient::new(&env, &access_id);
    let audit_id = env.register(AuditLedgerContract, ());
    let audit = AuditLedgerContractClient::new(&env, &audit_id);
    let records_id = env.register(PatientRecordsContract, ());
    let records = PatientRecordsContractClient::new(&env, &records_id);

    let _ = directory.try_initialize(&owner);
    let _ = proofs.try_initialize(&owner, &0);
    let _ = access.try_initialize(&owner, &identity_id);
    let _ = audit.try_initialize(&owner);
    let _ = records.try_initialize(&owner, &access_id, &identity_id, &proof_id, &audit_id);
    let _ = audit.try_set_writer(&owner, &records_id);

    let credential = BytesN::from_array(&env, &[0x5A; 32]);
    let mut people = Vec::new();
    for i in 0..6u8 {
        let who = Address::generate(&env);
        let mut did = std::string::String::from("did:med:");
        did.push(char::from(b'a' + i));
        let _ = directory.try_create_identity(&who, &String::from_str(&env, &did), &svec![&env]);
        people.push((who, did));
    }
    let pick = |i: u8| &people[i as usize % people.len()];

    let mut seed = 1u32;
    let mut fresh_proof = |who: &Address| {
        let mut raw = [0u8; 32];
        raw[..4].copy_from_slice(&seed.to_be_bytes());
        raw[31] = 1;
        seed += 1;
        let hash = BytesN::from_array(&env, &raw);
        let _ = proofs.try_submit(who, &hash);
        hash
    };

    let mut revoked: Vec<(Address, Address)> = Vec::new();

    for action in actions {
        let before = audit.record_count();
        let mut granted: Option<(Address, Address)> = None;
        let audited = match action {
            FuzzAction::AssignRole { who, role, delegated, validity } => {
                let (addr, did) = pick(who);
                let _ = access.try_assign_role(
                    &owner,
                    addr,
                    &Symbol::new(&env, ROLES[role as usize % ROLES.len()]),
                    &credential,
                    &String::from_str(&env, did),
                    &u64::from(validity),
                    &delegated,
                );
                false
            }
            FuzzAction::RevokeRole { who } => {
                let _ = access.try_revoke_role(&owner, &pick(who).0);
                false
            }
            FuzzAction::CreateRecord { caller, patient } => records
                .try_create_patient_record(&pick(caller).0, &pick(patient).0)
                .is_ok(),
            FuzzAction::Update { caller, patient, category } => {
                let caller = &pick(caller).0;
                let proof = fresh_proof(caller);
                records
                    .try_update_data(
                        caller,
                        &pick(patient).0,
                        &String::from_str(&env, CATEGORIES[category as usize % 3]),
                        &Bytes::from_slice(&env, &[category]),
                        &proof,
                    )
                    .is_ok()
            }
            FuzzAction::Read { caller, patient, category } => {
                let caller = &pick(caller).0;
                let proof = fresh_proof(caller);
                records
                    .try_get_data(
                        caller,
                        &pick(patient).0,
                        &String::from_str(&env, CATEGORIES[category as usize % 3]),
                        &proof,
                    )
                    .is_ok()
            }
            FuzzAction::CreatePolicy { patient, delegatee, category, permission, validity } => {
                let permission = match permission % 3 {
                    0 => DelegationPermission::Read,
                    1 => DelegationPermission::Write,
                    _ => DelegationPermission::ReadWrite,
                };
                let _ = records.try_create_policy(
                    &pick(patient).0,
                    &pick(delegatee).0,
                    &String::from_str(&env, CATEGORIES[category as usize % 3]),
                    &permission,
                    &u64::from(validity),
                );
                false
            }
            FuzzAction::TogglePolicy { patient, policy, active } => {
                let _ = records.try_update_policy(&pick(patient).0, &u64::from(policy), &active);
                false
            }
            FuzzAction::Delegated { caller, patient, policy } => {
                let caller = &pick(caller).0;
                let raw = fresh_proof(caller);
                let bound = combine_proof(&env, &credential, &raw);
                let _ = proofs.try_submit(caller, &bound);
                let patient = &pick(patient).0;
                let ok = records
                    .try_request_delegated_emergency_access(
                        caller,
                        patient,
                        &String::from_str(&env, "fuzzed emergency"),
                        &raw,
                        &u64::from(policy),
                    )
                    .is_ok();
                if ok {
                    granted = Some((patient.clone(), caller.clone()));
                }
                ok
            }
            FuzzAction::BreakGlass { caller, patient, reason_len } => {
                let caller = &pick(caller).0;
                let proof = fresh_proof(caller);
                let patient = &pick(patient).0;
                let reason = "x".repeat(reason_len as usize % 64);
                let result = records.try_break_glass_access(
                    caller,
                    patient,
                    &String::from_str(&env, &reason),
                    &proof,
                );
                if reason.len() < 20 {
                    assert!(result.is_err());
                }
                if result.is_ok() {
                    granted = Some((patient.clone(), caller.clone()));
                }
                result.is_ok()
            }
            FuzzAction::Revoke { patient, provider } => {
                let (patient, provider) = (&pick(patient).0, &pick(provider).0);
                let ok = records.try_revoke_emergency_access(patient, provider).is_ok();
                if ok {
                    revoked.push((patient.clone(), provider.clone()));
                }
                ok
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds));
                false
            }
        };

        assert_eq!(audit.record_count(), before + u64::from(audited));

        // A revoked grant stays revoked until a new request replaces it.
        revoked.retain(|pair| {
            let still_revoked = records
                .get_emergency_grant(&pair.0, &pair.1)
                .map(|g| !g.valid)
                .unwrap_or(false);
            if !still_revoked {
                assert_eq!(granted.as_ref(), Some(pair));
            }
            still_revoked
        });
    }

    assert!(audit.verify_chain());
});
