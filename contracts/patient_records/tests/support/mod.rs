#![allow(dead_code)]

use access_control::{AccessControlContract, AccessControlContractClient};
use audit_ledger::{AuditLedgerContract, AuditLedgerContractClient};
use common::combine_proof;
use identity::{IdentityContract, IdentityContractClient};
use patient_records::{PatientRecordsContract, PatientRecordsContractClient};
use proof_ledger::{ProofLedgerContract, ProofLedgerContractClient};
use soroban_sdk::{testutils::Address as _, vec, Address, BytesN, Env, String, Symbol};

pub const ROLE_VALIDITY: u64 = 10_000_000;

/// All five contracts deployed and wired together.
pub struct TestContext {
    pub env: Env,
    pub records: PatientRecordsContractClient<'static>,
    pub access: AccessControlContractClient<'static>,
    pub directory: IdentityContractClient<'static>,
    pub proofs: ProofLedgerContractClient<'static>,
    pub audit: AuditLedgerContractClient<'static>,
    pub admin: Address,
    seed: core::cell::Cell<u32>,
}

pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);

    let identity_id = env.register(IdentityContract, ());
    let directory = IdentityContractClient::new(&env, &identity_id);
    directory.initialize(&owner);

    let proof_id = env.register(ProofLedgerContract, ());
    let proofs = ProofLedgerContractClient::new(&env, &proof_id);
    proofs.initialize(&owner, &0);

    let access_id = env.register(AccessControlContract, ());
    let access = AccessControlContractClient::new(&env, &access_id);
    access.initialize(&owner, &identity_id);

    let audit_id = env.register(AuditLedgerContract, ());
    let audit = AuditLedgerContractClient::new(&env, &audit_id);
    audit.initialize(&owner);

    let records_id = env.register(PatientRecordsContract, ());
    let records = PatientRecordsContractClient::new(&env, &records_id);
    records.initialize(&owner, &access_id, &identity_id, &proof_id, &audit_id);
    audit.set_writer(&owner, &records_id);

    // Bootstrap the first ADMIN; everything after goes through it.
    let admin = Address::generate(&env);
    let admin_identity = String::from_str(&env, "did:med:admin");
    directory.create_identity(&admin, &admin_identity, &vec![&env]);
    access.setup_admin(
        &owner,
        &admin,
        &BytesN::from_array(&env, &[0xAD; 32]),
        &admin_identity,
        &ROLE_VALIDITY,
    );

    TestContext {
        env,
        records,
        access,
        directory,
        proofs,
        audit,
        admin,
        seed: core::cell::Cell::new(1),
    }
}

pub fn text(ctx: &TestContext, value: &str) -> String {
    String::from_str(&ctx.env, value)
}

pub fn credential(ctx: &TestContext) -> BytesN<32> {
    BytesN::from_array(&ctx.env, &[0xC5; 32])
}

/// Create a principal with identity `did` and, optionally, a role.
pub fn create_principal(
    ctx: &TestContext,
    did: &str,
    role: Option<&str>,
    delegated: bool,
) -> Address {
    let who = Address::generate(&ctx.env);
    let id = text(ctx, did);
    ctx.directory.create_identity(&who, &id, &vec![&ctx.env]);
    if let Some(role) = role {
        ctx.access.assign_role(
            &ctx.admin,
            &who,
            &Symbol::new(&ctx.env, role),
            &credential(ctx),
            &id,
            &ROLE_VALIDITY,
            &delegated,
        );
    }
    who
}

fn next_hash(ctx: &TestContext) -> BytesN<32> {
    let n = ctx.seed.get();
    ctx.seed.set(n + 1);
    let mut raw = [0x11u8; 32];
    raw[..4].copy_from_slice(&n.to_be_bytes());
    BytesN::from_array(&ctx.env, &raw)
}

/// Submit a fresh proof for `who`.
pub fn submit_proof(ctx: &TestContext, who: &Address) -> BytesN<32> {
    let hash = next_hash(ctx);
    ctx.proofs.submit(who, &hash);
    hash
}

/// Submit `keccak256(credential || raw)` for `who`; returns `(raw, bound)`.
pub fn submit_bound_proof(ctx: &TestContext, who: &Address) -> (BytesN<32>, BytesN<32>) {
    let raw = next_hash(ctx);
    let bound = combine_proof(&ctx.env, &credential(ctx), &raw);
    ctx.proofs.submit(who, &bound);
    (raw, bound)
}
