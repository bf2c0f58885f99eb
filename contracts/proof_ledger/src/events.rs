use soroban_sdk::{symbol_short, Address, BytesN, Env};

/// Fired when a principal submits a fresh proof.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofSubmittedEvent {
    pub principal: Address,
    pub proof_hash: BytesN<32>,
    pub nonce: u64,
    pub expires_at: u64,
}

/// Fired when a proof is forcibly invalidated.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofInvalidatedEvent {
    pub principal: Address,
    pub invalidated_by: Address,
    pub timestamp: u64,
}

pub fn publish_proof_submitted(
    env: &Env,
    principal: Address,
    proof_hash: BytesN<32>,
    nonce: u64,
    expires_at: u64,
) {
    env.events().publish(
        (symbol_short!("PRF_SUB"), principal.clone()),
        ProofSubmittedEvent {
            principal,
            proof_hash,
            nonce,
            expires_at,
        },
    );
}

pub fn publish_proof_invalidated(env: &Env, principal: Address, invalidated_by: Address) {
    env.events().publish(
        (symbol_short!("PRF_INV"), principal.clone()),
        ProofInvalidatedEvent {
            principal,
            invalidated_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}
