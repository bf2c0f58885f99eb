//! # Proof binding
//!
//! Proofs in this system are commitments: a principal submits a 32-byte hash
//! to the proof ledger, and later operations present the same hash. There is
//! no zero-knowledge verification here, only freshness and replay checks.
//!
//! Delegated emergency access binds the delegatee's role credential to the
//! presented proof, so the value that must be on the ledger is
//! `keccak256(credential_hash || proof)`.

use soroban_sdk::{Bytes, BytesN, Env};

/// Returns `true` if every byte of `hash` is zero.
pub fn is_zero_hash(hash: &BytesN<32>) -> bool {
    hash.to_array().iter().all(|b| *b == 0)
}

/// Binds a role credential hash to a submitted proof.
pub fn combine_proof(env: &Env, credential_hash: &BytesN<32>, proof: &BytesN<32>) -> BytesN<32> {
    let mut buf = Bytes::new(env);
    buf.extend_from_array(&credential_hash.to_array());
    buf.extend_from_array(&proof.to_array());
    env.crypto().keccak256(&buf).into()
}
