//! # Proof Ledger
//!
//! Holds the current credential proof of every principal and guards against
//! replay. A proof here is a 32-byte commitment, not a zero-knowledge proof:
//!
//! - `submit` stores the hash with `expires_at = now + window`, marks the hash
//!   as used for that principal forever, and bumps the principal's nonce.
//! - `validate` accepts a hash only while it is the principal's current,
//!   valid, unexpired proof.
//! - `invalidate` revokes the current proof immediately (compromise response).
//!
//! Expiry is evaluated against the ledger timestamp on every read; nothing is
//! swept in the background.

#![no_std]

mod events;

use common::{is_zero_hash, ttl, ErrorKind, DEFAULT_PROOF_VALIDITY};
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, log, Address, BytesN, Env};

/// The current proof held by a principal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proof {
    pub principal: Address,
    pub proof_hash: BytesN<32>,
    pub issued_at: u64,
    pub expires_at: u64,
    pub nonce: u64,
    pub valid: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum DataKey {
    Admin,
    Window,
    Proof(Address),
    Used(Address, BytesN<32>),
    Nonce(Address),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProofError {
    NotInitialized = 200,
    AlreadyInitialized = 201,
    /// The hash is all zeros.
    InvalidProof = 202,
    /// The hash was already submitted by this principal.
    ReplayDetected = 203,
    ProofNotFound = 204,
    /// Caller is neither the principal nor the admin.
    Unauthorized = 205,
    InvalidConfig = 206,
    NonceOverflow = 207,
}

impl ProofError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProofError::NotInitialized | ProofError::AlreadyInitialized => ErrorKind::Lifecycle,
            ProofError::InvalidProof | ProofError::ReplayDetected => ErrorKind::InvalidProof,
            ProofError::ProofNotFound => ErrorKind::NotFound,
            ProofError::Unauthorized => ErrorKind::Unauthorized,
            ProofError::InvalidConfig | ProofError::NonceOverflow => ErrorKind::InvalidInput,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProofError::NotInitialized => "Proof ledger has not been initialized",
            ProofError::AlreadyInitialized => "Proof ledger is already initialized",
            ProofError::InvalidProof => "Proof hash is empty",
            ProofError::ReplayDetected => "Proof hash was already used by this principal",
            ProofError::ProofNotFound => "Principal has no proof on the ledger",
            ProofError::Unauthorized => "Only the principal or the admin may invalidate a proof",
            ProofError::InvalidConfig => "Validity window must be positive",
            ProofError::NonceOverflow => "Proof nonce exhausted",
        }
    }
}

#[contract]
pub struct ProofLedgerContract;

#[contractimpl]
impl ProofLedgerContract {
    /// One-time initialization. A `validity_window` of 0 selects the default
    /// of one hour.
    pub fn initialize(env: Env, admin: Address, validity_window: u64) -> Result<(), ProofError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(ProofError::AlreadyInitialized);
        }

        admin.require_auth();
        let window = if validity_window == 0 {
            DEFAULT_PROOF_VALIDITY
        } else {
            validity_window
        };
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Window, &window);
        ttl::extend_instance(&env);

        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ProofError> {
        caller.require_auth();

        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ProofError::NotInitialized)?;

        if *caller != admin {
            return Err(ProofError::Unauthorized);
        }

        Ok(())
    }

    fn is_admin(env: &Env, caller: &Address) -> bool {
        env.storage()
            .instance()
            .get::<_, Address>(&DataKey::Admin)
            .map(|admin| admin == *caller)
            .unwrap_or(false)
    }

    pub fn get_admin(env: Env) -> Result<Address, ProofError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ProofError::NotInitialized)
    }

    /// Change the freshness window applied to subsequent submissions.
    pub fn set_validity_window(env: Env, caller: Address, seconds: u64) -> Result<(), ProofError> {
        Self::require_admin(&env, &caller)?;
        if seconds == 0 {
            return Err(ProofError::InvalidConfig);
        }
        env.storage().instance().set(&DataKey::Window, &seconds);
        Ok(())
    }

    pub fn get_validity_window(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::Window)
            .unwrap_or(DEFAULT_PROOF_VALIDITY)
    }

    /// Submit `proof_hash` as the principal's current proof.
    pub fn submit(env: Env, principal: Address, proof_hash: BytesN<32>) -> Result<(), ProofError> {
        principal.require_auth();

        if !env.storage().instance().has(&DataKey::Admin) {
            return Err(ProofError::NotInitialized);
        }
        if is_zero_hash(&proof_hash) {
            return Err(ProofError::InvalidProof);
        }

        let used_key = DataKey::Used(principal.clone(), proof_hash.clone());
        if env.storage().persistent().has(&used_key) {
            log!(&env, "proof replay rejected", principal.clone());
            return Err(ProofError::ReplayDetected);
        }

        let nonce_key = DataKey::Nonce(principal.clone());
        let previous: u64 = env.storage().persistent().get(&nonce_key).unwrap_or(0);
        let nonce = previous.checked_add(1).ok_or(ProofError::NonceOverflow)?;

        let now = env.ledger().timestamp();
        let proof = Proof {
            principal: principal.clone(),
            proof_hash: proof_hash.clone(),
            issued_at: now,
            expires_at: now.saturating_add(Self::get_validity_window(env.clone())),
            nonce,
            valid: true,
        };

        let proof_key = DataKey::Proof(principal.clone());
        env.storage().persistent().set(&proof_key, &proof);
        ttl::extend_persistent(&env, &proof_key);
        env.storage().persistent().set(&used_key, &true);
        ttl::extend_persistent(&env, &used_key);
        env.storage().persistent().set(&nonce_key, &nonce);
        ttl::extend_persistent(&env, &nonce_key);

        events::publish_proof_submitted(&env, principal, proof_hash, nonce, proof.expires_at);

        Ok(())
    }

    /// `true` iff `proof_hash` is the principal's current, valid and
    /// unexpired proof.
    pub fn validate(env: Env, principal: Address, proof_hash: BytesN<32>) -> bool {
        match env
            .storage()
            .persistent()
            .get::<_, Proof>(&DataKey::Proof(principal))
        {
            Some(proof) => {
                proof.valid
                    && env.ledger().timestamp() <= proof.expires_at
                    && proof.proof_hash == proof_hash
            }
            None => false,
        }
    }

    /// Force the principal's current proof invalid. Callable by the
    /// principal itself or the admin.
    pub fn invalidate(env: Env, caller: Address, principal: Address) -> Result<(), ProofError> {
        caller.require_auth();

        if caller != principal && !Self::is_admin(&env, &caller) {
            return Err(ProofError::Unauthorized);
        }

        let key = DataKey::Proof(principal.clone());
        let mut proof: Proof = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ProofError::ProofNotFound)?;

        proof.valid = false;
        env.storage().persistent().set(&key, &proof);
        ttl::extend_persistent(&env, &key);

        log!(&env, "proof invalidated", principal.clone(), caller.clone());
        events::publish_proof_invalidated(&env, principal, caller);

        Ok(())
    }

    pub fn get_proof(env: Env, principal: Address) -> Option<Proof> {
        env.storage().persistent().get(&DataKey::Proof(principal))
    }

    /// Number of proofs the principal has submitted.
    pub fn get_nonce(env: Env, principal: Address) -> u64 {
        env.storage()
            .persistent()
            .get(&DataKey::Nonce(principal))
            .unwrap_or(0)
    }

    pub fn is_used(env: Env, principal: Address, proof_hash: BytesN<32>) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Used(principal, proof_hash))
    }
}
