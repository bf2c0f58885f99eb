//! Storage layer for identity documents.
//!
//! Two maps are kept: `id -> Identity` and `owner -> id`. The owner index is
//! never cleared, so an owner can create exactly one identity over the
//! lifetime of the directory, even after deactivating it.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Map, String, Symbol, Vec};

const IDENTITY: Symbol = symbol_short!("IDENTITY");
const OWNER_IDX: Symbol = symbol_short!("ID_OWNER");

/// A directory entry binding a principal to controllers and attributes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Identity {
    pub id: String,
    pub owner: Address,
    /// Ids of other identities whose owners may act on this one.
    pub controllers: Vec<String>,
    pub attributes: Map<String, String>,
    pub active: bool,
    pub created_at: u64,
    pub last_updated: u64,
}

fn identity_key(id: &String) -> (Symbol, String) {
    (IDENTITY, id.clone())
}

fn owner_key(owner: &Address) -> (Symbol, Address) {
    (OWNER_IDX, owner.clone())
}

pub fn get_identity(env: &Env, id: &String) -> Option<Identity> {
    env.storage().persistent().get(&identity_key(id))
}

pub fn id_exists(env: &Env, id: &String) -> bool {
    env.storage().persistent().has(&identity_key(id))
}

pub fn owned_id(env: &Env, owner: &Address) -> Option<String> {
    env.storage().persistent().get(&owner_key(owner))
}

/// Persists an identity, stamping `last_updated` with the current ledger time.
pub fn save_identity(env: &Env, identity: &mut Identity) {
    identity.last_updated = env.ledger().timestamp();
    let key = identity_key(&identity.id);
    env.storage().persistent().set(&key, identity);
    ttl::extend_persistent(env, &key);
}

pub fn index_owner(env: &Env, owner: &Address, id: &String) {
    let key = owner_key(owner);
    env.storage().persistent().set(&key, id);
    ttl::extend_persistent(env, &key);
}

/// Returns `true` if `principal` owns `identity` or owns one of the
/// identities listed as its controllers.
pub fn controls(env: &Env, principal: &Address, identity: &Identity) -> bool {
    if identity.owner == *principal {
        return true;
    }
    match owned_id(env, principal) {
        Some(own) => identity.controllers.contains(&own),
        None => false,
    }
}
