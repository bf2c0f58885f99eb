//! Patient records and their per-category payloads.
//!
//! A record is created once and never deleted. Category payloads are opaque
//! bytes, overwritten in place on every authorized update.

use common::ttl;
use soroban_sdk::{contracttype, Address, Bytes, Env, String};

use crate::DataKey;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRecord {
    pub patient: Address,
    pub exists: bool,
    /// Identity the patient resolved to at creation, or linked later.
    pub linked_identity: Option<String>,
    pub created_by: Address,
    pub created_at: u64,
    pub updated_at: u64,
}

pub fn get(env: &Env, patient: &Address) -> Option<PatientRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Record(patient.clone()))
}

pub fn exists(env: &Env, patient: &Address) -> bool {
    get(env, patient).map(|r| r.exists).unwrap_or(false)
}

pub fn save(env: &Env, record: &PatientRecord) {
    let key = DataKey::Record(record.patient.clone());
    env.storage().persistent().set(&key, record);
    ttl::extend_persistent(env, &key);
}

/// Bump `updated_at` on an existing record.
pub fn touch(env: &Env, patient: &Address) {
    if let Some(mut record) = get(env, patient) {
        record.updated_at = env.ledger().timestamp();
        save(env, &record);
    }
}

pub fn get_data(env: &Env, patient: &Address, category: &String) -> Option<Bytes> {
    env.storage()
        .persistent()
        .get(&DataKey::Data(patient.clone(), category.clone()))
}

pub fn set_data(env: &Env, patient: &Address, category: &String, blob: &Bytes) {
    let key = DataKey::Data(patient.clone(), category.clone());
    env.storage().persistent().set(&key, blob);
    ttl::extend_persistent(env, &key);
}
