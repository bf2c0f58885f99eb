//! # Delegation policies and emergency grants
//!
//! A patient authors [`DelegationPolicy`] entries naming one delegatee and one
//! data category. Exercising a policy produces an [`EmergencyGrant`] keyed by
//! `(patient, provider)`; break-glass produces the same grant shape around a
//! synthetic wildcard policy.
//!
//! Grants carry a snapshot of the policy that produced them, so later policy
//! edits do not widen or narrow an existing grant. Revocation flips `valid`
//! and nothing ever flips it back; only a brand-new grant replaces it.

use common::ttl;
use soroban_sdk::{contracttype, Address, BytesN, Env, String, Vec};

use crate::DataKey;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DelegationPermission {
    Read,
    Write,
    ReadWrite,
}

impl DelegationPermission {
    pub fn allows_read(&self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegationPolicy {
    /// Zero for synthetic break-glass policies; real ids start at 1.
    pub policy_id: u64,
    pub delegator: Address,
    pub delegatee: Address,
    pub data_category: String,
    pub permission: DelegationPermission,
    pub active: bool,
    pub valid_until: u64,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyGrant {
    pub policy: DelegationPolicy,
    pub granted: bool,
    pub granted_at: u64,
    pub expires_at: u64,
    pub reason: String,
    /// Proof value the grant was issued against.
    pub proof_binding: BytesN<32>,
    pub valid: bool,
    pub break_glass: bool,
}

impl EmergencyGrant {
    /// Category and permission match, regardless of time or revocation.
    /// Only a break-glass grant spans every category.
    pub fn covers(&self, category: &String) -> bool {
        let category_ok = self.break_glass || self.policy.data_category == *category;
        category_ok && self.policy.permission.allows_read()
    }

    /// Granted, not revoked and inside its window.
    pub fn is_current(&self, now: u64) -> bool {
        self.granted && self.valid && self.expires_at > now
    }
}

// ── Policies ────────────────────────────────────────────────────────────────

pub fn policy_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PolicyCounter)
        .unwrap_or(0)
}

/// Reserve the next policy id. Ids are never handed out twice.
pub fn next_policy_id(env: &Env) -> u64 {
    let id = policy_count(env).saturating_add(1);
    env.storage().instance().set(&DataKey::PolicyCounter, &id);
    id
}

pub fn get_policy(env: &Env, policy_id: u64) -> Option<DelegationPolicy> {
    env.storage().persistent().get(&DataKey::Policy(policy_id))
}

pub fn save_policy(env: &Env, policy: &DelegationPolicy) {
    let key = DataKey::Policy(policy.policy_id);
    env.storage().persistent().set(&key, policy);
    ttl::extend_persistent(env, &key);
}

pub fn patient_policies(env: &Env, patient: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::PatientPolicies(patient.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn index_policy(env: &Env, patient: &Address, policy_id: u64) {
    let key = DataKey::PatientPolicies(patient.clone());
    let mut ids = patient_policies(env, patient);
    ids.push_back(policy_id);
    env.storage().persistent().set(&key, &ids);
    ttl::extend_persistent(env, &key);
}

// ── Grants ──────────────────────────────────────────────────────────────────

pub fn get_grant(env: &Env, patient: &Address, provider: &Address) -> Option<EmergencyGrant> {
    env.storage()
        .persistent()
        .get(&DataKey::Grant(patient.clone(), provider.clone()))
}

pub fn save_grant(env: &Env, grant: &EmergencyGrant) {
    let key = DataKey::Grant(grant.policy.delegator.clone(), grant.policy.delegatee.clone());
    env.storage().persistent().set(&key, grant);
    ttl::extend_persistent(env, &key);
}

/// `true` iff `provider` currently holds a read grant on `category`.
pub fn has_current_grant(
    env: &Env,
    patient: &Address,
    provider: &Address,
    category: &String,
) -> bool {
    let now = env.ledger().timestamp();
    get_grant(env, patient, provider)
        .map(|g| g.is_current(now) && g.covers(category))
        .unwrap_or(false)
}

/// A matching grant exists and was never revoked, but its window has closed.
pub fn grant_lapsed(
    env: &Env,
    patient: &Address,
    provider: &Address,
    category: &String,
) -> bool {
    let now = env.ledger().timestamp();
    get_grant(env, patient, provider)
        .map(|g| g.granted && g.valid && g.expires_at <= now && g.covers(category))
        .unwrap_or(false)
}
