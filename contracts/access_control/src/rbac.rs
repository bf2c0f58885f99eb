//! # Role & permission engine
//!
//! Two decoupled maps back every decision:
//!
//! ```text
//! principal -> RoleAssignment          (one per principal, overwritten on re-assignment)
//! (role, permission) -> bool           (edited per role, never per principal)
//! ```
//!
//! Because permissions hang off the role, editing a role's permission set
//! changes what every current holder may do at their very next request.
//! Expiry is checked on every read; expired assignments are never swept.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Symbol, Vec};

use crate::errors::AccessError;

const ROLE_ASSIGNMENT: Symbol = symbol_short!("ROLE_ASN");
const ROLE_DEF: Symbol = symbol_short!("ROLE_DEF");
const ROLE_LIST: Symbol = symbol_short!("ROLE_LIST");
const ROLE_PERM: Symbol = symbol_short!("ROLE_PERM");
const PERM_LIST: Symbol = symbol_short!("PERM_LIST");

/// A principal's role, bounded in time and bound to a credential and identity.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleAssignment {
    pub principal: Address,
    pub role_id: Symbol,
    pub active: bool,
    pub valid_until: u64,
    pub credential_hash: BytesN<32>,
    pub identity_id: String,
    /// Set for principals acting on delegated authority (e.g. paramedics
    /// exercising a patient's delegation policy).
    pub delegated: bool,
    pub assigned_at: u64,
    pub assigned_by: Address,
}

impl RoleAssignment {
    /// An assignment is effective iff it is active and not yet expired.
    pub fn is_effective(&self, now: u64) -> bool {
        self.active && self.valid_until > now
    }
}

// ======================== Storage keys ========================

fn assignment_key(principal: &Address) -> (Symbol, Address) {
    (ROLE_ASSIGNMENT, principal.clone())
}

fn role_def_key(role_id: &Symbol) -> (Symbol, Symbol) {
    (ROLE_DEF, role_id.clone())
}

fn role_permission_key(role_id: &Symbol, permission: &Symbol) -> (Symbol, Symbol, Symbol) {
    (ROLE_PERM, role_id.clone(), permission.clone())
}

fn permission_list_key(role_id: &Symbol) -> (Symbol, Symbol) {
    (PERM_LIST, role_id.clone())
}

// ======================== Role registry ========================

pub fn is_registered(env: &Env, role_id: &Symbol) -> bool {
    env.storage().persistent().has(&role_def_key(role_id))
}

pub fn register_role(env: &Env, role_id: &Symbol) {
    let key = role_def_key(role_id);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);

    let mut roles = list_roles(env);
    if !roles.contains(role_id) {
        roles.push_back(role_id.clone());
        env.storage().persistent().set(&ROLE_LIST, &roles);
        ttl::extend_persistent(env, &ROLE_LIST);
    }
}

pub fn list_roles(env: &Env) -> Vec<Symbol> {
    env.storage()
        .persistent()
        .get(&ROLE_LIST)
        .unwrap_or(Vec::new(env))
}

// ======================== Role → permission map ========================

pub fn role_has_permission(env: &Env, role_id: &Symbol, permission: &Symbol) -> bool {
    env.storage()
        .persistent()
        .get(&role_permission_key(role_id, permission))
        .unwrap_or(false)
}

pub fn grant_permission(env: &Env, role_id: &Symbol, permission: &Symbol) {
    let key = role_permission_key(role_id, permission);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);

    let list_key = permission_list_key(role_id);
    let mut perms = role_permissions(env, role_id);
    if !perms.contains(permission) {
        perms.push_back(permission.clone());
        env.storage().persistent().set(&list_key, &perms);
        ttl::extend_persistent(env, &list_key);
    }
}

pub fn revoke_permission(env: &Env, role_id: &Symbol, permission: &Symbol) {
    env.storage()
        .persistent()
        .remove(&role_permission_key(role_id, permission));

    let mut remaining = Vec::new(env);
    for p in role_permissions(env, role_id).iter() {
        if p != *permission {
            remaining.push_back(p);
        }
    }
    let list_key = permission_list_key(role_id);
    env.storage().persistent().set(&list_key, &remaining);
    ttl::extend_persistent(env, &list_key);
}

pub fn role_permissions(env: &Env, role_id: &Symbol) -> Vec<Symbol> {
    env.storage()
        .persistent()
        .get(&permission_list_key(role_id))
        .unwrap_or(Vec::new(env))
}

// ======================== Principal → assignment map ========================

pub fn get_assignment(env: &Env, principal: &Address) -> Option<RoleAssignment> {
    env.storage().persistent().get(&assignment_key(principal))
}

pub fn set_assignment(env: &Env, assignment: &RoleAssignment) {
    let key = assignment_key(&assignment.principal);
    env.storage().persistent().set(&key, assignment);
    ttl::extend_persistent(env, &key);
}

/// Retrieve the assignment only if it is currently effective.
pub fn get_effective_assignment(env: &Env, principal: &Address) -> Option<RoleAssignment> {
    get_assignment(env, principal).filter(|a| a.is_effective(env.ledger().timestamp()))
}

/// Explains why `principal` does or does not hold `permission` right now.
pub fn check_permission(
    env: &Env,
    principal: &Address,
    permission: &Symbol,
) -> Result<(), AccessError> {
    let assignment = get_assignment(env, principal).ok_or(AccessError::NoRoleAssigned)?;
    if !assignment.active {
        return Err(AccessError::RoleRevoked);
    }
    if assignment.valid_until <= env.ledger().timestamp() {
        return Err(AccessError::RoleExpired);
    }
    if !role_has_permission(env, &assignment.role_id, permission) {
        return Err(AccessError::PermissionDenied);
    }
    Ok(())
}

pub fn has_permission(env: &Env, principal: &Address, permission: &Symbol) -> bool {
    check_permission(env, principal, permission).is_ok()
}

pub fn has_role(env: &Env, principal: &Address, role_id: &Symbol) -> bool {
    get_effective_assignment(env, principal)
        .map(|a| a.role_id == *role_id)
        .unwrap_or(false)
}

pub fn is_delegated_role(env: &Env, principal: &Address) -> bool {
    get_effective_assignment(env, principal)
        .map(|a| a.delegated)
        .unwrap_or(false)
}
