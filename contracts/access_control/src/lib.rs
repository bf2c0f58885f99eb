#![no_std]

//! # Role & Permission Store
//!
//! Time-bounded role assignments and role-keyed permission grants. Each
//! assignment is bound to an identity from the identity directory and to a
//! credential hash; a role is effective only while `active && valid_until > now`.
//!
//! Administrative calls require an effective `ADMIN` role, or the bootstrap
//! owner set at [`AccessControlContract::initialize`]. The first ADMIN is
//! seeded through the one-time [`AccessControlContract::setup_admin`].

pub mod errors;
mod events;
pub mod rbac;

pub use errors::AccessError;
pub use rbac::RoleAssignment;

use common::{is_zero_hash, permissions, roles, ttl};
use identity::IdentityContractClient;
use soroban_sdk::{
    contract, contractimpl, log, symbol_short, Address, BytesN, Env, String, Symbol, Vec,
};

const OWNER: Symbol = symbol_short!("OWNER");
const IDENTITY: Symbol = symbol_short!("IDENTITY");
const ADMIN_SET: Symbol = symbol_short!("ADMIN_SET");

/// Roles registered at initialization with their default permissions.
const DEFAULT_GRANTS: [(&str, &[&str]); 6] = [
    (
        roles::ADMIN,
        &[
            permissions::CREATE_RECORD,
            permissions::VIEW_DATA,
            permissions::UPDATE_DATA,
            permissions::MANAGE_ROLES,
        ],
    ),
    (
        roles::DOCTOR,
        &[
            permissions::CREATE_RECORD,
            permissions::VIEW_DATA,
            permissions::UPDATE_DATA,
        ],
    ),
    (
        roles::NURSE,
        &[permissions::VIEW_DATA, permissions::UPDATE_DATA],
    ),
    (roles::PARAMEDIC, &[]),
    (roles::PATIENT, &[]),
    (roles::RESEARCHER, &[permissions::VIEW_DATA]),
];

#[contract]
pub struct AccessControlContract;

#[contractimpl]
impl AccessControlContract {
    /// Initialize with the bootstrap owner and the identity directory address.
    pub fn initialize(env: Env, owner: Address, identity: Address) -> Result<(), AccessError> {
        if env.storage().instance().has(&OWNER) {
            return Err(AccessError::AlreadyInitialized);
        }

        owner.require_auth();
        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&IDENTITY, &identity);
        ttl::extend_instance(&env);

        for (role, perms) in DEFAULT_GRANTS.iter() {
            let role_id = Symbol::new(&env, role);
            rbac::register_role(&env, &role_id);
            for perm in perms.iter() {
                rbac::grant_permission(&env, &role_id, &Symbol::new(&env, perm));
            }
        }

        Ok(())
    }

    pub fn get_owner(env: Env) -> Result<Address, AccessError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(AccessError::NotInitialized)
    }

    /// One-time bootstrap: the owner seeds the first ADMIN principal.
    pub fn setup_admin(
        env: Env,
        owner: Address,
        admin: Address,
        credential_hash: BytesN<32>,
        identity_id: String,
        validity_period: u64,
    ) -> Result<(), AccessError> {
        owner.require_auth();

        if owner != Self::get_owner(env.clone())? {
            return Err(AccessError::Unauthorized);
        }
        if env.storage().instance().has(&ADMIN_SET) {
            return Err(AccessError::AdminAlreadySetup);
        }

        Self::write_assignment(
            &env,
            &owner,
            admin,
            Symbol::new(&env, roles::ADMIN),
            credential_hash,
            identity_id,
            validity_period,
            false,
        )?;
        env.storage().instance().set(&ADMIN_SET, &true);

        Ok(())
    }

    /// Assign `role_id` to `principal`, replacing any prior assignment.
    #[allow(clippy::too_many_arguments)]
    pub fn assign_role(
        env: Env,
        caller: Address,
        principal: Address,
        role_id: Symbol,
        credential_hash: BytesN<32>,
        identity_id: String,
        validity_period: u64,
        delegated: bool,
    ) -> Result<(), AccessError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        Self::write_assignment(
            &env,
            &caller,
            principal,
            role_id,
            credential_hash,
            identity_id,
            validity_period,
            delegated,
        )
    }

    /// Revoke the principal's active assignment.
    pub fn revoke_role(env: Env, caller: Address, principal: Address) -> Result<(), AccessError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut assignment = rbac::get_assignment(&env, &principal)
            .filter(|a| a.active)
            .ok_or(AccessError::NotActive)?;

        assignment.active = false;
        rbac::set_assignment(&env, &assignment);

        log!(&env, "role revoked", principal.clone(), assignment.role_id.clone());
        events::publish_role_revoked(&env, principal, assignment.role_id, caller);

        Ok(())
    }

    /// Register a new role id with an empty permission set.
    pub fn register_role(env: Env, caller: Address, role_id: Symbol) -> Result<(), AccessError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if rbac::is_registered(&env, &role_id) {
            return Err(AccessError::RoleAlreadyRegistered);
        }

        rbac::register_role(&env, &role_id);
        events::publish_role_registered(&env, role_id, caller);

        Ok(())
    }

    /// Grant `permission` to every holder of `role_id`.
    pub fn grant_permission(
        env: Env,
        caller: Address,
        role_id: Symbol,
        permission: Symbol,
    ) -> Result<(), AccessError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        Self::require_registered(&env, &role_id)?;

        rbac::grant_permission(&env, &role_id, &permission);
        events::publish_permission_changed(&env, role_id, permission, true, caller);

        Ok(())
    }

    /// Remove `permission` from every holder of `role_id`.
    pub fn revoke_permission(
        env: Env,
        caller: Address,
        role_id: Symbol,
        permission: Symbol,
    ) -> Result<(), AccessError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        Self::require_registered(&env, &role_id)?;

        rbac::revoke_permission(&env, &role_id, &permission);
        events::publish_permission_changed(&env, role_id, permission, false, caller);

        Ok(())
    }

    // ======================== Predicates ========================

    pub fn has_permission(env: Env, principal: Address, permission: Symbol) -> bool {
        rbac::has_permission(&env, &principal, &permission)
    }

    /// Like `has_permission`, but reports why access is denied.
    pub fn check_permission(
        env: Env,
        principal: Address,
        permission: Symbol,
    ) -> Result<(), AccessError> {
        rbac::check_permission(&env, &principal, &permission)
    }

    pub fn has_role(env: Env, principal: Address, role_id: Symbol) -> bool {
        rbac::has_role(&env, &principal, &role_id)
    }

    pub fn is_delegated_role(env: Env, principal: Address) -> bool {
        rbac::is_delegated_role(&env, &principal)
    }

    /// The stored assignment, effective or not.
    pub fn get_assignment(env: Env, principal: Address) -> Option<RoleAssignment> {
        rbac::get_assignment(&env, &principal)
    }

    pub fn role_has_permission(env: Env, role_id: Symbol, permission: Symbol) -> bool {
        rbac::role_has_permission(&env, &role_id, &permission)
    }

    pub fn get_role_permissions(env: Env, role_id: Symbol) -> Vec<Symbol> {
        rbac::role_permissions(&env, &role_id)
    }

    pub fn is_role_registered(env: Env, role_id: Symbol) -> bool {
        rbac::is_registered(&env, &role_id)
    }

    pub fn list_roles(env: Env) -> Vec<Symbol> {
        rbac::list_roles(&env)
    }

    // ======================== Internal helpers ========================

    fn require_admin(env: &Env, caller: &Address) -> Result<(), AccessError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(AccessError::NotInitialized)?;

        if *caller == owner || rbac::has_role(env, caller, &Symbol::new(env, roles::ADMIN)) {
            return Ok(());
        }

        log!(env, "admin check failed", caller.clone());
        Err(AccessError::Unauthorized)
    }

    fn require_registered(env: &Env, role_id: &Symbol) -> Result<(), AccessError> {
        if !rbac::is_registered(env, role_id) {
            return Err(AccessError::RoleNotRegistered);
        }
        Ok(())
    }

    /// The identity must exist, be active and be controlled by `principal`.
    fn require_identity(
        env: &Env,
        principal: &Address,
        identity_id: &String,
    ) -> Result<(), AccessError> {
        let directory: Address = env
            .storage()
            .instance()
            .get(&IDENTITY)
            .ok_or(AccessError::NotInitialized)?;
        let client = IdentityContractClient::new(env, &directory);

        let identity = match client.try_get_identity(identity_id) {
            Ok(Ok(identity)) => identity,
            _ => return Err(AccessError::IdentityNotFound),
        };
        if !identity.active {
            return Err(AccessError::IdentityInactive);
        }
        if !client.verify_control(principal, identity_id) {
            return Err(AccessError::IdentityNotControlled);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn write_assignment(
        env: &Env,
        assigned_by: &Address,
        principal: Address,
        role_id: Symbol,
        credential_hash: BytesN<32>,
        identity_id: String,
        validity_period: u64,
        delegated: bool,
    ) -> Result<(), AccessError> {
        if validity_period == 0 {
            return Err(AccessError::InvalidValidityPeriod);
        }
        Self::require_registered(env, &role_id)?;
        if is_zero_hash(&credential_hash) {
            return Err(AccessError::InvalidInput);
        }
        Self::require_identity(env, &principal, &identity_id)?;

        let now = env.ledger().timestamp();
        let assignment = RoleAssignment {
            principal: principal.clone(),
            role_id: role_id.clone(),
            active: true,
            valid_until: now.saturating_add(validity_period),
            credential_hash,
            identity_id,
            delegated,
            assigned_at: now,
            assigned_by: assigned_by.clone(),
        };
        rbac::set_assignment(env, &assignment);

        log!(env, "role assigned", principal.clone(), role_id.clone());
        events::publish_role_assigned(
            env,
            principal,
            role_id,
            assignment.valid_until,
            delegated,
            assigned_by.clone(),
        );

        Ok(())
    }
}
