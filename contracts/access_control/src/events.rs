use soroban_sdk::{symbol_short, Address, Env, Symbol};

/// Published when a role is assigned (or re-assigned) to a principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleAssignedEvent {
    pub principal: Address,
    pub role_id: Symbol,
    pub valid_until: u64,
    pub delegated: bool,
    pub assigned_by: Address,
}

/// Published when a role assignment is revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRevokedEvent {
    pub principal: Address,
    pub role_id: Symbol,
    pub revoked_by: Address,
    pub timestamp: u64,
}

/// Published when a role's permission set changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissionChangedEvent {
    pub role_id: Symbol,
    pub permission: Symbol,
    pub granted: bool,
    pub changed_by: Address,
    pub timestamp: u64,
}

/// Published when a new role is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRegisteredEvent {
    pub role_id: Symbol,
    pub registered_by: Address,
    pub timestamp: u64,
}

pub fn publish_role_assigned(
    env: &Env,
    principal: Address,
    role_id: Symbol,
    valid_until: u64,
    delegated: bool,
    assigned_by: Address,
) {
    let topics = (symbol_short!("ROLE_ASN"), principal.clone());
    let data = RoleAssignedEvent {
        principal,
        role_id,
        valid_until,
        delegated,
        assigned_by,
    };
    env.events().publish(topics, data);
}

pub fn publish_role_revoked(env: &Env, principal: Address, role_id: Symbol, revoked_by: Address) {
    let topics = (symbol_short!("ROLE_REV"), principal.clone());
    let data = RoleRevokedEvent {
        principal,
        role_id,
        revoked_by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_permission_changed(
    env: &Env,
    role_id: Symbol,
    permission: Symbol,
    granted: bool,
    changed_by: Address,
) {
    let name = if granted {
        symbol_short!("PERM_GRT")
    } else {
        symbol_short!("PERM_REV")
    };
    let topics = (name, role_id.clone());
    let data = PermissionChangedEvent {
        role_id,
        permission,
        granted,
        changed_by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_role_registered(env: &Env, role_id: Symbol, registered_by: Address) {
    let topics = (symbol_short!("ROLE_NEW"), role_id.clone());
    let data = RoleRegisteredEvent {
        role_id,
        registered_by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
