use soroban_sdk::{symbol_short, Address, Env, String};

/// Fired when an identity is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityCreatedEvent {
    pub id: String,
    pub owner: Address,
    pub timestamp: u64,
}

/// Fired when an attribute or controller is added to an identity.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityUpdatedEvent {
    pub id: String,
    pub caller: Address,
    pub field: String,
    pub timestamp: u64,
}

/// Fired when an identity is deactivated.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityDeactivatedEvent {
    pub id: String,
    pub owner: Address,
    pub timestamp: u64,
}

pub fn publish_identity_created(env: &Env, id: String, owner: Address) {
    env.events().publish(
        (symbol_short!("ID_NEW"), owner.clone()),
        IdentityCreatedEvent {
            id,
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_identity_updated(env: &Env, id: String, caller: Address, field: String) {
    env.events().publish(
        (symbol_short!("ID_UPD"), caller.clone()),
        IdentityUpdatedEvent {
            id,
            caller,
            field,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_identity_deactivated(env: &Env, id: String, owner: Address) {
    env.events().publish(
        (symbol_short!("ID_DEACT"), owner.clone()),
        IdentityDeactivatedEvent {
            id,
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}
