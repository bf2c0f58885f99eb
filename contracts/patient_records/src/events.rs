use soroban_sdk::{symbol_short, Address, Env, String};

use crate::delegation::DelegationPermission;

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordCreatedEvent {
    pub patient: Address,
    pub created_by: Address,
    pub linked_identity: Option<String>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityLinkedEvent {
    pub patient: Address,
    pub identity_id: String,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataUpdatedEvent {
    pub patient: Address,
    pub caller: Address,
    pub category: String,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyCreatedEvent {
    pub policy_id: u64,
    pub delegator: Address,
    pub delegatee: Address,
    pub data_category: String,
    pub permission: DelegationPermission,
    pub valid_until: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyUpdatedEvent {
    pub policy_id: u64,
    pub delegator: Address,
    pub active: bool,
    pub timestamp: u64,
}

/// Shared by delegated and break-glass grants; the topic tells them apart.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyGrantedEvent {
    pub patient: Address,
    pub provider: Address,
    pub policy_id: u64,
    pub expires_at: u64,
    pub reason: String,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyRevokedEvent {
    pub patient: Address,
    pub provider: Address,
    pub timestamp: u64,
}

pub fn publish_record_created(
    env: &Env,
    patient: Address,
    created_by: Address,
    linked_identity: Option<String>,
) {
    env.events().publish(
        (symbol_short!("REC_NEW"), patient.clone()),
        RecordCreatedEvent {
            patient,
            created_by,
            linked_identity,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_identity_linked(env: &Env, patient: Address, identity_id: String) {
    env.events().publish(
        (symbol_short!("REC_LNK"), patient.clone()),
        IdentityLinkedEvent {
            patient,
            identity_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_data_updated(env: &Env, patient: Address, caller: Address, category: String) {
    env.events().publish(
        (symbol_short!("DATA_UPD"), patient.clone()),
        DataUpdatedEvent {
            patient,
            caller,
            category,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_policy_created(
    env: &Env,
    policy_id: u64,
    delegator: Address,
    delegatee: Address,
    data_category: String,
    permission: DelegationPermission,
    valid_until: u64,
) {
    env.events().publish(
        (symbol_short!("POL_NEW"), delegator.clone()),
        PolicyCreatedEvent {
            policy_id,
            delegator,
            delegatee,
            data_category,
            permission,
            valid_until,
        },
    );
}

pub fn publish_policy_updated(env: &Env, policy_id: u64, delegator: Address, active: bool) {
    env.events().publish(
        (symbol_short!("POL_UPD"), delegator.clone()),
        PolicyUpdatedEvent {
            policy_id,
            delegator,
            active,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_granted(
    env: &Env,
    break_glass: bool,
    patient: Address,
    provider: Address,
    policy_id: u64,
    expires_at: u64,
    reason: String,
) {
    let name = if break_glass {
        symbol_short!("BRK_GLS")
    } else {
        symbol_short!("EMRG_GRT")
    };
    env.events().publish(
        (name, patient.clone(), provider.clone()),
        EmergencyGrantedEvent {
            patient,
            provider,
            policy_id,
            expires_at,
            reason,
        },
    );
}

pub fn publish_emergency_revoked(env: &Env, patient: Address, provider: Address) {
    env.events().publish(
        (symbol_short!("EMRG_REV"), patient.clone(), provider.clone()),
        EmergencyRevokedEvent {
            patient,
            provider,
            timestamp: env.ledger().timestamp(),
        },
    );
}
