use soroban_sdk::{symbol_short, Address, Env, String};

/// Fired on every append. Topics carry the subject so exporters can filter
/// per patient without reading storage.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditAppendedEvent {
    pub index: u64,
    pub actor: Address,
    pub subject: Address,
    pub access_type: String,
    pub is_emergency: bool,
    pub timestamp: u64,
}

/// Fired when the authorized writer changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WriterSetEvent {
    pub admin: Address,
    pub writer: Address,
    pub timestamp: u64,
}

pub fn publish_appended(
    env: &Env,
    index: u64,
    actor: Address,
    subject: Address,
    access_type: String,
    is_emergency: bool,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("AUD_APP"), subject.clone()),
        AuditAppendedEvent {
            index,
            actor,
            subject,
            access_type,
            is_emergency,
            timestamp,
        },
    );
}

pub fn publish_writer_set(env: &Env, admin: Address, writer: Address) {
    env.events().publish(
        (symbol_short!("AUD_WRT"), admin.clone()),
        WriterSetEvent {
            admin,
            writer,
            timestamp: env.ledger().timestamp(),
        },
    );
}
