//! # Audit Ledger
//!
//! Append-only record of every authorized access. Only the configured writer
//! (the patient records contract) may append; everyone may query. Records are
//! hash-chained so any later modification of stored history is detectable
//! with [`AuditLedgerContract::verify_chain`].

#![no_std]

mod events;
mod trail;

pub use crate::trail::{hash_record, AuditRecord, AuditTrail};

use crate::trail::DataKey;
use common::{text, ttl, ErrorKind};
use soroban_sdk::{contract, contracterror, contractimpl, log, Address, BytesN, Env, String, Vec};

const MAX_ACCESS_TYPE_LEN: u32 = 64;
const MAX_JUSTIFICATION_LEN: u32 = 512;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AuditError {
    NotInitialized = 400,
    AlreadyInitialized = 401,
    Unauthorized = 402,
    /// Caller is not the configured writer.
    NotWriter = 403,
    WriterNotSet = 404,
    InvalidInput = 405,
}

impl AuditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuditError::NotInitialized
            | AuditError::AlreadyInitialized
            | AuditError::WriterNotSet => ErrorKind::Lifecycle,
            AuditError::Unauthorized | AuditError::NotWriter => ErrorKind::Unauthorized,
            AuditError::InvalidInput => ErrorKind::InvalidInput,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuditError::NotInitialized => "Audit ledger has not been initialized",
            AuditError::AlreadyInitialized => "Audit ledger is already initialized",
            AuditError::Unauthorized => "Caller is not the audit ledger admin",
            AuditError::NotWriter => "Caller is not the authorized audit writer",
            AuditError::WriterNotSet => "No audit writer has been configured",
            AuditError::InvalidInput => "Access type or justification is malformed",
        }
    }
}

#[contract]
pub struct AuditLedgerContract;

#[contractimpl]
impl AuditLedgerContract {
    pub fn initialize(env: Env, admin: Address) -> Result<(), AuditError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(AuditError::AlreadyInitialized);
        }

        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        ttl::extend_instance(&env);

        Ok(())
    }

    /// Configure the single contract allowed to append.
    pub fn set_writer(env: Env, admin: Address, writer: Address) -> Result<(), AuditError> {
        admin.require_auth();

        let stored: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(AuditError::NotInitialized)?;
        if admin != stored {
            return Err(AuditError::Unauthorized);
        }

        env.storage().instance().set(&DataKey::Writer, &writer);
        events::publish_writer_set(&env, admin, writer);

        Ok(())
    }

    pub fn get_writer(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Writer)
    }

    /// Append one record and return its index.
    pub fn append(
        env: Env,
        writer: Address,
        actor: Address,
        subject: Address,
        access_type: String,
        justification: String,
        is_emergency: bool,
    ) -> Result<u64, AuditError> {
        writer.require_auth();

        let configured: Address = env
            .storage()
            .instance()
            .get(&DataKey::Writer)
            .ok_or(AuditError::WriterNotSet)?;
        if writer != configured {
            return Err(AuditError::NotWriter);
        }
        if text::out_of_bounds(&access_type, MAX_ACCESS_TYPE_LEN)
            || justification.len() > MAX_JUSTIFICATION_LEN
        {
            return Err(AuditError::InvalidInput);
        }

        let record = AuditTrail::append(
            &env,
            actor,
            subject,
            access_type,
            justification,
            is_emergency,
        );

        log!(&env, "audit appended", record.index, record.is_emergency);
        events::publish_appended(
            &env,
            record.index,
            record.actor,
            record.subject,
            record.access_type,
            record.is_emergency,
            record.timestamp,
        );

        Ok(record.index)
    }

    pub fn query_by_subject(env: Env, subject: Address) -> Vec<AuditRecord> {
        AuditTrail::query(&env, &DataKey::BySubject(subject))
    }

    pub fn query_by_actor(env: Env, actor: Address) -> Vec<AuditRecord> {
        AuditTrail::query(&env, &DataKey::ByActor(actor))
    }

    pub fn query_emergency_only(env: Env) -> Vec<AuditRecord> {
        AuditTrail::query(&env, &DataKey::Emergency)
    }

    pub fn query_by_access_type(env: Env, access_type: String) -> Vec<AuditRecord> {
        AuditTrail::query(&env, &DataKey::ByType(access_type))
    }

    pub fn get_record(env: Env, index: u64) -> Option<AuditRecord> {
        AuditTrail::get(&env, index)
    }

    pub fn record_count(env: Env) -> u64 {
        AuditTrail::count(&env)
    }

    /// Hash of the most recent record (zero when empty).
    pub fn head_hash(env: Env) -> BytesN<32> {
        AuditTrail::head(&env)
    }

    pub fn verify_chain(env: Env) -> bool {
        AuditTrail::verify_chain(&env)
    }
}
