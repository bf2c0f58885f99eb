//! Shared vocabulary for the medledger contract suite.
//!
//! This crate provides:
//! - [`ErrorKind`]: the error taxonomy every contract error maps onto.
//! - Role, permission and audit access-type names used across contracts.
//! - Duration and length limits for proofs and emergency access.
//! - Proof binding ([`proof`]), string helpers ([`text`]) and TTL helpers ([`ttl`]).
//!
//! Contract-specific error enums use their own code range so that a raw code
//! identifies the contract that produced it:
//!
//! | Range     | Contract          |
//! |-----------|-------------------|
//! | 100 – 199 | identity          |
//! | 200 – 299 | proof_ledger      |
//! | 300 – 399 | access_control    |
//! | 400 – 499 | audit_ledger      |
//! | 500 – 599 | patient_records   |

#![no_std]

use soroban_sdk::contracttype;

pub mod proof;
pub mod text;
pub mod ttl;

pub use proof::{combine_proof, is_zero_hash};

// ── Error taxonomy ───────────────────────────────────────────────────────────

/// Kind of precondition that failed. Every contract error exposes `kind()`
/// so callers can tell "not authorized" from "expired" from "malformed".
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorKind {
    /// Contract wiring problems: not initialised, initialised twice.
    Lifecycle = 1,
    /// Identity, record, policy, role, proof or grant is absent.
    NotFound = 2,
    AlreadyExists = 3,
    /// Permission, role or ownership check failed.
    Unauthorized = 4,
    /// Role, proof, policy or grant is past its validity.
    Expired = 5,
    /// Zero, replayed or mismatched proof.
    InvalidProof = 6,
    InvalidInput = 7,
    /// Policy, role, identity or grant was explicitly deactivated.
    Inactive = 8,
}

// ── Durations (seconds) ──────────────────────────────────────────────────────

/// Default proof freshness window.
pub const DEFAULT_PROOF_VALIDITY: u64 = 3_600;
/// Lifetime of a grant created from a delegation policy.
pub const DELEGATED_EMERGENCY_DURATION: u64 = 86_400;
/// Lifetime of a break-glass grant.
pub const BREAK_GLASS_DURATION: u64 = 14_400;

// ── Length limits ────────────────────────────────────────────────────────────

pub const MIN_BREAK_GLASS_REASON_LEN: u32 = 20;
pub const MAX_REASON_LEN: u32 = 256;
pub const MAX_CATEGORY_LEN: u32 = 64;
pub const MAX_IDENTITY_ID_LEN: u32 = 128;

// ── Roles ────────────────────────────────────────────────────────────────────

pub mod roles {
    pub const ADMIN: &str = "ADMIN";
    pub const DOCTOR: &str = "DOCTOR";
    pub const NURSE: &str = "NURSE";
    pub const PARAMEDIC: &str = "PARAMEDIC";
    pub const PATIENT: &str = "PATIENT";
    pub const RESEARCHER: &str = "RESEARCHER";

    /// Roles allowed to invoke break-glass access.
    pub const CLINICAL: [&str; 3] = [DOCTOR, NURSE, PARAMEDIC];
}

// ── Permissions ──────────────────────────────────────────────────────────────

pub mod permissions {
    pub const CREATE_RECORD: &str = "create_record";
    pub const VIEW_DATA: &str = "view_data";
    pub const UPDATE_DATA: &str = "update_data";
    pub const MANAGE_ROLES: &str = "manage_roles";
}

// ── Audit access types ───────────────────────────────────────────────────────

pub mod access_types {
    pub const CREATE_RECORD: &str = "CREATE_RECORD";
    pub const UPDATE_DATA: &str = "UPDATE_DATA";
    pub const READ_DATA: &str = "READ_DATA";
    pub const EMERGENCY_ACCESS: &str = "EMERGENCY_ACCESS";
    pub const BREAK_GLASS: &str = "BREAK_GLASS";
    pub const REVOKE_EMERGENCY: &str = "REVOKE_EMERGENCY";

    /// Prefix placed in front of the reason of every break-glass audit entry.
    pub const BREAK_GLASS_TAG: &str = "BREAK_GLASS: ";
}

/// Wildcard category recorded on break-glass grants. Reserved: never accepted
/// as a caller-supplied category.
pub const ALL_CATEGORIES: &str = "*";
