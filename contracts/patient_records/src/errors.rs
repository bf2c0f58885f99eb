use common::ErrorKind;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RecordsError {
    NotInitialized = 500,
    AlreadyInitialized = 501,
    /// Caller lacks the role permission or emergency grant the operation needs.
    Unauthorized = 502,
    /// The caller's principal does not resolve to an active identity.
    IdentityNotFound = 503,
    InvalidProof = 504,
    RecordNotFound = 505,
    RecordAlreadyExists = 506,
    RoleExpired = 507,
    /// The caller's role assignment was revoked.
    RoleInactive = 508,
    PolicyNotFound = 509,
    NotPolicyOwner = 510,
    /// Policy delegator/delegatee do not match the request.
    PolicyMismatch = 511,
    PolicyInactive = 512,
    PolicyExpired = 513,
    MustBeDelegatedRole = 514,
    /// Break-glass requires DOCTOR, NURSE or PARAMEDIC.
    NotClinicalRole = 515,
    InvalidInput = 516,
    EmergencyGrantNotFound = 517,
    GrantAlreadyRevoked = 518,
    /// A grant matched the request but its window has closed.
    EmergencyAccessExpired = 519,
    CategoryNotFound = 520,
    /// The audit ledger refused the append; the whole operation is rolled back.
    AuditUnavailable = 521,
    IdentityNotControlled = 522,
}

impl RecordsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordsError::NotInitialized
            | RecordsError::AlreadyInitialized
            | RecordsError::AuditUnavailable => ErrorKind::Lifecycle,
            RecordsError::IdentityNotFound
            | RecordsError::RecordNotFound
            | RecordsError::PolicyNotFound
            | RecordsError::EmergencyGrantNotFound
            | RecordsError::CategoryNotFound => ErrorKind::NotFound,
            RecordsError::RecordAlreadyExists => ErrorKind::AlreadyExists,
            RecordsError::Unauthorized
            | RecordsError::NotPolicyOwner
            | RecordsError::PolicyMismatch
            | RecordsError::MustBeDelegatedRole
            | RecordsError::NotClinicalRole
            | RecordsError::IdentityNotControlled => ErrorKind::Unauthorized,
            RecordsError::RoleExpired
            | RecordsError::PolicyExpired
            | RecordsError::EmergencyAccessExpired => ErrorKind::Expired,
            RecordsError::InvalidProof => ErrorKind::InvalidProof,
            RecordsError::InvalidInput => ErrorKind::InvalidInput,
            RecordsError::RoleInactive
            | RecordsError::PolicyInactive
            | RecordsError::GrantAlreadyRevoked => ErrorKind::Inactive,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RecordsError::NotInitialized => "Record manager has not been initialized",
            RecordsError::AlreadyInitialized => "Record manager is already initialized",
            RecordsError::Unauthorized => {
                "Caller holds neither the required permission nor a matching emergency grant"
            }
            RecordsError::IdentityNotFound => "Caller does not resolve to an active identity",
            RecordsError::InvalidProof => "Submitted proof is missing, stale or does not match",
            RecordsError::RecordNotFound => "Patient has no record",
            RecordsError::RecordAlreadyExists => "Patient already has a record",
            RecordsError::RoleExpired => "Caller's role assignment has expired",
            RecordsError::RoleInactive => "Caller's role assignment was revoked",
            RecordsError::PolicyNotFound => "Delegation policy does not exist",
            RecordsError::NotPolicyOwner => "Only the delegator may change this policy",
            RecordsError::PolicyMismatch => "Policy does not name this delegatee and patient",
            RecordsError::PolicyInactive => "Delegation policy is deactivated",
            RecordsError::PolicyExpired => "Delegation policy has expired",
            RecordsError::MustBeDelegatedRole => "Caller's role is not flagged as delegated",
            RecordsError::NotClinicalRole => "Break-glass access requires a clinical role",
            RecordsError::InvalidInput => "Reason, category or validity period is malformed",
            RecordsError::EmergencyGrantNotFound => "No emergency grant exists for this provider",
            RecordsError::GrantAlreadyRevoked => "Emergency grant was already revoked",
            RecordsError::EmergencyAccessExpired => "Emergency grant has expired",
            RecordsError::CategoryNotFound => "No data stored under this category",
            RecordsError::AuditUnavailable => "Audit ledger rejected the entry",
            RecordsError::IdentityNotControlled => "Patient does not control this identity",
        }
    }
}
