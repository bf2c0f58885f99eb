use common::ErrorKind;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AccessError {
    NotInitialized = 300,
    AlreadyInitialized = 301,
    /// Caller holds no effective ADMIN role and is not the bootstrap owner.
    Unauthorized = 302,
    RoleNotRegistered = 303,
    RoleAlreadyRegistered = 304,
    /// Validity period must be greater than zero.
    InvalidValidityPeriod = 305,
    /// No active assignment to revoke.
    NotActive = 306,
    IdentityNotFound = 307,
    IdentityInactive = 308,
    /// The principal does not own or control the identity.
    IdentityNotControlled = 309,
    AdminAlreadySetup = 310,
    InvalidInput = 311,
    /// Principal has never been assigned a role.
    NoRoleAssigned = 312,
    /// The assignment exists but `valid_until` has passed.
    RoleExpired = 313,
    /// The assignment was revoked.
    RoleRevoked = 314,
    /// The role does not carry the requested permission.
    PermissionDenied = 315,
}

impl AccessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::NotInitialized
            | AccessError::AlreadyInitialized
            | AccessError::AdminAlreadySetup => ErrorKind::Lifecycle,
            AccessError::Unauthorized
            | AccessError::IdentityNotControlled
            | AccessError::PermissionDenied => ErrorKind::Unauthorized,
            AccessError::RoleNotRegistered
            | AccessError::IdentityNotFound
            | AccessError::NoRoleAssigned => ErrorKind::NotFound,
            AccessError::RoleAlreadyRegistered => ErrorKind::AlreadyExists,
            AccessError::InvalidValidityPeriod | AccessError::InvalidInput => {
                ErrorKind::InvalidInput
            }
            AccessError::NotActive | AccessError::IdentityInactive | AccessError::RoleRevoked => {
                ErrorKind::Inactive
            }
            AccessError::RoleExpired => ErrorKind::Expired,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AccessError::NotInitialized => "Role store has not been initialized",
            AccessError::AlreadyInitialized => "Role store is already initialized",
            AccessError::Unauthorized => "Caller must hold an effective ADMIN role",
            AccessError::RoleNotRegistered => "Role is not registered",
            AccessError::RoleAlreadyRegistered => "Role is already registered",
            AccessError::InvalidValidityPeriod => "Validity period must be greater than zero",
            AccessError::NotActive => "Principal has no active role assignment",
            AccessError::IdentityNotFound => "Identity referenced by the assignment does not exist",
            AccessError::IdentityInactive => "Identity referenced by the assignment is deactivated",
            AccessError::IdentityNotControlled => "Principal does not control the identity",
            AccessError::AdminAlreadySetup => "Initial admin has already been set up",
            AccessError::InvalidInput => "Credential hash or role id is malformed",
            AccessError::NoRoleAssigned => "Principal has no role assignment",
            AccessError::RoleExpired => "Role assignment has expired",
            AccessError::RoleRevoked => "Role assignment was revoked",
            AccessError::PermissionDenied => "Role does not grant the requested permission",
        }
    }
}
