use common::ErrorKind;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum IdentityError {
    NotInitialized = 100,
    AlreadyInitialized = 101,
    /// The owner already holds an identity, or the id is taken.
    AlreadyExists = 102,
    NotFound = 103,
    /// Caller is neither the owner nor a controller of the identity.
    NotOwner = 104,
    /// The identity has been deactivated.
    Inactive = 105,
    InvalidInput = 106,
    ControllerExists = 107,
}

impl IdentityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::NotInitialized | IdentityError::AlreadyInitialized => {
                ErrorKind::Lifecycle
            }
            IdentityError::AlreadyExists | IdentityError::ControllerExists => {
                ErrorKind::AlreadyExists
            }
            IdentityError::NotFound => ErrorKind::NotFound,
            IdentityError::NotOwner => ErrorKind::Unauthorized,
            IdentityError::Inactive => ErrorKind::Inactive,
            IdentityError::InvalidInput => ErrorKind::InvalidInput,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            IdentityError::NotInitialized => "Identity directory has not been initialized",
            IdentityError::AlreadyInitialized => "Identity directory is already initialized",
            IdentityError::AlreadyExists => "Owner already has an identity or the id is taken",
            IdentityError::NotFound => "Identity not found",
            IdentityError::NotOwner => "Caller does not own or control this identity",
            IdentityError::Inactive => "Identity has been deactivated",
            IdentityError::InvalidInput => "Identity id, controller or attribute is malformed",
            IdentityError::ControllerExists => "Controller is already listed on this identity",
        }
    }
}
