#![no_std]

//! # Identity Directory
//!
//! Owns one identity document per principal. Identities carry a set of
//! controller ids and free-form attributes, and can be deactivated exactly
//! once. Other contracts use [`IdentityContract::resolve`] and
//! [`IdentityContract::verify_control`] to bind principals to identities.

pub mod directory;
pub mod errors;
mod events;

pub use directory::Identity;
pub use errors::IdentityError;

use common::{text, MAX_IDENTITY_ID_LEN, MAX_REASON_LEN};
use soroban_sdk::{
    contract, contractimpl, log, symbol_short, Address, Env, Map, String, Symbol, Vec,
};

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

const MAX_ATTRIBUTE_KEY_LEN: u32 = 64;

#[contract]
pub struct IdentityContract;

#[contractimpl]
impl IdentityContract {
    /// Initialize the directory with an admin address.
    pub fn initialize(env: Env, admin: Address) -> Result<(), IdentityError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(IdentityError::AlreadyInitialized);
        }

        admin.require_auth();
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        common::ttl::extend_instance(&env);

        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, IdentityError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(IdentityError::NotInitialized)
    }

    /// Create the identity `id` owned by `owner`.
    ///
    /// Fails with `AlreadyExists` if `owner` already created an identity
    /// (active or not) or if `id` is taken.
    pub fn create_identity(
        env: Env,
        owner: Address,
        id: String,
        controllers: Vec<String>,
    ) -> Result<String, IdentityError> {
        Self::require_initialized(&env)?;
        owner.require_auth();

        if text::out_of_bounds(&id, MAX_IDENTITY_ID_LEN) {
            return Err(IdentityError::InvalidInput);
        }
        if directory::owned_id(&env, &owner).is_some() || directory::id_exists(&env, &id) {
            return Err(IdentityError::AlreadyExists);
        }

        let mut unique = Vec::new(&env);
        for controller in controllers.iter() {
            if text::out_of_bounds(&controller, MAX_IDENTITY_ID_LEN) || controller == id {
                return Err(IdentityError::InvalidInput);
            }
            if !unique.contains(&controller) {
                unique.push_back(controller);
            }
        }

        let now = env.ledger().timestamp();
        let mut identity = Identity {
            id: id.clone(),
            owner: owner.clone(),
            controllers: unique,
            attributes: Map::new(&env),
            active: true,
            created_at: now,
            last_updated: now,
        };
        directory::save_identity(&env, &mut identity);
        directory::index_owner(&env, &owner, &id);

        log!(&env, "identity created", id.clone(), owner.clone());
        events::publish_identity_created(&env, id.clone(), owner);

        Ok(id)
    }

    /// Set an attribute on an identity. The caller must control it.
    pub fn add_attribute(
        env: Env,
        caller: Address,
        id: String,
        key: String,
        value: String,
    ) -> Result<(), IdentityError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if text::out_of_bounds(&key, MAX_ATTRIBUTE_KEY_LEN) || value.len() > MAX_REASON_LEN {
            return Err(IdentityError::InvalidInput);
        }

        let mut identity = Self::load_active(&env, &id)?;
        if !directory::controls(&env, &caller, &identity) {
            return Err(IdentityError::NotOwner);
        }

        identity.attributes.set(key.clone(), value);
        directory::save_identity(&env, &mut identity);
        events::publish_identity_updated(&env, id, caller, key);

        Ok(())
    }

    /// Add a controller id. Owner only.
    pub fn add_controller(
        env: Env,
        caller: Address,
        id: String,
        controller: String,
    ) -> Result<(), IdentityError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut identity = Self::load_active(&env, &id)?;
        if identity.owner != caller {
            return Err(IdentityError::NotOwner);
        }
        if text::out_of_bounds(&controller, MAX_IDENTITY_ID_LEN) || controller == id {
            return Err(IdentityError::InvalidInput);
        }
        if identity.controllers.contains(&controller) {
            return Err(IdentityError::ControllerExists);
        }

        identity.controllers.push_back(controller);
        directory::save_identity(&env, &mut identity);
        events::publish_identity_updated(
            &env,
            id,
            caller,
            String::from_str(&env, "controllers"),
        );

        Ok(())
    }

    /// Deactivate an identity. Owner only, one-way.
    pub fn deactivate(env: Env, caller: Address, id: String) -> Result<(), IdentityError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut identity = Self::load_active(&env, &id)?;
        if identity.owner != caller {
            return Err(IdentityError::NotOwner);
        }

        identity.active = false;
        directory::save_identity(&env, &mut identity);

        log!(&env, "identity deactivated", id.clone());
        events::publish_identity_deactivated(&env, id, caller);

        Ok(())
    }

    /// Return the id of the active identity owned by `principal`.
    pub fn resolve(env: Env, principal: Address) -> Result<String, IdentityError> {
        let id = directory::owned_id(&env, &principal).ok_or(IdentityError::NotFound)?;
        let identity = directory::get_identity(&env, &id).ok_or(IdentityError::NotFound)?;
        if !identity.active {
            return Err(IdentityError::Inactive);
        }
        Ok(id)
    }

    /// `true` if `principal` owns or controls the active identity `id`.
    pub fn verify_control(env: Env, principal: Address, id: String) -> bool {
        match directory::get_identity(&env, &id) {
            Some(identity) => identity.active && directory::controls(&env, &principal, &identity),
            None => false,
        }
    }

    pub fn is_active(env: Env, id: String) -> bool {
        directory::get_identity(&env, &id)
            .map(|identity| identity.active)
            .unwrap_or(false)
    }

    pub fn get_identity(env: Env, id: String) -> Result<Identity, IdentityError> {
        directory::get_identity(&env, &id).ok_or(IdentityError::NotFound)
    }

    pub fn get_attribute(env: Env, id: String, key: String) -> Option<String> {
        directory::get_identity(&env, &id).and_then(|identity| identity.attributes.get(key))
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), IdentityError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(IdentityError::NotInitialized);
        }
        Ok(())
    }

    fn load_active(env: &Env, id: &String) -> Result<Identity, IdentityError> {
        let identity = directory::get_identity(env, id).ok_or(IdentityError::NotFound)?;
        if !identity.active {
            return Err(IdentityError::Inactive);
        }
        Ok(identity)
    }
}
