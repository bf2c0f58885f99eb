#![no_std]

//! # Delegation & Emergency Access Manager
//!
//! Owns patient records, their per-category payloads, delegation policies and
//! emergency grants. Every request is authorized against the collaborators
//! wired in at [`PatientRecordsContract::initialize`]:
//!
//! - `access_control` for role permissions and delegated-role flags,
//! - `identity` for identity resolution,
//! - `proof_ledger` for proof freshness,
//! - `audit_ledger` to record each successful access.
//!
//! Preconditions are checked before any write. The audit append happens last;
//! if it fails the invocation returns an error and every write is rolled back.

mod delegation;
pub mod errors;
mod events;
mod records;

pub use delegation::{DelegationPermission, DelegationPolicy, EmergencyGrant};
pub use errors::RecordsError;
pub use records::PatientRecord;

use access_control::{AccessControlContractClient, AccessError};
use audit_ledger::AuditLedgerContractClient;
use common::{
    access_types, combine_proof, permissions, roles, text, ttl, ALL_CATEGORIES,
    BREAK_GLASS_DURATION, DELEGATED_EMERGENCY_DURATION, MAX_CATEGORY_LEN, MAX_REASON_LEN,
    MIN_BREAK_GLASS_REASON_LEN,
};
use identity::IdentityContractClient;
use proof_ledger::ProofLedgerContractClient;
use soroban_sdk::{
    contract, contractimpl, contracttype, log, Address, Bytes, BytesN, Env, String, Symbol, Vec,
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum DataKey {
    Admin,
    AccessControl,
    Identity,
    ProofLedger,
    AuditLedger,
    PolicyCounter,
    Record(Address),
    Data(Address, String),
    Policy(u64),
    PatientPolicies(Address),
    Grant(Address, Address),
}

#[contract]
pub struct PatientRecordsContract;

#[contractimpl]
impl PatientRecordsContract {
    /// Wire the manager to its collaborators. Call once.
    pub fn initialize(
        env: Env,
        admin: Address,
        access_control: Address,
        identity: Address,
        proof_ledger: Address,
        audit_ledger: Address,
    ) -> Result<(), RecordsError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(RecordsError::AlreadyInitialized);
        }

        admin.require_auth();
        let store = env.storage().instance();
        store.set(&DataKey::Admin, &admin);
        store.set(&DataKey::AccessControl, &access_control);
        store.set(&DataKey::Identity, &identity);
        store.set(&DataKey::ProofLedger, &proof_ledger);
        store.set(&DataKey::AuditLedger, &audit_ledger);
        ttl::extend_instance(&env);

        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, RecordsError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(RecordsError::NotInitialized)
    }

    // ======================== Record lifecycle ========================

    /// Create the record for `patient`. Requires `create_record`.
    pub fn create_patient_record(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<(), RecordsError> {
        caller.require_auth();

        let access = Self::access(&env)?;
        Self::require_permission(&env, &access, &caller, permissions::CREATE_RECORD)?;

        if records::exists(&env, &patient) {
            return Err(RecordsError::RecordAlreadyExists);
        }

        // A patient without an identity yet can link one later.
        let linked_identity = match Self::identity(&env)?.try_resolve(&patient) {
            Ok(Ok(id)) => Some(id),
            _ => None,
        };

        let now = env.ledger().timestamp();
        let record = PatientRecord {
            patient: patient.clone(),
            exists: true,
            linked_identity: linked_identity.clone(),
            created_by: caller.clone(),
            created_at: now,
            updated_at: now,
        };
        records::save(&env, &record);

        log!(&env, "record created", patient.clone(), caller.clone());
        events::publish_record_created(&env, patient.clone(), caller.clone(), linked_identity);

        Self::audit(
            &env,
            &caller,
            &patient,
            access_types::CREATE_RECORD,
            String::from_str(&env, ""),
            false,
        )
    }

    /// Attach an identity the patient controls to their record.
    pub fn link_identity(
        env: Env,
        patient: Address,
        identity_id: String,
    ) -> Result<(), RecordsError> {
        patient.require_auth();

        let mut record = records::get(&env, &patient).ok_or(RecordsError::RecordNotFound)?;
        if !Self::identity(&env)?.verify_control(&patient, &identity_id) {
            return Err(RecordsError::IdentityNotControlled);
        }

        record.linked_identity = Some(identity_id.clone());
        record.updated_at = env.ledger().timestamp();
        records::save(&env, &record);

        events::publish_identity_linked(&env, patient, identity_id);
        Ok(())
    }

    // ======================== Direct access ========================

    /// Overwrite one category of the patient's record. Requires `update_data`.
    pub fn update_data(
        env: Env,
        caller: Address,
        patient: Address,
        category: String,
        blob: Bytes,
        proof: BytesN<32>,
    ) -> Result<(), RecordsError> {
        caller.require_auth();
        Self::require_category(&env, &category)?;

        Self::require_identity(&env, &caller)?;
        Self::require_proof(&env, &caller, &proof)?;
        if !records::exists(&env, &patient) {
            return Err(RecordsError::RecordNotFound);
        }
        let access = Self::access(&env)?;
        Self::require_permission(&env, &access, &caller, permissions::UPDATE_DATA)?;

        records::set_data(&env, &patient, &category, &blob);
        records::touch(&env, &patient);

        events::publish_data_updated(&env, patient.clone(), caller.clone(), category.clone());

        Self::audit(
            &env,
            &caller,
            &patient,
            access_types::UPDATE_DATA,
            category,
            false,
        )
    }

    /// Read one category. Allowed with `view_data`, or with a current
    /// emergency grant covering the category.
    pub fn get_data(
        env: Env,
        caller: Address,
        patient: Address,
        category: String,
        proof: BytesN<32>,
    ) -> Result<Bytes, RecordsError> {
        caller.require_auth();
        Self::require_category(&env, &category)?;

        Self::require_identity(&env, &caller)?;
        Self::require_proof(&env, &caller, &proof)?;
        if !records::exists(&env, &patient) {
            return Err(RecordsError::RecordNotFound);
        }

        let access = Self::access(&env)?;
        let view = Symbol::new(&env, permissions::VIEW_DATA);
        let via_role = match access.try_check_permission(&caller, &view) {
            Ok(Ok(())) => Ok(()),
            Err(Ok(e)) => Err(e),
            _ => Err(AccessError::PermissionDenied),
        };

        let mut via_grant = false;
        if let Err(role_err) = via_role {
            if delegation::has_current_grant(&env, &patient, &caller, &category) {
                via_grant = true;
            } else if delegation::grant_lapsed(&env, &patient, &caller, &category) {
                return Err(RecordsError::EmergencyAccessExpired);
            } else {
                log!(&env, "read denied", caller.clone(), patient.clone());
                return Err(Self::map_role_error(role_err));
            }
        }

        let blob =
            records::get_data(&env, &patient, &category).ok_or(RecordsError::CategoryNotFound)?;

        Self::audit(
            &env,
            &caller,
            &patient,
            access_types::READ_DATA,
            category,
            via_grant,
        )?;
        Ok(blob)
    }

    // ======================== Delegation policies ========================

    /// Create a policy letting `delegatee` request emergency access to one
    /// category of the delegator's record.
    pub fn create_policy(
        env: Env,
        delegator: Address,
        delegatee: Address,
        category: String,
        permission: DelegationPermission,
        validity_period: u64,
    ) -> Result<u64, RecordsError> {
        delegator.require_auth();

        if validity_period == 0 || delegatee == delegator {
            return Err(RecordsError::InvalidInput);
        }
        Self::require_category(&env, &category)?;
        if !records::exists(&env, &delegator) {
            return Err(RecordsError::RecordNotFound);
        }

        let now = env.ledger().timestamp();
        let policy = DelegationPolicy {
            policy_id: delegation::next_policy_id(&env),
            delegator: delegator.clone(),
            delegatee,
            data_category: category,
            permission,
            active: true,
            valid_until: now.saturating_add(validity_period),
            created_at: now,
        };
        delegation::save_policy(&env, &policy);
        delegation::index_policy(&env, &delegator, policy.policy_id);

        log!(&env, "policy created", policy.policy_id, delegator);
        events::publish_policy_created(
            &env,
            policy.policy_id,
            policy.delegator,
            policy.delegatee,
            policy.data_category,
            policy.permission,
            policy.valid_until,
        );

        Ok(policy.policy_id)
    }

    /// Activate or deactivate a policy. Setting the current state is a no-op.
    pub fn update_policy(
        env: Env,
        delegator: Address,
        policy_id: u64,
        active: bool,
    ) -> Result<(), RecordsError> {
        delegator.require_auth();

        let mut policy =
            delegation::get_policy(&env, policy_id).ok_or(RecordsError::PolicyNotFound)?;
        if policy.delegator != delegator {
            return Err(RecordsError::NotPolicyOwner);
        }
        if policy.active == active {
            return Ok(());
        }

        policy.active = active;
        delegation::save_policy(&env, &policy);
        events::publish_policy_updated(&env, policy_id, delegator, active);

        Ok(())
    }

    // ======================== Emergency access ========================

    /// Exercise a delegation policy. The proof ledger must hold
    /// `keccak256(credential_hash || proof)` as the delegatee's current proof.
    pub fn request_delegated_emergency_access(
        env: Env,
        delegatee: Address,
        patient: Address,
        reason: String,
        proof: BytesN<32>,
        policy_id: u64,
    ) -> Result<(), RecordsError> {
        delegatee.require_auth();
        if text::out_of_bounds(&reason, MAX_REASON_LEN) {
            return Err(RecordsError::InvalidInput);
        }

        Self::require_identity(&env, &delegatee)?;

        let policy =
            delegation::get_policy(&env, policy_id).ok_or(RecordsError::PolicyNotFound)?;
        if policy.delegatee != delegatee || policy.delegator != patient {
            return Err(RecordsError::PolicyMismatch);
        }
        if !policy.active {
            return Err(RecordsError::PolicyInactive);
        }
        let now = env.ledger().timestamp();
        if policy.valid_until <= now {
            return Err(RecordsError::PolicyExpired);
        }

        let access = Self::access(&env)?;
        let assignment = access
            .get_assignment(&delegatee)
            .ok_or(RecordsError::MustBeDelegatedRole)?;
        let binding = combine_proof(&env, &assignment.credential_hash, &proof);
        Self::require_proof(&env, &delegatee, &binding)?;
        if !access.is_delegated_role(&delegatee) {
            return Err(RecordsError::MustBeDelegatedRole);
        }

        if !records::exists(&env, &patient) {
            return Err(RecordsError::RecordNotFound);
        }

        let grant = EmergencyGrant {
            policy,
            granted: true,
            granted_at: now,
            expires_at: now.saturating_add(DELEGATED_EMERGENCY_DURATION),
            reason: reason.clone(),
            proof_binding: binding,
            valid: true,
            break_glass: false,
        };
        delegation::save_grant(&env, &grant);

        log!(&env, "delegated emergency access", patient.clone(), delegatee.clone());
        events::publish_emergency_granted(
            &env,
            false,
            patient.clone(),
            delegatee.clone(),
            policy_id,
            grant.expires_at,
            reason.clone(),
        );

        Self::audit(
            &env,
            &delegatee,
            &patient,
            access_types::EMERGENCY_ACCESS,
            reason,
            true,
        )
    }

    /// Emergency read access to the whole record for any clinical role,
    /// bypassing delegation policies. The reason must be at least 20 characters
    /// and at most `MAX_REASON_LEN` bytes.
    pub fn break_glass_access(
        env: Env,
        provider: Address,
        patient: Address,
        reason: String,
        proof: BytesN<32>,
    ) -> Result<(), RecordsError> {
        provider.require_auth();
        let too_short = text::char_count(&reason) < MIN_BREAK_GLASS_REASON_LEN;
        if too_short || reason.len() > MAX_REASON_LEN {
            return Err(RecordsError::InvalidInput);
        }

        let access = Self::access(&env)?;
        let clinical = roles::CLINICAL
            .iter()
            .any(|role| access.has_role(&provider, &Symbol::new(&env, role)));
        if !clinical {
            log!(&env, "break-glass refused", provider.clone());
            return Err(RecordsError::NotClinicalRole);
        }

        Self::require_proof(&env, &provider, &proof)?;
        if !records::exists(&env, &patient) {
            return Err(RecordsError::RecordNotFound);
        }

        let now = env.ledger().timestamp();
        let expires_at = now.saturating_add(BREAK_GLASS_DURATION);
        let grant = EmergencyGrant {
            policy: DelegationPolicy {
                policy_id: 0,
                delegator: patient.clone(),
                delegatee: provider.clone(),
                data_category: String::from_str(&env, ALL_CATEGORIES),
                permission: DelegationPermission::Read,
                active: true,
                valid_until: expires_at,
                created_at: now,
            },
            granted: true,
            granted_at: now,
            expires_at,
            reason: reason.clone(),
            proof_binding: proof,
            valid: true,
            break_glass: true,
        };
        delegation::save_grant(&env, &grant);

        log!(&env, "break-glass access", patient.clone(), provider.clone());
        events::publish_emergency_granted(
            &env,
            true,
            patient.clone(),
            provider.clone(),
            0,
            expires_at,
            reason.clone(),
        );

        Self::audit(
            &env,
            &provider,
            &patient,
            access_types::BREAK_GLASS,
            text::prefixed(&env, access_types::BREAK_GLASS_TAG, &reason),
            true,
        )
    }

    /// Permanently revoke the provider's emergency grant on the patient's record.
    pub fn revoke_emergency_access(
        env: Env,
        patient: Address,
        provider: Address,
    ) -> Result<(), RecordsError> {
        patient.require_auth();

        let mut grant = delegation::get_grant(&env, &patient, &provider)
            .ok_or(RecordsError::EmergencyGrantNotFound)?;
        if !grant.valid {
            return Err(RecordsError::GrantAlreadyRevoked);
        }

        grant.valid = false;
        delegation::save_grant(&env, &grant);

        log!(&env, "emergency access revoked", patient.clone(), provider.clone());
        events::publish_emergency_revoked(&env, patient.clone(), provider);

        Self::audit(
            &env,
            &patient,
            &patient,
            access_types::REVOKE_EMERGENCY,
            String::from_str(&env, ""),
            false,
        )
    }

    // ======================== Queries ========================

    pub fn get_record(env: Env, patient: Address) -> Option<PatientRecord> {
        records::get(&env, &patient)
    }

    pub fn has_record(env: Env, patient: Address) -> bool {
        records::exists(&env, &patient)
    }

    pub fn get_policy(env: Env, policy_id: u64) -> Option<DelegationPolicy> {
        delegation::get_policy(&env, policy_id)
    }

    pub fn get_patient_policies(env: Env, patient: Address) -> Vec<u64> {
        delegation::patient_policies(&env, &patient)
    }

    pub fn get_policy_count(env: Env) -> u64 {
        delegation::policy_count(&env)
    }

    pub fn get_emergency_grant(
        env: Env,
        patient: Address,
        provider: Address,
    ) -> Option<EmergencyGrant> {
        delegation::get_grant(&env, &patient, &provider)
    }

    pub fn has_valid_emergency_access(
        env: Env,
        patient: Address,
        provider: Address,
        category: String,
    ) -> bool {
        delegation::has_current_grant(&env, &patient, &provider, &category)
    }

    // ======================== Internal helpers ========================

    fn collaborator(env: &Env, key: &DataKey) -> Result<Address, RecordsError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(RecordsError::NotInitialized)
    }

    fn access(env: &Env) -> Result<AccessControlContractClient<'_>, RecordsError> {
        let id = Self::collaborator(env, &DataKey::AccessControl)?;
        Ok(AccessControlContractClient::new(env, &id))
    }

    fn identity(env: &Env) -> Result<IdentityContractClient<'_>, RecordsError> {
        let id = Self::collaborator(env, &DataKey::Identity)?;
        Ok(IdentityContractClient::new(env, &id))
    }

    fn require_identity(env: &Env, principal: &Address) -> Result<(), RecordsError> {
        match Self::identity(env)?.try_resolve(principal) {
            Ok(Ok(_)) => Ok(()),
            _ => Err(RecordsError::IdentityNotFound),
        }
    }

    fn require_proof(
        env: &Env,
        principal: &Address,
        proof: &BytesN<32>,
    ) -> Result<(), RecordsError> {
        let id = Self::collaborator(env, &DataKey::ProofLedger)?;
        match ProofLedgerContractClient::new(env, &id).try_validate(principal, proof) {
            Ok(Ok(true)) => Ok(()),
            _ => {
                log!(env, "proof rejected", principal.clone());
                Err(RecordsError::InvalidProof)
            }
        }
    }

    fn require_permission(
        env: &Env,
        access: &AccessControlContractClient,
        principal: &Address,
        permission: &str,
    ) -> Result<(), RecordsError> {
        match access.try_check_permission(principal, &Symbol::new(env, permission)) {
            Ok(Ok(())) => Ok(()),
            Err(Ok(e)) => {
                log!(env, "permission denied", principal.clone(), e as u32);
                Err(Self::map_role_error(e))
            }
            _ => Err(RecordsError::Unauthorized),
        }
    }

    fn map_role_error(err: AccessError) -> RecordsError {
        match err {
            AccessError::RoleExpired => RecordsError::RoleExpired,
            AccessError::RoleRevoked => RecordsError::RoleInactive,
            _ => RecordsError::Unauthorized,
        }
    }

    fn require_category(env: &Env, category: &String) -> Result<(), RecordsError> {
        if text::out_of_bounds(category, MAX_CATEGORY_LEN)
            || *category == String::from_str(env, ALL_CATEGORIES)
        {
            return Err(RecordsError::InvalidInput);
        }
        Ok(())
    }

    fn audit(
        env: &Env,
        actor: &Address,
        subject: &Address,
        access_type: &str,
        justification: String,
        is_emergency: bool,
    ) -> Result<(), RecordsError> {
        let id = Self::collaborator(env, &DataKey::AuditLedger)?;
        let ledger = AuditLedgerContractClient::new(env, &id);
        match ledger.try_append(
            &env.current_contract_address(),
            actor,
            subject,
            &String::from_str(env, access_type),
            &justification,
            &is_emergency,
        ) {
            Ok(Ok(_)) => Ok(()),
            _ => Err(RecordsError::AuditUnavailable),
        }
    }
}
