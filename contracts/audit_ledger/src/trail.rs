use common::ttl;
use soroban_sdk::{contracttype, xdr::ToXdr, Address, BytesN, Env, String, Vec};

/// One authorized access event. Written once, never altered.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditRecord {
    /// Position in the ledger, starting at 0.
    pub index: u64,
    pub actor: Address,
    pub subject: Address,
    pub access_type: String,
    pub justification: String,
    pub timestamp: u64,
    pub is_emergency: bool,
    /// Hash of the previous record (zero for the first record).
    pub prev_hash: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum DataKey {
    Admin,
    Writer,
    Count,
    Head,
    Record(u64),
    BySubject(Address),
    ByActor(Address),
    ByType(String),
    Emergency,
}

/// Compute the keccak256 hash of a record, covering every field including
/// its link to the predecessor.
pub fn hash_record(env: &Env, record: &AuditRecord) -> BytesN<32> {
    env.crypto().keccak256(&record.clone().to_xdr(env)).into()
}

fn zero_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

/// Append-only storage of audit records with secondary indexes.
pub struct AuditTrail;

impl AuditTrail {
    pub fn count(env: &Env) -> u64 {
        env.storage().instance().get(&DataKey::Count).unwrap_or(0)
    }

    pub fn head(env: &Env) -> BytesN<32> {
        env.storage()
            .instance()
            .get(&DataKey::Head)
            .unwrap_or_else(|| zero_hash(env))
    }

    /// Store a new record at the end of the chain and index it.
    pub fn append(
        env: &Env,
        actor: Address,
        subject: Address,
        access_type: String,
        justification: String,
        is_emergency: bool,
    ) -> AuditRecord {
        let index = Self::count(env);
        let record = AuditRecord {
            index,
            actor: actor.clone(),
            subject: subject.clone(),
            access_type: access_type.clone(),
            justification,
            timestamp: env.ledger().timestamp(),
            is_emergency,
            prev_hash: Self::head(env),
        };

        let key = DataKey::Record(index);
        env.storage().persistent().set(&key, &record);
        ttl::extend_persistent(env, &key);

        Self::push_index(env, DataKey::BySubject(subject), index);
        Self::push_index(env, DataKey::ByActor(actor), index);
        Self::push_index(env, DataKey::ByType(access_type), index);
        if is_emergency {
            Self::push_index(env, DataKey::Emergency, index);
        }

        env.storage()
            .instance()
            .set(&DataKey::Head, &hash_record(env, &record));
        env.storage().instance().set(&DataKey::Count, &(index + 1));
        ttl::extend_instance(env);

        record
    }

    pub fn get(env: &Env, index: u64) -> Option<AuditRecord> {
        env.storage().persistent().get(&DataKey::Record(index))
    }

    /// Load every record listed under an index key, in append order.
    pub(crate) fn query(env: &Env, key: &DataKey) -> Vec<AuditRecord> {
        let indices: Vec<u64> = env
            .storage()
            .persistent()
            .get(key)
            .unwrap_or_else(|| Vec::new(env));

        let mut records = Vec::new(env);
        for index in indices.iter() {
            if let Some(record) = Self::get(env, index) {
                records.push_back(record);
            }
        }
        records
    }

    /// Walk the whole chain and check every link and the stored head.
    pub fn verify_chain(env: &Env) -> bool {
        let mut expected = zero_hash(env);
        for index in 0..Self::count(env) {
            let record = match Self::get(env, index) {
                Some(record) => record,
                None => return false,
            };
            if record.index != index || record.prev_hash != expected {
                return false;
            }
            expected = hash_record(env, &record);
        }
        expected == Self::head(env)
    }

    fn push_index(env: &Env, key: DataKey, index: u64) {
        let mut indices: Vec<u64> = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| Vec::new(env));
        indices.push_back(index);
        env.storage().persistent().set(&key, &indices);
        ttl::extend_persistent(env, &key);
    }
}
