//! TTL extension for persistent entries.
//!
//! Records, policies, grants and audit entries must outlive the default
//! persistent TTL, so every write bumps the entry.

use soroban_sdk::{Env, IntoVal, Val};

/// Bump once the remaining TTL falls under ~30 days of ledgers.
pub const TTL_THRESHOLD: u32 = 518_400;
/// Extend to ~180 days of ledgers.
pub const TTL_EXTEND_TO: u32 = 3_110_400;

/// Extends the TTL of a persistent storage key.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of the contract instance (config and counters).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
