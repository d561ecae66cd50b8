//! Redis-backed response cache adapter.
//!
//! Entries are stored with `SET key value PX ttl`, where the TTL carries up
//! to ±10 % jitter so entries written together do not expire together.
//! Prefix invalidation walks the keyspace with `SCAN MATCH` and deletes each
//! batch.

mod redis_response_cache;

pub use redis_response_cache::RedisResponseCache;
