//! Structural content hashing.
//!
//! Every primitive hashes its own data; containers combine the *sorted*
//! hashes of their children so the result does not depend on storage order.
//! The hash is the only mechanism the world uses to detect "no change since
//! the last generation".

use xxhash_rust::xxh3::Xxh3;

pub trait ContentHash {
    fn content_hash(&self) -> u64;

    fn hash_hex(&self) -> String {
        format!("{:016x}", self.content_hash())
    }
}

/// Thin streaming wrapper over xxh3 with typed writes.
pub struct Hasher64(Xxh3);

impl Hasher64 {
    pub fn new() -> Self {
        Hasher64(Xxh3::new())
    }

    pub fn write_tag(&mut self, tag: &[u8]) {
        self.0.update(tag);
    }

    pub fn write_u64(&mut self, v: u64) {
        self.0.update(&v.to_le_bytes());
    }

    pub fn write_f64(&mut self, v: f64) {
        self.0.update(&v.to_bits().to_le_bytes());
    }

    pub fn finish(&self) -> u64 {
        self.0.digest()
    }
}

impl Default for Hasher64 {
    fn default() -> Self {
        Self::new()
    }
}

/// Combine child hashes order-independently under a type tag.
pub fn combine_sorted(tag: &[u8], hashes: impl IntoIterator<Item = u64>) -> u64 {
    let mut sorted: Vec<u64> = hashes.into_iter().collect();
    sorted.sort_unstable();
    let mut h = Hasher64::new();
    h.write_tag(tag);
    h.write_u64(sorted.len() as u64);
    for v in sorted {
        h.write_u64(v);
    }
    h.finish()
}
