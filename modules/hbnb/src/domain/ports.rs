/// Output port: one-way credential hashing (no knowledge of the algorithm).
pub trait CredentialHasher: Send + Sync + 'static {
    /// Produce an opaque, self-describing hash of `plaintext`.
    fn hash(&self, plaintext: &str) -> anyhow::Result<String>;

    /// True iff `plaintext` matches `hash`. Malformed hashes verify as false.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}
