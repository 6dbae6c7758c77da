//! Chained-digest proof-of-work hash.
//!
//! This is a placeholder for a memory-hard construction: it chains a fixed
//! number of digest rounds over the input instead of touching a large
//! working set.

use core::marker::PhantomData;

use sha2::digest::{consts::U32, Digest, OutputSizeUser};
use sha2::Sha256;
use sha3::Sha3_256;

/// A 256-bit proof-of-work digest.
pub type Hash = [u8; 32];

/// Number of extra mixing rounds applied after the initial digest.
pub const MIXING_ROUNDS: usize = 10;

/// Build the hash input: `header || nonce` with the nonce little-endian.
#[inline]
pub fn seed(header: &[u8], nonce: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(header.len() + 8);
    data.extend_from_slice(header);
    data.extend_from_slice(&nonce.to_le_bytes());
    data
}

/// Hash `header || nonce` and then fold the result back in `rounds` times.
///
/// Each round computes `D(current || seed)`. With `rounds = 0` this is a
/// single digest of the seed.
pub fn chained_hash<D>(header: &[u8], nonce: u64, rounds: usize) -> Hash
where
    D: Digest + OutputSizeUser<OutputSize = U32>,
{
    let data = seed(header, nonce);
    let mut current: Hash = D::digest(&data).into();

    for _ in 0..rounds {
        let mut hasher = D::new();
        hasher.update(current);
        hasher.update(&data);
        current = hasher.finalize().into();
    }

    current
}

/// A proof-of-work hash function usable by the mining loop.
///
/// Implementations must be pure: the same `(header, nonce)` always produces
/// the same digest.
pub trait PowHasher: Send + Sync {
    /// Human-readable algorithm name.
    fn name(&self) -> &'static str;

    fn hash(&self, header: &[u8], nonce: u64) -> Hash;
}

/// [`chained_hash`] bound to a digest family and a round count.
pub struct ChainedHasher<D> {
    rounds: usize,
    name: &'static str,
    _digest: PhantomData<fn() -> D>,
}

impl<D> ChainedHasher<D> {
    pub const fn with_rounds(name: &'static str, rounds: usize) -> Self {
        ChainedHasher {
            rounds,
            name,
            _digest: PhantomData,
        }
    }
}

impl<D> Clone for ChainedHasher<D> {
    fn clone(&self) -> Self {
        Self::with_rounds(self.name, self.rounds)
    }
}

impl<D> core::fmt::Debug for ChainedHasher<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainedHasher")
            .field("name", &self.name)
            .field("rounds", &self.rounds)
            .finish()
    }
}

impl<D> PowHasher for ChainedHasher<D>
where
    D: Digest + OutputSizeUser<OutputSize = U32>,
{
    fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn hash(&self, header: &[u8], nonce: u64) -> Hash {
        chained_hash::<D>(header, nonce, self.rounds)
    }
}

/// The light (CPU) AequiHash: chained SHA3-256.
pub type AequiHashLight = ChainedHasher<Sha3_256>;

/// Chained SHA-256, an alternate digest family.
pub type ChainedSha256 = ChainedHasher<Sha256>;

impl AequiHashLight {
    pub const NAME: &'static str = "AequiHash";

    pub const fn new(rounds: usize) -> Self {
        Self::with_rounds(Self::NAME, rounds)
    }
}

impl Default for AequiHashLight {
    fn default() -> Self {
        Self::new(MIXING_ROUNDS)
    }
}

impl ChainedSha256 {
    pub const NAME: &'static str = "ChainedSha256";

    pub const fn new(rounds: usize) -> Self {
        Self::with_rounds(Self::NAME, rounds)
    }
}

impl Default for ChainedSha256 {
    fn default() -> Self {
        Self::new(MIXING_ROUNDS)
    }
}

/// Blanket impl so a boxed or shared hasher can drive the loop.
impl<H: PowHasher + ?Sized> PowHasher for Box<H> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn hash(&self, header: &[u8], nonce: u64) -> Hash {
        (**self).hash(header, nonce)
    }
}

impl<H: PowHasher + ?Sized> PowHasher for &H {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn hash(&self, header: &[u8], nonce: u64) -> Hash {
        (**self).hash(header, nonce)
    }
}

/// Lowercase hex of a digest, most significant byte first.
pub fn to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}
