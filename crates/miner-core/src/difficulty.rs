//! Difficulty to target conversion and target checks.

use primitive_types::{U256, U512};

use crate::error::{MinerError, MinerResult};
use crate::hash::{Hash, PowHasher};

/// Convert a difficulty into the largest digest value that counts as solved.
///
/// Target = floor(2^256 / difficulty), computed exactly in 512-bit
/// arithmetic. Difficulty 1 would give 2^256, which does not fit the digest
/// space, so it is clamped to `U256::MAX` (every digest solves).
pub fn difficulty_to_target(difficulty: u64) -> MinerResult<U256> {
    if difficulty == 0 {
        return Err(MinerError::InvalidDifficulty(difficulty));
    }

    let space = U512::one() << 256;
    let target = space / U512::from(difficulty);

    Ok(U256::try_from(target).unwrap_or(U256::MAX))
}

/// Interpret a digest as a big-endian unsigned 256-bit integer.
#[inline]
pub fn hash_value(hash: &Hash) -> U256 {
    U256::from_big_endian(hash)
}

/// Check if a hash meets the target.
///
/// Returns true if value <= target; a digest equal to the target solves.
#[inline]
pub fn hash_meets_target(hash: &Hash, target: &U256) -> bool {
    hash_value(hash) <= *target
}

/// Target as a 32-byte big-endian array, for display next to digests.
pub fn target_to_bytes(target: &U256) -> Hash {
    let mut bytes = [0u8; 32];
    target.to_big_endian(&mut bytes);
    bytes
}

/// Recompute the hash for a claimed solution and check it against the target.
pub fn verify<H: PowHasher + ?Sized>(
    hasher: &H,
    header: &[u8],
    nonce: u64,
    difficulty: u64,
) -> MinerResult<bool> {
    let target = difficulty_to_target(difficulty)?;
    Ok(hash_meets_target(&hasher.hash(header, nonce), &target))
}

/// Average number of attempts needed to find a solution.
pub fn expected_hashes(difficulty: u64) -> f64 {
    difficulty as f64
}

/// Format difficulty for display (e.g., "1.00M" for a million).
pub fn format_difficulty(difficulty: u64) -> String {
    let difficulty = difficulty as f64;
    if difficulty >= 1e15 {
        format!("{:.2}P", difficulty / 1e15)
    } else if difficulty >= 1e12 {
        format!("{:.2}T", difficulty / 1e12)
    } else if difficulty >= 1e9 {
        format!("{:.2}G", difficulty / 1e9)
    } else if difficulty >= 1e6 {
        format!("{:.2}M", difficulty / 1e6)
    } else if difficulty >= 1e3 {
        format!("{:.2}K", difficulty / 1e3)
    } else {
        format!("{:.0}", difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::AequiHashLight;

    #[test]
    fn test_zero_difficulty_rejected() {
        assert!(matches!(
            difficulty_to_target(0),
            Err(MinerError::InvalidDifficulty(0))
        ));
    }

    #[test]
    fn test_difficulty_one_is_max() {
        assert_eq!(difficulty_to_target(1).unwrap(), U256::MAX);
    }

    #[test]
    fn test_power_of_two_is_exact() {
        // 2^256 / 2 = 2^255, not (2^256 - 1) / 2
        assert_eq!(difficulty_to_target(2).unwrap(), U256::one() << 255);
        assert_eq!(difficulty_to_target(1 << 32).unwrap(), U256::one() << 224);
    }

    #[test]
    fn test_target_monotonic() {
        let difficulties = [1u64, 2, 3, 10, 1_000, 1_000_000, u64::MAX / 2, u64::MAX];
        for pair in difficulties.windows(2) {
            let low = difficulty_to_target(pair[0]).unwrap();
            let high = difficulty_to_target(pair[1]).unwrap();
            assert!(high < low, "target({}) should be below target({})", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_million_target() {
        let target = difficulty_to_target(1_000_000).unwrap();
        let expected = (U512::one() << 256) / U512::from(1_000_000u64);
        assert_eq!(U512::from(target), expected);
    }

    #[test]
    fn test_hash_meets_target_inclusive() {
        let target = U256::from(0x1234u64);
        let equal = target_to_bytes(&target);
        assert!(hash_meets_target(&equal, &target));

        let mut above = equal;
        above[31] += 1;
        assert!(!hash_meets_target(&above, &target));

        let mut below = equal;
        below[31] -= 1;
        assert!(hash_meets_target(&below, &target));
    }

    #[test]
    fn test_hash_value_big_endian() {
        let mut hash = [0u8; 32];
        hash[31] = 1;
        assert_eq!(hash_value(&hash), U256::one());
        hash[0] = 0x80;
        assert!(hash_value(&hash) > U256::one() << 255);
    }

    #[test]
    fn test_verify() {
        let hasher = AequiHashLight::default();
        assert!(verify(&hasher, b"header", 42, 1).unwrap());
        assert!(verify(&hasher, b"header", 42, 0).is_err());
    }

    #[test]
    fn test_format_difficulty() {
        assert_eq!(format_difficulty(500), "500");
        assert_eq!(format_difficulty(1_000_000), "1.00M");
        assert_eq!(format_difficulty(2_500_000_000), "2.50G");
    }

    #[test]
    fn test_expected_hashes() {
        assert_eq!(expected_hashes(1_000_000), 1_000_000.0);
    }
}
