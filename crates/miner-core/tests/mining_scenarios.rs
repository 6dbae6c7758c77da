use miner_core::{
    difficulty_to_target, hash_value, verify, AequiHashLight, BlockHeader, CancelToken,
    ChainedSha256, MinerError, MiningLoop, MiningOutcome, NonceRange, NoopObserver,
    ParallelMiner, PowHasher, Progress, U256,
};

const HEADER_41: &[u8; 41] = b"Aequitas_Genesis_Block_Header_Simulation!";

#[test]
fn test_difficulty_one_first_attempt() {
    let header = BlockHeader::new(HEADER_41.to_vec()).unwrap();
    let miner = MiningLoop::new(AequiHashLight::default(), header, 1).unwrap();

    let start = 31_337;
    let outcome = miner.run(start, &CancelToken::new(), &mut NoopObserver).unwrap();

    let solution = outcome.solution().unwrap();
    assert_eq!(solution.nonce, start);
    assert_eq!(solution.hash_hex().len(), 64);
    assert!(!solution.value.is_zero());
    assert!(solution.value <= U256::MAX);
    assert!(verify(&AequiHashLight::default(), HEADER_41, start, 1).unwrap());
}

#[test]
fn test_invalid_difficulty_before_hashing() {
    assert!(matches!(difficulty_to_target(0), Err(MinerError::InvalidDifficulty(0))));
    let result = MiningLoop::new(AequiHashLight::default(), BlockHeader::default(), 0);
    assert!(matches!(result, Err(MinerError::InvalidDifficulty(0))));
}

#[test]
fn test_solution_verifies_at_moderate_difficulty() {
    let miner = MiningLoop::new(AequiHashLight::default(), BlockHeader::default(), 64).unwrap();
    let outcome = miner.run(0, &CancelToken::new(), &mut NoopObserver).unwrap();

    let solution = outcome.solution().unwrap().clone();
    assert!(solution.value <= miner.target());
    assert_eq!(solution.value, hash_value(&solution.hash));
    assert!(verify(miner.hasher(), miner.header().as_bytes(), solution.nonce, 64).unwrap());

    // Every nonce before the winner misses the target.
    for nonce in 0..solution.nonce {
        assert!(miner.try_nonce(nonce).is_none());
    }
}

#[test]
fn test_single_worker_matches_loop() {
    let make = || MiningLoop::new(ChainedSha256::default(), BlockHeader::default(), 16).unwrap();

    let sequential = make().run(500, &CancelToken::new(), &mut NoopObserver).unwrap();
    let parallel = ParallelMiner::new(make(), 1)
        .run(NonceRange::from_start(500), &CancelToken::new(), &mut NoopObserver)
        .unwrap();

    assert_eq!(sequential.solution(), parallel.solution());
    assert_eq!(sequential.progress().hash_count, parallel.progress().hash_count);
}

#[test]
fn test_cancellation_emits_no_solution() {
    let miner =
        MiningLoop::new(AequiHashLight::default(), BlockHeader::default(), u64::MAX).unwrap();
    let cancel = CancelToken::new();
    let remote = cancel.clone();

    let mut events: Vec<Progress> = Vec::new();
    let outcome = miner
        .run(0, &cancel, &mut |p: &Progress| {
            events.push(*p);
            if p.hash_count == 50 {
                remote.cancel();
            }
        })
        .unwrap();

    match outcome {
        MiningOutcome::Cancelled { progress } => assert_eq!(progress.hash_count, 50),
        MiningOutcome::Solved { .. } => panic!("cancelled run reported a solution"),
    }
    assert_eq!(events.len(), 1);
}

#[test]
fn test_boxed_hasher_drives_loop() {
    let hasher: Box<dyn PowHasher> = Box::new(AequiHashLight::default());
    assert_eq!(hasher.name(), "AequiHash");
    let miner = MiningLoop::new(hasher, BlockHeader::default(), 1).unwrap();
    let outcome = miner.run(0, &CancelToken::new(), &mut NoopObserver).unwrap();
    assert_eq!(outcome.solution().unwrap().nonce, 0);
}
