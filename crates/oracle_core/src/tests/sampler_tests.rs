use super::*;
use crate::test_support::ScriptedRandomness;

#[test]
fn skips_indices_already_used_in_the_cycle() {
    let mut randomness = ScriptedRandomness::new().with_indices([2, 2, 2, 0, 0, 1]);
    let mut sampler = NoRepeatSampler::new(3);

    assert_eq!(sampler.draw(&mut randomness), Some(2));
    assert_eq!(sampler.draw(&mut randomness), Some(0));
    assert_eq!(sampler.draw(&mut randomness), Some(1));
    assert!(sampler.is_exhausted());
}

#[test]
fn allows_repeats_once_pool_is_exhausted() {
    let mut randomness = ScriptedRandomness::new().with_indices([1, 0, 1, 1]);
    let mut sampler = NoRepeatSampler::new(2);

    assert_eq!(sampler.draw(&mut randomness), Some(1));
    assert_eq!(sampler.draw(&mut randomness), Some(0));
    assert_eq!(sampler.draw(&mut randomness), Some(1));
    assert_eq!(sampler.draw(&mut randomness), Some(1));
    assert!(sampler.is_exhausted());
}

#[test]
fn empty_pool_yields_nothing() {
    let mut randomness = ScriptedRandomness::new();
    let mut sampler = NoRepeatSampler::new(0);
    assert_eq!(sampler.draw(&mut randomness), None);
}

#[test]
fn seeded_draws_cover_the_pool_before_repeating() {
    for seed in 0..64 {
        let mut randomness = RngRandomness::seeded(seed);
        let mut sampler = NoRepeatSampler::new(5);
        let mut seen = HashSet::new();
        for _ in 0..5 {
            let idx = sampler.draw(&mut randomness).expect("non-empty pool");
            assert!(idx < 5);
            assert!(seen.insert(idx), "seed {seed} repeated index {idx}");
        }
    }
}
