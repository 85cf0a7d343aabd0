use std::collections::VecDeque;

use crate::sampler::Randomness;

/// Replays queued draws. Once the index queue runs dry it walks upwards so draws still terminate.
#[derive(Default)]
pub struct ScriptedRandomness {
    coins: VecDeque<bool>,
    indices: VecDeque<usize>,
    spill: usize,
}

impl ScriptedRandomness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coins(mut self, coins: impl IntoIterator<Item = bool>) -> Self {
        self.coins.extend(coins);
        self
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }
}

impl Randomness for ScriptedRandomness {
    fn coin(&mut self) -> bool {
        self.coins.pop_front().unwrap_or(false)
    }

    fn index(&mut self, len: usize) -> usize {
        let idx = self.indices.pop_front().unwrap_or_else(|| {
            let next = self.spill;
            self.spill += 1;
            next
        });
        idx % len
    }
}
