use fastrand::Rng;

/**
Draws integers uniformly in the closed range [min, max].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRand {
    /// smallest value that can be drawn
    min: usize,
    /// largest value that can be drawn
    max: usize,
}

impl RangeRand {
    /// creates a sampler over [min, max] (panics if the range is empty)
    pub fn new(min:usize, max:usize) -> Self {
        assert!(min <= max, "RangeRand: empty range [{}, {}]", min, max);
        Self { min, max }
    }

    /// draws a value in [min, max]
    pub fn sample(&self, rng:&Rng) -> usize {
        rng.usize(self.min..=self.max)
    }
}


/**
Reservoir sampler used to break ties between candidates of equal score.

Usage: call `reset()` when a strictly better candidate is found, and
`is_selected(rng)` when a candidate ties with the current best. The t-th
tying candidate (the first one being the one that triggered the reset)
replaces the current choice with probability 1/t, so every tying candidate
ends up selected with probability 1/(number of ties).
*/
#[derive(Debug, Clone)]
pub struct RandSelect {
    /// number of candidates seen with the current best score
    count: usize,
}

impl Default for RandSelect {
    fn default() -> Self { Self { count: 1 } }
}

impl RandSelect {
    /// a new best candidate has been found
    pub fn reset(&mut self) { self.count = 1; }

    /// a candidate ties with the current best. returns true if it should replace it
    pub fn is_selected(&mut self, rng:&Rng) -> bool {
        self.count += 1;
        rng.usize(0..self.count) == 0
    }
}
