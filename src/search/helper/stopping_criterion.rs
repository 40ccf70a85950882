use std::time::Instant;

/// decides when a search must stop (checked between generations)
pub trait StoppingCriterion {
    /// true if the search should stop
    fn is_finished(&self) -> bool;
}

/// never stops (the search ends when its own budgets are exhausted)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStoppingCriterion;

impl StoppingCriterion for NoStoppingCriterion {
    fn is_finished(&self) -> bool { false }
}

/// stops after a given number of seconds
#[derive(Debug, Clone)]
pub struct TimeStoppingCriterion {
    /// time at which the criterion was created
    start: Instant,
    /// time limit (in seconds)
    limit: f32,
}

impl TimeStoppingCriterion {
    /// creates a criterion that stops t seconds after now
    pub fn new(t:f32) -> Self {
        Self { start: Instant::now(), limit: t }
    }

    /// number of seconds since the criterion was created
    pub fn elapsed(&self) -> f32 { self.start.elapsed().as_secs_f32() }
}

impl StoppingCriterion for TimeStoppingCriterion {
    fn is_finished(&self) -> bool { self.elapsed() >= self.limit }
}
