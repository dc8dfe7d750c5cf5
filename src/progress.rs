//! Fire-and-forget progress timelines used by the sync and connect simulations.
//!
//! A run does not own a thread or timer. The event loop feeds elapsed time
//! through [`ProgressRun::advance`] and reacts to the values that became due.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressPlan {
    pub start: u8,
    pub steps: Vec<u8>,
    pub interval: Duration,
}

impl ProgressPlan {
    pub fn new(start: u8, steps: &[u8], interval: Duration) -> Self {
        Self {
            start,
            steps: steps.to_vec(),
            interval,
        }
    }

    /// Offset from the start of the run at which step `index` fires.
    pub fn due_at(&self, index: usize) -> Duration {
        self.interval * (index as u32 + 1)
    }
}

#[derive(Debug, Clone)]
pub struct ProgressRun {
    plan: ProgressPlan,
    elapsed: Duration,
    fired: usize,
    value: u8,
}

impl ProgressRun {
    pub fn start(plan: ProgressPlan) -> Self {
        let value = plan.start;
        Self {
            plan,
            elapsed: Duration::ZERO,
            fired: 0,
            value,
        }
    }

    /// Move the clock forward and return the step values that fired, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<u8> {
        self.elapsed = self.elapsed.saturating_add(elapsed);
        let mut fired = Vec::new();
        while self.fired < self.plan.steps.len() && self.plan.due_at(self.fired) <= self.elapsed {
            let value = self.plan.steps[self.fired];
            self.value = value;
            self.fired += 1;
            fired.push(value);
        }
        fired
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_complete(&self) -> bool {
        self.fired == self.plan.steps.len()
    }
}
