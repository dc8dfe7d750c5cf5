use crate::alerts::metrics::SyncSnapshot;
use crate::progress::{ProgressPlan, ProgressRun};
use std::time::Duration;

pub const SYNC_START: u8 = 8;
pub const SYNC_STEPS: [u8; 6] = [22, 38, 54, 71, 86, 100];
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_millis(320);
pub const INITIAL_LAST_SYNC_MINS: u32 = 9;
pub const MAX_LAST_SYNC_MINS: u32 = 99;
const MINUTE: Duration = Duration::from_secs(60);

/// Outcome of advancing the sync clock.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncTick {
    pub progress: Vec<u8>,
    pub completed: bool,
}

/// Simulated background sync plus the "minutes since last sync" clock.
#[derive(Debug)]
pub struct SyncSimulation {
    interval: Duration,
    run: Option<ProgressRun>,
    last_sync_mins: u32,
    minute_clock: Duration,
}

impl Default for SyncSimulation {
    fn default() -> Self {
        Self::new(DEFAULT_SYNC_INTERVAL)
    }
}

impl SyncSimulation {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            run: None,
            last_sync_mins: INITIAL_LAST_SYNC_MINS,
            minute_clock: Duration::ZERO,
        }
    }

    /// Begin a run. Returns `false` if one is already in flight.
    pub fn start(&mut self) -> bool {
        if self.run.is_some() {
            return false;
        }
        let plan = ProgressPlan::new(SYNC_START, &SYNC_STEPS, self.interval);
        self.run = Some(ProgressRun::start(plan));
        tracing::info!("sync simulation started");
        true
    }

    pub fn is_syncing(&self) -> bool {
        self.run.is_some()
    }

    pub fn progress(&self) -> u8 {
        self.run.as_ref().map(|r| r.value()).unwrap_or(0)
    }

    pub fn last_sync_mins(&self) -> u32 {
        self.last_sync_mins
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            syncing: self.is_syncing(),
            progress: self.progress(),
            last_sync_mins: self.last_sync_mins,
        }
    }

    pub fn tick(&mut self, elapsed: Duration) -> SyncTick {
        // The minute clock runs on its own schedule, independent of sync runs.
        self.minute_clock = self.minute_clock.saturating_add(elapsed);
        let whole = self.minute_clock.as_secs() / MINUTE.as_secs();
        if whole > 0 {
            self.minute_clock = Duration::new(
                self.minute_clock.as_secs() % MINUTE.as_secs(),
                self.minute_clock.subsec_nanos(),
            );
            let mins = u32::try_from(whole).unwrap_or(u32::MAX);
            self.last_sync_mins = self
                .last_sync_mins
                .saturating_add(mins)
                .min(MAX_LAST_SYNC_MINS);
        }

        let mut out = SyncTick::default();
        if let Some(run) = self.run.as_mut() {
            out.progress = run.advance(elapsed);
            if run.is_complete() {
                self.run = None;
                self.last_sync_mins = 1;
                out.completed = true;
                tracing::info!("sync simulation complete");
            }
        }
        out
    }
}
