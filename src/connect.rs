//! "Connect your practice system" wizard.
//!
//! The handshake is simulated: choosing a system only plays a progress
//! timeline and nothing leaves the process.

use crate::progress::{ProgressPlan, ProgressRun};
use serde::Serialize;
use std::time::Duration;

pub const IDLE_PROGRESS: u8 = 10;
pub const CONNECT_START: u8 = 12;
pub const CONNECT_STEPS: [u8; 6] = [28, 46, 62, 78, 92, 100];
pub const DEFAULT_CONNECT_INTERVAL: Duration = Duration::from_millis(420);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntegrationKind {
    Native,
    Export,
    Universal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PracticeSystem {
    pub name: &'static str,
    pub desc: &'static str,
    pub kind: IntegrationKind,
}

pub static PRACTICE_SYSTEMS: [PracticeSystem; 6] = [
    PracticeSystem {
        name: "Cliniko",
        desc: "Allied health (fastest one-click)",
        kind: IntegrationKind::Native,
    },
    PracticeSystem {
        name: "Halaxy",
        desc: "Allied health / mixed practices",
        kind: IntegrationKind::Native,
    },
    PracticeSystem {
        name: "PowerDiary",
        desc: "Allied health / psych / bookings",
        kind: IntegrationKind::Native,
    },
    PracticeSystem {
        name: "Best Practice",
        desc: "GP clinics (via export until native)",
        kind: IntegrationKind::Export,
    },
    PracticeSystem {
        name: "MedicalDirector",
        desc: "GP clinics (via export until native)",
        kind: IntegrationKind::Export,
    },
    PracticeSystem {
        name: "Other system",
        desc: "Use CSV or scheduled report email",
        kind: IntegrationKind::Universal,
    },
];

pub fn find_system(name: &str) -> Option<&'static PracticeSystem> {
    PRACTICE_SYSTEMS
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStage {
    Choose,
    Connecting,
    Done,
}

/// Caption under the progress bar.
pub fn stage_label(progress: u8) -> &'static str {
    if progress < 45 {
        "Verifying access"
    } else if progress < 80 {
        "Syncing the next 7 days"
    } else if progress < 100 {
        "Finalising"
    } else {
        "Done"
    }
}

#[derive(Debug)]
pub struct ConnectWizard {
    interval: Duration,
    stage: ConnectStage,
    progress: u8,
    system: Option<&'static PracticeSystem>,
    run: Option<ProgressRun>,
}

impl Default for ConnectWizard {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_INTERVAL)
    }
}

impl ConnectWizard {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            stage: ConnectStage::Choose,
            progress: IDLE_PROGRESS,
            system: None,
            run: None,
        }
    }

    pub fn stage(&self) -> ConnectStage {
        self.stage
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn system(&self) -> Option<&'static PracticeSystem> {
        self.system
    }

    pub fn label(&self) -> &'static str {
        stage_label(self.progress)
    }

    /// Pick a system and start the simulated handshake.
    pub fn choose(&mut self, system: &'static PracticeSystem) {
        let plan = ProgressPlan::new(CONNECT_START, &CONNECT_STEPS, self.interval);
        self.run = Some(ProgressRun::start(plan));
        self.stage = ConnectStage::Connecting;
        self.progress = CONNECT_START;
        self.system = Some(system);
        tracing::info!(system = system.name, "connect started");
    }

    /// Returns `true` when this tick finished the handshake.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        run.advance(elapsed);
        self.progress = run.value();
        if run.is_complete() {
            self.run = None;
            self.stage = ConnectStage::Done;
            tracing::info!("connect finished");
            return true;
        }
        false
    }

    /// Closing the wizard resets it and drops any pending steps.
    pub fn reset(&mut self) {
        self.run = None;
        self.stage = ConnectStage::Choose;
        self.progress = IDLE_PROGRESS;
        self.system = None;
    }
}
