//! Dashboard state and the user actions that mutate it.
//!
//! Everything runs on one thread. Timed behaviour (toast expiry, sync and
//! connect progress, the last-sync clock) advances only through
//! [`Dashboard::tick`].

use crate::alerts::demo::{auto_check_alert, seed_alerts};
use crate::alerts::metrics::{
    build_kpis, compute_stats, kpi_action, AlertStats, Kpi, KpiAction, KpiMode, Tone,
};
use crate::alerts::summary::alert_summary;
use crate::alerts::view::{project, SeverityFilter, ViewQuery};
use crate::alerts::{Alert, AlertDraft, AlertStatus, AlertStore, Severity};
use crate::clipboard::ClipboardSink;
use crate::connect::{ConnectWizard, PracticeSystem};
use crate::hotkey::{lookup, HotkeyAction, KeyCombo};
use crate::notes::{Note, NoteBook};
use crate::palette::{CommandPalette, PaletteAction, PaletteCommand};
use crate::settings::Settings;
use crate::sync::SyncSimulation;
use crate::toast::ToastQueue;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;

/// Which overlays are currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    pub palette: bool,
    pub create: bool,
    pub connect: bool,
    pub drawer: bool,
}

/// Drawer and side-panel buttons that only acknowledge with a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    ViewRelated,
    TuneRules,
    VerifyPrivacy,
}

impl DemoAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "related" | "appointments" => Some(DemoAction::ViewRelated),
            "rules" | "tune" => Some(DemoAction::TuneRules),
            "privacy" | "trust" => Some(DemoAction::VerifyPrivacy),
            _ => None,
        }
    }

    fn toast(self) -> (&'static str, &'static str, Tone) {
        match self {
            DemoAction::ViewRelated => (
                "Demo action",
                "Would open related appointments in the real product.",
                Tone::Info,
            ),
            DemoAction::TuneRules => (
                "Demo: rules updated",
                "In a real product, clinics can tune thresholds.",
                Tone::Info,
            ),
            DemoAction::VerifyPrivacy => (
                "Trust mode",
                "This demo simulates read-only access only.",
                Tone::Good,
            ),
        }
    }
}

/// Maximum open alerts for a sync run to inject an auto-check reminder.
const AUTO_CHECK_MAX_OPEN: usize = 2;

pub struct Dashboard {
    store: AlertStore,
    notes: NoteBook,
    toasts: ToastQueue,
    sync: SyncSimulation,
    connect: ConnectWizard,
    palette: CommandPalette,
    pub query: ViewQuery,
    pub kpi_mode: KpiMode,
    pub overlays: Overlays,
    pub draft: AlertDraft,
    /// Unsaved note text in the drawer.
    pub note_draft: String,
    selected: Option<String>,
}

impl Dashboard {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let alerts = if settings.seed_demo_alerts {
            seed_alerts()
        } else {
            Vec::new()
        };
        Self::with_alerts(settings, alerts)
    }

    pub fn with_alerts(settings: &Settings, alerts: Vec<Alert>) -> anyhow::Result<Self> {
        let store = AlertStore::new(alerts)?;
        let mut toasts = ToastQueue::new(settings.toast_limit, settings.toast_timeout())
            .with_log(settings.toast_log.as_ref().map(PathBuf::from));
        toasts.set_enabled(settings.enable_toasts);
        // The demo opens with the most recent same-day booking selected.
        let selected = store
            .get("A1010")
            .or_else(|| store.alerts().first())
            .map(|a| a.id.clone());
        Ok(Self {
            store,
            notes: NoteBook::new(),
            toasts,
            sync: SyncSimulation::new(settings.sync_interval()),
            connect: ConnectWizard::new(settings.connect_interval()),
            palette: CommandPalette::new(),
            query: ViewQuery {
                sort: settings.default_sort,
                ..ViewQuery::default()
            },
            kpi_mode: settings.kpi_mode,
            overlays: Overlays::default(),
            draft: AlertDraft::default(),
            note_draft: String::new(),
            selected,
        })
    }

    pub fn store(&self) -> &AlertStore {
        &self.store
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn sync(&self) -> &SyncSimulation {
        &self.sync
    }

    pub fn connect(&self) -> &ConnectWizard {
        &self.connect
    }

    /// Alerts after search, filters and sort.
    pub fn visible_alerts(&self) -> Vec<&Alert> {
        project(self.store.alerts(), &self.query)
    }

    /// Type filter choices: "All" followed by every known type.
    pub fn type_choices(&self) -> Vec<String> {
        let mut out = vec!["All".to_string()];
        out.extend(self.store.types());
        out
    }

    pub fn stats(&self) -> AlertStats {
        compute_stats(self.store.alerts())
    }

    pub fn kpis(&self) -> Vec<Kpi> {
        build_kpis(self.kpi_mode, &self.stats(), self.sync.snapshot())
    }

    /// The alert shown in the drawer. Falls back to the first alert when the
    /// selection no longer resolves.
    pub fn selected(&self) -> Option<&Alert> {
        self.selected
            .as_deref()
            .and_then(|id| self.store.get(id))
            .or_else(|| self.store.alerts().first())
    }

    pub fn select(&mut self, id: &str) -> anyhow::Result<()> {
        if !self.store.contains(id) {
            anyhow::bail!("alert {id} not found");
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn open_alert(&mut self, id: &str) -> anyhow::Result<()> {
        self.select(id)?;
        self.overlays.drawer = true;
        Ok(())
    }

    pub fn selected_notes(&self) -> &[Note] {
        match self.selected() {
            Some(alert) => self.notes.notes(&alert.id),
            None => &[],
        }
    }

    /// Toggle an alert between open and handled.
    pub fn mark_handled(&mut self, id: &str) -> anyhow::Result<AlertStatus> {
        let status = self.store.toggle_status(id)?;
        let title = self
            .store
            .get(id)
            .map(|a| a.title.clone())
            .unwrap_or_default();
        match status {
            AlertStatus::Handled => self.toasts.push("Marked as handled", title, Tone::Good),
            AlertStatus::Open => self.toasts.push("Reopened alert", title, Tone::Warn),
        }
        Ok(status)
    }

    /// Create an alert from `draft`. A missing title is reported through a
    /// toast and leaves the store unchanged.
    pub fn create_alert(&mut self, draft: &AlertDraft) -> anyhow::Result<String> {
        let id = match self.store.create(draft) {
            Ok(alert) => alert.id.clone(),
            Err(e) => {
                self.toasts
                    .push("Add a title first", "Alert title is required.", Tone::Warn);
                return Err(e);
            }
        };
        tracing::info!(id = %id, "alert created");
        self.selected = Some(id.clone());
        self.overlays.drawer = true;
        self.overlays.create = false;
        self.draft.title.clear();
        self.draft.subtitle.clear();
        self.toasts.push("New alert created", id.clone(), Tone::Good);
        Ok(id)
    }

    /// Submit the form draft held by the dashboard.
    pub fn submit_draft(&mut self) -> anyhow::Result<String> {
        let draft = self.draft.clone();
        self.create_alert(&draft)
    }

    /// Attach a note to the selected alert. Blank text is ignored.
    pub fn add_note(&mut self, text: &str) -> Option<String> {
        let alert_id = self.selected()?.id.clone();
        if text.trim().is_empty() {
            return None;
        }
        let note_id = match self.notes.add(&alert_id, text) {
            Ok(note) => note.id.clone(),
            Err(e) => {
                tracing::debug!("note rejected: {e}");
                return None;
            }
        };
        self.toasts.push("Note saved", "Attached to this alert.", Tone::Info);
        Some(note_id)
    }

    /// Save the drawer's note draft. The draft is cleared once the note is stored.
    pub fn save_note_draft(&mut self) -> Option<String> {
        let text = self.note_draft.clone();
        let id = self.add_note(&text)?;
        self.note_draft.clear();
        Some(id)
    }

    pub fn clear_note_draft(&mut self) {
        self.note_draft.clear();
        self.toasts.push("Draft cleared", "", Tone::Neutral);
    }

    pub fn remove_note(&mut self, note_id: &str) -> bool {
        let Some(alert_id) = self.selected().map(|a| a.id.clone()) else {
            return false;
        };
        let removed = self.notes.remove(&alert_id, note_id);
        if removed {
            self.toasts.push("Note removed", "", Tone::Warn);
        }
        removed
    }

    pub fn dismiss_toast(&mut self, id: &str) -> bool {
        self.toasts.dismiss(id)
    }

    pub fn run_demo_action(&mut self, action: DemoAction) {
        let (title, message, tone) = action.toast();
        self.toasts.push(title, message, tone);
    }

    /// Copy the selected alert's summary. Failures surface as a toast only.
    pub fn copy_alert_summary(&mut self, clipboard: &mut dyn ClipboardSink) -> bool {
        let Some(text) = self.selected().map(alert_summary) else {
            return false;
        };
        match clipboard.set_text(&text) {
            Ok(()) => {
                self.toasts
                    .push("Copied", "Alert summary copied to clipboard.", Tone::Info);
                true
            }
            Err(e) => {
                tracing::warn!("clipboard write failed: {e:#}");
                self.toasts.push(
                    "Copy failed",
                    "Clipboard access was blocked.",
                    Tone::Warn,
                );
                false
            }
        }
    }

    /// Start a sync run unless one is already going.
    pub fn run_sync(&mut self) -> bool {
        self.sync.start()
    }

    pub fn activate_kpi(&mut self, title: &str) {
        match kpi_action(title) {
            Some(KpiAction::ShowAllOpen) => {
                self.query.clear_filters();
                self.toasts.push(
                    "Showing all open items",
                    "Use filters to narrow down.",
                    Tone::Info,
                );
            }
            Some(KpiAction::FilterHigh) => {
                self.query.severity = SeverityFilter::Only(Severity::High);
                self.toasts
                    .push("Filter applied", "Showing High priority alerts.", Tone::Warn);
            }
            Some(KpiAction::RunSync) => {
                self.run_sync();
            }
            None => {}
        }
    }

    pub fn cycle_kpi_mode(&mut self) {
        self.kpi_mode = self.kpi_mode.next();
    }

    pub fn open_connect(&mut self) {
        self.overlays.connect = true;
    }

    pub fn choose_system(&mut self, system: &'static PracticeSystem) {
        self.overlays.connect = true;
        self.connect.choose(system);
    }

    pub fn close_connect(&mut self) {
        self.overlays.connect = false;
        self.connect.reset();
    }

    pub fn palette_results(&self, query: &str) -> Vec<crate::actions::Action> {
        self.palette.search(query, self.store.alerts())
    }

    pub fn run_palette_command(&mut self, cmd: PaletteCommand) {
        match cmd {
            PaletteCommand::OpenConnect => self.open_connect(),
            PaletteCommand::CreateAlert => self.overlays.create = true,
            PaletteCommand::RunSync => {
                self.run_sync();
            }
            PaletteCommand::CycleKpiMode => self.cycle_kpi_mode(),
        }
        self.overlays.palette = false;
    }

    /// Run the action string of a palette entry.
    pub fn run_action(&mut self, action: &str) -> anyhow::Result<()> {
        match crate::palette::parse_action(action)? {
            PaletteAction::Command(cmd) => self.run_palette_command(cmd),
            PaletteAction::CreateAlert(draft) => {
                self.overlays.palette = false;
                self.create_alert(&draft)?;
            }
            PaletteAction::OpenAlert(id) => {
                self.overlays.palette = false;
                self.open_alert(&id)?;
            }
        }
        Ok(())
    }

    /// Returns `true` when the combo was bound to an action.
    pub fn handle_hotkey(&mut self, combo: &KeyCombo) -> bool {
        match lookup(combo) {
            Some(HotkeyAction::TogglePalette) => self.overlays.palette = !self.overlays.palette,
            Some(HotkeyAction::OpenCreate) => self.overlays.create = true,
            Some(HotkeyAction::CloseAll) => {
                self.overlays.palette = false;
                self.overlays.create = false;
                self.overlays.drawer = false;
                self.close_connect();
            }
            None => return false,
        }
        true
    }

    /// Advance every timer by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        self.toasts.tick(elapsed);
        self.connect.tick(elapsed);
        let sync = self.sync.tick(elapsed);
        if sync.completed {
            self.finish_sync();
        }
    }

    fn finish_sync(&mut self) {
        if self.store.open_count() <= AUTO_CHECK_MAX_OPEN {
            let inserted = self
                .store
                .next_id()
                .and_then(|id| self.store.insert(auto_check_alert(id, Utc::now())).map(|a| a.id.clone()));
            match inserted {
                Ok(id) => tracing::info!(id = %id, "sync injected auto-check alert"),
                Err(e) => tracing::warn!("sync could not add auto-check alert: {e}"),
            }
        }
        self.toasts.push("Sync complete", "Signals refreshed.", Tone::Good);
    }
}
