use careops::alerts::demo::seed_alerts;
use careops::alerts::metrics::{KpiMode, Tone};
use careops::alerts::view::{SeverityFilter, SortKey, TypeFilter};
use careops::alerts::{AlertDraft, AlertStatus, Severity};
use careops::clipboard::MemoryClipboard;
use careops::connect::{find_system, ConnectStage};
use careops::dashboard::Dashboard;
use careops::settings::Settings;
use std::time::Duration;

fn dashboard() -> Dashboard {
    Dashboard::new(&Settings::default()).unwrap()
}

fn visible_ids(d: &Dashboard) -> Vec<String> {
    d.visible_alerts().iter().map(|a| a.id.clone()).collect()
}

#[test]
fn priority_order_follows_status_then_severity() {
    let mut d = dashboard();
    assert_eq!(visible_ids(&d), ["A1005", "A1002", "A1010"]);
    d.mark_handled("A1005").unwrap();
    assert_eq!(visible_ids(&d), ["A1002", "A1010", "A1005"]);
    d.mark_handled("A1005").unwrap();
    assert_eq!(d.store().get("A1005").unwrap().status, AlertStatus::Open);
}

#[test]
fn filters_narrow_the_list() {
    let mut d = dashboard();
    d.query.severity = SeverityFilter::Only(Severity::High);
    assert_eq!(visible_ids(&d), ["A1005"]);
    d.query.severity = SeverityFilter::All;
    d.query.kind = TypeFilter::Only("Confirmation".into());
    assert_eq!(visible_ids(&d), ["A1010"]);
    d.query.kind = TypeFilter::All;
    d.query.search = "practice MANAGER".into();
    assert_eq!(visible_ids(&d), ["A1002"]);
    d.query.search = "nothing like this".into();
    assert!(visible_ids(&d).is_empty());
}

#[test]
fn eta_and_newest_sorts() {
    let mut d = dashboard();
    d.query.sort = SortKey::Eta;
    assert_eq!(visible_ids(&d), ["A1010", "A1005", "A1002"]);
    d.query.sort = SortKey::Newest;
    assert_eq!(visible_ids(&d), ["A1010", "A1005", "A1002"]);
}

#[test]
fn created_alert_joins_the_list_and_type_choices() {
    let mut d = dashboard();
    let id = d
        .create_alert(&AlertDraft {
            title: "  Recall overdue  ".into(),
            kind: "Recall".into(),
            severity: Severity::High,
            ..AlertDraft::default()
        })
        .unwrap();
    let alert = d.store().get(&id).unwrap();
    assert_eq!(alert.title, "Recall overdue");
    assert_eq!(alert.subtitle, "New alert created in demo mode.");
    assert_eq!(d.store().alerts()[0].id, id);
    assert!(d.type_choices().contains(&"Recall".to_string()));
    assert_eq!(d.type_choices()[0], "All");
    assert_eq!(d.stats().high, 2);
}

#[test]
fn empty_title_leaves_store_unchanged() {
    let mut d = dashboard();
    let before: Vec<_> = d.store().alerts().to_vec();
    let err = d.create_alert(&AlertDraft {
        title: "   ".into(),
        ..AlertDraft::default()
    });
    assert!(err.is_err());
    assert_eq!(d.store().alerts(), before.as_slice());
    let toast = d.toasts().latest().unwrap();
    assert_eq!(toast.message, "Alert title is required.");
    assert_eq!(toast.tone, Tone::Warn);
}

#[test]
fn toasts_expire_one_at_a_time() {
    let mut d = dashboard();
    d.mark_handled("A1002").unwrap();
    d.mark_handled("A1010").unwrap();
    assert_eq!(d.toasts().len(), 2);
    d.tick(Duration::from_millis(3200));
    assert_eq!(d.toasts().len(), 1);
    d.tick(Duration::from_secs(30));
    assert_eq!(d.toasts().len(), 1);
}

#[test]
fn disabled_toasts_stay_silent() {
    let settings = Settings {
        enable_toasts: false,
        ..Settings::default()
    };
    let mut d = Dashboard::new(&settings).unwrap();
    d.mark_handled("A1002").unwrap();
    assert!(d.toasts().is_empty());
}

#[test]
fn sync_progress_shows_on_last_sync_card() {
    let mut d = dashboard();
    d.kpi_mode = KpiMode::Capacity;
    d.activate_kpi("Last sync");
    d.tick(Duration::from_millis(320));
    let card = d.kpis().pop().unwrap();
    assert_eq!(card.title, "Last sync");
    assert_eq!(card.trend, "22%");
    d.tick(Duration::from_secs(2));
    let card = d.kpis().pop().unwrap();
    assert_eq!(card.value, "1 min");
    assert_eq!(card.trend, "Healthy");
}

#[test]
fn connect_wizard_runs_and_resets() {
    let mut d = dashboard();
    d.open_connect();
    assert_eq!(d.connect().stage(), ConnectStage::Choose);
    d.choose_system(find_system("cliniko").unwrap());
    d.tick(Duration::from_millis(420));
    assert_eq!(d.connect().progress(), 28);
    d.tick(Duration::from_secs(3));
    assert_eq!(d.connect().stage(), ConnectStage::Done);
    d.close_connect();
    assert!(!d.overlays.connect);
    assert_eq!(d.connect().stage(), ConnectStage::Choose);
    assert_eq!(d.connect().progress(), 10);
}

#[test]
fn palette_flow_creates_and_opens() {
    let mut d = dashboard();
    d.overlays.palette = true;
    let results = d.palette_results("new 'Chase lab result' sev=high owner=Nurse");
    d.run_action(&results[0].action).unwrap();
    assert!(!d.overlays.palette);
    let created = d.store().alerts()[0].clone();
    assert_eq!(created.owner, "Nurse");
    assert_eq!(created.severity, Severity::High);
    assert_eq!(d.selected().unwrap().id, created.id);

    let results = d.palette_results("alert follow");
    assert_eq!(results.len(), 1);
    d.run_action(&results[0].action).unwrap();
    assert_eq!(d.selected().unwrap().id, "A1002");
    assert!(d.overlays.drawer);

    let results = d.palette_results("");
    let connect = results.iter().find(|a| a.action == "cmd:connect").unwrap();
    d.run_action(&connect.action.clone()).unwrap();
    assert!(d.overlays.connect);
}

#[test]
fn copy_summary_uses_selected_alert() {
    let mut d = dashboard();
    d.open_alert("A1005").unwrap();
    let mut clip = MemoryClipboard::default();
    assert!(d.copy_alert_summary(&mut clip));
    let text = clip.contents.unwrap();
    assert!(text.starts_with("Alert A1005: "));
    assert!(text.contains("Severity: High"));
}

#[test]
fn notes_are_per_alert() {
    let mut d = dashboard();
    d.select("A1005").unwrap();
    d.add_note("Left voicemail").unwrap();
    d.select("A1002").unwrap();
    assert!(d.selected_notes().is_empty());
    d.select("A1005").unwrap();
    assert_eq!(d.selected_notes()[0].text, "Left voicemail");
    assert!(d.select("A9999").is_err());
}

#[test]
fn seeding_can_be_turned_off() {
    let settings = Settings {
        seed_demo_alerts: false,
        ..Settings::default()
    };
    let mut d = Dashboard::new(&settings).unwrap();
    assert!(d.store().is_empty());
    assert!(d.selected().is_none());
    assert!(d.add_note("orphan").is_none());
    let mut clip = MemoryClipboard::default();
    assert!(!d.copy_alert_summary(&mut clip));
    assert_eq!(seed_alerts().len(), 3);
}

#[test]
fn huge_waits_finish_every_timer() {
    let mut d = dashboard();
    d.mark_handled("A1002").unwrap();
    d.run_sync();
    d.choose_system(find_system("Halaxy").unwrap());
    d.tick(Duration::from_millis(u64::MAX));
    d.tick(Duration::MAX);
    assert!(!d.sync().is_syncing());
    assert_eq!(d.sync().last_sync_mins(), 99);
    assert_eq!(d.connect().stage(), ConnectStage::Done);
    assert_eq!(d.store().len(), 4);
    assert!(d.toasts().is_empty());
}
