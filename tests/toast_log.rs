use careops::alerts::metrics::Tone;
use careops::dashboard::Dashboard;
use careops::settings::Settings;
use careops::toast::ToastQueue;
use careops::toast_log::append_toast_log;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn appends_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("toast.log");
    append_toast_log(&path, "first");
    append_toast_log(&path, "second");
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" - first"));
    assert!(lines[1].ends_with(" - second"));
}

#[test]
fn unwritable_path_does_not_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("toast.log");
    append_toast_log(&path, "lost");
    assert!(!path.exists());
}

#[test]
fn queue_logs_every_push() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("toast.log");
    let mut q = ToastQueue::new(1, Duration::from_secs(1)).with_log(Some(path.clone()));
    q.push("Copied", "Alert summary copied to clipboard.", Tone::Info);
    q.push("Sync complete", "Signals refreshed.", Tone::Good);
    assert_eq!(q.len(), 1);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Copied: Alert summary copied to clipboard."));
    assert!(contents.contains("Sync complete: Signals refreshed."));
}

#[test]
fn dashboard_uses_configured_log() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("toast.log");
    let settings = Settings {
        toast_log: Some(path.to_string_lossy().into_owned()),
        ..Settings::default()
    };
    let mut d = Dashboard::new(&settings).unwrap();
    d.mark_handled("A1002").unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Marked as handled: Follow-up flagged"));
}
