use super::Alert;

/// Plain-text summary placed on the clipboard by "copy summary".
pub fn alert_summary(alert: &Alert) -> String {
    let mut lines = vec![
        format!("Alert {}: {}", alert.id, alert.title),
        format!("Severity: {}", alert.severity),
        format!("Type: {}", alert.kind),
        format!("ETA: {}", alert.eta),
        format!("Owner: {}", alert.owner),
        format!("Status: {}", alert.status),
        String::new(),
        "Why flagged:".to_string(),
    ];
    lines.extend(alert.rationale.iter().map(|r| format!("- {r}")));
    lines.push(String::new());
    lines.push("Suggested next step:".to_string());
    lines.extend(alert.suggested.iter().map(|s| format!("- {s}")));
    lines.join("\n")
}
