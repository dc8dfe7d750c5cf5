use anyhow::bail;
use chrono::{DateTime, Utc};
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub ts: DateTime<Utc>,
    pub text: String,
}

/// Random hex followed by the current time in hex milliseconds.
pub fn uid() -> String {
    let r: u64 = thread_rng().gen();
    format!("{:x}{:x}", r, Utc::now().timestamp_millis())
}

/// Staff notes attached to alerts. Each alert's notes are kept newest first.
#[derive(Debug, Clone, Default)]
pub struct NoteBook {
    by_alert: HashMap<String, Vec<Note>>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self, alert_id: &str) -> &[Note] {
        self.by_alert
            .get(alert_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn add(&mut self, alert_id: &str, text: &str) -> anyhow::Result<&Note> {
        let text = text.trim();
        if text.is_empty() {
            bail!("note text is empty");
        }
        let note = Note {
            id: uid(),
            ts: Utc::now(),
            text: text.to_string(),
        };
        let list = self.by_alert.entry(alert_id.to_string()).or_default();
        list.insert(0, note);
        Ok(&list[0])
    }

    /// Remove a note. Returns `false` when it did not exist.
    pub fn remove(&mut self, alert_id: &str, note_id: &str) -> bool {
        match self.by_alert.get_mut(alert_id) {
            Some(list) => {
                let before = list.len();
                list.retain(|n| n.id != note_id);
                list.len() != before
            }
            None => false,
        }
    }
}
