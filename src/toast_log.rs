use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub fn append_toast_log(path: impl AsRef<Path>, msg: &str) {
    match OpenOptions::new().create(true).append(true).open(path.as_ref()) {
        Ok(mut file) => {
            let _ = writeln!(file, "{} - {}", Local::now().to_rfc3339(), msg);
        }
        Err(e) => tracing::debug!("toast log unavailable: {e}"),
    }
}
