use careops::cli::{parse_line, render_dashboard, render_toasts, Flow, Session, HELP};
use careops::clipboard::SystemClipboard;
use careops::dashboard::Dashboard;
use careops::logging;
use careops::settings::{Settings, SETTINGS_FILE};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));
    tracing::debug!(?settings, "settings loaded");

    let dashboard = Dashboard::new(&settings)?;
    let mut clipboard = SystemClipboard::new();
    let mut session = Session::new(dashboard, &mut clipboard);

    let mut out = String::new();
    render_dashboard(&session.dashboard, &mut out);
    println!("{out}\n{HELP}");

    let stdin = std::io::stdin();
    let mut last = Instant::now();
    loop {
        print!("careops> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        // Time spent at the prompt counts towards toasts and simulations.
        let now = Instant::now();
        session.dashboard.tick(now.duration_since(last));
        last = now;

        let cmd = match parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        let mut out = String::new();
        match session.execute(cmd, &mut out) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::warn!("command failed: {e:#}");
                eprintln!("error: {e:#}");
            }
        }
        render_toasts(&session.dashboard, &mut out);
        print!("{out}");
    }
    Ok(())
}
