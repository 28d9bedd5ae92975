/// SalesView REPL
///
/// Reads one JSON intent per line from stdin and writes one JSON response per
/// line to stdout. Starts from the demo sales unless `--empty` is given.

use salesview::{DashboardConfig, SalesView, ViewChange};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = DashboardConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut view = if std::env::args().any(|arg| arg == "--empty") {
        SalesView::new(config)
    } else {
        SalesView::with_demo_data(config)
    };

    view.subscribe(|change: &ViewChange, view: &SalesView| {
        if change.affects_aggregates() {
            log::info!(
                "{} sale(s), total {:.2}",
                view.len(),
                view.summary().total_sales
            );
        }
    });

    log::info!("salesview ready with {} sale(s)", view.len());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(stdout, "{}", view.dispatch_json(&line))?;
        stdout.flush()?;
    }

    Ok(())
}
