#![forbid(unsafe_code)]

//! Trellis demo binary entry point.

use std::fs::File;
use std::rc::Rc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use trellis::{ManagerConfig, SessionOptions, Theme};
use trellis_demo::app::App;
use trellis_demo::cli;

fn init_logging(path: &std::path::Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

/// Run until quit. The terminal is restored before this returns.
fn run(app: &App, opts: &cli::Opts, theme: Theme) -> trellis::Result<()> {
    let session = SessionOptions::default().with_mouse_capture(opts.mouse);
    let config = ManagerConfig::default()
        .with_mouse(opts.mouse)
        .with_theme(theme);

    let mut manager = trellis::terminal(Rc::clone(&app.root), session, config)?;
    app.install(&mut manager);
    if opts.exit_after_ms > 0 {
        let handle = manager.shutdown_handle();
        let delay = Duration::from_millis(opts.exit_after_ms);
        thread::spawn(move || {
            thread::sleep(delay);
            handle.shutdown();
        });
    }
    tracing::info!(file = ?app.file(), "demo started");
    manager.run()?;
    Ok(())
}

fn main() {
    let opts = cli::Opts::parse();

    if let Some(path) = &opts.log
        && let Err(e) = init_logging(path)
    {
        eprintln!("Failed to open log file {}: {e}", path.display());
        std::process::exit(1);
    }

    let theme = match opts.theme.as_str() {
        "dark" => Theme::dark(),
        "light" => Theme::light(),
        _ => Theme::detect(),
    };

    let app = match App::load(&opts) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to load notes: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&app, &opts, theme) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
