use anyhow::Result;
use clap::Parser;
use esteem::app::App;
use esteem::cli::Cli;
use esteem::styles::init_theme;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.execute()? {
        return Ok(());
    }

    setup_panic_hook();

    let log_dir = esteem::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("esteem.log");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // The TUI owns stdout, so logs only go to the file
    let file_appender = tracing_appender::rolling::never(&log_dir, "esteem.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    eprintln!("Logs are being written to: {:?}", log_file);

    let (config, config_path) = cli.load_config()?;
    init_theme(config.effective_theme());

    let mut app = App::new(config, config_path)?;
    let result = app.run();

    drop(app);
    drop(guard);

    result
}
