use anyhow::Result;
use clap::{Parser, Subcommand};
use echovibe::config::AppConfig;
use echovibe::engine::{EchoEngine, GeminiEngine};
use echovibe::mail::{Mailer, SmtpMailer};
use echovibe::{check, rest, AppContext};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "echovibe",
    about = "EchoVibe — mood-driven travel itinerary and quote service",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP API port
    #[arg(long, env = "ECHOVIBE_PORT")]
    port: Option<u16>,

    /// Bind address for the HTTP server (default: 0.0.0.0)
    #[arg(long, env = "ECHOVIBE_BIND")]
    bind_address: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ECHOVIBE_LOG")]
    log: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "ECHOVIBE_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,

    /// Path to the TOML config file (default: ./echovibe.toml when present)
    #[arg(long, env = "ECHOVIBE_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Suppress progress and informational output.
    ///
    /// Errors are still printed to stderr. Exit codes are unaffected.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start the API server (default when no subcommand given).
    ///
    /// Runs echovibe in the foreground. When invoked with no subcommand,
    /// this is the default.
    ///
    /// Examples:
    ///   echovibe serve
    ///   echovibe
    Serve,
    /// Run pre-flight checks on server prerequisites.
    ///
    /// Checks the Gemini API key, mail transport configuration, port
    /// availability, and the static bundle directory.
    ///
    /// Exit code 0 if all checks pass, 1 if any check fails.
    ///
    /// Examples:
    ///   echovibe check
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap runs so env-backed flags see its values.
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config = AppConfig::new(
        args.port,
        args.bind_address,
        args.log,
        args.config.as_deref(),
    );

    // ── Logging setup ────────────────────────────────────────────────────────
    // Init once — must happen before any tracing calls.
    let _file_guard = setup_logging(&config.log, args.log_file.as_deref(), &config.log_format);

    match args.command {
        Some(Command::Check) => {
            let results = check::run_check(&config);
            if !args.quiet {
                check::print_check_results(&results);
            }
            let failed = results.iter().filter(|r| !r.passed).count();
            std::process::exit(if failed == 0 { 0 } else { 1 });
        }
        None | Some(Command::Serve) => run_server(config).await?,
    }

    Ok(())
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stdout and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format) or
/// `"json"` (structured JSON for log aggregators).
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("echovibe.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            // Fall back to stdout-only — don't panic on a bad log path.
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        None
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "echovibe starting");

    let config = Arc::new(config);
    info!(
        port = config.port,
        bind = %config.bind_address,
        model = %config.engine.model,
        "config loaded"
    );

    // The server boots without a key; generation calls then fail per request.
    if config.engine.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set — mood scans and itinerary generation will fail");
    }

    let engine: Arc<dyn EchoEngine> = Arc::new(GeminiEngine::new(&config.engine)?);

    let mailer: Option<Arc<dyn Mailer>> = if config.smtp.configured() {
        let transport = SmtpMailer::from_settings(&config.smtp)?;
        info!(
            host = config.smtp.host.as_deref().unwrap_or_default(),
            port = config.smtp.port,
            "SMTP transport ready"
        );
        Some(Arc::new(transport))
    } else {
        info!("SMTP not configured — send-quote will mock deliveries");
        None
    };

    if let Some(dir) = config.static_root() {
        info!(dir = %dir.display(), "serving static bundle");
    }

    let ctx = Arc::new(AppContext {
        config,
        engine,
        mailer,
        started_at: std::time::Instant::now(),
    });

    rest::start_rest_server(ctx).await
}
