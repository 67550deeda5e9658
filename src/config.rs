// config.rs — layered configuration.
//
// Priority everywhere: CLI flag / env var  >  echovibe.toml  >  built-in
// default. The TOML file is optional; a malformed one warns on stderr and
// falls back to defaults rather than aborting.

use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SMTP_PORT: u16 = 587;
/// Sender used when SMTP_FROM is not set.
pub const DEFAULT_FROM: &str = r#""EchoVibe Studio" <noreply@echovibe.studio>"#;

// ─── TOML config file ────────────────────────────────────────────────────────

/// `echovibe.toml` — every field is an optional override.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP API port (default: 3000).
    port: Option<u16>,
    /// Bind address for the HTTP server (default: "0.0.0.0").
    bind_address: Option<String>,
    /// Log level filter, e.g. "debug" or "info,echovibe=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default) or "json".
    log_format: Option<String>,
    /// Directory served as the SPA bundle (default: "dist" when present).
    static_dir: Option<PathBuf>,
    /// Gemini API key. The GEMINI_API_KEY env var wins when both are set.
    gemini_api_key: Option<String>,
    /// Gemini model id (default: "gemini-3-flash-preview").
    model: Option<String>,
    /// Per-request timeout for generateContent calls, in seconds (default: 30).
    request_timeout_secs: Option<u64>,
    /// `[smtp]` table; SMTP_* env vars win field by field.
    smtp: Option<SmtpToml>,
}

#[derive(Deserialize, Default)]
struct SmtpToml {
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    pass: Option<String>,
    from: Option<String>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(config) => Some(config),
        Err(e) => {
            // Config loads before the tracing subscriber exists, so this
            // goes straight to stderr.
            eprintln!(
                "warn: could not parse config file '{}': {e} — using defaults",
                path.display()
            );
            None
        }
    }
}

/// --config flag / ECHOVIBE_CONFIG, else ./echovibe.toml when it exists.
fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let default = PathBuf::from("echovibe.toml");
    default.exists().then_some(default)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ─── Engine settings ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// None boots the server anyway; generation calls then fail per call.
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout_secs: u64,
}

// ─── SMTP settings ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// Sender mailbox, display-name form allowed.
    pub from: String,
}

impl SmtpSettings {
    /// Mail goes out only when host, user and pass are all present;
    /// otherwise send-quote mocks the delivery.
    pub fn configured(&self) -> bool {
        fn set(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.is_empty())
        }
        set(&self.host) && set(&self.user) && set(&self.pass)
    }

    /// Port 465 is SMTPS (implicit TLS); every other port negotiates STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

// ─── App config ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub bind_address: String,
    pub log: String,
    pub log_format: String,
    /// Raw configured value; `static_root()` applies the exists-on-disk rule.
    pub static_dir: Option<PathBuf>,
    pub engine: EngineSettings,
    pub smtp: SmtpSettings,
}

impl AppConfig {
    /// Build the config from CLI/env values (passed as `Some` from clap)
    /// layered over the optional TOML file.
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        log: Option<String>,
        config_path: Option<&Path>,
    ) -> Self {
        let toml = resolve_config_path(config_path)
            .and_then(|path| load_toml(&path))
            .unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());
        let log_format = env_var("ECHOVIBE_LOG_FORMAT")
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());
        let static_dir = env_var("ECHOVIBE_STATIC_DIR")
            .map(PathBuf::from)
            .or(toml.static_dir);

        let engine = EngineSettings {
            api_key: env_var("GEMINI_API_KEY").or(toml.gemini_api_key),
            model: env_var("GEMINI_MODEL")
                .or(toml.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout_secs: toml
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let smtp_toml = toml.smtp.unwrap_or_default();
        let smtp = SmtpSettings {
            host: env_var("SMTP_HOST").or(smtp_toml.host),
            port: env_var("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .or(smtp_toml.port)
                .unwrap_or(DEFAULT_SMTP_PORT),
            user: env_var("SMTP_USER").or(smtp_toml.user),
            pass: env_var("SMTP_PASS").or(smtp_toml.pass),
            from: env_var("SMTP_FROM")
                .or(smtp_toml.from)
                .unwrap_or_else(|| DEFAULT_FROM.to_string()),
        };

        Self {
            port,
            bind_address,
            log,
            log_format,
            static_dir,
            engine,
            smtp,
        }
    }

    /// Directory served as the SPA bundle, when it exists on disk.
    /// Falls back to `dist/`, the layout the frontend build produces.
    pub fn static_root(&self) -> Option<PathBuf> {
        let dir = self
            .static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("dist"));
        dir.is_dir().then_some(dir)
    }
}
