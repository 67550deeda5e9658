// SPDX-License-Identifier: MIT
//! check.rs — pre-flight checks for `echovibe check`.
//!
//! Runs entirely offline against the resolved config, so configuration
//! problems surface before they cause confusing startup failures. No
//! network calls are made.

use crate::config::AppConfig;

/// The result of a single pre-flight check.
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

/// Run all checks and return a list of results.
pub fn run_check(config: &AppConfig) -> Vec<CheckResult> {
    vec![
        check_gemini_key(config),
        check_model(config),
        check_mail_mode(config),
        check_port_available(config),
        check_static_dir(config),
    ]
}

// ─── Individual checks ────────────────────────────────────────────────────────

/// Check 1: a Gemini API key is configured.
fn check_gemini_key(config: &AppConfig) -> CheckResult {
    let present = config.engine.api_key.is_some();
    CheckResult {
        name: "Gemini API key",
        passed: present,
        detail: if present {
            "GEMINI_API_KEY is set".to_string()
        } else {
            "GEMINI_API_KEY is not set; mood scans and itineraries will fail".to_string()
        },
    }
}

/// Check 2: which model generation calls will use.
fn check_model(config: &AppConfig) -> CheckResult {
    CheckResult {
        name: "Gemini model",
        passed: true,
        detail: config.engine.model.clone(),
    }
}

/// Check 3: mail mode. Mock mode is a valid way to run, so this always
/// passes; the detail says which mode is active.
fn check_mail_mode(config: &AppConfig) -> CheckResult {
    let detail = if config.smtp.configured() {
        let host = config.smtp.host.as_deref().unwrap_or("?");
        let tls = if config.smtp.implicit_tls() {
            "implicit TLS"
        } else {
            "STARTTLS"
        };
        format!("smtp via {host}:{} ({tls})", config.smtp.port)
    } else {
        "mock mode; quotes are acknowledged without sending".to_string()
    };
    CheckResult {
        name: "Mail transport",
        passed: true,
        detail,
    }
}

/// Check 4: the configured bind address and port are available.
fn check_port_available(config: &AppConfig) -> CheckResult {
    let bind = format!("{}:{}", config.bind_address, config.port);
    let passed = std::net::TcpListener::bind(&bind).is_ok();
    CheckResult {
        name: "Port available",
        passed,
        detail: if passed {
            format!("{bind} is free")
        } else {
            format!("{bind} is in use by another process")
        },
    }
}

/// Check 5: static bundle presence. API-only deployments are fine, so
/// this always passes.
fn check_static_dir(config: &AppConfig) -> CheckResult {
    CheckResult {
        name: "Static bundle",
        passed: true,
        detail: match config.static_root() {
            Some(dir) => format!("serving {}", dir.display()),
            None => "no static bundle; API only".to_string(),
        },
    }
}

// ─── Output ───────────────────────────────────────────────────────────────────

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Print a formatted table of check results to stdout.
pub fn print_check_results(results: &[CheckResult]) {
    println!();
    println!("{BOLD}echovibe check — pre-flight{RESET}");
    println!("{}", "─".repeat(60));

    for r in results {
        let (symbol, color) = if r.passed { ("✓", GREEN) } else { ("✗", RED) };
        println!("  {color}{symbol}{RESET}  {:<18}  {}", r.name, r.detail);
    }

    println!("{}", "─".repeat(60));

    let failed = results.iter().filter(|r| !r.passed).count();
    if failed == 0 {
        println!("{GREEN}All checks passed.{RESET}");
    } else {
        println!("{RED}{failed} check(s) failed. See above for details.{RESET}");
    }
    println!();
}
