//! Colorful console output for RosterForge runs.
//!
//! Provides a custom `tracing` layer that formats balancing events with
//! colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (signups loaded, solve start/end, reports)
//! - **WARN**: Captain policy relaxations and ignored avoid targets
//! - **DEBUG**: Model size and solver engine events

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Inner width of the result box.
const BOX_WIDTH: usize = 58;

/// Filter used when `RUST_LOG` is unset or empty.
const DEFAULT_FILTER: &str = "rosterforge=info,rosterforge_model=info,rosterforge_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the RosterForge banner and sets up tracing. A non-empty `RUST_LOG`
/// replaces the default info-level filter for the RosterForge crates.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = env_filter(rust_log.as_deref());

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RosterConsoleLayer)
            .try_init();
    });
}

fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.filter(|spec| !spec.trim().is_empty()) {
        Some(spec) => EnvFilter::builder().parse_lossy(spec),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____            _            _____
|  _ \ ___  ___| |_ ___ _ __|  ___|__  _ __ __ _  ___
| |_) / _ \/ __| __/ _ \ '__| |_ / _ \| '__/ _` |/ _ \
|  _ < (_) \__ \ ||  __/ |  |  _| (_) | | | (_| |  __/
|_| \_\___/|___/\__\___|_|  |_|  \___/|_|  \__, |\___|
                                           |___/
"#;

    let version_line = format!("                   v{} - Balanced Team Builder\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats RosterForge events with colors.
pub struct RosterConsoleLayer;

impl<S: Subscriber> Layer<S> for RosterConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("rosterforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    engine: Option<String>,
    status: Option<String>,
    captain_state: Option<String>,
    player: Option<String>,
    target: Option<String>,
    path: Option<String>,
    reason: Option<String>,
    players: Option<u64>,
    teams: Option<u64>,
    roles: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    conflicts: Option<u64>,
    time_limit_secs: Option<u64>,
    worker_count: Option<u64>,
    elapsed_ms: Option<u64>,
    objective: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "message" => self.message = Some(s),
            "engine" => self.engine = Some(s),
            "status" => self.status = Some(s),
            "captain_state" => self.captain_state = Some(s),
            "path" => self.path = Some(s),
            "reason" => self.reason = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "players" => self.players = Some(value),
            "teams" => self.teams = Some(value),
            "roles" => self.roles = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "conflicts" => self.conflicts = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            "worker_count" => self.worker_count = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "objective" {
            self.objective = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "engine" => self.engine = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "player" => self.player = Some(value.to_string()),
            "target" => self.target = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "signups_loaded" => format_signups_loaded(v),
        "model_built" => format_model_built(v, level),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "relaxation" => format_relaxation(v),
        "unknown_avoid" => format_unknown_avoid(v),
        "report_written" => format_report_written(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value
        .unwrap_or(0)
        .to_formatted_string(&Locale::en)
        .bright_yellow()
        .to_string()
}

fn format_signups_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Signups loaded │ {} players │ {}",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.players),
        v.path.as_deref().unwrap_or("").white()
    )
}

fn format_model_built(v: &EventVisitor, level: Level) -> String {
    if level != Level::DEBUG {
        return String::new();
    }
    format!(
        "{} {} Model built │ {} variables │ {} constraints │ {} conflict terms │ captains {}",
        format_elapsed(),
        "◇".bright_black(),
        count(v.variables),
        count(v.constraints),
        count(v.conflicts),
        v.captain_state.as_deref().unwrap_or("none").white()
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let mut output = format!(
        "{} {} Balancing │ {} players │ {} teams │ {} roles │ {} variables │ {} constraints",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.players),
        count(v.teams),
        count(v.roles),
        count(v.variables),
        count(v.constraints),
    );

    if let Some(engine) = &v.engine {
        output.push_str(&format!(" │ {}", engine.bright_magenta()));
    }
    if let Some(workers) = v.worker_count {
        output.push_str(&format!(" │ {} workers", count(Some(workers))));
    }
    if let Some(limit) = v.time_limit_secs.filter(|l| *l > 0) {
        output.push_str(&format!(" │ {}s limit", count(Some(limit))));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("UNKNOWN");
    let solved = status == "OPTIMAL" || status == "FEASIBLE";
    let duration = format_duration_ms(v.elapsed_ms.unwrap_or(0));

    let status_colored = if solved {
        status.bright_green().bold().to_string()
    } else {
        status.bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        duration.yellow(),
        status_colored
    );

    output.push_str("\n\n");
    output.push_str(&format!("╔{}╗", "═".repeat(BOX_WIDTH)).bright_cyan().to_string());
    output.push('\n');

    let headline = match status {
        "OPTIMAL" => "OPTIMAL ASSIGNMENT FOUND",
        "FEASIBLE" => "FEASIBLE ASSIGNMENT FOUND",
        _ => "NO ASSIGNMENT FOUND",
    };
    output.push_str(&centered_row(headline, solved));
    output.push('\n');

    output.push_str(&format!("╠{}╣", "═".repeat(BOX_WIDTH)).bright_cyan().to_string());
    output.push('\n');

    let detail = match (v.objective, v.reason.as_deref()) {
        (Some(objective), _) => ("Objective:", format!("{:.2}", objective)),
        (None, Some(reason)) => ("Reason:", reason.to_string()),
        (None, None) => ("Objective:", "N/A".to_string()),
    };
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        detail.0,
        truncate(&detail.1, 36),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&format!("╚{}╝", "═".repeat(BOX_WIDTH)).bright_cyan().to_string());
    output.push('\n');

    output
}

fn centered_row(text: &str, good: bool) -> String {
    let total_pad = BOX_WIDTH.saturating_sub(text.chars().count());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let colored = if good {
        text.bright_green().bold().to_string()
    } else {
        text.bright_red().bold().to_string()
    };
    format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    )
}

fn format_relaxation(v: &EventVisitor) -> String {
    format!(
        "{} {} Captain policy relaxed │ {}",
        format_elapsed(),
        "⚠".bright_yellow().bold(),
        v.message.as_deref().unwrap_or("").yellow()
    )
}

fn format_unknown_avoid(v: &EventVisitor) -> String {
    format!(
        "{} {} Ignoring avoid │ {} avoids unknown player {}",
        format_elapsed(),
        "⚠".bright_yellow(),
        v.player.as_deref().unwrap_or("?").white(),
        v.target.as_deref().unwrap_or("?").yellow()
    )
}

fn format_report_written(v: &EventVisitor) -> String {
    format!(
        "{} {} Saved {}",
        format_elapsed(),
        "✎".bright_blue(),
        v.path.as_deref().unwrap_or("").white()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
