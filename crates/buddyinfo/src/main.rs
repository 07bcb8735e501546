//! mackerel-plugin-buddyinfo - free-page fragmentation metrics plugin.
//!
//! Reads `/proc/buddyinfo` once per invocation and prints either metric values
//! or, when the agent asks for them, graph definitions.

mod output;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

use buddyinfo_core::config::{DEFAULT_BUDDYINFO_PATH, DEFAULT_KEY_PREFIX};
use buddyinfo_core::{BuddyinfoCollector, PluginConfig, RealFs, RunMode, build_catalog};

/// Buddyinfo metrics plugin.
#[derive(Parser)]
#[command(
    name = "mackerel-plugin-buddyinfo",
    about = "Free-page fragmentation metrics from /proc/buddyinfo",
    version
)]
struct Args {
    /// Path to the buddyinfo file.
    #[arg(long, default_value = DEFAULT_BUDDYINFO_PATH)]
    buddyinfo: PathBuf,

    /// Metric key prefix.
    #[arg(long, default_value = DEFAULT_KEY_PREFIX)]
    metric_key_prefix: String,

    /// Also define the raw available pages graph (one series per block size).
    #[arg(long)]
    verbose: bool,

    /// Increase logging verbosity (-d for info, -dd for debug). Default is warn level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber. Logs go to stderr, stdout belongs to the agent.
fn init_logging(debug: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match debug {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    let filter = with_crate_level(EnvFilter::from_default_env(), level);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Sets `level` for this plugin's own targets, leaving other `RUST_LOG` directives alone.
fn with_crate_level(mut filter: EnvFilter, level: Level) -> EnvFilter {
    for target in ["buddyinfo_core", "mackerel_plugin_buddyinfo"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

fn wants_definitions() -> bool {
    std::env::var(output::META_ENV).as_deref() == Ok("1")
}

fn print_definitions(
    out: &mut impl Write,
    collector: &BuddyinfoCollector<RealFs>,
    config: &PluginConfig,
) -> bool {
    // Without zone names there is nothing to define; the agent must see a failure.
    let catalog = match build_catalog(collector, config.mode) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "cannot fetch buddyinfo");
            return false;
        }
    };

    match output::write_definitions(out, config, &catalog) {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "failed to write graph definitions");
            false
        }
    }
}

fn print_values(
    out: &mut impl Write,
    collector: &BuddyinfoCollector<RealFs>,
    config: &PluginConfig,
) -> bool {
    // The collector already logged the warning; an empty cycle is not a failure.
    let Ok(metrics) = collector.collect() else {
        return true;
    };

    match output::write_values(out, config, &metrics, Utc::now().timestamp()) {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "failed to write metrics");
            false
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.debug, args.quiet);

    let config = PluginConfig::new(
        args.buddyinfo,
        args.metric_key_prefix,
        RunMode::from_verbose(args.verbose),
    );
    let collector = BuddyinfoCollector::from_config(RealFs::new(), &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ok = if wants_definitions() {
        print_definitions(&mut out, &collector, &config)
    } else {
        print_values(&mut out, &collector, &config)
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
