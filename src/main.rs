//! CLI entry point for dir-graph

use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use dir_graph::logging::init_logger;
use dir_graph::tree::DEFAULT_IGNORES;
use dir_graph::{BuildConfig, OutputConfig, StatusPrinter, TreeBuilder, print_json, write_tree_json};
use termcolor::ColorChoice;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

/// Map the requested mode to termcolor's choice; `always` bypasses its own
/// terminal checks.
fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Always => ColorChoice::Always,
        mode if should_use_color(mode) => ColorChoice::Auto,
        _ => ColorChoice::Never,
    }
}

#[derive(Parser, Debug)]
#[command(name = "dir-graph")]
#[command(about = "Generate a data.json file for a directory tree so it can be visualized as an interactive graph")]
#[command(version)]
struct Args {
    /// Directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Directory where data.json is written (default: current directory)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory or file name to ignore (can be used multiple times; replaces the defaults)
    #[arg(short = 'i', long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Time budget for reading file sizes. After this, the walk continues
    /// with unknown sizes. Seconds (e.g. 2.5) or a duration (e.g. 1m30s);
    /// 0 disables the limit
    #[arg(
        long = "max-seconds",
        value_name = "SECONDS",
        env = "DIR_GRAPH_MAX_SECONDS",
        default_value = "15",
        value_parser = parse_max_seconds,
        allow_negative_numbers = true
    )]
    max_seconds: f64,

    /// Print the JSON document to stdout instead of writing data.json
    #[arg(long = "stdout")]
    stdout: bool,

    /// Write compact JSON instead of indented
    #[arg(long = "compact")]
    compact: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Only report the written file
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Parse a time budget: plain seconds ("15", "0.5", "-1") or a humantime
/// duration ("90s", "1m 30s").
fn parse_max_seconds(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<f64>() {
        if secs.is_nan() {
            return Err("not a number".to_string());
        }
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs_f64())
        .map_err(|e| format!("expected seconds or a duration like 1m30s: {}", e))
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    let root = if args.path.is_absolute() {
        args.path.clone()
    } else {
        cwd.join(&args.path)
    };

    let ignore_names: Vec<String> = if args.ignore.is_empty() {
        DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect()
    } else {
        args.ignore.clone()
    };
    let config = BuildConfig::default()
        .with_ignore_names(ignore_names)
        .with_max_seconds(args.max_seconds);

    if args.stdout {
        let walk = TreeBuilder::new(config).walk(&root)?;
        print_json(&walk.root)?;
        return Ok(());
    }

    let mut status = StatusPrinter::new(color_choice(args.color), args.quiet);
    status.banner()?;
    status.analyzing(&root)?;

    let walk = TreeBuilder::new(config).walk(&root)?;
    status.summary(&walk.stats)?;

    let output_dir = match &args.output_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    let output = OutputConfig {
        pretty: !args.compact,
        ..OutputConfig::new(&output_dir)
    };
    let written = write_tree_json(&walk.root, &output)?;
    status.written(&written)?;
    status.next_steps(&output_dir)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("dir-graph: {}", e);
        process::exit(1);
    }
}
