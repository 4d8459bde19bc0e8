use clap::{Parser, Subcommand};
use srccheck::config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
use srccheck::{Analyzer, KnowledgeBase};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "srccheck",
    version,
    about = "Convention checker for C++ source trees"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run convention checks on a source tree.
    Check {
        /// Root of the tree; reported paths are relative to it (default: current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only run a specific rule (e.g., "system-includes").
        #[arg(long)]
        rule: Option<String>,

        /// Config file path.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// List all available rules.
    ListRules,

    /// Print the symbol → header knowledge base.
    Symbols {
        /// Only list symbols served by this header (e.g., "optional").
        #[arg(long)]
        header: Option<String>,
    },

    /// Generate a default srccheck.toml.
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.verbose);

    match cli.command {
        Command::Check {
            path,
            rule,
            config: config_path,
        } => run_check(&path, &config_path, rule.as_deref()),
        Command::ListRules => {
            run_list_rules();
            ExitCode::SUCCESS
        }
        Command::Symbols { header } => run_symbols(header.as_deref()),
        Command::Init => run_init(),
    }
}

/// Logs go to stderr; stdout carries only diagnostics.
fn init_tracing(debug: bool, verbose: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(path: &Path, config_path: &Path, rule_filter: Option<&str>) -> ExitCode {
    let config = if config_path.exists() {
        match Config::from_file(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Config error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Config::default()
    };

    let root = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => {
                eprintln!("Warning: failed to get current directory ({e}), using \".\"");
                PathBuf::from(".").join(path)
            }
        }
    };

    let analyzer = Analyzer::new(root, config).with_rule_filter(rule_filter);

    match analyzer.analyze() {
        Ok(result) => {
            result.print_report();
            if result.outcome().is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Analysis error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_list_rules() {
    eprintln!("Available rules:\n");
    for (name, desc) in srccheck::rules::ALL_RULES {
        eprintln!("  {name}");
        eprintln!("    {desc}\n");
    }
}

fn run_symbols(header: Option<&str>) -> ExitCode {
    let knowledge = KnowledgeBase::builtin();

    match header {
        Some(header) => {
            let symbols = knowledge.symbols_for(header);
            if symbols.is_empty() {
                eprintln!("No symbols mapped to {header}");
                return ExitCode::FAILURE;
            }
            for symbol in symbols {
                println!("{symbol}");
            }
        }
        None => {
            for (symbol, header) in knowledge.iter() {
                println!("{symbol} -> {header}");
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_init() -> ExitCode {
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if path.exists() {
        eprintln!("{DEFAULT_CONFIG_FILE} already exists");
        return ExitCode::FAILURE;
    }

    match std::fs::write(&path, DEFAULT_CONFIG_TOML) {
        Ok(()) => {
            eprintln!("Created {DEFAULT_CONFIG_FILE}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to write {DEFAULT_CONFIG_FILE}: {e}");
            ExitCode::FAILURE
        }
    }
}
