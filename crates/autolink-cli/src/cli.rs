use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors (default)
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "autolink")]
#[command(about = "autolink - link the first mention of each defined term in a document tree")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ./autolink.toml when present)
    #[arg(short = 'C', long, global = true, env = "AUTOLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Definitions file, TOML or JSON (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub definitions: Option<PathBuf>,

    /// Candidate filter worker threads (overrides config file)
    #[arg(short = 'j', long, global = true)]
    pub parallelism: Option<usize>,

    /// The site's own origin, e.g. https://example.org (overrides config file)
    #[arg(long, global = true)]
    pub site_origin: Option<String>,
}

impl Cli {
    /// Effective log level: explicit level, else debug when verbose, else warn
    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Insert links into a JSON document tree
    Link {
        /// Input document (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target of the page being linked; it will never link to itself
        #[arg(short, long)]
        page: Option<String>,

        /// Leave section headings unlinked
        #[arg(long)]
        skip_headers: bool,

        /// Pretty-print the output document
        #[arg(long)]
        pretty: bool,

        /// Print the link report as JSON on stderr
        #[arg(long)]
        report: bool,
    },

    /// Validate the definitions file and print the table in priority order
    Check {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the definitions that could link somewhere in a document
    Candidates {
        /// Input document (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Target of the page being linked
        #[arg(short, long)]
        page: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_level_filter_precedence() {
        let cli = Cli::parse_from(["autolink", "-v", "--log-level", "trace", "check"]);
        assert_eq!(cli.level_filter(), LevelFilter::TRACE);

        let cli = Cli::parse_from(["autolink", "-v", "check"]);
        assert_eq!(cli.level_filter(), LevelFilter::DEBUG);

        let cli = Cli::parse_from(["autolink", "check"]);
        assert_eq!(cli.level_filter(), LevelFilter::WARN);
    }

    #[test]
    fn test_link_arguments() {
        let cli = Cli::parse_from([
            "autolink", "-d", "defs.toml", "link", "doc.json", "--page", "/gan", "--report",
        ]);
        assert_eq!(cli.definitions, Some(PathBuf::from("defs.toml")));
        match cli.command {
            Commands::Link {
                input, page, report, ..
            } => {
                assert_eq!(input, Some(PathBuf::from("doc.json")));
                assert_eq!(page.as_deref(), Some("/gan"));
                assert!(report);
            }
            _ => panic!("expected link command"),
        }
    }
}
