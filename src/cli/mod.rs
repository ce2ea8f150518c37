//! CLI module
//!
//! Command-line interface for planning and reading a paged source.
//!
//! # Commands
//!
//! - `count` - Print the planned record count
//! - `urls` - Print every planned page URL
//! - `read` - Stream records as JSON lines

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_read() {
        let cli = Cli::parse_from([
            "paged-source",
            "--url",
            "http://h/api/",
            "--limit-pages",
            "3",
            "read",
            "--partial",
            "--max-items",
            "50",
        ]);
        assert_eq!(cli.url.as_deref(), Some("http://h/api/"));
        assert_eq!(cli.limit_pages, Some(3));
        match cli.command {
            Commands::Read {
                partial, max_items, ..
            } => {
                assert!(partial);
                assert_eq!(max_items, Some(50));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_count_with_config() {
        let cli = Cli::parse_from(["paged-source", "count", "-C", "source.yaml", "-v"]);
        assert!(matches!(cli.command, Commands::Count));
        assert!(cli.verbose);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("source.yaml"))
        );
    }
}
