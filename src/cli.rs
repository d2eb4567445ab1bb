use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wildclip")]
#[command(about = "Rewrites copied partner merchant links into wild.link vanity links", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides ~/.wildclip/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the clipboard and rewrite partner links (default)
    Run,
    /// Show what the matcher would do with some copied text
    Check {
        text: String,

        /// Load the partner whitelist from the backend first
        #[arg(short, long)]
        fetch: bool,
    },
    /// List all partner domains
    Domains,
    /// Create a single vanity link
    Vanity { url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["wildclip"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_check_with_fetch_and_config() {
        let cli = Cli::parse_from(["wildclip", "check", "https://amazon.com", "--fetch", "-c", "/tmp/c.toml"]);
        match cli.command {
            Some(Commands::Check { text, fetch }) => {
                assert_eq!(text, "https://amazon.com");
                assert!(fetch);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
