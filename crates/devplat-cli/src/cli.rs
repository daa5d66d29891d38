//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// devplat - Configure and provision developer platform environments
#[derive(Parser, Debug)]
#[command(name = "devplat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Environment to use instead of the project default
    #[arg(short, long, global = true, env = "DEVPLAT_ENVIRONMENT")]
    pub environment: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage local environments
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },

    /// Inspect the developer platform
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },

    /// Browse templates offered by the platform
    Templates {
        #[command(subcommand)]
        action: TemplatesAction,
    },

    /// Prepare a deployment of the selected environment
    ///
    /// Prompts for any platform setting or parameter that is not configured
    /// yet and stores the answers in the environment.
    Provision {
        /// JSON snapshot of the dev center service
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Output the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the effective platform configuration
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Show which layer supplied each setting
        #[arg(long)]
        origins: bool,
    },

    /// Print a value from the user config
    Get {
        /// Dot-separated path, e.g. platform.config.project
        path: String,
    },

    /// Store a value in the user config
    ///
    /// JSON literals keep their type: `true`, `42`, `{"a": 1}`.
    Set { path: String, value: String },

    /// Remove a value from the user config
    Unset { path: String },
}

/// Environment subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum EnvAction {
    /// Create a new environment
    New { name: String },

    /// Make an environment the project default
    Select { name: String },

    /// List local environments
    List {
        /// List the environments deployed in the dev center described by
        /// this snapshot instead
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },

    /// Print a value from the selected environment
    Get { path: String },
}

/// Platform subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PlatformAction {
    /// Show whether the devcenter platform is enabled
    Status,
}

/// Template subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TemplatesAction {
    /// List available templates
    List {
        /// JSON snapshot of the dev center service
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_provision_with_environment() {
        let cli = Cli::parse_from(["devplat", "provision", "--catalog", "dc.json", "-e", "dev"]);
        assert_eq!(cli.environment.as_deref(), Some("dev"));
        assert_eq!(
            cli.command,
            Some(Commands::Provision {
                catalog: PathBuf::from("dc.json"),
                json: false,
            })
        );
    }

    #[test]
    fn parse_env_list_remote() {
        let cli = Cli::parse_from(["devplat", "env", "list", "--catalog", "dc.json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Env {
                action: EnvAction::List {
                    catalog: Some(PathBuf::from("dc.json")),
                }
            })
        );
    }

    #[test]
    fn parse_config_set() {
        let cli = Cli::parse_from(["devplat", "config", "set", "platform.type", "devcenter"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Set {
                    path: "platform.type".to_string(),
                    value: "devcenter".to_string(),
                }
            })
        );
    }
}
