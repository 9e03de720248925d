//! FRP Config Provider CLI
//!
//! Query and open frp config files through the provider, and flip the
//! permission flags that gate external access.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use provider::config::Config;
use provider::protocol::VirtualRow;
use provider::{ConfigProvider, PermissionKey, PreferenceStore};

/// FRP config provider - permission-gated access to frp config files.
#[derive(Parser, Debug)]
#[command(name = "frp-config")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List entries, or probe one entry by URI
    Query {
        /// URI to query (defaults to the provider root)
        uri: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the media type of a URI
    Type {
        /// URI to classify
        uri: String,
    },

    /// Copy a config file to stdout
    Cat {
        /// Item URI
        uri: String,
    },

    /// Copy stdin into a config file
    Write {
        /// Item URI
        uri: String,

        /// Open mode
        #[arg(long, short, value_enum, default_value = "w")]
        mode: WriteMode,
    },

    /// Print the URI addressing one entry
    Uri {
        /// Config type token (frpc or frps)
        config_type: String,

        /// File name
        name: String,
    },

    /// Show or change the access permission flags
    #[command(subcommand)]
    Prefs(PrefsCommands),
}

/// Subcommands for the permission flags.
#[derive(Subcommand, Debug, Clone)]
pub enum PrefsCommands {
    /// Show both flags
    Show,

    /// Set one flag
    Set {
        /// Which flag to set
        #[arg(value_enum)]
        flag: PrefFlag,

        /// New value
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
}

/// Permission flag selector.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefFlag {
    /// External read access
    Read,
    /// External write access
    Write,
}

impl From<PrefFlag> for PermissionKey {
    fn from(flag: PrefFlag) -> Self {
        match flag {
            PrefFlag::Read => PermissionKey::Read,
            PrefFlag::Write => PermissionKey::Write,
        }
    }
}

/// Write-class open modes accepted by `write`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Write, create, truncate
    W,
    /// Write, create, truncate
    Wt,
    /// Write, create, append
    Wa,
    /// Read and write, create
    Rw,
    /// Read and write, create, truncate
    Rwt,
}

impl WriteMode {
    fn as_str(&self) -> &'static str {
        match self {
            WriteMode::W => "w",
            WriteMode::Wt => "wt",
            WriteMode::Wa => "wa",
            WriteMode::Rw => "rw",
            WriteMode::Rwt => "rwt",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default()?
    };
    config.apply_env_overrides();
    config.validate()?;

    // Logs go to stderr so stdout carries only data.
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.log.level.to_lowercase()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::debug!("Storage root: {:?}", config.storage.root);

    let provider = ConfigProvider::from_config(&config);

    match cli.command {
        Commands::Query { uri, json } => {
            let uri = uri.unwrap_or_else(|| provider.router().root_uri());
            let rows = provider.query(&uri)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_rows_table(rows.rows());
            }
        }
        Commands::Type { uri } => {
            if let Some(media_type) = provider.get_type(&uri) {
                println!("{}", media_type);
            }
        }
        Commands::Cat { uri } => {
            let mut file = provider.open_file(&uri, "r")?;
            let mut stdout = io::stdout().lock();
            io::copy(&mut file, &mut stdout).context("Failed to copy file to stdout")?;
            stdout.flush()?;
        }
        Commands::Write { uri, mode } => {
            let mut file = provider.open_file(&uri, mode.as_str())?;
            let written = io::copy(&mut io::stdin().lock(), &mut file)
                .context("Failed to copy stdin into file")?;
            file.sync_all().context("Failed to flush file")?;
            tracing::info!("Wrote {} bytes to {}", written, uri);
        }
        Commands::Uri { config_type, name } => {
            println!("{}", provider.router().item_uri(&config_type, &name));
        }
        Commands::Prefs(PrefsCommands::Show) => {
            let store = PreferenceStore::new(config.preferences_path());
            for key in [PermissionKey::Read, PermissionKey::Write] {
                println!("{} = {}", key.as_str(), store.get(key));
            }
        }
        Commands::Prefs(PrefsCommands::Set { flag, value }) => {
            let store = PreferenceStore::new(config.preferences_path());
            store.set(flag.into(), value)?;
        }
    }

    Ok(())
}

/// Print rows in a formatted ASCII table.
fn print_rows_table(rows: &[VirtualRow]) {
    if rows.is_empty() {
        println!("No config entries.");
        return;
    }

    let type_width = rows
        .iter()
        .map(|r| r.config_type.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:>4}  {:<type_width$}  {}",
        "_ID",
        "TYPE",
        "NAME",
        type_width = type_width
    );
    println!("{}", "-".repeat(type_width + 20));

    for row in rows {
        println!(
            "{:>4}  {:<type_width$}  {}",
            row.id,
            row.config_type,
            row.name,
            type_width = type_width
        );
    }

    println!();
    println!("Total: {} entr{}", rows.len(), if rows.len() == 1 { "y" } else { "ies" });
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_query_defaults() {
        let cli = Cli::try_parse_from(["frp-config", "query"]).unwrap();
        match cli.command {
            Commands::Query { uri, json } => {
                assert!(uri.is_none());
                assert!(!json);
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_query_with_uri_and_json() {
        let cli = Cli::try_parse_from([
            "frp-config",
            "query",
            "content://io.github.acedroidx.frp.config/frpc/a.toml",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Query { uri, json } => {
                assert_eq!(
                    uri.as_deref(),
                    Some("content://io.github.acedroidx.frp.config/frpc/a.toml")
                );
                assert!(json);
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_write_default_mode() {
        let cli = Cli::try_parse_from(["frp-config", "write", "content://x/frpc/a"]).unwrap();
        match cli.command {
            Commands::Write { mode, .. } => assert_eq!(mode, WriteMode::W),
            _ => panic!("Expected Write command"),
        }
    }

    #[test]
    fn test_write_append_mode() {
        let cli =
            Cli::try_parse_from(["frp-config", "write", "content://x/frpc/a", "--mode", "wa"])
                .unwrap();
        match cli.command {
            Commands::Write { mode, .. } => assert_eq!(mode.as_str(), "wa"),
            _ => panic!("Expected Write command"),
        }
    }

    #[test]
    fn test_write_rejects_read_mode() {
        let result = Cli::try_parse_from(["frp-config", "write", "content://x/frpc/a", "-m", "r"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_prefs_set() {
        let cli = Cli::try_parse_from(["frp-config", "prefs", "set", "read", "true"]).unwrap();
        match cli.command {
            Commands::Prefs(PrefsCommands::Set { flag, value }) => {
                assert_eq!(flag, PrefFlag::Read);
                assert!(value);
                assert_eq!(PermissionKey::from(flag), PermissionKey::Read);
            }
            _ => panic!("Expected Prefs Set command"),
        }
    }

    #[test]
    fn test_prefs_set_false() {
        let cli = Cli::try_parse_from(["frp-config", "prefs", "set", "write", "false"]).unwrap();
        match cli.command {
            Commands::Prefs(PrefsCommands::Set { flag, value }) => {
                assert_eq!(flag, PrefFlag::Write);
                assert!(!value);
            }
            _ => panic!("Expected Prefs Set command"),
        }
    }

    #[test]
    fn test_prefs_show() {
        let cli = Cli::try_parse_from(["frp-config", "prefs", "show"]).unwrap();
        assert!(matches!(cli.command, Commands::Prefs(PrefsCommands::Show)));
    }

    #[test]
    fn test_uri_command() {
        let cli = Cli::try_parse_from(["frp-config", "uri", "frps", "server.ini"]).unwrap();
        match cli.command {
            Commands::Uri { config_type, name } => {
                assert_eq!(config_type, "frps");
                assert_eq!(name, "server.ini");
            }
            _ => panic!("Expected Uri command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["frp-config", "type", "content://x", "-v", "-c", "/tmp/c.toml"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
