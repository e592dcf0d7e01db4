use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tierlistapp::model::CategoryMode;
use tierlistapp::reorder::ContainerId;

#[derive(Parser, Debug)]
#[command(name = "tierlist", bin_name = "tierlist", version)]
#[command(about = "Rank a fixed catalog into S/A/B/C/D tiers and share it as a link", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog JSON file (defaults to the config's catalog_path, then <data>/catalog.json)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub catalog: Option<PathBuf>,

    /// Data directory (defaults to $TIERLIST_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the tiers and the bank
    #[command(alias = "ls")]
    Show {
        /// Mode to show instead of the active one
        #[arg(long, value_parser = parse_mode)]
        mode: Option<CategoryMode>,
    },

    /// Switch the active mode
    Mode {
        #[arg(value_parser = parse_mode)]
        mode: CategoryMode,
    },

    /// Move an entry (by id or name) into a tier or back to the bank
    Place {
        entry: String,

        /// S, A, B, C, D or bank
        #[arg(value_parser = parse_target)]
        target: ContainerId,

        /// Insert before this entry instead of at the end
        #[arg(long, value_name = "ENTRY")]
        before: Option<String>,
    },

    /// Clear the active mode's tiers and re-enable its filters
    Reset,

    /// Print a share link for the current state
    Share {
        /// Shorten the link (falls back to the long link on failure)
        #[arg(long)]
        shorten: bool,
    },

    /// Load state from a share link or fragment
    Load {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Show or hide entries by hero
    Filter {
        #[command(subcommand)]
        action: FilterCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum FilterCommands {
    /// Toggle one hero
    Hero { name: String, state: Switch },
    /// Toggle every hero of a role
    Role { role: String, state: Switch },
    /// Toggle entries that belong to no hero
    Universal { state: Switch },
    /// Toggle all heroes and universal entries
    All { state: Switch },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

fn parse_mode(s: &str) -> Result<CategoryMode, String> {
    s.parse()
}

fn parse_target(s: &str) -> Result<ContainerId, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierlistapp::model::Tier;

    #[test]
    fn test_place_parsing() {
        let cli = Cli::try_parse_from(["tierlist", "place", "E2", "s", "--before", "E1"]).unwrap();
        match cli.command {
            Some(Commands::Place {
                entry,
                target,
                before,
            }) => {
                assert_eq!(entry, "E2");
                assert_eq!(target, ContainerId::Tier(Tier::S));
                assert_eq!(before.as_deref(), Some("E1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_target_is_rejected() {
        assert!(Cli::try_parse_from(["tierlist", "place", "E2", "Z"]).is_err());
    }

    #[test]
    fn test_global_flags_after_command() {
        let cli = Cli::try_parse_from(["tierlist", "show", "--mode", "powers", "--data", "/tmp/x", "-v"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Some(Commands::Show {
                mode: Some(CategoryMode::Powers)
            })
        ));
    }

    #[test]
    fn test_filter_universal_parsing() {
        let cli = Cli::try_parse_from(["tierlist", "filter", "universal", "on"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Filter {
                action: FilterCommands::Universal { state: Switch::On }
            })
        ));
    }

    #[test]
    fn test_filter_parsing() {
        let cli = Cli::try_parse_from(["tierlist", "filter", "role", "Tank", "off"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Filter {
                action: FilterCommands::Role { state: Switch::Off, .. }
            })
        ));
    }
}
