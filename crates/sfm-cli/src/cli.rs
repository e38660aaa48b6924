//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};

/// SFM CLI - Inspect and edit the provenance of Security Force Monitor records.
#[derive(Debug, Parser)]
#[command(name = "sfm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Backend URL, overriding the profile
    #[arg(long, env = "SFM_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Log requests and editor activity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List or edit the sources of a field
    Sources(SourcesArgs),

    /// Show the version history of a field
    Versions(VersionsArgs),

    /// Revert a field to a previous version
    Revert(RevertArgs),

    /// List the translations of a field
    Translations(FieldArgs),

    /// Add a translation to a field
    Translate(TranslateArgs),

    /// Suggest language names for a partial input
    Languages(LanguagesArgs),

    /// Search a record listing
    Search(SearchArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Field addressed by a command.
#[derive(Debug, Clone, Args)]
pub struct FieldArgs {
    /// Record type (e.g., person, organization)
    pub record_type: String,

    /// Record id; `0` or `add` for a record not saved yet
    pub record_id: String,

    /// Field name (the input's DOM id, e.g., PersonName)
    pub field: String,
}

/// Arguments for the sources command.
#[derive(Debug, Args)]
pub struct SourcesArgs {
    #[command(flatten)]
    pub field: FieldArgs,

    /// Add a source citation (repeatable)
    #[arg(short, long)]
    pub add: Vec<String>,

    /// Confidence code (1-3) for the added citations
    #[arg(long, default_value = "")]
    pub source_confidence: String,

    /// Delete a citation by id (repeatable)
    #[arg(short, long)]
    pub delete: Vec<String>,

    /// Field confidence code (1-3)
    #[arg(long)]
    pub confidence: Option<String>,

    /// Field value sent when saving; without it the stored value is kept
    #[arg(long)]
    pub value: Option<String>,

    /// Save the record after editing
    #[arg(short, long)]
    pub save: bool,
}

/// Arguments for the versions command.
#[derive(Debug, Args)]
pub struct VersionsArgs {
    #[command(flatten)]
    pub field: FieldArgs,

    /// Limit the history to one language
    #[arg(short, long)]
    pub lang: Option<String>,
}

/// Arguments for the revert command.
#[derive(Debug, Args)]
pub struct RevertArgs {
    #[command(flatten)]
    pub field: FieldArgs,

    /// Version id to restore
    pub version_id: String,

    /// Language of the version
    #[arg(short, long)]
    pub lang: Option<String>,
}

/// Arguments for the translate command.
#[derive(Debug, Args)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub field: FieldArgs,

    /// Language of the translation
    pub language: String,

    /// Translated value
    pub value: String,
}

/// Arguments for the languages command.
#[derive(Debug, Args)]
pub struct LanguagesArgs {
    /// Partial language name
    pub term: String,
}

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Listing page path (e.g., /en/person/)
    pub path: String,

    /// Listing fragment with filters (e.g., "#name=Juan&country=mx")
    #[arg(long, default_value = "")]
    pub fragment: String,

    /// Sort by a column; repeating the current column flips the order
    #[arg(short, long)]
    pub order_by: Option<String>,

    /// Result page
    #[arg(long)]
    pub page: Option<u32>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Backend URL
        #[arg(short, long)]
        url: String,
        /// Interface language
        #[arg(short, long, default_value = "en")]
        lang: String,
        /// CSRF token sent with every POST
        #[arg(long, default_value = "")]
        csrf_token: String,
        /// Request timeout in seconds
        #[arg(short, long, default_value = "30")]
        timeout: u64,
        /// Form field the record document is posted under (default: record type)
        #[arg(long)]
        save_form_key: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_command() {
        let cli = Cli::parse_from([
            "sfm",
            "sources",
            "person",
            "7",
            "PersonName",
            "--add",
            "Report A",
            "--add",
            "Report B",
            "--delete",
            "5",
            "--save",
        ]);
        match cli.command {
            Command::Sources(args) => {
                assert_eq!(args.field.record_type, "person");
                assert_eq!(args.add, vec!["Report A", "Report B"]);
                assert_eq!(args.delete, vec!["5"]);
                assert!(args.save);
            }
            _ => panic!("Expected Sources command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "sfm",
            "versions",
            "person",
            "7",
            "PersonName",
            "--lang",
            "fr",
            "--format",
            "json",
            "--verbose",
        ]);
        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Versions(args) => assert_eq!(args.lang.as_deref(), Some("fr")),
            _ => panic!("Expected Versions command"),
        }
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["sfm", "search", "/en/person/", "--order-by", "name"]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.path, "/en/person/");
                assert_eq!(args.order_by.as_deref(), Some("name"));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_profile_set_with_form_key() {
        let cli = Cli::parse_from([
            "sfm",
            "profile",
            "set",
            "legacy",
            "--url",
            "https://sfm.example.org",
            "--save-form-key",
            "object",
        ]);
        match cli.command {
            Command::Profile(ProfileArgs {
                action: ProfileAction::Set { save_form_key, lang, .. },
            }) => {
                assert_eq!(save_form_key.as_deref(), Some("object"));
                assert_eq!(lang, "en");
            }
            _ => panic!("Expected Profile set command"),
        }
    }
}
