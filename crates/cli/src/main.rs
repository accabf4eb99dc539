mod commands;

use clap::{Parser, Subcommand};
use gqlgen_codegen::DocumentKind;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gqlgen")]
#[command(about = "Generate GraphQL fragments, queries and mutations from a schema", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to gqlgen config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documents and write them to files
    ///
    /// Output paths given here override the ones in the config file. Kinds
    /// without an output path are not generated.
    Generate {
        /// Schema file (SDL or introspection JSON)
        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Write fragments to this file
        #[arg(long, value_name = "FILE")]
        fragments: Option<PathBuf>,

        /// Write queries to this file
        #[arg(long, value_name = "FILE")]
        queries: Option<PathBuf>,

        /// Write mutations to this file
        #[arg(long, value_name = "FILE")]
        mutations: Option<PathBuf>,
    },

    /// Print one document to stdout
    Print {
        /// Document to print
        #[arg(value_enum)]
        kind: DocumentArg,

        /// Schema file (SDL or introspection JSON)
        #[arg(short, long, value_name = "FILE")]
        schema: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum DocumentArg {
    /// One fragment per object type
    Fragments,
    /// One query per root query field
    Queries,
    /// One mutation per root mutation field
    Mutations,
}

impl From<DocumentArg> for DocumentKind {
    fn from(arg: DocumentArg) -> Self {
        match arg {
            DocumentArg::Fragments => Self::Fragments,
            DocumentArg::Queries => Self::Queries,
            DocumentArg::Mutations => Self::Mutations,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    match cli.command {
        Commands::Generate {
            schema,
            fragments,
            queries,
            mutations,
        } => commands::generate::run(
            cli.config,
            commands::generate::GenerateArgs {
                schema,
                fragments,
                queries,
                mutations,
            },
            output_opts,
        ),
        Commands::Print { kind, schema } => {
            commands::print::run(cli.config, schema, kind.into())
        }
    }
}

/// Logs go to stderr so `gqlgen print` output stays clean. Silent unless
/// `RUST_LOG` asks for something.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies the color override chosen by [`color_override`], if any.
fn configure_colors(force_color: bool, no_color: bool) {
    let choice = color_override(force_color, no_color, |name| std::env::var_os(name));
    if let Some(enabled) = choice {
        colored::control::set_override(enabled);
    }
}

/// Decides whether to force colors on or off.
///
/// Flags win over the environment. `NO_COLOR` (any value) disables colors,
/// then `CLICOLOR_FORCE` (non-empty, not `0`) enables them, then `CLICOLOR=0`
/// disables them. `None` leaves TTY detection to `colored`.
///
/// See <https://no-color.org/> and <https://bixense.com/clicolors/>.
fn color_override<F>(force_color: bool, no_color: bool, env: F) -> Option<bool>
where
    F: Fn(&str) -> Option<OsString>,
{
    if force_color {
        return Some(true);
    }
    if no_color || env("NO_COLOR").is_some() {
        return Some(false);
    }
    if let Some(force) = env("CLICOLOR_FORCE") {
        return (!force.is_empty() && force != "0").then_some(true);
    }
    match env("CLICOLOR") {
        Some(value) if value == "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod cli_tests {
    use super::{Cli, Commands, DocumentArg};
    use clap::Parser;

    #[test]
    fn parses_generate_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gqlgen",
            "generate",
            "--schema",
            "schema.graphql",
            "--fragments",
            "out/fragments.graphql",
            "--quiet",
            "--config",
            "gqlgen.config.toml",
        ])
        .unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.config.unwrap().to_str(), Some("gqlgen.config.toml"));
        match cli.command {
            Commands::Generate {
                schema,
                fragments,
                queries,
                mutations,
            } => {
                assert_eq!(schema.unwrap().to_str(), Some("schema.graphql"));
                assert_eq!(fragments.unwrap().to_str(), Some("out/fragments.graphql"));
                assert!(queries.is_none());
                assert!(mutations.is_none());
            }
            Commands::Print { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn parses_print_kind() {
        let cli = Cli::try_parse_from(["gqlgen", "print", "mutations"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Print {
                kind: DocumentArg::Mutations,
                schema: None
            }
        ));
    }

    #[test]
    fn rejects_unknown_print_kind() {
        assert!(Cli::try_parse_from(["gqlgen", "print", "subscriptions"]).is_err());
    }

    #[test]
    fn color_flags_conflict() {
        assert!(Cli::try_parse_from(["gqlgen", "--color", "--no-color", "print", "queries"]).is_err());
    }
}

#[cfg(test)]
mod color_tests {
    use super::color_override;
    use std::ffi::OsString;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<OsString> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| OsString::from(value))
        }
    }

    #[test]
    fn color_flag_wins_over_environment() {
        assert_eq!(color_override(true, false, env(&[("NO_COLOR", "1")])), Some(true));
    }

    #[test]
    fn no_color_flag_disables_colors() {
        assert_eq!(
            color_override(false, true, env(&[("CLICOLOR_FORCE", "1")])),
            Some(false)
        );
    }

    #[test]
    fn no_color_env_beats_clicolor_force() {
        let vars = [("NO_COLOR", ""), ("CLICOLOR_FORCE", "1")];
        assert_eq!(color_override(false, false, env(&vars)), Some(false));
    }

    #[test]
    fn clicolor_force_zero_leaves_detection_alone() {
        assert_eq!(color_override(false, false, env(&[("CLICOLOR_FORCE", "0")])), None);
        assert_eq!(color_override(false, false, env(&[("CLICOLOR_FORCE", "")])), None);
        assert_eq!(color_override(false, false, env(&[("CLICOLOR_FORCE", "1")])), Some(true));
    }

    #[test]
    fn clicolor_zero_disables_colors() {
        assert_eq!(color_override(false, false, env(&[("CLICOLOR", "0")])), Some(false));
        assert_eq!(color_override(false, false, env(&[("CLICOLOR", "1")])), None);
        assert_eq!(color_override(false, false, env(&[])), None);
    }
}
