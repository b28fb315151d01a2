use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Error, Result};
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::cmd::{
    self, AppContext,
    design::DesignArgs,
    form::FormCommand,
    stats::{StatsArgs, SubmissionsArgs},
    submit::{SubmitArgs, VisitArgs},
};
use crate::cmd::i18n::tr_lit;
use crate::config::{ConfigOverrides, FormcraftConfig};
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "formcraft",
    about = "Design, publish and collect forms",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(long = "locale", value_name = "LOCALE", global = true)]
    locale: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Act as this user
    #[arg(long = "user", value_name = "USER", global = true)]
    user: Option<String>,

    /// Directory holding the form store
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            data_dir: self.data_dir.clone(),
            user: self.user.clone(),
            locale: self.locale.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, list, show and publish forms
    #[command(subcommand)]
    Form(FormCommand),
    /// Edit the elements of an unpublished form
    Design(DesignArgs),
    /// Open a form through its share token
    Visit(VisitArgs),
    /// Submit values to a published form
    Submit(SubmitArgs),
    /// Show the submissions of a form as a table
    Submissions(SubmissionsArgs),
    /// Show visit and submission totals for your forms
    Stats(StatsArgs),
}

pub fn main() -> Result<()> {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let early_locale = cmd::i18n::cli_locale_from_argv(&argv).or_else(|| {
        FormcraftConfig::load(&ConfigOverrides::default())
            .ok()
            .and_then(|config| config.locale)
    });
    cmd::i18n::init(early_locale)?;

    let mut command = localize_help(Cli::command(), true);
    let matches = match command.try_get_matches_from_mut(argv) {
        Ok(matches) => matches,
        Err(err) => err.exit(),
    };
    let cli = Cli::from_arg_matches(&matches).map_err(|err| Error::msg(err.to_string()))?;

    let config = FormcraftConfig::load(&cli.overrides())
        .context(cmd::i18n::tr_key("cli.error.config"))?;
    logging::init(&config.log_filter);
    tracing::debug!(
        locale = cmd::i18n::selected_locale(),
        data_dir = %config.data_dir.display(),
        user = %config.user,
        "configuration loaded"
    );

    let ctx = AppContext::from_config(config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli.command, &ctx))
}

async fn dispatch(command: Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::Form(form_cmd) => cmd::form::run(form_cmd, ctx).await,
        Commands::Design(args) => cmd::design::run(args, ctx).await,
        Commands::Visit(args) => cmd::submit::visit(args, ctx).await,
        Commands::Submit(args) => cmd::submit::submit(args, ctx).await,
        Commands::Submissions(args) => cmd::stats::submissions(args, ctx).await,
        Commands::Stats(args) => cmd::stats::stats(args, ctx).await,
    }
}

/// Rewrites every about and help string through the message catalog.
fn localize_help(command: clap::Command, is_root: bool) -> clap::Command {
    let command = with_builtin_flags(translate_args(translate_about(command)), is_root);
    let names = command
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .collect::<Vec<_>>();
    names.into_iter().fold(command, |command, name| {
        command.mut_subcommand(name, |sub| localize_help(sub, false))
    })
}

fn translate_about(command: clap::Command) -> clap::Command {
    let about = command.get_about().map(|text| tr_lit(&text.to_string()));
    let long_about = command.get_long_about().map(|text| tr_lit(&text.to_string()));
    let command = match about {
        Some(about) => command.about(about),
        None => command,
    };
    match long_about {
        Some(long_about) => command.long_about(long_about),
        None => command,
    }
}

/// clap's generated `--help`/`--version` carry fixed English text, so they
/// are swapped for equivalent flags with catalog help.
fn with_builtin_flags(command: clap::Command, is_root: bool) -> clap::Command {
    let command = command
        .disable_help_subcommand(true)
        .disable_help_flag(true)
        .arg(builtin_flag("help", 'h', ArgAction::Help, "Print help"));
    if !is_root {
        return command;
    }
    command
        .disable_version_flag(true)
        .arg(builtin_flag("version", 'V', ArgAction::Version, "Print version"))
}

fn builtin_flag(name: &'static str, short: char, action: ArgAction, help: &str) -> Arg {
    Arg::new(name)
        .short(short)
        .long(name)
        .action(action)
        .help(tr_lit(help))
}

fn translate_args(command: clap::Command) -> clap::Command {
    let helped = command
        .get_arguments()
        .filter_map(|arg| Some((arg.get_id().clone(), arg.get_help()?.to_string())))
        .collect::<Vec<_>>();
    helped.into_iter().fold(command, |command, (id, help)| {
        command.mut_arg(id, |arg| arg.help(tr_lit(&help)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::design::DesignAction;
    use form_spec::FieldType;
    use form_store::FormId;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "formcraft",
            "form",
            "create",
            "--name",
            "Survey",
            "--user",
            "dana",
            "--data-dir",
            "/tmp/forms",
        ])
        .expect("expected CLI to parse");
        let overrides = cli.overrides();
        assert_eq!(overrides.user.as_deref(), Some("dana"));
        assert_eq!(overrides.data_dir, Some(PathBuf::from("/tmp/forms")));
        match cli.command {
            Commands::Form(FormCommand::Create(args)) => {
                assert_eq!(args.name, "Survey");
                assert_eq!(args.description, "");
            }
            other => panic!("expected form create, got {other:?}"),
        }
    }

    #[test]
    fn parses_palette_drop() {
        let cli = Cli::try_parse_from([
            "formcraft",
            "--locale",
            "nl",
            "design",
            "3",
            "drop",
            "--palette",
            "checkbox-field",
            "--top",
            "name",
        ])
        .expect("expected CLI to parse");
        assert_eq!(cli.locale.as_deref(), Some("nl"));
        match cli.command {
            Commands::Design(args) => {
                assert_eq!(args.id, FormId(3));
                let DesignAction::Drop(drop) = args.action else {
                    panic!("expected drop");
                };
                assert_eq!(drop.palette, Some(FieldType::CheckboxField));
                assert_eq!(drop.top.as_deref(), Some("name"));
            }
            other => panic!("expected design, got {other:?}"),
        }
    }

    #[test]
    fn drop_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["formcraft", "design", "1", "drop", "--empty"]).is_err());
        assert!(
            Cli::try_parse_from([
                "formcraft",
                "design",
                "1",
                "drop",
                "--palette",
                "text-field",
                "--element",
                "a",
            ])
            .is_err()
        );
    }

    #[test]
    fn drop_targets_are_exclusive() {
        assert!(
            Cli::try_parse_from([
                "formcraft",
                "design",
                "1",
                "drop",
                "--element",
                "a",
                "--top",
                "b",
                "--bottom",
                "c",
            ])
            .is_err()
        );
    }

    #[test]
    fn set_collects_pairs() {
        let cli = Cli::try_parse_from([
            "formcraft",
            "design",
            "1",
            "set",
            "name",
            "label=Full name",
            "required=true",
        ])
        .expect("expected CLI to parse");
        let Commands::Design(args) = cli.command else {
            panic!("expected design");
        };
        let DesignAction::Set(set) = args.action else {
            panic!("expected set");
        };
        assert_eq!(
            set.pairs,
            vec![
                ("label".to_string(), "Full name".to_string()),
                ("required".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn submit_requires_values() {
        assert!(Cli::try_parse_from(["formcraft", "submit", "tok"]).is_err());
        let cli = Cli::try_parse_from(["formcraft", "submit", "tok", "--value", "a=1"])
            .expect("expected CLI to parse");
        assert!(matches!(cli.command, Commands::Submit(_)));
    }

    #[test]
    fn unknown_field_kind_is_rejected() {
        assert!(
            Cli::try_parse_from(["formcraft", "design", "1", "drop", "--palette", "slider"])
                .is_err()
        );
    }

    #[test]
    fn localized_help_builds() {
        let command = localize_help(Cli::command(), true);
        command.debug_assert();
    }

    #[test]
    fn every_command_gets_a_help_flag() {
        fn check(command: &clap::Command, is_root: bool) {
            let ids = command
                .get_arguments()
                .map(|arg| arg.get_id().as_str())
                .collect::<Vec<_>>();
            assert!(ids.contains(&"help"), "{} has no help flag", command.get_name());
            assert_eq!(ids.contains(&"version"), is_root, "{}", command.get_name());
            assert!(command.get_subcommands().all(|sub| sub.get_name() != "help"));
            for sub in command.get_subcommands() {
                check(sub, false);
            }
        }
        let command = localize_help(Cli::command(), true);
        check(&command, true);

        let design = command
            .find_subcommand("design")
            .and_then(|design| design.find_subcommand("preview"))
            .expect("design preview");
        assert_eq!(
            design.get_about().map(ToString::to_string),
            Some(tr_lit("Show the draft as visitors will see it, without counting a visit"))
        );
    }
}
