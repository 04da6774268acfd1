use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;

use crate::client::commands::submit::{EvaluateOpts, SubmissionRequest, TrainOpts};
use crate::client::output::outputs::Outputs;
use crate::cluster::ClusterProfile;
use crate::cluster::profile::{ICE_EVALUATE, ICE_TRAIN, PACE_TRAIN};
use crate::common::env;
use crate::scheduler::SBATCH_PROGRAM;

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum ColorPolicy {
    /// Use colors if the stdout is detected to be a terminal.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

// Common CLI options
#[derive(Parser, Debug)]
pub struct CommonOpts {
    /// Directory where the batch jobs write their logs.
    /// It is created before submission if it does not exist.
    #[arg(
        long,
        value_hint = clap::ValueHint::DirPath,
        global = true,
        env = env::CLUSTERSUB_LOG_DIR,
        default_value = "logs",
        help_heading("GLOBAL OPTIONS")
    )]
    pub log_dir: PathBuf,

    /// Program used to submit batch scripts
    #[arg(
        long,
        global = true,
        env = env::CLUSTERSUB_SBATCH,
        default_value = SBATCH_PROGRAM,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub sbatch: String,

    /// Print the scheduler invocation instead of executing it
    #[arg(long, global = true, help_heading("GLOBAL OPTIONS"))]
    pub dry_run: bool,

    /// Sets console color policy
    #[arg(
        long,
        default_value_t = ColorPolicy::Auto,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub colors: ColorPolicy,

    /// Sets output formatting
    #[arg(
        long,
        env = env::CLUSTERSUB_OUTPUT_MODE,
        default_value_t = Outputs::CLI,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub output_mode: Outputs,

    /// Enables more detailed log output
    #[arg(
        long,
        env = env::CLUSTERSUB_DEBUG,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub debug: bool,
}

// Root CLI options
#[derive(Parser, Debug)]
#[command(
    author,
    about,
    version(crate::CLUSTERSUB_VERSION),
    disable_help_subcommand(true),
    help_expected(true)
)]
pub struct RootOptions {
    #[clap(flatten)]
    pub common: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser, Debug)]
pub enum SubCommand {
    /// Submit an evaluation of a trained checkpoint on ICE
    IceEval(EvaluateOpts),
    /// Submit a training run on ICE
    IceTrain(TrainOpts),
    /// Submit a training run on PACE
    PaceTrain(TrainOpts),
    /// Generate shell completion script
    GenerateCompletion(GenerateCompletionOpts),
}

impl SubCommand {
    /// Normalizes a submission subcommand into the profile it targets and the request.
    /// Returns `None` for subcommands that do not submit anything.
    pub fn into_submission(self) -> Option<(&'static ClusterProfile, SubmissionRequest)> {
        match self {
            SubCommand::IceEval(opts) => Some((&ICE_EVALUATE, opts.into_request(&ICE_EVALUATE))),
            SubCommand::IceTrain(opts) => Some((&ICE_TRAIN, opts.into_request(&ICE_TRAIN))),
            SubCommand::PaceTrain(opts) => Some((&PACE_TRAIN, opts.into_request(&PACE_TRAIN))),
            SubCommand::GenerateCompletion(_) => None,
        }
    }
}

#[derive(Parser, Debug)]
pub struct GenerateCompletionOpts {
    /// Shell flavour for which the completion script should be generated
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parses the command line. Every clap failure, including `--help` and `--version`,
/// is returned as [`SubmitError::UsageError`](crate::common::error::SubmitError::UsageError).
pub fn parse_root_options<I, T>(args: I) -> crate::Result<RootOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(RootOptions::try_parse_from(args)?)
}

/// Best effort detection of `--output-mode` for reporting a command line that failed to parse.
pub fn output_mode_hint<I, T>(args: I) -> Outputs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    RootOptions::command()
        .ignore_errors(true)
        .try_get_matches_from(args)
        .ok()
        .and_then(|matches| {
            matches
                .try_get_one::<Outputs>("output_mode")
                .ok()
                .flatten()
                .cloned()
        })
        .or_else(|| {
            std::env::var(env::CLUSTERSUB_OUTPUT_MODE)
                .ok()
                .and_then(|value| Outputs::from_str(&value, true).ok())
        })
        .unwrap_or(Outputs::CLI)
}

/// Exit code of the wrapper: the scheduler exit code after a hand-off,
/// 1 for any error raised before or while starting the scheduler.
pub fn exit_code(result: &anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => *code,
        Err(_) => 1,
    }
}
