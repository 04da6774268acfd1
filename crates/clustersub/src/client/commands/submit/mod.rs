pub mod config;
pub mod invocation;

use crate::client::globalsettings::GlobalSettings;
use crate::cluster::{ClusterProfile, map_accelerator};
use crate::common::utils::fs::ensure_directory;
use crate::scheduler::run_invocation;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::num::NonZeroU32;
use std::path::PathBuf;

pub use config::{ResolvedConfig, resolve_config};
pub use invocation::{SubmissionInvocation, build_invocation};

/// Options shared by every submission variant
#[derive(Parser, Debug)]
pub struct SubmitCommonOpts {
    /// Accelerator type, e.g. `H100` or `a100` (case-insensitive).
    /// Defaults to the cluster default.
    #[arg(long, value_name = "TYPE", value_parser = NonEmptyStringValueParser::new())]
    pub gpu: Option<String>,

    /// Number of accelerators to request.
    /// Defaults to the cluster default.
    #[arg(long, value_name = "COUNT")]
    pub ngpus: Option<NonZeroU32>,

    /// Path to the TOML config file of the run
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct EvaluateOpts {
    #[clap(flatten)]
    pub common: SubmitCommonOpts,

    /// Directory containing the model checkpoint to evaluate
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub checkpoint: PathBuf,
}

#[derive(Parser, Debug)]
pub struct TrainOpts {
    #[clap(flatten)]
    pub common: SubmitCommonOpts,

    /// Reset the early stopping patience counter when resuming
    #[arg(long)]
    pub reset_patience: bool,

    /// Start training from scratch instead of resuming from the last checkpoint
    #[arg(long)]
    pub fresh: bool,
}

/// Variant specific part of a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobPayload {
    Evaluate { checkpoint: PathBuf },
    Train { reset_patience: bool, fresh: bool },
}

/// Normalized user request, with cluster defaults filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub accelerator: String,
    pub accelerator_count: NonZeroU32,
    pub config: PathBuf,
    pub payload: JobPayload,
}

impl SubmitCommonOpts {
    fn into_request(self, profile: &ClusterProfile, payload: JobPayload) -> SubmissionRequest {
        SubmissionRequest {
            accelerator: self
                .gpu
                .unwrap_or_else(|| profile.default_accelerator.to_string()),
            accelerator_count: self.ngpus.unwrap_or(profile.default_accelerator_count),
            config: self
                .config
                .unwrap_or_else(|| PathBuf::from(profile.default_config)),
            payload,
        }
    }
}

impl EvaluateOpts {
    pub fn into_request(self, profile: &ClusterProfile) -> SubmissionRequest {
        let payload = JobPayload::Evaluate {
            checkpoint: self.checkpoint,
        };
        self.common.into_request(profile, payload)
    }
}

impl TrainOpts {
    pub fn into_request(self, profile: &ClusterProfile) -> SubmissionRequest {
        let payload = JobPayload::Train {
            reset_patience: self.reset_patience,
            fresh: self.fresh,
        };
        self.common.into_request(profile, payload)
    }
}

/// Resolves `request` against `profile` and hands it over to the scheduler.
///
/// Every check happens before the scheduler is started, so a failure never leaves a partial
/// submission behind. Returns the exit code of the scheduler program.
pub async fn submit_job(
    gsettings: &GlobalSettings,
    profile: &ClusterProfile,
    request: SubmissionRequest,
) -> anyhow::Result<i32> {
    log::debug!("Submitting {} job: {request:?}", profile.name());

    let config = resolve_config(&request.config, profile)?;
    log::debug!("Resolved config: {config:?}");

    let resources = map_accelerator(
        &request.accelerator,
        request.accelerator_count,
        profile.strict_accelerators,
    )?;

    let invocation = build_invocation(
        gsettings.scheduler_program(),
        profile,
        &request,
        &config,
        &resources,
    );
    log::debug!("Scheduler invocation: {}", invocation.command_line());

    if gsettings.dry_run() {
        gsettings.printer().print_dry_run(&invocation);
        return Ok(0);
    }

    ensure_directory(gsettings.log_directory())?;
    let outcome = run_invocation(&invocation).await?;
    gsettings.printer().print_submitted(&invocation, &outcome);
    Ok(outcome.exit_code)
}
