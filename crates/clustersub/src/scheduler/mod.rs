pub mod slurm;

use crate::client::commands::submit::SubmissionInvocation;
use anyhow::Context;
use bstr::ByteSlice;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Default program used to hand batch scripts over to the scheduler.
pub const SBATCH_PROGRAM: &str = "sbatch";

/// Result of a single scheduler call.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionOutcome {
    pub exit_code: i32,
    pub job_id: Option<String>,
    pub stdout: String,
    pub stderr: String,
}

impl SubmissionOutcome {
    fn from_output(output: Output) -> Self {
        // Killed by a signal
        let exit_code = output.status.code().unwrap_or(1);
        let stdout = output.stdout.to_str_lossy().trim().to_string();
        let stderr = output.stderr.to_str_lossy().trim().to_string();
        let job_id = if output.status.success() {
            slurm::parse_sbatch_job_id(&stdout)
        } else {
            None
        };
        Self {
            exit_code,
            job_id,
            stdout,
            stderr,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Linux `ETXTBSY`, returned when the program is still open for writing by another process.
const EXECUTABLE_FILE_BUSY: i32 = 26;

pub fn create_command(
    program: &str,
    arguments: &[String],
    env: &BTreeMap<String, String>,
    workdir: &Path,
) -> Command {
    let mut command = Command::new(program);
    command.args(arguments);
    command.envs(env);
    command.current_dir(workdir);
    command
}

/// Runs the scheduler program once and waits for it to hand the job over.
///
/// A non-zero exit code of the program is not an error here, it is reported through the
/// returned outcome. Errors are returned only if the program could not be started.
pub async fn run_invocation(invocation: &SubmissionInvocation) -> anyhow::Result<SubmissionOutcome> {
    let workdir = std::env::current_dir().context("Cannot get current working directory")?;
    run_invocation_in(invocation, &workdir).await
}

pub async fn run_invocation_in(
    invocation: &SubmissionInvocation,
    workdir: &Path,
) -> anyhow::Result<SubmissionOutcome> {
    let arguments = invocation.args();
    log::debug!(
        "Running command `{} {}` in {}",
        invocation.program,
        arguments.join(" "),
        workdir.display()
    );

    let mut command = create_command(&invocation.program, &arguments, &invocation.env, workdir);
    let first_attempt = command.output().await;
    let output = match first_attempt {
        // The program did not start, so trying again does not submit twice
        Err(error) if error.raw_os_error() == Some(EXECUTABLE_FILE_BUSY) => {
            log::debug!("{} is busy, retrying: {error}", invocation.program);
            tokio::time::sleep(Duration::from_millis(50)).await;
            command.output().await
        }
        result => result,
    }
    .with_context(|| format!("{} start failed", invocation.program))?;

    let outcome = SubmissionOutcome::from_output(output);
    if outcome.is_success() {
        log::debug!("{} output: {}", invocation.program, outcome.stdout);
    } else {
        log::debug!(
            "{} failed with exit code {}\nStderr: {}\nStdout: {}",
            invocation.program,
            outcome.exit_code,
            outcome.stderr,
            outcome.stdout
        );
    }
    Ok(outcome)
}
