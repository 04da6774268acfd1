use crate::client::commands::submit::SubmissionInvocation;
use crate::client::output::outputs::Output;
use crate::common::error::SubmitError;
use crate::scheduler::SubmissionOutcome;
use crate::scheduler::slurm::status_hint;
use colored::Colorize;

#[derive(Default)]
pub struct CliOutput;

impl Output for CliOutput {
    fn print_dry_run(&self, invocation: &SubmissionInvocation) {
        println!("{}", "Dry run, nothing was submitted".yellow());
        println!("{}", invocation.command_line());
    }

    fn print_submitted(&self, invocation: &SubmissionInvocation, outcome: &SubmissionOutcome) {
        if outcome.is_success() {
            match &outcome.job_id {
                Some(job_id) => println!(
                    "Job submitted {}, job ID: {}",
                    "successfully".color(colored::Color::Green),
                    job_id
                ),
                None => {
                    println!(
                        "Job submitted {}",
                        "successfully".color(colored::Color::Green)
                    );
                    if !outcome.stdout.is_empty() {
                        println!("{}", outcome.stdout);
                    }
                }
            }
            if !outcome.stderr.is_empty() {
                eprintln!("{}", outcome.stderr);
            }
            println!(
                "Check the job status with `{}`",
                status_hint(outcome.job_id.as_deref()).bold()
            );
        } else {
            eprintln!(
                "{} exited with code {}",
                invocation.program.red(),
                outcome.exit_code
            );
            if !outcome.stderr.is_empty() {
                eprintln!("{}", outcome.stderr);
            }
            if !outcome.stdout.is_empty() {
                eprintln!("{}", outcome.stdout);
            }
        }
    }

    fn print_error(&self, error: anyhow::Error) {
        match error.downcast_ref::<SubmitError>() {
            // clap renders its own message together with the usage
            Some(SubmitError::UsageError(usage)) => eprint!("{usage}"),
            _ => eprintln!("{}: {error:?}", "error".red().bold()),
        }
    }
}
