use crate::client::commands::submit::SubmissionInvocation;
use crate::scheduler::SubmissionOutcome;

#[allow(clippy::upper_case_acronyms)]
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Outputs {
    CLI,
    JSON,
}

pub trait Output {
    fn print_dry_run(&self, invocation: &SubmissionInvocation);
    fn print_submitted(&self, invocation: &SubmissionInvocation, outcome: &SubmissionOutcome);

    fn print_error(&self, error: anyhow::Error);
}
