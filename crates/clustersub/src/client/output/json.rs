use crate::client::commands::submit::SubmissionInvocation;
use crate::client::output::outputs::Output;
use crate::scheduler::SubmissionOutcome;
use crate::scheduler::slurm::status_hint;
use serde_json::{Value, json};

#[derive(Default)]
pub struct JsonOutput;

impl JsonOutput {
    fn print(&self, data: Value) {
        println!("{data:#}");
    }
}

impl Output for JsonOutput {
    fn print_dry_run(&self, invocation: &SubmissionInvocation) {
        self.print(json!({
            "dry_run": true,
            "invocation": invocation,
            "args": invocation.args(),
        }));
    }

    fn print_submitted(&self, invocation: &SubmissionInvocation, outcome: &SubmissionOutcome) {
        self.print(json!({
            "dry_run": false,
            "invocation": invocation,
            "args": invocation.args(),
            "outcome": outcome,
            "status_hint": outcome.is_success().then(|| status_hint(outcome.job_id.as_deref())),
        }));
    }

    fn print_error(&self, error: anyhow::Error) {
        self.print(json!({
            "error": format!("{error:?}"),
        }));
    }
}
