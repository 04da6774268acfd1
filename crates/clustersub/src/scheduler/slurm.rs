/// Extracts the job id from the `Submitted batch job <id>` line printed by `sbatch`.
pub fn parse_sbatch_job_id(output: &str) -> Option<String> {
    output
        .lines()
        .map(|l| l.trim())
        .find(|l| l.to_lowercase().starts_with("submitted batch job"))
        .and_then(|l| l.split_whitespace().nth(3))
        .map(|l| l.to_string())
}

/// Command that the user can run to check the state of a submitted job.
pub fn status_hint(job_id: Option<&str>) -> String {
    match job_id {
        Some(id) => format!("squeue -j {id}"),
        None => "squeue -u $USER".to_string(),
    }
}
