use crate::client::commands::submit::SubmissionRequest;
use crate::client::globalsettings::GlobalSettings;
use crate::client::output::cli::CliOutput;
use crate::cluster::ClusterProfile;
use crate::common::cli::RootOptions;
use clap::Parser;
use std::collections::BTreeMap;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Variables that the submitted job receives.
const JOB_ENV: &[&str] = &[
    "CHECKPOINT_DIR",
    "CONFIG_FILE",
    "FRESH_TRAIN",
    "NUM_GPUS",
    "RESET_PATIENCE",
];

/// Writes an executable shell script standing in for `sbatch`.
///
/// The script is written under a temporary name and renamed into place once it is complete.
pub(crate) fn write_fake_sbatch(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-sbatch.sh");
    let tmp_path = dir.join(".fake-sbatch.sh.tmp");
    std::fs::write(&tmp_path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o755)).unwrap();
    std::fs::rename(&tmp_path, &path).unwrap();
    path
}

/// Fake `sbatch` that stores its arguments (one per line) into `args.txt` and the job
/// variables it received (`KEY=VALUE` per line) into `env.txt` inside `dir`.
pub(crate) fn recording_sbatch(dir: &Path) -> PathBuf {
    let args = dir.join("args.txt");
    let env = dir.join("env.txt");
    let mut body = format!("printf '%s\\n' \"$@\" > '{}'\n", args.display());
    body.push_str(&format!(": > '{}'\n", env.display()));
    for name in JOB_ENV {
        body.push_str(&format!(
            "if [ -n \"${{{name}+x}}\" ]; then printf '%s\\n' \"{name}=${name}\" >> '{}'; fi\n",
            env.display()
        ));
    }
    body.push_str("echo 'Submitted batch job 77'");
    write_fake_sbatch(dir, &body)
}

pub(crate) fn recorded_env(dir: &Path) -> BTreeMap<String, String> {
    std::fs::read_to_string(dir.join("env.txt"))
        .unwrap()
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub(crate) fn recorded_args(dir: &Path) -> Option<Vec<String>> {
    std::fs::read_to_string(dir.join("args.txt"))
        .ok()
        .map(|content| content.lines().map(|l| l.to_string()).collect())
}

pub(crate) fn test_settings(dir: &Path, program: &Path) -> GlobalSettings {
    GlobalSettings::new(
        dir.join("logs"),
        program.display().to_string(),
        false,
        Box::<CliOutput>::default(),
    )
}

pub(crate) fn parse_submission(args: &[&str]) -> (&'static ClusterProfile, SubmissionRequest) {
    RootOptions::try_parse_from(std::iter::once("clustersub").chain(args.iter().copied()))
        .unwrap()
        .subcmd
        .into_submission()
        .unwrap()
}
