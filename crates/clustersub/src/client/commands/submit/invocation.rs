use crate::client::commands::submit::config::ResolvedConfig;
use crate::client::commands::submit::{JobPayload, SubmissionRequest};
use crate::cluster::{ClusterProfile, ResourceDescriptor};
use crate::common::env;
use crate::common::utils::str::shell_quote;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single scheduler call: `<program> <flags...> --export=ALL,<names...> <batch script>`.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionInvocation {
    pub program: String,
    pub flags: Vec<String>,
    /// Variables exported into the batch job. The values are set on the scheduler process,
    /// only the names appear on its command line.
    pub env: BTreeMap<String, String>,
    pub batch_script: PathBuf,
}

impl SubmissionInvocation {
    /// Arguments passed to the scheduler program. The batch script is always the last one.
    pub fn args(&self) -> Vec<String> {
        let mut args = self.flags.clone();
        args.push(self.export_arg());
        args.push(self.batch_script.display().to_string());
        args
    }

    // `sbatch --export` has no escaping, so values are never put into it
    fn export_arg(&self) -> String {
        std::iter::once("--export=ALL")
            .chain(self.env.keys().map(|key| key.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Shell-pasteable rendering of the whole command, including the environment.
    pub fn command_line(&self) -> String {
        self.env
            .iter()
            .map(|(key, value)| format!("{key}={}", shell_quote(value)))
            .chain(
                std::iter::once(self.program.clone())
                    .chain(self.args())
                    .map(|arg| shell_quote(&arg).into_owned()),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn flag_value(value: bool) -> String {
    String::from(if value { "1" } else { "0" })
}

/// Composes the scheduler call out of already validated inputs.
pub fn build_invocation(
    program: &str,
    profile: &ClusterProfile,
    request: &SubmissionRequest,
    config: &ResolvedConfig,
    resources: &ResourceDescriptor,
) -> SubmissionInvocation {
    let mut flags = vec![
        format!("--gpus={resources}"),
        format!("--account={}", config.account),
    ];
    if let Some(partition) = &config.partition {
        flags.push(format!("--partition={partition}"));
    }

    let mut env = BTreeMap::new();
    env.insert(
        env::NUM_GPUS.to_string(),
        request.accelerator_count.to_string(),
    );
    env.insert(
        env::CONFIG_FILE.to_string(),
        request.config.display().to_string(),
    );
    match &request.payload {
        JobPayload::Evaluate { checkpoint } => {
            env.insert(
                env::CHECKPOINT_DIR.to_string(),
                checkpoint.display().to_string(),
            );
        }
        JobPayload::Train {
            reset_patience,
            fresh,
        } => {
            env.insert(env::RESET_PATIENCE.to_string(), flag_value(*reset_patience));
            env.insert(env::FRESH_TRAIN.to_string(), flag_value(*fresh));
        }
    }

    SubmissionInvocation {
        program: program.to_string(),
        flags,
        env,
        batch_script: profile.batch_script().to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::build_invocation;
    use crate::client::commands::submit::config::ResolvedConfig;
    use crate::client::commands::submit::{JobPayload, SubmissionRequest};
    use crate::cluster::map_accelerator;
    use crate::cluster::profile::{ICE_EVALUATE, ICE_TRAIN, PACE_TRAIN};
    use std::num::NonZeroU32;
    use std::path::PathBuf;

    fn train_request(reset_patience: bool, fresh: bool) -> SubmissionRequest {
        SubmissionRequest {
            accelerator: "a100".to_string(),
            accelerator_count: NonZeroU32::new(2).unwrap(),
            config: PathBuf::from("config/navier_stokes.toml"),
            payload: JobPayload::Train {
                reset_patience,
                fresh,
            },
        }
    }

    fn config(partition: Option<&str>) -> ResolvedConfig {
        ResolvedConfig {
            account: "gts-x".to_string(),
            partition: partition.map(|p| p.to_string()),
        }
    }

    #[test]
    fn test_train_invocation() {
        let request = train_request(true, true);
        let resources = map_accelerator(&request.accelerator, request.accelerator_count, false)
            .unwrap();
        let invocation = build_invocation("sbatch", &ICE_TRAIN, &request, &config(None), &resources);
        insta::assert_snapshot!(invocation.command_line(), @"CONFIG_FILE=config/navier_stokes.toml FRESH_TRAIN=1 NUM_GPUS=2 RESET_PATIENCE=1 sbatch --gpus=A100:2 --account=gts-x --export=ALL,CONFIG_FILE,FRESH_TRAIN,NUM_GPUS,RESET_PATIENCE scripts/ice_train.sbatch");
    }

    #[test]
    fn test_train_flags_off() {
        let request = train_request(false, false);
        let resources = map_accelerator(&request.accelerator, request.accelerator_count, true)
            .unwrap();
        let invocation = build_invocation("sbatch", &PACE_TRAIN, &request, &config(None), &resources);
        assert_eq!(invocation.env["RESET_PATIENCE"], "0");
        assert_eq!(invocation.env["FRESH_TRAIN"], "0");
        assert!(!invocation.env.contains_key("CHECKPOINT_DIR"));
    }

    #[test]
    fn test_evaluate_invocation() {
        let request = SubmissionRequest {
            accelerator: "H100".to_string(),
            accelerator_count: NonZeroU32::new(2).unwrap(),
            config: PathBuf::from("my config.toml"),
            payload: JobPayload::Evaluate {
                checkpoint: PathBuf::from("./ckpt"),
            },
        };
        let resources = map_accelerator(&request.accelerator, request.accelerator_count, false)
            .unwrap();
        let invocation = build_invocation(
            "sbatch",
            &ICE_EVALUATE,
            &request,
            &config(Some("gpu-h100")),
            &resources,
        );
        assert_eq!(
            invocation.env.keys().collect::<Vec<_>>(),
            vec!["CHECKPOINT_DIR", "CONFIG_FILE", "NUM_GPUS"]
        );
        insta::assert_snapshot!(invocation.command_line(), @"CHECKPOINT_DIR=./ckpt CONFIG_FILE='my config.toml' NUM_GPUS=2 sbatch --gpus=H100:2 --account=gts-x --partition=gpu-h100 --export=ALL,CHECKPOINT_DIR,CONFIG_FILE,NUM_GPUS scripts/ice_evaluate.sbatch");
    }

    #[test]
    fn test_partition_omitted_when_absent() {
        let request = train_request(false, true);
        let resources = map_accelerator("h200", request.accelerator_count, false).unwrap();
        let invocation = build_invocation("sbatch", &ICE_TRAIN, &request, &config(None), &resources);
        assert!(!invocation.args().iter().any(|a| a.starts_with("--partition")));
    }

    #[test]
    fn test_batch_script_is_last() {
        let request = train_request(true, false);
        let resources = map_accelerator("v100", request.accelerator_count, false).unwrap();
        for partition in [None, Some("gpu")] {
            let invocation =
                build_invocation("sbatch", &ICE_TRAIN, &request, &config(partition), &resources);
            let args = invocation.args();
            assert_eq!(args.last().unwrap(), "scripts/ice_train.sbatch");
            assert_eq!(
                args.iter()
                    .filter(|a| a.as_str() == "scripts/ice_train.sbatch")
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_export_values_with_commas_stay_intact() {
        let request = SubmissionRequest {
            accelerator: "H100".to_string(),
            accelerator_count: NonZeroU32::new(2).unwrap(),
            config: PathBuf::from("runs/a,NUM_GPUS=64.toml"),
            payload: JobPayload::Evaluate {
                checkpoint: PathBuf::from("ckpt"),
            },
        };
        let resources = map_accelerator(&request.accelerator, request.accelerator_count, false)
            .unwrap();
        let invocation =
            build_invocation("sbatch", &ICE_EVALUATE, &request, &config(None), &resources);

        let args = invocation.args();
        let export = args
            .iter()
            .find(|arg| arg.starts_with("--export="))
            .unwrap();
        assert_eq!(
            export.trim_start_matches("--export=").split(',').collect::<Vec<_>>(),
            vec!["ALL", "CHECKPOINT_DIR", "CONFIG_FILE", "NUM_GPUS"]
        );
        assert_eq!(invocation.env["CONFIG_FILE"], "runs/a,NUM_GPUS=64.toml");
        assert_eq!(invocation.env["NUM_GPUS"], "2");
    }
}
