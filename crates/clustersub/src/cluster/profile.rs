use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;
use std::path::Path;

/// Config file used when `--config` is not passed.
pub const DEFAULT_CONFIG_PATH: &str = "config/navier_stokes.toml";

/// Account used on ICE when the config file does not provide one.
pub const ICE_FALLBACK_ACCOUNT: &str = "coa";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    Evaluate,
    Train,
}

impl Display for JobKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Evaluate => f.write_str("evaluation"),
            JobKind::Train => f.write_str("training"),
        }
    }
}

/// Where the `account`/`partition` keys are searched for in the config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigLookup {
    /// Only inside the `[<name>]` table.
    Section(&'static str),
    /// First matching key anywhere in the file, in document order.
    WholeFile,
}

/// Submission conventions of a single cluster entry point.
///
/// Adding a cluster means declaring another profile; the resolution pipeline
/// itself is shared.
#[derive(Debug)]
pub struct ClusterProfile {
    /// Short cluster name, also used in messages.
    pub cluster: &'static str,
    pub kind: JobKind,
    pub default_accelerator: &'static str,
    pub default_accelerator_count: NonZeroU32,
    pub default_config: &'static str,
    /// `None` means that a missing account is fatal.
    pub fallback_account: Option<&'static str>,
    /// Reject accelerator types outside of the known table.
    pub strict_accelerators: bool,
    pub config_lookup: ConfigLookup,
    pub batch_script: &'static str,
}

impl ClusterProfile {
    pub fn batch_script(&self) -> &Path {
        Path::new(self.batch_script)
    }

    pub fn name(&self) -> String {
        format!("{}-{}", self.cluster, self.kind)
    }
}

pub static ICE_EVALUATE: ClusterProfile = ClusterProfile {
    cluster: "ice",
    kind: JobKind::Evaluate,
    default_accelerator: "H100",
    default_accelerator_count: NonZeroU32::MIN,
    default_config: DEFAULT_CONFIG_PATH,
    fallback_account: Some(ICE_FALLBACK_ACCOUNT),
    strict_accelerators: false,
    config_lookup: ConfigLookup::Section("ice"),
    batch_script: "scripts/ice_evaluate.sbatch",
};

pub static ICE_TRAIN: ClusterProfile = ClusterProfile {
    cluster: "ice",
    kind: JobKind::Train,
    default_accelerator: "H100",
    default_accelerator_count: NonZeroU32::MIN,
    default_config: DEFAULT_CONFIG_PATH,
    fallback_account: Some(ICE_FALLBACK_ACCOUNT),
    strict_accelerators: false,
    config_lookup: ConfigLookup::Section("ice"),
    batch_script: "scripts/ice_train.sbatch",
};

// The legacy PACE script matched `account` anywhere in the file. We scope the
// lookup to `[pace]` like on ICE until the whole-file behavior is confirmed.
pub static PACE_TRAIN: ClusterProfile = ClusterProfile {
    cluster: "pace",
    kind: JobKind::Train,
    default_accelerator: "H100",
    default_accelerator_count: NonZeroU32::MIN,
    default_config: DEFAULT_CONFIG_PATH,
    fallback_account: None,
    strict_accelerators: true,
    config_lookup: ConfigLookup::Section("pace"),
    batch_script: "scripts/pace_train.sbatch",
};
