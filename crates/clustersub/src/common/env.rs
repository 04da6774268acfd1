//! Names of environment variables read by `clustersub` itself and of the
//! variables exported into the submitted batch job.

macro_rules! create_clustersub_env {
    ($name: literal) => {
        concat!("CLUSTERSUB_", $name)
    };
}

/// Options of the wrapper that can be set through the environment
pub const CLUSTERSUB_DEBUG: &str = create_clustersub_env!("DEBUG");
pub const CLUSTERSUB_OUTPUT_MODE: &str = create_clustersub_env!("OUTPUT_MODE");
pub const CLUSTERSUB_LOG_DIR: &str = create_clustersub_env!("LOG_DIR");
pub const CLUSTERSUB_SBATCH: &str = create_clustersub_env!("SBATCH");

/// Variables exported into the batch job
pub const NUM_GPUS: &str = "NUM_GPUS";
pub const CONFIG_FILE: &str = "CONFIG_FILE";
pub const CHECKPOINT_DIR: &str = "CHECKPOINT_DIR";
pub const RESET_PATIENCE: &str = "RESET_PATIENCE";
pub const FRESH_TRAIN: &str = "FRESH_TRAIN";
