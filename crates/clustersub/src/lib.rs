pub mod client;
pub mod cluster;
pub mod common;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod tests;

pub type Error = crate::common::error::SubmitError;
pub type Result<T> = std::result::Result<T, Error>;

/// Environment variable prefix shared by every `clustersub` option.
pub const ENV_PREFIX: &str = "CLUSTERSUB_";

pub const CLUSTERSUB_VERSION: &str = {
    match option_env!("CLUSTERSUB_BUILD_VERSION") {
        Some(version) => version,
        None => const_format::concatcp!(env!("CARGO_PKG_VERSION"), "-dev"),
    }
};
