use crate::common::error::SubmitError;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;

/// Accelerator types known on every cluster, in their canonical spelling.
pub const KNOWN_ACCELERATORS: &[&str] = &["H200", "H100", "A100", "V100"];

/// Accelerator request in the `<type>:<count>` form expected by `sbatch --gpus`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    name: String,
    count: NonZeroU32,
}

impl ResourceDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> NonZeroU32 {
        self.count
    }
}

impl Display for ResourceDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.count)
    }
}

fn canonical_accelerator(requested: &str) -> Option<&'static str> {
    KNOWN_ACCELERATORS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(requested))
        .copied()
}

/// Maps a user supplied accelerator type onto a resource descriptor.
///
/// Known types are matched case-insensitively and emitted in canonical casing.
/// Unknown types are passed through verbatim, unless `strict` is set, in which
/// case they are rejected.
pub fn map_accelerator(
    requested: &str,
    count: NonZeroU32,
    strict: bool,
) -> crate::Result<ResourceDescriptor> {
    let name = match canonical_accelerator(requested) {
        Some(canonical) => canonical.to_string(),
        None if strict => {
            return Err(SubmitError::UnsupportedAcceleratorError {
                requested: requested.to_string(),
                supported: KNOWN_ACCELERATORS.join(", "),
            });
        }
        None => {
            log::warn!("Unknown accelerator type `{requested}`, passing it to the scheduler as is");
            requested.to_string()
        }
    };
    Ok(ResourceDescriptor { name, count })
}
