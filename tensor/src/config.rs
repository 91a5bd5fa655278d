use serde::{Deserialize, Serialize};

/// Tuning for [`TensorProductCode::decode_with_config`](crate::TensorProductCode::decode_with_config).
///
/// Missing fields take their default values when deserialized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// The number of row-then-column passes after which decoding stops, converged or not.
    pub max_passes: usize,
}

impl DecoderConfig {
    pub const DEFAULT_MAX_PASSES: usize = 8;
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_passes: Self::DEFAULT_MAX_PASSES,
        }
    }
}
