//! Per-face configuration.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Face attribute flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FaceFlags: u32 {
        /// Face connects to a local application rather than a link
        const APPLICATION = 0x01;
    }
}

impl Default for FaceFlags {
    fn default() -> Self {
        FaceFlags::empty()
    }
}

/// Configuration applied to a face at creation time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FaceConfig {
    /// Routing metric of the face
    pub metric: u16,
    /// Attribute flags
    pub flags: FaceFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FaceConfig::default();
        assert_eq!(config.metric, 0);
        assert!(!config.flags.contains(FaceFlags::APPLICATION));
    }
}
