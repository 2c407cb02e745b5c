use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackStats {
    pub files: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Files cut at the read cap.
    pub truncated: u64,
    /// Files left unassigned by the equal-slices partition.
    pub dropped: u64,
}

impl PackStats {
    /// Space saved as a percentage of input bytes; 0 for empty input.
    pub fn compression_rate(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        100.0 * (self.bytes_in as f64 - self.bytes_out as f64) / self.bytes_in as f64
    }
}
