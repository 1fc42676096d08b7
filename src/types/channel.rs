//! Measurement channels

use serde::{Deserialize, Serialize};

/// One of the three measured signals. Declaration order is the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Heart rate
    Bpm,
    /// Facial movement
    Face,
    /// Eye movement
    Eye,
}

impl Channel {
    /// All channels in output order
    pub const ALL: [Channel; 3] = [Channel::Bpm, Channel::Face, Channel::Eye];

    /// Display name used in the long table
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Bpm => "BPM",
            Channel::Face => "Face",
            Channel::Eye => "Eye",
        }
    }

    /// Column suffix used in the master table
    pub fn suffix(&self) -> &'static str {
        match self {
            Channel::Bpm => "BPM",
            Channel::Face => "FACE",
            Channel::Eye => "EYE",
        }
    }

    pub fn summary_file_name(&self) -> &'static str {
        match self {
            Channel::Bpm => "bpm_summary.csv",
            Channel::Face => "face_summary.csv",
            Channel::Eye => "eye_summary.csv",
        }
    }

    /// Header names this channel may appear under in raw files, most
    /// canonical first.
    pub fn column_aliases(&self) -> &'static [&'static str] {
        match self {
            Channel::Bpm => &[
                "Heart Rate (BPM)",
                "BPM",
                "HeartRate",
                "Heart_Rate_BPM",
                "heart_rate_bpm",
                "hr_bpm",
            ],
            Channel::Face => &[
                "Face Movement (avg)",
                "Face_Movement",
                "Face Movement",
                "face_movement_avg",
                "face_avg",
            ],
            Channel::Eye => &[
                "Eye Movement (avg)",
                "Eye_Movement",
                "Eye Movement",
                "eye_movement_avg",
                "eye_avg",
            ],
        }
    }

    /// Suffixed master column name, e.g. `"Positive Lie_BPM"`
    pub fn suffixed(&self, column: &str) -> String {
        format!("{}_{}", column, self.suffix())
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
