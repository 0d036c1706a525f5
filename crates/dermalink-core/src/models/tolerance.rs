use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The ordered tolerance scale, used for both patient tolerance and protocol
/// intensity: `None < VeryLow < Low < Medium < High < VeryHigh`.
///
/// Derive order matters — `PartialOrd`/`Ord` follow declaration order, and
/// the eligibility filter compares levels directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ToleranceLevel {
    None,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ToleranceLevel {
    pub const ALL: [ToleranceLevel; 6] = [
        ToleranceLevel::None,
        ToleranceLevel::VeryLow,
        ToleranceLevel::Low,
        ToleranceLevel::Medium,
        ToleranceLevel::High,
        ToleranceLevel::VeryHigh,
    ];

    /// Position on the ordered scale, 0..=5.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The level exactly one ordinal step above, if any.
    pub fn step_above(self) -> Option<ToleranceLevel> {
        Self::ALL.get(self.index() as usize + 1).copied()
    }

    /// Ordinal distance between two levels.
    pub fn distance(self, other: ToleranceLevel) -> u8 {
        self.index().abs_diff(other.index())
    }

    /// Label used in prompts and match details.
    pub fn label(self) -> &'static str {
        match self {
            ToleranceLevel::None => "None",
            ToleranceLevel::VeryLow => "Very Low",
            ToleranceLevel::Low => "Low",
            ToleranceLevel::Medium => "Medium",
            ToleranceLevel::High => "High",
            ToleranceLevel::VeryHigh => "Very High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_ordered() {
        assert!(ToleranceLevel::None < ToleranceLevel::VeryLow);
        assert!(ToleranceLevel::Low < ToleranceLevel::Medium);
        assert!(ToleranceLevel::High < ToleranceLevel::VeryHigh);
    }

    #[test]
    fn indexes_cover_zero_to_five() {
        let indexes: Vec<u8> = ToleranceLevel::ALL.iter().map(|l| l.index()).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn step_above_caps_at_very_high() {
        assert_eq!(
            ToleranceLevel::None.step_above(),
            Some(ToleranceLevel::VeryLow)
        );
        assert_eq!(ToleranceLevel::VeryHigh.step_above(), None);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(ToleranceLevel::None.distance(ToleranceLevel::Medium), 3);
        assert_eq!(ToleranceLevel::Medium.distance(ToleranceLevel::None), 3);
        assert_eq!(ToleranceLevel::Low.distance(ToleranceLevel::Low), 0);
    }
}
