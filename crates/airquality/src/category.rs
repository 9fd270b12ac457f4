use std::fmt;

use crate::scalar::Scalar;

/// Air-quality severity level, 1 (Good) through 6 (Hazardous), with 7 for
/// readings that cannot be classified.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Category {
    Good = 1,
    Moderate = 2,
    UnhealthyForSensitiveGroups = 3,
    Unhealthy = 4,
    VeryUnhealthy = 5,
    Hazardous = 6,
    Unavailable = 7,
}

/// Inclusive upper index bound of each standard band, ascending.
/// Anything above the last bound is [`Category::Hazardous`].
const BANDS: [(f64, Category); 5] = [
    (50.0, Category::Good),
    (100.0, Category::Moderate),
    (150.0, Category::UnhealthyForSensitiveGroups),
    (200.0, Category::Unhealthy),
    (300.0, Category::VeryUnhealthy),
];

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Good,
        Category::Moderate,
        Category::UnhealthyForSensitiveGroups,
        Category::Unhealthy,
        Category::VeryUnhealthy,
        Category::Hazardous,
        Category::Unavailable,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// Band for a parsed index value.
    pub fn from_index(index: f64) -> Self {
        BANDS
            .iter()
            .find(|(upper, _)| index <= *upper)
            .map(|(_, category)| *category)
            .unwrap_or(Category::Hazardous)
    }

    /// An upstream category code, accepted only for the standard bands 1..=6.
    pub fn from_code(code: f64) -> Option<Self> {
        if code.fract() != 0.0 || !(1.0..=6.0).contains(&code) {
            return None;
        }
        Self::from_number(code as u8)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
            Category::Unavailable => "Unavailable",
        }
    }

    /// Display color as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            Category::Good => "#2f8650",
            Category::Moderate => "#d8b234",
            Category::UnhealthyForSensitiveGroups => "#df8a2d",
            Category::Unhealthy => "#ce4a42",
            Category::VeryUnhealthy => "#8441a3",
            Category::Hazardous => "#4a1f60",
            Category::Unavailable => "#7a7a7a",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Classifies a reading.
///
/// A valid upstream category code wins over the locally computed band, so the
/// reporting agency's own classification is kept whenever it supplies one.
pub fn normalize(index: Option<&Scalar>, explicit_code: Option<&Scalar>) -> Category {
    if let Some(category) = explicit_code
        .and_then(Scalar::as_number)
        .and_then(Category::from_code)
    {
        return category;
    }

    match index.and_then(Scalar::as_number) {
        Some(index) => Category::from_index(index),
        None => Category::Unavailable,
    }
}

/// One `"<n>. <label>"` line per level, in level order.
pub fn legend_lines() -> Vec<String> {
    Category::ALL.iter().map(|c| c.to_string()).collect()
}
