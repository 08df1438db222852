use serde::{Deserialize, Serialize};

/// Match format: how many players are on the pitch per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    /// 4 outfield players + goalie.
    FiveVFive,
    /// 6 outfield players + goalie.
    SevenVSeven,
}

impl MatchFormat {
    /// Canonical format code string (e.g., "5v5").
    pub fn code(&self) -> &'static str {
        match self {
            MatchFormat::FiveVFive => "5v5",
            MatchFormat::SevenVSeven => "7v7",
        }
    }

    /// Outfield players on the pitch, goalie excluded.
    pub fn outfield_count(&self) -> usize {
        match self {
            MatchFormat::FiveVFive => 4,
            MatchFormat::SevenVSeven => 6,
        }
    }

    /// Squad sizes this format supports.
    pub fn squad_range(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            MatchFormat::FiveVFive => 6..=8,
            MatchFormat::SevenVSeven => 9..=10,
        }
    }
}

/// How units rotate through the bench: two-player defender/attacker pairs
/// moving together, or individual players through numbered substitute slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionScheme {
    Pairs,
    Individual,
}

/// On-field shape identifier. The first two shapes are 5v5 layouts, the
/// last two are 7v7 layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationShape {
    #[serde(rename = "2-2")]
    TwoTwo,
    #[serde(rename = "1-2-1")]
    OneTwoOne,
    #[serde(rename = "2-2-2")]
    TwoTwoTwo,
    #[serde(rename = "2-3-1")]
    TwoThreeOne,
}

impl FormationShape {
    /// Canonical shape code string (e.g., "1-2-1").
    pub fn code(&self) -> &'static str {
        match self {
            FormationShape::TwoTwo => "2-2",
            FormationShape::OneTwoOne => "1-2-1",
            FormationShape::TwoTwoTwo => "2-2-2",
            FormationShape::TwoThreeOne => "2-3-1",
        }
    }

    pub fn fits(&self, format: MatchFormat) -> bool {
        match self {
            FormationShape::TwoTwo | FormationShape::OneTwoOne => {
                format == MatchFormat::FiveVFive
            }
            FormationShape::TwoTwoTwo | FormationShape::TwoThreeOne => {
                format == MatchFormat::SevenVSeven
            }
        }
    }
}

/// Immutable team configuration for one match: format, squad size, and the
/// substitution scheme. Together with the selected shape this determines
/// which formation definition applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamConfig {
    pub format: MatchFormat,
    pub squad_size: u8,
    pub scheme: SubstitutionScheme,
}

impl TeamConfig {
    pub fn new(format: MatchFormat, squad_size: u8, scheme: SubstitutionScheme) -> Self {
        TeamConfig { format, squad_size, scheme }
    }
}
