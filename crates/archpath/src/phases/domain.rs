use serde::{Deserialize, Serialize};
use std::fmt;

/// Growth stage of a company's architecture challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Mvp,
    Scale1,
    Scale2,
    Enterprise,
}

impl Phase {
    pub const fn ordered() -> [Self; 4] {
        [Self::Mvp, Self::Scale1, Self::Scale2, Self::Enterprise]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mvp" => Some(Self::Mvp),
            "scale1" => Some(Self::Scale1),
            "scale2" => Some(Self::Scale2),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Mvp => "mvp",
            Self::Scale1 => "scale1",
            Self::Scale2 => "scale2",
            Self::Enterprise => "enterprise",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Mvp => "MVP",
            Self::Scale1 => "First Scale",
            Self::Scale2 => "Hyper Growth",
            Self::Enterprise => "Enterprise",
        }
    }

    /// One-based position shown as "Phase N".
    pub const fn number(self) -> u8 {
        match self {
            Self::Mvp => 1,
            Self::Scale1 => 2,
            Self::Scale2 => 3,
            Self::Enterprise => 4,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Mvp => Some(Self::Scale1),
            Self::Scale1 => Some(Self::Scale2),
            Self::Scale2 => Some(Self::Enterprise),
            Self::Enterprise => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Company metadata shown on the menu. Briefs are indexed by [`Phase::number`] - 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub difficulty: Difficulty,
    pub briefs: [&'static str; 4],
}

impl Company {
    pub fn brief(&self, phase: Phase) -> &'static str {
        self.briefs[usize::from(phase.number() - 1)]
    }
}

/// Composite key of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhaseKey {
    pub company: String,
    pub phase: Phase,
}

impl PhaseKey {
    pub fn new(company: impl Into<String>, phase: Phase) -> Self {
        Self {
            company: company.into(),
            phase,
        }
    }
}

/// Required / beneficial / avoid component lists for one (company, phase).
///
/// Lists hold component ids as authored; they are normalized at scoring time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRule {
    pub required: Vec<String>,
    pub beneficial: Vec<String>,
    pub avoid: Vec<String>,
}

impl PhaseRule {
    pub fn new(required: &[&str], beneficial: &[&str], avoid: &[&str]) -> Self {
        let owned = |ids: &[&str]| ids.iter().map(|id| id.to_string()).collect();
        Self {
            required: owned(required),
            beneficial: owned(beneficial),
            avoid: owned(avoid),
        }
    }
}

/// A service group listed in more than one tier of the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleConflict {
    pub company: String,
    pub phase: Phase,
    pub group: String,
    pub tiers: Vec<&'static str>,
}
