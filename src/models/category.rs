//! Budget category enumeration
//!
//! Categories form a closed set. Each carries a fixed display name and a
//! colour used by every view that shows it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A spending category a budget can allocate to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Alimentation,
    Transport,
    Logement,
    Sante,
    Education,
    Loisirs,
    Factures,
    Vetements,
    Epargne,
    Investment,
    Sol,
    Other,
}

impl BudgetCategory {
    /// All categories in display order
    pub fn all() -> &'static [BudgetCategory] {
        &[
            Self::Alimentation,
            Self::Transport,
            Self::Logement,
            Self::Sante,
            Self::Education,
            Self::Loisirs,
            Self::Factures,
            Self::Vetements,
            Self::Epargne,
            Self::Investment,
            Self::Sol,
            Self::Other,
        ]
    }

    /// Storage key, as used in budget records
    pub fn key(&self) -> &'static str {
        match self {
            Self::Alimentation => "alimentation",
            Self::Transport => "transport",
            Self::Logement => "logement",
            Self::Sante => "sante",
            Self::Education => "education",
            Self::Loisirs => "loisirs",
            Self::Factures => "factures",
            Self::Vetements => "vetements",
            Self::Epargne => "epargne",
            Self::Investment => "investment",
            Self::Sol => "sol",
            Self::Other => "other",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Alimentation => "Alimentation",
            Self::Transport => "Transport",
            Self::Logement => "Logement",
            Self::Sante => "Santé",
            Self::Education => "Éducation",
            Self::Loisirs => "Loisirs",
            Self::Factures => "Factures",
            Self::Vetements => "Vêtements",
            Self::Epargne => "Épargne",
            Self::Investment => "Investissement",
            Self::Sol => "Sol",
            Self::Other => "Autre",
        }
    }

    /// Display colour as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            Self::Alimentation => "#10B981",
            Self::Transport => "#3B82F6",
            Self::Logement => "#8B5CF6",
            Self::Sante => "#EF4444",
            Self::Education => "#F59E0B",
            Self::Loisirs => "#EC4899",
            Self::Factures => "#6366F1",
            Self::Vetements => "#14B8A6",
            Self::Epargne => "#22C55E",
            Self::Investment => "#0EA5E9",
            Self::Sol => "#F97316",
            Self::Other => "#6B7280",
        }
    }

    /// Display colour as an RGB triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fold accented characters so "Santé" and "sante" compare equal
fn fold(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'à' | 'â' => 'a',
            'ò' | 'ô' => 'o',
            'î' | 'ï' => 'i',
            'ù' | 'û' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

impl FromStr for BudgetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = fold(s);
        Self::all()
            .iter()
            .copied()
            .find(|c| c.key() == needle || fold(c.display_name()) == needle)
            .ok_or_else(|| format!("Unknown category: {}", s.trim()))
    }
}
