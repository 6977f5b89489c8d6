//! Supported currencies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Currency of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Haitian gourde
    #[default]
    Htg,
    /// US dollar
    Usd,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Htg => "HTG",
            Self::Usd => "USD",
        }
    }

    /// Symbol used when formatting amounts
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Htg => "G",
            Self::Usd => "$",
        }
    }

    /// Format an amount in this currency, e.g. "G 1500.00"
    pub fn format(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{} {}", self.symbol(), amount.abs())
        } else {
            format!("{} {}", self.symbol(), amount)
        }
    }

    pub fn all() -> &'static [Currency] {
        &[Self::Htg, Self::Usd]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HTG" | "G" | "GOURDE" | "GOURDES" => Ok(Self::Htg),
            "USD" | "$" | "DOLLAR" | "DOLLARS" => Ok(Self::Usd),
            other => Err(format!("Unsupported currency: {}", other)),
        }
    }
}
