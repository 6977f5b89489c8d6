//! Analysis CLI commands
//!
//! Read-only views: statistics, alerts, suggestions and reallocation
//! previews. None of these change a budget.

use clap::Subcommand;

use crate::display::{format_alerts, format_simulation, format_stats, format_suggestions, Palette};
use crate::error::LajanResult;
use crate::models::BudgetCategory;
use crate::services::{AnalyticsService, BudgetService};
use crate::storage::Storage;

use super::{parse_amount, print_json};

/// Analysis subcommands
#[derive(Subcommand)]
pub enum AnalyzeCommands {
    /// Totals, status counts, pace and projection for a budget
    Stats {
        /// Budget name or ID
        budget: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Categories at warning level or worse
    Alerts {
        /// Budget name or ID (defaults to every current budget)
        budget: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest a new amount for a category
    Suggest {
        /// Budget name or ID
        budget: String,

        /// Category key or name
        category: BudgetCategory,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview the effect of a new category amount without saving it
    Simulate {
        /// Budget name or ID
        budget: String,

        /// Category key or name
        category: BudgetCategory,

        /// Proposed amount
        amount: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle an analyze command
pub fn handle_analyze_command(storage: &Storage, cmd: AnalyzeCommands) -> LajanResult<()> {
    let budgets = BudgetService::new(storage);
    let analytics = AnalyticsService::new(storage);
    let palette = Palette::detect();

    match cmd {
        AnalyzeCommands::Stats { budget, json } => {
            let budget = budgets.resolve(&budget)?;
            let stats = analytics.stats(&budget);
            if json {
                return print_json(&stats);
            }
            print!("{}", format_stats(&budget, &stats, &palette));
        }

        AnalyzeCommands::Alerts { budget, json } => {
            let groups = match budget {
                Some(identifier) => {
                    let budget = budgets.resolve(&identifier)?;
                    let alerts = analytics.alerts(&budget);
                    vec![(budget, alerts)]
                }
                None => analytics.current_alerts()?,
            };

            if json {
                let flat: Vec<_> = groups
                    .iter()
                    .flat_map(|(b, alerts)| {
                        alerts.iter().map(move |a| {
                            serde_json::json!({
                                "budgetId": b.id.as_uuid(),
                                "budget": b.name,
                                "alert": a,
                            })
                        })
                    })
                    .collect();
                return print_json(&flat);
            }
            println!("{}", format_alerts(&groups, &palette));
        }

        AnalyzeCommands::Suggest {
            budget,
            category,
            json,
        } => {
            let budget = budgets.resolve(&budget)?;
            let suggestions = analytics.suggest(&budget, category)?;
            if json {
                return print_json(&suggestions);
            }
            print!("{}", format_suggestions(&budget, category, &suggestions));
        }

        AnalyzeCommands::Simulate {
            budget,
            category,
            amount,
            json,
        } => {
            let budget = budgets.resolve(&budget)?;
            let amount = parse_amount(&amount)?;
            let result = analytics.preview(&budget, category, amount);
            if json {
                return print_json(&result);
            }
            print!("{}", format_simulation(&budget, &result, &palette));
        }
    }

    Ok(())
}
