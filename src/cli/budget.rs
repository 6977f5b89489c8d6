//! Budget CLI commands
//!
//! Create and edit budget records: category allocations, spending,
//! thresholds and archiving.

use chrono::Local;
use clap::{ArgAction, Subcommand};

use crate::config::Settings;
use crate::display::{format_budget_details, format_budget_list, Palette};
use crate::error::{LajanError, LajanResult};
use crate::models::{AlertThresholds, BudgetCategory, BudgetPeriod, Currency, PeriodKind};
use crate::services::{AnalyticsService, BudgetService, BudgetUpdate};
use crate::storage::Storage;

use super::{parse_amount, print_json};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a new budget
    Create {
        /// Budget name
        name: String,

        /// Period to cover, e.g. "2025-01", "2025-W03", "2025-Q1", "2025"
        #[arg(short, long, conflicts_with = "kind")]
        period: Option<String>,

        /// Cover the current period of this kind (weekly, monthly, quarterly, yearly)
        #[arg(short, long)]
        kind: Option<PeriodKind>,

        /// Currency (HTG or USD)
        #[arg(short, long)]
        currency: Option<Currency>,

        /// Warning threshold in percent
        #[arg(long)]
        warning: Option<f64>,

        /// Critical threshold in percent
        #[arg(long)]
        critical: Option<f64>,
    },

    /// List budgets
    List {
        /// Include archived budgets
        #[arg(short, long)]
        all: bool,
    },

    /// Show a budget and its categories
    Show {
        /// Budget name or ID
        budget: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a budget or change its alert settings
    Update {
        /// Budget name or ID
        budget: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// Warning threshold in percent
        #[arg(long)]
        warning: Option<f64>,

        /// Critical threshold in percent
        #[arg(long)]
        critical: Option<f64>,

        /// Turn alerts on or off
        #[arg(long, action = ArgAction::Set)]
        alerts: Option<bool>,
    },

    /// Set the budgeted amount of a category
    Set {
        /// Budget name or ID
        budget: String,

        /// Category key or name
        category: BudgetCategory,

        /// Amount, e.g. "15000" or "15,000.00"
        amount: String,
    },

    /// Remove a category from a budget
    Remove {
        /// Budget name or ID
        budget: String,

        /// Category key or name
        category: BudgetCategory,
    },

    /// Record spending in a category (negative amounts record refunds)
    Spend {
        /// Budget name or ID
        budget: String,

        /// Category key or name
        category: BudgetCategory,

        /// Amount spent
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Archive a budget (read-only, hidden from lists)
    Archive {
        /// Budget name or ID
        budget: String,
    },

    /// Restore an archived budget
    Unarchive {
        /// Budget name or ID
        budget: String,
    },

    /// Delete a budget permanently
    Delete {
        /// Budget name or ID
        budget: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LajanResult<()> {
    let service = BudgetService::new(storage);
    let palette = Palette::detect();

    match cmd {
        BudgetCommands::Create {
            name,
            period,
            kind,
            currency,
            warning,
            critical,
        } => {
            let period = match period {
                Some(p) => {
                    BudgetPeriod::parse(&p).map_err(|e| LajanError::Validation(e.to_string()))?
                }
                None => kind
                    .unwrap_or(settings.default_period)
                    .period_for(Local::now().date_naive()),
            };

            let defaults = settings.alert_thresholds;
            let thresholds = AlertThresholds::new(
                warning.unwrap_or(defaults.warning()),
                critical.unwrap_or(defaults.critical()),
            );

            let budget = service.create(
                &name,
                &period,
                currency.unwrap_or(settings.default_currency),
                thresholds,
            )?;

            println!("Created budget: {}", budget.name);
            println!("  ID:     {}", budget.id);
            println!(
                "  Period: {} ({} .. {})",
                period, budget.start_date, budget.end_date
            );
            println!("  Currency: {}", budget.currency.code());
        }

        BudgetCommands::List { all } => {
            let budgets = service.list(all)?;
            println!("{}", format_budget_list(&budgets));
        }

        BudgetCommands::Show { budget, json } => {
            let budget = service.resolve(&budget)?;
            if json {
                return print_json(&budget);
            }

            let analytics = AnalyticsService::new(storage);
            let overall = analytics.assess_budget(&budget);
            let report = analytics.category_report(&budget);
            print!(
                "{}",
                format_budget_details(&budget, &overall, &report, &palette)
            );
        }

        BudgetCommands::Update {
            budget,
            name,
            warning,
            critical,
            alerts,
        } => {
            let target = service.resolve(&budget)?;
            let updated = service.update(
                target.id,
                BudgetUpdate {
                    name,
                    warning_threshold: warning,
                    critical_threshold: critical,
                    alerts_enabled: alerts,
                },
            )?;

            let thresholds = updated.alert_settings.thresholds;
            println!("Updated budget: {}", updated.name);
            println!(
                "  Alerts: {} (warning {:.0}%, critical {:.0}%)",
                if updated.alert_settings.enabled { "on" } else { "off" },
                thresholds.warning(),
                thresholds.critical()
            );
        }

        BudgetCommands::Set {
            budget,
            category,
            amount,
        } => {
            let target = service.resolve(&budget)?;
            let amount = parse_amount(&amount)?;
            let before = target.budgeted_for(category);
            let updated = service.adjust_category(target.id, category, amount)?;

            println!(
                "{}: {} -> {} in {}",
                category,
                updated.currency.format(before),
                updated.currency.format(amount),
                updated.name
            );
            println!(
                "  Budget total: {}",
                updated.currency.format(updated.total_budgeted())
            );
        }

        BudgetCommands::Remove { budget, category } => {
            let target = service.resolve(&budget)?;
            let updated = service.remove_category(target.id, category)?;
            println!("Removed {} from {}", category, updated.name);
        }

        BudgetCommands::Spend {
            budget,
            category,
            amount,
        } => {
            let target = service.resolve(&budget)?;
            let amount = parse_amount(&amount)?;
            let updated = service.record_spending(target.id, category, amount)?;

            let verb = if amount.is_negative() {
                "Refunded"
            } else {
                "Recorded"
            };
            println!(
                "{} {} on {} in {}",
                verb,
                updated.currency.format(amount.abs()),
                category,
                updated.name
            );

            let analytics = AnalyticsService::new(storage);
            if let Some(report) = analytics
                .category_report(&updated)
                .into_iter()
                .find(|r| r.category == category)
            {
                println!(
                    "  {} {}",
                    palette.status(report.assessment.status),
                    report.assessment.message
                );
            }
        }

        BudgetCommands::Archive { budget } => {
            let target = service.resolve(&budget)?;
            let archived = service.archive(target.id)?;
            println!("Archived budget: {}", archived.name);
        }

        BudgetCommands::Unarchive { budget } => {
            let target = service.resolve(&budget)?;
            let restored = service.unarchive(target.id)?;
            println!("Unarchived budget: {}", restored.name);
        }

        BudgetCommands::Delete { budget, yes } => {
            let target = service.resolve(&budget)?;
            if !yes {
                return Err(LajanError::Validation(format!(
                    "Deleting '{}' cannot be undone; pass --yes to confirm",
                    target.name
                )));
            }
            let deleted = service.delete(target.id)?;
            println!("Deleted budget: {}", deleted.name);
        }
    }

    Ok(())
}
