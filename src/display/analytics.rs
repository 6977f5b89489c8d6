//! Formatting for analysis views: statistics, alerts, suggestions,
//! reallocation previews, the category catalogue and the audit trail

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::analytics::{BudgetAlert, BudgetStats, SimulationResult, Suggestion};
use crate::audit::AuditEntry;
use crate::models::{Budget, BudgetCategory, Money};

use super::{status_bar, Palette};

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "New amount")]
    new_amount: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

#[derive(Tabled)]
struct CategoryCatalogueRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Colour")]
    color: &'static str,
}

fn signed(budget: &Budget, amount: Money) -> String {
    if amount.is_negative() {
        budget.currency.format(amount)
    } else {
        format!("+{}", budget.currency.format(amount))
    }
}

/// Format budget statistics
pub fn format_stats(budget: &Budget, stats: &BudgetStats, palette: &Palette) -> String {
    let fmt = |m| budget.currency.format(m);
    let mut output = String::new();

    output.push_str(&palette.heading(&format!("Statistics: {}", budget.name)));
    output.push('\n');
    output.push_str(&format!(
        "  {} {} {}% used\n",
        status_bar(palette, stats.status, stats.spent_percentage),
        palette.status(stats.status),
        stats.spent_percentage
    ));
    output.push_str(&format!("  Budgeted:   {}\n", fmt(stats.total_budgeted)));
    output.push_str(&format!("  Spent:      {}\n", fmt(stats.total_spent)));
    output.push_str(&format!("  Remaining:  {}\n", fmt(stats.remaining)));

    output.push('\n');
    output.push_str(&format!(
        "  Days:       {} of {} elapsed, {} left\n",
        stats.days_elapsed, stats.days_total, stats.days_remaining
    ));
    output.push_str(&format!(
        "  Per day:    {} spent on average, {} available\n",
        fmt(stats.average_daily_spend),
        fmt(stats.daily_allowance)
    ));
    output.push_str(&format!("  Projected:  {}", fmt(stats.projected_spend)));
    if stats.is_projected_over() {
        output.push_str(&format!(
            " ({})",
            palette.tone(
                &format!("over by {}", fmt(stats.projected_overrun)),
                crate::analytics::Tone::Danger
            )
        ));
    }
    output.push('\n');

    output.push('\n');
    output.push_str("  Categories:");
    for status in crate::analytics::BudgetStatus::all() {
        output.push_str(&format!(
            " {} {}",
            stats.status_counts.get(*status),
            status.style().label.to_lowercase()
        ));
    }
    output.push('\n');

    if !stats.top_spending.is_empty() {
        output.push_str("  Top spending:\n");
        for (i, entry) in stats.top_spending.iter().enumerate() {
            output.push_str(&format!(
                "    {}. {} {} ({}%)\n",
                i + 1,
                palette.category(entry.category),
                fmt(entry.spent),
                entry.spent_percentage
            ));
        }
    }

    output
}

/// Format alerts grouped by budget
pub fn format_alerts(groups: &[(Budget, Vec<BudgetAlert>)], palette: &Palette) -> String {
    if groups.iter().all(|(_, alerts)| alerts.is_empty()) {
        return "No alerts. Every category is within its thresholds.".to_string();
    }

    let mut output = String::new();
    for (budget, alerts) in groups.iter().filter(|(_, a)| !a.is_empty()) {
        output.push_str(&palette.heading(&format!("{} ({})", budget.name, budget.id)));
        output.push('\n');
        for alert in alerts {
            output.push_str(&format!(
                "  {} {}: {}\n",
                palette.status(alert.status),
                palette.category(alert.category),
                alert.message
            ));
        }
    }
    output
}

/// Format suggestions for one category
pub fn format_suggestions(
    budget: &Budget,
    category: BudgetCategory,
    suggestions: &[Suggestion],
) -> String {
    let current = budget.budgeted_for(category);
    let mut output = format!(
        "{} in {}: {} budgeted, {} spent\n\n",
        category.display_name(),
        budget.name,
        budget.currency.format(current),
        budget.currency.format(budget.spent_for(category))
    );

    if suggestions.is_empty() {
        output.push_str("No adjustment suggested.\n");
        return output;
    }

    let rows: Vec<SuggestionRow> = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| SuggestionRow {
            index: i + 1,
            new_amount: budget.currency.format(s.new_amount),
            change: signed(budget, s.new_amount - current),
            confidence: s.confidence.to_string(),
            reason: s.reason.clone(),
        })
        .collect();

    output.push_str(
        &Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
            .to_string(),
    );
    output.push_str(&format!(
        "\n\nApply one with 'lajan budget set {} {} <AMOUNT>'.\n",
        budget.id,
        category.key()
    ));
    output
}

/// Format a reallocation preview
pub fn format_simulation(budget: &Budget, result: &SimulationResult, palette: &Palette) -> String {
    let fmt = |m| budget.currency.format(m);
    let mut output = String::new();

    output.push_str(&palette.heading(&format!(
        "Preview: {} {} -> {}",
        result.category.display_name(),
        fmt(result.current_amount),
        fmt(result.new_amount)
    )));
    output.push('\n');

    if result.is_noop() {
        output.push_str("  No change.\n");
        return output;
    }

    output.push_str(&format!(
        "  Budget total:  {} ({}, {:+.1}%)\n",
        fmt(result.new_total),
        signed(budget, result.total_change),
        result.total_change_percentage
    ));
    output.push_str(&format!(
        "  Category use:  {}% of the new amount\n",
        result.new_utilization
    ));
    output.push_str(&format!(
        "  Budget use:    {}% of the new total\n",
        result.new_total_utilization
    ));
    output.push_str(&format!(
        "  Status:        {} -> {}\n",
        palette.status(result.current_status),
        palette.status(result.new_status)
    ));
    output.push_str(&palette.dim("  Nothing was changed."));
    output.push('\n');

    output
}

/// Format the category catalogue
pub fn format_categories() -> String {
    let rows: Vec<CategoryCatalogueRow> = BudgetCategory::all()
        .iter()
        .map(|c| CategoryCatalogueRow {
            key: c.key(),
            name: c.display_name(),
            color: c.color(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format audit entries, oldest first
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "Audit log is empty.".to_string();
    }

    entries
        .iter()
        .map(AuditEntry::format_human_readable)
        .collect::<Vec<_>>()
        .join("\n")
}
