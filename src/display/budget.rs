//! Budget display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::analytics::{classify, StatusAssessment};
use crate::models::Budget;
use crate::services::CategoryReport;

use super::{status_bar, Palette};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format budgets as a table
pub fn format_budget_list(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n\nCreate one with 'lajan budget create <NAME>'.".to_string();
    }

    let rows: Vec<BudgetRow> = budgets
        .iter()
        .map(|b| {
            let overall = b.overall_allocation();
            let status = classify(&overall, &b.alert_settings.thresholds);
            let mut state = status.style().label.to_string();
            if b.is_archived {
                state.push_str(" (archived)");
            }
            BudgetRow {
                id: b.id.short(),
                name: b.name.clone(),
                period: b.period.to_string(),
                window: format!("{} .. {}", b.start_date, b.end_date),
                budgeted: b.currency.format(overall.budgeted),
                spent: b.currency.format(overall.spent),
                used: format!("{}%", overall.spent_percentage()),
                status: state,
            }
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(4..7)).with(Alignment::right()))
        .to_string()
}

/// Format one budget with its category breakdown
pub fn format_budget_details(
    budget: &Budget,
    overall: &StatusAssessment,
    report: &[CategoryReport],
    palette: &Palette,
) -> String {
    let mut output = String::new();
    let fmt = |m| budget.currency.format(m);

    output.push_str(&palette.heading(&format!("Budget: {}", budget.name)));
    output.push('\n');
    output.push_str(&format!("  ID:       {}\n", budget.id));
    output.push_str(&format!(
        "  Period:   {} ({} .. {})\n",
        budget.period, budget.start_date, budget.end_date
    ));
    output.push_str(&format!("  Currency: {}\n", budget.currency.code()));
    output.push_str(&format!("  State:    {}", budget.status));
    if budget.is_archived {
        output.push_str(", archived");
    }
    output.push('\n');

    let thresholds = &budget.alert_settings.thresholds;
    output.push_str(&format!(
        "  Alerts:   {} (warning {:.0}%, critical {:.0}%)\n",
        if budget.alert_settings.enabled { "on" } else { "off" },
        thresholds.warning(),
        thresholds.critical()
    ));

    let total = budget.overall_allocation();
    output.push('\n');
    output.push_str(&format!(
        "  {} {} {}\n",
        status_bar(palette, overall.status, overall.spent_percentage),
        palette.status(overall.status),
        overall.message
    ));
    output.push_str(&format!(
        "  Spent {} of {}, {} remaining\n",
        fmt(total.spent),
        fmt(total.budgeted),
        fmt(overall.remaining)
    ));

    output.push('\n');
    if report.is_empty() {
        output.push_str(&palette.dim(
            "No categories yet. Allocate with 'lajan budget set <BUDGET> <CATEGORY> <AMOUNT>'.",
        ));
        output.push('\n');
        return output;
    }

    let rows: Vec<CategoryRow> = report
        .iter()
        .map(|r| CategoryRow {
            category: r.category.display_name().to_string(),
            budgeted: fmt(r.allocation.budgeted),
            spent: fmt(r.allocation.spent),
            remaining: fmt(r.allocation.remaining()),
            used: format!("{}%", r.assessment.spent_percentage),
            status: format!(
                "{} {}",
                r.assessment.status.style().icon,
                r.assessment.status.style().label
            ),
        })
        .collect();

    output.push_str(
        &Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..5)).with(Alignment::right()))
            .to_string(),
    );
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::assess;
    use crate::models::{BudgetCategory, BudgetPeriod, Currency, Money};
    use crate::services::CategoryReport;

    fn sample() -> Budget {
        let mut budget = Budget::new("Janvye", &BudgetPeriod::monthly(2025, 1), Currency::Htg);
        budget.set_category_amount(BudgetCategory::Alimentation, Money::from_units(15000));
        budget.record_spending(BudgetCategory::Alimentation, Money::from_units(14500));
        budget.set_category_amount(BudgetCategory::Transport, Money::from_units(5000));
        budget
    }

    fn report(budget: &Budget) -> Vec<CategoryReport> {
        budget
            .category_allocations()
            .into_iter()
            .map(|c| CategoryReport {
                category: c.category,
                allocation: c.allocation,
                assessment: assess(&c.allocation, &budget.alert_settings.thresholds),
            })
            .collect()
    }

    #[test]
    fn test_empty_list() {
        assert!(format_budget_list(&[]).contains("No budgets found"));
    }

    #[test]
    fn test_list_table() {
        let output = format_budget_list(&[sample()]);
        assert!(output.contains("Janvye"));
        assert!(output.contains("monthly"));
        assert!(output.contains("G 20000.00"));
        assert!(output.contains("73%"));
        assert!(output.contains("Healthy"));
    }

    #[test]
    fn test_details() {
        let budget = sample();
        let overall = assess(&budget.overall_allocation(), &budget.alert_settings.thresholds);
        let output = format_budget_details(&budget, &overall, &report(&budget), &Palette::plain());

        assert!(output.contains("Budget: Janvye"));
        assert!(output.contains("2025-01-01 .. 2025-01-31"));
        assert!(output.contains("On track: 73% used"));
        assert!(output.contains("Alimentation"));
        assert!(output.contains("⚠ Critical"));
        assert!(output.contains("G 500.00"));
    }

    #[test]
    fn test_details_without_categories() {
        let budget = Budget::new("Vid", &BudgetPeriod::yearly(2025), Currency::Usd);
        let overall = assess(&budget.overall_allocation(), &budget.alert_settings.thresholds);
        let output = format_budget_details(&budget, &overall, &[], &Palette::plain());
        assert!(output.contains("No categories yet"));
        assert!(output.contains("$ 0.00"));
    }
}
