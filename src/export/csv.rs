//! CSV export of budgets and their category reports

use std::io::Write;

use serde::Serialize;

use crate::analytics::{assess, classify};
use crate::error::{LajanError, LajanResult};
use crate::models::{Budget, Money};

#[derive(Serialize)]
struct BudgetRecord<'a> {
    id: String,
    name: &'a str,
    period: &'a str,
    start_date: String,
    end_date: String,
    currency: &'a str,
    budgeted: String,
    spent: String,
    remaining: String,
    spent_percentage: u32,
    status: &'a str,
    archived: bool,
}

#[derive(Serialize)]
struct CategoryRecord<'a> {
    budget: &'a str,
    category: &'a str,
    name: &'a str,
    budgeted: String,
    spent: String,
    remaining: String,
    spent_percentage: u32,
    status: &'a str,
    message: String,
}

fn amount(m: Money) -> String {
    format!("{:.2}", m.as_units_f64())
}

fn csv_err(e: csv::Error) -> LajanError {
    LajanError::Export(e.to_string())
}

/// One row per budget with its totals and status
pub fn export_budgets_csv<W: Write>(budgets: &[Budget], writer: W) -> LajanResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for budget in budgets {
        let overall = budget.overall_allocation();
        let status = classify(&overall, &budget.alert_settings.thresholds);
        csv.serialize(BudgetRecord {
            id: budget.id.as_uuid().to_string(),
            name: &budget.name,
            period: budget.period.label(),
            start_date: budget.start_date.to_string(),
            end_date: budget.end_date.to_string(),
            currency: budget.currency.code(),
            budgeted: amount(overall.budgeted),
            spent: amount(overall.spent),
            remaining: amount(overall.remaining()),
            spent_percentage: overall.spent_percentage(),
            status: status.style().label,
            archived: budget.is_archived,
        })
        .map_err(csv_err)?;
    }

    csv.flush().map_err(|e| LajanError::Export(e.to_string()))?;
    Ok(())
}

/// One row per category of a budget
pub fn export_categories_csv<W: Write>(budget: &Budget, writer: W) -> LajanResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let thresholds = &budget.alert_settings.thresholds;

    for entry in budget.category_allocations() {
        let assessment = assess(&entry.allocation, thresholds);
        csv.serialize(CategoryRecord {
            budget: &budget.name,
            category: entry.category.key(),
            name: entry.category.display_name(),
            budgeted: amount(entry.allocation.budgeted),
            spent: amount(entry.allocation.spent),
            remaining: amount(assessment.remaining),
            spent_percentage: assessment.spent_percentage,
            status: assessment.status.style().label,
            message: assessment.message,
        })
        .map_err(csv_err)?;
    }

    csv.flush().map_err(|e| LajanError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, BudgetPeriod, Currency};

    fn sample() -> Budget {
        let mut budget = Budget::new("Janvye, 2025", &BudgetPeriod::monthly(2025, 1), Currency::Htg);
        budget.set_category_amount(BudgetCategory::Alimentation, Money::from_units(15000));
        budget.record_spending(BudgetCategory::Alimentation, Money::from_cents(1_450_050));
        budget.set_category_amount(BudgetCategory::Transport, Money::from_units(5000));
        budget
    }

    #[test]
    fn test_export_budgets_csv() {
        let mut output = Vec::new();
        export_budgets_csv(&[sample()], &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "id,name,period,start_date,end_date,currency,budgeted,spent,remaining,spent_percentage,status,archived"
        );
        // The comma in the name forces quoting
        assert!(lines[1].contains("\"Janvye, 2025\",monthly,2025-01-01,2025-01-31,HTG"));
        assert!(lines[1].contains("20000.00,14500.50,5499.50,73,Healthy,false"));
    }

    #[test]
    fn test_export_categories_csv() {
        let mut output = Vec::new();
        export_categories_csv(&sample(), &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("alimentation,Alimentation,15000.00,14500.50,499.50,97,Critical"));
        assert!(lines[2].contains("transport,Transport,5000.00,0.00,5000.00,0,Healthy,On track: 0% used"));
    }

    #[test]
    fn test_empty_budget_has_no_rows() {
        let budget = Budget::new("Vid", &BudgetPeriod::yearly(2025), Currency::Usd);
        let mut output = Vec::new();
        export_categories_csv(&budget, &mut output).unwrap();
        assert!(output.is_empty());
    }
}
