//! Report export assembly.
//!
//! Both exporters consume the already-assembled report value and never go
//! back to storage, so an exported file always matches what the report
//! screen showed. The CSV keeps raw numerics; the printable text applies
//! rupee formatting with en-IN digit grouping.

use anyhow::Result;
use rust_decimal::Decimal;

use shared::ReportData;

/// Flatten the report into one CSV document.
///
/// Single fixed header; income and expense rows leave the month columns
/// blank, monthly rows leave the category columns blank and carry the
/// month's income in the amount column.
pub fn report_to_csv(report: &ReportData) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Type",
        "Category",
        "Transactions",
        "Amount",
        "Percentage",
        "Month",
        "Balance",
    ])?;

    for (kind, rows) in [
        ("Income", &report.income_report),
        ("Expense", &report.expense_report),
    ] {
        for row in rows {
            let count = row.count.to_string();
            let amount = row.amount.to_string();
            let percentage = row.percentage.to_string();
            writer.write_record([
                kind,
                row.category.as_str(),
                count.as_str(),
                amount.as_str(),
                percentage.as_str(),
                "",
                "",
            ])?;
        }
    }
    for row in &report.monthly_breakdown {
        let income = row.income.to_string();
        let balance = row.balance.to_string();
        writer.write_record([
            "Monthly",
            "",
            "",
            income.as_str(),
            "",
            row.month.as_str(),
            balance.as_str(),
        ])?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Render the printable report: a title plus one section per populated
/// report part, each line carrying rupee-formatted amounts.
pub fn report_to_text(report: &ReportData) -> String {
    let mut out = String::from("Financial Report\n");

    if !report.income_report.is_empty() {
        out.push_str("\nIncome Report\n");
        for row in &report.income_report {
            out.push_str(&format!(
                "{} | Transactions: {} | Amount: {} | {}%\n",
                row.category,
                row.count,
                format_inr(row.amount),
                row.percentage
            ));
        }
    }

    if !report.expense_report.is_empty() {
        out.push_str("\nExpense Report\n");
        for row in &report.expense_report {
            out.push_str(&format!(
                "{} | Transactions: {} | Amount: {} | {}%\n",
                row.category,
                row.count,
                format_inr(row.amount),
                row.percentage
            ));
        }
    }

    if !report.monthly_breakdown.is_empty() {
        out.push_str("\nMonthly Breakdown\n");
        for row in &report.monthly_breakdown {
            out.push_str(&format!(
                "{} | Income: {} | Expense: {} | Balance: {}\n",
                row.month,
                format_inr(row.income),
                format_inr(row.expense),
                format_inr(row.balance)
            ));
        }
    }

    out
}

/// Rupee-format an amount with en-IN grouping: the last three integer
/// digits form one group, every group above that has two digits. Trailing
/// fractional zeros are dropped.
pub fn format_inr(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let text = normalized.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    let len = digits.len();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 {
            let from_right = len - i;
            // boundaries sit at 3, then every 2 after that
            if from_right == 3 || (from_right > 3 && (from_right - 3) % 2 == 0) {
                grouped.push(',');
            }
        }
        grouped.push(*ch);
    }

    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}₹{grouped}.{frac}"),
        None => format!("{sign}₹{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::{BalanceTrendChart, CategoryChart, CategoryReportRow, MonthlyReportRow};

    fn sample_report() -> ReportData {
        ReportData {
            total_income: dec!(1000.00),
            total_expense: dec!(500.00),
            net_balance: dec!(500.00),
            savings_rate: dec!(50.00),
            income_report: vec![CategoryReportRow {
                category: "Salary".to_string(),
                count: 1,
                amount: dec!(1000.00),
                percentage: dec!(100.00),
            }],
            expense_report: vec![
                CategoryReportRow {
                    category: "Food".to_string(),
                    count: 2,
                    amount: dec!(300.00),
                    percentage: dec!(60.00),
                },
                CategoryReportRow {
                    category: "Rent".to_string(),
                    count: 1,
                    amount: dec!(200.00),
                    percentage: dec!(40.00),
                },
            ],
            monthly_breakdown: vec![MonthlyReportRow {
                month: "Jan 2025".to_string(),
                income: dec!(1000.00),
                expense: dec!(500.00),
                balance: dec!(500.00),
            }],
            top_categories: CategoryChart {
                labels: vec!["Food".to_string(), "Rent".to_string()],
                data: vec![dec!(300.00), dec!(200.00)],
            },
            balance_trend: BalanceTrendChart {
                labels: vec!["Jan 2025".to_string()],
                income: vec![dec!(1000.00)],
                expense: vec![dec!(500.00)],
                balance: vec![dec!(500.00)],
            },
        }
    }

    #[test]
    fn csv_has_one_header_and_typed_rows() {
        let csv = report_to_csv(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Type,Category,Transactions,Amount,Percentage,Month,Balance"
        );
        assert_eq!(lines[1], "Income,Salary,1,1000.00,100.00,,");
        assert_eq!(lines[2], "Expense,Food,2,300.00,60.00,,");
        assert_eq!(lines[3], "Expense,Rent,1,200.00,40.00,,");
        assert_eq!(lines[4], "Monthly,,,1000.00,,Jan 2025,500.00");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn printable_text_sections_appear_in_order() {
        let text = report_to_text(&sample_report());

        let title = text.find("Financial Report").unwrap();
        let income = text.find("Income Report").unwrap();
        let expense = text.find("Expense Report").unwrap();
        let monthly = text.find("Monthly Breakdown").unwrap();
        assert!(title < income && income < expense && expense < monthly);
        assert!(text.contains("Salary | Transactions: 1 | Amount: ₹1,000 | 100.00%"));
        assert!(text.contains("Jan 2025 | Income: ₹1,000 | Expense: ₹500 | Balance: ₹500"));
    }

    #[test]
    fn empty_sections_are_omitted_from_printable_text() {
        let mut report = sample_report();
        report.income_report.clear();

        let text = report_to_text(&report);
        assert!(!text.contains("Income Report"));
        assert!(text.contains("Expense Report"));
    }

    #[test]
    fn inr_grouping_uses_two_digit_groups_above_thousands() {
        assert_eq!(format_inr(dec!(0)), "₹0");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000");
        assert_eq!(format_inr(dec!(12345678.90)), "₹1,23,45,678.9");
        assert_eq!(format_inr(dec!(-4500.25)), "-₹4,500.25");
    }
}
