use std::fmt;

use sheria_client::domain::TrustStatementLine;

use crate::money::format_currency;

const HEADERS: [&str; 5] = ["Date", "Type", "Description", "Amount", "Balance"];

#[derive(Debug, Clone, PartialEq)]
pub struct StatementRow {
    pub date: String,
    pub transaction_type: String,
    pub description: String,
    pub amount: String,
    pub balance: String,
}

/// A trust account statement, formatted and ready to show.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementView {
    pub title: String,
    pub rows: Vec<StatementRow>,
}

impl StatementView {
    pub fn new(lines: &[TrustStatementLine], currency: &str) -> Self {
        let rows = lines
            .iter()
            .map(|line| StatementRow {
                date: line.transaction_date.format("%d-%m-%Y").to_string(),
                transaction_type: line.transaction_type.to_string(),
                description: line.description.clone().unwrap_or_default(),
                amount: format_currency(line.amount, currency),
                balance: line
                    .balance()
                    .map(|b| format_currency(b, currency))
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            title: "Trust Account Statement".to_string(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl StatementRow {
    fn cells(&self) -> [&str; 5] {
        [
            &self.date,
            &self.transaction_type,
            &self.description,
            &self.amount,
            &self.balance,
        ]
    }
}

impl fmt::Display for StatementView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = HEADERS.map(str::len);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        writeln!(f, "{}", self.title)?;
        write_row(f, &HEADERS, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &self.rows {
            write_row(f, &row.cells(), &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[&str; 5], widths: &[usize; 5]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            // amounts line up on the right
            if i >= 3 {
                format!("{:>width$}", cell, width = *width)
            } else {
                format!("{:<width$}", cell, width = *width)
            }
        })
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sheria_client::domain::TransactionType;

    use super::*;

    fn line(day: u32, kind: TransactionType, amount: f64, running: Option<f64>) -> TrustStatementLine {
        TrustStatementLine {
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            transaction_type: kind,
            amount,
            description: Some(format!("{} on the {}", kind, day)),
            reference: None,
            balance_after: Some(amount),
            running_balance: running,
        }
    }

    #[test]
    fn rows_are_formatted_for_display() {
        let view = StatementView::new(
            &[
                line(1, TransactionType::Deposit, 5000.0, Some(5000.0)),
                line(4, TransactionType::Withdrawal, 1200.0, None),
            ],
            "KES",
        );

        assert_eq!(view.rows[0].date, "01-03-2024");
        assert_eq!(view.rows[0].balance, "KES 5,000.00");
        assert_eq!(view.rows[1].transaction_type, "Withdrawal");
        assert_eq!(view.rows[1].balance, "KES 1,200.00");
    }

    #[test]
    fn table_has_header_rule_and_one_line_per_row() {
        let view = StatementView::new(&[line(1, TransactionType::Deposit, 10.0, Some(10.0))], "KES");
        let rendered = view.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Trust Account Statement");
        assert!(lines[1].starts_with("Date"));
        assert!(lines[2].starts_with("---"));
        assert!(lines[3].contains("KES 10.00"));
        assert_eq!(lines.len(), 4);
    }
}
