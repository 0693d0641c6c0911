use crate::models::{BudgetSummary, Expense, Income};

/// Totals for the summary tab. Recomputed from the current rows each time;
/// a negative balance is legitimate output, not an error.
pub fn compute_summary(incomes: &[Income], expenses: &[Expense]) -> BudgetSummary {
    let total_income: f64 = incomes.iter().map(|income| income.amount).sum();
    let total_expenses: f64 = expenses.iter().map(|expense| expense.amount).sum();

    BudgetSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income(amount: f64) -> Income {
        Income {
            id: "i".to_string(),
            source: "allowance".to_string(),
            amount,
            date: None,
            frequency: None,
        }
    }

    fn expense(amount: f64) -> Expense {
        Expense {
            id: "e".to_string(),
            category: "food".to_string(),
            amount,
            date: None,
            note: None,
        }
    }

    #[test]
    fn empty_rows_sum_to_zero() {
        let summary = compute_summary(&[], &[]);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.balance, 0.0);
    }

    #[test]
    fn balance_can_go_negative() {
        let summary = compute_summary(&[income(100.0)], &[expense(60.0), expense(75.5)]);
        assert_eq!(summary.total_income, 100.0);
        assert_eq!(summary.total_expenses, 135.5);
        assert!((summary.balance - (-35.5)).abs() < 1e-9);
    }
}
