//! Wallet balance and history derivation.
//!
//! Nothing here is cached. The balance is a fold over whatever transaction
//! list the host hands in, so recomputing from the same list always yields
//! the same numbers, and removing a transaction removes exactly its
//! contribution.

use serde::{Deserialize, Serialize};

use crate::currency::{format_balance, format_coins, Balance};
use crate::transaction::{Transaction, TransactionCategory, TransactionKind};

/// Signed sum of every transaction's contribution. Order-independent.
pub fn balance(transactions: &[Transaction]) -> Balance {
    transactions
        .iter()
        .fold(Balance::ZERO, |total, transaction| total + transaction.signed_amount())
}

/// Type of transaction amount for styling and display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AmountType {
    Positive,
    Negative,
}

/// Represents a formatted transaction for display purposes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedTransaction {
    pub id: String,
    pub formatted_date: String,
    pub description: String,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub category_label: String,
    /// Amount with a leading sign, e.g. "+10 PO" or "-5 PP"
    pub formatted_amount: String,
    pub amount_type: AmountType,
    /// Wallet balance right after this transaction, in chronological order
    pub formatted_balance: String,
    pub running_balance: Balance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerSummary {
    pub balance: Balance,
    pub formatted_balance: String,
    pub transaction_count: usize,
}

pub fn summarize(transactions: &[Transaction]) -> LedgerSummary {
    let balance = balance(transactions);
    LedgerSummary {
        balance,
        formatted_balance: format_balance(&balance),
        transaction_count: transactions.len(),
    }
}

fn format_signed_amount(transaction: &Transaction) -> String {
    let sign = match transaction.kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };
    format!("{}{}", sign, format_coins(&transaction.amount))
}

/// Build history rows, newest first.
///
/// The running balance is accumulated oldest-to-newest (by `created_at`,
/// ties broken by id) and then the rows are reversed for display.
pub fn format_history(transactions: &[Transaction]) -> Vec<FormattedTransaction> {
    let mut chronological: Vec<&Transaction> = transactions.iter().collect();
    chronological.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    let mut running = Balance::ZERO;
    let mut rows: Vec<FormattedTransaction> = chronological
        .into_iter()
        .map(|transaction| {
            running += transaction.signed_amount();
            FormattedTransaction {
                id: transaction.id.clone(),
                formatted_date: transaction.created_at.format("%d/%m/%Y").to_string(),
                description: transaction.description.clone(),
                kind: transaction.kind,
                category: transaction.category,
                category_label: transaction.category.label().to_string(),
                formatted_amount: format_signed_amount(transaction),
                amount_type: match transaction.kind {
                    TransactionKind::Income => AmountType::Positive,
                    TransactionKind::Expense => AmountType::Negative,
                },
                formatted_balance: format_balance(&running),
                running_balance: running,
            }
        })
        .collect();

    rows.reverse();
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Coins;
    use chrono::{TimeZone, Utc};

    fn tx(id: &str, kind: TransactionKind, amount: Coins, minute: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            character_id: "character::1".to_string(),
            kind,
            category: TransactionCategory::Other,
            amount,
            description: format!("tx {}", id),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, minute, 0).unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("a", TransactionKind::Income, Coins::new(10, 0, 0), 0),
            tx("b", TransactionKind::Expense, Coins::new(0, 5, 0), 1),
            tx("c", TransactionKind::Income, Coins::new(0, 2, 30), 2),
            tx("d", TransactionKind::Expense, Coins::new(3, 0, 45), 3),
        ]
    }

    #[test]
    fn test_income_and_expense_scenario() {
        let transactions = vec![
            tx("a", TransactionKind::Income, Coins::new(10, 0, 0), 0),
            tx("b", TransactionKind::Expense, Coins::new(0, 5, 0), 1),
        ];

        let total = balance(&transactions);
        assert_eq!(total, Balance::new(10, -5, 0));
        assert_eq!(format_balance(&total), "10 PO, -5 PP");
    }

    #[test]
    fn test_empty_ledger_is_zero() {
        assert_eq!(balance(&[]), Balance::ZERO);
        assert_eq!(summarize(&[]).formatted_balance, "0 PC");
    }

    #[test]
    fn test_balance_is_order_independent() {
        let transactions = sample();
        let expected = balance(&transactions);

        let mut reversed = transactions.clone();
        reversed.reverse();
        assert_eq!(balance(&reversed), expected);

        for rotation in 0..transactions.len() {
            let mut rotated = transactions.clone();
            rotated.rotate_left(rotation);
            assert_eq!(balance(&rotated), expected);
        }

        let mut swapped = transactions.clone();
        swapped.swap(0, 2);
        assert_eq!(balance(&swapped), expected);
    }

    #[test]
    fn test_append_changes_balance_by_signed_amount() {
        let base = sample();
        let before = balance(&base);

        for extra in [
            tx("e", TransactionKind::Income, Coins::new(1, 2, 3), 10),
            tx("f", TransactionKind::Expense, Coins::new(4, 0, 6), 11),
        ] {
            let mut appended = base.clone();
            appended.push(extra.clone());
            let delta = balance(&appended) - before;

            let amount = Balance::from(extra.amount);
            let expected = if extra.kind == TransactionKind::Income { amount } else { -amount };
            assert_eq!(delta, expected);
        }
    }

    #[test]
    fn test_delete_is_exact_inverse_of_append() {
        let base = sample();
        let extra = tx("e", TransactionKind::Expense, Coins::new(100, 0, 0), 10);

        let mut appended = base.clone();
        appended.push(extra.clone());
        appended.retain(|t| t.id != extra.id);

        assert_eq!(balance(&appended), balance(&base));
    }

    #[test]
    fn test_recomputing_yields_same_result() {
        let transactions = sample();
        assert_eq!(balance(&transactions), balance(&transactions));
        assert_eq!(summarize(&transactions).transaction_count, 4);
    }

    #[test]
    fn test_history_is_newest_first_with_running_balance() {
        let mut transactions = sample();
        transactions.swap(0, 3);

        let rows = format_history(&transactions);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c", "b", "a"]);

        assert_eq!(rows[3].formatted_balance, "10 PO");
        assert_eq!(rows[2].formatted_balance, "10 PO, -5 PP");
        assert_eq!(rows[1].formatted_balance, "10 PO, -3 PP, 30 PC");
        assert_eq!(rows[0].formatted_balance, "7 PO, -3 PP, -15 PC");
        assert_eq!(rows[0].running_balance, balance(&transactions));
    }

    #[test]
    fn test_history_row_formatting() {
        let rows = format_history(&sample());
        let expense = rows.iter().find(|r| r.id == "b").unwrap();

        assert_eq!(expense.formatted_amount, "-5 PP");
        assert_eq!(expense.amount_type, AmountType::Negative);
        assert_eq!(expense.formatted_date, "01/06/2025");
        assert_eq!(expense.category_label, "Other");

        let income = rows.iter().find(|r| r.id == "a").unwrap();
        assert_eq!(income.formatted_amount, "+10 PO");
        assert_eq!(income.amount_type, AmountType::Positive);
    }

    #[test]
    fn test_history_ties_are_broken_by_id() {
        let transactions = vec![
            tx("z", TransactionKind::Income, Coins::new(1, 0, 0), 0),
            tx("m", TransactionKind::Income, Coins::new(0, 1, 0), 0),
        ];
        let rows = format_history(&transactions);
        assert_eq!(rows[0].id, "z");
        assert_eq!(rows[1].id, "m");
        assert_eq!(rows[1].formatted_balance, "1 PP");
    }
}
