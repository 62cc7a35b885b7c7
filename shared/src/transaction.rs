use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::currency::{Balance, Coins};

/// Transaction ID in format: "transaction::<income|expense>::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// ID of the character whose wallet this transaction belongs to
    pub character_id: String,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    /// Coins moved by this transaction (always non-negative, sign comes from `kind`)
    pub amount: Coins,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Coins gained
    Income,
    /// Coins spent
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    /// +1 for income, -1 for expense
    pub fn sign(&self) -> i64 {
        match self {
            TransactionKind::Income => 1,
            TransactionKind::Expense => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Loot,
    Reward,
    Sale,
    Purchase,
    Service,
    Other,
}

const INCOME_CATEGORIES: [TransactionCategory; 4] = [
    TransactionCategory::Loot,
    TransactionCategory::Reward,
    TransactionCategory::Sale,
    TransactionCategory::Other,
];

const EXPENSE_CATEGORIES: [TransactionCategory; 3] = [
    TransactionCategory::Purchase,
    TransactionCategory::Service,
    TransactionCategory::Other,
];

/// The fixed set of categories a transaction of `kind` may use.
pub fn category_options_for(kind: TransactionKind) -> &'static [TransactionCategory] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

impl TransactionCategory {
    /// Category a draft falls back to when its kind changes
    pub fn default_for(_kind: TransactionKind) -> Self {
        TransactionCategory::Other
    }

    pub fn is_valid_for(&self, kind: TransactionKind) -> bool {
        category_options_for(kind).contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Loot => "loot",
            TransactionCategory::Reward => "reward",
            TransactionCategory::Sale => "sale",
            TransactionCategory::Purchase => "purchase",
            TransactionCategory::Service => "service",
            TransactionCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionCategory::Loot => "Loot",
            TransactionCategory::Reward => "Reward",
            TransactionCategory::Sale => "Sale",
            TransactionCategory::Purchase => "Purchase",
            TransactionCategory::Service => "Service",
            TransactionCategory::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "loot" => Some(TransactionCategory::Loot),
            "reward" => Some(TransactionCategory::Reward),
            "sale" => Some(TransactionCategory::Sale),
            "purchase" => Some(TransactionCategory::Purchase),
            "service" => Some(TransactionCategory::Service),
            "other" => Some(TransactionCategory::Other),
            _ => None,
        }
    }
}

/// Fully-formed creation payload handed to the host's append operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub character_id: String,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub amount: Coins,
    /// Trimmed, non-empty description (max 256 characters)
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTransactionRequest {
    pub character_id: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
}

impl Transaction {
    /// Generate a transaction ID for the given kind
    pub fn generate_id(kind: TransactionKind) -> String {
        format!("transaction::{}::{}", kind, Uuid::new_v4())
    }

    /// Parse a transaction ID and return the kind and unique part
    pub fn parse_id(id: &str) -> Result<(TransactionKind, String), TransactionIdError> {
        let parts: Vec<&str> = id.splitn(3, "::").collect();
        if parts.len() != 3 || parts[0] != "transaction" {
            return Err(TransactionIdError::InvalidFormat);
        }

        let kind = TransactionKind::parse(parts[1]).ok_or(TransactionIdError::InvalidKind)?;
        if parts[2].is_empty() {
            return Err(TransactionIdError::InvalidFormat);
        }

        Ok((kind, parts[2].to_string()))
    }

    /// Mint a transaction from a creation payload. Used by hosts that keep
    /// the ledger locally instead of behind an API.
    pub fn from_request(request: CreateTransactionRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Self::generate_id(request.kind),
            character_id: request.character_id,
            kind: request.kind,
            category: request.category,
            amount: request.amount,
            description: request.description,
            created_at,
        }
    }

    /// This transaction's contribution to the wallet balance
    pub fn signed_amount(&self) -> Balance {
        let amount = Balance::from(self.amount);
        match self.kind {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionIdError {
    #[error("Invalid transaction ID format")]
    InvalidFormat,
    #[error("Invalid transaction kind in ID")]
    InvalidKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_transaction_id() {
        let income_id = Transaction::generate_id(TransactionKind::Income);
        assert!(income_id.starts_with("transaction::income::"));

        let expense_id = Transaction::generate_id(TransactionKind::Expense);
        assert!(expense_id.starts_with("transaction::expense::"));

        assert_ne!(income_id, Transaction::generate_id(TransactionKind::Income));
    }

    #[test]
    fn test_parse_transaction_id() {
        let (kind, rest) = Transaction::parse_id("transaction::expense::abc").unwrap();
        assert_eq!(kind, TransactionKind::Expense);
        assert_eq!(rest, "abc");

        assert_eq!(
            Transaction::parse_id("transaction::refund::abc"),
            Err(TransactionIdError::InvalidKind)
        );
        assert_eq!(
            Transaction::parse_id("goal::income::abc"),
            Err(TransactionIdError::InvalidFormat)
        );
        assert_eq!(
            Transaction::parse_id("transaction::income::"),
            Err(TransactionIdError::InvalidFormat)
        );
        assert_eq!(Transaction::parse_id("nonsense"), Err(TransactionIdError::InvalidFormat));
    }

    #[test]
    fn test_category_sets_share_only_other() {
        let income = category_options_for(TransactionKind::Income);
        let expense = category_options_for(TransactionKind::Expense);

        assert!(!income.is_empty());
        assert!(!expense.is_empty());

        let shared: Vec<_> = income.iter().filter(|c| expense.contains(c)).collect();
        assert_eq!(shared, vec![&TransactionCategory::Other]);
    }

    #[test]
    fn test_category_validity() {
        assert!(TransactionCategory::Loot.is_valid_for(TransactionKind::Income));
        assert!(!TransactionCategory::Loot.is_valid_for(TransactionKind::Expense));
        assert!(TransactionCategory::Service.is_valid_for(TransactionKind::Expense));
        assert!(TransactionCategory::Other.is_valid_for(TransactionKind::Expense));
        assert_eq!(
            TransactionCategory::default_for(TransactionKind::Income),
            TransactionCategory::Other
        );
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in category_options_for(TransactionKind::Income)
            .iter()
            .chain(category_options_for(TransactionKind::Expense))
        {
            assert_eq!(TransactionCategory::parse(category.as_str()), Some(*category));
        }
        assert_eq!(TransactionCategory::parse("bribe"), None);
    }

    #[test]
    fn test_signed_amount() {
        let request = CreateTransactionRequest {
            character_id: "character::1".to_string(),
            kind: TransactionKind::Expense,
            category: TransactionCategory::Purchase,
            amount: Coins::new(0, 5, 2),
            description: "Rope".to_string(),
        };
        let transaction = Transaction::from_request(request, Utc::now());

        assert_eq!(transaction.signed_amount(), Balance::new(0, -5, -2));
        assert!(transaction.id.starts_with("transaction::expense::"));
    }

    #[test]
    fn test_transaction_json_shape() {
        let json = serde_json::json!({
            "id": "transaction::income::1",
            "character_id": "character::1",
            "kind": "income",
            "category": "loot",
            "amount": { "gold": 10, "silver": 0, "bronze": 0 },
            "description": "Dragon hoard",
            "created_at": "2025-06-01T12:00:00Z"
        });

        let transaction: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(transaction.kind, TransactionKind::Income);
        assert_eq!(transaction.category, TransactionCategory::Loot);
        assert_eq!(transaction.amount, Coins::new(10, 0, 0));
    }
}
