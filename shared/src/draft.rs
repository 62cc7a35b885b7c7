//! Transaction drafts and the append/delete flows around them.
//!
//! The ledger never writes anything itself. Persisting a transaction or
//! removing one goes through a [`LedgerEffects`] implementation supplied
//! by the host page, and the displayed list only changes once the host
//! hands back a new transaction list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::currency::{Coins, Denomination};
use crate::transaction::{
    CreateTransactionRequest, DeleteTransactionRequest, TransactionCategory, TransactionKind,
};

pub const MAX_DESCRIPTION_LENGTH: usize = 256;

/// Host-owned operations the ledger invokes. Errors are user-facing messages.
#[async_trait(?Send)]
pub trait LedgerEffects {
    async fn append_transaction(&self, request: CreateTransactionRequest) -> Result<(), String>;

    async fn delete_transaction(&self, request: DeleteTransactionRequest) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Enter at least one coin amount")]
    ZeroAmount,
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Description is too long (max {0} characters)")]
    DescriptionTooLong(usize),
    #[error("Category is not valid for this kind of transaction")]
    CategoryMismatch,
    #[error("{} must be a whole, non-negative number", .0.label())]
    InvalidCoinValue(Denomination),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Effect(String),
    #[error("Another change is still being saved")]
    Busy,
}

/// Unsaved transaction form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub description: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self::with_kind(TransactionKind::Income)
    }
}

impl TransactionDraft {
    pub fn with_kind(kind: TransactionKind) -> Self {
        Self {
            kind,
            category: TransactionCategory::default_for(kind),
            gold: 0,
            silver: 0,
            bronze: 0,
            description: String::new(),
        }
    }

    /// Switch kind. A different kind always resets the category to its default.
    pub fn set_kind(&mut self, kind: TransactionKind) {
        if self.kind != kind {
            self.kind = kind;
            self.category = TransactionCategory::default_for(kind);
        }
    }

    pub fn set_coins(&mut self, denomination: Denomination, value: u32) {
        match denomination {
            Denomination::Gold => self.gold = value,
            Denomination::Silver => self.silver = value,
            Denomination::Bronze => self.bronze = value,
        }
    }

    pub fn amount(&self) -> Coins {
        Coins::new(self.gold, self.silver, self.bronze)
    }

    /// Reset every field except the kind the user was entering.
    pub fn clear(&mut self) {
        *self = Self::with_kind(self.kind);
    }

    /// Check the draft and build the creation payload for `character_id`.
    pub fn validate(
        &self,
        character_id: &str,
    ) -> Result<CreateTransactionRequest, ValidationError> {
        let amount = self.amount();
        if amount.is_zero() {
            return Err(ValidationError::ZeroAmount);
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::DescriptionTooLong(MAX_DESCRIPTION_LENGTH));
        }

        if !self.category.is_valid_for(self.kind) {
            return Err(ValidationError::CategoryMismatch);
        }

        Ok(CreateTransactionRequest {
            character_id: character_id.to_string(),
            kind: self.kind,
            category: self.category,
            amount,
            description: description.to_string(),
        })
    }
}

/// Parse a coin input field. Blank means zero.
pub fn parse_coin_input(denomination: Denomination, input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidCoinValue(denomination))
}

/// Validate `draft` and hand it to the host's append operation.
///
/// The draft is cleared only after the append succeeds. On any failure it
/// is left exactly as it was.
pub async fn submit_transaction<E>(
    draft: &mut TransactionDraft,
    character_id: &str,
    effects: &E,
) -> Result<(), SubmitError>
where
    E: LedgerEffects + ?Sized,
{
    let request = draft.validate(character_id).map_err(|e| {
        debug!("Rejected transaction draft: {}", e);
        e
    })?;

    match effects.append_transaction(request).await {
        Ok(()) => {
            draft.clear();
            Ok(())
        }
        Err(message) => {
            warn!("Append transaction failed: {}", message);
            Err(SubmitError::Effect(message))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

/// Delete a transaction once the user has confirmed.
pub async fn delete_transaction<E>(
    character_id: &str,
    transaction_id: &str,
    confirmed: bool,
    effects: &E,
) -> Result<DeleteOutcome, String>
where
    E: LedgerEffects + ?Sized,
{
    if !confirmed {
        debug!("Delete of {} cancelled by user", transaction_id);
        return Ok(DeleteOutcome::Cancelled);
    }

    let request = DeleteTransactionRequest {
        character_id: character_id.to_string(),
        transaction_id: transaction_id.to_string(),
    };

    effects.delete_transaction(request).await.map_err(|message| {
        warn!("Delete transaction {} failed: {}", transaction_id, message);
        message
    })?;

    Ok(DeleteOutcome::Deleted)
}

/// Serializes ledger effects: at most one append or delete in flight.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    pending: bool,
}

impl SubmissionGate {
    /// Claim the gate, or `SubmitError::Busy` while another effect is outstanding.
    pub fn begin(&mut self) -> Result<(), SubmitError> {
        if self.pending {
            return Err(SubmitError::Busy);
        }
        self.pending = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[derive(Default)]
    struct RecordingEffects {
        appended: RefCell<Vec<CreateTransactionRequest>>,
        deleted: RefCell<Vec<DeleteTransactionRequest>>,
        fail_with: Option<String>,
    }

    impl RecordingEffects {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::default()
            }
        }
    }

    #[async_trait(?Send)]
    impl LedgerEffects for RecordingEffects {
        async fn append_transaction(
            &self,
            request: CreateTransactionRequest,
        ) -> Result<(), String> {
            self.appended.borrow_mut().push(request);
            match &self.fail_with {
                Some(message) => Err(message.clone()),
                None => Ok(()),
            }
        }

        async fn delete_transaction(
            &self,
            request: DeleteTransactionRequest,
        ) -> Result<(), String> {
            self.deleted.borrow_mut().push(request);
            match &self.fail_with {
                Some(message) => Err(message.clone()),
                None => Ok(()),
            }
        }
    }

    fn valid_draft() -> TransactionDraft {
        TransactionDraft {
            kind: TransactionKind::Expense,
            category: TransactionCategory::Purchase,
            gold: 0,
            silver: 5,
            bronze: 0,
            description: "  Healing potion ".to_string(),
        }
    }

    #[test]
    fn test_set_kind_resets_category() {
        let mut draft = valid_draft();
        draft.set_kind(TransactionKind::Income);
        assert_eq!(draft.category, TransactionCategory::Other);

        draft.category = TransactionCategory::Loot;
        draft.set_kind(TransactionKind::Income);
        assert_eq!(draft.category, TransactionCategory::Loot);
    }

    #[test]
    fn test_validate_builds_trimmed_request() {
        let request = valid_draft().validate("character::1").unwrap();
        assert_eq!(request.description, "Healing potion");
        assert_eq!(request.amount, Coins::new(0, 5, 0));
        assert_eq!(request.character_id, "character::1");
    }

    #[test]
    fn test_validate_rejections() {
        let mut zero = valid_draft();
        zero.silver = 0;
        assert_eq!(zero.validate("c"), Err(ValidationError::ZeroAmount));

        let mut blank = valid_draft();
        blank.description = "   \t".to_string();
        assert_eq!(blank.validate("c"), Err(ValidationError::EmptyDescription));

        let mut long = valid_draft();
        long.description = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert_eq!(
            long.validate("c"),
            Err(ValidationError::DescriptionTooLong(MAX_DESCRIPTION_LENGTH))
        );

        let mut mismatch = valid_draft();
        mismatch.category = TransactionCategory::Loot;
        assert_eq!(mismatch.validate("c"), Err(ValidationError::CategoryMismatch));
    }

    #[test]
    fn test_parse_coin_input() {
        assert_eq!(parse_coin_input(Denomination::Gold, ""), Ok(0));
        assert_eq!(parse_coin_input(Denomination::Gold, " 12 "), Ok(12));
        assert_eq!(
            parse_coin_input(Denomination::Silver, "-3"),
            Err(ValidationError::InvalidCoinValue(Denomination::Silver))
        );
        assert_eq!(
            parse_coin_input(Denomination::Bronze, "1.5"),
            Err(ValidationError::InvalidCoinValue(Denomination::Bronze))
        );
    }

    #[tokio::test]
    async fn test_zero_amount_never_reaches_append() {
        init_tracing();
        let effects = RecordingEffects::default();

        for description in ["", "   ", "Tavern bill"] {
            let mut draft = TransactionDraft {
                description: description.to_string(),
                ..TransactionDraft::default()
            };
            let result = submit_transaction(&mut draft, "character::1", &effects).await;
            assert_eq!(result, Err(SubmitError::Invalid(ValidationError::ZeroAmount)));
        }

        assert!(effects.appended.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submit_clears_draft() {
        init_tracing();
        let effects = RecordingEffects::default();
        let mut draft = valid_draft();

        submit_transaction(&mut draft, "character::1", &effects).await.unwrap();

        assert_eq!(effects.appended.borrow().len(), 1);
        assert_eq!(draft, TransactionDraft::with_kind(TransactionKind::Expense));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        init_tracing();
        let effects = RecordingEffects::failing("Network error");
        let mut draft = valid_draft();
        let before = draft.clone();

        let result = submit_transaction(&mut draft, "character::1", &effects).await;

        assert_eq!(result, Err(SubmitError::Effect("Network error".to_string())));
        assert_eq!(draft, before);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        init_tracing();
        let effects = RecordingEffects::default();

        let outcome = delete_transaction("character::1", "transaction::income::1", false, &effects)
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(effects.deleted.borrow().is_empty());

        let outcome = delete_transaction("character::1", "transaction::income::1", true, &effects)
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(effects.deleted.borrow()[0].transaction_id, "transaction::income::1");
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        init_tracing();
        let effects = RecordingEffects::failing("Server unavailable");
        let result =
            delete_transaction("character::1", "transaction::income::1", true, &effects).await;
        assert_eq!(result, Err("Server unavailable".to_string()));
    }

    #[test]
    fn test_submission_gate_allows_one_in_flight() {
        let mut gate = SubmissionGate::default();
        assert_eq!(gate.begin(), Ok(()));
        assert!(gate.is_pending());
        assert_eq!(gate.begin(), Err(SubmitError::Busy));

        gate.finish();
        assert!(!gate.is_pending());
        assert_eq!(gate.begin(), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::InvalidCoinValue(Denomination::Gold).to_string(),
            "Gold must be a whole, non-negative number"
        );
        assert_eq!(
            SubmitError::from(ValidationError::EmptyDescription).to_string(),
            "Description cannot be empty"
        );
    }
}
