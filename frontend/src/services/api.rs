use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    CharacterItemsResponse, CreateTransactionRequest, DeleteTransactionRequest, Transaction,
    TransactionListResponse, UpdateDescriptionRequest,
};

/// API client for the character sheet backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn character_url(&self, character_id: &str, path: &str) -> String {
        format!("{}/api/characters/{}{}", self.base_url, character_id, path)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, String> {
        if response.ok() {
            response
                .json::<T>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        } else {
            Err(Self::error_text(response).await)
        }
    }

    async fn expect_ok(response: Response) -> Result<(), String> {
        if response.ok() {
            Ok(())
        } else {
            Err(Self::error_text(response).await)
        }
    }

    async fn error_text(response: Response) -> String {
        let status = response.status();
        match response.text().await {
            Ok(text) if !text.trim().is_empty() => text,
            _ => format!("Request failed with status {}", status),
        }
    }

    /// Get every transaction of a character
    pub async fn list_transactions(&self, character_id: &str) -> Result<Vec<Transaction>, String> {
        let url = self.character_url(character_id, "/transactions");

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        let list: TransactionListResponse = Self::parse(response).await?;
        Ok(list.transactions)
    }

    /// Append a transaction to a character's ledger
    pub async fn append_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<(), String> {
        let url = self.character_url(&request.character_id, "/transactions");

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::expect_ok(response).await
    }

    /// Remove a transaction from a character's ledger
    pub async fn delete_transaction(
        &self,
        request: &DeleteTransactionRequest,
    ) -> Result<(), String> {
        let url = self.character_url(
            &request.character_id,
            &format!("/transactions/{}", request.transaction_id),
        );

        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::expect_ok(response).await
    }

    /// Get the abilities and powers listed on a character sheet
    pub async fn get_items<P: DeserializeOwned>(
        &self,
        character_id: &str,
    ) -> Result<CharacterItemsResponse<P>, String> {
        let url = self.character_url(character_id, "/items");

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::parse(response).await
    }

    /// Create a blank item in the given section ("abilities" or "powers")
    pub async fn add_item(&self, character_id: &str, section: &str) -> Result<(), String> {
        let url = self.character_url(character_id, &format!("/items/{}", section));

        let response = Request::post(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::expect_ok(response).await
    }

    pub async fn update_description(
        &self,
        request: &UpdateDescriptionRequest,
    ) -> Result<(), String> {
        let url = self.character_url(
            &request.character_id,
            &format!("/items/{}/description", request.item_id),
        );

        let response = Request::put(&url)
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::expect_ok(response).await
    }

    pub async fn remove_item(&self, character_id: &str, item_id: &str) -> Result<(), String> {
        let url = self.character_url(character_id, &format!("/items/{}", item_id));

        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        Self::expect_ok(response).await
    }
}
