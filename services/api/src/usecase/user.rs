use tracing::info;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, WalletConnection};
use crate::error::ApiServiceError;

// ── ConnectWallet ────────────────────────────────────────────────────────────

pub struct ConnectWalletUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ConnectWalletUseCase<U> {
    /// Returns the id of the created or updated user.
    pub async fn execute(&self, connection: WalletConnection) -> Result<i32, ApiServiceError> {
        let user_id = self.users.upsert_wallet(&connection).await?;
        info!(user_id, wallet = %connection.wallet_kind, "wallet connected");
        Ok(user_id)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, email: &str) -> Result<User, ApiServiceError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(ApiServiceError::UserNotFound)
    }
}
