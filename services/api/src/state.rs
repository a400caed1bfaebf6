use sea_orm::DatabaseConnection;

use crate::infra::db::{DbEscrowRepository, DbOtpRepository, DbUserRepository};
use crate::infra::mail::MailTransport;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: MailTransport,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn escrow_repo(&self) -> DbEscrowRepository {
        DbEscrowRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> MailTransport {
        self.mailer.clone()
    }
}
