use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use reppay_core::error::AppError;
use reppay_domain::wallet::WalletKind;

use crate::domain::types::{User, WalletConnection};
use crate::error::ApiServiceError;
use crate::handlers::required;
use crate::state::AppState;
use crate::usecase::user::{ConnectWalletUseCase, GetUserUseCase};

// ── POST /api/connect-wallet ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectWalletRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub wallet_address: Option<String>,
    pub wallet_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectWalletResponse {
    pub success: bool,
    pub message: &'static str,
    pub user_id: i32,
}

pub async fn connect_wallet(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<ConnectWalletRequest>, AppError>,
) -> Result<Json<ConnectWalletResponse>, ApiServiceError> {
    const MESSAGE: &str = "Email, name, wallet address, and wallet type are required";
    let email = required(body.email, MESSAGE)?;
    let name = required(body.name, MESSAGE)?;
    let wallet_address = required(body.wallet_address, MESSAGE)?;
    let wallet_kind: WalletKind = required(body.wallet_type, MESSAGE)?
        .parse()
        .map_err(|_| ApiServiceError::UnsupportedWallet)?;

    let usecase = ConnectWalletUseCase {
        users: state.user_repo(),
    };
    let user_id = usecase
        .execute(WalletConnection {
            email,
            name,
            wallet_address,
            wallet_kind,
        })
        .await?;

    Ok(Json(ConnectWalletResponse {
        success: true,
        message: "Wallet connected successfully",
        user_id,
    }))
}

// ── GET /api/user/{email} ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserBody {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub wallet_address: Option<String>,
    pub wallet_type: Option<String>,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            wallet_address: user.wallet_address,
            wallet_type: user.wallet_type,
        }
    }
}

#[derive(Serialize)]
pub struct GetUserResponse {
    pub success: bool,
    pub user: UserBody,
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<GetUserResponse>, ApiServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(&email).await?;
    Ok(Json(GetUserResponse {
        success: true,
        user: user.into(),
    }))
}
