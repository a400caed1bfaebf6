use reppay_api::domain::types::WalletConnection;
use reppay_api::error::ApiServiceError;
use reppay_api::usecase::user::{ConnectWalletUseCase, GetUserUseCase};
use reppay_domain::wallet::WalletKind;

use crate::helpers::{MockUserRepo, test_user};

fn connection(name: &str, address: &str, kind: WalletKind) -> WalletConnection {
    WalletConnection {
        email: "alice@example.com".to_owned(),
        name: name.to_owned(),
        wallet_address: address.to_owned(),
        wallet_kind: kind,
    }
}

#[tokio::test]
async fn should_update_existing_user_in_place() {
    let repo = MockUserRepo::new(vec![test_user()]);
    let users = repo.users_handle();
    let uc = ConnectWalletUseCase { users: repo };

    let first = uc
        .execute(connection("Alice", "So1ana111", WalletKind::Phantom))
        .await
        .unwrap();
    let second = uc
        .execute(connection("Alice B", "0xabc", WalletKind::MetaMask))
        .await
        .unwrap();

    assert_eq!(first, second);
    let users = users.lock().unwrap();
    assert_eq!(users.len(), 1, "no duplicate user");
    assert_eq!(users[0].name, "Alice B");
    assert_eq!(users[0].wallet_address.as_deref(), Some("0xabc"));
    assert_eq!(users[0].wallet_type.as_deref(), Some("metamask"));
}

#[tokio::test]
async fn should_create_user_on_first_connect() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let uc = ConnectWalletUseCase { users: repo };

    let id = uc
        .execute(connection("Alice", "So1ana111", WalletKind::Phantom))
        .await
        .unwrap();

    assert_eq!(id, 1);
    assert_eq!(users.lock().unwrap()[0].wallet_type.as_deref(), Some("phantom"));
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_email() {
    let uc = GetUserUseCase {
        users: MockUserRepo::empty(),
    };
    let result = uc.execute("nobody@example.com").await;
    assert!(
        matches!(result, Err(ApiServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_find_user_by_email() {
    let uc = GetUserUseCase {
        users: MockUserRepo::new(vec![test_user()]),
    };
    let user = uc.execute("alice@example.com").await.unwrap();
    assert_eq!(user.name, "Alice");
}
