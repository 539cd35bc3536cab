//! Token minting for integration tests.

#![allow(dead_code)]

use uuid::Uuid;
use vodbay_api::auth::JwtService;

/// JWT secret shared by the test config and minted tokens (must match
/// create_test_config).
pub const TEST_JWT_SECRET: &str = "test-secret-key-min-32-characters-long!!";

/// An authenticated principal for requests.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

/// Mint a fresh principal with a valid bearer token.
pub fn test_user() -> TestUser {
    let user_id = Uuid::new_v4();
    let token = token_for(user_id);
    TestUser { user_id, token }
}

/// Issue a token for `user_id` signed with the test secret.
pub fn token_for(user_id: Uuid) -> String {
    JwtService::new(TEST_JWT_SECRET, 24)
        .issue_token(user_id)
        .expect("Failed to issue test token")
}

/// A structurally valid token signed with the wrong secret.
pub fn forged_token(user_id: Uuid) -> String {
    JwtService::new("not-the-server-secret-32-characters-long", 24)
        .issue_token(user_id)
        .expect("Failed to issue forged token")
}

/// A token that expired an hour ago.
pub fn expired_token(user_id: Uuid) -> String {
    JwtService::new(TEST_JWT_SECRET, -1)
        .issue_token(user_id)
        .expect("Failed to issue expired token")
}
