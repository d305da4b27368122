use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use malisha_auth::{
    AuthSessionStore, FileStorage, STORAGE_KEY, create_session_token, verify_session_token,
};
use malisha_config::JwtConfig;
use malisha_core::Role;
use malisha_models::{UserIdentity, UserPatch};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("malisha-store-{}", Uuid::new_v4()))
}

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "store-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_session_survives_restart() {
    let dir = temp_dir();
    let user = UserIdentity::new("u-1", "Nadia Islam", "nadia@example.com", Role::Branch)
        .with_permissions(["user:manage"]);
    let token = create_session_token(&user, &jwt_config()).unwrap();

    let mut store = AuthSessionStore::rehydrate(FileStorage::new(&dir));
    store.set_auth(user.clone(), token.clone());
    drop(store);

    let store = AuthSessionStore::rehydrate(FileStorage::new(&dir));
    assert!(store.is_authenticated());
    assert_eq!(store.user(), Some(&user));
    assert_eq!(store.token(), Some(token.as_str()));
    assert!(store.has_permission("user:manage"));

    let claims = verify_session_token(store.token().unwrap(), &jwt_config()).unwrap();
    assert_eq!(claims.sub, "u-1");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_logout_survives_restart() {
    let dir = temp_dir();
    let user = UserIdentity::new("u-2", "Rafi", "rafi@example.com", Role::Student);

    let mut store = AuthSessionStore::rehydrate(FileStorage::new(&dir));
    store.set_auth(user, "tok");
    store.logout();
    store.logout();
    drop(store);

    let store = AuthSessionStore::rehydrate(FileStorage::new(&dir));
    assert!(!store.is_authenticated());
    assert!(store.user().is_none());
    assert!(store.token().is_none());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_profile_update_is_persisted() {
    let dir = temp_dir();
    let user = UserIdentity::new("u-3", "Old Name", "old@example.com", Role::Counselor);

    let mut store = AuthSessionStore::rehydrate(FileStorage::new(&dir));
    store.set_auth(user, "tok");
    store.update_user(UserPatch::name("New Name"));
    drop(store);

    let store = AuthSessionStore::rehydrate(FileStorage::new(&dir));
    let user = store.user().unwrap();
    assert_eq!(user.name, "New Name");
    assert_eq!(user.email, "old@example.com");
    assert_eq!(user.role, Role::Counselor);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_corrupt_file_starts_anonymous() {
    let dir = temp_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.json", STORAGE_KEY)), "{ not json").unwrap();

    let store = AuthSessionStore::rehydrate(FileStorage::new(&dir));
    assert!(!store.is_authenticated());

    fs::remove_dir_all(&dir).ok();
}
