use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use sharelock::access::{AccessControl, AccessMethod};
use sharelock::auth::principal::Role;
use sharelock::config::AuthConfig;
use sharelock::error::SharelockError;
use sharelock::storage::{MemoryStore, Visibility};
use sharelock::time::SystemClock;

fn engine() -> AccessControl {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = AuthConfig {
        token_secret: "end-to-end-signing-key-0123456789-abcdef".to_string(),
        access_ttl: Duration::from_secs(900),
        refresh_ttl: Duration::from_secs(3600),
    };
    let store = Arc::new(MemoryStore::new());
    AccessControl::from_config(
        &config,
        store.clone(),
        store.clone(),
        store,
        Arc::new(SystemClock),
    )
    .with_min_auth_duration(Duration::ZERO)
}

fn user_roles() -> HashSet<Role> {
    HashSet::from([Role::User])
}

#[tokio::test]
async fn test_register_login_write_refresh_scenario() {
    let control = engine();

    control
        .register("alice", "password123", user_roles())
        .await
        .unwrap();
    control
        .register("bob", "password123", user_roles())
        .await
        .unwrap();

    let alice = control.login("alice", "password123").await.unwrap();
    let bob = control.login("bob", "password123").await.unwrap();

    // Alice writes her own resource with her access token
    control
        .create_resource(&alice.access, "alice", "first entry", Visibility::Private)
        .await
        .unwrap();

    // The same write with Bob's access token is forbidden
    let result = control
        .append_resource(&bob.access, "alice", " from bob", Visibility::Private)
        .await;
    assert!(matches!(result, Err(SharelockError::Forbidden)));

    // Refresh rotates Alice's pair; the old refresh token is dead
    let rotated = control.refresh_tokens(&alice.refresh).await.unwrap();
    let result = control.refresh_tokens(&alice.refresh).await;
    assert!(matches!(result, Err(SharelockError::RefreshTokenRevoked)));

    // The rotated access token still authorizes her
    let subject = control
        .authorize_ownership(&rotated.access, "alice", AccessMethod::Write)
        .await
        .unwrap();
    assert_eq!(subject, "alice");
}

#[tokio::test]
async fn test_resource_lifecycle_with_visibility() {
    let control = engine();

    control
        .register("alice", "password123", user_roles())
        .await
        .unwrap();
    control
        .register("bob", "password123", user_roles())
        .await
        .unwrap();
    let alice = control.login("alice", "password123").await.unwrap().access;
    let bob = control.login("bob", "password123").await.unwrap().access;

    // Create, then append: content only ever grows
    control
        .create_resource(&alice, "alice", "hello", Visibility::Private)
        .await
        .unwrap();
    let result = control
        .create_resource(&alice, "alice", "again", Visibility::Private)
        .await;
    assert!(matches!(result, Err(SharelockError::DuplicateResource)));

    control
        .append_resource(&alice, "alice", ", world", Visibility::Private)
        .await
        .unwrap();
    let record = control.read_resource(&alice, "alice").await.unwrap();
    assert_eq!(record.content, "hello, world");

    // Private: bob cannot read it
    let result = control.read_resource(&bob, "alice").await;
    assert!(matches!(result, Err(SharelockError::Forbidden)));

    // Flip to public: bob can read but still not delete
    control
        .append_resource(&alice, "alice", "", Visibility::Public)
        .await
        .unwrap();
    let record = control.read_resource(&bob, "alice").await.unwrap();
    assert_eq!(record.content, "hello, world");

    let result = control.delete_resource(&bob, "alice").await;
    assert!(matches!(result, Err(SharelockError::Forbidden)));

    // Owner deletes; a second delete has nothing left to remove
    control.delete_resource(&alice, "alice").await.unwrap();
    let result = control.delete_resource(&alice, "alice").await;
    assert!(matches!(result, Err(SharelockError::ResourceNotFound)));
}

#[tokio::test]
async fn test_admin_can_operate_on_any_resource() {
    let control = engine();

    control
        .register("alice", "password123", user_roles())
        .await
        .unwrap();
    control
        .register("root", "password123", HashSet::from([Role::Admin]))
        .await
        .unwrap();
    let alice = control.login("alice", "password123").await.unwrap().access;
    let root = control.login("root", "password123").await.unwrap().access;

    control
        .create_resource(&alice, "alice", "private notes", Visibility::Private)
        .await
        .unwrap();

    // Admin reads and appends despite private visibility and foreign ownership
    let record = control.read_resource(&root, "alice").await.unwrap();
    assert_eq!(record.content, "private notes");

    control
        .append_resource(&root, "alice", " (reviewed)", Visibility::Private)
        .await
        .unwrap();
    let record = control.read_resource(&alice, "alice").await.unwrap();
    assert_eq!(record.content, "private notes (reviewed)");

    control.delete_resource(&root, "alice").await.unwrap();
}
