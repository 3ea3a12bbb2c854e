use mikrogen::config::{BootstrapConfig, SecurityConfig};
use mikrogen::db::{ActivityScope, NewUser, Store, UserRepoError};
use mikrogen::models::activity::NewActivity;

fn fast_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        ..SecurityConfig::default()
    }
}

async fn store() -> Store {
    Store::new("sqlite::memory:").await.expect("store")
}

fn activity(user_id: i32, base_name: &str) -> NewActivity {
    NewActivity {
        user_id,
        base_name: base_name.to_string(),
        base_ip: "10.0.0".to_string(),
        comment: "Lobby".to_string(),
        start_number: 1,
        end_number: 4,
        password_length: 8,
        character_types: "lowercase,numbers".to_string(),
        users_generated: 4,
    }
}

#[tokio::test]
async fn bootstrap_admin_is_created_once() {
    let store = store().await;
    let bootstrap = BootstrapConfig::default();
    let security = fast_security();

    assert!(store.ensure_bootstrap_admin(&bootstrap, &security).await.unwrap());
    assert!(!store.ensure_bootstrap_admin(&bootstrap, &security).await.unwrap());

    let admin = store.get_user_by_username("admin").await.unwrap().unwrap();
    assert!(admin.is_admin);
    assert_eq!(admin.email, "admin@example.com");
    assert!(store.verify_user_password("admin", "admin123").await.unwrap());
    assert!(!store.verify_user_password("admin", "admin124").await.unwrap());

    let disabled = BootstrapConfig {
        enabled: false,
        admin_username: "root".to_string(),
        ..BootstrapConfig::default()
    };
    assert!(!store.ensure_bootstrap_admin(&disabled, &security).await.unwrap());
    assert!(store.get_user_by_username("root").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_and_email_are_rejected() {
    let store = store().await;
    let security = fast_security();

    let user = |username: &str, email: &str| NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
        is_admin: false,
    };

    store
        .create_user(user("dana", "dana@example.com"), &security)
        .await
        .unwrap();

    assert!(matches!(
        store.create_user(user("dana", "x@example.com"), &security).await,
        Err(UserRepoError::UsernameTaken)
    ));
    assert!(matches!(
        store.create_user(user("dana2", "dana@example.com"), &security).await,
        Err(UserRepoError::EmailTaken)
    ));
}

#[tokio::test]
async fn activity_is_joined_scoped_and_cascaded() {
    let store = store().await;
    let security = fast_security();

    let alice = store
        .create_user(
            NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "secret1".to_string(),
                is_admin: true,
            },
            &security,
        )
        .await
        .unwrap();
    let bob = store
        .create_user(
            NewUser {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password: "secret1".to_string(),
                is_admin: false,
            },
            &security,
        )
        .await
        .unwrap();

    let entry = store.record_activity(activity(alice.id, "a")).await.unwrap();
    assert_eq!(entry.username, "alice");
    assert_eq!(entry.users_generated, 4);
    assert_eq!(entry.character_types, "lowercase,numbers");
    assert_eq!(entry.timestamp.len(), "YYYY-MM-DD HH:MM:SS".len());

    store.record_activity(activity(bob.id, "b1")).await.unwrap();
    store.record_activity(activity(bob.id, "b2")).await.unwrap();

    let all = store.get_all_activity(ActivityScope::All).await.unwrap();
    let names: Vec<&str> = all.iter().map(|e| e.base_name.as_str()).collect();
    assert_eq!(names, ["b2", "b1", "a"]);

    let page = store
        .get_activity_page(ActivityScope::User(bob.id), 1, 20)
        .await
        .unwrap();
    assert_eq!(page.total_items, 2);
    assert_eq!(page.total_pages, 1);
    assert!(page.items.iter().all(|e| e.username == "bob"));

    let recent = store.get_recent_activity(2).await.unwrap();
    assert_eq!(recent.len(), 2);

    assert!(store.delete_user(bob.id).await.unwrap());
    assert!(!store.delete_user(bob.id).await.unwrap());

    let remaining = store.get_all_activity(ActivityScope::All).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].username, "alice");
}
