//! User account command handlers

use anyhow::Context;
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::db::{NewUser, Store};

fn prompt_password() -> anyhow::Result<String> {
    print!("Password: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn cmd_user_create(
    config: &Config,
    username: &str,
    email: &str,
    password: Option<String>,
    admin: bool,
) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    if password.chars().count() < config.security.min_password_length {
        anyhow::bail!(
            "Password must be at least {} characters",
            config.security.min_password_length
        );
    }

    let store = Store::new(&config.general.database_path).await?;
    let user = store
        .create_user(
            NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password,
                is_admin: admin,
            },
            &config.security,
        )
        .await?;

    println!(
        "✓ Created {} {} (id {})",
        if user.is_admin { "admin" } else { "user" },
        user.username,
        user.id
    );
    println!("  API key: {}", user.api_key);

    Ok(())
}

pub async fn cmd_user_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users.");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        println!(
            "{:>4}  {:<20} {:<30} {}",
            user.id,
            user.username,
            user.email,
            if user.is_admin { "admin" } else { "" }
        );
    }

    Ok(())
}

pub async fn cmd_user_delete(config: &Config, username: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let user = store
        .get_user_by_username(username)
        .await?
        .with_context(|| format!("User not found: {username}"))?;

    store.delete_user(user.id).await?;
    println!("✓ Deleted {} and their activity history", user.username);

    Ok(())
}
