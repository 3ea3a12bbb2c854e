//! Batch generation command handler

use anyhow::Context;

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::db::Store;
use crate::generator::{self, BatchRegistry, CharClassSet, GenerateRequest};
use crate::services::{DefaultGeneratorService, GeneratorService};

pub async fn cmd_generate(config: &Config, args: GenerateArgs) -> anyhow::Result<()> {
    let char_types = CharClassSet::parse_list(&args.chars).map_err(anyhow::Error::msg)?;

    let request = GenerateRequest {
        base_name: args.base_name,
        base_ip: args.base_ip,
        comment: args.comment,
        start_number: args.start,
        end_number: args.end,
        password_length: args.length,
        char_types,
    };

    let Some(username) = args.as_user else {
        // Print-only mode: nothing touches the database.
        let records = {
            let mut rng = rand::rng();
            generator::generate(&request, &config.generator.options(), &mut rng)?
        };
        println!("{}", generator::render(&records));
        return Ok(());
    };

    let store = Store::new(&config.general.database_path).await?;
    let identity = store
        .get_user_by_username(&username)
        .await?
        .with_context(|| format!("User not found: {username}"))?
        .identity();

    let service = DefaultGeneratorService::new(
        store,
        BatchRegistry::new(config.generator.batch_ttl()),
        config.generator.options(),
    );
    let batch = service.generate(&identity, request).await?;

    println!("{}", batch.commands_text);
    eprintln!(
        "Recorded {} users for {}",
        batch.metadata.users_generated, identity.username
    );

    Ok(())
}
