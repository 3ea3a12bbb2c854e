//! Activity log export command handler

use std::path::PathBuf;

use crate::config::Config;
use crate::db::{ActivityScope, Store};
use crate::export::ExportFormat;
use crate::services::SeaOrmActivityService;

pub async fn cmd_activity_export(
    config: &Config,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let service = SeaOrmActivityService::new(store);

    let file = service.export_scope(ActivityScope::All, format).await?;
    let path = output.unwrap_or_else(|| PathBuf::from(&file.filename));

    tokio::fs::write(&path, &file.bytes).await?;
    println!("✓ Wrote {} ({} bytes)", path.display(), file.bytes.len());

    Ok(())
}
