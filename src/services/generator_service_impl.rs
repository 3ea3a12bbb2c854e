//! Generation backed by the in-memory batch registry and the activity table.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::db::Store;
use crate::domain::{BatchHandle, Identity};
use crate::export::{self, ExportFile, ExportFormat};
use crate::generator::{
    self, BatchMetadata, BatchRegistry, GenerateRequest, GeneratorOptions, command_lines,
};
use crate::models::activity::NewActivity;
use crate::services::generator_service::{GeneratedBatch, GeneratorError, GeneratorService};

pub struct DefaultGeneratorService {
    store: Store,
    registry: BatchRegistry,
    options: GeneratorOptions,
}

impl DefaultGeneratorService {
    #[must_use]
    pub const fn new(store: Store, registry: BatchRegistry, options: GeneratorOptions) -> Self {
        Self {
            store,
            registry,
            options,
        }
    }
}

fn activity_for(identity: &Identity, request: &GenerateRequest) -> NewActivity {
    NewActivity {
        user_id: identity.user_id.value(),
        base_name: request.base_name.clone(),
        base_ip: request.base_ip.clone(),
        comment: request.comment.clone(),
        start_number: request.start_number,
        end_number: request.end_number,
        password_length: i32::try_from(request.password_length).unwrap_or(i32::MAX),
        character_types: request.char_types.to_stored(),
        users_generated: request.users_count(),
    }
}

#[async_trait]
impl GeneratorService for DefaultGeneratorService {
    async fn generate(
        &self,
        identity: &Identity,
        request: GenerateRequest,
    ) -> Result<GeneratedBatch, GeneratorError> {
        // The thread-local rng must not live across an await.
        let records = {
            let mut rng = rand::rng();
            generator::generate(&request, &self.options, &mut rng)?
        };

        let entry = self
            .store
            .record_activity(activity_for(identity, &request))
            .await?;

        let metadata = BatchMetadata {
            base_name: request.base_name.clone(),
            comment: request.comment.clone(),
            users_generated: entry.users_generated,
            generated_by: identity.username.clone(),
            generated_at: Utc::now(),
        };

        let commands = command_lines(&records);
        let commands_text = generator::render(&records);
        let handle = self
            .registry
            .put(identity.user_id, records.clone(), metadata.clone())
            .await;

        metrics::counter!("mikrogen_batches_generated_total").increment(1);
        metrics::counter!("mikrogen_credentials_generated_total")
            .increment(u64::try_from(records.len()).unwrap_or(0));

        info!(
            user = %identity.username,
            base_name = %request.base_name,
            users = records.len(),
            handle = %handle,
            "Generated credential batch"
        );

        Ok(GeneratedBatch {
            handle,
            records,
            commands,
            commands_text,
            metadata,
        })
    }

    async fn export_batch(
        &self,
        identity: &Identity,
        handle: BatchHandle,
        format: ExportFormat,
    ) -> Result<ExportFile, GeneratorError> {
        let batch = self
            .registry
            .get(identity.user_id, handle)
            .await
            .ok_or(GeneratorError::BatchNotFound)?;

        let file = export::export_batch(
            &batch.records,
            &batch.metadata,
            format,
            Utc::now().naive_utc(),
        )?;

        metrics::counter!("mikrogen_exports_total", "kind" => "batch", "format" => format.extension())
            .increment(1);

        Ok(file)
    }
}
