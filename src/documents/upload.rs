// ABOUTME: Upload flow - stages each file in a temp file, uploads it with the ingest key and ingests it
// The staged file is removed after every attempt, successful or not

use super::DocumentManager;
use crate::client::Scope;
use crate::error::{ArtemisError, Result};
use crate::models::{document::ACCEPTED_UPLOAD_EXTENSION, UploadedFile};
use std::fmt;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Validating,
    Staging,
    Uploading,
    Ingesting,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Staging => "staging",
            Self::Uploading => "uploading",
            Self::Ingesting => "ingesting",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct UploadFailure {
    pub stage: UploadStage,
    pub error: ArtemisError,
}

#[derive(Debug)]
pub struct UploadOutcome {
    pub file_name: String,
    /// Upload id once the service accepted the file.
    pub result: std::result::Result<String, UploadFailure>,
}

impl UploadOutcome {
    /// Whether the raw upload went through, even if ingestion failed afterwards.
    pub fn uploaded(&self) -> bool {
        match &self.result {
            Ok(_) => true,
            Err(failure) => failure.stage == UploadStage::Ingesting,
        }
    }
}

impl DocumentManager {
    /// Upload files one at a time; a failure never stops the remaining files.
    pub async fn upload_files(&self, files: &[UploadedFile]) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            if file.has_accepted_type() {
                outcomes.push(self.upload_and_ingest_document(file).await);
            } else {
                warn!("Rejected {}: not a .{} file", file.name, ACCEPTED_UPLOAD_EXTENSION);
                outcomes.push(UploadOutcome {
                    file_name: file.name.clone(),
                    result: Err(UploadFailure {
                        stage: UploadStage::Validating,
                        error: ArtemisError::UnsupportedFileType(
                            file.name.clone(),
                            ACCEPTED_UPLOAD_EXTENSION,
                        ),
                    }),
                });
            }
        }
        outcomes
    }

    pub async fn upload_and_ingest_document(&self, file: &UploadedFile) -> UploadOutcome {
        let result = match self.stage(file) {
            Ok(staged) => {
                let result = self.upload_staged(file, staged.path()).await;
                if let Err(e) = staged.close() {
                    warn!("Failed to remove staged copy of {}: {}", file.name, e);
                }
                result
            }
            Err(error) => Err(UploadFailure {
                stage: UploadStage::Staging,
                error,
            }),
        };

        UploadOutcome {
            file_name: file.name.clone(),
            result,
        }
    }

    fn stage(&self, file: &UploadedFile) -> Result<NamedTempFile> {
        let suffix = file.suffix();
        let mut builder = tempfile::Builder::new();
        builder.prefix("artemis-upload-").suffix(&suffix);

        let mut staged = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        staged.write_all(&file.bytes)?;
        staged.flush()?;
        info!("Staged {} at {}", file.name, staged.path().display());
        Ok(staged)
    }

    async fn upload_staged(
        &self,
        file: &UploadedFile,
        staged: &Path,
    ) -> std::result::Result<String, UploadFailure> {
        let failed = |stage| move |error| UploadFailure { stage, error };

        let bytes = tokio::fs::read(staged)
            .await
            .map_err(ArtemisError::from)
            .map_err(failed(UploadStage::Staging))?;

        let upload_id = self
            .api
            .upload(Scope::Ingest, &file.name, bytes)
            .await
            .map_err(failed(UploadStage::Uploading))?;
        info!("Uploaded {} as {}", file.name, upload_id);

        self.api
            .ingest_uploads(
                Scope::Ingest,
                &self.collection_id,
                std::slice::from_ref(&upload_id),
                false,
                false,
            )
            .await
            .map_err(failed(UploadStage::Ingesting))?;
        info!("Ingested upload {} into collection {}", upload_id, self.collection_id);

        Ok(upload_id)
    }
}
