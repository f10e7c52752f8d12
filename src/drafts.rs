use crate::error::{Result, SurveyError};
use crate::models::{EvaluationId, FeedbackDraft};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Writes in-progress feedback to `draft_{evaluation}_{reviewer}.json` files
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the draft for one (evaluation, reviewer) pair
    pub fn path_for(&self, evaluation_id: &EvaluationId, reviewer_id: &Uuid) -> PathBuf {
        self.dir
            .join(format!("draft_{}_{}.json", evaluation_id, reviewer_id))
    }

    /// Overwrite the draft for the pair; the file is flushed and synced on return
    pub fn save(
        &self,
        evaluation_id: &EvaluationId,
        reviewer_id: &Uuid,
        draft: &FeedbackDraft,
    ) -> Result<PathBuf> {
        let path = self.path_for(evaluation_id, reviewer_id);
        let io_error = |source| SurveyError::DraftIo {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error)?;

        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, draft)
            .map_err(|e| io_error(std::io::Error::from(e)))?;
        writer.flush().map_err(io_error)?;
        writer.get_ref().sync_all().map_err(io_error)?;

        debug!(path = %path.display(), responses = draft.responses.len(), "draft saved");
        Ok(path)
    }
}
