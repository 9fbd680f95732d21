use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use tokio::io::AsyncWriteExt;

use crate::error::AppResult;

/// Append-only webhook audit log, partitioned into one file per UTC day.
pub struct AuditLog {
    dir: PathBuf,
}

impl AuditLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.log", date.format("%Y-%m-%d")))
    }

    /// Appends one timestamped line to today's file, creating it on demand.
    pub async fn append(&self, entry: &str) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let now = Utc::now();
        let path = self.file_for(now.date_naive());
        let line = format!("{} {}\n", now.to_rfc3339(), entry);

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;

        Ok(())
    }
}
