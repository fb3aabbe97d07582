use crate::adapters::local::{copy_dir, LocalStorage};
use crate::core::repository;
use crate::core::seed::{QuoteSeedPipeline, SeedEngine};
use crate::domain::model::ApiResponse;
use crate::domain::ports::Database;
use crate::utils::error::{AppError, Result};
use serde_json::{json, Map, Value};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AssetSettings {
    pub source_dir: PathBuf,
    pub targets: Vec<PathBuf>,
}

/// 資料庫初始化、種子資料與靜態資源複製
pub struct SetupService<D: Database> {
    db: D,
    storage: LocalStorage,
    quotes_file: String,
    assets: AssetSettings,
}

fn into_response(operation: &str, result: Result<Map<String, Value>>) -> ApiResponse {
    match result {
        Ok(details) => {
            tracing::info!("✅ {} succeeded", operation);
            ApiResponse::ok(details)
        }
        Err(e) => {
            tracing::error!(
                "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                operation,
                e,
                e.category(),
                e.severity()
            );
            ApiResponse::failure(e.to_string())
        }
    }
}

impl<D: Database> SetupService<D> {
    /// `quotes_file` is resolved against `storage`'s base path.
    pub fn new(
        db: D,
        storage: LocalStorage,
        quotes_file: impl Into<String>,
        assets: AssetSettings,
    ) -> Self {
        Self {
            db,
            storage,
            quotes_file: quotes_file.into(),
            assets,
        }
    }

    async fn try_push_schema(&self) -> Result<Map<String, Value>> {
        let tables = repository::push_schema(&self.db).await?;
        let mut details = Map::new();
        details.insert("tables".to_string(), json!(tables));
        Ok(details)
    }

    async fn try_seed_quotes(&self) -> Result<Map<String, Value>> {
        let pipeline = QuoteSeedPipeline::new(&self.storage, &self.db, self.quotes_file.as_str());
        let inserted = SeedEngine::new(pipeline).run().await?;
        let mut details = Map::new();
        details.insert("inserted".to_string(), json!(inserted));
        Ok(details)
    }

    async fn try_copy_logos(&self) -> Result<Map<String, Value>> {
        let source = &self.assets.source_dir;
        if !tokio::fs::try_exists(source).await? {
            return Err(AppError::ConfigError {
                message: format!("logo directory not found: {}", source.display()),
            });
        }

        let mut copied = 0;
        for target in &self.assets.targets {
            let count = copy_dir(source, target).await?;
            tracing::info!("🖼️ Copied {} files to {}", count, target.display());
            copied += count;
        }

        let mut details = Map::new();
        details.insert("copied".to_string(), json!(copied));
        details.insert(
            "targets".to_string(),
            json!(self
                .assets
                .targets
                .iter()
                .map(|t| t.display().to_string())
                .collect::<Vec<_>>()),
        );
        Ok(details)
    }

    pub async fn push_schema(&self) -> ApiResponse {
        into_response("push schema", self.try_push_schema().await)
    }

    pub async fn seed_quotes(&self) -> ApiResponse {
        into_response("seed quotes", self.try_seed_quotes().await)
    }

    pub async fn clear_quotes(&self) -> ApiResponse {
        let result = repository::delete_all_quotes(&self.db).await.map(|deleted| {
            let mut details = Map::new();
            details.insert("deleted".to_string(), json!(deleted));
            details
        });
        into_response("clear quotes", result)
    }

    /// Schema push followed by quote seeding. Stops at the first failure.
    pub async fn init_database(&self) -> ApiResponse {
        let result = async {
            let mut details = self.try_push_schema().await?;
            details.extend(self.try_seed_quotes().await?);
            let total = repository::count_quotes(&self.db).await?;
            details.insert("total".to_string(), json!(total));
            Ok::<_, AppError>(details)
        }
        .await;
        into_response("init database", result)
    }

    pub async fn copy_logos(&self) -> ApiResponse {
        into_response("copy logos", self.try_copy_logos().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository::tests::RecordingDatabase;
    use tempfile::TempDir;

    fn service(dir: &TempDir, db: RecordingDatabase) -> SetupService<RecordingDatabase> {
        SetupService::new(
            db,
            LocalStorage::new(dir.path()),
            "quotes.json",
            AssetSettings {
                source_dir: dir.path().join("logo"),
                targets: vec![dir.path().join("mobile").join("logo")],
            },
        )
    }

    #[tokio::test]
    async fn test_init_database_reports_tables_and_counts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("quotes.json"),
            r#"[{"text": "Sabar", "source": "QS. Yusuf: 18"}]"#,
        )
        .unwrap();

        let response = service(&dir, RecordingDatabase::default())
            .init_database()
            .await;

        assert!(response.success);
        assert_eq!(response.details["inserted"], 1);
        assert_eq!(response.details["total"], 7);
        assert!(response.details["tables"].as_array().unwrap().len() >= 5);
    }

    #[tokio::test]
    async fn test_database_failure_becomes_failure_envelope() {
        let dir = TempDir::new().unwrap();
        let db = RecordingDatabase {
            fail_with: Some("no such table: quotes".into()),
            ..Default::default()
        };

        let response = service(&dir, db).push_schema().await;

        assert!(!response.success);
        assert_eq!(response.status_code(), 500);
        assert!(response.error.unwrap().contains("no such table"));
    }

    #[test]
    fn test_copy_logos_without_source_fails() {
        let dir = TempDir::new().unwrap();
        let response =
            tokio_test::block_on(service(&dir, RecordingDatabase::default()).copy_logos());
        assert!(!response.success);
        assert!(response.error.unwrap().contains("logo directory not found"));
    }

    #[tokio::test]
    async fn test_copy_logos_to_targets() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("logo")).unwrap();
        std::fs::write(dir.path().join("logo").join("logo.svg"), b"<svg/>").unwrap();

        let response = service(&dir, RecordingDatabase::default())
            .copy_logos()
            .await;

        assert!(response.success);
        assert_eq!(response.details["copied"], 1);
        assert!(dir.path().join("mobile/logo/logo.svg").exists());
    }
}
