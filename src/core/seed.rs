use crate::core::{quotes, repository};
use crate::domain::model::Quote;
use crate::domain::ports::{Database, Pipeline, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct SeedEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SeedEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract → transform → load and returns the number of loaded items.
    pub async fn run(&self) -> Result<usize> {
        tracing::info!("🌱 Starting seed process...");

        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());

        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::info!("Transformed {} records", transformed.len());

        let loaded = self.pipeline.load(transformed).await?;
        tracing::info!("Loaded {} records", loaded);

        Ok(loaded)
    }
}

/// Quotes file → normalizer → `quotes` table.
pub struct QuoteSeedPipeline<'a, S: Storage, D: Database + ?Sized> {
    storage: &'a S,
    db: &'a D,
    quotes_file: String,
}

impl<'a, S: Storage, D: Database + ?Sized> QuoteSeedPipeline<'a, S, D> {
    pub fn new(storage: &'a S, db: &'a D, quotes_file: impl Into<String>) -> Self {
        Self {
            storage,
            db,
            quotes_file: quotes_file.into(),
        }
    }
}

#[async_trait]
impl<'a, S: Storage, D: Database + ?Sized> Pipeline for QuoteSeedPipeline<'a, S, D> {
    type Item = Quote;

    async fn extract(&self) -> Result<Vec<Quote>> {
        tracing::debug!("Reading quotes from {}", self.quotes_file);
        let data = self.storage.read_file(&self.quotes_file).await?;
        quotes::parse_quotes(&data)
    }

    async fn transform(&self, data: Vec<Quote>) -> Result<Vec<Quote>> {
        let before = data.len();
        let normalized = quotes::normalize_quotes(data);
        if normalized.len() < before {
            tracing::warn!(
                "Dropped {} empty or duplicate quotes",
                before - normalized.len()
            );
        }
        Ok(normalized)
    }

    async fn load(&self, data: Vec<Quote>) -> Result<usize> {
        repository::replace_quotes(self.db, &data).await
    }
}
