use crate::domain::model::{Statement, StatementResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// Remote SQL service. Statements in one batch run in order on one connection.
#[async_trait]
pub trait Database: Send + Sync {
    /// Each statement commits on its own; a failure does not undo earlier ones.
    async fn execute_batch(&self, statements: Vec<Statement>) -> Result<Vec<StatementResult>>;

    /// All statements commit together or not at all.
    async fn execute_transaction(
        &self,
        statements: Vec<Statement>,
    ) -> Result<Vec<StatementResult>>;
}

/// Extract / transform / load steps of a seeding job.
#[async_trait]
pub trait Pipeline: Send + Sync {
    type Item: Send;

    async fn extract(&self) -> Result<Vec<Self::Item>>;
    async fn transform(&self, data: Vec<Self::Item>) -> Result<Vec<Self::Item>>;
    async fn load(&self, data: Vec<Self::Item>) -> Result<usize>;
}
