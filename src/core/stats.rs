use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const STATS_FILE: &str = "stats.json";

/// Numbers shown in the app footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterStats {
    pub views: u64,
    pub last_viewed: Option<DateTime<Utc>>,
}

pub struct StatsService<S: Storage> {
    storage: S,
}

impl<S: Storage> StatsService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> Result<FooterStats> {
        if !self.storage.exists(STATS_FILE).await? {
            return Ok(FooterStats::default());
        }
        let data = self.storage.read_file(STATS_FILE).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub async fn record_view(&self) -> Result<FooterStats> {
        self.record_view_at(Utc::now()).await
    }

    pub async fn record_view_at(&self, now: DateTime<Utc>) -> Result<FooterStats> {
        let mut stats = self.load().await?;
        stats.views += 1;
        stats.last_viewed = Some(now);

        self.storage
            .write_file(STATS_FILE, &serde_json::to_vec_pretty(&stats)?)
            .await?;
        tracing::debug!("👀 View count is now {}", stats.views);
        Ok(stats)
    }
}
