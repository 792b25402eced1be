use crate::{entities::stats::SiteStats, repositories::stats::StatsRepository};

pub struct StatsHandler<R>
where
    R: StatsRepository,
{
    pub stats_repo: R,
}

impl<R> StatsHandler<R>
where
    R: StatsRepository,
{
    pub fn new(stats_repo: R) -> Self {
        StatsHandler { stats_repo }
    }

    /// Never fails; a database error yields the marketing defaults.
    pub async fn site_stats(&self) -> SiteStats {
        match self.stats_repo.resource_counts().await {
            Ok(counts) => counts.into(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to count resources, serving default stats");
                SiteStats::default()
            }
        }
    }
}
