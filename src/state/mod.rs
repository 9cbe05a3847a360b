use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use moka::future::Cache;
use sea_orm::DatabaseConnection;

use crate::config::{CacheConfig, PaginationConfig};
use crate::entities::donation_project;

#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseConnection,
    pub cache: Arc<ApiCache>,
    pub pagination: PaginationConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        database: DatabaseConnection,
        cache: Arc<ApiCache>,
        pagination: PaginationConfig,
    ) -> Self {
        assert!(
            cache.project_capacity >= 100,
            "Project cache capacity must be configured"
        );
        assert!(pagination.max_limit > 0, "Page size bound must be positive");
        Self {
            database,
            cache,
            pagination,
            start_time: Instant::now(),
        }
    }
}

/// Project records shared across requests.
///
/// Only stored rows are cached; funding totals are summed on every read.
/// Every project write must call [`ApiCache::invalidate_project`], and cache
/// fills go through [`ApiCache::store_project`] so a row read before a
/// concurrent write is never left behind after that write's invalidation.
pub struct ApiCache {
    pub projects: Cache<i64, Arc<donation_project::Model>>,
    pub project_capacity: u64,
    project_generation: AtomicU64,
}

impl ApiCache {
    pub fn new(config: &CacheConfig) -> Self {
        assert!(
            config.projects_max_capacity >= 100,
            "Project cache capacity threshold"
        );

        let projects = Cache::builder()
            .max_capacity(config.projects_max_capacity)
            .time_to_live(Duration::from_secs(config.projects_ttl_seconds))
            .time_to_idle(Duration::from_secs(config.projects_ttl_seconds / 2 + 1))
            .build();

        Self {
            projects,
            project_capacity: config.projects_max_capacity,
            project_generation: AtomicU64::new(0),
        }
    }

    /// Snapshot taken before reading a project row from the database.
    pub fn project_generation(&self) -> u64 {
        self.project_generation.load(Ordering::SeqCst)
    }

    /// Caches `project` unless a write was invalidated after `seen` was taken.
    ///
    /// The generation is checked again after the insert: an invalidation
    /// racing the insert either bumps the counter first (and the entry is
    /// dropped here) or removes the entry itself.
    pub async fn store_project(
        &self,
        project_id: i64,
        project: Arc<donation_project::Model>,
        seen: u64,
    ) -> bool {
        if self.project_generation() != seen {
            return false;
        }
        self.projects.insert(project_id, project).await;
        if self.project_generation() != seen {
            self.projects.invalidate(&project_id).await;
            return false;
        }
        true
    }

    pub async fn invalidate_project(&self, project_id: i64) {
        self.project_generation.fetch_add(1, Ordering::SeqCst);
        self.projects.invalidate(&project_id).await;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn cache() -> ApiCache {
        ApiCache::new(&CacheConfig {
            projects_max_capacity: 100,
            projects_ttl_seconds: 60,
        })
    }

    fn project(title: &str) -> Arc<donation_project::Model> {
        let mut model = fixtures::project(7, None);
        model.title = title.to_string();
        Arc::new(model)
    }

    #[tokio::test]
    async fn read_started_before_a_write_does_not_refill_the_cache() {
        let cache = cache();

        // A reader misses and loads the old row.
        let seen = cache.project_generation();
        let stale = project("Old title");

        // A write lands and invalidates before the reader stores its row.
        cache.invalidate_project(7).await;

        assert!(!cache.store_project(7, stale, seen).await);
        assert!(cache.projects.get(&7).await.is_none());

        // The next reader caches the fresh row.
        let seen = cache.project_generation();
        assert!(cache.store_project(7, project("New title"), seen).await);
        let cached = cache.projects.get(&7).await.unwrap();
        assert_eq!(cached.title, "New title");
    }

    #[tokio::test]
    async fn invalidation_after_a_fill_removes_the_entry() {
        let cache = cache();
        let seen = cache.project_generation();
        assert!(cache.store_project(7, project("Old title"), seen).await);

        cache.invalidate_project(7).await;
        assert!(cache.projects.get(&7).await.is_none());
    }

    #[test]
    fn state_keeps_configured_pagination() {
        let database = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let state = fixtures::state(database);
        assert_eq!(state.pagination.default_limit, 10);
        assert_eq!(state.cache.project_capacity, 100);
    }
}
