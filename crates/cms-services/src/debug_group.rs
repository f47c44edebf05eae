//! Group permission listing
//!
//! Lists assets for the permission debug screen. Each request goes
//! through four steps:
//!
//! 1. normalize the filter state and build the query
//! 2. look up the result by store key
//! 3. on a miss, run the query and the count
//! 4. when a group is selected, evaluate every declared action for every
//!    asset and memoize the annotated page

use cms_core::models::{AnnotatedAsset, AssetRecord, DebugAction};
use cms_core::pagination::PaginatedResult;
use cms_core::result::CmsResult;
use cms_core::traits::{AccessChecker, Id, PermissionsSource};
use cms_queries::{store_key, FilterState, ListQueryEngine, QueryExecutor};
use tracing::debug;

use crate::list_cache::ListCache;

/// Store key prefix used when none is configured
pub const DEFAULT_CONTEXT: &str = "com_users.debuggroup";

/// Listing service for the group permission debug screen
pub struct DebugGroupService<E, P, A> {
    engine: ListQueryEngine,
    executor: E,
    permissions: P,
    access: A,
    context: String,
    cache: ListCache,
}

impl<E, P, A> DebugGroupService<E, P, A>
where
    E: QueryExecutor,
    P: PermissionsSource,
    A: AccessChecker,
{
    pub fn new(executor: E, permissions: P, access: A) -> Self {
        Self {
            engine: ListQueryEngine::new(),
            executor,
            permissions,
            access,
            context: DEFAULT_CONTEXT.to_string(),
            cache: ListCache::new(),
        }
    }

    /// Use a different store key prefix
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Use a preconfigured engine, e.g. with a narrowed projection
    pub fn with_engine(mut self, engine: ListQueryEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn cache(&self) -> &ListCache {
        &self.cache
    }

    /// Actions evaluated for the component selected in `state`
    pub fn debug_actions(&self, state: &FilterState) -> Vec<DebugAction> {
        let state = state.normalized();
        self.permissions.actions(component_filter(&state))
    }

    /// One page of assets, annotated when a group is selected.
    ///
    /// A rejected ordering or direction fails before anything is looked
    /// up or executed.
    pub async fn list(&self, state: &FilterState) -> CmsResult<PaginatedResult<AnnotatedAsset>> {
        let state = state.normalized();
        let spec = self.engine.build_query(&state)?;
        let key = store_key(&self.context, &state);

        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "asset list served from cache");
            return Ok(hit);
        }

        let assets = self.executor.fetch_assets(&spec).await?;
        let total = self.executor.count(&spec).await?;

        let items = if state.group_id > 0 {
            let actions = self.permissions.actions(component_filter(&state));
            assets
                .into_iter()
                .map(|asset| self.annotate(state.group_id, &actions, asset))
                .collect()
        } else {
            assets.into_iter().map(AnnotatedAsset::unchecked).collect()
        };

        let (limit, offset) = spec.page.map_or((0, 0), |page| (page.limit, page.offset));
        let result = PaginatedResult::new(items, total, limit, offset);

        debug!(key = %key, rows = result.items.len(), total, "asset list loaded");
        self.cache.insert(key, result.clone());

        Ok(result)
    }

    fn annotate(&self, group_id: Id, actions: &[DebugAction], asset: AssetRecord) -> AnnotatedAsset {
        let checks = actions
            .iter()
            .map(|action| {
                let allowed = self.access.check_group(group_id, &action.name, &asset.name);
                (action.name.clone(), allowed)
            })
            .collect();

        AnnotatedAsset { asset, checks }
    }
}

fn component_filter(state: &FilterState) -> Option<&str> {
    Some(state.component.as_str()).filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cms_core::error::CmsError;
    use cms_queries::QuerySpec;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::permissions::StaticPermissionsSource;

    #[derive(Clone)]
    struct FakeExecutor {
        assets: Vec<AssetRecord>,
        fetches: Arc<AtomicUsize>,
        last_sql: Arc<Mutex<Option<String>>>,
    }

    impl FakeExecutor {
        fn new(assets: Vec<AssetRecord>) -> Self {
            Self {
                assets,
                fetches: Arc::new(AtomicUsize::new(0)),
                last_sql: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl QueryExecutor for FakeExecutor {
        async fn fetch_assets(&self, spec: &QuerySpec) -> CmsResult<Vec<AssetRecord>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            *self.last_sql.lock().unwrap() = Some(spec.sql());
            Ok(self.assets.clone())
        }

        async fn count(&self, _spec: &QuerySpec) -> CmsResult<i64> {
            Ok(self.assets.len() as i64)
        }
    }

    struct FailingExecutor;

    #[async_trait]
    impl QueryExecutor for FailingExecutor {
        async fn fetch_assets(&self, _spec: &QuerySpec) -> CmsResult<Vec<AssetRecord>> {
            Err(CmsError::QueryExecution("relation \"assets\" does not exist".into()))
        }

        async fn count(&self, _spec: &QuerySpec) -> CmsResult<i64> {
            Ok(0)
        }
    }

    /// Grants `(group, action, asset)` triples listed up front
    struct FakeAccess {
        grants: HashSet<(Id, &'static str, &'static str)>,
    }

    impl AccessChecker for FakeAccess {
        fn check_group(&self, group_id: Id, action: &str, asset_name: &str) -> bool {
            self.grants
                .iter()
                .any(|(g, a, n)| *g == group_id && *a == action && *n == asset_name)
        }
    }

    fn asset(id: Id, name: &str, level: i32, lft: i32, rgt: i32) -> AssetRecord {
        AssetRecord {
            id,
            name: name.to_string(),
            title: name.to_string(),
            level,
            lft,
            rgt,
        }
    }

    fn sample_assets() -> Vec<AssetRecord> {
        vec![
            asset(1, "root.1", 0, 1, 6),
            asset(2, "com_content", 1, 2, 5),
            asset(3, "com_content.article.7", 2, 3, 4),
        ]
    }

    fn access() -> FakeAccess {
        FakeAccess {
            grants: [
                (8, "core.admin", "root.1"),
                (8, "core.edit", "com_content"),
                (8, "core.edit", "com_content.article.7"),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[tokio::test]
    async fn test_list_annotates_selected_group() {
        let executor = FakeExecutor::new(sample_assets());
        let service = DebugGroupService::new(executor.clone(), StaticPermissionsSource::new(), access());

        let page = service.list(&FilterState::new().group(8)).await.unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].checks.len(), 12);
        assert_eq!(page.items[0].is_allowed("core.admin"), Some(true));
        assert_eq!(page.items[0].is_allowed("core.edit"), Some(false));
        assert_eq!(page.items[2].is_allowed("core.edit"), Some(true));
    }

    #[tokio::test]
    async fn test_list_without_group_is_not_annotated() {
        let executor = FakeExecutor::new(sample_assets());
        let service = DebugGroupService::new(executor.clone(), StaticPermissionsSource::new(), access());

        let page = service.list(&FilterState::new()).await.unwrap();

        assert!(page.items.iter().all(|item| item.checks.is_empty()));
    }

    #[tokio::test]
    async fn test_list_is_memoized_per_filter_state() {
        let executor = FakeExecutor::new(sample_assets());
        let service = DebugGroupService::new(executor.clone(), StaticPermissionsSource::new(), access());
        let state = FilterState::new().group(8).page(0, 20);

        let first = service.list(&state).await.unwrap();
        let second = service.list(&state).await.unwrap();
        assert_eq!(first.items, second.items);
        assert_eq!(executor.fetches.load(Ordering::SeqCst), 1);

        service.list(&state.clone().page(20, 20)).await.unwrap();
        assert_eq!(executor.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(service.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_list_passes_paging_through() {
        let executor = FakeExecutor::new(sample_assets());
        let service = DebugGroupService::new(executor.clone(), StaticPermissionsSource::new(), access());

        let page = service
            .list(&FilterState::new().page(40, 20))
            .await
            .unwrap();

        assert_eq!((page.limit, page.offset), (20, 40));
        let sql = executor.last_sql.lock().unwrap().clone().unwrap();
        assert!(sql.ends_with("LIMIT $1 OFFSET $2"));
    }

    #[tokio::test]
    async fn test_rejected_ordering_executes_nothing() {
        let executor = FakeExecutor::new(sample_assets());
        let service = DebugGroupService::new(executor.clone(), StaticPermissionsSource::new(), access());

        let err = service
            .list(&FilterState::new().order_by("a.rules", "asc"))
            .await
            .unwrap_err();

        assert!(matches!(err, CmsError::InvalidFilter { field: "ordering", .. }));
        assert_eq!(executor.fetches.load(Ordering::SeqCst), 0);
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_execution_failure_is_not_cached() {
        let service =
            DebugGroupService::new(FailingExecutor, StaticPermissionsSource::new(), access());

        let err = service.list(&FilterState::new()).await.unwrap_err();

        assert!(matches!(err, CmsError::QueryExecution(_)));
        assert!(service.cache().is_empty());
    }

    struct GrantAll;

    impl AccessChecker for GrantAll {
        fn check_group(&self, _group_id: Id, _action: &str, _asset_name: &str) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_checks_keep_declared_action_order() {
        let permissions = StaticPermissionsSource::new().with_component_actions(
            "com_content",
            [DebugAction::new("core.execute.transition", "Execute Transition")],
        );
        let service =
            DebugGroupService::new(FakeExecutor::new(sample_assets()), permissions, GrantAll);
        let state = FilterState::new().group(8).component("com_content");

        let declared: Vec<String> = service
            .debug_actions(&state)
            .into_iter()
            .map(|action| action.name)
            .collect();
        let page = service.list(&state).await.unwrap();

        for item in &page.items {
            let checked: Vec<String> = item.checks.keys().cloned().collect();
            assert_eq!(checked, declared);
        }
        assert_eq!(declared.len(), 13);
        assert_eq!(declared[0], "core.login.site");
    }

    #[test]
    fn test_debug_actions_follow_component() {
        let executor = FakeExecutor::new(Vec::new());
        let permissions = StaticPermissionsSource::new().with_component_actions(
            "com_content",
            [DebugAction::new("core.execute.transition", "Execute Transition")],
        );
        let service = DebugGroupService::new(executor.clone(), permissions, access());

        assert_eq!(service.debug_actions(&FilterState::new()).len(), 12);
        assert_eq!(
            service
                .debug_actions(&FilterState::new().component("  com_content "))
                .len(),
            13
        );
    }
}
