//! `cms assets`
//!
//! Prints the query for a filter state. With `--execute` the listing runs
//! through `DebugGroupService`; no ACL rules are loaded here, so a
//! selected group is annotated with [`ImplicitDeny`].

use anyhow::Context;
use cms_core::config::AppConfig;
use cms_db::{AssetQueryExecutor, UserGroupRepository};
use cms_queries::{store_key, AssetColumn, FilterState, ListQueryEngine, SqlParam};
use cms_services::{DebugGroupService, ImplicitDeny, StaticPermissionsSource};
use tracing::{info, warn};

use crate::cli::FilterArgs;

/// Filter state for the command line flags
pub fn filter_state(args: &FilterArgs, default_limit: i64) -> FilterState {
    FilterState::new()
        .search(args.search.clone().unwrap_or_default())
        .levels(args.level_start, args.level_end)
        .component(args.component.clone().unwrap_or_default())
        .group(args.group)
        .order_by(args.ordering.clone(), args.direction.clone())
        .page(args.start, args.limit.unwrap_or(default_limit))
}

/// Engine selecting the `--columns` projection, or the default one
pub fn engine(args: &FilterArgs) -> anyhow::Result<ListQueryEngine> {
    let columns = args
        .columns
        .iter()
        .map(|raw| AssetColumn::parse(raw).with_context(|| format!("unknown column {:?}", raw)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ListQueryEngine::new().with_select(columns))
}

pub async fn run(config: &AppConfig, args: FilterArgs, execute: bool) -> anyhow::Result<()> {
    let state = filter_state(&args, config.list.default_limit).normalized();
    let engine = engine(&args)?;
    let spec = engine.build_query(&state)?;
    let key = store_key(&config.list.context, &state);

    println!("sql:    {}", spec.sql());
    println!("count:  {}", spec.count_sql());
    for (index, param) in spec.bind_params().iter().enumerate() {
        match param {
            SqlParam::Int(value) => println!("${:<5} {}", index + 1, value),
            SqlParam::Text(value) => println!("${:<5} {:?}", index + 1, value),
        }
    }
    println!("key:    {}", key);
    println!("digest: {}", key.digest(&config.list.context));

    if !execute {
        return Ok(());
    }

    let db = super::connect(config).await?;

    if state.group_id > 0 {
        let group = UserGroupRepository::new(db.pool().clone())
            .find_by_id(state.group_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("user group {} not found", state.group_id))?;
        println!("group:  {} ({})", group.title, group.id);
        warn!(group_id = group.id, "no ACL rules loaded, every check is denied");
    }

    let service = DebugGroupService::new(
        AssetQueryExecutor::new(db.pool().clone()),
        StaticPermissionsSource::new(),
        ImplicitDeny,
    )
    .with_context(config.list.context.clone())
    .with_engine(engine);

    let page = service.list(&state).await;
    db.close().await;
    let page = page?;

    info!(rows = page.items.len(), total = page.total, "asset query executed");
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
