use cms_core::config::AppConfig;
use cms_db::{MenuItemRepository, ModuleAssignmentRepository};
use cms_services::menu_items::{DeleteMenuItemParams, DeleteMenuItemService};
use cms_services::Callable;

pub async fn delete(config: &AppConfig, id: i64, children: bool) -> anyhow::Result<()> {
    let db = super::connect(config).await?;
    let pool = db.pool().clone();

    let service = DeleteMenuItemService::new(
        MenuItemRepository::new(pool.clone()),
        ModuleAssignmentRepository::new(pool),
    );

    let mut params = DeleteMenuItemParams::new(id);
    if children {
        params = params.with_children();
    }

    let result = service.call(params).await;
    db.close().await;

    if let Some(message) = result.message() {
        eprintln!("{}", message);
    }
    let outcome = result
        .into_result()
        .map_err(|errors| anyhow::anyhow!(errors.full_messages().join(", ")))?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
