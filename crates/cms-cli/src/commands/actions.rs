use cms_core::traits::PermissionsSource;
use cms_services::StaticPermissionsSource;

pub fn run(component: Option<&str>) -> anyhow::Result<()> {
    let component = component.map(str::trim).filter(|c| !c.is_empty());

    for action in StaticPermissionsSource::new().actions(component) {
        println!("{:<24} {}", action.name, action.label);
    }
    Ok(())
}
