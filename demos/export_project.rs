use anyhow::Context;
use dss_client::prelude::*;
use log::info;

/// Export a project archive and print its metadata.
///
/// Usage: `DKU_DSS_URL=http://dss:11200 DKU_API_KEY=... cargo run --example export_project -- PROJECTKEY out.zip`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let project_key = args.next().context("missing project key")?;
    let target = args.next().unwrap_or_else(|| format!("{}.zip", project_key));

    let client = DssClient::from_env().context("failed to configure DSS client")?;
    let project = client.get_project(&project_key);

    let metadata = project
        .get_metadata()
        .await
        .with_context(|| format!("failed to read metadata of {}", project_key))?;
    println!("{}", serde_json::to_string_pretty(&metadata)?);

    let written = project
        .export_to_file(&target)
        .await
        .with_context(|| format!("failed to export {}", project_key))?;
    info!("Wrote {} bytes to {}", written, target);
    println!("Exported {} to {} ({} bytes)", project_key, target, written);

    Ok(())
}
