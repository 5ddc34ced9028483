use anyhow::Result;
use azsample_azure_storage::{BlobServiceClient, PublicAccess};
use azsample_core::{Context, OsEnv};
use azsample_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    let (Some(account_name), Some(account_key)) = (
        ctx.env_var("AZURE_STORAGE_ACCOUNT_NAME"),
        ctx.env_var("AZURE_STORAGE_ACCOUNT_KEY"),
    ) else {
        println!("Set AZURE_STORAGE_ACCOUNT_NAME and AZURE_STORAGE_ACCOUNT_KEY to run this example");
        return Ok(());
    };

    let client = BlobServiceClient::new(ctx, &account_name, &account_key);

    let created = client
        .create_container_if_not_exists("azsample-example", PublicAccess::Private)
        .await?;
    println!("container azsample-example created: {created}");

    for container in client.list_containers().await? {
        println!(
            "{} (last modified {})",
            container.name, container.properties.last_modified
        );
    }

    Ok(())
}
