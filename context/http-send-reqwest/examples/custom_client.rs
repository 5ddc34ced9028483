use anyhow::Result;
use azsample_core::{Context, OsEnv};
use azsample_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // A client with a short timeout and its own user agent.
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .user_agent("azsample-example/0.1")
        .build()?;

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv);

    // The metadata endpoint answers without credentials.
    let url = "https://management.azure.com/metadata/endpoints?api-version=2022-09-01";
    println!("GET {url}");

    let req = http::Request::builder()
        .method(http::Method::GET)
        .uri(url)
        .body(Bytes::new())?;

    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            if let Ok(text) = std::str::from_utf8(resp.body()) {
                println!("{text}");
            }
        }
        Err(err) => eprintln!("Request failed: {err}"),
    }

    Ok(())
}
