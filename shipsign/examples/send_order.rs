use anyhow::Result;
use serde_json::json;
use shipsign::{Client, Config};
use shipsign_core::{Context, OsEnv};
use shipsign_transport_reqwest::ReqwestTransport;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    env_logger::init();

    let ctx = Context::new()
        .with_env(OsEnv)
        .with_transport(ReqwestTransport::default());

    // Reads SHIPSIGN_API_KEY, SHIPSIGN_API_SECRET and the optional
    // SHIPSIGN_BASE_URL / SHIPSIGN_API_MOUNT overrides.
    let config = Config::new().from_env(&ctx);
    let client = Client::new(ctx, config);

    let mut req = client
        .request("post", "/orders")?
        .with_payload(Some(&json!({
            "order": {
                "external_order_identifier": "ABC-100",
                "ordered_at": "2022-08-15 12:00:00 -0600",
                "recipients": []
            }
        })))?;

    let signature = req.sign().await?.clone();
    println!("Signed at {} with {}", signature.timestamp(), signature);

    let resp = req.send().await?;
    println!("Response status: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));

    Ok(())
}
