use reqwest::StatusCode;

use crate::cli::client::CakeClient;
use crate::cli::utils::output_json;
use crate::cli::OutputFormat;

/// Check server health via the API /health endpoint
pub async fn health(client: &CakeClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let (status, body) = client.health().await?;

    match output_format {
        OutputFormat::Json => output_json(&body)?,
        OutputFormat::Text => {
            let state = body.get("status").and_then(|v| v.as_str()).unwrap_or("unknown");
            let backend = body.get("backend").and_then(|v| v.as_str()).unwrap_or("unknown");
            println!("{}: {} (store: {})", client.base_url(), state, backend);
        }
    }

    if status != StatusCode::OK {
        anyhow::bail!("server reported {}", status);
    }
    Ok(())
}
