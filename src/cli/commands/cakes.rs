use anyhow::Context;
use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use crate::cli::client::CakeClient;
use crate::cli::utils::{cake_line, output_cakes, output_json, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum CakeCommands {
    #[command(about = "List all cakes")]
    List,

    #[command(about = "Show a single cake")]
    Get {
        #[arg(help = "Cake ID")]
        id: i32,
    },

    #[command(about = "Add a new cake")]
    Add {
        #[command(flatten)]
        fields: CakeFields,
    },

    #[command(about = "Update the given fields of a cake")]
    Update {
        #[arg(help = "Cake ID")]
        id: i32,
        #[command(flatten)]
        fields: CakeFields,
    },

    #[command(about = "Delete a cake")]
    Delete {
        #[arg(help = "Cake ID")]
        id: i32,
    },
}

#[derive(Args, Debug, Default)]
pub struct CakeFields {
    #[arg(long, help = "Cake name")]
    pub name: Option<String>,
    #[arg(long, help = "Comment about the cake")]
    pub comment: Option<String>,
    #[arg(long, help = "URL of the cake image")]
    pub image_url: Option<String>,
    #[arg(long, help = "Yum factor rating")]
    pub yum_factor: Option<i32>,
    #[arg(long, help = "Raw JSON body; merged under the individual field flags")]
    pub data: Option<String>,
}

impl CakeFields {
    /// Build the request body. Flags win over keys from `--data`.
    pub fn to_body(&self) -> anyhow::Result<Value> {
        let mut body = match &self.data {
            Some(raw) => match serde_json::from_str::<Value>(raw).context("--data is not valid JSON")? {
                Value::Object(map) => map,
                _ => anyhow::bail!("--data must be a JSON object"),
            },
            None => Map::new(),
        };

        if let Some(name) = &self.name {
            body.insert("name".to_string(), Value::from(name.as_str()));
        }
        if let Some(comment) = &self.comment {
            body.insert("comment".to_string(), Value::from(comment.as_str()));
        }
        if let Some(image_url) = &self.image_url {
            body.insert("imageUrl".to_string(), Value::from(image_url.as_str()));
        }
        if let Some(yum_factor) = self.yum_factor {
            body.insert("yumFactor".to_string(), Value::from(yum_factor));
        }

        Ok(Value::Object(body))
    }
}

pub async fn handle(cmd: CakeCommands, client: &CakeClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        CakeCommands::List => {
            let cakes = client.list().await?;
            output_cakes(&output_format, &cakes)
        }
        CakeCommands::Get { id } => {
            let cake = client.get(id).await?;
            match output_format {
                OutputFormat::Json => output_json(&cake),
                OutputFormat::Text => {
                    println!("{}", cake_line(&cake));
                    Ok(())
                }
            }
        }
        CakeCommands::Add { fields } => {
            let response = client.add(fields.to_body()?).await?;
            let data = response.id.map(|id| serde_json::json!({ "id": id }));
            let message = match response.id {
                Some(id) => format!("{} (id {})", response.message, id),
                None => response.message,
            };
            output_success(&output_format, &message, data)
        }
        CakeCommands::Update { id, fields } => {
            let response = client.update(id, fields.to_body()?).await?;
            output_success(&output_format, &response.message, None)
        }
        CakeCommands::Delete { id } => {
            let response = client.delete(id).await?;
            output_success(&output_format, &response.message, None)
        }
    }
}
