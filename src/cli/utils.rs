use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::Cake;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({ "message": message });
            if let (Some(Value::Object(extra)), Some(map)) = (data, response.as_object_mut()) {
                map.extend(extra);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output any serializable value as pretty JSON
pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output cakes as JSON or as one line per cake
pub fn output_cakes(output_format: &OutputFormat, cakes: &[Cake]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(&cakes),
        OutputFormat::Text => {
            if cakes.is_empty() {
                println!("No cakes found");
            }
            for cake in cakes {
                println!("{}", cake_line(cake));
            }
            Ok(())
        }
    }
}

/// One-line text rendering of a cake
pub fn cake_line(cake: &Cake) -> String {
    let mut line = format!("#{} {}", cake.id, cake.name);
    if let Some(yum) = cake.yum_factor {
        line.push_str(&format!(" (yum {})", yum));
    }
    if let Some(comment) = cake.comment.as_deref().filter(|c| !c.is_empty()) {
        line.push_str(&format!(" - {}", comment));
    }
    if let Some(url) = cake.image_url.as_deref().filter(|u| !u.is_empty()) {
        line.push_str(&format!(" [{}]", url));
    }
    line
}
