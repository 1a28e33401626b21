use anyhow::Context;
use serde_json::json;

use crate::auth::JwtKeys;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, username: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let keys = JwtKeys::from_secret(&config.security.jwt_secret, config.security.jwt_expiry_hours)
        .context("JWT_SECRET must be set")?;
    let token = keys.generate(username)?;

    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "data": {
                    "username": username,
                    "token": token,
                    "expires_in_hours": config.security.jwt_expiry_hours,
                }
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => println!("{}", token),
    }

    Ok(())
}
