use anyhow::{Context, Result};
use chat_view_model::OverflowPolicy;
use serde::Serialize;

use crate::config::Config;
use crate::output::Output;

#[derive(Serialize)]
struct ConfigInfo<'a> {
    path: String,
    #[serde(flatten)]
    config: &'a Config,
}

/// Show the effective configuration
pub fn show(config: &Config, output: &Output) -> Result<()> {
    output.success(
        "config.show",
        ConfigInfo {
            path: config.path.display().to_string(),
            config,
        },
    );
    Ok(())
}

/// Set the local participant id
pub fn set_local(id: &str, config: &Config, output: &Output) -> Result<()> {
    let mut config = config.clone();
    config.set_local_participant_id(id)?;
    output.success_message("config.set-local", &format!("Local participant set to {}", id));
    Ok(())
}

/// Set the overflow counter policy
pub fn set_policy(policy: &str, config: &Config, output: &Output) -> Result<()> {
    let policy: OverflowPolicy = policy
        .parse::<OverflowPolicy>()
        .context("Expected total-minus-cap or hidden-events")?;
    let mut config = config.clone();
    config.set_overflow_policy(policy)?;
    output.success("config.set-policy", ConfigInfo {
        path: config.path.display().to_string(),
        config: &config,
    });
    Ok(())
}
