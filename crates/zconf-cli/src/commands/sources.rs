//! Source listing command

use colored::Colorize;
use zconf_core::ConfigEngine;

use crate::error::Result;

/// List the selected sources in precedence order.
pub fn run_sources(engine: &ConfigEngine, json: bool) -> Result<()> {
    let sources = engine.sources();

    if json {
        println!("{}", serde_json::to_string_pretty(sources)?);
        return Ok(());
    }

    println!("{}", "Configuration Sources".bold());
    println!();

    for source in sources {
        let status = if source.loaded {
            "loaded".green()
        } else if source.error.is_some() {
            "failed".red()
        } else {
            "absent".dimmed()
        };
        println!("  {:<8} {:<8} {}", source.kind.to_string(), status, source.file);
        if let Some(error) = &source.error {
            println!("           {}", error.yellow());
        }
    }

    Ok(())
}
