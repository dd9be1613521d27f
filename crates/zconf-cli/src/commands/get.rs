//! Option lookup command

use colored::Colorize;
use serde::Serialize;
use zconf_core::{ConfigEngine, OptionId, SourceKind};

use crate::error::Result;

#[derive(Debug, Serialize)]
struct GetOutput<'a> {
    option: &'a str,
    value: String,
    /// `None` when no source sets the option
    source: Option<SourceKind>,
}

/// Print the resolved value of each option.
///
/// All option names are validated before anything is printed.
pub fn run_get(
    engine: &ConfigEngine,
    options: &[String],
    json: bool,
    verbose: bool,
) -> Result<()> {
    let ids = options
        .iter()
        .map(|raw| raw.parse::<OptionId>())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let results: Vec<GetOutput<'_>> = options
        .iter()
        .zip(&ids)
        .map(|(raw, id)| {
            let resolved = engine.lookup(id);
            GetOutput {
                option: raw,
                value: resolved.as_ref().map(|r| r.value.clone()).unwrap_or_default(),
                source: resolved.map(|r| r.source),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        if verbose {
            let source = match result.source {
                Some(kind) => kind.to_string().cyan(),
                None => "unset".dimmed(),
            };
            println!("{} = {} ({})", result.option.bold(), result.value, source);
        } else {
            println!("{}", result.value);
        }
    }

    Ok(())
}
