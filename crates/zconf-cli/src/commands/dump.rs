use zconf_core::ConfigEngine;

use crate::error::Result;

/// Print the loaded configuration tree.
pub fn run_dump(engine: &ConfigEngine) -> Result<()> {
    print!("{}", engine.dump());
    Ok(())
}
