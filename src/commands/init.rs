//! Implementation of the `dot0n init` command.

use super::{Marker, detail, marked};
use crate::error::Result;
use crate::settings::Settings;
use crate::store::Store;

/// Describe the active settings, one detail line per field.
pub(crate) fn render_settings(settings: &Settings) -> Vec<String> {
    let on_off = |enabled: bool| if enabled { "on" } else { "off" };
    vec![
        detail(format!("ai provider:   {}", settings.ai_provider)),
        detail(format!("fallback mode: {}", settings.fallback_mode)),
        detail(format!("history:       {}", on_off(settings.history_enabled))),
        detail(format!("cache:         {}", on_off(settings.cache_enabled))),
    ]
}

/// Execute the `dot0n init` command.
///
/// This command is idempotent: running it again reports existing
/// directories and leaves `config.json` untouched.
pub fn cmd_init() -> Result<()> {
    let store = Store::locate()?;
    let report = store.init()?;

    for dir in &report.created {
        println!("{}", marked(Marker::Success, format!("Created {}", dir.display())));
    }
    for dir in &report.existing {
        println!("{}", marked(Marker::Info, format!("Already exists: {}", dir.display())));
    }
    if let Some(config) = &report.config_created {
        println!("{}", marked(Marker::Success, format!("Created {}", config.display())));
    }

    let settings = store.settings()?;
    println!("{}", marked(Marker::Info, format!("Settings from {}", store.config_path().display())));
    for line in render_settings(&settings) {
        println!("{}", line);
    }

    println!();
    println!("{} initialized!", store.dir().display());
    println!();
    println!("Next steps:");
    println!("  1. Add connections: {}", store.dir().join("connections/stripe.0n").display());
    println!("  2. Create workflows: {}", store.dir().join("workflows/my-workflow.0n").display());
    println!("  3. Validate them:    dot0n validate {}", store.dir().display());

    Ok(())
}
