//! Command: load the configuration and summarize what was found.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::loader::LoadOutcome;
use crate::logging::Logger;

/// Run the check command.
///
/// Diagnostics are printed by the subscriber as they are raised; this adds
/// a summary of the loaded configuration.
///
/// # Errors
///
/// Returns an error if the load fails fatally or any diagnostic was raised.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    log.stage("Loading configuration");
    let outcome = super::load(global, log)?;
    log.info(&format!("source: {}", outcome.source.display()));

    log.stage("Summary");
    for line in summary(&outcome) {
        log.info(&line);
    }

    let count = outcome.diagnostics.len();
    if count > 0 {
        anyhow::bail!("{count} configuration problem(s) found");
    }
    Ok(())
}

/// One line per populated part of the configuration.
#[must_use]
pub fn summary(outcome: &LoadOutcome) -> Vec<String> {
    let config = &outcome.config;
    let menus = config.root_menus.entries();
    let buttons = config.trays.iter().map(|t| t.buttons().count()).sum::<usize>();
    vec![
        format!(
            "{} root menu(s) on slots {}",
            menus.len(),
            menus
                .iter()
                .flat_map(|m| m.slots.iter().map(u8::to_string))
                .collect::<Vec<_>>()
                .join(",")
        ),
        format!("{} key binding(s)", config.keys.len()),
        format!("{} group(s)", config.groups.len()),
        format!("{} tray(s), {buttons} button(s)", config.trays.len()),
        format!("{} desktop(s)", config.desktops.count),
        format!("{} warning(s)", outcome.diagnostics.len()),
    ]
}
