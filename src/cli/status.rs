//! Status and settings CLI commands

use crate::backup::BackupManager;
use crate::display::{format_status, health, start_stop_text};
use crate::error::MinarcaResult;
use crate::models::Schedule;

/// Handle `status`
pub fn handle_status_command(manager: &BackupManager, json: bool) -> MinarcaResult<()> {
    let status = manager.status()?;
    let settings = manager.settings()?;

    if json {
        let patterns = manager.patterns()?;
        let value = serde_json::json!({
            "health": health(&status.lastresult),
            "action": start_stop_text(&status.lastresult),
            "status": status,
            "settings": settings,
            "patterns": patterns.as_slice(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", format_status(&status, &settings));
    }
    Ok(())
}

/// Handle `settings`
pub fn handle_settings_command(manager: &BackupManager) -> MinarcaResult<()> {
    let settings = manager.settings()?;
    let paths = manager.paths();

    println!("Minarca Configuration");
    println!("=====================");
    println!("Config directory: {}", paths.config_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!();
    println!("Settings:");
    for name in ["username", "repositoryname", "remotehost", "remoteurl", "schedule", "configured"] {
        println!("  {:<15} {}", name, settings.get(name).unwrap_or_default());
    }
    if let Ok(url) = settings.remote_url() {
        println!();
        println!("Browse: {}", url);
    }
    Ok(())
}

/// Handle `unlink`
pub fn handle_unlink_command(manager: &BackupManager) -> MinarcaResult<()> {
    manager.unlink()?;
    println!("Unlinked from the Minarca server.");
    Ok(())
}

/// Handle `schedule`
pub fn handle_schedule_command(manager: &BackupManager, value: &str) -> MinarcaResult<()> {
    let schedule: Schedule = value.parse()?;
    manager.set_schedule(schedule)?;
    println!("Backup every {} hour(s).", schedule.hours());
    Ok(())
}
