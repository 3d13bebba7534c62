//! Status formatting for terminal output
//!
//! Turns the persisted run status into the sentences shown to the user.

use serde::Serialize;

use crate::config::{Settings, Status};
use crate::models::LastResult;

/// Severity of the current status, used to pick a color or icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Info,
    Danger,
}

/// One-line summary of backup health
pub fn header_text(result: &LastResult) -> &'static str {
    match result {
        LastResult::Success => "Backup is healthy",
        LastResult::Failure => "Backup failed",
        LastResult::Running => "Backup in progress",
        LastResult::Stale => "Backup is stale",
        LastResult::Interrupt => "Backup was interrupted",
        LastResult::Unknown => "No backup yet",
        LastResult::Other(_) => "Backup is not healthy",
    }
}

pub fn health(result: &LastResult) -> Health {
    match result {
        LastResult::Success | LastResult::Running => Health::Healthy,
        LastResult::Unknown | LastResult::Interrupt => Health::Info,
        _ => Health::Danger,
    }
}

/// Label of the button or command toggling the backup
pub fn start_stop_text(result: &LastResult) -> &'static str {
    if result.is_active() {
        "Stop backup"
    } else {
        "Start backup"
    }
}

/// Sentence describing the last run
pub fn last_backup_text(status: &Status) -> String {
    let lastdate = status
        .lastdate
        .map(|d| d.to_string())
        .unwrap_or_else(|| "an unknown date".to_string());

    match &status.lastresult {
        LastResult::Success => format!(
            "Complete successfully on {}. No background jobs using system resources.",
            lastdate
        ),
        LastResult::Failure => format!(
            "Last backup failed on {} for the following reason: {}\nNo background jobs using system resources.",
            lastdate,
            status.details.as_deref().unwrap_or("unknown")
        ),
        LastResult::Running => {
            "Backup is currently running in background and using system resources.".to_string()
        }
        LastResult::Stale => format!(
            "Was started in background on {}, but is currently stale an may use system resources.",
            lastdate
        ),
        LastResult::Interrupt => format!(
            "Was interrupted on {}. May be caused by loss of connection, computer standby or manual interruption.\nNo background jobs using system resources.",
            lastdate
        ),
        LastResult::Unknown => "Initial backup need to be started. You may take time to configure your parameters and start your initial backup manually.\nNo background jobs using system resources.".to_string(),
        LastResult::Other(_) => "unknown".to_string(),
    }
}

/// `user @ host::repository`
pub fn remote_text(settings: &Settings) -> String {
    format!(
        "{} @ {}::{}",
        settings.username.as_deref().unwrap_or("?"),
        settings.remotehost.as_deref().unwrap_or("?"),
        settings.repositoryname.as_deref().unwrap_or("?")
    )
}

/// Full status report for the `status` command
pub fn format_status(status: &Status, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(header_text(&status.lastresult));
    output.push('\n');
    output.push_str(&last_backup_text(status));
    output.push('\n');
    if settings.configured {
        output.push_str(&format!("Remote: {}\n", remote_text(settings)));
    } else {
        output.push_str("Not linked to a Minarca server.\n");
    }
    output.push_str(&format!(
        "Schedule: every {} hour(s){}\n",
        settings.schedule.hours(),
        settings
            .schedule
            .name()
            .map(|n| format!(" ({})", n))
            .unwrap_or_default()
    ));
    if let Some(lastsuccess) = status.lastsuccess {
        output.push_str(&format!("Last success: {}\n", lastsuccess));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Datetime;

    #[test]
    fn test_header_text() {
        assert_eq!(header_text(&LastResult::Success), "Backup is healthy");
        assert_eq!(header_text(&LastResult::Unknown), "No backup yet");
        assert_eq!(header_text(&LastResult::Other("BOGUS".into())), "Backup is not healthy");
    }

    #[test]
    fn test_health() {
        assert_eq!(health(&LastResult::Running), Health::Healthy);
        assert_eq!(health(&LastResult::Interrupt), Health::Info);
        assert_eq!(health(&LastResult::Stale), Health::Danger);
        assert_eq!(health(&LastResult::Other("X".into())), Health::Danger);
    }

    #[test]
    fn test_health_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Health::Danger).unwrap(), "danger");
        assert_eq!(serde_json::to_value(Health::Healthy).unwrap(), "healthy");
    }

    #[test]
    fn test_start_stop_text() {
        assert_eq!(start_stop_text(&LastResult::Running), "Stop backup");
        assert_eq!(start_stop_text(&LastResult::Stale), "Stop backup");
        assert_eq!(start_stop_text(&LastResult::Failure), "Start backup");
    }

    #[test]
    fn test_last_backup_text_failure_includes_details() {
        let mut status = Status::new("unused");
        status.lastresult = LastResult::Failure;
        status.lastdate = Some(Datetime::from_epoch_ms(1_623_000_000_000));
        status.details = Some("disk full".into());

        let text = last_backup_text(&status);
        assert!(text.starts_with("Last backup failed on "));
        assert!(text.contains(&Datetime::from_epoch_ms(1_623_000_000_000).to_string()));
        assert!(text.contains("disk full"));
    }

    #[test]
    fn test_format_status() {
        let status = Status::new("unused");
        let mut settings = Settings::new("unused");
        settings.configured = true;
        settings.username = Some("joe".into());
        settings.remotehost = Some("backup.example.com".into());
        settings.repositoryname = Some("laptop".into());

        let text = format_status(&status, &settings);
        assert!(text.starts_with("No backup yet\n"));
        assert!(text.contains("Remote: joe @ backup.example.com::laptop\n"));
        assert!(text.contains("Schedule: every 24 hour(s) (daily)\n"));
        assert!(!text.contains("Last success"));
    }
}
