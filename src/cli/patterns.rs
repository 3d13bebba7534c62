//! Pattern CLI commands
//!
//! Implements CLI commands for viewing and editing the backup selection.

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::display::{format_pattern_list, format_root_groups};
use crate::error::MinarcaResult;

/// Pattern subcommands
#[derive(Subcommand)]
pub enum PatternsCommands {
    /// List the selection patterns
    List,
    /// Replace the patterns with the platform defaults
    Defaults,
    /// Show the patterns split per filesystem root
    Groups,
    /// Remove the rule for a path
    Remove {
        /// Path or glob of the rule
        pattern: String,
    },
}

/// Handle a patterns command
pub fn handle_patterns_command(manager: &BackupManager, cmd: PatternsCommands) -> MinarcaResult<()> {
    match cmd {
        PatternsCommands::List => {
            let patterns = manager.patterns()?;
            print!("{}", ensure_newline(format_pattern_list(patterns.as_slice())));
        }
        PatternsCommands::Defaults => {
            let patterns = manager.restore_default_patterns()?;
            println!(
                "Restored {} default pattern(s) for {}.",
                patterns.len(),
                manager.platform()
            );
            print!("{}", ensure_newline(format_pattern_list(patterns.as_slice())));
        }
        PatternsCommands::Groups => {
            let groups = manager.group_patterns_by_root()?;
            print!("{}", ensure_newline(format_root_groups(&groups)));
        }
        PatternsCommands::Remove { pattern } => {
            let mut patterns = manager.patterns()?;
            match patterns.remove(&pattern) {
                Some(removed) => {
                    patterns.save()?;
                    println!("Removed: {}", removed);
                }
                None => println!("No rule for: {}", pattern),
            }
        }
    }

    Ok(())
}

/// Handle `include`/`exclude`
pub fn handle_select_command(manager: &BackupManager, include: bool, paths: &[String]) -> MinarcaResult<()> {
    for path in paths {
        if include {
            manager.include(path)?;
            println!("Include: {}", path);
        } else {
            manager.exclude(path)?;
            println!("Exclude: {}", path);
        }
    }
    Ok(())
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
