use crate::cli::parser::Commands;
use crate::config::{Config, migrate};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{}", yaml);
        }

        // ---- CHECK CONFIG ----
        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}. Run `clampkeeper init` first.",
                    path.display()
                ));
            } else {
                let added = migrate::add_missing_keys(&path)?;
                if added.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    success(format!("Added missing keys: {}", added.join(", ")));
                }
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let fallback = default_editor();
            let editor_to_use = editor.clone().unwrap_or_else(|| fallback.clone());

            let edited = Command::new(&editor_to_use)
                .arg(&path)
                .status()
                .map(|s| s.success())
                .unwrap_or(false);

            if edited {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
            } else if editor_to_use != fallback {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, fallback
                ));
                let status = Command::new(&fallback)
                    .arg(&path)
                    .status()
                    .map_err(|e| AppError::Config(format!("cannot run '{}': {}", fallback, e)))?;
                if !status.success() {
                    return Err(AppError::Config(format!(
                        "editor '{}' exited with {}",
                        fallback, status
                    )));
                }
                info("Configuration file edited.");
            } else {
                return Err(AppError::Config(format!(
                    "failed to edit configuration file using '{}'",
                    editor_to_use
                )));
            }
        }
    }

    Ok(())
}
