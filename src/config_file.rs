use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::tally::Tally;

const PROJECT_CONFIG_NAME: &str = ".wordtallyrc";

/// Configuration file handler for wordtally
#[derive(Debug, Default)]
pub struct ConfigFile {
    /// Arguments prepended to every invocation
    pub defaults: Option<String>,
    /// Counts from the `[expected]` section
    pub expected: Option<Tally>,
}

impl ConfigFile {
    /// Find project-level .wordtallyrc by walking up directory tree
    pub fn find_project_config() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;
        loop {
            let config_path = current.join(PROJECT_CONFIG_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                break;
            }
        }
        None
    }

    /// Get list of user config file locations in order of preference
    pub fn get_user_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if cfg!(windows) {
            if let Ok(appdata) = env::var("APPDATA") {
                paths.push(PathBuf::from(appdata).join("wordtally").join("config.ini"));
            }
            if let Ok(userprofile) = env::var("USERPROFILE") {
                paths.push(PathBuf::from(userprofile).join(PROJECT_CONFIG_NAME));
            }
        } else {
            let xdg_config = env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    env::var("HOME")
                        .map(|h| PathBuf::from(h).join(".config"))
                        .unwrap_or_else(|_| PathBuf::from(".config"))
                });

            paths.push(xdg_config.join("wordtally").join("config.ini"));

            if let Ok(home) = env::var("HOME") {
                paths.push(PathBuf::from(home).join(PROJECT_CONFIG_NAME));
            }
        }

        paths
    }

    /// Load configuration with proper precedence: project > user > defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::get_user_config_paths().into_iter().find(|p| p.exists()) {
            config = Self::merge_configs(config, Self::load_from_path(&path)?);
        }

        if let Some(project_path) = Self::find_project_config() {
            config = Self::merge_configs(config, Self::load_from_path(&project_path)?);
        }

        Ok(config)
    }

    /// Load configuration with optional custom config file path
    pub fn load_with_custom_path(custom_path: Option<&str>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from_path(Path::new(path)),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse_ini_content(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse INI content from string
    fn parse_ini_content(content: &str) -> Result<Self> {
        let mut defaults = None;
        let mut expected: Option<Tally> = None;
        let mut current_section = String::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let Some(eq_pos) = line.find('=') else {
                continue;
            };
            let key = line[..eq_pos].trim();
            let value = line[eq_pos + 1..].trim();

            match current_section.as_str() {
                "" if key == "defaults" => defaults = Some(value.to_string()),
                "expected" => {
                    let count: u64 = value.parse().map_err(|_| {
                        anyhow!(
                            "line {}: count for '{}' must be a non-negative integer, got '{}'",
                            line_no + 1,
                            key,
                            value
                        )
                    })?;
                    expected
                        .get_or_insert_with(Tally::new)
                        .add(&key.to_lowercase(), count);
                }
                // Unknown keys and sections are ignored
                _ => {}
            }
        }

        Ok(Self { defaults, expected })
    }

    /// Merge two configuration objects, with the second taking precedence
    fn merge_configs(base: Self, overlay: Self) -> Self {
        Self {
            defaults: overlay.defaults.or(base.defaults),
            // An expected tally is replaced as a whole, never mixed
            expected: overlay.expected.or(base.expected),
        }
    }

    /// Split the `defaults` line into arguments
    pub fn default_args(&self) -> Result<Vec<String>> {
        match &self.defaults {
            Some(defaults) => shell_words::split(defaults).with_context(|| {
                format!("Invalid defaults '{}': failed to parse arguments", defaults)
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Show configuration information with precedence details
    pub fn show_config() {
        println!("Configuration precedence: CLI > project .wordtallyrc > user config > defaults\n");

        let project_config_path = Self::find_project_config();
        let user_config_paths = Self::get_user_config_paths();
        let user_config_path = user_config_paths.iter().find(|p| p.exists());

        match Self::load() {
            Ok(merged_config) => {
                let mut loaded_from = Vec::new();
                if let Some(project_path) = &project_config_path {
                    loaded_from.push(format!("Project: {}", project_path.display()));
                }
                if let Some(user_path) = user_config_path {
                    loaded_from.push(format!("User: {}", user_path.display()));
                }

                if loaded_from.is_empty() {
                    println!("No configuration files found. Using defaults.");
                } else {
                    println!("Configuration loaded from:");
                    for source in loaded_from {
                        println!("  {}", source);
                    }
                }

                if let Some(defaults) = &merged_config.defaults {
                    println!("\nActive defaults:");
                    println!("  defaults = {}", defaults);
                }

                if let Some(expected) = &merged_config.expected {
                    println!("\nExpected counts:");
                    for (word, count) in expected.iter() {
                        println!("  {} = {}", word, count);
                    }
                }
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    crate::config::format_error_message_auto(&format!(
                        "Error loading configuration: {:#}",
                        e
                    ))
                );
            }
        }

        println!("\nConfiguration search locations (in precedence order):");
        match &project_config_path {
            Some(project_path) => println!("  1. Project: {} (found)", project_path.display()),
            None => println!("  1. Project: .wordtallyrc (searched up directory tree, not found)"),
        }
        for (i, path) in user_config_paths.iter().enumerate() {
            let status = if path.exists() { "(found)" } else { "(not found)" };
            println!("  {}. User: {} {}", i + 2, path.display(), status);
        }

        if project_config_path.is_none() && user_config_path.is_none() {
            println!("\nExample configuration file (.wordtallyrc):");
            println!();
            println!("# Arguments applied to every wordtally run");
            println!("defaults = --threads 4 --stats");
            println!();
            println!("[expected]");
            println!("love = 2413");
            println!("hamlet = 475");
        }
    }
}
