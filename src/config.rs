use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_restore: bool,
    pub template: Option<String>,
    pub marker: Option<String>,
    pub state_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_restore: self.no_restore || other.no_restore,
            template: other.template.clone().or_else(|| self.template.clone()),
            marker: other.marker.clone().or_else(|| self.marker.clone()),
            state_file: other
                .state_file
                .clone()
                .or_else(|| self.state_file.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("linenav"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("linenav"),
            );
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("linenav"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".config").join("linenav"));
        }
    }

    None
}

pub fn global_config_path() -> PathBuf {
    config_dir().map_or_else(local_override_path, |dir| dir.join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".linenavrc")
}

/// Default location of the persisted session.
pub fn default_state_path() -> PathBuf {
    config_dir().map_or_else(
        || PathBuf::from(".linenav-session.json"),
        |dir| dir.join("session.json"),
    )
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split a config line into flag tokens.
///
/// `--flag value` keeps everything after the first space as the value so
/// templates containing spaces survive a save/load cycle.
fn line_tokens(line: &str) -> Vec<String> {
    match line.split_once(char::is_whitespace) {
        Some((flag, value)) if flag.starts_with("--") && !value.trim().is_empty() => {
            vec![flag.to_string(), value.trim().to_string()]
        }
        _ => vec![line.to_string()],
    }
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# linenav defaults (saved with --save)".to_string());
    if flags.no_restore {
        lines.push("--no-restore".to_string());
    }
    if let Some(template) = &flags.template {
        lines.push(format!("--template {template}"));
    }
    if let Some(marker) = &flags.marker {
        lines.push(format!("--marker {marker}"));
    }
    if let Some(path) = &flags.state_file {
        lines.push(format!("--state-file {}", path.display()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-restore" {
            flags.no_restore = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_value(&mut flags, name, value);
        } else if is_value_flag(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_value(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

fn is_value_flag(token: &str) -> bool {
    matches!(
        token,
        "--template" | "--marker" | "--state-file" | "--log-file"
    )
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--template" => flags.template = Some(value.to_string()),
        "--marker" if !value.is_empty() => flags.marker = Some(value.to_string()),
        "--state-file" => flags.state_file = Some(PathBuf::from(value)),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
