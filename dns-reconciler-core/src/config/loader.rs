//! Reading or executing the credentials file

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{CoreError, CoreResult};

use super::{ProviderConfigs, jsonc};

/// Marks a path to execute rather than read.
const EXEC_PREFIX: char = '!';

/// Loads the credentials file at `path`, substituting `$VAR` values from
/// the process environment.
///
/// A path prefixed with `!`, or a file with every execute bit set, is run
/// and its stdout parsed. A missing file yields an empty configuration.
pub fn load_provider_configs(path: &str) -> CoreResult<ProviderConfigs> {
    load_provider_configs_with(path, |name| std::env::var(name).ok())
}

/// [`load_provider_configs`] with an explicit environment lookup.
pub fn load_provider_configs_with(
    path: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> CoreResult<ProviderConfigs> {
    let source = if let Some(command) = path.strip_prefix(EXEC_PREFIX) {
        execute(command)?
    } else if is_executable(Path::new(path)) {
        execute(path)?
    } else {
        match read(Path::new(path))? {
            Some(text) => text,
            None => {
                log::info!("Config file {path:?} does not exist. Skipping.");
                return Ok(ProviderConfigs::default());
            }
        }
    };

    let mut configs = parse(&source).map_err(|e| {
        CoreError::Config(format!(
            "failed parsing provider credentials file {path}: {e}"
        ))
    })?;
    configs.substitute_env(lookup);

    log::debug!("loaded {} credential profiles from {path}", configs.len());
    Ok(configs)
}

fn parse(source: &str) -> Result<ProviderConfigs, serde_json::Error> {
    let cleaned = jsonc::strip(source);
    if cleaned.trim().is_empty() {
        return Ok(ProviderConfigs::default());
    }
    serde_json::from_str(&cleaned)
}

/// Reads a text file, `None` when it does not exist.
fn read(path: &Path) -> CoreResult<Option<String>> {
    match std::fs::read(path) {
        Ok(bytes) => decode_text(&bytes)
            .map(Some)
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "provider credentials file {} is not valid UTF-8/UTF-16",
                    path.display()
                ))
            }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CoreError::Config(format!(
            "failed reading provider credentials file {}: {e}",
            path.display()
        ))),
    }
}

/// Decodes UTF-8 (BOM optional) or BOM-marked UTF-16.
fn decode_text(bytes: &[u8]) -> Option<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).ok(),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 == 0o111)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}

/// Runs `command` and returns its stdout. Relative paths are anchored at
/// the working directory so `$PATH` is never searched.
fn execute(command: &str) -> CoreResult<String> {
    let program = if Path::new(command).is_absolute() {
        PathBuf::from(command)
    } else {
        Path::new(".").join(command)
    };
    log::debug!("executing credentials command {}", program.display());

    let output = Command::new(&program).output().map_err(|e| {
        CoreError::Config(format!(
            "failed executing credentials command {}: {e}",
            program.display()
        ))
    })?;

    if !output.status.success() {
        return Err(CoreError::Config(format!(
            "credentials command {} exited with {}: {}",
            program.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    decode_text(&output.stdout).ok_or_else(|| {
        CoreError::Config(format!(
            "credentials command {} wrote non UTF-8 output",
            program.display()
        ))
    })
}
