use super::ExportError;
use std::fs;
use std::path::Path;

/// Quotes a node name for use as a Graphviz identifier.
pub fn quote(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for ch in name.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Writes already rendered DOT text, creating parent directories as needed.
pub fn write_dot(path: &Path, dot: &str) -> Result<(), ExportError> {
    let path_str = path.to_string_lossy().to_string();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::Io {
            path: path_str.clone(),
            source: e,
        })?;
    }
    fs::write(path, dot).map_err(|e| ExportError::Io {
        path: path_str,
        source: e,
    })
}
