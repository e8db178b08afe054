//! Terminal stand-in for a file chooser.
//!
//! The user types either a path to a real file, whose size is read from the
//! filesystem, or a bare name with an optional size hint such as
//! `techpack.pdf:12mb`. Nothing is ever read or transferred.

use crate::domain::FileRef;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn hint_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?P<name>.+?):\s*(?P<size>\d+)\s*(?P<unit>b|kb|mb|gb)?$")
            .expect("valid size hint pattern")
    })
}

fn unit_multiplier(unit: &str) -> u64 {
    match unit.to_ascii_lowercase().as_str() {
        "kb" => 1024,
        "mb" => 1024 * 1024,
        "gb" => 1024 * 1024 * 1024,
        _ => 1,
    }
}

/// Turn picker input into file metadata. `None` for blank input.
pub fn resolve(input: &str) -> Option<FileRef> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let path = Path::new(input);
    if let Ok(metadata) = path.metadata() {
        if metadata.is_file() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.to_string());
            return Some(FileRef::new(name, metadata.len()));
        }
    }

    if let Some(caps) = hint_pattern().captures(input) {
        // Digits only, so a parse failure means the hint overflowed
        let size = caps["size"].parse::<u64>().unwrap_or(u64::MAX);
        let unit = caps.name("unit").map_or("b", |m| m.as_str());
        let name = Path::new(caps["name"].trim())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())?;
        return Some(FileRef::new(name, size.saturating_mul(unit_multiplier(unit))));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string());
    Some(FileRef::new(name, 0))
}
