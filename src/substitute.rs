//! The substitution engine.
//! Applies a replacement map to a byte buffer and rewrites files in place.

use log::info;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::resolver::ReplacementMap;

/// Permission bits applied to every rewritten file on Unix, regardless of
/// the original bits.
#[cfg(unix)]
const REWRITE_MODE: u32 = 0o644;

/// Wraps a placeholder name in the literal token syntax.
pub fn token(name: &str) -> String {
    format!("_{{{}}}_", name)
}

/// Map keys in application order: longest first, ties broken
/// lexicographically, so output is reproducible when token patterns
/// overlap.
fn sorted_keys(map: &ReplacementMap) -> Vec<&String> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    keys
}

fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(at) = rest
        .windows(needle.len())
        .position(|window| window == needle)
    {
        result.extend_from_slice(&rest[..at]);
        result.extend_from_slice(replacement);
        rest = &rest[at + needle.len()..];
    }
    result.extend_from_slice(rest);
    result
}

/// Replaces every occurrence of each key's token with its value.
///
/// Keys are applied longest first (ties broken lexicographically) so that
/// output is reproducible when token patterns overlap. Replacement is plain
/// substring search; there is no escaping mechanism.
///
/// # Arguments
/// * `content` - Input text buffer
/// * `map` - Resolved name-to-value table
///
/// # Returns
/// * `String` - The buffer with all known tokens replaced
pub fn apply(content: &str, map: &ReplacementMap) -> String {
    let mut result = content.to_string();
    for key in sorted_keys(map) {
        result = result.replace(&token(key), &map[key.as_str()]);
    }
    result
}

/// Byte-level counterpart of [`apply`].
///
/// Content is not required to be valid UTF-8: binary files are neither
/// detected nor excluded, their bytes pass through unchanged unless they
/// happen to contain a token pattern.
pub fn apply_bytes(content: &[u8], map: &ReplacementMap) -> Vec<u8> {
    let mut result = content.to_vec();
    for key in sorted_keys(map) {
        result = replace_bytes(&result, token(key).as_bytes(), map[key.as_str()].as_bytes());
    }
    result
}

/// Rewrites one file in place with all tokens substituted.
///
/// The file is fully read as raw bytes, transformed in memory, and written
/// back to the same path with fixed permissions. A file containing no
/// tokens is rewritten unchanged.
///
/// # Errors
/// * `StampError::IoError` if the file cannot be read or written
pub fn process_file<P: AsRef<Path>>(path: P, map: &ReplacementMap) -> Result<()> {
    let path = path.as_ref();
    let content = fs::read(path)?;
    fs::write(path, apply_bytes(&content, map))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(REWRITE_MODE))?;
    }

    info!("File {} processed", path.display());
    Ok(())
}
