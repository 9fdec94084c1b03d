//! Blob naming and MIME guessing.
//!
//! Stored names are built only from the item id and a sanitized extension,
//! so the client-supplied file name can never steer where bytes land.

use std::path::Path;

use gatherer_core::types::ItemId;

/// Longest extension carried over into a stored name.
const MAX_EXTENSION_LEN: usize = 16;

/// Extension of `filename` including the leading dot, or `""`.
///
/// Only the final path component is considered, and the extension is
/// dropped unless it is short and purely ASCII alphanumeric. Dotfiles such
/// as `.bashrc` have no extension.
pub fn extension_of(filename: &str) -> String {
    let last = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match Path::new(last).extension().and_then(|e| e.to_str()) {
        Some(ext)
            if !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{ext}")
        }
        _ => String::new(),
    }
}

/// On-disk name for an item: `<id><ext>`.
pub fn stored_name(id: ItemId, filename: &str) -> String {
    format!("{id}{}", extension_of(filename))
}

/// Guess a MIME type from the sanitized extension of a file name.
pub fn mime_from_name(filename: &str) -> Option<String> {
    let ext = extension_of(filename);
    mime_guess::from_ext(ext.strip_prefix('.')?)
        .first()
        .map(|m| m.essence_str().to_string())
}
