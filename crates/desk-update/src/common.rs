//! Shared mutation helpers.

use desk_core::Extra;

/// Shallow-merge `update` into `existing` settings.
///
/// Top-level keys in the update replace matching keys whole, even when the
/// value is itself an object; keys absent from the update are preserved.
pub fn merge_settings(existing: &mut Extra, update: Extra) {
    for (key, value) in update {
        existing.insert(key, value);
    }
}
