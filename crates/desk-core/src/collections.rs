//! Bounded and keyed collection operations.
//!
//! Every history list in the document is newest-first: insertion happens at
//! the head and eviction truncates the tail. Keyed collections hold at most
//! one entry per key; an upsert replaces in place so the entry keeps its
//! position in the sequence.

/// Maximum retained entries in a bot's activity log.
pub const ACTIVITY_LOG_LIMIT: usize = 50;

/// Maximum retained entries in trade/position histories.
pub const TRADE_HISTORY_LIMIT: usize = 100;

/// Maximum retained senator-trade entries in the daily brief.
pub const SENATOR_TRADES_LIMIT: usize = 50;

/// Entries taken from a bot's native file when importing preview lists
/// (closed positions, recent activity).
pub const IMPORT_PREVIEW_LIMIT: usize = 5;

/// Insert `item` at the head and evict anything past `limit` from the tail.
pub fn prepend_bounded<T>(list: &mut Vec<T>, item: T, limit: usize) {
    list.insert(0, item);
    list.truncate(limit);
}

/// Replace the entry whose key matches `item`'s key, keeping its slot in
/// the sequence; append when no entry matches.
pub fn upsert_by_key<T, F>(list: &mut Vec<T>, item: T, key: F)
where
    F: Fn(&T) -> &str,
{
    match list.iter().position(|entry| key(entry) == key(&item)) {
        Some(idx) => list[idx] = item,
        None => list.push(item),
    }
}

/// Drop every entry whose key equals `target`.
///
/// Removing an absent key is a no-op, not an error.
pub fn remove_by_key<T, F>(list: &mut Vec<T>, target: &str, key: F)
where
    F: Fn(&T) -> &str,
{
    list.retain(|entry| key(entry) != target);
}
