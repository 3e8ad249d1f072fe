// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use super::SearchHistory;
use crate::util::normalize::query_key;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// How often one id was chosen for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub count: u32,
}

/// In-memory history keyed by normalized query.
///
/// Entries per query keep first-recorded order, so among equally frequent ids
/// the one chosen first wins.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: RwLock<HashMap<String, Vec<HistoryEntry>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from a snapshot. Keys are re-normalized; zero counts dropped.
    pub fn from_snapshot(snapshot: BTreeMap<String, Vec<HistoryEntry>>) -> Self {
        let mut entries: HashMap<String, Vec<HistoryEntry>> = HashMap::new();
        for (query, list) in snapshot {
            let slot = entries.entry(query_key(&query)).or_default();
            for entry in list.into_iter().filter(|e| e.count > 0) {
                bump(slot, &entry.id, entry.count);
            }
        }
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Sorted copy of everything recorded, suitable for serialization.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<HistoryEntry>> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Runner-up id for `query`, if at least two distinct ids were chosen.
    pub fn second_most_common(&self, query: &str) -> Option<String> {
        let entries = self.entries.read();
        let list = entries.get(&query_key(query))?;
        let best = best_index(list)?;
        let mut second: Option<&HistoryEntry> = None;
        for (i, entry) in list.iter().enumerate() {
            if i == best {
                continue;
            }
            if second.map_or(true, |s| entry.count > s.count) {
                second = Some(entry);
            }
        }
        second.map(|e| e.id.clone())
    }

    /// Every recorded query paired with its most common id, sorted by query.
    ///
    /// This is the input format of [`crate::evaluation::evaluate`].
    pub fn query_id_pairs(&self) -> Vec<(String, String)> {
        let entries = self.entries.read();
        let mut pairs: Vec<(String, String)> = entries
            .iter()
            .filter_map(|(query, list)| {
                best_index(list).map(|i| (query.clone(), list[i].id.clone()))
            })
            .collect();
        pairs.sort();
        pairs
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SearchHistory for MemoryHistory {
    fn most_common_id(&self, query: &str) -> Option<String> {
        let entries = self.entries.read();
        let list = entries.get(&query_key(query))?;
        best_index(list).map(|i| list[i].id.clone())
    }

    fn record_choice(&self, query: &str, id: &str) {
        let key = query_key(query);
        if key.is_empty() || id.is_empty() {
            return;
        }
        let mut entries = self.entries.write();
        bump(entries.entry(key).or_default(), id, 1);
    }
}

fn bump(list: &mut Vec<HistoryEntry>, id: &str, by: u32) {
    match list.iter_mut().find(|e| e.id == id) {
        Some(entry) => entry.count = entry.count.saturating_add(by),
        None => list.push(HistoryEntry {
            id: id.to_string(),
            count: by,
        }),
    }
}

/// Index of the highest count; earliest entry wins ties.
fn best_index(list: &[HistoryEntry]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, entry) in list.iter().enumerate() {
        if best.map_or(true, |b| entry.count > list[b].count) {
            best = Some(i);
        }
    }
    best
}
