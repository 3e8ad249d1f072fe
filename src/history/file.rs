// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON-persisted history with a background writer.
//!
//! `record_choice` updates memory right away, then sends just the new
//! `(query, id)` choice to a writer thread. The writer keeps its own copy of
//! the history, applies every choice already queued and writes the file once
//! per batch. Searches never wait on disk. Choices are sent while holding the
//! sender lock, so the writer sees them in the same order as memory does.

use super::memory::{HistoryEntry, MemoryHistory};
use super::SearchHistory;
use crate::error::HistoryError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

type Snapshot = BTreeMap<String, Vec<HistoryEntry>>;

enum WriteCommand {
    Record { query: String, id: String },
    /// Reply once everything queued before this has been written, with the
    /// most recent failure since the last flush.
    Flush(Sender<Option<HistoryError>>),
    Shutdown,
}

pub struct FileHistory {
    memory: MemoryHistory,
    path: PathBuf,
    commands: Mutex<Sender<WriteCommand>>,
    writer: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for FileHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHistory")
            .field("path", &self.path)
            .field("queries", &self.memory.len())
            .finish()
    }
}

impl FileHistory {
    /// Load `path` if it exists and start the writer. A missing file is an
    /// empty history; an unreadable or corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let snapshot: Snapshot = match fs::File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Snapshot::new(),
            Err(source) => return Err(HistoryError::Io { path, source }),
        };
        let memory = MemoryHistory::from_snapshot(snapshot.clone());
        tracing::debug!(path = %path.display(), queries = memory.len(), "opened history");

        let (tx, rx) = mpsc::channel();
        let writer_path = path.clone();
        let written = MemoryHistory::from_snapshot(snapshot);
        let writer = thread::spawn(move || writer_loop(&writer_path, written, rx));

        Ok(Self {
            memory,
            path,
            commands: Mutex::new(tx),
            writer: Some(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory view, for the extra queries [`MemoryHistory`] offers.
    pub fn memory(&self) -> &MemoryHistory {
        &self.memory
    }

    /// Block until every queued write has reached disk.
    pub fn flush(&self) -> Result<(), HistoryError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        if self.commands.lock().send(WriteCommand::Flush(ack_tx)).is_err() {
            return Err(writer_gone(&self.path));
        }
        match ack_rx.recv() {
            Ok(None) => Ok(()),
            Ok(Some(err)) => Err(err),
            Err(_) => Err(writer_gone(&self.path)),
        }
    }
}

impl SearchHistory for FileHistory {
    fn most_common_id(&self, query: &str) -> Option<String> {
        self.memory.most_common_id(query)
    }

    fn record_choice(&self, query: &str, id: &str) {
        let commands = self.commands.lock();
        self.memory.record_choice(query, id);
        let command = WriteCommand::Record {
            query: query.to_string(),
            id: id.to_string(),
        };
        if commands.send(command).is_err() {
            tracing::warn!(path = %self.path.display(), "history writer stopped; choice kept in memory only");
        }
    }
}

impl Drop for FileHistory {
    fn drop(&mut self) {
        let _ = self.commands.lock().send(WriteCommand::Shutdown);
        if let Some(handle) = self.writer.take() {
            let _ = handle.join();
        }
    }
}

fn writer_loop(path: &Path, history: MemoryHistory, commands: Receiver<WriteCommand>) {
    let mut last_error: Option<HistoryError> = None;
    while let Ok(first) = commands.recv() {
        let mut dirty = false;
        let mut stop = false;
        let mut flushes = Vec::new();
        let mut next = Some(first);
        // Drain whatever is already queued, then write once
        while let Some(command) = next.take() {
            match command {
                WriteCommand::Record { query, id } => {
                    history.record_choice(&query, &id);
                    dirty = true;
                }
                WriteCommand::Flush(ack) => flushes.push(ack),
                WriteCommand::Shutdown => {
                    stop = true;
                    break;
                }
            }
            next = commands.try_recv().ok();
        }
        if dirty {
            if let Err(err) = write_snapshot(path, &history.snapshot()) {
                tracing::warn!(path = %path.display(), error = %err, "failed to persist history");
                last_error = Some(err);
            }
        }
        for ack in flushes {
            let _ = ack.send(last_error.take());
        }
        if stop {
            break;
        }
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), HistoryError> {
    let io_err = |source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    let file = fs::File::create(&tmp).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, snapshot)?;
    out.flush().map_err(io_err)?;
    drop(out);
    fs::rename(&tmp, path).map_err(io_err)
}

fn writer_gone(path: &Path) -> HistoryError {
    HistoryError::Io {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::BrokenPipe, "history writer thread stopped"),
    }
}
