//! Best-effort audit trail.
//!
//! Mutations hand entries to a writer thread and return immediately; a failed
//! audit write is logged and never fails the mutation it describes.

use crate::db::Database;
use crate::models::AuditEntry;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

enum Message {
    Entry(Box<AuditEntry>),
    Flush(Sender<()>),
}

/// Handle for appending audit entries. Cheap to clone.
#[derive(Clone)]
pub struct AuditLog {
    tx: Sender<Message>,
}

/// Owns the writer thread. It exits once every `AuditLog` handle is dropped.
pub struct AuditWorker {
    handle: JoinHandle<()>,
}

impl AuditLog {
    pub fn spawn(db: Arc<Mutex<Database>>) -> (Self, AuditWorker) {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || write_loop(&db, &rx));
        (Self { tx }, AuditWorker { handle })
    }

    /// Queue an entry. Never blocks on the store.
    pub fn record(&self, entry: AuditEntry) {
        if self.tx.send(Message::Entry(Box::new(entry))).is_err() {
            log::error!("Audit writer has stopped; entry dropped");
        }
    }

    /// Wait until every entry queued before this call has been written.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = mpsc::channel();
        if self.tx.send(Message::Flush(ack_tx)).is_err() {
            log::error!("Audit writer has stopped; nothing to flush");
            return;
        }
        if ack_rx.recv().is_err() {
            log::error!("Audit writer exited before acknowledging flush");
        }
    }
}

impl AuditWorker {
    pub fn join(self) {
        if self.handle.join().is_err() {
            log::error!("Audit writer thread panicked");
        }
    }
}

fn write_loop(db: &Arc<Mutex<Database>>, rx: &Receiver<Message>) {
    while let Ok(message) = rx.recv() {
        match message {
            Message::Entry(entry) => write(db, &entry),
            Message::Flush(ack) => {
                // The requester may have given up waiting.
                let _ = ack.send(());
            }
        }
    }
    log::debug!("Audit writer stopped");
}

fn write(db: &Arc<Mutex<Database>>, entry: &AuditEntry) {
    let Ok(db) = db.lock() else {
        log::error!("Failed to acquire database lock for audit entry");
        return;
    };
    if let Err(e) = entry.save(db.connection()) {
        log::error!(
            "Failed to write audit entry ({} on {}): {e}",
            entry.action.as_str(),
            entry.table_name
        );
    }
}
