use std::time::Duration;

/// How long a notification stays fully visible.
pub const FADE_AFTER: Duration = Duration::from_millis(5_000);
/// How long after creation a notification is removed outright.
pub const EXPIRE_AFTER: Duration = Duration::from_millis(5_500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A short-lived user-facing message, independent of any job session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub seq: u64,
    pub message: String,
    pub severity: Severity,
    /// `false` once the fade timer has fired; the entry lingers briefly so
    /// the display layer can animate it out.
    pub visible: bool,
}

/// Strict arrival-order queue. No deduplication, no priorities; each entry
/// expires on its own timers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_seq: u64,
}

impl NotificationQueue {
    /// Appends a visible notification and returns its sequence number.
    pub fn enqueue(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.entries.push(Notification {
            seq,
            message: message.into(),
            severity,
            visible: true,
        });
        seq
    }

    /// Flips `visible` off. Returns whether anything changed; a stale seq
    /// (already expired) is ignored.
    pub fn fade(&mut self, seq: u64) -> bool {
        match self.entries.iter_mut().find(|n| n.seq == seq) {
            Some(n) if n.visible => {
                n.visible = false;
                true
            }
            _ => false,
        }
    }

    /// Removes the entry unconditionally. Returns whether it was present.
    pub fn expire(&mut self, seq: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.seq != seq);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }
}
