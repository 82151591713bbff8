use crate::api::{Notification, Pagination};
use crate::pages::Paged;

/// Merge of the fetched notification history with notifications arriving
/// live over the socket while the menu is mounted.
///
/// Live arrivals are kept newest-first ahead of the fetched pages; a
/// fetched notification shadowed by a live one with the same id is not
/// listed twice. `has_new` latches when something arrives live and clears
/// when the user opens the menu.
#[derive(Clone, Debug, Default)]
pub struct NotificationFeed {
    realtime: Vec<Notification>,
    fetched: Paged<Notification>,
    has_new: bool,
}

impl NotificationFeed {
    pub fn new() -> NotificationFeed {
        NotificationFeed {
            realtime: Vec::new(),
            fetched: Paged::new(),
            has_new: false,
        }
    }

    /// Records one fetched page of history
    pub fn record_page(&mut self, page: u32, items: Vec<Notification>, pagination: &Pagination) {
        self.fetched.record(page, items, pagination);
    }

    /// Intake for a live notification; returns whether it was new (the cue
    /// to re-render and to resync with the backend)
    pub fn admit(&mut self, notification: Notification) -> bool {
        if self.realtime.iter().any(|n| n.id == notification.id) {
            return false;
        }
        self.realtime.insert(0, notification);
        self.has_new = true;
        true
    }

    /// Everything to display: live arrivals first, then fetched history
    /// not shadowed by a live arrival
    pub fn list(&self) -> Vec<&Notification> {
        let mut out: Vec<&Notification> = self.realtime.iter().collect();
        out.extend(
            self.fetched
                .iter()
                .filter(|n| !self.realtime.iter().any(|r| r.id == n.id)),
        );
        out
    }

    pub fn has_more(&self) -> bool {
        self.fetched.has_more()
    }

    pub fn has_new(&self) -> bool {
        self.has_new
    }

    pub fn mark_seen(&mut self) {
        self.has_new = false;
    }

    /// Drives the unread badge
    pub fn has_unread(&self) -> bool {
        self.has_new || self.list().iter().any(|n| !n.is_read)
    }
}
