use std::sync::Arc;

use crate::api::{FeedMessage, LiveEvent, Post, ThreadId};
use crate::forest::reconcile;
use crate::live::LiveBuffer;

/// Client-side state for one active thread view: the baseline snapshot
/// owned by the query layer, the live-event buffer, and the merged forest
/// handed to the rendering layer.
///
/// The merged forest is recomputed from scratch whenever the baseline or
/// the buffer changes, never patched incrementally.
pub struct ThreadView {
    thread: ThreadId,
    baseline: Arc<Vec<Post>>,
    live: LiveBuffer,
    merged: Arc<Vec<Post>>,
}

impl ThreadView {
    /// Opens the view. This corresponds to joining the thread's event
    /// stream: the buffer starts empty, and no event history survives from
    /// any previous view of the same thread. Dropping the view is leaving
    /// the stream.
    pub fn open(thread: ThreadId) -> ThreadView {
        let baseline: Arc<Vec<Post>> = Arc::new(Vec::new());
        ThreadView {
            thread,
            merged: baseline.clone(),
            baseline,
            live: LiveBuffer::new(),
        }
    }

    pub fn thread(&self) -> ThreadId {
        self.thread
    }

    /// The merged forest currently safe to render
    pub fn posts(&self) -> Arc<Vec<Post>> {
        self.merged.clone()
    }

    pub fn pending_events(&self) -> usize {
        self.live.len()
    }

    /// Replaces the baseline with a fresh query result. Buffered events
    /// stay buffered: anything the refetch already includes collapses onto
    /// the fetched node during the re-merge.
    pub fn set_baseline(&mut self, posts: Vec<Post>) {
        self.baseline = Arc::new(posts);
        self.refresh();
    }

    /// Intake for one live event. Returns whether anything changed, which
    /// is the hosting component's cue to re-render.
    pub fn admit(&mut self, event: LiveEvent) -> bool {
        if event.post.thread != self.thread {
            tracing::debug!(
                event_thread = ?event.post.thread,
                viewing = ?self.thread,
                "ignoring live event for another thread"
            );
            return false;
        }
        let changed = self.live.admit(event, &self.baseline);
        if changed {
            self.refresh();
        }
        changed
    }

    /// Intake for a raw socket text frame; malformed payloads never reach
    /// the buffer and are only logged
    pub fn admit_json(&mut self, text: &str) -> bool {
        match serde_json::from_str::<LiveEvent>(text) {
            Ok(event) => self.admit(event),
            Err(err) => {
                tracing::warn!(%err, "dropping malformed live event");
                false
            }
        }
    }

    /// Routes a socket message: post events go through intake, everything
    /// else is not for this view
    pub fn admit_message(&mut self, msg: &FeedMessage) -> bool {
        match msg {
            FeedMessage::PostEvent(event) => self.admit(event.clone()),
            FeedMessage::Pong | FeedMessage::NewNotification(_) => false,
        }
    }

    fn refresh(&mut self) {
        self.merged = reconcile(&self.baseline, self.live.events());
    }
}
