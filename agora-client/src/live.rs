use crate::api::{LiveEvent, LiveEventKind, Post};
use crate::forest::contains_post;

/// Ordered buffer of live events accumulated since the baseline snapshot
/// was fetched. Owned by exactly one thread view; a fresh view starts a
/// fresh buffer.
#[derive(Clone, Debug, Default)]
pub struct LiveBuffer {
    events: Vec<LiveEvent>,
}

impl LiveBuffer {
    pub fn new() -> LiveBuffer {
        LiveBuffer { events: Vec::new() }
    }

    pub fn events(&self) -> &[LiveEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Decides whether `event` carries anything new relative to the buffer
    /// and `baseline`, buffering it if so. Returns whether the buffer
    /// changed, the caller's cue to re-merge.
    ///
    /// A creation whose id is already buffered or already anywhere in the
    /// baseline is a redundant delivery and is discarded. An update is
    /// redundant only when identical to something already buffered;
    /// otherwise it coalesces onto the buffered event for the same id, so
    /// the buffer stays bounded under repeated edits of one post.
    pub fn admit(&mut self, event: LiveEvent, baseline: &[Post]) -> bool {
        match event.kind {
            LiveEventKind::Created => {
                if self.events.iter().any(|e| e.post.id == event.post.id)
                    || contains_post(baseline, &event.post.id)
                {
                    tracing::debug!(post = ?event.post.id, "discarding redundant creation delivery");
                    return false;
                }
                self.events.push(event);
                true
            }
            LiveEventKind::Updated => {
                if self.events.iter().any(|e| *e == event) {
                    tracing::debug!(post = ?event.post.id, "discarding redundant update delivery");
                    return false;
                }
                if let Some(buffered) =
                    self.events.iter_mut().find(|e| e.post.id == event.post.id)
                {
                    // Later write wins; a buffered insertion stays an insertion
                    buffered.post.content = event.post.content;
                    buffered.post.updated_at = event.post.updated_at;
                    buffered.post.moderation = event.post.moderation;
                    buffered.post.user = event.post.user;
                } else {
                    self.events.push(event);
                }
                true
            }
        }
    }
}
