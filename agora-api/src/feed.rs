use crate::{Error, Notification, Post};

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveEventKind {
    Created,
    Updated,
}

/// A single post-created or post-updated delivery from the socket feed.
///
/// The payload is a full `Post`; for `updated` events only the mutable
/// fields (content, updated timestamp, moderation, author display) are
/// meaningful.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LiveEvent {
    pub kind: LiveEventKind,
    pub post: Post,
}

impl LiveEvent {
    pub fn created(post: Post) -> LiveEvent {
        LiveEvent {
            kind: LiveEventKind::Created,
            post,
        }
    }

    pub fn updated(post: Post) -> LiveEvent {
        LiveEvent {
            kind: LiveEventKind::Updated,
            post,
        }
    }

    // See comments on other `validate` functions throughout agora-api
    pub fn validate(&self) -> Result<(), Error> {
        self.post.validate()
    }
}

/// Everything the socket connection can deliver once a feed is joined
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub enum FeedMessage {
    Pong,
    PostEvent(LiveEvent),
    NewNotification(Notification),
}
