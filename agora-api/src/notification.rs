use uuid::Uuid;

use crate::{PostId, ThreadId, Time, UserId, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn stub() -> NotificationId {
        NotificationId(STUB_UUID)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone posted a root-level reply in a thread the recipient owns
    Posted,
    /// Someone replied to one of the recipient's posts
    Replied,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: NotificationId,
    pub user: UserId,
    pub thread: ThreadId,
    #[serde(default)]
    pub post: Option<PostId>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: Time,
}

impl Notification {
    pub fn now(
        user: UserId,
        thread: ThreadId,
        post: Option<PostId>,
        kind: NotificationKind,
        message: String,
    ) -> Notification {
        Notification {
            id: NotificationId(Uuid::new_v4()),
            user,
            thread,
            post,
            kind,
            message,
            is_read: false,
            created_at: chrono::Utc::now(),
        }
    }
}
