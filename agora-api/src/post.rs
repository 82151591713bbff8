use chrono::Utc;
use uuid::Uuid;

use crate::{Author, Error, ThreadId, Time, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn stub() -> PostId {
        PostId(STUB_UUID)
    }
}

/// Moderation annotation maintained by the server; clients only display it
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Moderation {
    #[serde(default)]
    pub is_spam: bool,
    #[serde(default)]
    pub is_inappropriate: bool,
    #[serde(default)]
    pub reason: String,
}

impl Moderation {
    pub fn is_flagged(&self) -> bool {
        self.is_spam || self.is_inappropriate
    }
}

/// A single message in a thread: either a root-level reply to the thread
/// itself, or a nested reply to another post (`parent` set).
///
/// `id` and `parent` never change once the post exists; `content`,
/// `updated_at`, `moderation` and the author display fields are the mutable
/// set that an `updated` feed event may overwrite. `children` is populated by
/// the fetch endpoint when it returns a nested forest; live payloads leave it
/// empty.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub user: Author,
    pub thread: ThreadId,
    #[serde(default)]
    pub parent: Option<PostId>,
    pub content: String,
    pub created_at: Time,
    pub updated_at: Time,
    #[serde(default)]
    pub moderation: Moderation,
    #[serde(default)]
    pub children: Vec<Post>,
}

impl Post {
    pub fn now(user: Author, thread: ThreadId, parent: Option<PostId>, content: String) -> Post {
        let date = Utc::now();
        Post {
            id: PostId(Uuid::new_v4()),
            user,
            thread,
            parent,
            content,
            created_at: date,
            updated_at: date,
            moderation: Moderation::default(),
            children: Vec::new(),
        }
    }

    // See comments on other `validate` functions throughout agora-api
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_nonempty(&self.content)?;
        crate::validate_string(&self.moderation.reason)?;
        crate::validate_string(&self.user.username)
    }
}
