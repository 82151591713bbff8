use chrono::Utc;
use uuid::Uuid;

use crate::{Author, Error, Time, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct ThreadId(pub Uuid);

impl ThreadId {
    pub fn stub() -> ThreadId {
        ThreadId(STUB_UUID)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    #[serde(rename = "_id")]
    pub id: ThreadId,
    pub user: Author,
    pub title: String,
    pub content: String,
    pub created_at: Time,
    pub updated_at: Time,
}

impl Thread {
    pub fn now(user: Author, title: String, content: String) -> Thread {
        let date = Utc::now();
        Thread {
            id: ThreadId(Uuid::new_v4()),
            user,
            title,
            content,
            created_at: date,
            updated_at: date,
        }
    }

    // See comments on other `validate` functions throughout agora-api
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_nonempty(&self.title)?;
        crate::validate_nonempty(&self.content)?;
        crate::validate_string(&self.user.username)
    }
}
