pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<chrono::Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod error;
pub use error::Error;

mod feed;
pub use feed::{FeedMessage, LiveEvent, LiveEventKind};

mod notification;
pub use notification::{Notification, NotificationId, NotificationKind};

mod page;
pub use page::Pagination;

mod post;
pub use post::{Moderation, Post, PostId};

mod thread;
pub use thread::{Thread, ThreadId};

mod user;
pub use user::{Author, UserId};

/// The backend rejects null bytes in any submitted text
pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

pub fn validate_nonempty(s: &str) -> Result<(), Error> {
    validate_string(s)?;
    match s.trim().is_empty() {
        true => Err(Error::EmptyString),
        false => Ok(()),
    }
}
