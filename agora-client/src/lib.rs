mod forest;
pub use forest::{contains_post, find_post_mut, reconcile};

mod live;
pub use live::LiveBuffer;

mod notifications;
pub use notifications::NotificationFeed;

mod pages;
pub use pages::Paged;

mod view;
pub use view::ThreadView;

pub mod api {
    pub use agora_api::*;
}
