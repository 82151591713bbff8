//! In-memory stand-in for the forum's HTTP API and socket server, for
//! tests: threads, nested post forests, moderation flagging, notification
//! generation, and per-thread / per-user live feeds.

use std::collections::{btree_map, BTreeMap};

use agora_client::api::{
    Author, Error, FeedMessage, LiveEvent, Moderation, Notification, NotificationKind, Pagination,
    Post, PostId, Thread, ThreadId, UserId, Uuid,
};
use tokio::sync::mpsc;

pub struct MockServer {
    users: BTreeMap<UserId, DbUser>,
    threads: BTreeMap<ThreadId, DbThread>,
}

struct DbUser {
    author: Author,
    /// Newest first, like the notifications endpoint returns them
    notifications: Vec<Notification>,
    feeds: Vec<mpsc::UnboundedSender<FeedMessage>>,
}

struct DbThread {
    thread: Thread,
    owner: UserId,
    /// Flat, in creation order; `children` stays empty here and is only
    /// assembled on fetch
    posts: Vec<DbPost>,
    feeds: Vec<mpsc::UnboundedSender<FeedMessage>>,
}

struct DbPost {
    owner: UserId,
    post: Post,
}

impl DbUser {
    fn relay(&mut self, msg: FeedMessage) {
        self.feeds
            .retain_mut(|f| matches!(f.send(msg.clone()), Ok(())));
    }
}

impl DbThread {
    fn relay(&mut self, msg: FeedMessage) {
        self.feeds
            .retain_mut(|f| matches!(f.send(msg.clone()), Ok(())));
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            users: BTreeMap::new(),
            threads: BTreeMap::new(),
        }
    }

    pub fn create_user(&mut self, username: &str) -> Result<UserId, Error> {
        agora_client::api::validate_nonempty(username)?;
        if self.users.values().any(|u| u.author.username == username) {
            return Err(Error::NameAlreadyUsed(String::from(username)));
        }
        let id = UserId(Uuid::new_v4());
        self.users.insert(
            id,
            DbUser {
                author: Author {
                    username: String::from(username),
                },
                notifications: Vec::new(),
                feeds: Vec::new(),
            },
        );
        Ok(id)
    }

    pub fn create_thread(
        &mut self,
        user: UserId,
        title: String,
        content: String,
    ) -> Result<ThreadId, Error> {
        let author = self.resolve(user)?.author.clone();
        let thread = Thread::now(author, title, content);
        thread.validate()?;
        let id = thread.id;
        match self.threads.entry(id) {
            btree_map::Entry::Occupied(_) => Err(Error::Unknown(String::from("uuid collision"))),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(DbThread {
                    thread,
                    owner: user,
                    posts: Vec::new(),
                    feeds: Vec::new(),
                });
                Ok(id)
            }
        }
    }

    /// Threads newest first, as the listing endpoint pages them
    pub fn fetch_threads(&self, page: u32, limit: u32) -> (Vec<Thread>, Pagination) {
        let mut threads: Vec<&Thread> = self.threads.values().map(|t| &t.thread).collect();
        threads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        page_of(&threads, page, limit)
    }

    pub fn fetch_thread(&self, thread: ThreadId) -> Result<Thread, Error> {
        Ok(self
            .threads
            .get(&thread)
            .ok_or(Error::ThreadNotFound(thread.0))?
            .thread
            .clone())
    }

    /// The nested forest the posts endpoint returns: replies attached
    /// under their parent, in creation order at every level
    pub fn fetch_posts(&self, thread: ThreadId) -> Result<Vec<Post>, Error> {
        let t = self
            .threads
            .get(&thread)
            .ok_or(Error::ThreadNotFound(thread.0))?;
        let mut forest: Vec<Post> = Vec::new();
        for p in &t.posts {
            let node = p.post.clone();
            if let Some(parent) = node
                .parent
                .and_then(|pid| agora_client::find_post_mut(&mut forest, &pid))
            {
                parent.children.push(node);
            } else {
                forest.push(node);
            }
        }
        Ok(forest)
    }

    pub fn submit_post(
        &mut self,
        user: UserId,
        thread: ThreadId,
        parent: Option<PostId>,
        content: String,
    ) -> Result<Post, Error> {
        let author = self.resolve(user)?.author.clone();
        let t = self
            .threads
            .get_mut(&thread)
            .ok_or(Error::ThreadNotFound(thread.0))?;
        let notify = match parent {
            Some(parent_id) => {
                let parent_post = t
                    .posts
                    .iter()
                    .find(|p| p.post.id == parent_id)
                    .ok_or(Error::PostNotFound(parent_id.0))?;
                (
                    parent_post.owner,
                    NotificationKind::Replied,
                    format!("{} replied to your post", author.username),
                )
            }
            None => (
                t.owner,
                NotificationKind::Posted,
                format!(
                    "{} posted in your thread {}",
                    author.username, t.thread.title
                ),
            ),
        };

        let post = Post::now(author, thread, parent, content);
        post.validate()?;
        t.posts.push(DbPost {
            owner: user,
            post: post.clone(),
        });
        t.relay(FeedMessage::PostEvent(LiveEvent::created(post.clone())));

        let (recipient, kind, message) = notify;
        if recipient != user {
            let notification =
                Notification::now(recipient, thread, Some(post.id), kind, message);
            if let Some(u) = self.users.get_mut(&recipient) {
                u.notifications.insert(0, notification.clone());
                u.relay(FeedMessage::NewNotification(notification));
            }
        }
        Ok(post)
    }

    /// Author-only edit; relays an `updated` event to thread subscribers
    pub fn edit_post(
        &mut self,
        user: UserId,
        thread: ThreadId,
        post: PostId,
        content: String,
    ) -> Result<Post, Error> {
        self.resolve(user)?;
        let t = self
            .threads
            .get_mut(&thread)
            .ok_or(Error::ThreadNotFound(thread.0))?;
        let p = t
            .posts
            .iter_mut()
            .find(|p| p.post.id == post)
            .ok_or(Error::PostNotFound(post.0))?;
        if p.owner != user {
            return Err(Error::PermissionDenied);
        }
        agora_client::api::validate_nonempty(&content)?;
        p.post.content = content;
        p.post.updated_at = chrono::Utc::now();
        let updated = p.post.clone();
        t.relay(FeedMessage::PostEvent(LiveEvent::updated(updated.clone())));
        Ok(updated)
    }

    /// What the backend's moderation pass does: annotate a post and relay
    /// the change as an `updated` event
    pub fn flag_post(
        &mut self,
        thread: ThreadId,
        post: PostId,
        moderation: Moderation,
    ) -> Result<(), Error> {
        let t = self
            .threads
            .get_mut(&thread)
            .ok_or(Error::ThreadNotFound(thread.0))?;
        let p = t
            .posts
            .iter_mut()
            .find(|p| p.post.id == post)
            .ok_or(Error::PostNotFound(post.0))?;
        p.post.moderation = moderation;
        p.post.updated_at = chrono::Utc::now();
        let updated = p.post.clone();
        t.relay(FeedMessage::PostEvent(LiveEvent::updated(updated)));
        Ok(())
    }

    /// Joins a thread's event stream; dropping the receiver leaves it
    pub fn join_thread(
        &mut self,
        thread: ThreadId,
    ) -> Result<mpsc::UnboundedReceiver<FeedMessage>, Error> {
        let t = self
            .threads
            .get_mut(&thread)
            .ok_or(Error::ThreadNotFound(thread.0))?;
        let (sender, receiver) = mpsc::unbounded_channel();
        t.feeds.push(sender);
        Ok(receiver)
    }

    /// Joins a user's notification stream
    pub fn join_user(
        &mut self,
        user: UserId,
    ) -> Result<mpsc::UnboundedReceiver<FeedMessage>, Error> {
        let u = self.users.get_mut(&user).ok_or(Error::PermissionDenied)?;
        let (sender, receiver) = mpsc::unbounded_channel();
        u.feeds.push(sender);
        Ok(receiver)
    }

    pub fn fetch_notifications(
        &self,
        user: UserId,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Notification>, Pagination), Error> {
        let u = self.resolve(user)?;
        let all: Vec<&Notification> = u.notifications.iter().collect();
        Ok(page_of(&all, page, limit))
    }

    fn resolve(&self, user: UserId) -> Result<&DbUser, Error> {
        self.users.get(&user).ok_or(Error::PermissionDenied)
    }
}

fn page_of<T: Clone>(items: &[&T], page: u32, limit: u32) -> (Vec<T>, Pagination) {
    let limit = limit.max(1);
    let start = page.saturating_sub(1) as usize * limit as usize;
    let slice = items
        .iter()
        .skip(start)
        .take(limit as usize)
        .map(|item| (*item).clone())
        .collect();
    (
        slice,
        Pagination::for_listing(items.len() as u64, page, limit),
    )
}
