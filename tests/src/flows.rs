use agora_client::api::{Error, FeedMessage, Moderation, ThreadId, Uuid};
use agora_client::{NotificationFeed, Paged, ThreadView};
use agora_mock_server::MockServer;
use tokio::sync::mpsc;

fn recv(feed: &mut mpsc::UnboundedReceiver<FeedMessage>) -> FeedMessage {
    feed.try_recv().expect("expected a feed message")
}

#[test]
fn live_replies_reach_the_open_view() {
    let mut server = MockServer::new();
    let alice = server.create_user("alice").expect("creating alice");
    let bob = server.create_user("bob").expect("creating bob");
    let thread = server
        .create_thread(alice, String::from("Hello"), String::from("first!"))
        .expect("creating thread");

    let mut feed = server.join_thread(thread).expect("joining thread feed");
    let mut view = ThreadView::open(thread);
    view.set_baseline(server.fetch_posts(thread).expect("fetching posts"));
    assert!(view.posts().is_empty());

    let root = server
        .submit_post(bob, thread, None, String::from("welcome"))
        .expect("submitting root post");
    assert!(view.admit_message(&recv(&mut feed)));
    assert_eq!(view.posts().len(), 1);

    let reply = server
        .submit_post(alice, thread, Some(root.id), String::from("thanks"))
        .expect("submitting reply");
    assert!(view.admit_message(&recv(&mut feed)));
    let merged = view.posts();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].children.len(), 1);
    assert_eq!(merged[0].children[0].id, reply.id);

    // Leaving the feed must not break later submissions
    drop(feed);
    server
        .submit_post(bob, thread, None, String::from("still fine"))
        .expect("submitting after a subscriber left");
}

#[test]
fn refetch_collapses_live_duplicates() {
    let mut server = MockServer::new();
    let alice = server.create_user("alice").expect("creating alice");
    let bob = server.create_user("bob").expect("creating bob");
    let thread = server
        .create_thread(alice, String::from("Dup"), String::from("hunting"))
        .expect("creating thread");

    let mut feed = server.join_thread(thread).expect("joining thread feed");
    let mut view = ThreadView::open(thread);
    view.set_baseline(server.fetch_posts(thread).expect("fetching posts"));

    let post = server
        .submit_post(bob, thread, None, String::from("seen live"))
        .expect("submitting post");
    let event = recv(&mut feed);
    assert!(view.admit_message(&event));

    // The refetch now includes the post the socket already delivered
    view.set_baseline(server.fetch_posts(thread).expect("refetching posts"));
    let merged = view.posts();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, post.id);

    // A redelivery of the same creation is recognized as redundant
    assert!(!view.admit_message(&event));
    assert_eq!(view.posts().len(), 1);
}

#[test]
fn edits_relay_and_later_write_wins() {
    let mut server = MockServer::new();
    let alice = server.create_user("alice").expect("creating alice");
    let bob = server.create_user("bob").expect("creating bob");
    let thread = server
        .create_thread(alice, String::from("Edits"), String::from("body"))
        .expect("creating thread");

    let mut feed = server.join_thread(thread).expect("joining thread feed");
    let mut view = ThreadView::open(thread);
    view.set_baseline(server.fetch_posts(thread).expect("fetching posts"));

    let post = server
        .submit_post(bob, thread, None, String::from("v0"))
        .expect("submitting post");
    assert!(view.admit_message(&recv(&mut feed)));

    assert_eq!(
        server.edit_post(alice, thread, post.id, String::from("hijack")),
        Err(Error::PermissionDenied)
    );
    server
        .edit_post(bob, thread, post.id, String::from("v1"))
        .expect("first edit");
    server
        .edit_post(bob, thread, post.id, String::from("v2"))
        .expect("second edit");
    assert!(view.admit_message(&recv(&mut feed)));
    assert!(view.admit_message(&recv(&mut feed)));

    let merged = view.posts();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].content, "v2");
}

#[test]
fn moderation_flag_updates_in_place() {
    let mut server = MockServer::new();
    let alice = server.create_user("alice").expect("creating alice");
    let bob = server.create_user("bob").expect("creating bob");
    let thread = server
        .create_thread(alice, String::from("Mod"), String::from("body"))
        .expect("creating thread");

    let mut feed = server.join_thread(thread).expect("joining thread feed");
    let mut view = ThreadView::open(thread);
    view.set_baseline(server.fetch_posts(thread).expect("fetching posts"));

    let post = server
        .submit_post(bob, thread, None, String::from("buy gold"))
        .expect("submitting post");
    assert!(view.admit_message(&recv(&mut feed)));

    server
        .flag_post(
            thread,
            post.id,
            Moderation {
                is_spam: true,
                is_inappropriate: false,
                reason: String::from("unsolicited advertising"),
            },
        )
        .expect("flagging post");
    assert!(view.admit_message(&recv(&mut feed)));

    let merged = view.posts();
    assert_eq!(merged.len(), 1);
    assert!(merged[0].moderation.is_flagged());
    assert_eq!(merged[0].moderation.reason, "unsolicited advertising");
}

#[test]
fn notifications_flow_and_dedupe() {
    let mut server = MockServer::new();
    let alice = server.create_user("alice").expect("creating alice");
    let bob = server.create_user("bob").expect("creating bob");
    let thread = server
        .create_thread(alice, String::from("News"), String::from("body"))
        .expect("creating thread");

    let mut alice_feed = server.join_user(alice).expect("joining alice's feed");
    let mut notifications = NotificationFeed::new();

    server
        .submit_post(bob, thread, None, String::from("hello alice"))
        .expect("submitting post");
    let live = match recv(&mut alice_feed) {
        FeedMessage::NewNotification(n) => n,
        other => panic!("expected a notification, got {other:?}"),
    };
    assert!(notifications.admit(live.clone()));
    assert!(!notifications.admit(live));
    assert!(notifications.has_unread());

    // Resync with the backend: the fetched copy must not double-list
    let (page, pagination) = server
        .fetch_notifications(alice, 1, 10)
        .expect("fetching notifications");
    notifications.record_page(1, page, &pagination);
    assert_eq!(notifications.list().len(), 1);

    // Replying to your own thread does not notify yourself
    server
        .submit_post(alice, thread, None, String::from("hi myself"))
        .expect("self reply");
    assert!(alice_feed.try_recv().is_err());
}

#[test]
fn thread_listing_pages_aggregate_in_order() {
    let mut server = MockServer::new();
    let alice = server.create_user("alice").expect("creating alice");
    for n in 0..25 {
        server
            .create_thread(alice, format!("thread {n}"), String::from("body"))
            .expect("creating thread");
    }

    let mut expected: Vec<String> = Vec::new();
    for page in 1u32..=3 {
        let (threads, _) = server.fetch_threads(page, 10);
        expected.extend(threads.into_iter().map(|t| t.title));
    }

    let mut listing: Paged<agora_client::api::Thread> = Paged::new();
    // Pages land out of order; the aggregate must not care
    for page in [3u32, 1, 2] {
        let (threads, pagination) = server.fetch_threads(page, 10);
        listing.record(page, threads, &pagination);
    }
    assert_eq!(listing.len(), 25);
    assert!(!listing.has_more());

    let titles: Vec<&str> = listing.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, expected, "flattening must follow page order");
}

#[test]
fn unknown_ids_surface_api_errors() {
    let mut server = MockServer::new();
    let ghost = ThreadId(Uuid::new_v4());
    assert_eq!(server.fetch_thread(ghost), Err(Error::ThreadNotFound(ghost.0)));
    assert!(server.join_thread(ghost).is_err());

    let alice = server.create_user("alice").expect("creating alice");
    assert_eq!(
        server.create_user("alice"),
        Err(Error::NameAlreadyUsed(String::from("alice")))
    );
    let thread = server
        .create_thread(alice, String::from("T"), String::from("body"))
        .expect("creating thread");
    assert_eq!(
        server.submit_post(alice, thread, None, String::from("   ")),
        Err(Error::EmptyString)
    );
}
