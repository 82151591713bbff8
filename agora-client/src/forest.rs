use std::collections::HashSet;
use std::sync::Arc;

use crate::api::{LiveEvent, Post, PostId};

/// Folds the live events accumulated since `baseline` was fetched into a
/// fresh forest that is safe to render.
///
/// The baseline is never mutated: with no events buffered this is an
/// identity (the same snapshot is returned, no copy made), otherwise the
/// working forest starts as a structural clone of every node at every
/// depth. Events are folded strictly in arrival order, so a later update
/// always wins. A payload whose id is already known updates the node in
/// place, leaving its parent linkage and children untouched; anything else
/// is an insertion, attached under its parent when the parent is known and
/// kept visible at the thread root otherwise.
pub fn reconcile(baseline: &Arc<Vec<Post>>, live: &[LiveEvent]) -> Arc<Vec<Post>> {
    if live.is_empty() {
        return baseline.clone();
    }
    let mut forest: Vec<Post> = (**baseline).clone();
    let mut known = collect_ids(&forest);
    for event in live {
        fold_event(&mut forest, &mut known, &event.post);
    }
    Arc::new(forest)
}

fn fold_event(forest: &mut Vec<Post>, known: &mut HashSet<PostId>, payload: &Post) {
    if known.contains(&payload.id) {
        // Update, or a creation redelivered after a refetch already picked
        // the post up: overwrite the mutable fields and nothing else
        if let Some(post) = find_post_mut(forest, &payload.id) {
            post.content = payload.content.clone();
            post.updated_at = payload.updated_at;
            post.moderation = payload.moderation.clone();
            post.user = payload.user.clone();
        }
        return;
    }
    let mut node = payload.clone();
    node.children = Vec::new();
    known.insert(node.id);
    if let Some(parent) = node.parent.and_then(|p| find_post_mut(forest, &p)) {
        parent.children.push(node);
    } else {
        if node.parent.is_some() {
            tracing::warn!(
                post = ?node.id,
                parent = ?node.parent,
                "parent post not found, keeping reply visible at thread root"
            );
        }
        forest.push(node);
    }
}

/// Every post id present in the forest, at any depth, collected in one walk
fn collect_ids(forest: &[Post]) -> HashSet<PostId> {
    fn walk(posts: &[Post], into: &mut HashSet<PostId>) {
        for p in posts {
            into.insert(p.id);
            walk(&p.children, into);
        }
    }
    let mut ids = HashSet::new();
    walk(forest, &mut ids);
    ids
}

/// Recursive membership test over the full tree, not just the roots
pub fn contains_post(forest: &[Post], id: &PostId) -> bool {
    forest
        .iter()
        .any(|p| p.id == *id || contains_post(&p.children, id))
}

pub fn find_post_mut<'a>(forest: &'a mut [Post], id: &PostId) -> Option<&'a mut Post> {
    for p in forest.iter_mut() {
        if p.id == *id {
            return Some(p);
        }
        if let Some(res) = find_post_mut(&mut p.children, id) {
            return Some(res);
        }
    }
    None
}
