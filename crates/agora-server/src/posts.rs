//! Posts and the public feed.

use std::collections::HashMap;

use agora_store::{
    Database, Entity, Post, PostField, PostRepository, Predicate, ReadCollection, TagRepository,
    UserRepository, WriteCollection,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, ServiceError};
use crate::locks::CollectionLocks;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedAuthor {
    pub id: String,
    pub name: String,
    pub career: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedTag {
    pub id: String,
    pub name: String,
}

/// A post joined with its author and tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub id: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub user: FeedAuthor,
    pub tag: FeedTag,
}

#[derive(Clone)]
pub struct PostService {
    posts: PostRepository,
    users: UserRepository,
    tags: TagRepository,
    locks: CollectionLocks,
}

impl PostService {
    pub fn new(db: &Database, locks: CollectionLocks) -> Self {
        Self {
            posts: db.posts(),
            users: db.users(),
            tags: db.tags(),
            locks,
        }
    }

    pub fn create_post(&self, user_id: &str, tag_id: &str, description: &str) -> Result<Post> {
        if description.trim().is_empty() {
            return Err(ServiceError::BadRequest("post description is empty".into()));
        }
        if self.users.find_by_id(user_id)?.is_none() {
            return Err(ServiceError::UserNotFound(user_id.to_string()));
        }
        if self.tags.find_by_id(tag_id)?.is_none() {
            return Err(ServiceError::TagNotFound(tag_id.to_string()));
        }

        let post = self.locks.with(Post::COLLECTION, || {
            self.posts.add(Post::new(user_id, tag_id, description))
        })?;
        info!(id = %post.id, user = user_id, tag = tag_id, "post created");
        Ok(post)
    }

    /// Every post with its author and tag, newest first.  Posts whose author
    /// or tag no longer exists are left out.
    pub fn feed(&self) -> Result<Vec<FeedItem>> {
        let posts = self.posts.find_all()?;
        self.enrich(posts)
    }

    /// The feed restricted to one tag.
    pub fn feed_for_tag(&self, tag_id: &str) -> Result<Vec<FeedItem>> {
        let posts = self.posts.find_where(&Predicate::eq(PostField::TagId, tag_id))?;
        self.enrich(posts)
    }

    fn enrich(&self, posts: Vec<Post>) -> Result<Vec<FeedItem>> {
        let users: HashMap<_, _> = self
            .users
            .find_all()?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();
        let tags: HashMap<_, _> = self
            .tags
            .find_all()?
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();

        let total = posts.len();
        let mut feed: Vec<FeedItem> = posts
            .into_iter()
            .filter_map(|post| {
                let user = users.get(&post.user_id)?;
                let tag = tags.get(&post.tag_id)?;
                Some(FeedItem {
                    id: post.id,
                    description: post.description,
                    timestamp: post.timestamp,
                    user: FeedAuthor {
                        id: user.id.clone(),
                        name: user.name.clone(),
                        career: user.career.clone(),
                        avatar_url: user.avatar_url.clone(),
                    },
                    tag: FeedTag {
                        id: tag.id.clone(),
                        name: tag.name.clone(),
                    },
                })
            })
            .collect();

        if feed.len() < total {
            debug!(skipped = total - feed.len(), "posts without author or tag left out of feed");
        }
        feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(feed)
    }
}
