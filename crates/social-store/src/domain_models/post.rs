//! Post model
//!
//! Wire shape of a feed post plus the partial update (`PostPatch`) that
//! `posts/updatePost` and the optimistic actions carry.

use super::serde_helpers::double_option;
use super::{PostId, Profile, ProfileId};
use crate::optimistic::Patch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The viewer's reaction to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

/// A feed post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: ProfileId,
    /// Author details when the list endpoint joins them in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Profile>,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "likes_count")]
    pub like_count: u32,
    #[serde(default, alias = "dislikes_count")]
    pub dislike_count: u32,
    #[serde(default, alias = "comments_count")]
    pub comment_count: u32,
    #[serde(default)]
    pub user_reaction: Option<ReactionKind>,
}

impl Post {
    pub fn reaction_state(&self) -> ReactionState {
        ReactionState {
            like_count: self.like_count,
            dislike_count: self.dislike_count,
            user_reaction: self.user_reaction,
        }
    }
}

/// Counters and reaction that a toggle always moves together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionState {
    pub like_count: u32,
    pub dislike_count: u32,
    pub user_reaction: Option<ReactionKind>,
}

impl ReactionState {
    /// Apply a reaction toggle
    ///
    /// Same reaction again clears it. The opposite reaction moves one count
    /// from the old counter to the new one. Counters saturate at zero.
    pub fn toggle(self, reaction: ReactionKind) -> Self {
        let mut next = self;
        match self.user_reaction {
            Some(current) if current == reaction => {
                next.adjust(reaction, false);
                next.user_reaction = None;
            }
            current => {
                if let Some(old) = current {
                    next.adjust(old, false);
                }
                next.adjust(reaction, true);
                next.user_reaction = Some(reaction);
            }
        }
        next
    }

    fn adjust(&mut self, reaction: ReactionKind, increment: bool) {
        let counter = match reaction {
            ReactionKind::Like => &mut self.like_count,
            ReactionKind::Dislike => &mut self.dislike_count,
        };
        *counter = if increment {
            counter.saturating_add(1)
        } else {
            counter.saturating_sub(1)
        };
    }
}

/// Logical fields of a post that a mutation can own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PostField {
    Content,
    ImageUrl,
    /// like_count, dislike_count and user_reaction as one unit
    Reaction,
    CommentCount,
}

/// Partial post update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub image_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislike_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub user_reaction: Option<Option<ReactionKind>>,
}

impl PostPatch {
    pub fn reaction(state: ReactionState) -> Self {
        Self {
            like_count: Some(state.like_count),
            dislike_count: Some(state.dislike_count),
            user_reaction: Some(state.user_reaction),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn comment_count(count: u32) -> Self {
        Self {
            comment_count: Some(count),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Write every set field into `post`
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(ref content) = self.content {
            post.content = content.clone();
        }
        if let Some(ref image_url) = self.image_url {
            post.image_url = image_url.clone();
        }
        if let Some(count) = self.like_count {
            post.like_count = count;
        }
        if let Some(count) = self.dislike_count {
            post.dislike_count = count;
        }
        if let Some(count) = self.comment_count {
            post.comment_count = count;
        }
        if let Some(reaction) = self.user_reaction {
            post.user_reaction = reaction;
        }
    }

    /// Current values of `post` for every logical field `shape` touches
    pub fn capture(post: &Post, shape: &PostPatch) -> PostPatch {
        let mut snapshot = PostPatch::default();
        for field in shape.fields() {
            match field {
                PostField::Content => snapshot.content = Some(post.content.clone()),
                PostField::ImageUrl => snapshot.image_url = Some(post.image_url.clone()),
                PostField::Reaction => {
                    snapshot.like_count = Some(post.like_count);
                    snapshot.dislike_count = Some(post.dislike_count);
                    snapshot.user_reaction = Some(post.user_reaction);
                }
                PostField::CommentCount => snapshot.comment_count = Some(post.comment_count),
            }
        }
        snapshot
    }
}

impl Patch for PostPatch {
    type Field = PostField;

    fn fields(&self) -> Vec<PostField> {
        let mut fields = Vec::new();
        if self.content.is_some() {
            fields.push(PostField::Content);
        }
        if self.image_url.is_some() {
            fields.push(PostField::ImageUrl);
        }
        if self.like_count.is_some() || self.dislike_count.is_some() || self.user_reaction.is_some()
        {
            fields.push(PostField::Reaction);
        }
        if self.comment_count.is_some() {
            fields.push(PostField::CommentCount);
        }
        fields
    }

    fn retain<F: Fn(PostField) -> bool>(&self, keep: F) -> Self {
        let reaction = keep(PostField::Reaction);
        PostPatch {
            content: self.content.clone().filter(|_| keep(PostField::Content)),
            image_url: self.image_url.clone().filter(|_| keep(PostField::ImageUrl)),
            like_count: self.like_count.filter(|_| reaction),
            dislike_count: self.dislike_count.filter(|_| reaction),
            comment_count: self.comment_count.filter(|_| keep(PostField::CommentCount)),
            user_reaction: self.user_reaction.filter(|_| reaction),
        }
    }
}
