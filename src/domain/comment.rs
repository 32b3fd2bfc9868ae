//! Token Thread Comments

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A post in a token's thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Comment thread for one token, oldest first
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
    next_id: u64,
}

impl CommentThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thread with the starter posts every token page opens with
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut thread = Self::new();
        thread.push("Degen_123", "Dev is based. Holding this to 1M.", now - Duration::seconds(100));
        thread.push("SolanaWhale", "Chart looking bullish, aping in.", now - Duration::seconds(50));
        thread.push("PepeEnjoyer", "Can someone check the metadata?", now - Duration::seconds(20));
        thread
    }

    /// Post a comment. Blank text is ignored.
    pub fn post(&mut self, user: &str, text: &str) -> Option<&Comment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push(user, text, Utc::now());
        self.comments.last()
    }

    fn push(&mut self, user: &str, text: &str, timestamp: DateTime<Utc>) {
        self.next_id += 1;
        self.comments.push(Comment {
            id: self.next_id.to_string(),
            user: user.to_string(),
            text: text.to_string(),
            timestamp,
            image_url: None,
        });
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_thread() {
        let thread = CommentThread::seeded();
        assert_eq!(thread.len(), 3);
        assert_eq!(thread.comments()[0].user, "Degen_123");
        assert!(thread.comments()[0].timestamp < thread.comments()[2].timestamp);
    }

    #[test]
    fn test_post_trims_and_ignores_blank() {
        let mut thread = CommentThread::new();
        assert!(thread.post("anon", "   ").is_none());
        assert!(thread.is_empty());

        let posted = thread.post("anon", "  wagmi  ").cloned().unwrap();
        assert_eq!(posted.text, "wagmi");
        assert_eq!(posted.id, "1");
        assert_eq!(thread.len(), 1);
    }
}
