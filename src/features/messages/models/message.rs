use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{HIGH_PRIORITY_KEYWORDS, MESSAGE_TAG_VOCABULARY, URGENT_KEYWORDS};
use crate::shared::entity::Entity;
use crate::shared::filtering::text_matches;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessagePriority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl MessagePriority {
    /// Urgent keywords win over high-priority ones; anything else is medium
    pub fn classify(subject: &str, body: &str) -> Self {
        let content = format!("{} {}", subject, body).to_lowercase();
        if URGENT_KEYWORDS.iter().any(|k| content.contains(k)) {
            MessagePriority::Urgent
        } else if HIGH_PRIORITY_KEYWORDS.iter().any(|k| content.contains(k)) {
            MessagePriority::High
        } else {
            MessagePriority::Medium
        }
    }
}

/// Vocabulary words found in a message body, in vocabulary order
pub fn extract_tags(body: &str) -> Vec<String> {
    let content = body.to_lowercase();
    MESSAGE_TAG_VOCABULARY
        .iter()
        .filter(|tag| content.contains(*tag))
        .map(|tag| tag.to_string())
        .collect()
}

/// A contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default)]
    pub priority: MessagePriority,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `false` once archived
    #[serde(default = "active_by_default")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replied_at: Option<DateTime<Utc>>,
}

fn active_by_default() -> bool {
    true
}

impl Message {
    pub fn mark_read(&mut self, now: DateTime<Utc>) {
        self.status = MessageStatus::Read;
        self.read_at = Some(now);
    }

    pub fn mark_replied(&mut self, now: DateTime<Utc>) {
        self.status = MessageStatus::Replied;
        self.read_at.get_or_insert(now);
        self.replied_at = Some(now);
    }

    /// Switch status, stamping `readAt`/`repliedAt` the first time
    pub fn set_status(&mut self, status: MessageStatus, now: DateTime<Utc>) {
        match status {
            MessageStatus::Unread => self.status = MessageStatus::Unread,
            MessageStatus::Read => {
                self.status = MessageStatus::Read;
                self.read_at.get_or_insert(now);
            }
            MessageStatus::Replied => {
                self.status = MessageStatus::Replied;
                self.read_at.get_or_insert(now);
                self.replied_at.get_or_insert(now);
            }
        }
    }

    pub fn add_tags(&mut self, tags: &[String]) {
        for tag in tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
    }

    pub fn remove_tags(&mut self, tags: &[String]) {
        self.tags.retain(|t| !tags.contains(t));
    }
}

impl Entity for Message {
    const LABEL: &'static str = "Message";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    fn matches(&self, term: &str) -> bool {
        text_matches(
            term,
            &[
                self.name.as_str(),
                self.email.as_str(),
                self.phone.as_str(),
                self.subject.as_str(),
                self.message.as_str(),
            ],
            &self.tags,
        )
    }

    /// Newest first
    fn ordering(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriorityCounts {
    pub urgent: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecentCounts {
    /// Received on the current UTC day
    pub today: i64,
    pub week: i64,
    pub month: i64,
}

/// Inbox counters; archived messages only show up in `archived`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageStats {
    pub total: i64,
    pub unread: i64,
    pub read: i64,
    pub replied: i64,
    pub archived: i64,
    pub priorities: PriorityCounts,
    pub recent: RecentCounts,
}

impl MessageStats {
    pub fn compute(messages: &[Message], now: DateTime<Utc>) -> Self {
        let mut stats = MessageStats::default();
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);

        for message in messages {
            if !message.active {
                stats.archived += 1;
                continue;
            }

            stats.total += 1;
            match message.status {
                MessageStatus::Unread => stats.unread += 1,
                MessageStatus::Read => stats.read += 1,
                MessageStatus::Replied => stats.replied += 1,
            }
            match message.priority {
                MessagePriority::Urgent => stats.priorities.urgent += 1,
                MessagePriority::High => stats.priorities.high += 1,
                MessagePriority::Medium => stats.priorities.medium += 1,
                MessagePriority::Low => stats.priorities.low += 1,
            }

            if message.created_at.date_naive() == now.date_naive() {
                stats.recent.today += 1;
            }
            if message.created_at >= week_ago {
                stats.recent.week += 1;
            }
            if message.created_at >= month_ago {
                stats.recent.month += 1;
            }
        }

        stats
    }
}
