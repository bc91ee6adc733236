pub mod message;

pub use message::{
    extract_tags, Message, MessagePriority, MessageStats, MessageStatus, PriorityCounts,
    RecentCounts,
};
