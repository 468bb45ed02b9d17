use std::collections::HashMap;
use crate::models::{ConversationSummary, Message};

/// Summarize every conversation `username` takes part in, newest first
pub fn summarize_conversations(username: &str, messages: &[Message]) -> Vec<ConversationSummary> {
    let mut by_counterpart: HashMap<&str, ConversationSummary> = HashMap::new();

    for message in messages {
        if message.sender != username && message.receiver != username {
            continue;
        }

        let other = message.counterpart(username);
        let unread = message.receiver == username && !message.read;

        let summary = by_counterpart
            .entry(other)
            .or_insert_with(|| ConversationSummary {
                other_username: other.to_string(),
                last_message: message.content.clone(),
                last_message_time: message.timestamp,
                unread_count: 0,
            });

        if message.timestamp >= summary.last_message_time {
            summary.last_message = message.content.clone();
            summary.last_message_time = message.timestamp;
        }
        if unread {
            summary.unread_count += 1;
        }
    }

    let mut summaries: Vec<ConversationSummary> = by_counterpart.into_values().collect();
    summaries.sort_by(|a, b| {
        b.last_message_time
            .cmp(&a.last_message_time)
            .then_with(|| a.other_username.cmp(&b.other_username))
    });
    summaries
}
