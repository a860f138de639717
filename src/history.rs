//! Bounded session history.
//!
//! A FIFO log of question/answer pairs, capped at a configurable number
//! of entries. The assembled context string is a side input for a future
//! prompt-building step; nothing consumes it for retrieval decisions yet.

use std::collections::VecDeque;

use crate::models::SessionEntry;

/// Bounded FIFO of answered queries.
pub struct History {
    capacity: usize,
    entries: VecDeque<SessionEntry>,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append a question/answer pair, evicting the oldest entry if the
    /// cap is exceeded. At most one entry is removed per append, so the
    /// log never exceeds the cap by more than the entry just added.
    pub fn record(&mut self, question: &str, answer: &str) {
        self.entries.push_back(SessionEntry {
            question: question.to_string(),
            answer: answer.to_string(),
        });
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Concatenate all current entries, oldest first, as
    /// `User: <question>\nAI: <answer>\n` per entry.
    pub fn build_context(&self) -> String {
        let mut context = String::new();
        for entry in &self.entries {
            context.push_str(&format!("User: {}\n", entry.question));
            context.push_str(&format!("AI: {}\n", entry.answer));
        }
        context
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in chronological order.
    pub fn entries(&self) -> impl Iterator<Item = &SessionEntry> {
        self.entries.iter()
    }
}
