//! Transient notifications (toasts)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Info,
    Success,
    Error,
}

impl Level {
    pub fn css_class(&self) -> &'static str {
        match self {
            Level::Info => "toast info",
            Level::Success => "toast success",
            Level::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub level: Level,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Notifications {
    next_id: u32,
    items: Vec<Notification>,
}

impl Notifications {
    /// Queue a toast and return its id for later dismissal
    pub fn push(&mut self, level: Level, text: impl Into<String>) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            level,
            text: text.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = Notifications::default();
        let a = queue.push(Level::Info, "Loading catalog");
        let b = queue.push(Level::Error, "Server error (500)");
        assert_ne!(a, b);
        assert_eq!(queue.items().len(), 2);

        assert!(queue.dismiss(a));
        assert!(!queue.dismiss(a));
        assert_eq!(queue.items()[0].text, "Server error (500)");
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut queue = Notifications::default();
        let a = queue.push(Level::Success, "Done");
        queue.dismiss(a);
        let b = queue.push(Level::Success, "Done again");
        assert!(b > a);
    }
}
