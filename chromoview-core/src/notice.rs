use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A non-fatal, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info<S: Into<String>>(message: S) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning<S: Into<String>>(message: S) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedNotice {
    pub id: u64,
    pub notice: Notice,
}

/// Notices currently shown to the user, oldest first.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    active: Vec<PostedNotice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        match notice.level {
            NoticeLevel::Info => log::info!("notice #{}: {}", id, notice.message),
            _ => log::warn!("notice #{}: {}", id, notice.message),
        }
        self.active.push(PostedNotice { id, notice });
        id
    }

    /// Remove a notice. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|posted| posted.id != id);
        self.active.len() != before
    }

    pub fn active(&self) -> &[PostedNotice] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_dismiss() {
        let mut board = NoticeBoard::new();
        let first = board.post(Notice::error("gene list unavailable"));
        let second = board.post(Notice::info("loading annotations"));
        assert_eq!(board.active().len(), 2);

        assert!(board.dismiss(first));
        assert!(!board.dismiss(first));
        assert_eq!(board.active()[0].id, second);
    }
}
