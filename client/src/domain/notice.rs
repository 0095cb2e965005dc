use std::fmt;

/// Kind of user-visible notice, used for styling and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Validation,
    Error,
}

/// A blocking message surfaced to the supervisor after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: None,
            message: message.into(),
        }
    }

    pub fn validation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            title: Some(title.into()),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: None,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind != NoticeKind::Info
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{}: {}", title, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
