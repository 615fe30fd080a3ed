//! Status bar message with an optional lock

/// Text shown in the status bar
///
/// While locked, new messages are dropped and the current one stays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    message: String,
    locked: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the message; returns false if the status bar is locked
    pub fn set(&mut self, message: impl Into<String>) -> bool {
        if self.locked {
            return false;
        }
        self.message = message.into();
        true
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
