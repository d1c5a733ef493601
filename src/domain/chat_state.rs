use std::fmt;

/// Lifecycle of the chat client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatState {
    Idle,
    AwaitingUpload,
    Ready,
    Submitting,
    Displaying,
}

impl ChatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatState::Idle => "IDLE",
            ChatState::AwaitingUpload => "AWAITING_UPLOAD",
            ChatState::Ready => "READY",
            ChatState::Submitting => "SUBMITTING",
            ChatState::Displaying => "DISPLAYING",
        }
    }
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
