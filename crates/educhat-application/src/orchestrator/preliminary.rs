//! Deep-mode clarifying sub-dialogue.

/// Where the clarifying sub-dialogue stands.
///
/// The flow asks which topic to focus on, then how much background the
/// user has, and finally hands a composite prompt to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreliminaryFlow {
    #[default]
    Idle,
    /// The topic-selection question has been asked.
    AwaitingFocus { question: String },
    /// The background-level question has been asked.
    AwaitingBackground { question: String, focus: String },
}

impl PreliminaryFlow {
    pub fn is_awaiting(&self) -> bool {
        !matches!(self, PreliminaryFlow::Idle)
    }

    /// Index of the pending clarifying question; 0 when idle.
    pub fn step(&self) -> u8 {
        match self {
            PreliminaryFlow::Idle | PreliminaryFlow::AwaitingFocus { .. } => 0,
            PreliminaryFlow::AwaitingBackground { .. } => 1,
        }
    }

    pub fn reset(&mut self) {
        *self = PreliminaryFlow::Idle;
    }
}
