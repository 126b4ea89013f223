//! Canned topics answered without calling the model.

mod responses;

use crate::session::ChatMode;

/// Subjects with precomputed answers.
///
/// Declaration order is match priority: the first topic contained in the
/// input wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CannedTopic {
    Perceptron,
    NeuralNetwork,
    DeepLearning,
    ArtificialNeuralNetwork,
    LinearAlgebra,
}

const ALL_TOPICS: [CannedTopic; 5] = [
    CannedTopic::Perceptron,
    CannedTopic::NeuralNetwork,
    CannedTopic::DeepLearning,
    CannedTopic::ArtificialNeuralNetwork,
    CannedTopic::LinearAlgebra,
];

impl CannedTopic {
    /// All topics in match priority order.
    pub fn all() -> &'static [CannedTopic] {
        &ALL_TOPICS
    }

    /// The keyword searched for in user input.
    pub fn keyword(self) -> &'static str {
        match self {
            CannedTopic::Perceptron => "퍼셉트론",
            CannedTopic::NeuralNetwork => "신경망",
            CannedTopic::DeepLearning => "딥러닝",
            CannedTopic::ArtificialNeuralNetwork => "인공신경망",
            CannedTopic::LinearAlgebra => "선형대수학",
        }
    }

    /// Precomputed answer for `mode`, if one exists.
    pub fn canned_response(self, mode: ChatMode) -> Option<&'static str> {
        match mode {
            ChatMode::Normal => responses::normal(self),
            ChatMode::DeepLearning => responses::deep(self),
        }
    }
}

impl std::fmt::Display for CannedTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Finds the first canned topic mentioned in `text`.
///
/// Input is trimmed and lowercased before a plain substring search.
pub fn match_topic(text: &str) -> Option<CannedTopic> {
    let normalized = text.trim().to_lowercase();
    CannedTopic::all()
        .iter()
        .copied()
        .find(|topic| normalized.contains(&topic.keyword().to_lowercase()))
}

/// Looks up the canned answer for the topic mentioned in `text`.
pub fn canned_response(text: &str, mode: ChatMode) -> Option<(CannedTopic, &'static str)> {
    let topic = match_topic(text)?;
    topic.canned_response(mode).map(|response| (topic, response))
}
