//! Text heuristics that short-circuit routing.

const CASUAL_GREETINGS: &[&str] = &[
    "ㅎㅇ",
    "ㅎㅇㅎㅇ",
    "ㅎㅇㅎ",
    "ㅎㅇㅎㅇㅎㅇ",
    "안녕",
    "안녕하세요",
    "안뇽",
    "안뇽하세요",
    "하이",
    "hi",
    "hello",
    "헬로",
    "야",
    "여",
    "요",
    "반가워",
    "반갑습니다",
];

/// Inputs this short or shorter also match when they merely contain a
/// greeting phrase.
const SHORT_GREETING_MAX_CHARS: usize = 4;

/// True for small talk such as "안녕" or "hi".
pub fn is_casual_greeting(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    if CASUAL_GREETINGS.contains(&normalized.as_str()) {
        return true;
    }
    normalized.chars().count() <= SHORT_GREETING_MAX_CHARS
        && CASUAL_GREETINGS
            .iter()
            .any(|greeting| normalized.contains(greeting))
}

/// True when the user asks what they asked before, e.g. "내가 뭘 물어봤지?".
pub fn is_previous_query_question(text: &str) -> bool {
    let normalized = text.to_lowercase();
    normalized.contains("내가")
        && (normalized.contains("뭘") || normalized.contains("무엇을"))
        && (normalized.contains("물어") || normalized.contains("질문"))
}
