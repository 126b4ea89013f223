//! Fixed assistant texts and prompt templates.

use educhat_core::GatewayError;
use educhat_core::topic::CannedTopic;

pub const WELCOME_MESSAGE: &str = "🤖 **EduChat에 오신 것을 환영합니다!**

저는 AI와 데이터 과학 분야의 전문가로서, 여러분의 학습을 도와드립니다.

**💡 사용 방법:**
• 일반 모드: 빠르고 간단한 답변
• 📚 딥러닝 모드: 여섯 단계로 구성된 깊이 있는 설명

**⚙️ 설정하기:**
먼저 OpenAI API 키를 설정해주세요.

**🚀 시작하기:**
\"인공신경망이 뭐야?\" 또는 \"머신러닝 알고리즘 종류를 알려줘\" 같은 질문을 해보세요!

AI와 데이터 과학에 대한 모든 궁금증을 해결해드리겠습니다! 🎓✨";

pub const DEEP_GREETING: &str =
    "안녕하세요, 자세히 알고싶은 AI/데이터 관련내용이 있으면 말씀해주세요.";

/// Header carried by every clarifying question of the deep-mode flow.
pub const DEEP_QUESTION_HEADER: &str = "**딥러닝 모드:";

/// Substrings that identify a session as a deep-mode conversation.
pub const DEEP_SESSION_MARKERS: &[&str] = &[DEEP_GREETING, DEEP_QUESTION_HEADER];

pub const CASUAL_GREETING_REPLIES: &[&str] = &[
    "안녕하세요! AI와 데이터 과학에 대해 궁금한 점이 있으시면 언제든 물어보세요.",
    "반갑습니다! 머신러닝이나 딥러닝 관련 질문이 있으시면 도와드리겠습니다.",
    "안녕하세요! 데이터 과학이나 인공지능 개념에 대해 이야기 나눠보는 건 어떠세요?",
    "반갑습니다! AI 관련 궁금한 점이 있으시면 편하게 질문해주세요.",
];

pub const MISSING_API_KEY_MESSAGE: &str =
    "API 키가 설정되지 않았습니다. 설정에서 OpenAI API 키를 입력해주세요.";

pub const TIMEOUT_MESSAGE: &str = "응답 시간이 너무 오래 걸립니다. 잠시 후 다시 시도해주세요.\n(딥러닝 모드는 긴 응답을 생성하므로 시간이 더 걸릴 수 있습니다)";

/// Answers "what did I ask?" from up to two earlier questions, oldest first.
pub fn previous_queries_reply(recent: &[&str]) -> String {
    match recent {
        [] => "죄송하지만 최근에 하신 질문이 없습니다. 새로운 질문을 해주세요!".to_string(),
        [only] => format!("가장 최근에 하신 질문은:\n\n**{only}**\n\n입니다."),
        [.., older, latest] => {
            format!("최근 하신 질문들은:\n\n1. **{older}**\n2. **{latest}**\n\n입니다.")
        }
    }
}

/// First clarifying question: which topic to analyse.
pub fn topic_selection_question() -> String {
    let mut question = format!(
        "🤖 {} 주제 선택**\n\n어떤 주제를 심층적으로 분석해볼까요?\n\n",
        DEEP_QUESTION_HEADER
    );
    for (index, topic) in CannedTopic::all().iter().enumerate() {
        question.push_str(&format!("{}. {}\n", index + 1, topic.keyword()));
    }
    question.push_str("\n💡 위 주제 중 하나를 선택하거나, 구체적인 주제를 입력해주세요!");
    question
}

/// Second clarifying question: how much background the user has.
pub fn background_question(focus: &str) -> String {
    format!(
        "📘 {} 배경 지식 확인**\n\n'{}'에 대해 어느 정도 알고 계신가요?\n\n\
         1. 처음 들어봐요 (기초부터 설명)\n\
         2. 기본 개념은 알아요\n\
         3. 깊이 있게 공부해봤어요\n\n\
         💡 번호를 선택하거나 자유롭게 답해주세요!",
        DEEP_QUESTION_HEADER,
        focus.trim()
    )
}

/// Prompt sent to the model once both clarifying answers are in.
pub fn deep_analysis_prompt(question: &str, focus: &str, background: &str) -> String {
    format!(
        "{}\n\n선택한 주제: {}\n배경 지식 수준: {}\n\n{}에 대해 심층적으로 분석해주세요.",
        question.trim(),
        focus.trim(),
        background.trim(),
        focus.trim()
    )
}

/// User-visible text for a failed generation.
pub fn generation_error_message(error: &GatewayError) -> String {
    match error {
        GatewayError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
        GatewayError::MissingCredential => MISSING_API_KEY_MESSAGE.to_string(),
        other => format!("LLM 호출 실패: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_queries_reply_shapes() {
        assert!(previous_queries_reply(&[]).starts_with("죄송하지만"));
        assert_eq!(
            previous_queries_reply(&["퍼셉트론"]),
            "가장 최근에 하신 질문은:\n\n**퍼셉트론**\n\n입니다."
        );
        assert_eq!(
            previous_queries_reply(&["a", "b"]),
            "최근 하신 질문들은:\n\n1. **a**\n2. **b**\n\n입니다."
        );
    }

    #[test]
    fn test_topic_selection_lists_topics_in_order() {
        let question = topic_selection_question();
        assert!(question.starts_with("🤖 **딥러닝 모드: 주제 선택**"));
        assert!(question.contains("1. 퍼셉트론\n2. 신경망\n3. 딥러닝\n4. 인공신경망\n5. 선형대수학\n"));
    }

    #[test]
    fn test_welcome_is_not_a_deep_marker() {
        for marker in DEEP_SESSION_MARKERS {
            assert!(!WELCOME_MESSAGE.contains(marker));
        }
        assert!(background_question("x").contains(DEEP_QUESTION_HEADER));
    }

    #[test]
    fn test_deep_analysis_prompt_embeds_answers() {
        let prompt = deep_analysis_prompt("트랜스포머 알려줘", " 어텐션 ", "처음 들어봐요");
        assert!(prompt.starts_with("트랜스포머 알려줘"));
        assert!(prompt.contains("선택한 주제: 어텐션"));
        assert!(prompt.contains("배경 지식 수준: 처음 들어봐요"));
        assert!(prompt.ends_with("어텐션에 대해 심층적으로 분석해주세요."));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            generation_error_message(&GatewayError::Timeout { seconds: 300 }),
            TIMEOUT_MESSAGE
        );
        assert_eq!(
            generation_error_message(&GatewayError::EmptyResponse),
            "LLM 호출 실패: Model returned an empty response"
        );
    }
}
