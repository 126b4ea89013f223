//! Response formatter.
//!
//! Rewrites raw model output into a structured markdown document. Each mode
//! has a fixed set of section markers; a line mentioning a marker is
//! replaced by that section's canonical heading, with any prose that shared
//! the line moved into its own paragraph. Formatting is pure and
//! `format_response(format_response(x)) == format_response(x)`.

use crate::session::ChatMode;

/// A section marker and the heading it becomes.
struct SectionRule {
    marker: &'static str,
    heading: &'static str,
}

const NORMAL_RULES: &[SectionRule] = &[
    SectionRule {
        marker: "비유를 통한 핵심 요약",
        heading: "### 💡 비유를 통한 핵심 요약",
    },
    SectionRule {
        marker: "개념의 역사",
        heading: "### 📜 개념의 역사",
    },
];

const DEEP_RULES: &[SectionRule] = &[
    SectionRule {
        marker: "개념의 핵심 본질 파악",
        heading: "## 1. 🧠 개념의 핵심 본질 파악",
    },
    SectionRule {
        marker: "표면과 관계성 분석",
        heading: "## 2. 🔍 표면과 관계성 분석",
    },
    SectionRule {
        marker: "원리와 구현 방법",
        heading: "## 3. \u{2699}\u{fe0f} 원리와 구현 방법",
    },
    SectionRule {
        marker: "응용과 활용 분야",
        heading: "## 4. 🚀 응용과 활용 분야",
    },
    SectionRule {
        marker: "역사적 발전과 맥락",
        heading: "## 5. 📜 역사적 발전과 맥락",
    },
    SectionRule {
        marker: "한계와 미래 전망",
        heading: "## 6. 🔮 한계와 미래 전망",
    },
];

fn rules_for(mode: ChatMode) -> &'static [SectionRule] {
    match mode {
        ChatMode::Normal => NORMAL_RULES,
        ChatMode::DeepLearning => DEEP_RULES,
    }
}

/// Returns the section markers recognised in `mode`, in application order.
pub fn section_markers(mode: ChatMode) -> impl Iterator<Item = &'static str> {
    rules_for(mode).iter().map(|rule| rule.marker)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Heading(&'static str),
    Text(String),
}

/// Formats raw assistant text for `mode`.
pub fn format_response(raw: &str, mode: ChatMode) -> String {
    let mut blocks: Vec<Block> = raw.lines().map(|l| Block::Text(l.to_string())).collect();

    for rule in rules_for(mode) {
        if !any_text_contains(&blocks, rule.marker) {
            continue;
        }
        blocks = blocks
            .into_iter()
            .flat_map(|block| apply_rule(block, rule))
            .collect();
    }

    let mut writer = LineWriter::default();
    for block in blocks {
        match block {
            Block::Heading(heading) => writer.heading(heading),
            Block::Text(text) => writer.text(text),
        }
    }
    cleanup(writer.finish())
}

fn any_text_contains(blocks: &[Block], marker: &str) -> bool {
    blocks
        .iter()
        .any(|b| matches!(b, Block::Text(t) if t.contains(marker)))
}

/// Splits a text block around every occurrence of the rule's marker.
fn apply_rule(block: Block, rule: &SectionRule) -> Vec<Block> {
    let Block::Text(line) = block else {
        return vec![block];
    };
    let Some(first) = line.find(rule.marker) else {
        return vec![Block::Text(line)];
    };

    let mut out = Vec::new();
    let before = strip_heading_prefix(&line[..first]);
    if !before.is_empty() {
        out.push(Block::Text(before.to_string()));
    }
    out.push(Block::Heading(rule.heading));

    let mut rest = strip_heading_suffix(&line[first + rule.marker.len()..]);
    while let Some(next) = rest.find(rule.marker) {
        let between = strip_heading_prefix(&rest[..next]);
        if !between.is_empty() {
            out.push(Block::Text(between.to_string()));
        }
        out.push(Block::Heading(rule.heading));
        rest = strip_heading_suffix(&rest[next + rule.marker.len()..]);
    }
    if !rest.is_empty() {
        out.push(Block::Text(rest.to_string()));
    }
    out
}

/// Heading decoration: whitespace, `#`, emphasis and pictographs.
fn is_decoration(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, '#' | '*' | '_')
        || matches!(c as u32, 0x200D | 0x2190..=0x2BFF | 0xFE00..=0xFE0F | 0x1F000..=0x1FAFF)
}

/// Drops heading decoration left in front of a marker. A list number such
/// as `1.` or `6)` is dropped only when nothing but decoration precedes it.
fn strip_heading_prefix(text: &str) -> &str {
    let text = text.trim_end_matches(is_decoration);
    let Some(numbered) = text.strip_suffix(['.', ')']) else {
        return text;
    };
    let before_number = numbered.trim_end_matches(|c: char| c.is_ascii_digit());
    if before_number.len() < numbered.len()
        && before_number.trim_end_matches(is_decoration).is_empty()
    {
        ""
    } else {
        text
    }
}

/// Drops decoration following a marker such as closing `**` or a colon.
fn strip_heading_suffix(text: &str) -> &str {
    text.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, '*' | '_' | '#' | ':' | '-' | '–' | '—')
    })
}

/// Emits lines while keeping one blank line around each heading.
#[derive(Default)]
struct LineWriter {
    lines: Vec<String>,
    pad_next: bool,
}

impl LineWriter {
    fn last_is_blank(&self) -> bool {
        self.lines.last().is_none_or(|l| l.is_empty())
    }

    fn heading(&mut self, heading: &str) {
        if !self.last_is_blank() {
            self.lines.push(String::new());
        }
        self.lines.push(heading.to_string());
        self.pad_next = true;
    }

    fn text(&mut self, text: String) {
        if text.trim().is_empty() {
            self.lines.push(String::new());
            return;
        }
        if self.pad_next && !self.last_is_blank() {
            self.lines.push(String::new());
        }
        self.pad_next = false;
        self.lines.push(text);
    }

    fn finish(self) -> Vec<String> {
        self.lines
    }
}

fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first @ ('-' | '_' | '=')) => trimmed.chars().count() >= 3 && chars.all(|c| c == first),
        _ => false,
    }
}

/// Removes horizontal rules and collapses runs of four or more blank lines
/// to two.
fn cleanup(lines: Vec<String>) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut blank_run = 0usize;

    for line in lines.into_iter().filter(|l| !is_horizontal_rule(l)) {
        if line.trim().is_empty() {
            blank_run += 1;
            out.push(String::new());
            continue;
        }
        if blank_run >= 4 {
            let keep = out.len() - blank_run + 2;
            out.truncate(keep);
        }
        blank_run = 0;
        out.push(line);
    }

    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMAL_RAW: &str = "**비유를 통한 핵심 요약**: 퍼셉트론은 스위치와 같습니다.\n\
        입력이 충분히 크면 켜집니다.\n\
        ---\n\
        ### 개념의 역사\n\
        1958년 로젠블랫이 제안했습니다.";

    const DEEP_RAW: &str = "1. 개념의 핵심 본질 파악\n본질입니다.\n\n\n\n\n\
        **2. 표면과 관계성 분석** 관계를 봅니다.\n\
        ## 3. 원리와 구현 방법\n원리입니다.\n\
        응용과 활용 분야\n응용입니다.\n\
        역사적 발전과 맥락 - 1950년대부터\n\
        ___\n\
        6) 한계와 미래 전망\n전망입니다.";

    #[test]
    fn test_normal_headings() {
        let formatted = format_response(NORMAL_RAW, ChatMode::Normal);
        assert_eq!(
            formatted,
            "### 💡 비유를 통한 핵심 요약\n\n\
             퍼셉트론은 스위치와 같습니다.\n\
             입력이 충분히 크면 켜집니다.\n\n\
             ### 📜 개념의 역사\n\n\
             1958년 로젠블랫이 제안했습니다."
        );
    }

    #[test]
    fn test_deep_headings_and_cleanup() {
        let formatted = format_response(DEEP_RAW, ChatMode::DeepLearning);
        for rule in DEEP_RULES {
            assert!(formatted.contains(rule.heading), "missing {}", rule.heading);
        }
        assert!(formatted.contains("## 2. 🔍 표면과 관계성 분석\n\n관계를 봅니다."));
        assert!(formatted.contains("## 5. 📜 역사적 발전과 맥락\n\n1950년대부터"));
        assert!(!formatted.contains("___"));
        assert!(!formatted.contains("\n\n\n\n"));
        assert!(formatted.starts_with("## 1. 🧠"));
    }

    #[test]
    fn test_mode_specific_rules() {
        let raw = "개념의 역사\n설명";
        assert_eq!(format_response(raw, ChatMode::DeepLearning), raw);
        assert!(format_response(raw, ChatMode::Normal).starts_with("### 📜"));
    }

    #[test]
    fn test_no_markers_only_cleans() {
        let raw = "\n\n  첫 줄\n\n\n\n\n\n둘째 줄\n=====\n  ";
        assert_eq!(format_response(raw, ChatMode::Normal), "첫 줄\n\n\n둘째 줄");
    }

    #[test]
    fn test_repeated_marker_on_one_line() {
        let formatted = format_response("개념의 역사 그리고 개념의 역사", ChatMode::Normal);
        assert_eq!(
            formatted,
            "### 📜 개념의 역사\n\n그리고\n\n### 📜 개념의 역사"
        );
    }

    #[test]
    fn test_prose_before_marker_keeps_its_numbers() {
        assert_eq!(
            format_response("Since 2012, 개념의 역사\n본문", ChatMode::Normal),
            "Since 2012,\n\n### 📜 개념의 역사\n\n본문"
        );
        assert_eq!(
            format_response("1958년 이후 2. 개념의 역사", ChatMode::Normal),
            "1958년 이후 2.\n\n### 📜 개념의 역사"
        );
        assert_eq!(
            format_response("**12)** 🔮 한계와 미래 전망", ChatMode::DeepLearning),
            "## 6. 🔮 한계와 미래 전망"
        );
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let samples = [
            NORMAL_RAW,
            DEEP_RAW,
            "",
            "---",
            "텍스트\n---\n## 비유를 통한 핵심 요약",
            "### 🔑 비유를 통한 핵심 요약 끝",
            "Since 2012, 개념의 역사\n본문",
            "개념의 역사개념의 역사",
            "a\n\n\n---\n\n\nb",
            "   \n\t\n개념의 핵심 본질 파악",
            "한계와 미래 전망\n\n\n\n\n\n원리와 구현 방법:** 내용",
        ];
        for raw in samples {
            for mode in [ChatMode::Normal, ChatMode::DeepLearning] {
                let once = format_response(raw, mode);
                let twice = format_response(&once, mode);
                assert_eq!(once, twice, "not idempotent for {raw:?} in {mode}");
            }
        }
    }
}
