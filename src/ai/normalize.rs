//! 生成结果规整
//!
//! 上游返回的是自由文本，里面夹着一个 JSON 对象（可能带 markdown 代码块或前后说明文字）。
//! 先截出对象，再把 `{question_text, options, correct_answer}` 转成内部的 `Question`。

use serde::Deserialize;
use tracing::warn;

use crate::errors::{LearnHubError, Result};
use crate::models::quizzes::entities::Question;

#[derive(Debug, Deserialize)]
struct RawQuiz {
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(alias = "question", alias = "text")]
    question_text: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

/// 截取文本中第一个 `{` 到最后一个 `}` 之间的内容
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// 解析上游返回的测验文本
pub fn parse_quiz_content(text: &str) -> Result<Vec<Question>> {
    let json = extract_json_object(text)
        .ok_or_else(|| LearnHubError::upstream("malformed AI response: no JSON object found"))?;

    let raw: RawQuiz = serde_json::from_str(json)
        .map_err(|e| LearnHubError::upstream(format!("malformed AI response: {e}")))?;

    Ok(normalize_questions(raw.questions))
}

fn normalize_questions(raw: Vec<RawQuestion>) -> Vec<Question> {
    raw.into_iter()
        .enumerate()
        // 主观题没有选项，不进入自动批改
        .filter(|(_, q)| !q.options.is_empty())
        .map(|(i, q)| {
            let correct = match q.correct_answer.as_deref() {
                Some(answer) => correct_index(&q.options, answer).unwrap_or_else(|| {
                    warn!(
                        "第 {} 题的正确答案 '{}' 不在选项中，按第一个选项处理",
                        i + 1,
                        answer
                    );
                    0
                }),
                None => {
                    warn!("第 {} 题缺少正确答案，按第一个选项处理", i + 1);
                    0
                }
            };

            Question {
                text: q.question_text,
                options: q.options,
                correct,
                explanation: q.explanation.filter(|e| !e.trim().is_empty()),
            }
        })
        .collect()
}

/// 先精确匹配，再忽略首尾空白和大小写匹配
fn correct_index(options: &[String], answer: &str) -> Option<usize> {
    options.iter().position(|o| o == answer).or_else(|| {
        let wanted = answer.trim();
        options
            .iter()
            .position(|o| o.trim().eq_ignore_ascii_case(wanted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_fenced_block() {
        let text = "Here is your quiz:\n```json\n{\"questions\": []}\n```\nGood luck!";
        assert_eq!(extract_json_object(text), Some("{\"questions\": []}"));
    }

    #[test]
    fn test_extract_without_object() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_parse_maps_correct_answer_to_index() {
        let text = r#"```json
        {
          "questions": [
            {"question_text": "2+2?", "options": ["3", "4", "5", "6"], "correct_answer": "4", "explanation": "basic"},
            {"question_text": "Capital of France?", "options": ["Paris", "Rome"], "correct_answer": "Paris"}
          ]
        }
        ```"#;

        let questions = parse_quiz_content(text).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "2+2?");
        assert_eq!(questions[0].correct, 1);
        assert_eq!(questions[0].explanation.as_deref(), Some("basic"));
        assert_eq!(questions[1].correct, 0);

        // 每题 options[correct] 都等于原始答案
        for (q, answer) in questions.iter().zip(["4", "Paris"]) {
            assert_eq!(q.options[q.correct], answer);
        }
    }

    #[test]
    fn test_unknown_answer_falls_back_to_first_option() {
        let text = r#"{"questions": [{"question_text": "Q", "options": ["a", "b"], "correct_answer": "z"}]}"#;
        let questions = parse_quiz_content(text).unwrap();
        assert_eq!(questions[0].correct, 0);
    }

    #[test]
    fn test_whitespace_and_case_tolerant_match() {
        let text = r#"{"questions": [{"question_text": "Q", "options": ["Alpha", "Beta"], "correct_answer": " beta "}]}"#;
        let questions = parse_quiz_content(text).unwrap();
        assert_eq!(questions[0].correct, 1);
    }

    #[test]
    fn test_subjective_questions_dropped() {
        let text = r#"{"questions": [
            {"question_text": "Explain photosynthesis."},
            {"question_text": "Pick one", "options": ["x"], "correct_answer": "x"}
        ]}"#;
        let questions = parse_quiz_content(text).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Pick one");
    }

    #[test]
    fn test_malformed_payload_is_upstream_error() {
        let err = parse_quiz_content("{not json}").unwrap_err();
        assert!(matches!(err, LearnHubError::Upstream(_)));
        assert!(err.message().contains("malformed AI response"));

        let err = parse_quiz_content("nothing").unwrap_err();
        assert!(err.message().contains("malformed AI response"));
    }
}
