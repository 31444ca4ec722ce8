use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单道选择题，`correct` 是 `options` 中正确选项的下标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// 选项非空且正确答案下标有效
    pub fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty() && !self.options.is_empty() && self.correct < self.options.len()
    }
}

/// 学生作答：题目下标 -> 所选选项下标
pub type AnswerMap = BTreeMap<usize, i64>;

// 测验实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub class_name: String,
    pub teacher_id: i64,
    pub questions: Vec<Question>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Quiz {
    /// 排序用的截止时间，未设置时退回创建时间
    pub fn effective_due_date(&self) -> chrono::DateTime<chrono::Utc> {
        self.due_date.unwrap_or(self.created_at)
    }
}

// 测验提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizSubmission {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub answers: AnswerMap,
    pub score: i32,
    pub total_points: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

// 题型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum QuizType {
    #[default]
    Objective,
    Subjective,
    Both,
}

// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for QuizType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizType::Objective => write!(f, "objective"),
            QuizType::Subjective => write!(f, "subjective"),
            QuizType::Both => write!(f, "both"),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_well_formed() {
        let mut q = Question {
            text: "2+2?".into(),
            options: vec!["3".into(), "4".into()],
            correct: 1,
            explanation: None,
        };
        assert!(q.is_well_formed());
        q.correct = 2;
        assert!(!q.is_well_formed());
        q.options.clear();
        q.correct = 0;
        assert!(!q.is_well_formed());
    }

    #[test]
    fn test_answer_map_accepts_string_keys() {
        let answers: AnswerMap = serde_json::from_str(r#"{"0": 1, "2": 3}"#).unwrap();
        assert_eq!(answers.get(&0), Some(&1));
        assert_eq!(answers.get(&2), Some(&3));
    }

    #[test]
    fn test_enums_lowercase() {
        let d: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
        assert!(serde_json::from_str::<Difficulty>("\"extreme\"").is_err());
        assert_eq!(QuizType::default().to_string(), "objective");
    }
}
