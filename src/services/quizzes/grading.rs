//! 自动批改
//!
//! 只批改客观题：答案下标与 `correct` 相同得 1 分，未作答按错处理。

use crate::errors::Result;
use crate::models::quizzes::entities::{AnswerMap, Question};

/// 计算 (得分, 总分)，总分等于题目数
pub fn grade(questions: &[Question], answers: &AnswerMap) -> (i32, i32) {
    let score = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| {
            answers
                .get(i)
                .is_some_and(|&chosen| usize::try_from(chosen).is_ok_and(|c| c == q.correct))
        })
        .count();

    (score as i32, questions.len() as i32)
}

/// 主观题评分扩展点，返回 0.0..=1.0 的得分比例
#[async_trait::async_trait]
pub trait SubjectiveGrader: Send + Sync {
    async fn grade_subjective(&self, question: &Question, free_text: &str) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arithmetic() -> Vec<Question> {
        vec![Question {
            text: "2+2?".into(),
            options: vec!["3".into(), "4".into(), "5".into(), "6".into()],
            correct: 1,
            explanation: None,
        }]
    }

    fn answers(pairs: &[(usize, i64)]) -> AnswerMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_single_question_scenarios() {
        let q = arithmetic();
        assert_eq!(grade(&q, &answers(&[(0, 1)])), (1, 1));
        assert_eq!(grade(&q, &answers(&[(0, 0)])), (0, 1));
        assert_eq!(grade(&q, &AnswerMap::new()), (0, 1));
    }

    #[test]
    fn test_out_of_range_and_negative_answers_are_wrong() {
        let q = arithmetic();
        assert_eq!(grade(&q, &answers(&[(0, -1)])), (0, 1));
        assert_eq!(grade(&q, &answers(&[(0, 99)])), (0, 1));
        // 多余的题号不影响得分
        assert_eq!(grade(&q, &answers(&[(0, 1), (5, 1)])), (1, 1));
    }

    #[test]
    fn test_score_bounded_by_total() {
        let mut q = arithmetic();
        q.push(Question {
            text: "Capital of France?".into(),
            options: vec!["Paris".into(), "Rome".into()],
            correct: 0,
            explanation: None,
        });
        let a = answers(&[(0, 1), (1, 0)]);
        let (score, total) = grade(&q, &a);
        assert_eq!((score, total), (2, 2));
        assert!(score <= total);
        // 纯函数，多次调用结果一致
        assert_eq!(grade(&q, &a), grade(&q, &a));
    }

    #[test]
    fn test_empty_quiz() {
        assert_eq!(grade(&[], &answers(&[(0, 1)])), (0, 0));
    }
}
