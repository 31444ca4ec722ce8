pub mod generate;
pub mod lesson_plan;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::ai::GenerationService;
use crate::models::curricula::requests::GenerateCurriculumRequest;
use crate::storage::Storage;

static FIRST_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("Invalid integer regex"));

pub struct CurriculumService {
    storage: Option<Arc<dyn Storage>>,
    generator: Option<Arc<dyn GenerationService>>,
}

impl CurriculumService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            generator: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_generator(&self, request: &HttpRequest) -> Arc<dyn GenerationService> {
        if let Some(generator) = &self.generator {
            generator.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn GenerationService>>>()
                .expect("Generation service not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 生成并保存课程大纲
    pub async fn generate_curriculum(
        &self,
        request: &HttpRequest,
        generate_request: GenerateCurriculumRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_curriculum(self, request, generate_request).await
    }

    // 教师的大纲列表
    pub async fn list_curricula(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_curricula(self, request).await
    }

    // 为大纲生成教案
    pub async fn generate_lesson_plan(
        &self,
        request: &HttpRequest,
        curriculum_id: i64,
    ) -> ActixResult<HttpResponse> {
        lesson_plan::generate_lesson_plan(self, request, curriculum_id).await
    }
}

/// 年级里的第一个整数作为目标班级，例如 "10th Grade" -> 10；没有数字记 0
pub fn target_class(grade: &str) -> i64 {
    FIRST_INTEGER_RE
        .find(grade)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::target_class;

    #[test]
    fn test_target_class_from_grade() {
        assert_eq!(target_class("10th Grade"), 10);
        assert_eq!(target_class("Grade 7 (B)"), 7);
        assert_eq!(target_class("12"), 12);
        assert_eq!(target_class("Kindergarten"), 0);
        assert_eq!(target_class(""), 0);
    }
}
