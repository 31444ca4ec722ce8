use std::sync::Arc;

use crate::models::{
    activities::{entities::Activity, requests::CreateActivityRequest},
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    attendance::entities::{AttendanceRecord, AttendanceStatus},
    curricula::{
        entities::{Curriculum, LessonPlan},
        requests::GenerateCurriculumRequest,
    },
    quizzes::{
        entities::{AnswerMap, Quiz, QuizSubmission},
        requests::CreateQuizRequest,
        responses::QuizSummary,
    },
    tasks::{entities::Task, requests::CreateTaskRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，邮箱重复时返回 Conflict
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 更新个人资料，用户不存在时返回 None
    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>>;
    // 列出班级学生，按学号排序
    async fn list_students_by_class(&self, class_name: &str) -> Result<Vec<User>>;
    // 列出若干班级的全部学生
    async fn list_students_in_classes(&self, class_names: &[String]) -> Result<Vec<User>>;

    /// 测验管理方法
    // 创建测验
    async fn create_quiz(&self, teacher_id: i64, quiz: CreateQuizRequest) -> Result<Quiz>;
    // 通过ID获取测验
    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>>;
    // 列出教师的测验（附提交数，新的在前）
    async fn list_quizzes_by_teacher(&self, teacher_id: i64) -> Result<Vec<QuizSummary>>;
    // 列出班级可见的测验
    async fn list_quizzes_for_class(&self, class_name: &str) -> Result<Vec<Quiz>>;

    /// 测验提交方法
    // 保存提交，重复提交返回 Conflict
    async fn create_quiz_submission(
        &self,
        quiz_id: i64,
        student_id: i64,
        answers: &AnswerMap,
        score: i32,
        total_points: i32,
    ) -> Result<QuizSubmission>;
    // 获取学生对某测验的提交
    async fn get_quiz_submission(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizSubmission>>;
    // 列出学生的全部提交
    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<QuizSubmission>>;
    // 列出若干测验的全部提交（新的在前）
    async fn list_submissions_for_quizzes(&self, quiz_ids: &[i64]) -> Result<Vec<QuizSubmission>>;

    /// 作业管理方法
    // 列出学生的作业
    async fn list_assignments_by_student(&self, student_id: i64) -> Result<Vec<Assignment>>;
    // 为一组学生各创建一份作业
    async fn create_assignments(
        &self,
        student_ids: &[i64],
        req: &CreateAssignmentRequest,
    ) -> Result<i64>;

    /// 活动管理方法
    // 创建活动
    async fn create_activity(&self, teacher_id: i64, req: CreateActivityRequest)
    -> Result<Activity>;
    // 列出班级活动
    async fn list_activities_for_class(&self, class_name: &str) -> Result<Vec<Activity>>;

    /// 课程大纲方法
    // 保存生成的大纲
    async fn create_curriculum(
        &self,
        teacher_id: i64,
        req: &GenerateCurriculumRequest,
        title: String,
        content: String,
    ) -> Result<Curriculum>;
    // 通过ID获取大纲（含教案）
    async fn get_curriculum_by_id(&self, id: i64) -> Result<Option<Curriculum>>;
    // 列出教师的大纲（含教案）
    async fn list_curricula_by_teacher(&self, teacher_id: i64) -> Result<Vec<Curriculum>>;
    // 为大纲保存教案
    async fn create_lesson_plan(
        &self,
        curriculum_id: i64,
        teacher_id: i64,
        title: String,
        content: String,
    ) -> Result<LessonPlan>;

    /// 个人待办方法
    async fn list_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>>;
    async fn create_task(&self, user_id: i64, req: CreateTaskRequest) -> Result<Task>;
    // 只能修改自己的待办，不存在时返回 None
    async fn update_task_completion(
        &self,
        id: i64,
        user_id: i64,
        completed: bool,
    ) -> Result<Option<Task>>;
    async fn delete_task(&self, id: i64, user_id: i64) -> Result<bool>;

    /// 考勤方法
    // 查询班级某日考勤
    async fn list_attendance(&self, class_name: &str, date: &str) -> Result<Vec<AttendanceRecord>>;
    // 事务内批量 upsert，全部成功或全部回滚
    async fn save_attendance(
        &self,
        teacher_id: i64,
        class_name: &str,
        date: &str,
        entries: &[(i64, AttendanceStatus)],
    ) -> Result<i64>;
    // 列出教师记录的全部考勤
    async fn list_attendance_by_teacher(&self, teacher_id: i64) -> Result<Vec<AttendanceRecord>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
