//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activities;
mod assignments;
mod attendance;
mod curricula;
mod quizzes;
mod tasks;
mod users;

use crate::config::AppConfig;
use crate::errors::{LearnHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    ///
    /// 内存 SQLite（`sqlite::memory:`）每个连接都是独立的库，需要 `pool_size = 1`。
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LearnHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| LearnHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| LearnHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LearnHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 唯一约束冲突转为 Conflict，其余按数据库错误处理
pub(crate) fn map_insert_err(e: DbErr, conflict_msg: &str, op: &str) -> LearnHubError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => LearnHubError::conflict(conflict_msg),
        _ => LearnHubError::database_operation(format!("{op}失败: {e}")),
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        self.update_user_profile_impl(id, update).await
    }

    async fn list_students_by_class(&self, class_name: &str) -> Result<Vec<User>> {
        self.list_students_by_class_impl(class_name).await
    }

    async fn list_students_in_classes(&self, class_names: &[String]) -> Result<Vec<User>> {
        self.list_students_in_classes_impl(class_names).await
    }

    // 测验模块
    async fn create_quiz(&self, teacher_id: i64, quiz: CreateQuizRequest) -> Result<Quiz> {
        self.create_quiz_impl(teacher_id, quiz).await
    }

    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_by_id_impl(id).await
    }

    async fn list_quizzes_by_teacher(&self, teacher_id: i64) -> Result<Vec<QuizSummary>> {
        self.list_quizzes_by_teacher_impl(teacher_id).await
    }

    async fn list_quizzes_for_class(&self, class_name: &str) -> Result<Vec<Quiz>> {
        self.list_quizzes_for_class_impl(class_name).await
    }

    async fn create_quiz_submission(
        &self,
        quiz_id: i64,
        student_id: i64,
        answers: &AnswerMap,
        score: i32,
        total_points: i32,
    ) -> Result<QuizSubmission> {
        self.create_quiz_submission_impl(quiz_id, student_id, answers, score, total_points)
            .await
    }

    async fn get_quiz_submission(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizSubmission>> {
        self.get_quiz_submission_impl(quiz_id, student_id).await
    }

    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<QuizSubmission>> {
        self.list_submissions_by_student_impl(student_id).await
    }

    async fn list_submissions_for_quizzes(&self, quiz_ids: &[i64]) -> Result<Vec<QuizSubmission>> {
        self.list_submissions_for_quizzes_impl(quiz_ids).await
    }

    // 作业模块
    async fn list_assignments_by_student(&self, student_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_student_impl(student_id).await
    }

    async fn create_assignments(
        &self,
        student_ids: &[i64],
        req: &CreateAssignmentRequest,
    ) -> Result<i64> {
        self.create_assignments_impl(student_ids, req).await
    }

    // 活动模块
    async fn create_activity(
        &self,
        teacher_id: i64,
        req: CreateActivityRequest,
    ) -> Result<Activity> {
        self.create_activity_impl(teacher_id, req).await
    }

    async fn list_activities_for_class(&self, class_name: &str) -> Result<Vec<Activity>> {
        self.list_activities_for_class_impl(class_name).await
    }

    // 课程大纲模块
    async fn create_curriculum(
        &self,
        teacher_id: i64,
        req: &GenerateCurriculumRequest,
        title: String,
        content: String,
    ) -> Result<Curriculum> {
        self.create_curriculum_impl(teacher_id, req, title, content)
            .await
    }

    async fn get_curriculum_by_id(&self, id: i64) -> Result<Option<Curriculum>> {
        self.get_curriculum_by_id_impl(id).await
    }

    async fn list_curricula_by_teacher(&self, teacher_id: i64) -> Result<Vec<Curriculum>> {
        self.list_curricula_by_teacher_impl(teacher_id).await
    }

    async fn create_lesson_plan(
        &self,
        curriculum_id: i64,
        teacher_id: i64,
        title: String,
        content: String,
    ) -> Result<LessonPlan> {
        self.create_lesson_plan_impl(curriculum_id, teacher_id, title, content)
            .await
    }

    // 待办模块
    async fn list_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>> {
        self.list_tasks_by_user_impl(user_id).await
    }

    async fn create_task(&self, user_id: i64, req: CreateTaskRequest) -> Result<Task> {
        self.create_task_impl(user_id, req).await
    }

    async fn update_task_completion(
        &self,
        id: i64,
        user_id: i64,
        completed: bool,
    ) -> Result<Option<Task>> {
        self.update_task_completion_impl(id, user_id, completed)
            .await
    }

    async fn delete_task(&self, id: i64, user_id: i64) -> Result<bool> {
        self.delete_task_impl(id, user_id).await
    }

    // 考勤模块
    async fn list_attendance(&self, class_name: &str, date: &str) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(class_name, date).await
    }

    async fn save_attendance(
        &self,
        teacher_id: i64,
        class_name: &str,
        date: &str,
        entries: &[(i64, AttendanceStatus)],
    ) -> Result<i64> {
        self.save_attendance_impl(teacher_id, class_name, date, entries)
            .await
    }

    async fn list_attendance_by_teacher(&self, teacher_id: i64) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_by_teacher_impl(teacher_id).await
    }
}
