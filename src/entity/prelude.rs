//! 预导入模块，方便使用

pub use super::activities::{
    ActiveModel as ActivityActiveModel, Entity as Activities, Model as ActivityModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::curricula::{
    ActiveModel as CurriculumActiveModel, Entity as Curricula, Model as CurriculumModel,
};
pub use super::lesson_plans::{
    ActiveModel as LessonPlanActiveModel, Entity as LessonPlans, Model as LessonPlanModel,
};
pub use super::quiz_submissions::{
    ActiveModel as QuizSubmissionActiveModel, Entity as QuizSubmissions,
    Model as QuizSubmissionModel,
};
pub use super::quizzes::{ActiveModel as QuizActiveModel, Entity as Quizzes, Model as QuizModel};
pub use super::tasks::{ActiveModel as TaskActiveModel, Entity as Tasks, Model as TaskModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
