use super::{SeaOrmStorage, map_insert_err};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{LearnHubError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            name: Set(req.name),
            school: Set(req.school),
            grade: Set(req.grade),
            class_name: Set(req.class_name),
            roll_no: Set(req.roll_no),
            classes_taught: Set(serde_json::to_string(&req.classes_taught)?),
            subjects: Set(serde_json::to_string(&req.subjects)?),
            phone: Set(req.phone),
            bio: Set(req.bio),
            experience: Set(req.experience),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err(e, "Email already registered", "创建用户"))?;

        result.into_user()
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询用户失败: {e}")))?;

        result.map(|m| m.into_user()).transpose()
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询用户失败: {e}")))?;

        result.map(|m| m.into_user()).transpose()
    }

    /// 批量获取用户
    pub async fn get_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("批量查询用户失败: {e}")))?;

        users.into_iter().map(|m| m.into_user()).collect()
    }

    /// 更新个人资料，只写入请求中出现的字段
    pub async fn update_user_profile_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(school) = update.school {
            model.school = Set(school);
        }
        if let Some(grade) = update.grade {
            model.grade = Set(grade);
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name);
        }
        if let Some(roll_no) = update.roll_no {
            model.roll_no = Set(roll_no);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(bio) = update.bio {
            model.bio = Set(bio);
        }
        if let Some(experience) = update.experience {
            model.experience = Set(experience);
        }
        if let Some(classes_taught) = update.classes_taught {
            model.classes_taught = Set(serde_json::to_string(&classes_taught)?);
        }
        if let Some(subjects) = update.subjects {
            model.subjects = Set(serde_json::to_string(&subjects)?);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("更新用户资料失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 列出班级学生（按学号、姓名排序）
    pub async fn list_students_by_class_impl(&self, class_name: &str) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::Role.eq(UserRole::STUDENT))
            .filter(Column::ClassName.eq(class_name))
            .order_by_asc(Column::RollNo)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询班级学生失败: {e}")))?;

        users.into_iter().map(|m| m.into_user()).collect()
    }

    /// 列出若干班级的全部学生
    pub async fn list_students_in_classes_impl(&self, class_names: &[String]) -> Result<Vec<User>> {
        if class_names.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(Column::Role.eq(UserRole::STUDENT))
            .filter(Column::ClassName.is_in(class_names.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| LearnHubError::database_operation(format!("查询班级学生失败: {e}")))?;

        users.into_iter().map(|m| m.into_user()).collect()
    }
}
