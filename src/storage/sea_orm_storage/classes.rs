//! 班级存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::class_members::{Column as MemberColumn, Entity as ClassMembers};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassPassError, Result};
use crate::models::classes::{
    entities::Class, requests::CreateClassRequest, responses::ClassSummary,
};
use crate::utils::credential::generate_passphrase;
use crate::utils::validate::{validate_class_name, validate_description, validate_subject};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};

// 插入时撞上通行码唯一索引（并发丢失竞争）的重试上限
const INSERT_RETRIES: usize = 5;

impl SeaOrmStorage {
    /// 创建班级，通行码自动生成且全局唯一
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        validate_class_name(&req.name).map_err(ClassPassError::validation)?;
        validate_subject(&req.subject).map_err(ClassPassError::validation)?;
        validate_description(req.description.as_deref()).map_err(ClassPassError::validation)?;

        // owner_id 必须由服务层确保已设置
        let owner_id = req.owner_id.ok_or_else(|| {
            ClassPassError::database_operation("owner_id must be set before calling create_class")
        })?;

        for _ in 0..INSERT_RETRIES {
            let passphrase = generate_passphrase(|candidate| async move {
                self.passphrase_exists(&candidate).await
            })
            .await?;

            let now = chrono::Utc::now().timestamp();
            let model = ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                owner_id: Set(owner_id.clone()),
                name: Set(req.name.trim().to_string()),
                subject: Set(req.subject.trim().to_string()),
                description: Set(req.description.clone()),
                passphrase: Set(passphrase),
                created_at: Set(now),
                updated_at: Set(now),
            };

            match model.insert(&self.db).await {
                Ok(result) => return Ok(result.into_class()),
                // 生成与插入之间被并发占用，换一个通行码重来
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    continue;
                }
                Err(e) => {
                    return Err(ClassPassError::database_operation(format!(
                        "创建班级失败: {e}"
                    )));
                }
            }
        }

        Err(ClassPassError::generation_exhausted(format!(
            "passphrase collided on insert {INSERT_RETRIES} times"
        )))
    }

    async fn passphrase_exists(&self, passphrase: &str) -> Result<bool> {
        let count = Classes::find()
            .filter(Column::Passphrase.eq(passphrase))
            .count(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询通行码失败: {e}")))?;

        Ok(count > 0)
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: &str) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过通行码获取班级
    pub async fn get_class_by_passphrase_impl(&self, passphrase: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Passphrase.eq(passphrase))
            .one(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出某教师创建的班级，班主任视角携带通行码
    pub async fn list_owned_classes_impl(&self, owner_id: &str) -> Result<Vec<ClassSummary>> {
        let owner_name = self.display_name(owner_id).await?;

        let classes = Classes::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班级列表失败: {e}")))?;

        let mut summaries = Vec::with_capacity(classes.len());
        for model in classes {
            let member_count = self.count_class_members_impl(&model.id).await?;
            let class = model.into_class();
            summaries.push(ClassSummary {
                id: class.id,
                name: class.name,
                subject: class.subject,
                description: class.description,
                passphrase: Some(class.passphrase),
                owner_id: class.owner_id,
                owner_name: owner_name.clone(),
                member_count,
                joined_at: None,
                created_at: class.created_at,
            });
        }

        Ok(summaries)
    }

    /// 列出某用户加入的班级，携带加入时间
    pub async fn list_enrolled_classes_impl(&self, user_id: &str) -> Result<Vec<ClassSummary>> {
        let memberships = ClassMembers::find()
            .filter(MemberColumn::UserId.eq(user_id))
            .order_by_desc(MemberColumn::JoinedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询用户班级关联失败: {e}")))?;

        if memberships.is_empty() {
            return Ok(vec![]);
        }

        let class_ids: Vec<String> = memberships.iter().map(|m| m.class_id.clone()).collect();
        let classes = Classes::find()
            .filter(Column::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班级列表失败: {e}")))?;
        let classes: HashMap<String, _> = classes.into_iter().map(|c| (c.id.clone(), c)).collect();

        let owner_ids: Vec<String> = classes.values().map(|c| c.owner_id.clone()).collect();
        let owners: HashMap<String, String> = Users::find()
            .filter(UserColumn::UserId.is_in(owner_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班主任失败: {e}")))?
            .into_iter()
            .map(|u| (u.user_id.clone(), format!("{} {}", u.first_name, u.last_name)))
            .collect();

        let mut summaries = Vec::with_capacity(memberships.len());
        for membership in memberships {
            let Some(model) = classes.get(&membership.class_id) else {
                continue;
            };
            let member_count = self.count_class_members_impl(&model.id).await?;
            let class = model.clone().into_class();
            let membership = membership.into_class_member();
            summaries.push(ClassSummary {
                id: class.id,
                name: class.name,
                subject: class.subject,
                description: class.description,
                passphrase: None,
                owner_name: owners.get(&class.owner_id).cloned().unwrap_or_default(),
                owner_id: class.owner_id,
                member_count,
                joined_at: Some(membership.joined_at),
                created_at: class.created_at,
            });
        }

        Ok(summaries)
    }

    /// 删除班级：成员关系与班级本体在同一事务内删除
    pub async fn delete_class_impl(&self, class_id: &str) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassPassError::database_operation(format!("开启事务失败: {e}")))?;

        ClassMembers::delete_many()
            .filter(MemberColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("删除班级成员失败: {e}")))?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ClassPassError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 班主任显示名
    async fn display_name(&self, user_id: &str) -> Result<String> {
        Ok(self
            .get_user_by_id_impl(user_id)
            .await?
            .map(|u| format!("{} {}", u.first_name, u.last_name))
            .unwrap_or_default())
    }
}
