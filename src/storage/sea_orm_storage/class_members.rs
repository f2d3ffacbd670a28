//! 班级成员关联存储操作
//!
//! 匿名加入是这里最复杂的路径：身份解析、身份创建与成员关系创建
//! 必须在同一事务内完成，失败即整体回滚。

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::class_members::{ActiveModel, Column, Entity as ClassMembers};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as Users,
};
use crate::errors::{ClassPassError, Result};
use crate::models::{
    class_members::{
        entities::{AnonymousJoinOutcome, ClassMember},
        responses::ClassMemberInfo,
    },
    users::entities::{User, UserType},
};
use crate::utils::credential::generate_pin;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

impl SeaOrmStorage {
    /// 获取班级成员数量
    pub async fn count_class_members_impl(&self, class_id: &str) -> Result<i64> {
        let count = ClassMembers::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班级成员数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 登录用户加入班级
    ///
    /// 班主任不作为成员存在，尝试加入自己的班级按已是成员处理。
    pub async fn join_class_impl(&self, class_id: &str, user_id: &str) -> Result<ClassMember> {
        let class = self
            .get_class_by_id_impl(class_id)
            .await?
            .ok_or_else(|| ClassPassError::class_not_found(format!("班级不存在: {class_id}")))?;

        if class.owner_id == user_id {
            return Err(ClassPassError::already_member("班主任无需加入自己的班级"));
        }

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            class_id: Set(class_id.to_string()),
            user_id: Set(user_id.to_string()),
            joined_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            // (class_id, user_id) 唯一索引即“已是成员”的并发安全判定
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ClassPassError::already_member("已是该班级成员")
                }
                _ => ClassPassError::database_operation(format!("加入班级失败: {e}")),
            }
        })?;

        Ok(result.into_class_member())
    }

    /// 匿名学生通过通行码加入班级
    ///
    /// 候选身份按 (班级, 名字) 解析：
    /// 1. 班内成员 PIN 匹配且无待重置 → 已是成员；
    /// 2. 班内成员待重置 → 须先设置新 PIN（不看提交的 PIN）；
    /// 3. 班外身份 PIN 匹配且无待重置 → 复用该身份入班；
    /// 4. 班外身份待重置 → 须先设置新 PIN；
    /// 5. 仅剩 PIN 不匹配的班外身份 → PIN 错误，不做任何写入；
    /// 6. 其余情况（无候选，或仅有 PIN 不同的同名成员）→ 新建身份入班。
    pub async fn join_class_anonymous_impl(
        &self,
        passphrase: &str,
        first_name: &str,
        pin_code: &str,
    ) -> Result<AnonymousJoinOutcome> {
        let first_name = first_name.trim();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassPassError::database_operation(format!("开启事务失败: {e}")))?;

        let class = Classes::find()
            .filter(ClassColumn::Passphrase.eq(passphrase))
            .one(&txn)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| ClassPassError::invalid_passphrase("通行码无效"))?
            .into_class();

        // 候选身份：同名的匿名学生
        let candidates = Users::find()
            .filter(
                Condition::all()
                    .add(UserColumn::UserType.eq(UserType::STUDENT))
                    .add(UserColumn::PasswordHash.eq(""))
                    .add(UserColumn::FirstName.eq(first_name)),
            )
            .all(&txn)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询学生身份失败: {e}")))?;

        let member_ids: HashSet<String> = if candidates.is_empty() {
            HashSet::new()
        } else {
            let candidate_ids: Vec<String> =
                candidates.iter().map(|u| u.user_id.clone()).collect();
            ClassMembers::find()
                .filter(
                    Condition::all()
                        .add(Column::ClassId.eq(&class.id))
                        .add(Column::UserId.is_in(candidate_ids)),
                )
                .all(&txn)
                .await
                .map_err(|e| {
                    ClassPassError::database_operation(format!("查询班级成员失败: {e}"))
                })?
                .into_iter()
                .map(|m| m.user_id)
                .collect()
        };

        let pin_matches =
            |u: &crate::entity::users::Model| u.pin_code.as_deref() == Some(pin_code);

        // 规则 1：已是成员
        if candidates
            .iter()
            .any(|u| member_ids.contains(&u.user_id) && !u.pin_reset_required && pin_matches(u))
        {
            return Err(ClassPassError::already_member("已是该班级成员"));
        }

        // 规则 2：成员待重置
        if candidates
            .iter()
            .any(|u| member_ids.contains(&u.user_id) && u.pin_reset_required)
        {
            return Err(ClassPassError::pin_reset_required(
                "PIN 已被重置，请先设置新 PIN",
            ));
        }

        // 规则 3：复用班外身份
        if let Some(existing) = candidates
            .iter()
            .find(|u| !member_ids.contains(&u.user_id) && !u.pin_reset_required && pin_matches(u))
        {
            let member = Self::insert_membership(&txn, &class.id, &existing.user_id).await?;
            let student = existing.clone().into_user();
            txn.commit()
                .await
                .map_err(|e| ClassPassError::database_operation(format!("提交事务失败: {e}")))?;
            return Ok(AnonymousJoinOutcome {
                class,
                member,
                student,
                provisioned: false,
            });
        }

        // 规则 4：班外身份待重置
        if candidates
            .iter()
            .any(|u| !member_ids.contains(&u.user_id) && u.pin_reset_required)
        {
            return Err(ClassPassError::pin_reset_required(
                "PIN 已被重置，请先设置新 PIN",
            ));
        }

        // 规则 5：存在班外同名身份但 PIN 全部不匹配
        if candidates.iter().any(|u| !member_ids.contains(&u.user_id)) {
            return Err(ClassPassError::invalid_pin("PIN 错误"));
        }

        // 规则 6：新建身份（无候选，或同名成员是恰好重名的另一名学生）
        let now = chrono::Utc::now().timestamp();
        let user_id = self.student_ids.next_id(first_name);
        let student = UserActiveModel {
            user_id: Set(user_id.clone()),
            first_name: Set(first_name.to_string()),
            last_name: Set(String::new()),
            password_hash: Set(String::new()),
            user_type: Set(UserType::STUDENT.to_string()),
            pin_code: Set(Some(pin_code.to_string())),
            pin_reset_required: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassPassError::database_operation(format!("创建学生身份失败: {e}")))?
        .into_user();

        let member = Self::insert_membership(&txn, &class.id, &user_id).await?;

        txn.commit()
            .await
            .map_err(|e| ClassPassError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(AnonymousJoinOutcome {
            class,
            member,
            student,
            provisioned: true,
        })
    }

    async fn insert_membership<C: ConnectionTrait>(
        conn: &C,
        class_id: &str,
        user_id: &str,
    ) -> Result<ClassMember> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            class_id: Set(class_id.to_string()),
            user_id: Set(user_id.to_string()),
            joined_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model.insert(conn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ClassPassError::already_member("已是该班级成员")
            }
            _ => ClassPassError::database_operation(format!("加入班级失败: {e}")),
        })?;

        Ok(result.into_class_member())
    }

    /// 列出班级成员，按加入时间升序（同秒加入按成员 ID 排序）
    pub async fn list_class_members_impl(&self, class_id: &str) -> Result<Vec<ClassMemberInfo>> {
        let memberships = ClassMembers::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::JoinedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班级成员失败: {e}")))?;

        if memberships.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: Vec<String> = memberships.iter().map(|m| m.user_id.clone()).collect();
        let users: HashMap<String, User> = Users::find()
            .filter(UserColumn::UserId.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询成员身份失败: {e}")))?
            .into_iter()
            .map(|u| (u.user_id.clone(), u.into_user()))
            .collect();

        let mut members = Vec::with_capacity(memberships.len());
        for membership in memberships {
            let Some(user) = users.get(&membership.user_id) else {
                continue;
            };
            members.push(ClassMemberInfo {
                user_id: user.user_id.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                user_type: user.user_type.to_string(),
                joined_at: membership.into_class_member().joined_at,
                pin_code: user.pin_code.clone(),
                pin_reset_required: user.pin_reset_required,
            });
        }

        Ok(members)
    }

    /// 重置某成员的 PIN
    ///
    /// 生成新 PIN 并标记待重置：学生须用 set_student_pin 换成自己的新 PIN
    /// 之后才能继续加入。
    pub async fn reset_student_pin_impl(&self, class_id: &str, student_id: &str) -> Result<User> {
        let membership = ClassMembers::find()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::UserId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("查询班级成员失败: {e}")))?;

        if membership.is_none() {
            return Err(ClassPassError::not_a_member(format!(
                "{student_id} 不是该班级成员"
            )));
        }

        let student = self
            .get_user_by_id_impl(student_id)
            .await?
            .filter(User::is_anonymous_student)
            .ok_or_else(|| {
                ClassPassError::identity_not_found(format!("学生身份不存在: {student_id}"))
            })?;

        self.update_pin(&student.user_id, generate_pin(), true).await
    }

    /// 学生在重置后设置新 PIN
    pub async fn set_student_pin_impl(&self, user_id: &str, pin_code: &str) -> Result<User> {
        let student = self
            .get_user_by_id_impl(user_id)
            .await?
            .filter(User::is_anonymous_student)
            .ok_or_else(|| {
                ClassPassError::identity_not_found(format!("学生身份不存在: {user_id}"))
            })?;

        self.update_pin(&student.user_id, pin_code.to_string(), false)
            .await
    }

    async fn update_pin(&self, user_id: &str, pin: String, reset_required: bool) -> Result<User> {
        let model = UserActiveModel {
            user_id: Set(user_id.to_string()),
            pin_code: Set(Some(pin)),
            pin_reset_required: Set(reset_required),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("更新 PIN 失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 班主任移出成员，学生身份保留
    pub async fn remove_member_impl(&self, class_id: &str, user_id: &str) -> Result<()> {
        let result = ClassMembers::delete_many()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::UserId.eq(user_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassPassError::database_operation(format!("移出成员失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(ClassPassError::not_a_member(format!(
                "{user_id} 不是该班级成员"
            )));
        }

        Ok(())
    }

    /// 成员主动退出班级
    pub async fn leave_class_impl(&self, class_id: &str, user_id: &str) -> Result<()> {
        let class = self
            .get_class_by_id_impl(class_id)
            .await?
            .ok_or_else(|| ClassPassError::class_not_found(format!("班级不存在: {class_id}")))?;

        if class.owner_id == user_id {
            return Err(ClassPassError::owner_cannot_leave(
                "班主任不能退出自己的班级，请删除班级",
            ));
        }

        self.remove_member_impl(class_id, user_id).await
    }
}
