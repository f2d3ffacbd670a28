use std::sync::Arc;

use crate::models::{
    class_members::{
        entities::{AnonymousJoinOutcome, ClassMember},
        responses::ClassMemberInfo,
    },
    classes::{entities::Class, requests::CreateClassRequest, responses::ClassSummary},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建注册用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>>;

    /// 班级管理方法
    // 创建班级，自动生成全局唯一通行码
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: &str) -> Result<Option<Class>>;
    // 通过通行码获取班级信息
    async fn get_class_by_passphrase(&self, passphrase: &str) -> Result<Option<Class>>;
    // 列出某教师创建的班级（含通行码与成员数）
    async fn list_owned_classes(&self, owner_id: &str) -> Result<Vec<ClassSummary>>;
    // 列出某用户加入的班级（含加入时间与成员数）
    async fn list_enrolled_classes(&self, user_id: &str) -> Result<Vec<ClassSummary>>;
    // 删除班级及其全部成员关系（单事务）
    async fn delete_class(&self, class_id: &str) -> Result<bool>;
    // 获取班级成员数量
    async fn count_class_members(&self, class_id: &str) -> Result<i64>;

    /// 班级成员管理方法
    // 登录用户加入班级
    async fn join_class(&self, class_id: &str, user_id: &str) -> Result<ClassMember>;
    // 匿名学生通过通行码加入班级，身份与成员关系同事务提交
    async fn join_class_anonymous(
        &self,
        passphrase: &str,
        first_name: &str,
        pin_code: &str,
    ) -> Result<AnonymousJoinOutcome>;
    // 列出班级成员，按加入时间升序
    async fn list_class_members(&self, class_id: &str) -> Result<Vec<ClassMemberInfo>>;
    // 重置某成员的 PIN，返回携带新 PIN 的学生身份
    async fn reset_student_pin(&self, class_id: &str, student_id: &str) -> Result<User>;
    // 学生在重置后设置新 PIN
    async fn set_student_pin(&self, user_id: &str, pin_code: &str) -> Result<User>;
    // 移出成员，身份保留
    async fn remove_member(&self, class_id: &str, user_id: &str) -> Result<()>;
    // 成员主动退出，班主任不可退出自己的班级
    async fn leave_class(&self, class_id: &str, user_id: &str) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
