//! 预导入模块，方便使用

pub use super::class_members::{
    ActiveModel as ClassMemberActiveModel, Entity as ClassMembers, Model as ClassMemberModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
