//! 存储层集成测试，使用内存 SQLite
//!
//! 连接池固定为 1，保证所有操作落在同一个内存数据库上。

use super::SeaOrmStorage;
use crate::errors::ClassPassError;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::UserType;
use crate::models::users::requests::CreateUserRequest;
use crate::utils::credential::{PASSPHRASE_ALPHABET, PASSPHRASE_LEN};

async fn memory_storage() -> SeaOrmStorage {
    SeaOrmStorage::new_with_url(":memory:", 1, 5)
        .await
        .expect("failed to create in-memory storage")
}

async fn seed_teacher(storage: &SeaOrmStorage, user_id: &str) {
    storage
        .create_user_impl(CreateUserRequest {
            user_id: user_id.to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            password: "teach1234".to_string(),
            user_type: UserType::Teacher,
        })
        .await
        .expect("failed to seed teacher");
}

async fn seed_student(storage: &SeaOrmStorage, user_id: &str) {
    storage
        .create_user_impl(CreateUserRequest {
            user_id: user_id.to_string(),
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            password: "learn1234".to_string(),
            user_type: UserType::Student,
        })
        .await
        .expect("failed to seed student");
}

async fn seed_class(storage: &SeaOrmStorage, owner_id: &str, name: &str) -> String {
    let class = storage
        .create_class_impl(CreateClassRequest {
            owner_id: Some(owner_id.to_string()),
            name: name.to_string(),
            subject: "Math".to_string(),
            description: None,
        })
        .await
        .expect("failed to seed class");
    class.id
}

#[tokio::test]
async fn test_create_class_generates_valid_passphrase() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;

    let class = storage
        .create_class_impl(CreateClassRequest {
            owner_id: Some("teacher1".to_string()),
            name: "Algebra".to_string(),
            subject: "Math".to_string(),
            description: Some("Year 9".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(class.passphrase.len(), PASSPHRASE_LEN);
    assert!(
        class
            .passphrase
            .bytes()
            .all(|b| PASSPHRASE_ALPHABET.contains(&b))
    );
    assert_eq!(class.owner_id, "teacher1");
}

#[tokio::test]
async fn test_create_class_passphrases_are_distinct() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;

    let a = seed_class(&storage, "teacher1", "Algebra").await;
    let b = seed_class(&storage, "teacher1", "Geometry").await;

    let a = storage.get_class_by_id_impl(&a).await.unwrap().unwrap();
    let b = storage.get_class_by_id_impl(&b).await.unwrap().unwrap();
    assert_ne!(a.passphrase, b.passphrase);
}

#[tokio::test]
async fn test_passphrases_unique_across_many_classes() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;

    let mut seen = std::collections::HashSet::new();
    for i in 0..30 {
        let id = seed_class(&storage, "teacher1", &format!("Class {i}")).await;
        let class = storage.get_class_by_id_impl(&id).await.unwrap().unwrap();
        assert!(seen.insert(class.passphrase), "duplicate passphrase");
    }
}

#[tokio::test]
async fn test_create_class_rejects_invalid_name() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;

    let err = storage
        .create_class_impl(CreateClassRequest {
            owner_id: Some("teacher1".to_string()),
            name: "".to_string(),
            subject: "Math".to_string(),
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClassPassError::Validation(_)));
}

#[tokio::test]
async fn test_create_user_rejects_duplicate_id() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;

    let err = storage
        .create_user_impl(CreateUserRequest {
            user_id: "teacher1".to_string(),
            first_name: "Other".to_string(),
            last_name: "Teacher".to_string(),
            password: "teach1234".to_string(),
            user_type: UserType::Teacher,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClassPassError::Validation(_)));
}

#[tokio::test]
async fn test_join_class_by_passphrase() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    seed_student(&storage, "alan").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;

    let member = storage.join_class_impl(&class_id, "alan").await.unwrap();
    assert_eq!(member.class_id, class_id);
    assert_eq!(member.user_id, "alan");

    let count = storage.count_class_members_impl(&class_id).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_join_class_twice_is_already_member() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    seed_student(&storage, "alan").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;

    storage.join_class_impl(&class_id, "alan").await.unwrap();
    let err = storage.join_class_impl(&class_id, "alan").await.unwrap_err();
    assert!(matches!(err, ClassPassError::AlreadyMember(_)));

    // 重复加入不会产生第二条成员记录
    let count = storage.count_class_members_impl(&class_id).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_owner_cannot_join_own_class() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;

    let err = storage
        .join_class_impl(&class_id, "teacher1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::AlreadyMember(_)));
}

#[tokio::test]
async fn test_join_missing_class_is_not_found() {
    let storage = memory_storage().await;
    seed_student(&storage, "alan").await;

    let err = storage.join_class_impl("no-such-id", "alan").await.unwrap_err();
    assert!(matches!(err, ClassPassError::ClassNotFound(_)));
}

#[tokio::test]
async fn test_anonymous_join_provisions_identity() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;
    let class = storage.get_class_by_id_impl(&class_id).await.unwrap().unwrap();

    let outcome = storage
        .join_class_anonymous_impl(&class.passphrase, "John", "1234")
        .await
        .unwrap();

    assert!(outcome.provisioned);
    assert!(outcome.student.user_id.starts_with("student_john_"));
    assert_eq!(outcome.student.first_name, "John");
    assert_eq!(outcome.student.pin_code.as_deref(), Some("1234"));
    assert!(!outcome.student.pin_reset_required);
    assert!(outcome.student.is_anonymous_student());
    assert_eq!(outcome.member.class_id, class_id);
}

#[tokio::test]
async fn test_anonymous_rejoin_same_pin_is_already_member() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;
    let class = storage.get_class_by_id_impl(&class_id).await.unwrap().unwrap();

    storage
        .join_class_anonymous_impl(&class.passphrase, "John", "1234")
        .await
        .unwrap();
    let err = storage
        .join_class_anonymous_impl(&class.passphrase, "John", "1234")
        .await
        .unwrap_err();

    assert!(matches!(err, ClassPassError::AlreadyMember(_)));
    let count = storage.count_class_members_impl(&class_id).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_anonymous_same_name_different_pin_creates_second_identity() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;
    let class = storage.get_class_by_id_impl(&class_id).await.unwrap().unwrap();

    // 两个恰好同名的学生各自首次加入
    let first = storage
        .join_class_anonymous_impl(&class.passphrase, "John", "1111")
        .await
        .unwrap();
    let second = storage
        .join_class_anonymous_impl(&class.passphrase, "John", "2222")
        .await
        .unwrap();

    assert!(first.provisioned);
    assert!(second.provisioned);
    assert_ne!(first.student.user_id, second.student.user_id);

    let members = storage.list_class_members_impl(&class_id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().any(|m| m.user_id == first.student.user_id));
    assert!(members.iter().any(|m| m.user_id == second.student.user_id));
}

#[tokio::test]
async fn test_anonymous_join_reuses_identity_across_classes() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_a = seed_class(&storage, "teacher1", "Algebra").await;
    let class_b = seed_class(&storage, "teacher1", "Geometry").await;
    let pass_a = storage
        .get_class_by_id_impl(&class_a)
        .await
        .unwrap()
        .unwrap()
        .passphrase;
    let pass_b = storage
        .get_class_by_id_impl(&class_b)
        .await
        .unwrap()
        .unwrap()
        .passphrase;

    let first = storage
        .join_class_anonymous_impl(&pass_a, "Mary", "4321")
        .await
        .unwrap();
    let second = storage
        .join_class_anonymous_impl(&pass_b, "Mary", "4321")
        .await
        .unwrap();

    // 名字 + PIN 匹配即复用同一身份
    assert!(first.provisioned);
    assert!(!second.provisioned);
    assert_eq!(first.student.user_id, second.student.user_id);
}

#[tokio::test]
async fn test_anonymous_join_wrong_pin_for_non_member_identity() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_a = seed_class(&storage, "teacher1", "Algebra").await;
    let class_b = seed_class(&storage, "teacher1", "Geometry").await;
    let pass_a = storage
        .get_class_by_id_impl(&class_a)
        .await
        .unwrap()
        .unwrap()
        .passphrase;
    let pass_b = storage
        .get_class_by_id_impl(&class_b)
        .await
        .unwrap()
        .unwrap()
        .passphrase;

    storage
        .join_class_anonymous_impl(&pass_a, "Mary", "4321")
        .await
        .unwrap();

    // 班外存在同名身份但 PIN 不匹配：拒绝而不是悄悄建新身份
    let err = storage
        .join_class_anonymous_impl(&pass_b, "Mary", "0000")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::InvalidPin(_)));

    let count = storage.count_class_members_impl(&class_b).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_anonymous_join_invalid_passphrase() {
    let storage = memory_storage().await;

    let err = storage
        .join_class_anonymous_impl("WRONGPW1", "John", "1234")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::InvalidPassphrase(_)));
}

#[tokio::test]
async fn test_remove_member_keeps_identity() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;
    let passphrase = storage
        .get_class_by_id_impl(&class_id)
        .await
        .unwrap()
        .unwrap()
        .passphrase;

    let outcome = storage
        .join_class_anonymous_impl(&passphrase, "John", "1234")
        .await
        .unwrap();
    let student_id = outcome.student.user_id.clone();

    storage
        .remove_member_impl(&class_id, &student_id)
        .await
        .unwrap();

    // 成员关系删除，身份保留
    let count = storage.count_class_members_impl(&class_id).await.unwrap();
    assert_eq!(count, 0);
    assert!(
        storage
            .get_user_by_id_impl(&student_id)
            .await
            .unwrap()
            .is_some()
    );

    // 同名同 PIN 重新加入时复用原身份
    let rejoined = storage
        .join_class_anonymous_impl(&passphrase, "John", "1234")
        .await
        .unwrap();
    assert!(!rejoined.provisioned);
    assert_eq!(rejoined.student.user_id, student_id);
}

#[tokio::test]
async fn test_remove_missing_member_is_not_a_member() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;

    let err = storage
        .remove_member_impl(&class_id, "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::NotAMember(_)));
}

#[tokio::test]
async fn test_reset_pin_requires_membership() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;

    let err = storage
        .reset_student_pin_impl(&class_id, "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::NotAMember(_)));
}

#[tokio::test]
async fn test_reset_pin_blocks_join_until_new_pin_set() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_a = seed_class(&storage, "teacher1", "Algebra").await;
    let class_b = seed_class(&storage, "teacher1", "Geometry").await;
    let pass_b = storage
        .get_class_by_id_impl(&class_b)
        .await
        .unwrap()
        .unwrap()
        .passphrase;
    let pass_a = storage
        .get_class_by_id_impl(&class_a)
        .await
        .unwrap()
        .unwrap()
        .passphrase;

    let outcome = storage
        .join_class_anonymous_impl(&pass_a, "John", "1234")
        .await
        .unwrap();
    let student_id = outcome.student.user_id.clone();

    let reset = storage
        .reset_student_pin_impl(&class_a, &student_id)
        .await
        .unwrap();
    assert!(reset.pin_reset_required);
    assert_ne!(reset.pin_code.as_deref(), None);

    // 待重置期间：旧 PIN 在本班被拒
    let err = storage
        .join_class_anonymous_impl(&pass_a, "John", "1234")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::PinResetRequired(_)));

    // 待重置期间：重置出来的 PIN 也不能用于加入其它班级
    let stored_pin = reset.pin_code.unwrap();
    let err = storage
        .join_class_anonymous_impl(&pass_b, "John", &stored_pin)
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::PinResetRequired(_)));

    // 设置新 PIN 后恢复正常
    let updated = storage
        .set_student_pin_impl(&student_id, "9876")
        .await
        .unwrap();
    assert!(!updated.pin_reset_required);
    assert_eq!(updated.pin_code.as_deref(), Some("9876"));

    let joined = storage
        .join_class_anonymous_impl(&pass_b, "John", "9876")
        .await
        .unwrap();
    assert!(!joined.provisioned);
    assert_eq!(joined.student.user_id, student_id);
}

#[tokio::test]
async fn test_set_pin_rejects_registered_accounts() {
    let storage = memory_storage().await;
    seed_student(&storage, "alan").await;

    // 注册账号不持有 PIN
    let err = storage.set_student_pin_impl("alan", "1234").await.unwrap_err();
    assert!(matches!(err, ClassPassError::IdentityNotFound(_)));

    let err = storage
        .set_student_pin_impl("missing", "1234")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::IdentityNotFound(_)));
}

#[tokio::test]
async fn test_leave_class() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    seed_student(&storage, "alan").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;

    storage.join_class_impl(&class_id, "alan").await.unwrap();
    storage.leave_class_impl(&class_id, "alan").await.unwrap();

    let count = storage.count_class_members_impl(&class_id).await.unwrap();
    assert_eq!(count, 0);

    // 再次退出报不是成员
    let err = storage.leave_class_impl(&class_id, "alan").await.unwrap_err();
    assert!(matches!(err, ClassPassError::NotAMember(_)));
}

#[tokio::test]
async fn test_owner_cannot_leave_own_class() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;

    let err = storage
        .leave_class_impl(&class_id, "teacher1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClassPassError::OwnerCannotLeave(_)));
}

#[tokio::test]
async fn test_delete_class_cascades_memberships() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    seed_student(&storage, "alan").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;
    let passphrase = storage
        .get_class_by_id_impl(&class_id)
        .await
        .unwrap()
        .unwrap()
        .passphrase;

    storage.join_class_impl(&class_id, "alan").await.unwrap();
    let outcome = storage
        .join_class_anonymous_impl(&passphrase, "John", "1234")
        .await
        .unwrap();

    let deleted = storage.delete_class_impl(&class_id).await.unwrap();
    assert!(deleted);

    assert!(storage.get_class_by_id_impl(&class_id).await.unwrap().is_none());
    let enrolled = storage.list_enrolled_classes_impl("alan").await.unwrap();
    assert!(enrolled.is_empty());

    // 学生身份不随班级删除
    assert!(
        storage
            .get_user_by_id_impl(&outcome.student.user_id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_list_class_members_ordered_by_join_time() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;
    let passphrase = storage
        .get_class_by_id_impl(&class_id)
        .await
        .unwrap()
        .unwrap()
        .passphrase;

    let first = storage
        .join_class_anonymous_impl(&passphrase, "John", "1111")
        .await
        .unwrap();
    // joined_at 为秒级时间戳，隔开一秒保证顺序确定
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let second = storage
        .join_class_anonymous_impl(&passphrase, "Mary", "2222")
        .await
        .unwrap();

    let members = storage.list_class_members_impl(&class_id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].user_id, first.student.user_id);
    assert_eq!(members[1].user_id, second.student.user_id);
    assert!(members[0].joined_at <= members[1].joined_at);

    // 班主任视角可见 PIN 状态
    assert_eq!(members[0].pin_code.as_deref(), Some("1111"));
    assert!(!members[0].pin_reset_required);
}

// 端到端：建班 → 匿名加入 → 重置 PIN → 设新 PIN → 跨班复用 → 移出 → 删班
#[tokio::test]
async fn test_full_membership_lifecycle() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    let math = seed_class(&storage, "teacher1", "Math").await;
    let art = seed_class(&storage, "teacher1", "Art").await;
    let math_pass = storage.get_class_by_id_impl(&math).await.unwrap().unwrap().passphrase;
    let art_pass = storage.get_class_by_id_impl(&art).await.unwrap().unwrap().passphrase;

    let joined = storage
        .join_class_anonymous_impl(&math_pass, "Ada", "1234")
        .await
        .unwrap();
    assert!(joined.provisioned);
    let ada = joined.student.user_id.clone();

    let reset = storage.reset_student_pin_impl(&math, &ada).await.unwrap();
    assert!(reset.pin_reset_required);

    storage.set_student_pin_impl(&ada, "5678").await.unwrap();

    // 新 PIN 可用于加入第二个班级，身份复用
    let rejoined = storage
        .join_class_anonymous_impl(&art_pass, "Ada", "5678")
        .await
        .unwrap();
    assert!(!rejoined.provisioned);
    assert_eq!(rejoined.student.user_id, ada);

    storage.remove_member_impl(&math, &ada).await.unwrap();
    assert_eq!(storage.count_class_members_impl(&math).await.unwrap(), 0);
    assert_eq!(storage.count_class_members_impl(&art).await.unwrap(), 1);

    assert!(storage.delete_class_impl(&art).await.unwrap());
    // 身份在所有班级消失后仍然存在
    assert!(storage.get_user_by_id_impl(&ada).await.unwrap().is_some());
}

#[tokio::test]
async fn test_owned_and_enrolled_class_summaries() {
    let storage = memory_storage().await;
    seed_teacher(&storage, "teacher1").await;
    seed_student(&storage, "alan").await;
    let class_id = seed_class(&storage, "teacher1", "Algebra").await;

    storage.join_class_impl(&class_id, "alan").await.unwrap();

    let owned = storage.list_owned_classes_impl("teacher1").await.unwrap();
    assert_eq!(owned.len(), 1);
    assert!(owned[0].passphrase.is_some());
    assert_eq!(owned[0].member_count, 1);
    assert_eq!(owned[0].owner_name, "Grace Hopper");
    assert!(owned[0].joined_at.is_none());

    let enrolled = storage.list_enrolled_classes_impl("alan").await.unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].id, class_id);
    assert!(enrolled[0].passphrase.is_none());
    assert!(enrolled[0].joined_at.is_some());
    assert_eq!(enrolled[0].member_count, 1);
}
