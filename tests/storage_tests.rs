//! 存储层集成测试
//!
//! 用内存 SQLite 走完整的迁移 + SeaOrmStorage 路径，
//! 覆盖提交唯一性、评分迁移等核心不变量。

use chrono::{Duration, Utc};
use smartclass_backend::errors::SmartClassError;
use smartclass_backend::models::assignments::entities::AssignmentStatus;
use smartclass_backend::models::assignments::requests::CreateAssignmentRequest;
use smartclass_backend::models::classes::requests::CreateClassRequest;
use smartclass_backend::models::submissions::entities::{Attachment, SubmissionStatus};
use smartclass_backend::models::users::entities::{User, UserRole};
use smartclass_backend::models::users::requests::CreateUserRequest;
use smartclass_backend::storage::Storage;
use smartclass_backend::storage::sea_orm_storage::SeaOrmStorage;

// 内存库必须单连接，否则每个连接各自为政
async fn setup() -> SeaOrmStorage {
    SeaOrmStorage::new_with_url(":memory:", 1, 5)
        .await
        .expect("in-memory storage should initialize")
}

async fn create_user(storage: &SeaOrmStorage, name: &str, email: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake-hash".to_string(),
            role,
        })
        .await
        .expect("user creation should succeed")
}

fn assignment_request(class_id: i64, title: &str, points: Option<i64>) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        class_id,
        title: title.to_string(),
        description: "Read chapter 3 and answer the questions".to_string(),
        due_date: Utc::now() + Duration::days(7),
        points,
        status: None,
    }
}

#[tokio::test]
async fn test_class_code_generated_and_unique() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;

    let a = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();
    let b = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 102".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(a.code.len(), 6);
    assert_ne!(a.code, b.code);

    let found = storage.get_class_by_code(&a.code).await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(a.id));
}

#[tokio::test]
async fn test_enroll_twice_rejected() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    let student = create_user(&storage, "S1", "s1@example.com", UserRole::Student).await;

    let class = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();

    storage.enroll_student(class.id, student.id).await.unwrap();
    let second = storage.enroll_student(class.id, student.id).await;
    assert!(matches!(second, Err(SmartClassError::Conflict(_))));

    let students = storage.list_class_students(class.id).await.unwrap();
    assert_eq!(students.len(), 1);
}

#[tokio::test]
async fn test_assignment_creation_defaults() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    let class = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();

    // points 缺省 100，status 缺省 draft
    let defaulted = storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW0", None))
        .await
        .unwrap();
    assert_eq!(defaulted.points, 100);
    assert_eq!(defaulted.status, AssignmentStatus::Draft);

    // 显式 points 保留
    let explicit = storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW1", Some(50)))
        .await
        .unwrap();
    assert_eq!(explicit.points, 50);
    assert_eq!(explicit.status, AssignmentStatus::Draft);
    assert!(explicit.points >= 0);

    // 负分被拒绝
    let negative = storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW2", Some(-5)))
        .await;
    assert!(negative.is_err());
}

#[tokio::test]
async fn test_duplicate_submission_rejected() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    let student = create_user(&storage, "S1", "s1@example.com", UserRole::Student).await;
    let class = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW1", None))
        .await
        .unwrap();

    let first = storage
        .create_submission(assignment.id, student.id, "my answer".to_string(), vec![])
        .await
        .unwrap();
    assert_eq!(first.status, SubmissionStatus::Submitted);
    assert!(first.attachments.is_empty());

    let second = storage
        .create_submission(assignment.id, student.id, "again".to_string(), vec![])
        .await;
    assert!(matches!(second, Err(SmartClassError::Conflict(_))));

    // 第一次提交原样保留
    let stored = storage
        .get_submission(assignment.id, student.id)
        .await
        .unwrap()
        .expect("submission should exist");
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.content, "my answer");
}

#[tokio::test]
async fn test_submission_attachments_round_trip() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    let student = create_user(&storage, "S1", "s1@example.com", UserRole::Student).await;
    let class = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW1", None))
        .await
        .unwrap();

    let attachments = vec![
        Attachment {
            filename: "attachments-1-a.pdf".to_string(),
            original_name: "essay.pdf".to_string(),
            path: "uploads/assignments/attachments-1-a.pdf".to_string(),
            size: 1024,
        },
        Attachment {
            filename: "attachments-1-b.png".to_string(),
            original_name: "figure.png".to_string(),
            path: "uploads/assignments/attachments-1-b.png".to_string(),
            size: 2048,
        },
    ];

    let submission = storage
        .create_submission(
            assignment.id,
            student.id,
            "see attached".to_string(),
            attachments,
        )
        .await
        .unwrap();
    assert_eq!(submission.attachments.len(), 2);

    let stored = storage
        .get_submission(assignment.id, student.id)
        .await
        .unwrap()
        .unwrap();
    let mut names: Vec<&str> = stored
        .attachments
        .iter()
        .map(|a| a.original_name.as_str())
        .collect();
    names.sort();
    assert_eq!(names, vec!["essay.pdf", "figure.png"]);

    // 三元组检索：正确的文件名命中，别的学生拿同一个文件名落空
    let hit = storage
        .get_attachment(assignment.id, student.id, "attachments-1-a.pdf")
        .await
        .unwrap();
    assert_eq!(hit.map(|a| a.original_name), Some("essay.pdf".to_string()));

    let other = create_user(&storage, "S2", "s2@example.com", UserRole::Student).await;
    let miss = storage
        .get_attachment(assignment.id, other.id, "attachments-1-a.pdf")
        .await
        .unwrap();
    assert!(miss.is_none());
}

#[tokio::test]
async fn test_grading_transitions() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    let student = create_user(&storage, "S1", "s1@example.com", UserRole::Student).await;
    let class = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW1", None))
        .await
        .unwrap();

    // 不存在的提交评分返回 None
    let missing = storage
        .grade_submission(assignment.id, student.id, 90.0, None)
        .await
        .unwrap();
    assert!(missing.is_none());

    storage
        .create_submission(assignment.id, student.id, "answer".to_string(), vec![])
        .await
        .unwrap();

    let graded = storage
        .grade_submission(assignment.id, student.id, 95.0, Some("Great".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.grade, Some(95.0));
    assert_eq!(graded.feedback.as_deref(), Some("Great"));
    assert!(graded.graded_at.is_some());

    // 重复评分覆盖分数，状态不回退
    let regraded = storage
        .grade_submission(assignment.id, student.id, 80.0, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(regraded.status, SubmissionStatus::Graded);
    assert_eq!(regraded.grade, Some(80.0));
}

#[tokio::test]
async fn test_submission_listing_and_student_assignments() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    let s1 = create_user(&storage, "Alice", "a@example.com", UserRole::Student).await;
    let s2 = create_user(&storage, "Bob", "b@example.com", UserRole::Student).await;
    let class = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW1", None))
        .await
        .unwrap();

    storage
        .create_submission(assignment.id, s1.id, "a1".to_string(), vec![])
        .await
        .unwrap();
    storage
        .create_submission(assignment.id, s2.id, "b1".to_string(), vec![])
        .await
        .unwrap();

    let listed = storage
        .list_submissions_with_students(assignment.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    let mut names: Vec<&str> = listed.iter().map(|s| s.student_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Alice", "Bob"]);

    // 学生视角：只出现自己提交过的作业
    let for_s1 = storage
        .list_assignments_with_submission_by(s1.id)
        .await
        .unwrap();
    assert_eq!(for_s1.len(), 1);
    assert_eq!(for_s1[0].id, assignment.id);

    let s3 = create_user(&storage, "Carol", "c@example.com", UserRole::Student).await;
    let for_s3 = storage
        .list_assignments_with_submission_by(s3.id)
        .await
        .unwrap();
    assert!(for_s3.is_empty());
}

#[tokio::test]
async fn test_delete_assignment_cascades() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    let student = create_user(&storage, "S1", "s1@example.com", UserRole::Student).await;
    let class = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW1", None))
        .await
        .unwrap();

    storage
        .create_submission(
            assignment.id,
            student.id,
            "answer".to_string(),
            vec![Attachment {
                filename: "attachments-1-a.pdf".to_string(),
                original_name: "essay.pdf".to_string(),
                path: "uploads/assignments/attachments-1-a.pdf".to_string(),
                size: 1024,
            }],
        )
        .await
        .unwrap();

    let paths = storage
        .delete_assignment(assignment.id)
        .await
        .unwrap()
        .expect("assignment should exist");
    assert_eq!(paths, vec!["uploads/assignments/attachments-1-a.pdf"]);

    assert!(
        storage
            .get_assignment_by_id(assignment.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_submission(assignment.id, student.id)
            .await
            .unwrap()
            .is_none()
    );

    // 再删一次：已经不存在
    assert!(storage.delete_assignment(assignment.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_dashboard_counts() {
    let storage = setup().await;
    let teacher = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    create_user(&storage, "S1", "s1@example.com", UserRole::Student).await;
    let class = storage
        .create_class(
            teacher.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();

    // 一个截止在未来，一个已过期
    storage
        .create_assignment(teacher.id, assignment_request(class.id, "HW1", None))
        .await
        .unwrap();
    let mut past_due = assignment_request(class.id, "HW0", None);
    past_due.due_date = Utc::now() - Duration::days(1);
    storage.create_assignment(teacher.id, past_due).await.unwrap();

    assert_eq!(storage.count_classes().await.unwrap(), 1);
    assert_eq!(storage.count_assignments().await.unwrap(), 2);
    assert_eq!(
        storage
            .count_assignments_due_after(Utc::now().timestamp())
            .await
            .unwrap(),
        1
    );
    assert_eq!(storage.count_users().await.unwrap(), 2);
    assert_eq!(
        storage
            .count_users_with_role(&UserRole::Student)
            .await
            .unwrap(),
        1
    );
    assert_eq!(storage.count_active_users().await.unwrap(), 2);
}

#[tokio::test]
async fn test_class_ownership_lookup() {
    let storage = setup().await;
    let t1 = create_user(&storage, "T1", "t1@example.com", UserRole::Teacher).await;
    let t2 = create_user(&storage, "T2", "t2@example.com", UserRole::Teacher).await;
    let class = storage
        .create_class(
            t1.id,
            CreateClassRequest {
                name: "Math 101".to_string(),
                description: None,
                schedule: None,
            },
        )
        .await
        .unwrap();

    assert!(
        storage
            .get_class_owned_by(class.id, t1.id)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        storage
            .get_class_owned_by(class.id, t2.id)
            .await
            .unwrap()
            .is_none()
    );
}
