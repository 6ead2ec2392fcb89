pub use super::assignments::Entity as Assignments;
pub use super::attachments::Entity as Attachments;
pub use super::class_students::Entity as ClassStudents;
pub use super::classes::Entity as Classes;
pub use super::submissions::Entity as Submissions;
pub use super::users::Entity as Users;
