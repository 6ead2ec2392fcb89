pub mod assignments;
pub mod auth;
pub mod classes;
pub mod dashboard;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
