pub mod session_service;
pub mod student_service;
pub mod user_service;

pub use session_service::SessionService;
pub use student_service::StudentService;
pub use user_service::UserService;
