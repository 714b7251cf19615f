pub mod auth_ops;
pub mod meeting_ops;
pub mod attendance_ops;
pub mod person_ops;
pub mod family_ops;
pub mod parcialidad_ops;
pub mod publication_ops;
pub mod user_ops;
pub mod report_ops;
