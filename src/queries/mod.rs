pub mod meeting_queries;
pub mod person_queries;
