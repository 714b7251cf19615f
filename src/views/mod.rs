pub mod attendance_registry;
pub mod meeting_view;
pub mod navigation;
pub mod notice;

pub use attendance_registry::AttendanceRegistry;
pub use meeting_view::MeetingView;
pub use navigation::Section;
pub use notice::Notice;
