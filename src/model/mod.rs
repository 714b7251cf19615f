pub mod ids;
pub mod user;
pub mod person;
pub mod family;
pub mod parcialidad;
pub mod meeting;
pub mod attendance;
pub mod publication;
pub mod page;

// Re-exports for convenience
pub use ids::Id;
pub use user::{Role, SystemUser, SystemUserForm};
pub use person::{Person, PersonForm};
pub use family::{Family, FamilyForm};
pub use parcialidad::{Parcialidad, ParcialidadForm};
pub use meeting::{Meeting, MeetingAction, MeetingStatus, NewMeeting};
pub use attendance::{Attendee, IssuedCode, SelfRegistration};
pub use publication::{Photo, Publication, PublicationForm};
pub use page::{ListQuery, Page};
