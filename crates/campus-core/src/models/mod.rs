//! Data models for Campus

mod academics;
mod calendar;
mod payload;
mod people;
mod preference;
mod record;
mod resource;

pub use academics::{NewClass, NewSubject};
pub use calendar::{NewHoliday, NewLeaveAllocation};
pub use payload::{validate_payload, ResourcePayload};
pub use people::{NewStudent, NewTeacher};
pub use preference::OrganizationPreference;
pub use record::{Page, Record};
pub use resource::ResourceKind;
