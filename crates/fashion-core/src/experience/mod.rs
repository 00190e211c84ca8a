//! AR try-on, VR showroom and avatar studio domain.

mod model;
mod store;

pub use model::{ArState, ArUpdate, AvatarState, AvatarUpdate, CapturedImage, VrState, VrUpdate};
pub use store::{ExperienceAction, ExperienceDomain, ExperienceState, ExperienceStore};
