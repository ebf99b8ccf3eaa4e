//! Profile and external identity entities.

pub mod identity;
pub mod model;

pub use identity::AuthIdentity;
pub use model::{Profile, UpdateProfile};
