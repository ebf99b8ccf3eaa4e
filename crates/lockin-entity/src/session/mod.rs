//! Focus session domain entities.

pub mod model;
pub mod participant;
pub mod status;
pub mod time_log;

pub use model::Session;
pub use participant::{ParticipantRole, SessionParticipant};
pub use status::SessionStatus;
pub use time_log::TimeLog;
