//! Domain definitions.

pub mod profile;
pub mod session;

pub use self::{profile::Profile, session::Session};
