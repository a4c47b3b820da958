//! [`Command`] definition.

pub mod update_profile_role;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::update_profile_role::UpdateProfileRole;
