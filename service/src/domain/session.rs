//! [`Session`] definitions.

use crate::domain::profile;
#[cfg(doc)]
use crate::domain::Profile;

/// Authenticated requester identity.
///
/// Issued by the external identity layer: this service never performs the
/// authentication handshake itself and trusts the provided values for its
/// authorization checks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Session {
    /// ID of the [`Profile`] this [`Session`] belongs to.
    pub profile_id: profile::Id,

    /// [`profile::Role`] of the [`Profile`] this [`Session`] belongs to.
    pub role: profile::Role,
}

impl Session {
    /// Indicates whether this [`Session`] belongs to a
    /// [`profile::Role::SuperAdmin`].
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == profile::Role::SuperAdmin
    }
}
