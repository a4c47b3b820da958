//! [`Profile`] definitions.

use std::{str, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Platform user profile.
///
/// Created by the external signup flow and never deleted here. The only field
/// this service mutates is the [`Role`].
#[derive(Clone, Debug, Eq, From, PartialEq)]
pub struct Profile {
    /// ID of this [`Profile`].
    pub id: Id,

    /// First [`Name`] of this [`Profile`]'s owner.
    pub first_name: Name,

    /// Last [`Name`] of this [`Profile`]'s owner.
    pub last_name: Name,

    /// [`Email`] of this [`Profile`]'s owner.
    pub email: Email,

    /// [`Role`] of this [`Profile`].
    pub role: Role,

    /// [`DateTime`] when this [`Profile`] was created.
    ///
    /// Monotonically assigned at creation, but not necessarily unique across
    /// [`Profile`]s, so any ordering over it must tie-break by [`Id`].
    pub created_at: CreationDateTime,
}

/// ID of a [`Profile`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name (first or last) of a [`Profile`]'s owner.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl str::FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address of a [`Profile`]'s owner.
///
/// Display-only: this service never sends to or authenticates against it.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl str::FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Access level of a [`Profile`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Regular user without administrative access.
    #[default]
    User,

    /// Administrator allowed to browse the profile directory.
    Admin,

    /// Administrator additionally allowed to change other [`Profile`]s'
    /// [`Role`]s.
    SuperAdmin,
}

impl Role {
    /// Returns the canonical string representation of this [`Role`].
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[cfg(feature = "postgres")]
impl<'a> FromSql<'a> for Role {
    accepts!(VARCHAR, TEXT);

    fn from_sql(
        ty: &Type,
        raw: &'a [u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        let repr = <&str as FromSql<'_>>::from_sql(ty, raw)?;
        repr.parse()
            .map_err(|_| format!("invalid `Role` value: {repr}").into())
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Role {
    accepts!(VARCHAR, TEXT);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        self.as_str().to_sql(ty, w)
    }
}

/// Change of a single [`Profile`]'s [`Role`].
///
/// Point update keyed by [`Id`]: no other [`Profile`] field is touched.
#[derive(Clone, Copy, Debug)]
pub struct RoleChange {
    /// ID of the [`Profile`] to change.
    pub profile_id: Id,

    /// [`Role`] to assign.
    pub role: Role,
}

/// [`DateTime`] when a [`Profile`] was created.
pub type CreationDateTime = DateTimeOf<(Profile, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Email, Name, Role};

    #[test]
    fn role_parses_canonical_representations() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("super_admin".parse::<Role>().unwrap(), Role::SuperAdmin);

        assert_eq!(Role::SuperAdmin.as_str(), "super_admin");
    }

    #[test]
    fn role_rejects_unknown_representations() {
        assert!("root".parse::<Role>().is_err());
        assert!("SUPER_ADMIN".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn name_rejects_padded_or_empty() {
        assert!(Name::new("Ada").is_some());
        assert!(Name::new(" Ada").is_none());
        assert!(Name::new("").is_none());
    }

    #[test]
    fn email_requires_address_shape() {
        assert!(Email::new("ada@example.com").is_some());
        assert!(Email::new("ada@example").is_none());
        assert!(Email::new("not-an-email").is_none());
    }
}
