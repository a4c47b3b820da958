//! [`Command`] for updating a [`Profile`]'s [`Role`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{profile, profile::Role, Profile, Session},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Profile`]'s [`Role`].
///
/// Authorization invariant: only a [`Role::SuperAdmin`] requester may change
/// another [`Profile`]'s [`Role`], and never their own. Violations fail
/// before any store interaction happens.
#[derive(Clone, Copy, Debug)]
pub struct UpdateProfileRole {
    /// [`Session`] of the requester.
    pub session: Session,

    /// ID of the [`Profile`] which [`Role`] should be updated.
    pub profile_id: profile::Id,

    /// New [`Role`] of the [`Profile`].
    pub role: Role,
}

impl<Db> Command<UpdateProfileRole> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Profile>, profile::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Profile, profile::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Update<profile::RoleChange>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProfileRole,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProfileRole {
            session,
            profile_id,
            role,
        } = cmd;

        if !session.is_super_admin() {
            return Err(tracerr::new!(E::NotSuperAdmin));
        }
        if session.profile_id == profile_id {
            return Err(tracerr::new!(E::OwnRole));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Profile`.
        tx.execute(Lock(By::new(profile_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut profile = tx
            .execute(Select(By::<Option<Profile>, _>::new(profile_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProfileNotExists(profile_id))
            .map_err(tracerr::wrap!())?;
        if profile.role == role {
            return Ok(profile);
        }

        profile.role = role;
        tx.execute(Update(profile::RoleChange { profile_id, role }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(profile)
    }
}

/// Error of [`UpdateProfileRole`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Requester is not a [`Role::SuperAdmin`].
    #[display("requester is not a `super_admin`")]
    #[from(ignore)]
    NotSuperAdmin,

    /// Requester tried to change their own [`Role`].
    #[display("requester may not change their own `Role`")]
    #[from(ignore)]
    OwnRole,

    /// [`Profile`] doesn't exist.
    #[display("`Profile(id: {_0})` does not exist")]
    #[from(ignore)]
    ProfileNotExists(#[error(not(source))] profile::Id),
}

impl ExecutionError {
    /// Indicates whether this [`ExecutionError`] is an authorization denial.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::NotSuperAdmin | Self::OwnRole)
    }
}
