//! [`Profile`]-related [`Database`] implementations.

use common::operations::{By, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{profile, Profile},
    infra::{
        database::{
            self,
            postgres::{Connection, ContainsPattern},
            Postgres,
        },
        Database,
    },
    read::profile::list,
};

/// Decodes a [`Profile`] out of the provided [`Row`].
fn decode(row: &Row) -> Profile {
    Profile {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        role: row.get("role"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Profile>, profile::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Profile>, profile::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, first_name, last_name, \
                   email, role, created_at \
            FROM profiles \
            WHERE id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(decode))
    }
}

impl<C> Database<Select<By<list::Page, list::Selector>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector { arguments, filter } = by.into_inner();

        // One row more than the page limit, to detect a following page.
        let limit = i32::try_from(arguments.first).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.after.as_ref().map(|c| {
            ps.push(&c.created_at);
            ps.push(&c.id);
            (ps.len() - 1, ps.len())
        });

        let pattern = filter
            .search
            .as_ref()
            .map(|s| ContainsPattern::new(AsRef::<str>::as_ref(s)));
        let pattern_idx = pattern.as_ref().map(|p| {
            ps.push(p);
            ps.len()
        });

        let sql = format!(
            "SELECT id, first_name, last_name, \
                    email, role, created_at \
             FROM profiles \
             WHERE true \
                   {cursor} \
                   {search} \
             ORDER BY created_at ASC, id ASC \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |(ts, id), f| {
                f(&format_args!(
                    "AND (created_at, id) > \
                         (${ts}::TIMESTAMPTZ, ${id}::UUID)",
                ))
            }),
            search = pattern_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND (first_name ILIKE ${idx}::VARCHAR \
                          OR last_name ILIKE ${idx}::VARCHAR \
                          OR email ILIKE ${idx}::VARCHAR)",
                ))
            }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_next_page = rows.len() > arguments.first;
        let edges = rows
            .into_iter()
            .take(arguments.first)
            .map(|row| {
                let profile = decode(&row);
                (list::Cursor::from(&profile), profile)
            })
            .collect::<Vec<_>>();

        Ok(list::Page::new(edges, has_next_page))
    }
}

impl<C> Database<Update<profile::RoleChange>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(change): Update<profile::RoleChange>,
    ) -> Result<Self::Ok, Self::Err> {
        let profile::RoleChange { profile_id, role } = change;

        const SQL: &str = "\
            UPDATE profiles \
            SET role = $2::VARCHAR \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&profile_id, &role])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Profile, profile::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Profile, profile::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: profile::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM profiles \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
