//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.
//!
//! Reads join `users` so each project carries its owner's login and role.
//! Uniqueness of key and name is enforced by the database; violations are
//! reported as [`ProjectRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{
    Login, Project, ProjectId, ProjectKey, ProjectName, ProjectOwner, Role, UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, map_pool_error};
use super::models::{NewProjectRow, ProjectOwnerRow, ProjectRow};
use super::pool::DbPool;
use super::schema::{projects, users};

/// Diesel-backed implementation of the [`ProjectRepository`] port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn duplicate_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("name") => "name",
        _ => "key",
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ProjectRepositoryError::connection(message),
        DieselFailure::Query(message) => ProjectRepositoryError::query(message),
        DieselFailure::UniqueViolation(constraint) => {
            ProjectRepositoryError::duplicate(duplicate_field(constraint.as_deref()))
        }
    }
}

fn row_to_project(
    (row, owner): (ProjectRow, ProjectOwnerRow),
) -> Result<Project, ProjectRepositoryError> {
    let invalid = |field: &str, err: &dyn std::fmt::Display| {
        warn!(project_id = %row.id, field, error = %err, "stored project row is invalid");
        ProjectRepositoryError::query(format!("stored project {field} is invalid"))
    };
    let key = ProjectKey::new(row.key.clone()).map_err(|err| invalid("key", &err))?;
    let name = ProjectName::new(row.name.clone()).map_err(|err| invalid("name", &err))?;
    let login = Login::new(owner.login).map_err(|err| invalid("owner login", &err))?;
    let role = owner
        .role
        .parse::<Role>()
        .map_err(|err| invalid("owner role", &err))?;
    Ok(Project {
        id: ProjectId::from_uuid(row.id),
        key,
        name,
        description: row.description,
        owner: ProjectOwner {
            id: UserId::from_uuid(owner.id),
            login,
            role,
        },
        created_at: row.created_at,
    })
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let rows = projects::table
            .inner_join(users::table)
            .select((ProjectRow::as_select(), ProjectOwnerRow::as_select()))
            .order(projects::key.asc())
            .load::<(ProjectRow, ProjectOwnerRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_project).collect()
    }

    async fn find_by_key(
        &self,
        key: &ProjectKey,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let row = projects::table
            .inner_join(users::table)
            .filter(projects::key.eq(key.as_ref()))
            .select((ProjectRow::as_select(), ProjectOwnerRow::as_select()))
            .first::<(ProjectRow, ProjectOwnerRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_project).transpose()
    }

    async fn find_by_name(
        &self,
        name: &ProjectName,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let row = projects::table
            .inner_join(users::table)
            .filter(projects::name.eq(name.as_ref()))
            .select((ProjectRow::as_select(), ProjectOwnerRow::as_select()))
            .first::<(ProjectRow, ProjectOwnerRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_project).transpose()
    }

    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProjectRepositoryError::connection))?;

        let row = NewProjectRow {
            id: *project.id.as_uuid(),
            key: project.key.as_ref(),
            name: project.name.as_ref(),
            description: project.description.as_deref(),
            owner_id: *project.owner.id.as_uuid(),
            created_at: project.created_at,
        };
        diesel::insert_into(projects::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn project_row(key: &str, name: &str) -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            key: key.to_owned(),
            name: name.to_owned(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn owner(login: &str, role: &str) -> ProjectOwnerRow {
        ProjectOwnerRow {
            id: Uuid::new_v4(),
            login: login.to_owned(),
            role: role.to_owned(),
        }
    }

    #[rstest]
    fn joined_rows_carry_owner_role() {
        let project = row_to_project((
            project_row("aitest_project", "aitest project"),
            owner("aitest", "ROLE_AITESTER"),
        ))
        .expect("valid row");
        assert_eq!(project.owner.role, Role::AiTester);
        assert_eq!(project.owner.login.as_ref(), "aitest");
    }

    #[rstest]
    #[case(project_row("bad key", "name"), owner("admin", "ROLE_ADMIN"), "stored project key is invalid")]
    #[case(project_row("key", " "), owner("admin", "ROLE_ADMIN"), "stored project name is invalid")]
    #[case(project_row("key", "name"), owner("admin", "ROLE_ROOT"), "stored project owner role is invalid")]
    fn invalid_rows_are_query_errors(
        #[case] project: ProjectRow,
        #[case] owner: ProjectOwnerRow,
        #[case] expected: &str,
    ) {
        let err = row_to_project((project, owner)).expect_err("invalid row");
        assert_eq!(err, ProjectRepositoryError::query(expected));
    }

    #[rstest]
    #[case(Some("projects_name_key"), "name")]
    #[case(Some("projects_key_key"), "key")]
    #[case(None, "key")]
    fn duplicate_constraints_name_the_field(
        #[case] constraint: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(duplicate_field(constraint), expected);
    }

    #[rstest]
    fn unique_violations_become_duplicates() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key value")),
        );
        assert_eq!(
            map_diesel_error(error),
            ProjectRepositoryError::duplicate("key")
        );
    }
}
