//! User repository backed by PostgreSQL.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, QueryFilter, QuerySelect, Set, Statement,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every store failure is classified: structured store errors become
/// `AppError::Store`, anything else `AppError::Unknown`. Keyed lookups
/// and zero-row mutations surface `AppError::NotFound`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with the generated id.
    async fn create(&self, email: String, credential: Vec<u8>) -> AppResult<User>;

    /// Every stored user, id and email only.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find user by id.
    async fn find_one(&self, id: &str) -> AppResult<User>;

    /// Find user by email address.
    async fn find_by_email(&self, email: &str) -> AppResult<User>;

    /// Persist the full desired state for `user.id`.
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Delete user by id.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserRepository on PostgreSQL.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Row shape for queries: the credential column is never read back.
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id.to_string(),
            email: row.email,
            credential: Vec::new(),
        }
    }
}

/// Classify a database error and log it with the failing operation.
fn classify(op: &'static str, err: DbErr) -> AppError {
    let err = AppError::from(err);
    tracing::error!(error = %err, "{} failed", op);
    err
}

/// An id that is not a valid uuid cannot match any row.
fn parse_user_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, email: String, credential: Vec<u8>) -> AppResult<User> {
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password: Set(credential),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|err| classify("user creation", err))?;

        tracing::info!(id = %model.id, "user created");

        Ok(User::from(model))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows = self
            .db
            .query_all(Statement::from_string(
                DbBackend::Postgres,
                "SELECT id, email FROM users".to_string(),
            ))
            .await
            .map_err(|err| classify("listing users", err))?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            match UserRow::from_query_result(&row, "") {
                Ok(found) => users.push(User::from(found)),
                // A row that fails to map is skipped rather than failing
                // the whole read.
                Err(err) => tracing::error!(error = %err, "user row mapping failed"),
            }
        }

        Ok(users)
    }

    async fn find_one(&self, id: &str) -> AppResult<User> {
        let id = parse_user_id(id)?;

        UserEntity::find_by_id(id)
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Email)
            .into_model::<UserRow>()
            .one(&self.db)
            .await
            .map_err(|err| classify("user lookup by id", err))?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        UserEntity::find()
            .select_only()
            .column(user::Column::Id)
            .column(user::Column::Email)
            .filter(user::Column::Email.eq(email))
            .into_model::<UserRow>()
            .one(&self.db)
            .await
            .map_err(|err| classify("user lookup by email", err))?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let id = parse_user_id(&user.id)?;

        // An empty credential means "do not change": update the email only.
        let mut query = UserEntity::update_many()
            .col_expr(user::Column::Email, Expr::value(user.email.clone()));
        if !user.credential.is_empty() {
            query = query.col_expr(user::Column::Password, Expr::value(user.credential.clone()));
        }

        let result = query
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|err| classify("user update", err))?;

        tracing::info!(rows = result.rows_affected, "updated");

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let id = parse_user_id(id)?;

        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|err| classify("user deletion", err))?;

        tracing::info!(rows = result.rows_affected, "removed");

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_treated_as_not_found() {
        assert_eq!(parse_user_id("2").unwrap_err(), AppError::NotFound);
        assert_eq!(parse_user_id("").unwrap_err(), AppError::NotFound);
    }

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);
    }
}
