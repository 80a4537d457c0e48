use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use inkpost_auth::{Role, create_access_token};
use inkpost_config::JwtConfig;
use inkpost_core::{AppError, hash_password, verify_password};
use inkpost_models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};

use crate::metrics;

const USER_COLUMNS: &str = "id, username, fullname, email, password, provider, social_id, avatar, \
                            is_admin, created_at, updated_at";

pub struct AuthService;

impl AuthService {
    /// Creates a local account with the given role.
    #[instrument(skip(db, dto), fields(user.email = %dto.email, user.role = %role, db.operation = "INSERT", db.table = "users"))]
    pub async fn create_user(
        db: &PgPool,
        dto: &RegisterRequest,
        role: Role,
    ) -> Result<User, AppError> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            warn!("Attempted to register an existing email");
            return Err(AppError::conflict(anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, fullname, email, password, is_admin)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&dto.fullname)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(role.is_admin())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow!("Email already exists"));
            }
            AppError::from(e)
        })?;

        info!(user.id = %user.id, "User created");

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<RegisterResponse, AppError> {
        let user = Self::create_user(db, &dto, Role::Member).await?;
        let token = create_access_token(user.id, user.role(), jwt_config)?;

        metrics::track_user_registered();

        Ok(RegisterResponse { user, token })
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let invalid = || AppError::unauthorized(anyhow!("Invalid email or password"));

        let Some(user) = Self::find_by_email(db, &dto.email).await? else {
            metrics::track_user_login_failure("unknown_email");
            return Err(invalid());
        };

        // accounts created through a social provider have no password
        let Some(hash) = user.password.as_deref() else {
            metrics::track_user_login_failure("no_password");
            return Err(invalid());
        };

        if !verify_password(&dto.password, hash)? {
            metrics::track_user_login_failure("bad_password");
            return Err(invalid());
        }

        let token = create_access_token(user.id, user.role(), jwt_config)?;

        debug!(user.id = %user.id, "Login succeeded");
        metrics::track_user_login_success(user.role().as_str());

        Ok(LoginResponse {
            email: user.email,
            token,
            message: "Login successful".to_string(),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_by_id(db: &PgPool, user_id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(db)
                .await?;

        Ok(user)
    }

    /// Changes a user's role. Roles are not assignable through the HTTP API.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn set_role(db: &PgPool, email: &str, role: Role) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_admin = $1, updated_at = NOW()
             WHERE email = $2
             RETURNING {USER_COLUMNS}"
        ))
        .bind(role.is_admin())
        .bind(email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }
}
