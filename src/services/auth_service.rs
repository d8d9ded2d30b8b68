use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use std::sync::LazyLock;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]{1,150}$").expect("valid username regex"));

const LOGIN_FAILED: &str = "Login failed, please check your credentials.";
const EMAIL_TAKEN: &str = "An account with this email already exists.";
const USERNAME_TAKEN: &str = "A user with that username already exists.";

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let username = request.username.trim().to_string();
        validate_username(&username)?;

        let email = normalize_email(request.email.as_deref());
        if let Some(email) = &email
            && !email.contains('@')
        {
            return Err(AppError::ValidationError(
                "Enter a valid email address.".to_string(),
            ));
        }

        validate_new_password(&username, &request.password1, &request.password2)?;

        if self.find_by_username(&username).await?.is_some() {
            return Err(AppError::ValidationError(USERNAME_TAKEN.to_string()));
        }
        if let Some(email) = &email
            && self.find_by_email(email).await?.is_some()
        {
            return Err(AppError::ValidationError(EMAIL_TAKEN.to_string()));
        }

        let password_hash = hash_password(&request.password1)?;
        let now = Utc::now();
        let user = users::ActiveModel {
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            is_staff: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        log::info!("User {} registered", user.id);
        self.issue_tokens(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let identifier = request.username.trim();
        if identifier.is_empty() || request.password.is_empty() {
            return Err(AppError::AuthError(LOGIN_FAILED.to_string()));
        }

        let user = match self.find_by_username(identifier).await? {
            Some(user) => Some(user),
            None => match normalize_email(Some(identifier)) {
                Some(email) => self.find_by_email(&email).await?,
                None => None,
            },
        };

        let user = user.ok_or_else(|| AppError::AuthError(LOGIN_FAILED.to_string()))?;
        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError(LOGIN_FAILED.to_string()));
        }

        self.issue_tokens(user)
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let user_id: i64 = claims.sub.parse().map_err(|_| AppError::auth_required())?;

        let user = self.get_user_by_id(user_id).await?;
        let access_token = self
            .jwt_service
            .generate_access_token(user.id, &user.username)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token: refresh_token.to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> AppResult<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(AppError::auth_required)
    }

    /// 管理接口权限检查
    pub async fn require_staff(&self, user_id: i64) -> AppResult<users::Model> {
        let user = self.get_user_by_id(user_id).await?;
        if !user.is_staff {
            return Err(AppError::Forbidden);
        }
        Ok(user)
    }

    fn issue_tokens(&self, user: users::Model) -> AppResult<AuthResponse> {
        let access_token = self
            .jwt_service
            .generate_access_token(user.id, &user.username)?;
        let refresh_token = self
            .jwt_service
            .generate_refresh_token(user.id, &user.username)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.pool)
            .await?)
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    if !USERNAME_RE.is_match(username) {
        return Err(AppError::ValidationError(
            "Enter a valid username. It may contain only letters, numbers, and @/./+/-/_ characters."
                .to_string(),
        ));
    }
    Ok(())
}

/// 去空格转小写，空串视为未填写
fn normalize_email(email: Option<&str>) -> Option<String> {
    email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

/// 并发注册绕过了前置检查时，由数据库唯一索引兜底
fn map_unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            if detail.contains("email") {
                AppError::Conflict(EMAIL_TAKEN.to_string())
            } else {
                AppError::Conflict(USERNAME_TAKEN.to_string())
            }
        }
        _ => AppError::DatabaseError(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::{create_pool, run_migrations};

    async fn setup() -> AuthService {
        let pool = create_pool(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        run_migrations(&pool).await.unwrap();
        AuthService::new(pool, JwtService::new("test-secret", 3600, 7200))
    }

    fn register_request(username: &str, email: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.map(str::to_string),
            password1: "calm-breath-42".to_string(),
            password2: "calm-breath-42".to_string(),
        }
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("luna.moon+1@x-y_z").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email(Some("  Luna@Example.COM ")),
            Some("luna@example.com".to_string())
        );
        assert_eq!(normalize_email(Some("   ")), None);
        assert_eq!(normalize_email(None), None);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = setup().await;
        let registered = service
            .register(register_request("luna", Some("Luna@Example.com")))
            .await
            .unwrap();
        assert_eq!(registered.user.email.as_deref(), Some("luna@example.com"));
        assert!(!registered.user.is_staff);

        let claims = service
            .jwt_service
            .verify_access_token(&registered.access_token)
            .unwrap();
        assert_eq!(claims.sub, registered.user.id.to_string());

        let by_name = service
            .login(LoginRequest {
                username: "luna".into(),
                password: "calm-breath-42".into(),
            })
            .await
            .unwrap();
        assert_eq!(by_name.user.id, registered.user.id);

        let by_email = service
            .login(LoginRequest {
                username: "LUNA@example.com".into(),
                password: "calm-breath-42".into(),
            })
            .await
            .unwrap();
        assert_eq!(by_email.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let service = setup().await;
        service.register(register_request("luna", None)).await.unwrap();

        let err = service
            .login(LoginRequest {
                username: "luna".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(ref m) if m == LOGIN_FAILED));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let service = setup().await;
        service
            .register(register_request("luna", Some("luna@example.com")))
            .await
            .unwrap();

        let err = service
            .register(register_request("sol", Some(" LUNA@example.com")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref m) if m == EMAIL_TAKEN));

        let err = service
            .register(register_request("luna", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let service = setup().await;
        let mut req = register_request("luna", None);
        req.password2 = "something-else".into();
        assert!(matches!(
            service.register(req).await,
            Err(AppError::ValidationError(_))
        ));

        let mut req = register_request("luna", None);
        req.password1 = "12345678".into();
        req.password2 = "12345678".into();
        assert!(matches!(
            service.register(req).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let service = setup().await;
        let registered = service.register(register_request("luna", None)).await.unwrap();

        let refreshed = service.refresh_token(&registered.refresh_token).await.unwrap();
        assert_eq!(refreshed.user.id, registered.user.id);
        assert!(
            service
                .jwt_service
                .verify_access_token(&refreshed.access_token)
                .is_ok()
        );

        // 访问令牌不能当刷新令牌用
        assert!(service.refresh_token(&registered.access_token).await.is_err());
    }
}
