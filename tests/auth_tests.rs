mod test_user;
mod test_utils;

use async_trait::async_trait;
use club_backend::{
    auth::{
        jwt::JwtService,
        password::{hash_password, verify_password},
    },
    entities::{
        token::TokenType,
        user::{LoginUser, NewAdmin, Role, User, UserInsert},
    },
    errors::{AppError, AuthError},
    repositories::{token::TokenServiceRepository, user::UserRepository},
    use_cases::auth::AuthHandler,
};
use mockall::mock;
use test_user::*;
use test_utils::test_config;
use uuid::Uuid;

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
        async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
        async fn upsert_user(&self, user: &UserInsert) -> Result<Uuid, AppError>;
    }
}

fn jwt() -> JwtService {
    JwtService::new(&test_config())
}

#[test]
fn access_token_round_trips_role() {
    let service = jwt();
    let admin = admin_user();

    let token = service.create_jwt(&admin).unwrap();
    let claims = service.decode_jwt(&token).unwrap().claims;

    assert_eq!(claims.sub, admin.id.to_string());
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.token_type, TokenType::Access);
    assert!(claims.is_admin());
}

#[test]
fn refresh_token_is_not_an_access_token() {
    let service = jwt();
    let user = member_user();

    let refresh = service.create_refresh_jwt(&user.id).unwrap();

    assert!(service.decode_jwt(&refresh).is_err());
    assert_eq!(service.decode_refresh_jwt(&refresh).unwrap().claims.sub, user.id.to_string());
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let mut other = test_config();
    other.jwt_secret = "a_completely_different_secret_of_sufficient_length_0987".into();
    let foreign = JwtService::new(&other).create_jwt(&admin_user()).unwrap();

    assert!(matches!(jwt().decode_jwt(&foreign), Err(AuthError::InvalidToken)));
}

#[test]
fn password_hash_verifies() {
    let hash = hash_password("boardroom-skyline-77").unwrap();

    assert!(verify_password("boardroom-skyline-77", &hash).unwrap());
    assert!(!verify_password("wrong-password", &hash).unwrap());
    assert!(verify_password("x", "not-a-phc-string").is_err());
}

#[tokio::test]
async fn login_issues_tokens_for_valid_credentials() {
    let stored = admin_user();
    let returned = stored.clone();

    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_email()
        .withf(|email: &str| email == "admin@club.example")
        .times(1)
        .returning(move |_| Ok(Some(returned.clone())));

    let handler = AuthHandler::new(repo, jwt());
    let response = handler
        .login(LoginUser {
            email: "Admin@Club.example".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.token_type, "Bearer");
    let claims = handler.token_service.decode_jwt(&response.access_token).unwrap().claims;
    assert_eq!(claims.email, stored.email);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user() {
    let stored = member_user();

    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_email()
        .returning(move |email| {
            if email == "member@club.example" {
                Ok(Some(stored.clone()))
            } else {
                Ok(None)
            }
        });

    let handler = AuthHandler::new(repo, jwt());

    let wrong_password = handler
        .login(LoginUser {
            email: "member@club.example".into(),
            password: "not-the-password".into(),
        })
        .await;
    assert!(matches!(wrong_password, Err(AuthError::WrongCredentials)));

    let unknown = handler
        .login(LoginUser {
            email: "ghost@club.example".into(),
            password: ADMIN_PASSWORD.into(),
        })
        .await;
    assert!(matches!(unknown, Err(AuthError::WrongCredentials)));
}

#[tokio::test]
async fn refresh_reissues_tokens_with_current_role() {
    let user = TestUser::new("promoted@club.example").admin().to_user();
    let user_id = user.id;

    let mut repo = MockUserRepo::new();
    repo.expect_get_user_by_id()
        .withf(move |id: &Uuid| *id == user_id)
        .returning(move |_| Ok(Some(user.clone())));

    let handler = AuthHandler::new(repo, jwt());
    let refresh = handler.token_service.create_refresh_jwt(&user_id).unwrap();

    let response = handler.refresh_token(&refresh).await.unwrap();
    let claims = handler.token_service.decode_jwt(&response.access_token).unwrap().claims;

    assert_eq!(claims.role, Role::Admin);
}

#[tokio::test]
async fn ensure_admin_rejects_weak_password() {
    let mut repo = MockUserRepo::new();
    repo.expect_upsert_user().never();

    let handler = AuthHandler::new(repo, jwt());
    let result = handler
        .ensure_admin(NewAdmin {
            email: "admin@club.example".into(),
            password: "password".into(),
        })
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn ensure_admin_upserts_normalised_admin() {
    let id = Uuid::new_v4();

    let mut repo = MockUserRepo::new();
    repo.expect_upsert_user()
        .withf(|user: &UserInsert| {
            user.email == "chair@club.example" && user.role == Role::Admin && user.password_hash.starts_with("$argon2id$")
        })
        .times(1)
        .returning(move |_| Ok(id));

    let handler = AuthHandler::new(repo, jwt());
    let created = handler
        .ensure_admin(NewAdmin {
            email: "Chair@Club.example".into(),
            password: "tenement-rooftop-garden-91".into(),
        })
        .await
        .unwrap();

    assert_eq!(created, id);
}
