use crate::dto::user_dto::ChangePasswordRequest;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::services::user_service::UserService;
use crate::utils::crypto::verify_password;
use crate::utils::token::{decode_token, issue_token};

const INVALID_CREDENTIALS: &str = "invalid_credentials";

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(users: UserService, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            users,
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// Checks credentials and issues a bearer token. Unknown email and wrong
    /// password fail identically.
    pub fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        let Some(user) = self.users.find_by_email(email)? else {
            tracing::warn!("login attempt for unknown email");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "login attempt with wrong password");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = issue_token(&user, &self.jwt_secret, self.token_ttl_hours)?;
        tracing::info!(
            user_id = user.id,
            password_change_required = user.password_change_required,
            "user logged in"
        );
        Ok((token, user))
    }

    /// Resolves a bearer token to the stored user. Tokens of deleted users no
    /// longer resolve.
    pub fn resolve(&self, token: &str) -> Result<User> {
        let claims = decode_token(token, &self.jwt_secret)?;
        let user_id = claims.user_id()?;
        self.users.get(user_id).map_err(|err| match err {
            Error::NotFound(_) => Error::Unauthorized("invalid_token".into()),
            other => other,
        })
    }

    pub fn change_password(&self, user: &User, request: &ChangePasswordRequest) -> Result<User> {
        // Re-read so a concurrent rotation is checked against the fresh hash.
        let stored = self.users.get(user.id)?;
        if !verify_password(&request.current_password, &stored.password_hash)? {
            return Err(Error::Unauthorized("Current password is incorrect".into()));
        }
        if request.current_password == request.new_password {
            return Err(Error::BadRequest(
                "New password must differ from the current password".into(),
            ));
        }

        let updated = self.users.set_password(user.id, &request.new_password)?;
        tracing::info!(user_id = updated.id, "password changed");
        Ok(updated)
    }
}
