use crate::api::{decode, decode_entity};
use crate::model::{AuthSession, Credentials, NewUser, PasswordChange, ProfileUpdate, User};
use std::sync::Arc;
use store_framework::{ApiError, ApiRequest, Transport};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct AuthApi {
    transport: Arc<dyn Transport>,
}

impl AuthApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::post("/auth/login").with_json(credentials)?;
        decode(self.transport.send(request).await?)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: &NewUser) -> Result<AuthSession, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::post("/auth/register").with_json(user)?;
        decode(self.transport.send(request).await?)
    }

    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        debug!("Sending request");
        decode_entity(self.transport.send(ApiRequest::get("/auth/me")).await?, "user")
    }

    #[instrument(skip(self, profile))]
    pub async fn update_profile(&self, profile: &ProfileUpdate) -> Result<(), ApiError> {
        debug!("Sending request");
        let request = ApiRequest::put("/auth/update-profile").with_json(profile)?;
        self.transport.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        debug!("Sending request");
        let request = ApiRequest::put("/auth/change-password").with_json(change)?;
        self.transport.send(request).await?;
        Ok(())
    }

    /// Replaces the bearer token on the shared transport.
    pub fn set_token(&self, token: Option<String>) {
        self.transport.set_token(token);
    }
}
