use crate::api::AuthApi;
use crate::model::{
    Address, AuthSession, Credentials, NewUser, PasswordChange, ProfileUpdate, User,
};
use store_framework::{ApiError, Slice, SliceClient, SliceStatus};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub status: SliceStatus,
}

impl AuthState {
    /// The user's saved address, if they have one with any field filled in.
    pub fn saved_address(&self) -> Option<&Address> {
        self.user.as_ref().and_then(User::saved_address)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOp {
    Login,
    Register,
    FetchMe,
    UpdateProfile,
    ChangePassword,
}

#[derive(Debug)]
pub enum AuthPayload {
    Session(AuthSession),
    User(User),
    Done,
}

impl From<AuthSession> for AuthPayload {
    fn from(session: AuthSession) -> Self {
        AuthPayload::Session(session)
    }
}

impl From<User> for AuthPayload {
    fn from(user: User) -> Self {
        AuthPayload::User(user)
    }
}

impl From<()> for AuthPayload {
    fn from(_: ()) -> Self {
        AuthPayload::Done
    }
}

impl Slice for AuthState {
    type Op = AuthOp;
    type Payload = AuthPayload;
    const NAME: &'static str = "auth";

    fn status(&self) -> &SliceStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut SliceStatus {
        &mut self.status
    }

    fn on_fulfilled(&mut self, _op: AuthOp, payload: AuthPayload) {
        match payload {
            AuthPayload::Session(session) => {
                self.token = Some(session.token);
                self.user = Some(session.user);
                self.is_authenticated = true;
            }
            AuthPayload::User(user) => {
                self.user = Some(user);
                self.is_authenticated = true;
            }
            AuthPayload::Done => {}
        }
    }
}

/// Session and profile operations.
///
/// Token storage is not this layer's concern: a successful login or registration hands
/// the token to the transport and records it in state, nothing more.
#[derive(Clone)]
pub struct Auth {
    api: AuthApi,
    client: SliceClient<AuthState>,
}

impl Auth {
    pub fn new(api: AuthApi, client: SliceClient<AuthState>) -> Self {
        Self { api, client }
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let session = self
            .client
            .track(AuthOp::Login, self.api.login(credentials))
            .await?;
        self.api.set_token(Some(session.token));
        info!(user_id = %session.user.id, "Logged in");
        Ok(session.user)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        let session = self
            .client
            .track(AuthOp::Register, self.api.register(user))
            .await?;
        self.api.set_token(Some(session.token));
        info!(user_id = %session.user.id, "Registered");
        Ok(session.user)
    }

    #[instrument(skip(self))]
    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        self.client.track(AuthOp::FetchMe, self.api.me()).await
    }

    /// Saves the profile, then refreshes the user from the server.
    #[instrument(skip(self, profile))]
    pub async fn update_profile(&self, profile: &ProfileUpdate) -> Result<User, ApiError> {
        self.client
            .track(AuthOp::UpdateProfile, self.api.update_profile(profile))
            .await?;
        self.fetch_me().await
    }

    /// Changes the password. A mismatched confirmation never reaches the server.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        if !change.confirmation_matches() {
            warn!("Password confirmation does not match");
            return Err(ApiError::Invalid("New passwords do not match".to_string()));
        }
        self.client
            .track(AuthOp::ChangePassword, self.api.change_password(change))
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api.set_token(None);
        self.client.apply(|state| *state = AuthState::default()).await?;
        info!("Logged out");
        Ok(())
    }

    pub async fn clear_error(&self) -> Result<(), ApiError> {
        self.client.clear_error().await
    }

    pub async fn snapshot(&self) -> Result<AuthState, ApiError> {
        self.client.snapshot().await
    }
}
