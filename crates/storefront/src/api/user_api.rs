use crate::api::{decode, decode_entity, ResourceApi};
use crate::model::{NewUser, Role, User, UserId, UserPage, UserQuery};
use serde_json::json;
use std::sync::Arc;
use store_framework::{path_segment, ApiError, ApiRequest, Transport};
use tracing::{debug, instrument};

/// Admin user management.
#[derive(Clone)]
pub struct UserApi {
    transport: Arc<dyn Transport>,
}

impl UserApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &UserQuery) -> Result<UserPage, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::get("/users").with_query(query.to_query());
        decode(self.transport.send(request).await?)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_admin(&self, user: &NewUser) -> Result<User, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::post("/users/create-admin").with_json(user)?;
        decode_entity(self.transport.send(request).await?, "user")
    }

    #[instrument(skip(self))]
    pub async fn update_role(&self, id: &UserId, role: Role) -> Result<User, ApiError> {
        debug!("Sending request");
        let path = format!("/users/{}/role", path_segment(id.as_str()));
        let request = ApiRequest::put(path).with_body(json!({ "role": role }));
        decode_entity(self.transport.send(request).await?, "user")
    }
}

impl ResourceApi for UserApi {
    type Entity = User;
    type Id = UserId;
    const COLLECTION: &'static str = "/users";
    const ENTITY_KEY: &'static str = "user";

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}
