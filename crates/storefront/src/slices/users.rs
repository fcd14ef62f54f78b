use crate::api::{ResourceApi, UserApi};
use crate::model::{NewUser, Pagination, Role, User, UserId, UserPage, UserQuery};
use store_framework::{ApiError, Slice, SliceClient, SliceStatus};
use tracing::{info, instrument};

/// The admin user listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub pagination: Option<Pagination>,
    pub status: SliceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserOp {
    Fetch(UserQuery),
    CreateAdmin,
    UpdateRole { id: UserId, role: Role },
    Delete(UserId),
}

#[derive(Debug)]
pub enum UsersPayload {
    Page(UserPage),
    One(User),
    Done,
}

impl From<UserPage> for UsersPayload {
    fn from(page: UserPage) -> Self {
        UsersPayload::Page(page)
    }
}

impl From<User> for UsersPayload {
    fn from(user: User) -> Self {
        UsersPayload::One(user)
    }
}

impl From<()> for UsersPayload {
    fn from(_: ()) -> Self {
        UsersPayload::Done
    }
}

impl Slice for UsersState {
    type Op = UserOp;
    type Payload = UsersPayload;
    const NAME: &'static str = "users";

    fn status(&self) -> &SliceStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut SliceStatus {
        &mut self.status
    }

    fn on_fulfilled(&mut self, op: UserOp, payload: UsersPayload) {
        match (op, payload) {
            (_, UsersPayload::Page(page)) => {
                self.users = page.users;
                self.pagination = page.pagination;
            }
            (UserOp::CreateAdmin, UsersPayload::One(user)) => self.users.insert(0, user),
            (_, UsersPayload::One(user)) => {
                if let Some(existing) = self.users.iter_mut().find(|u| u.id == user.id) {
                    *existing = user;
                }
            }
            (UserOp::Delete(id), UsersPayload::Done) => self.users.retain(|u| u.id != id),
            (_, UsersPayload::Done) => {}
        }
    }
}

/// Admin user management.
#[derive(Clone)]
pub struct Users {
    api: UserApi,
    client: SliceClient<UsersState>,
}

impl Users {
    pub fn new(api: UserApi, client: SliceClient<UsersState>) -> Self {
        Self { api, client }
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, query: UserQuery) -> Result<UserPage, ApiError> {
        self.client
            .track(UserOp::Fetch(query.clone()), self.api.list(&query))
            .await
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_admin(&self, user: &NewUser) -> Result<User, ApiError> {
        let created = self
            .client
            .track(UserOp::CreateAdmin, self.api.create_admin(user))
            .await?;
        info!(user_id = %created.id, "Admin created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_role(&self, id: &UserId, role: Role) -> Result<User, ApiError> {
        let op = UserOp::UpdateRole {
            id: id.clone(),
            role,
        };
        self.client.track(op, self.api.update_role(id, role)).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        self.client
            .track(UserOp::Delete(id.clone()), self.api.delete(id))
            .await
    }

    pub async fn clear_error(&self) -> Result<(), ApiError> {
        self.client.clear_error().await
    }

    pub async fn snapshot(&self) -> Result<UsersState, ApiError> {
        self.client.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use store_framework::mock::MockTransport;
    use store_framework::{Method, SliceActor, StaleResponsePolicy};

    fn users(mock: &MockTransport) -> Users {
        let (actor, client) = SliceActor::<UsersState>::new(8, StaleResponsePolicy::Apply);
        tokio::spawn(actor.run());
        Users::new(UserApi::new(Arc::new(mock.clone())), client)
    }

    fn user(id: &str, role: &str) -> serde_json::Value {
        json!({"_id": id, "name": id, "email": format!("{id}@shop.pk"), "role": role})
    }

    #[tokio::test]
    async fn test_admin_user_management() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/users").return_ok(json!({
            "success": true,
            "message": "ok",
            "data": {
                "users": [user("u1", "user"), user("u2", "user")],
                "pagination": {"page": 1, "limit": 50, "total": 2, "totalPages": 1}
            }
        }));
        mock.expect(Method::Post, "/users/create-admin").return_ok(json!({
            "success": true,
            "message": "Admin created",
            "data": {"user": user("u3", "admin")}
        }));
        mock.expect(Method::Put, "/users/u1/role")
            .return_ok(json!({"success": true, "data": {"user": user("u1", "admin")}}));
        mock.expect(Method::Delete, "/users/u2")
            .return_ok(json!({"success": true, "message": "User deleted"}));

        let users = users(&mock);
        users.fetch(UserQuery::default()).await.unwrap();
        users
            .create_admin(&NewUser {
                name: "u3".into(),
                email: "u3@shop.pk".into(),
                password: "secret1".into(),
                phone: None,
            })
            .await
            .unwrap();
        users.update_role(&"u1".into(), Role::Admin).await.unwrap();
        users.delete(&"u2".into()).await.unwrap();

        let state = users.snapshot().await.unwrap();
        let ids: Vec<&str> = state.users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u3", "u1"]);
        assert!(state.users.iter().all(User::is_admin));
        assert_eq!(state.pagination.unwrap().total, 2);

        let list_request = &mock.calls()[0];
        assert_eq!(list_request.query_param("limit"), Some("50"));
        assert_eq!(list_request.query_param("role"), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_rejected_role_change_keeps_listing() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/users")
            .return_ok(json!({"users": [user("u1", "admin")], "pagination": null}));
        mock.expect(Method::Put, "/users/u1/role").return_err(ApiError::Rejected {
            status: 400,
            message: "You cannot change your own role".into(),
        });

        let users = users(&mock);
        users.fetch(UserQuery::default()).await.unwrap();
        assert!(users.update_role(&"u1".into(), Role::User).await.is_err());

        let state = users.snapshot().await.unwrap();
        assert!(state.users[0].is_admin());
        assert!(state.status.error.is_some());
    }
}
