//! Repositories for backend resources
//!
//! Each repository wraps one REST resource. Create and update calls validate
//! their payload first and never reach the network when validation fails.

use auth::models::{NewUser, UpdateUser, User};
use common::models::{Client, EntityId};
use tracing::info;

use crate::{
    client::ApiClient,
    error::ApiResult,
    models::{NewClient, Registration, UpdateClient, Validate},
};

pub mod catalog;
pub mod loan;
pub mod payment;

pub use catalog::CatalogRepository;
pub use loan::LoanRepository;
pub use payment::PaymentRepository;

/// Client repository for backend operations
#[derive(Clone, Debug)]
pub struct ClientRepository {
    api: ApiClient,
}

impl ClientRepository {
    /// Create a new client repository
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get all clients
    pub async fn get_all(&self) -> ApiResult<Vec<Client>> {
        self.api.get("/clients").await
    }

    /// Find a client by ID
    pub async fn find_by_id(&self, id: &EntityId) -> ApiResult<Client> {
        self.api.get(&format!("/clients/{id}")).await
    }

    /// Create a new client
    pub async fn create(&self, payload: &NewClient) -> ApiResult<Client> {
        payload.validate()?;
        let client: Client = self.api.post("/clients", payload).await?;
        info!("Created client: {}", client.id);
        Ok(client)
    }

    /// Update an existing client
    pub async fn update(&self, id: &EntityId, payload: &UpdateClient) -> ApiResult<Client> {
        payload.validate()?;
        let client = self.api.put(&format!("/clients/{id}"), payload).await?;
        info!("Updated client: {}", id);
        Ok(client)
    }

    /// Delete a client
    pub async fn delete(&self, id: &EntityId) -> ApiResult<()> {
        self.api.delete(&format!("/clients/{id}")).await?;
        info!("Deleted client: {}", id);
        Ok(())
    }
}

/// User repository for backend operations
#[derive(Clone, Debug)]
pub struct UserRepository {
    api: ApiClient,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Get all users
    pub async fn get_all(&self) -> ApiResult<Vec<User>> {
        self.api.get("/users").await
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: &EntityId) -> ApiResult<User> {
        self.api.get(&format!("/users/{id}")).await
    }

    /// Find a user by exact username
    ///
    /// The backend has no lookup by username, so this filters the full list.
    pub async fn find_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        let users = self.get_all().await?;
        Ok(users.into_iter().find(|user| user.username == username))
    }

    /// Search users whose name matches `name`
    pub async fn search_by_name(&self, name: &str) -> ApiResult<Vec<User>> {
        self.api
            .get_with_query("/users/search", &[("name", name)])
            .await
    }

    /// Create a new user
    pub async fn create(&self, payload: &NewUser) -> ApiResult<User> {
        payload.validate()?;
        let user: User = self.api.post("/users", payload).await?;
        info!("Created user: {}", user.username);
        Ok(user)
    }

    /// Register a user from the sign-up form
    pub async fn register(&self, registration: &Registration) -> ApiResult<User> {
        registration.validate()?;
        self.create(&registration.user).await
    }

    /// Update an existing user
    pub async fn update(&self, id: &EntityId, payload: &UpdateUser) -> ApiResult<User> {
        payload.validate()?;
        let user = self.api.put(&format!("/users/{id}"), payload).await?;
        info!("Updated user: {}", id);
        Ok(user)
    }

    /// Delete a user
    pub async fn delete(&self, id: &EntityId) -> ApiResult<()> {
        self.api.delete(&format!("/users/{id}")).await?;
        info!("Deleted user: {}", id);
        Ok(())
    }
}

/// Every repository, sharing one API client
#[derive(Clone, Debug)]
pub struct Repositories {
    pub loans: LoanRepository,
    pub clients: ClientRepository,
    pub payments: PaymentRepository,
    pub catalog: CatalogRepository,
    pub users: UserRepository,
}

impl Repositories {
    /// Create the full repository set over `api`
    pub fn new(api: ApiClient) -> Self {
        Self {
            loans: LoanRepository::new(api.clone()),
            clients: ClientRepository::new(api.clone()),
            payments: PaymentRepository::new(api.clone()),
            catalog: CatalogRepository::new(api.clone()),
            users: UserRepository::new(api),
        }
    }
}
