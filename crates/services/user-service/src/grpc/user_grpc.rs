//! gRPC implementation for UserService.
//!
//! Handlers are stateless: extract the request fields, run one or two
//! repository calls, map the entity into the response copying id and email
//! only. Every repository error collapses into an `Internal` status carrying
//! the error's message.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::repository::UserRepository;
use common::AppError;
use domain::{User, UserUpdate};
use proto::user::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse,
    GetUserByEmailRequest, GetUserByEmailResponse, GetUserByIdRequest, GetUserByIdResponse,
    GetUsersRequest, GetUsersResponse, UpdateUserRequest, UpdateUserResponse, UserResponse,
};

/// gRPC service wrapper over the user repository.
pub struct UserGrpcService {
    repo: Arc<dyn UserRepository>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[tonic::async_trait]
impl proto::UserService for UserGrpcService {
    async fn get_users(
        &self,
        _request: Request<GetUsersRequest>,
    ) -> Result<Response<GetUsersResponse>, Status> {
        tracing::info!("getting users");

        let users = self
            .repo
            .find_all()
            .await
            .map_err(log_and_status("getting users"))?;

        let users = users.iter().map(user_to_proto).collect();

        Ok(Response::new(GetUsersResponse { users }))
    }

    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        tracing::info!("creating user");
        let req = request.into_inner();

        let user = self
            .repo
            .create(req.email, req.password.into_bytes())
            .await
            .map_err(log_and_status("creating user"))?;

        Ok(Response::new(CreateUserResponse { id: user.id }))
    }

    async fn get_user_by_id(
        &self,
        request: Request<GetUserByIdRequest>,
    ) -> Result<Response<GetUserByIdResponse>, Status> {
        tracing::info!("getting user by id");
        let req = request.into_inner();

        let user = self
            .repo
            .find_one(&req.id)
            .await
            .map_err(log_and_status("getting user by id"))?;

        Ok(Response::new(GetUserByIdResponse {
            user: Some(user_to_proto(&user)),
        }))
    }

    async fn get_user_by_email(
        &self,
        request: Request<GetUserByEmailRequest>,
    ) -> Result<Response<GetUserByEmailResponse>, Status> {
        tracing::info!("getting user by email");
        let req = request.into_inner();

        let user = self
            .repo
            .find_by_email(&req.email)
            .await
            .map_err(log_and_status("getting user by email"))?;

        Ok(Response::new(GetUserByEmailResponse {
            user: Some(user_to_proto(&user)),
        }))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        tracing::info!("updating user by id");
        let req = request.into_inner();

        let mut user = self
            .repo
            .find_one(&req.id)
            .await
            .map_err(log_and_status("loading user for update"))?;

        user.apply_update(&update_from_request(&req));

        self.repo
            .update(&user)
            .await
            .map_err(log_and_status("updating user"))?;

        Ok(Response::new(UpdateUserResponse {
            user: Some(user_to_proto(&user)),
        }))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        tracing::info!("deleting user by id");
        let req = request.into_inner();

        self.repo
            .delete(&req.id)
            .await
            .map_err(log_and_status("deleting user"))?;

        Ok(Response::new(DeleteUserResponse { id: req.id }))
    }
}

/// Log a handler failure and collapse it into the uniform internal status.
fn log_and_status(op: &'static str) -> impl FnOnce(AppError) -> Status {
    move |err| {
        tracing::error!(error = %err, "{} failed", op);
        Status::from(err)
    }
}

/// Convert domain User to proto UserResponse; the credential is never echoed.
fn user_to_proto(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.clone(),
        email: user.email.clone(),
    }
}

/// Map wire fields to the domain update payload: empty means "not supplied".
fn update_from_request(req: &UpdateUserRequest) -> UserUpdate {
    UserUpdate {
        email: (!req.email.is_empty()).then(|| req.email.clone()),
        credential: (!req.password.is_empty()).then(|| req.password.clone().into_bytes()),
    }
}
