//! User Service Library
//!
//! This crate provides user management functionality via gRPC: a repository
//! over PostgreSQL, one handler per RPC method, and connection establishment
//! with bounded retry.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::grpc::UserGrpcService;
use crate::infra::Database;
use crate::repository::UserStore;

/// Run the gRPC server.
///
/// Failing to reach the store or to bind the listener is fatal: the error
/// propagates out and the process exits.
pub async fn run(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();

    let db = Database::connect(&config.storage).await?;

    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    let grpc_service = UserGrpcService::new(user_repo);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("user service listening on {}", addr);

    Server::builder()
        .add_service(proto::UserServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
