//! gRPC layer - one handler per RPC method.

mod user_grpc;

pub use user_grpc::UserGrpcService;
