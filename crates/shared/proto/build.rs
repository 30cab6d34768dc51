fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `protoc` is not available on the build host and cannot be installed
    // from the network; point prost-build at a vendored binary instead.
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/user.proto"], &["proto/"])?;

    Ok(())
}
