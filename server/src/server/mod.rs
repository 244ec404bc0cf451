mod marker_server;
pub use marker_server::MarkerServer;

mod server_config;
pub use server_config::ServerConfig;
