// Web Interface module root
pub mod handlers;
pub mod routes;
pub mod types;
pub mod web_server;

// Re-export commonly used items
pub use handlers::AppState;
pub use routes::routes;
pub use web_server::WebServer;
