use std::sync::Arc;

use guestbook::{
    build_app,
    config::Config,
    errors::ServerError,
    logging,
    store::{MessageStore, SystemClock},
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    logging::init_logging();

    let config = Config::from_env()?;
    let bind_socket = config.bind_socket()?;

    let store = Arc::new(MessageStore::new(
        Arc::new(SystemClock),
        config.message_capacity,
    ));
    let app = build_app(AppState::new(store), config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(bind_socket)
        .await
        .map_err(|err| ServerError::bind(bind_socket.to_string(), err))?;

    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        static_dir = ?config.static_dir,
        message_capacity = ?config.message_capacity,
        "guestbook listening"
    );

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)?;
    Ok(())
}
