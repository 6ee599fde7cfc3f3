use std::path::PathBuf;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = std::env::var("TODO_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/todos.db"));
    let conn = todo_server::db::open(&db_path)?;
    let repo = todo_server::TodoRepository::new(conn);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, db = %db_path.display(), "listening");
    todo_server::run(listener, repo).await?;
    Ok(())
}
