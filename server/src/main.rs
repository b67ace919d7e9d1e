use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::BookRouter;
use driver::database::{InMemoryBookRepository, MongoDatabase};
use error_stack::ResultExt;
use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::KernelError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;

static BOOK_STORE: &str = "BOOK_STORE";

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,server=debug,tower_http=debug,mongodb=info".into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    match dotenvy::var(BOOK_STORE).as_deref() {
        Ok("memory") => {
            tracing::warn!("serving books from process memory; nothing is persisted");
            serve(AppModule::new(InMemoryBookRepository::new())).await?
        }
        _ => {
            let database = MongoDatabase::new().await?;
            serve(AppModule::new(database.book_repository())).await?
        }
    }

    Ok(())
}

async fn serve<R>(app: AppModule<R>) -> error_stack::Result<(), KernelError>
where
    R: BookQuery + BookModifier,
{
    let router = axum::Router::new()
        .route_book()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new(), //TODO .allow_origin([""])
        )
        .with_state(app);

    let bind = SocketAddr::from(([0, 0, 0, 0], 8080));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!("listening on {bind}");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
