use std::process::{ExitCode, Termination};

use error_stack::Report;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use client::{BookClient, ClientConfig, QueryBookRequest};
use kernel::KernelError;

#[derive(Debug)]
struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = BookClient::new(&ClientConfig::from_env())?;
    let set = client.query_book(&QueryBookRequest::default()).await?;

    for book in &set.items {
        println!("{}\t{}\t{}", book.id, book.data.name, book.data.author);
    }
    println!("total: {}", set.total);

    Ok(())
}
