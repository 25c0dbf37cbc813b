use std::thread;
use tracing::info;

pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

// Temporary to observe the thread is not blocking
pub fn thread_logging(str: &str) {
    let thread_id = thread::current().id();
    info!("{}: {:?}", str, thread_id);
}
