//! Notifier Worker - Entry Point
//!
//! Reads domain events as JSON lines and sends the notifications they imply.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    notifier_worker::run().await
}
