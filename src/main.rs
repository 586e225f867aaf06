#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = gradebook_rust::run().await {
        eprintln!("gradebook-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
