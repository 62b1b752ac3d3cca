#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = classtrack::run().await {
        eprintln!("classtrack fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
