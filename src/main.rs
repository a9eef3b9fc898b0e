#[tokio::main]
async fn main() {
    if let Err(e) = cast_launcher::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
