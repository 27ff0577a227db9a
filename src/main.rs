#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = skin_api::run().await {
        log::error!("server failed: {err}");
        std::process::exit(1);
    }
}
