#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ai_detector_lib::run(std::env::args().collect()).await
}
