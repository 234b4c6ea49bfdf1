#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wetools_lib::run_app().await
}
