mod config;
mod core;
mod dimensions;
mod domain;
mod input;
mod localize;
mod ruler;
mod settings;
mod sync;
mod widget;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    localize::localize();
    core::app::run().await
}
