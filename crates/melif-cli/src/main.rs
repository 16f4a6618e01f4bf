use log::LevelFilter;

mod command;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("MELIF_LOG", "warn,melif=info"))
        .init();
    command::run()
}
