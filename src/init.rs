use crate::{manager::Manager, models::Config, store::Store};

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Build the on-disk store from config paths.
pub fn init_store(config: &Config) -> Store {
    let store = Store::new(
        config.data.words(),
        config.data.frequencies(),
        config.data.recent(),
    );
    log::info!(
        "data: words={} frequencies={} recent={}",
        store.words.display(),
        store.frequencies.display(),
        store.recent.display()
    );
    store
}

/// Load persisted state into a new manager.
pub fn init_manager(config: &Config) -> Manager {
    let opts = config.suggest.options();
    log::info!(
        "suggest: candidate_limit={} top_k={} recent_max={}",
        opts.candidate_limit,
        opts.top_k,
        opts.recent_max
    );
    Manager::load(init_store(config), opts)
}
