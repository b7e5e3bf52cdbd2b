//! `env_logger` setup for the binary.

use log::LevelFilter;
use std::io::Write;

/// Picks the level from `--log-level`, then `RUST_LOG`, then `info`.
pub fn resolve_level(flag: Option<&str>, env: Option<&str>) -> LevelFilter {
    flag.and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| env.and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Info)
}

pub fn init_logging(level: Option<&str>) {
    let env = std::env::var("RUST_LOG").ok();
    let level = resolve_level(level, env.as_deref());
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();
    log::debug!("logger initialized (level: {level})");
}
