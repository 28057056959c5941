use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the `env_logger` backend once. Idempotent; call early in `main`.
///
/// Filter resolution order: the explicit `filter` argument (env_logger
/// syntax, e.g. "kishar_render=debug,wgpu=warn"), then `RUST_LOG`, then a
/// warn-level default; the renderer only logs above debug when it drops
/// work (failed allocations, oversized batches).
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
