use std::sync::Once;

static INIT: Once = Once::new();

/// Route `log` records to the browser console and install the panic hook.
///
/// Idempotent; only the first call has an effect. Natively this just caps the
/// max level, leaving the sink to the host binary.
pub fn init_logging(level: log::Level) {
    INIT.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        {
            console_error_panic_hook::set_once();
            if console_log::init_with_level(level).is_err() {
                log::warn!("a logger was already installed; keeping it");
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        log::set_max_level(level.to_level_filter());

        log::debug!("logging initialized at {level}");
    });
}

/// Level used by the module start function.
#[must_use]
pub fn default_level() -> log::Level {
    if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info }
}
