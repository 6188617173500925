//! Logging setup.

/// Installs `env_logger` as the global logger, configured from `RUST_LOG`.
///
/// Calling this more than once, or after another logger was installed, is harmless.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
