/// Initializes the process logger, defaulting to `info` when `RUST_LOG` is
/// unset. Safe to call more than once; later calls are ignored.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}
