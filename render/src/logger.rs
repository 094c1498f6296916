/// Intercept messages using the `log` crate and print them to STDOUT,
/// filtered by `RUST_LOG` (info by default).
pub fn setup() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("info")).init();
}
