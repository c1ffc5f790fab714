//! Command: print version information.

/// Version string, from the build when available.
#[must_use]
pub fn version() -> &'static str {
    option_env!("JWMRC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the jwmrc version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("jwmrc {}", version());
}
