//! Logger initialization: a single `simplelog` sink to the terminal,
//! falling back to a bare formatter when no terminal is attached.

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, SimpleLogger, TermLogger, TerminalMode};

/// Initializes the global logger at `level`. Safe to call at most once per
/// process; a second call returns an error from the underlying facade,
/// which callers are expected to treat as a programmer error.
pub fn init(level: LevelFilter) {
    let term = TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    if CombinedLogger::init(vec![term]).is_err() {
        // No terminal available (e.g. output redirected in a way TermLogger
        // rejects): fall back to a bare stderr logger rather than panic.
        let _ = SimpleLogger::init(level, Config::default());
    }
}
