//! Process-wide formatter used by the exported macros.

use std::sync::LazyLock;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::Config;
use crate::xmt::Xmt;

static INSTANCE: LazyLock<Mutex<Xmt>> = LazyLock::new(|| Mutex::new(Xmt::default()));

/// Replace the global formatter with one built from `cfg`.
pub fn init(cfg: Config) {
    init_with(Xmt::new(cfg));
}

/// Replace the global formatter with a prebuilt one.
pub fn init_with(xmt: Xmt) {
    debug!(?xmt, "initializing global formatter");
    *get_instance().lock() = xmt;
}

/// Initialize the global formatter with the default configuration.
pub fn init_default() {
    init(Config::default());
}

pub fn get_instance() -> &'static Mutex<Xmt> {
    &INSTANCE
}

/// Print `message`, then run `func` one nest level deeper.
///
/// The lock is released while `func` runs, so it may use the macros. The
/// previous formatter is restored afterwards, including when `func` panics.
pub fn nest<T, F: FnOnce() -> T>(message: &str, func: F) -> T {
    let orig = {
        let mut guard = get_instance().lock();
        let orig = guard.clone();
        orig.print(message);
        *guard = orig.nest();
        orig
    };
    let _restore = Restore(Some(orig));
    func()
}

struct Restore(Option<Xmt>);

impl Drop for Restore {
    fn drop(&mut self) {
        if let Some(orig) = self.0.take() {
            *get_instance().lock() = orig;
        }
    }
}
