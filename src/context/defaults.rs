//! Process-wide fallback values used when no scope in the chain sets a field.
//!
//! Shared by every thread and expected to be written at startup, then read.

use parking_lot::{const_rwlock, RwLock};

/// Snapshot of the process-wide defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub cluster: Option<String>,
    pub project: Option<String>,
    pub token: Option<String>,
    pub loglevel: Option<u8>,
}

impl Defaults {
    const EMPTY: Defaults = Defaults {
        cluster: None,
        project: None,
        token: None,
        loglevel: None,
    };
}

static DEFAULTS: RwLock<Defaults> = const_rwlock(Defaults::EMPTY);

/// Current defaults.
pub fn defaults() -> Defaults {
    DEFAULTS.read().clone()
}

pub fn set_default_cluster(name: Option<String>) {
    DEFAULTS.write().cluster = name;
}

pub fn set_default_project(name: Option<String>) {
    DEFAULTS.write().project = name;
}

pub fn set_default_token(token: Option<String>) {
    DEFAULTS.write().token = token;
}

pub fn set_default_loglevel(level: Option<u8>) {
    DEFAULTS.write().loglevel = level;
}

/// Replace all defaults at once.
pub fn install_defaults(values: Defaults) {
    *DEFAULTS.write() = values;
}

/// Clear every default.
pub fn reset_defaults() {
    install_defaults(Defaults::EMPTY);
}

pub(crate) fn default_cluster() -> Option<String> {
    DEFAULTS.read().cluster.clone()
}

pub(crate) fn default_project() -> Option<String> {
    DEFAULTS.read().project.clone()
}

pub(crate) fn default_token() -> Option<String> {
    DEFAULTS.read().token.clone()
}

pub(crate) fn default_loglevel() -> Option<u8> {
    DEFAULTS.read().loglevel
}

/// Serializes unit tests that read or write the process-wide defaults.
#[cfg(test)]
pub(crate) fn test_lock() -> parking_lot::MutexGuard<'static, ()> {
    static LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
    LOCK.lock()
}
