//! Error macros for grille

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::ConfigError::UsageError($msg.to_string()))
    };
}

/// Macro for returning a bad-type error at a configuration path
#[macro_export]
macro_rules! bail_bad_type {
    ($path:expr, $reason:expr) => {
        return Err($crate::error::ConfigError::bad_type($path, $reason))
    };
}

