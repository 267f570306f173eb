//! Formatting macros that write through the global formatter.

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::global::get_instance().lock().print(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! detail {
    ($($arg:tt)*) => {
        $crate::global::get_instance().lock().detail(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! quiet {
    ($($arg:tt)*) => {
        $crate::global::get_instance().lock().quiet(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::global::get_instance().lock().success(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::global::get_instance().lock().warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::global::get_instance().lock().error(&format!($($arg)*))
    };
}

/// Raw output of a single displayable value.
#[macro_export]
macro_rules! out {
    ($arg:expr) => {
        $crate::global::get_instance().lock().out(&$arg.to_string())
    };
}

/// Evaluates to `xmt::Result<String>`.
#[macro_export]
macro_rules! prompt {
    ($($arg:tt)*) => {
        $crate::global::get_instance().lock().prompt(&format!($($arg)*))
    };
}

/// Evaluates to `xmt::Result<bool>`; an empty answer means no.
#[macro_export]
macro_rules! prompt_yn {
    ($($arg:tt)*) => {
        $crate::global::get_instance().lock().prompt_yn(&format!($($arg)*), false)
    };
}
