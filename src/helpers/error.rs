//! Helpers used to describe errors in logs and error responses.

/// Builds a message describing an error and its whole chain of [`source`]s.
///
/// Each error in the chain contributes one line, using its [`Display`] implementation:
///
/// ```text
/// failed to fetch pokemon with id 25
/// caused by: connection refused
/// ```
///
/// When a [`Backtrace`](std::backtrace::Backtrace) can be extracted from the error (see
/// [`backtrace_message`]), it is appended at the end.
///
/// [`source`]: std::error::Error::source
/// [`Display`]: std::fmt::Display
#[cfg(not(tarpaulin_include))]
pub fn recursive_error_message<E>(error: &E) -> String
where
    E: std::error::Error,
{
    let mut lines = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {}", cause));
        source = cause.source();
    }

    let mut message = lines.join("\n");
    if let Some(backtrace) = backtrace_message(error) {
        message.push_str("\n\nBacktrace: ");
        message.push_str(&backtrace);
    }
    message
}

/// Returns the [`Backtrace`](std::backtrace::Backtrace) stored in an error, formatted as a string.
///
/// Requires a Nightly toolchain (see the `backtrace_support` config set by the build script);
/// always returns `None` otherwise.
#[cfg(not(tarpaulin_include))]
#[cfg(backtrace_support)]
pub fn backtrace_message<E>(error: &E) -> Option<String>
where
    E: std::error::Error,
{
    std::error::request_ref::<std::backtrace::Backtrace>(error)
        .map(|backtrace| format!("{:#}", backtrace))
}

#[cfg(not(tarpaulin_include))]
#[cfg(not(backtrace_support))]
#[doc(hidden)]
pub fn backtrace_message<E>(_error: &E) -> Option<String>
where
    E: std::error::Error,
{
    None
}
