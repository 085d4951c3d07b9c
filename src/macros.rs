/// Builds a [`Trace`](crate::Trace) from a list of segments.
///
/// Each argument can be anything that converts into
/// `Cow<'static, str>`, such as a string literal or a `String`.
///
/// # Examples
///
/// ```
/// use reportmux::trace;
///
/// assert_eq!(trace!().to_string(), "/");
/// assert_eq!(trace!("payments").to_string(), "/payments");
///
/// let worker = format!("worker-{}", 3);
/// assert_eq!(trace!("payments", worker).to_string(), "/payments/worker-3");
/// ```
#[macro_export]
macro_rules! trace {
    () => {
        $crate::Trace::default()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::Trace::new([
            $($crate::__private::Cow::<'static, str>::from($segment)),+
        ])
    };
}
