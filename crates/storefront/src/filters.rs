//! Custom Askama template filters.

use std::fmt::Display;

/// Served path of the fingerprinted stylesheet, fixed at build time.
///
/// Usage in templates: `{{ ""|stylesheet }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn stylesheet(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("STYLESHEET_PATH"))
}

/// Cart line quantity suffix: `{{ item.quantity|times }}` renders `(x3)`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn times(quantity: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("(x{quantity})"))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_stylesheet_path_is_under_static() {
        assert!(env!("STYLESHEET_PATH").starts_with("/static/css/"));
    }
}
