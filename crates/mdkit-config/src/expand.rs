//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Values without a `${` are returned as-is. A referenced variable that is
/// unset and has no default is reported against `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_theme_from_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDKIT_TEST_THEME", "github-dark");
        }
        let result = expand_env("${MDKIT_TEST_THEME}", "markdown.code_highlighting.theme").unwrap();
        assert_eq!(result, "github-dark");
        unsafe {
            std::env::remove_var("MDKIT_TEST_THEME");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDKIT_TEST_UNSET");
        }
        let result = expand_env("${MDKIT_TEST_UNSET:-github-light}", "field").unwrap();
        assert_eq!(result, "github-light");
    }

    #[test]
    fn test_expand_embedded_in_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDKIT_TEST_CACHE_ROOT", "/var/cache");
        }
        let result = expand_env("${MDKIT_TEST_CACHE_ROOT}/mdkit", "cache.stores.disk.path").unwrap();
        assert_eq!(result, "/var/cache/mdkit");
        unsafe {
            std::env::remove_var("MDKIT_TEST_CACHE_ROOT");
        }
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDKIT_TEST_MISSING");
        }
        let err = expand_env("${MDKIT_TEST_MISSING}", "cache.stores.disk.path").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in cache.stores.disk.path: ${MDKIT_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_literals_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("github-light", "f").unwrap(), "github-light");
        assert_eq!(expand_env("$HOME/cache", "f").unwrap(), "$HOME/cache");
    }
}
