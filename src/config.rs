use std::env::VarError;

use thiserror::Error;
use url::Url;

/// Environment variable consulted when `--url` is not given.
pub const URL_ENV: &str = "DATA_REPORT_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no endpoint configured, pass --url or set {}", URL_ENV)]
    MissingUrl,
    #[error("{} is not valid unicode", URL_ENV)]
    NonUnicodeEnv,
    #[error("{} is not a valid url: {}", URL_ENV, .0)]
    InvalidEnvUrl(#[from] url::ParseError),
    #[error("unsupported url scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug)]
pub struct Config {
    pub url: Url,
}

impl Config {
    /// The flag takes precedence over the environment.
    pub fn resolve(flag: Option<Url>, env: Option<String>) -> Result<Config, ConfigError> {
        let url = match (flag, env) {
            (Some(url), _) => url,
            (None, Some(env)) => Url::parse(env.trim())?,
            (None, None) => return Err(ConfigError::MissingUrl),
        };

        match url.scheme() {
            "http" | "https" => Ok(Config { url }),
            scheme => Err(ConfigError::UnsupportedScheme(scheme.to_string())),
        }
    }

    pub fn from_env(flag: Option<Url>) -> Result<Config, ConfigError> {
        Config::resolve(flag, env_value(std::env::var(URL_ENV))?)
    }
}

/// Unset and blank values both count as absent.
fn env_value(var: Result<String, VarError>) -> Result<Option<String>, ConfigError> {
    match var {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NonUnicodeEnv),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::ffi::OsString;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_flag_wins_over_env() {
        let config = Config::resolve(
            Some(url("https://flag.example/data")),
            Some("https://env.example/data".to_string()),
        )
        .unwrap();
        assert_eq!(config.url.as_str(), "https://flag.example/data");
    }

    #[test]
    fn test_env_fallback() {
        let config = Config::resolve(None, Some(" http://env.example/data\n".to_string())).unwrap();
        assert_eq!(config.url.as_str(), "http://env.example/data");
    }

    #[test]
    fn test_missing_url() {
        assert!(matches!(
            Config::resolve(None, None),
            Err(ConfigError::MissingUrl)
        ));
    }

    #[test]
    fn test_invalid_env_url() {
        assert!(matches!(
            Config::resolve(None, Some("not a url".to_string())),
            Err(ConfigError::InvalidEnvUrl(_))
        ));
    }

    #[test]
    fn test_env_value() {
        assert_eq!(env_value(Err(VarError::NotPresent)).unwrap(), None);
        assert_eq!(env_value(Ok("  ".to_string())).unwrap(), None);
        assert_eq!(
            env_value(Ok("http://env.example".to_string())).unwrap(),
            Some("http://env.example".to_string())
        );
    }

    #[test]
    fn test_non_unicode_env_is_not_missing() {
        let var = Err(VarError::NotUnicode(OsString::from("http://env.example")));
        assert!(matches!(env_value(var), Err(ConfigError::NonUnicodeEnv)));
    }

    #[test]
    fn test_unsupported_scheme() {
        match Config::resolve(Some(url("ftp://example.com/data")), None) {
            Err(ConfigError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "ftp"),
            result => panic!("Unexpected result: {:?}", result),
        }
    }
}
