//! Environment-driven settings shared by the binary and the library.

use std::env;
use std::env::VarError;
use std::time::Duration;

/// Emojis and "regular" images are served by GitHub here.
pub const DEFAULT_ASSETS_URL: &str = "https://github.githubassets.com/images/icons/emoji";
/// The emojis database from the gemoji project.
pub const DEFAULT_CATALOG_URL: &str = "https://github.com/github/gemoji/raw/master/db/emoji.json";
pub const DEFAULT_GEM_COMMAND: &str = "gem";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_ASSETS_URL: &str = "SGEEXT_ASSETS_URL";
const ENV_CATALOG_URL: &str = "SGEEXT_CATALOG_URL";
const ENV_GEM_COMMAND: &str = "SGEEXT_GEM";
const ENV_HTTP_TIMEOUT: &str = "SGEEXT_HTTP_TIMEOUT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL assets are addressed under, without a trailing slash.
    pub assets_url: String,
    pub catalog_url: String,
    /// Executable queried for the local gemoji installation.
    pub gem_command: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_url: DEFAULT_ASSETS_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            gem_command: DEFAULT_GEM_COMMAND.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(env_non_empty)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            assets_url: lookup(ENV_ASSETS_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.assets_url),
            catalog_url: lookup(ENV_CATALOG_URL).unwrap_or(defaults.catalog_url),
            gem_command: lookup(ENV_GEM_COMMAND).unwrap_or(defaults.gem_command),
            http_timeout: lookup(ENV_HTTP_TIMEOUT)
                .map(|raw| parse_timeout(&raw))
                .unwrap_or(defaults.http_timeout),
        }
    }

    /// `<assets_url>/<name>.png`
    pub fn asset_url(&self, name: &str) -> String {
        format!("{}/{name}.png", self.assets_url)
    }
}

fn parse_timeout(raw: &str) -> Duration {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            log::warn!(
                "{ENV_HTTP_TIMEOUT}={raw:?} is not a positive number of seconds, using {}s",
                DEFAULT_HTTP_TIMEOUT.as_secs()
            );
            DEFAULT_HTTP_TIMEOUT
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) | Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(os)) => Some(os.to_string_lossy().into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(Config::from_lookup(lookup_from(&[])), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_ASSETS_URL, "http://mirror.local/emoji/"),
            (ENV_GEM_COMMAND, "/opt/ruby/bin/gem"),
            (ENV_HTTP_TIMEOUT, "5"),
        ]));
        assert_eq!(config.assets_url, "http://mirror.local/emoji");
        assert_eq!(config.gem_command, "/opt/ruby/bin/gem");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn invalid_timeout_falls_back() {
        let config = Config::from_lookup(lookup_from(&[(ENV_HTTP_TIMEOUT, "soon")]));
        assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
        let config = Config::from_lookup(lookup_from(&[(ENV_HTTP_TIMEOUT, "0")]));
        assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
    }

    #[test]
    fn asset_url_appends_png() {
        let config = Config::default();
        assert_eq!(
            config.asset_url("unicode/1f600"),
            "https://github.githubassets.com/images/icons/emoji/unicode/1f600.png"
        );
    }
}
