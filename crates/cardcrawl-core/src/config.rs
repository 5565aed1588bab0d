use crate::app_config::CrawlConfig;
use crate::ConfigError;

/// Load crawl configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_crawl_config() -> Result<CrawlConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_crawl_config_from_env()
}

/// Load crawl configuration from environment variables already in the process.
///
/// Unlike [`load_crawl_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_crawl_config_from_env() -> Result<CrawlConfig, ConfigError> {
    build_crawl_config(|key| std::env::var(key))
}

/// Build crawl configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_crawl_config<F>(lookup: F) -> Result<CrawlConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false, got \"{raw}\""))
            }),
            Err(_) => Ok(default),
        }
    };

    let base_url = or_default(
        "CARDCRAWL_BASE_URL",
        "https://www.moonpig.com/us/personalised-cards/all/",
    );
    let batch_dir = PathBuf::from(or_default("CARDCRAWL_BATCH_DIR", "./batches"));
    let output_path = PathBuf::from(or_default("CARDCRAWL_OUTPUT_PATH", "./output.csv"));
    let nav_cache_path = PathBuf::from(or_default("CARDCRAWL_NAV_CACHE_PATH", "./baseItems.json"));
    let use_nav_cache = parse_bool("CARDCRAWL_USE_NAV_CACHE", false)?;
    let aggregate = parse_bool("CARDCRAWL_AGGREGATE", true)?;

    let page_size = parse_u64("CARDCRAWL_PAGE_SIZE", "24")?;
    if page_size == 0 {
        return Err(invalid("CARDCRAWL_PAGE_SIZE", "must be greater than zero".into()));
    }

    let request_timeout_secs = match lookup("CARDCRAWL_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("CARDCRAWL_REQUEST_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let user_agent = or_default("CARDCRAWL_USER_AGENT", "cardcrawl/0.1");
    let log_level = or_default("CARDCRAWL_LOG_LEVEL", "info");

    Ok(CrawlConfig {
        base_url,
        batch_dir,
        output_path,
        nav_cache_path,
        use_nav_cache,
        aggregate,
        page_size,
        request_timeout_secs,
        user_agent,
        log_level,
    })
}

/// Accepts the usual spellings of a boolean flag.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::path::Path;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_crawl_config_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_crawl_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.base_url,
            "https://www.moonpig.com/us/personalised-cards/all/"
        );
        assert_eq!(cfg.batch_dir, Path::new("./batches"));
        assert_eq!(cfg.output_path, Path::new("./output.csv"));
        assert_eq!(cfg.nav_cache_path, Path::new("./baseItems.json"));
        assert!(!cfg.use_nav_cache);
        assert!(cfg.aggregate);
        assert_eq!(cfg.page_size, 24);
        assert!(cfg.request_timeout_secs.is_none());
        assert_eq!(cfg.user_agent, "cardcrawl/0.1");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_crawl_config_overrides() {
        let mut map = HashMap::new();
        map.insert("CARDCRAWL_BASE_URL", "http://localhost:9999/cards/");
        map.insert("CARDCRAWL_BATCH_DIR", "/tmp/b");
        map.insert("CARDCRAWL_USE_NAV_CACHE", "yes");
        map.insert("CARDCRAWL_AGGREGATE", "false");
        map.insert("CARDCRAWL_PAGE_SIZE", "48");
        map.insert("CARDCRAWL_REQUEST_TIMEOUT_SECS", "15");
        let cfg = build_crawl_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:9999/cards/");
        assert_eq!(cfg.batch_dir, Path::new("/tmp/b"));
        assert!(cfg.use_nav_cache);
        assert!(!cfg.aggregate);
        assert_eq!(cfg.page_size, 48);
        assert_eq!(cfg.request_timeout_secs, Some(15));
    }

    #[test]
    fn build_crawl_config_rejects_zero_page_size() {
        let mut map = HashMap::new();
        map.insert("CARDCRAWL_PAGE_SIZE", "0");
        let result = build_crawl_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDCRAWL_PAGE_SIZE"),
            "expected InvalidEnvVar(CARDCRAWL_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn build_crawl_config_rejects_non_numeric_page_size() {
        let mut map = HashMap::new();
        map.insert("CARDCRAWL_PAGE_SIZE", "lots");
        let result = build_crawl_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDCRAWL_PAGE_SIZE"),
            "expected InvalidEnvVar(CARDCRAWL_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn build_crawl_config_rejects_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("CARDCRAWL_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_crawl_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDCRAWL_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(CARDCRAWL_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_crawl_config_rejects_invalid_flag() {
        let mut map = HashMap::new();
        map.insert("CARDCRAWL_AGGREGATE", "maybe");
        let result = build_crawl_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDCRAWL_AGGREGATE"),
            "expected InvalidEnvVar(CARDCRAWL_AGGREGATE), got: {result:?}"
        );
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
