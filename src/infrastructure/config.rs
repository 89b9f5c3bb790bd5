use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Insert demo users and listings at startup.
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://balkan_listings.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            seed_demo: env::var("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn reads_overrides_from_environment() {
        env::set_var("PORT", "9100");
        env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:3000, ,https://example.mk");
        env::set_var("SEED_DEMO", "1");

        let config = Config::from_env();
        assert_eq!(config.port, 9100);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "https://example.mk"]
        );
        assert!(config.seed_demo);

        env::remove_var("PORT");
        env::remove_var("CORS_ALLOWED_ORIGINS");
        env::remove_var("SEED_DEMO");
    }

    #[test]
    #[serial]
    fn falls_back_to_defaults() {
        env::remove_var("DATABASE_URL");
        env::remove_var("PORT");
        env::remove_var("CORS_ALLOWED_ORIGINS");
        env::remove_var("SEED_DEMO");

        let config = Config::from_env();
        assert_eq!(config.database_url, "sqlite://balkan_listings.db?mode=rwc");
        assert_eq!(config.port, 8000);
        assert!(config.cors_allowed_origins.is_empty());
        assert!(!config.seed_demo);
    }

    #[test]
    #[serial]
    fn seed_flag_accepts_false_and_zero() {
        for value in ["false", "0"] {
            env::set_var("SEED_DEMO", value);
            assert!(!Config::from_env().seed_demo, "SEED_DEMO={value}");
        }
        env::set_var("SEED_DEMO", "true");
        assert!(Config::from_env().seed_demo);

        env::remove_var("SEED_DEMO");
    }
}
