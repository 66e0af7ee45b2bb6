use std::env;

pub const LISTEN_PORT: u16 = 5000;

const UNKNOWN_HOST: &str = "unknown";

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub host: String,
}

impl ServiceConfig {
    /// Read once at startup; handlers get the value through `AppState`.
    pub fn from_env() -> Self {
        Self {
            host: Self::host_or_default(env::var("HOSTNAME").ok()),
        }
    }

    /// An unset variable means `unknown`; a set-but-empty one is kept as is.
    pub fn host_or_default(value: Option<String>) -> String {
        value.unwrap_or_else(|| UNKNOWN_HOST.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_host_is_unknown() {
        assert_eq!(ServiceConfig::host_or_default(None), "unknown");
    }

    #[test]
    fn host_is_taken_verbatim() {
        assert_eq!(
            ServiceConfig::host_or_default(Some("rig-01".to_string())),
            "rig-01"
        );
        assert_eq!(ServiceConfig::host_or_default(Some(String::new())), "");
    }
}
