use std::env;
use std::time::Duration;

pub(crate) const DEFAULT_LOG_FILTER: &str = "netcfg=info";
pub(crate) const MAX_PASSWORD_LENGTH: usize = 128;

/// Runtime settings, read from the environment with defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) log_filter: String,
    pub(crate) password_length: usize,
    pub(crate) copy_ack: Duration,
    pub(crate) status_duration: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            password_length: 20,
            copy_ack: Duration::from_millis(2000),
            status_duration: Duration::from_millis(1500),
        }
    }
}

impl Settings {
    pub(crate) fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str| {
            lookup(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .filter(|value| *value > 0)
        };
        Self {
            log_filter: lookup("NETCFG_LOG")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.log_filter),
            password_length: number("NETCFG_PASSWORD_LENGTH")
                .and_then(|value| usize::try_from(value).ok())
                .filter(|value| *value <= MAX_PASSWORD_LENGTH)
                .unwrap_or(defaults.password_length),
            copy_ack: number("NETCFG_COPY_ACK_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.copy_ack),
            status_duration: number("NETCFG_STATUS_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.status_duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = Settings::from_lookup(lookup(&[
            ("NETCFG_LOG", "netcfg=debug"),
            ("NETCFG_PASSWORD_LENGTH", "32"),
            ("NETCFG_COPY_ACK_MS", "500"),
        ]));
        assert_eq!(settings.log_filter, "netcfg=debug");
        assert_eq!(settings.password_length, 32);
        assert_eq!(settings.copy_ack, Duration::from_millis(500));
        assert_eq!(settings.status_duration, Duration::from_millis(1500));
    }

    #[test]
    fn garbage_falls_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("NETCFG_LOG", "  "),
            ("NETCFG_PASSWORD_LENGTH", "0"),
            ("NETCFG_STATUS_MS", "soon"),
        ]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn password_length_is_capped() {
        let at_cap = Settings::from_lookup(lookup(&[("NETCFG_PASSWORD_LENGTH", "128")]));
        assert_eq!(at_cap.password_length, MAX_PASSWORD_LENGTH);

        let huge = Settings::from_lookup(lookup(&[("NETCFG_PASSWORD_LENGTH", "10000000000")]));
        assert_eq!(huge.password_length, 20);
    }
}
