//! Application configuration management.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Revenue allocation policy.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Business-day calendar configuration.
    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// Revenue allocation policy.
///
/// The percentages and the fixed daily reserve encode one restaurant's
/// closing rules; they are configurable because the policy is the least
/// stable part of the design.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Share of daily revenue moved to the investment account.
    #[serde(default = "default_investment_rate")]
    pub investment_rate: Decimal,
    /// Share of daily revenue moved to the debt-payoff account.
    #[serde(default = "default_debt_payment_rate")]
    pub debt_payment_rate: Decimal,
    /// Fixed daily amount moved from cash to the payroll reserve.
    #[serde(default = "default_daily_reserve")]
    pub daily_reserve: Decimal,
}

fn default_investment_rate() -> Decimal {
    Decimal::new(20, 2) // 0.20
}

fn default_debt_payment_rate() -> Decimal {
    Decimal::new(10, 2) // 0.10
}

fn default_daily_reserve() -> Decimal {
    Decimal::from(130)
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            investment_rate: default_investment_rate(),
            debt_payment_rate: default_debt_payment_rate(),
            daily_reserve: default_daily_reserve(),
        }
    }
}

/// Business-day calendar configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarConfig {
    /// Dates treated as holidays when scheduling card settlements.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CAIXA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_policy_defaults() {
        let policy = PolicyConfig::default();
        assert_eq!(policy.investment_rate, dec!(0.20));
        assert_eq!(policy.debt_payment_rate, dec!(0.10));
        assert_eq!(policy.daily_reserve, dec!(130));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.policy.investment_rate, dec!(0.20));
        assert!(config.calendar.holidays.is_empty());
    }

    #[test]
    fn test_config_overrides() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "policy": { "daily_reserve": "150" },
                "calendar": { "holidays": ["2026-12-25"] }
            }"#,
        )
        .unwrap();
        assert_eq!(config.policy.daily_reserve, dec!(150));
        // Untouched fields keep their defaults.
        assert_eq!(config.policy.investment_rate, dec!(0.20));
        assert_eq!(
            config.calendar.holidays,
            vec![NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()]
        );
    }
}
