//! Calibration constants and runtime configuration.
//!
//! - `CostAssumptions`: fee rates, depreciation and mileage rules used by the
//!   calculators. Defaults reflect the French market; a JSON file may override
//!   any subset of them (missing keys keep their default).
//! - `AdvisorConfig`: connection settings for the recommendation service, read
//!   from the environment (`.env` supported) and overridable from the CLI.

use serde::{Deserialize, Serialize};

/// Loan calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditAssumptions {
    /// Yearly vehicle depreciation used for the retained value.
    pub depreciation_rate: f64,
    /// Establishment fee as a share of the financed principal.
    pub establishment_fee_rate: f64,
    pub establishment_fee_cap: f64,
    /// Yearly insurance as a share of the vehicle price.
    pub insurance_rate: f64,
    pub insurance_floor: f64,
    pub maintenance_per_year: f64,
}

impl Default for CreditAssumptions {
    fn default() -> Self {
        Self {
            depreciation_rate: 0.15,
            establishment_fee_rate: 0.012,
            establishment_fee_cap: 600.0,
            insurance_rate: 0.025,
            insurance_floor: 600.0,
            maintenance_per_year: 900.0,
        }
    }
}

/// LOA calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaAssumptions {
    pub establishment_fee: f64,
    pub insurance_rate: f64,
    pub insurance_floor: f64,
    /// Yearly kilometres included in the contract.
    pub mileage_allowance: u32,
    /// Penalty per kilometre above the allowance, per year.
    pub penalty_per_km: f64,
}

impl Default for LoaAssumptions {
    fn default() -> Self {
        Self {
            establishment_fee: 350.0,
            insurance_rate: 0.02,
            insurance_floor: 500.0,
            mileage_allowance: 15_000,
            penalty_per_km: 0.10,
        }
    }
}

/// LLD calibration. Insurance and maintenance are bundled in the rent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LldAssumptions {
    pub establishment_fee: f64,
    pub mileage_allowance: u32,
    pub penalty_per_km: f64,
}

impl Default for LldAssumptions {
    fn default() -> Self {
        Self {
            establishment_fee: 200.0,
            mileage_allowance: 15_000,
            penalty_per_km: 0.12,
        }
    }
}

/// All calibration constants, grouped per option.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAssumptions {
    pub credit: CreditAssumptions,
    pub loa: LoaAssumptions,
    pub lld: LldAssumptions,
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "AUTOFIN_API_KEY";
pub const ENV_FALLBACK_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "AUTOFIN_BASE_URL";
pub const ENV_MODEL: &str = "AUTOFIN_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "AUTOFIN_TIMEOUT_SECS";

/// Settings for the OpenAI-compatible recommendation endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// Empty when no key is configured; the client refuses to start then.
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl AdvisorConfig {
    /// Read settings from the process environment, loading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_secs = match non_empty(ENV_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS);
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            api_key: non_empty(ENV_API_KEY)
                .or_else(|| non_empty(ENV_FALLBACK_API_KEY))
                .unwrap_or_default(),
            base_url: non_empty(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_empty(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_secs,
        }
    }
}

impl std::fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn partial_assumptions_keep_defaults() {
        let json = r#"{ "loa": { "penalty_per_km": 0.15 }, "credit": { "depreciation_rate": 0.2 } }"#;
        let a: CostAssumptions = serde_json::from_str(json).unwrap();
        assert_eq!(a.loa.penalty_per_km, 0.15);
        assert_eq!(a.loa.establishment_fee, 350.0);
        assert_eq!(a.credit.depreciation_rate, 0.2);
        assert_eq!(a.credit.maintenance_per_year, 900.0);
        assert_eq!(a.lld, LldAssumptions::default());
    }

    #[test]
    fn advisor_config_defaults() {
        let cfg = AdvisorConfig::from_lookup(lookup_from(&[]));
        assert_eq!(cfg.api_key, "");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn advisor_config_prefers_own_key_and_rejects_bad_timeout() {
        let cfg = AdvisorConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "own"),
            (ENV_FALLBACK_API_KEY, "fallback"),
            (ENV_TIMEOUT_SECS, "zero"),
            (ENV_MODEL, "local-model"),
        ]));
        assert_eq!(cfg.api_key, "own");
        assert_eq!(cfg.model, "local-model");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let cfg = AdvisorConfig::from_lookup(lookup_from(&[(ENV_FALLBACK_API_KEY, "fallback")]));
        assert_eq!(cfg.api_key, "fallback");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = AdvisorConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "sk-secret")]));
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
