use kronos::chart::Body;
use kronos::cycles::{CycleRegistry, CycleSpec, ReturnCycle};
use kronos::returns::{PhaseThresholds, ReturnSetBuilder};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Validated return-engine settings.
#[derive(Debug, Clone)]
pub struct ReturnSettings {
    pub registry: CycleRegistry,
    pub thresholds: PhaseThresholds,
}

impl Default for ReturnSettings {
    fn default() -> Self {
        Self {
            registry: CycleRegistry::standard(),
            thresholds: PhaseThresholds::default(),
        }
    }
}

impl From<ReturnSettings> for ReturnSetBuilder {
    fn from(settings: ReturnSettings) -> Self {
        ReturnSetBuilder::new(settings.registry, settings.thresholds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CycleKindToml {
    CalendarYear,
    FixedPeriod,
}

#[derive(Debug, Clone, Deserialize)]
struct CycleToml {
    body: String,
    #[serde(default)]
    label: Option<String>,
    kind: CycleKindToml,
    #[serde(default)]
    period_days: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReturnsToml {
    #[serde(default = "default_exact_window")]
    exact_window_days: f64,
    #[serde(default = "default_activation_window")]
    activation_window_days: f64,
    #[serde(default)]
    cycles: Option<Vec<CycleToml>>,
}

fn default_exact_window() -> f64 {
    PhaseThresholds::default().exact_window_days
}

fn default_activation_window() -> f64 {
    PhaseThresholds::default().activation_window_days
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    returns: Option<ReturnsToml>,
}

/// Try common relative paths for `configs/returns.toml`.
pub fn read_returns_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/returns.toml", "../../configs/returns.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load returns.toml from {:?}", paths);
}

fn cycle_from_toml(entry: CycleToml) -> anyhow::Result<CycleSpec> {
    let body: Body = entry.body.parse()?;
    let cycle = match entry.kind {
        CycleKindToml::CalendarYear => ReturnCycle::CalendarYear,
        CycleKindToml::FixedPeriod => {
            let period_days = entry.period_days.ok_or_else(|| {
                anyhow::anyhow!("returns.cycles entry for {} needs period_days", body)
            })?;
            ReturnCycle::FixedPeriod { period_days }
        }
    };
    let spec = CycleSpec::new(body, cycle);
    Ok(match entry.label {
        Some(label) => spec.with_label(label),
        None => spec,
    })
}

/// Parse settings from TOML text. A missing `[returns]` section yields defaults.
pub fn parse_return_settings(text: &str) -> anyhow::Result<ReturnSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse returns.toml: {e}"))?;
    let Some(cfg) = root.returns else {
        log::debug!("No [returns] section, using default settings");
        return Ok(ReturnSettings::default());
    };

    let thresholds = PhaseThresholds::new(cfg.exact_window_days, cfg.activation_window_days)?;
    let registry = match cfg.cycles {
        Some(entries) => {
            let specs = entries
                .into_iter()
                .map(cycle_from_toml)
                .collect::<anyhow::Result<Vec<_>>>()?;
            CycleRegistry::new(specs)?
        }
        None => CycleRegistry::standard(),
    };
    if registry.is_empty() {
        log::warn!("returns.cycles is empty; no body will produce a return");
    }

    Ok(ReturnSettings {
        registry,
        thresholds,
    })
}

pub fn load_return_settings_from(path: &Path) -> anyhow::Result<ReturnSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse_return_settings(&text)
}

/// Load from the default locations, falling back to built-in settings when no file exists.
pub fn load_return_settings() -> anyhow::Result<ReturnSettings> {
    match read_returns_toml_text() {
        Ok(text) => parse_return_settings(&text),
        Err(e) => {
            log::warn!("{e}; using default return settings");
            Ok(ReturnSettings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_text_gives_defaults() {
        let settings = parse_return_settings("").unwrap();
        assert_eq!(settings.thresholds, PhaseThresholds::default());
        assert_eq!(settings.registry, CycleRegistry::standard());
    }

    #[test]
    fn test_windows_override_keeps_standard_cycles() {
        let settings = parse_return_settings(
            r#"
            [returns]
            activation_window_days = 45.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.thresholds.exact_window_days, 1.0);
        assert_eq!(settings.thresholds.activation_window_days, 45.0);
        assert!(settings.registry.lookup(Body::Saturn).is_some());
    }

    #[test]
    fn test_custom_cycle_table() {
        let settings = parse_return_settings(
            r#"
            [returns]

            [[returns.cycles]]
            body = "Sun"
            label = "Solar Return"
            kind = "calendar_year"

            [[returns.cycles]]
            body = "Mars"
            kind = "fixed_period"
            period_days = 686.98
            "#,
        )
        .unwrap();
        let mars = settings.registry.lookup(Body::Mars).unwrap();
        assert_eq!(mars.label, "Mars Return");
        assert_eq!(mars.cycle, ReturnCycle::FixedPeriod { period_days: 686.98 });
        assert!(settings.registry.lookup(Body::Jupiter).is_none());
    }

    #[test]
    fn test_fixed_period_requires_period() {
        let err = parse_return_settings(
            r#"
            [[returns.cycles]]
            body = "Jupiter"
            kind = "fixed_period"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("period_days"));
    }

    #[test]
    fn test_invalid_windows_are_rejected() {
        let result = parse_return_settings(
            r#"
            [returns]
            exact_window_days = 10.0
            activation_window_days = 5.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_body_is_rejected() {
        let result = parse_return_settings(
            r#"
            [[returns.cycles]]
            body = "Nibiru"
            kind = "calendar_year"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[returns]\nexact_window_days = 2.0").unwrap();
        let settings = load_return_settings_from(file.path()).unwrap();
        assert_eq!(settings.thresholds.exact_window_days, 2.0);

        let builder: ReturnSetBuilder = settings.into();
        assert_eq!(builder.thresholds().exact_window_days, 2.0);
    }
}
