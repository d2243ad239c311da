use std::collections::HashMap;

use serde::Deserialize;

/// Severity assigned to a descriptor diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Off,
    Error,
    Warning,
    Info,
    Hint,
}

impl DiagnosticSeverity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticSeverity::Off => "off",
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
            DiagnosticSeverity::Hint => "hint",
        }
    }
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-code severity overrides for descriptor diagnostics.
///
/// Keys are either full codes (`TH201`) or code prefixes (`TH2`, `TH`).
/// Everything is reported as an error unless configured otherwise.
///
/// ```toml
/// [diagnostics.severity]
/// TH2 = "warning"   # all bound attribute diagnostics
/// TH201 = "off"     # except data- prefixed names, which are ignored
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub severity: HashMap<String, DiagnosticSeverity>,
}

impl DiagnosticsConfig {
    /// Resolves the severity for `code`: an exact entry wins, then the
    /// longest matching prefix, then [`DiagnosticSeverity::Error`].
    #[must_use]
    pub fn get_severity(&self, code: &str) -> DiagnosticSeverity {
        if let Some(&severity) = self.severity.get(code) {
            return severity;
        }

        self.severity
            .iter()
            .filter(|(pattern, _)| code.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map_or(DiagnosticSeverity::Error, |(_, &severity)| severity)
    }

    #[must_use]
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_severity(code) != DiagnosticSeverity::Off
    }

    /// Applies command-line style filters on top of the configured
    /// severities.
    ///
    /// A non-empty `select` turns every code off except those matching one of
    /// its entries; `ignore` entries are then turned off.
    #[must_use]
    pub fn with_filters(mut self, select: &[String], ignore: &[String]) -> Self {
        if !select.is_empty() {
            // the empty prefix matches every code but loses to any other key
            self.severity.insert(String::new(), DiagnosticSeverity::Off);
            for code in select {
                self.severity
                    .entry(code.clone())
                    .and_modify(|severity| {
                        if *severity == DiagnosticSeverity::Off {
                            *severity = DiagnosticSeverity::Error;
                        }
                    })
                    .or_insert(DiagnosticSeverity::Error);
            }
        }
        for code in ignore {
            self.severity.insert(code.clone(), DiagnosticSeverity::Off);
        }
        self
    }
}
