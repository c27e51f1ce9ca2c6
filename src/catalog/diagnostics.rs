//! Catalog drift report. Nothing here is fatal: the catalog is always built,
//! and the report tells the caller what was skipped or guessed.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Item has passive text but no registry entry.
    UnrecognizedPassive,
    /// Registry entry whose item never made it into the catalog.
    UnusedPassive,
    /// `ChildItemId` pointed at an unknown item or looped back on itself.
    BrokenPriceChain,
    /// A recognised stat row whose value could not be parsed.
    MalformedStatValue,
    /// No roster entry has the requested role.
    EmptyRoster,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            // Superseded base items (Transcendence under Evolved Transcendence)
            // land here routinely.
            Self::UnusedPassive => Severity::Info,
            _ => Severity::Warning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnrecognizedPassive => "unrecognized passive",
            Self::UnusedPassive => "unused passive",
            Self::BrokenPriceChain => "broken price chain",
            Self::MalformedStatValue => "malformed stat value",
            Self::EmptyRoster => "empty roster",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Item name, or the role for roster diagnostics.
    pub context: String,
    pub message: String,
}

impl fmt::Display for CatalogDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.severity, self.kind, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticsReport {
    pub diagnostics: Vec<CatalogDiagnostic>,
}

impl DiagnosticsReport {
    /// Records a diagnostic and logs it.
    pub fn push(&mut self, kind: DiagnosticKind, context: impl Into<String>, message: impl Into<String>) {
        let diagnostic = CatalogDiagnostic {
            kind,
            severity: kind.severity(),
            context: context.into(),
            message: message.into(),
        };
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(
                kind = %diagnostic.kind,
                context = %diagnostic.context,
                "{}",
                diagnostic.message
            ),
            Severity::Info => tracing::info!(
                kind = %diagnostic.kind,
                context = %diagnostic.context,
                "{}",
                diagnostic.message
            ),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == Severity::Warning)
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &CatalogDiagnostic> + '_ {
        self.diagnostics.iter().filter(move |diag| diag.kind == kind)
    }

    pub fn contains(&self, kind: DiagnosticKind, context: &str) -> bool {
        self.of_kind(kind).any(|diag| diag.context == context)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogDiagnostic> + '_ {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
