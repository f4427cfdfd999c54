use core::fmt;

use serde::{Deserialize, Serialize};

/// Thresholds for flagging overflow and overlap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Overflow must exceed this fraction of the available height...
    pub overflow_ratio: f32,
    /// ...and this many inches before it is reported.
    pub overflow_min: f32,
    /// Overlaps thinner than this (in either direction) are ignored.
    pub min_overlap: f32,
    /// Above this many inches an issue is severe.
    pub severe_above: f32,
    /// Above this many inches an issue is moderate.
    pub moderate_above: f32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            overflow_ratio: 0.15,
            overflow_min: 0.05,
            min_overlap: 0.10,
            severe_above: 0.5,
            moderate_above: 0.2,
        }
    }
}

impl AuditConfig {
    /// Overflow tolerance for a frame with `available` inches of text room.
    pub fn tolerance(&self, available: f32) -> f32 {
        (available * self.overflow_ratio).max(self.overflow_min)
    }

    pub fn severity(&self, inches: f32) -> Severity {
        if inches > self.severe_above {
            Severity::Severe
        } else if inches > self.moderate_above {
            Severity::Moderate
        } else {
            Severity::Minor
        }
    }
}

/// Fixed-threshold issue tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "MINOR",
            Self::Moderate => "MODERATE",
            Self::Severe => "SEVERE",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_boundaries_are_exclusive() {
        let cfg = AuditConfig::default();
        assert_eq!(cfg.severity(0.2), Severity::Minor);
        assert_eq!(cfg.severity(0.21), Severity::Moderate);
        assert_eq!(cfg.severity(0.5), Severity::Moderate);
        assert_eq!(cfg.severity(0.51), Severity::Severe);
        assert_eq!(Severity::Severe.to_string(), "SEVERE");
    }

    #[test]
    fn tolerance_has_an_absolute_floor() {
        let cfg = AuditConfig::default();
        assert!((cfg.tolerance(0.2) - 0.05).abs() < 1e-6);
        assert!((cfg.tolerance(2.0) - 0.3).abs() < 1e-6);
    }
}
