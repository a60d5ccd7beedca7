//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the resolution result
//! - A summary block with direct/transitive/conflict counts

use crate::domain::ResolutionResult;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Summary statistics
    summary: JsonSummary,
    /// The resolution result itself
    #[serde(flatten)]
    result: &'a ResolutionResult,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Total number of pinned packages
    resolved: usize,
    /// Packages the user asked for directly
    direct: usize,
    /// Packages pulled in as dependencies
    transitive: usize,
    /// Number of conflicts encountered
    conflicts: usize,
    /// Number of packages without a pin
    unresolved: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &ResolutionResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            summary: JsonSummary {
                resolved: result.resolved.len(),
                direct: result.direct_count(),
                transitive: result.transitive_count(),
                conflicts: result.conflicts.len(),
                unresolved: result.unresolved.len(),
            },
            result,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResolvedPackage, Version};

    fn sample_result() -> ResolutionResult {
        let mut result = ResolutionResult::new();
        result.resolved.insert(
            "flask".to_string(),
            ResolvedPackage {
                name: "flask".to_string(),
                version: Version::parse("2.3.2").unwrap(),
                is_direct: true,
                required_by: Vec::new(),
                released_at: None,
            },
        );
        result.unresolved.insert("doesnotexist123".to_string());
        result
    }

    #[test]
    fn test_json_output_is_valid() {
        let formatter = JsonFormatter::new();
        let mut buffer = Vec::new();
        formatter.format(&sample_result(), &mut buffer).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["summary"]["resolved"], 1);
        assert_eq!(parsed["summary"]["direct"], 1);
        assert_eq!(parsed["summary"]["unresolved"], 1);
        assert_eq!(parsed["resolved"]["flask"]["version"], "2.3.2");
        assert_eq!(parsed["unresolved"][0], "doesnotexist123");
    }

    #[test]
    fn test_json_output_empty_result() {
        let formatter = JsonFormatter::new();
        let mut buffer = Vec::new();
        formatter.format(&ResolutionResult::new(), &mut buffer).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["summary"]["resolved"], 0);
        assert!(parsed["resolved"].as_object().unwrap().is_empty());
    }
}
