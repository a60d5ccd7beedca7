//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Aligned pinned-package listing with direct/transitive labels
//! - Conflict display with the strategy used and ignored constraints
//! - Unresolved package and warning sections
//! - Release dates and per-candidate diagnostics in verbose mode

use crate::domain::{PackageConflict, ResolutionResult, ResolvedPackage};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, text: &str, painter: fn(&str) -> colored::ColoredString) -> String {
        if self.color {
            painter(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_package_line(
        &self,
        package: &ResolvedPackage,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = format!("{:width$}", package.name, width = max_name_len);
        let version = if self.color {
            package.version.to_string().bright_white().bold().to_string()
        } else {
            package.version.to_string()
        };

        let origin = if package.is_direct {
            self.paint("direct", |s| s.green())
        } else if package.required_by.is_empty() {
            self.paint("dependency", |s| s.dimmed())
        } else {
            let via = format!("via {}", package.required_by.join(", "));
            self.paint(&via, |s| s.dimmed())
        };

        let date = match (self.verbosity, package.released_at) {
            (Verbosity::Verbose, Some(released_at)) => {
                let text = format!("  ({})", released_at.format("%Y/%m/%d"));
                self.paint(&text, |s| s.dimmed())
            }
            _ => String::new(),
        };

        writeln!(writer, "  {name}  {version:12}  {origin}{date}")
    }

    fn write_conflict(
        &self,
        conflict: &PackageConflict,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = self.paint(&conflict.package, |s| s.yellow().bold());
        match &conflict.resolution {
            Some(version) => writeln!(
                writer,
                "  {name}: picked {version} ({} strategy)",
                conflict.strategy_used
            )?,
            None => writeln!(
                writer,
                "  {name}: no version satisfies the constraints ({} strategy)",
                conflict.strategy_used
            )?,
        }

        for origin in &conflict.conflicting_constraints {
            writeln!(
                writer,
                "      {}{} required by {}",
                conflict.package, origin.constraint, origin.required_by
            )?;
        }
        for ignored in &conflict.ignored_constraints {
            let line = format!(
                "      ignored {}{} from {}",
                conflict.package, ignored.constraint, ignored.required_by
            );
            writeln!(writer, "{}", self.paint(&line, |s| s.dimmed()))?;
        }

        if self.verbosity == Verbosity::Verbose {
            for failure in &conflict.candidate_failures {
                let failed: Vec<String> = failure
                    .failed
                    .iter()
                    .map(|o| format!("{} ({})", o.constraint, o.required_by))
                    .collect();
                writeln!(
                    writer,
                    "      candidate {} fails: {}",
                    failure.version,
                    failed.join(", ")
                )?;
            }
        }

        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &ResolutionResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // Quiet mode prints just the pins, one per line
        if self.verbosity == Verbosity::Quiet {
            for package in result.packages() {
                writeln!(writer, "{}=={}", package.name, package.version)?;
            }
            return Ok(());
        }

        if result.resolved.is_empty() {
            writeln!(writer, "{}", self.paint("No packages resolved.", |s| s.red()))?;
        } else {
            let header = format!(
                "Resolved {} packages ({} direct, {} transitive)",
                result.resolved.len(),
                result.direct_count(),
                result.transitive_count()
            );
            writeln!(writer, "{}", self.paint(&header, |s| s.bold()))?;
            writeln!(writer)?;

            let max_name_len = result
                .packages()
                .map(|p| p.name.len())
                .max()
                .unwrap_or(0);
            for package in result.packages() {
                self.write_package_line(package, max_name_len, writer)?;
            }
        }

        if !result.conflicts.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "{}", self.paint("Conflicts:", |s| s.yellow().bold()))?;
            for conflict in &result.conflicts {
                self.write_conflict(conflict, writer)?;
            }
        }

        if !result.unresolved.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "{}", self.paint("Unresolved:", |s| s.red().bold()))?;
            for name in &result.unresolved {
                writeln!(writer, "  {name}")?;
            }
        }

        if !result.warnings.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "{}", self.paint("Warnings:", |s| s.yellow()))?;
            for warning in &result.warnings {
                writeln!(writer, "  {warning}")?;
            }
        }

        Ok(())
    }
}
