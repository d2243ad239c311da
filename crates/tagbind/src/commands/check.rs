use anyhow::Result;
use clap::Parser;
use tagbind_conf::DiagnosticsConfig;
use tagbind_descriptors::TagHelperCollection;

use crate::args::Args;
use crate::commands::plural;
use crate::commands::CatalogArgs;
use crate::commands::Command;
use crate::commands::Project;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Check {
    #[command(flatten)]
    catalogs: CatalogArgs,

    /// Select specific diagnostic codes or prefixes to enable (e.g. TH1,TH201).
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Ignore specific diagnostic codes or prefixes (e.g. TH300,TH301).
    #[arg(long, value_delimiter = ',')]
    ignore: Vec<String>,
}

impl Command for Check {
    fn execute(&self, _args: &Args, project: &Project) -> Result<Exit> {
        let collection = project.load_collection(&self.catalogs)?;
        let config = project
            .settings
            .diagnostics
            .clone()
            .with_filters(&self.select, &self.ignore);

        let report = collect_diagnostics(&collection, &config);
        for line in &report.lines {
            println!("{line}");
        }

        if report.lines.is_empty() {
            return Ok(Exit::success());
        }

        let count = report.lines.len();
        let descriptors = report.descriptors;
        Ok(Exit::error().with_message(format!(
            "Found {count} {} in {descriptors} {}.",
            plural(count, "diagnostic", "diagnostics"),
            plural(descriptors, "tag helper", "tag helpers"),
        )))
    }
}

#[derive(Debug, Default)]
struct Report {
    lines: Vec<String>,
    descriptors: usize,
}

fn collect_diagnostics(collection: &TagHelperCollection, config: &DiagnosticsConfig) -> Report {
    let mut report = Report::default();
    for descriptor in collection {
        let before = report.lines.len();
        for diagnostic in descriptor.all_diagnostics() {
            let code = diagnostic.code();
            if !config.is_enabled(code) {
                continue;
            }
            report.lines.push(format!(
                "{}: {}[{code}] {}",
                descriptor.display_name(),
                config.get_severity(code),
                diagnostic.message()
            ));
        }
        if report.lines.len() > before {
            report.descriptors += 1;
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tagbind_conf::DiagnosticSeverity;
    use tagbind_descriptors::TagHelperDescriptorBuilder;
    use tagbind_descriptors::TagHelperKind;

    use super::*;

    fn broken_collection() -> TagHelperCollection {
        let mut builder =
            TagHelperDescriptorBuilder::new(TagHelperKind::Default, "BrokenTagHelper", "Tests");
        builder
            .tag_matching_rule(|rule| {
                rule.tag_name("bro ken");
            })
            .bound_attribute(|attribute| {
                attribute.name("data-x").property_name("DataX").type_name("System.String");
            });
        TagHelperCollection::create(vec![builder.build()])
    }

    #[test]
    fn test_all_enabled_by_default() {
        let report = collect_diagnostics(&broken_collection(), &DiagnosticsConfig::default());
        assert_eq!(report.descriptors, 1);
        assert!(!report.lines.is_empty());
        assert!(report.lines.iter().all(|line| line.starts_with("BrokenTagHelper: error[")));
    }

    #[test]
    fn test_ignore_everything() {
        let config = DiagnosticsConfig::default().with_filters(&[], &["TH".to_string()]);
        let report = collect_diagnostics(&broken_collection(), &config);
        assert!(report.lines.is_empty());
        assert_eq!(report.descriptors, 0);
    }

    #[test]
    fn test_configured_severity_is_shown() {
        let config = DiagnosticsConfig {
            severity: HashMap::from([("TH1".to_string(), DiagnosticSeverity::Warning)]),
        };
        let report = collect_diagnostics(&broken_collection(), &config);
        assert!(report.lines.iter().any(|line| line.contains("warning[TH1")));
    }
}
