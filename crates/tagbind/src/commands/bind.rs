use anyhow::Result;
use clap::Parser;
use tagbind_descriptors::RequiredAttributeDescriptor;
use tagbind_descriptors::TagMatchingRuleDescriptor;
use tagbind_descriptors::ValueComparison;
use tagbind_semantic::TagHelperBinderCache;
use tagbind_semantic::TagHelperBinding;

use crate::args::Args;
use crate::commands::plural;
use crate::commands::CatalogArgs;
use crate::commands::Command;
use crate::commands::Project;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Bind {
    /// Element name as written in markup, including any prefix.
    tag: String,

    /// Attribute present on the element, `name=value` or a bare `name`.
    #[arg(long = "attr", value_name = "NAME[=VALUE]", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Name of the enclosing element.
    #[arg(long)]
    parent: Option<String>,

    /// The enclosing element was itself bound to a tag helper.
    #[arg(long, requires = "parent")]
    parent_is_tag_helper: bool,

    /// Prefix tag helper elements must carry. Overrides the configured prefix.
    #[arg(long)]
    prefix: Option<String>,

    #[command(flatten)]
    catalogs: CatalogArgs,
}

impl Command for Bind {
    fn execute(&self, _args: &Args, project: &Project) -> Result<Exit> {
        let collection = project.load_collection(&self.catalogs)?;
        let prefix = self.prefix.as_deref().or(project.settings.prefix.as_deref());

        let binder = TagHelperBinderCache::global().get_or_create(prefix, &collection);
        let Some(binding) = binder.get_binding(
            &self.tag,
            &self.attributes,
            self.parent.as_deref(),
            self.parent_is_tag_helper,
        ) else {
            let message = format!("No tag helpers matched <{}>.", self.tag);
            return Ok(Exit::error().with_message(message));
        };

        print!("{}", render_binding(&binding));
        let count = binding.len();
        Ok(Exit::success().with_message(format!(
            "Matched {count} {}.",
            plural(count, "tag helper", "tag helpers")
        )))
    }
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw.split_once('=').unwrap_or((raw, ""));
    if name.is_empty() {
        return Err(format!("attribute `{raw}` has no name"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn render_binding(binding: &TagHelperBinding) -> String {
    let mut out = String::new();
    for bound in binding {
        let descriptor = bound.descriptor();
        out.push_str(&format!(
            "{} ({}, {})\n",
            descriptor.display_name(),
            descriptor.kind(),
            descriptor.assembly_name()
        ));
        for rule in bound.rules() {
            out.push_str(&format!("  rule: {}\n", render_rule(rule)));
        }
    }
    if binding.is_attribute_match() {
        out.push_str("(attribute match only)\n");
    }
    out
}

fn render_rule(rule: &TagMatchingRuleDescriptor) -> String {
    let mut rendered = format!("<{}", rule.tag_name());
    for attribute in rule.attributes() {
        rendered.push(' ');
        rendered.push_str(&render_required_attribute(attribute));
    }
    rendered.push('>');
    if let Some(parent) = rule.parent_tag() {
        rendered.push_str(&format!(" in <{parent}>"));
    }
    rendered
}

fn render_required_attribute(attribute: &RequiredAttributeDescriptor) -> String {
    match (attribute.value(), attribute.value_comparison()) {
        (Some(value), ValueComparison::FullMatch) => {
            format!("{}=\"{value}\"", attribute.display_name())
        }
        (Some(value), ValueComparison::PrefixMatch) => {
            format!("{}^=\"{value}\"", attribute.display_name())
        }
        (Some(value), ValueComparison::SuffixMatch) => {
            format!("{}$=\"{value}\"", attribute.display_name())
        }
        _ => attribute.display_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("type=checkbox"),
            Ok(("type".to_string(), "checkbox".to_string()))
        );
        assert_eq!(
            parse_attribute("asp-for"),
            Ok(("asp-for".to_string(), String::new()))
        );
        assert_eq!(
            parse_attribute("data-x=a=b"),
            Ok(("data-x".to_string(), "a=b".to_string()))
        );
        assert!(parse_attribute("=value").is_err());
    }
}
