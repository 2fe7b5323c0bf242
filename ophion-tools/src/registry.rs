//! Built-in tool registry
//!
//! Descriptors are embedded at compile time and parsed once on first use.

use crate::descriptor::ToolDescriptor;
use indexmap::IndexMap;
use std::sync::OnceLock;

const BUILTIN_TOOLS: &str = include_str!("builtin_tools.toml");

static REGISTRY: OnceLock<IndexMap<String, ToolDescriptor>> = OnceLock::new();

#[derive(serde::Deserialize)]
struct RegistryFile {
    #[serde(default)]
    tool: Vec<ToolDescriptor>,
}

fn registry() -> &'static IndexMap<String, ToolDescriptor> {
    REGISTRY.get_or_init(|| {
        // A malformed embedded table is a build defect, not a runtime condition
        let parsed: RegistryFile =
            toml::from_str(BUILTIN_TOOLS).expect("builtin tool descriptors are valid TOML");

        parsed
            .tool
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect()
    })
}

/// Look up a descriptor by tool name
pub fn get_tool(name: &str) -> Option<&'static ToolDescriptor> {
    registry().get(name)
}

/// Names of all registered tools, in registry order
pub fn tool_names() -> Vec<&'static str> {
    registry().keys().map(|k| k.as_str()).collect()
}

/// All registered descriptors, in registry order
pub fn all_tools() -> impl Iterator<Item = &'static ToolDescriptor> {
    registry().values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_descriptors_parse() {
        assert!(!tool_names().is_empty());
    }

    #[test]
    fn test_lookup_known_tool() {
        let bwa = get_tool("bwa_mem").expect("bwa_mem is a builtin tool");
        assert_eq!(bwa.wrapper, "v1.21.0/bio/bwa/mem");
        assert!(bwa.has_input("reads"));
        assert_eq!(bwa.default_threads, 8);
    }

    #[test]
    fn test_lookup_unknown_tool() {
        assert!(get_tool("no_such_tool").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let names = tool_names();
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn test_every_tool_has_a_wrapper_locator() {
        for tool in all_tools() {
            assert!(
                !tool.wrapper.is_empty(),
                "tool '{}' is missing a wrapper locator",
                tool.name
            );
        }
    }
}
