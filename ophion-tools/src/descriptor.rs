//! Declarative schema of a wrapped tool

use serde::{Deserialize, Serialize};

/// One named argument slot, mapped to an input/output/param role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub key: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub about: String,
}

/// Declarative description of one wrapped tool.
///
/// The wrapper field is the engine-side locator that performs the real
/// work; the slot lists are the complete set of keys the binder accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub about: String,
    pub wrapper: String,
    #[serde(default)]
    pub inputs: Vec<Slot>,
    #[serde(default)]
    pub outputs: Vec<Slot>,
    #[serde(default)]
    pub params: Vec<Slot>,
    #[serde(default = "default_threads")]
    pub default_threads: u32,
}

fn default_threads() -> u32 {
    1
}

impl ToolDescriptor {
    fn find(slots: &[Slot], key: &str) -> bool {
        slots.iter().any(|s| s.key == key)
    }

    pub fn has_input(&self, key: &str) -> bool {
        Self::find(&self.inputs, key)
    }

    pub fn has_output(&self, key: &str) -> bool {
        Self::find(&self.outputs, key)
    }

    pub fn has_param(&self, key: &str) -> bool {
        Self::find(&self.params, key)
    }

    /// Required slot keys of one role that are missing from `present`
    pub fn missing_required<'a>(
        slots: &'a [Slot],
        present: impl Fn(&str) -> bool,
    ) -> Vec<&'a str> {
        slots
            .iter()
            .filter(|s| s.required && !present(&s.key))
            .map(|s| s.key.as_str())
            .collect()
    }
}
