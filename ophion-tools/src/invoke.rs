//! Generic binder from caller-supplied arguments to a [`JobSpec`]

use crate::descriptor::ToolDescriptor;
use crate::registry::get_tool;
use anyhow::Result;
use indexmap::IndexMap;
use ophion_engine::{EngineDriver, JobSpec, RunMode, RunOutcome, Value};
use ophion_core::{OphionError, OphionResult};
use tracing::debug;

/// Caller-supplied arguments for one tool invocation.
///
/// Insertion order of each map is preserved into the rendered rule. Absent
/// arguments are simply never inserted.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    pub inputs: IndexMap<String, Value>,
    pub outputs: IndexMap<String, Value>,
    pub params: IndexMap<String, Value>,
    pub threads: Option<u32>,
    pub extra: Option<String>,
}

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    pub fn output(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.outputs.insert(key.into(), value.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Raw text appended verbatim after the rendered rule
    pub fn extra(mut self, text: impl Into<String>) -> Self {
        self.extra = Some(text.into());
        self
    }
}

/// Validate one role's arguments against its slots
fn check_role(
    tool: &str,
    role: &str,
    slots: &[crate::descriptor::Slot],
    supplied: &IndexMap<String, Value>,
) -> OphionResult<()> {
    for key in supplied.keys() {
        if !slots.iter().any(|s| &s.key == key) {
            return Err(OphionError::InvalidInput(format!(
                "unknown {} '{}' for tool '{}' (expected one of: {})",
                role,
                key,
                tool,
                slots
                    .iter()
                    .map(|s| s.key.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )));
        }
    }

    let missing = ToolDescriptor::missing_required(slots, |key| supplied.contains_key(key));
    if !missing.is_empty() {
        return Err(OphionError::InvalidInput(format!(
            "missing required {}(s) for tool '{}': {}",
            role,
            tool,
            missing.join(", "),
        )));
    }

    Ok(())
}

/// Bind caller arguments to a job, validating them against the descriptor.
///
/// Caller insertion order is preserved; the descriptor only decides which
/// keys are legal and which are mandatory.
pub fn bind(descriptor: &ToolDescriptor, args: &ToolArgs) -> OphionResult<JobSpec> {
    check_role(&descriptor.name, "input", &descriptor.inputs, &args.inputs)?;
    check_role(&descriptor.name, "output", &descriptor.outputs, &args.outputs)?;
    check_role(&descriptor.name, "param", &descriptor.params, &args.params)?;

    let mut spec = JobSpec::new(&descriptor.name, &descriptor.wrapper)
        .threads(args.threads.unwrap_or(descriptor.default_threads));

    for (key, value) in &args.inputs {
        spec = spec.input(key, value.clone());
    }
    for (key, value) in &args.outputs {
        spec = spec.output(key, value.clone());
    }
    for (key, value) in &args.params {
        spec = spec.param(key, value.clone());
    }
    if let Some(extra) = &args.extra {
        spec = spec.extra(extra.clone());
    }

    Ok(spec)
}

/// The single generic invocation path: look up a tool, bind its arguments,
/// and hand the job to the engine driver.
pub fn invoke(
    driver: &EngineDriver,
    tool: &str,
    args: &ToolArgs,
    mode: RunMode,
) -> Result<RunOutcome> {
    let descriptor = get_tool(tool)
        .ok_or_else(|| OphionError::NotFound(format!("tool '{}'", tool)))?;
    let spec = bind(descriptor, args)?;
    debug!(tool = %tool, wrapper = %descriptor.wrapper, "bound tool arguments");

    driver.run(&spec, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bwa() -> &'static ToolDescriptor {
        get_tool("bwa_mem").unwrap()
    }

    fn valid_args() -> ToolArgs {
        ToolArgs::new()
            .input("reads", vec!["r1.fq", "r2.fq"])
            .input("idx", "genome.fa")
            .output("bam", "aln.bam")
            .param("extra", "-M")
    }

    #[test]
    fn test_bind_happy_path() {
        let spec = bind(bwa(), &valid_args()).unwrap();

        assert_eq!(spec.name, "bwa_mem");
        assert_eq!(spec.wrapper, "v1.21.0/bio/bwa/mem");
        assert_eq!(spec.threads, 8);
        assert_eq!(
            spec.inputs.keys().collect::<Vec<_>>(),
            vec!["reads", "idx"]
        );
        assert_eq!(spec.params["extra"], Value::Str("-M".to_string()));
    }

    #[test]
    fn test_bind_preserves_caller_order() {
        let args = ToolArgs::new()
            .input("idx", "genome.fa")
            .input("reads", "r1.fq")
            .output("bam", "aln.bam");

        let spec = bind(bwa(), &args).unwrap();
        assert_eq!(
            spec.inputs.keys().collect::<Vec<_>>(),
            vec!["idx", "reads"]
        );
    }

    #[test]
    fn test_bind_rejects_missing_required() {
        let args = ToolArgs::new().input("reads", "r1.fq");
        let err = bind(bwa(), &args).unwrap_err();

        match err {
            OphionError::InvalidInput(msg) => {
                assert!(msg.contains("missing required input"));
                assert!(msg.contains("idx"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_rejects_unknown_key() {
        let args = valid_args().param("no_such_param", "x");
        let err = bind(bwa(), &args).unwrap_err();

        match err {
            OphionError::InvalidInput(msg) => {
                assert!(msg.contains("unknown param 'no_such_param'"));
                assert!(msg.contains("bwa_mem"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_threads_override() {
        let spec = bind(bwa(), &valid_args().threads(2)).unwrap();
        assert_eq!(spec.threads, 2);
    }

    #[test]
    fn test_invoke_unknown_tool() {
        let driver = EngineDriver::new(Default::default());
        let err = invoke(&driver, "no_such_tool", &ToolArgs::new(), RunMode::Preview)
            .unwrap_err();

        let not_found = err.downcast_ref::<OphionError>().unwrap();
        assert!(matches!(not_found, OphionError::NotFound(_)));
    }

    #[test]
    fn test_invoke_preview_renders_bound_job() {
        let driver = EngineDriver::new(Default::default());
        let outcome = invoke(&driver, "bwa_mem", &valid_args(), RunMode::Preview).unwrap();

        match outcome {
            RunOutcome::Previewed(preview) => {
                assert!(preview.rule_text.starts_with("rule bwa_mem:"));
                assert!(preview
                    .rule_text
                    .contains("reads=[r\"r1.fq\", r\"r2.fq\"],"));
                assert!(preview
                    .rule_text
                    .contains("wrapper: r\"v1.21.0/bio/bwa/mem\""));
            }
            RunOutcome::Completed(_) => panic!("preview must not complete a run"),
        }
    }
}
