//! Serialization of a [`JobSpec`] into the engine's rule-text grammar
//!
//! The grammar is Python-flavored: strings become raw literals (`r"..."`)
//! so path backslashes survive the engine's parser byte-for-byte, booleans
//! render as `True`/`False`, and floats always keep a decimal point. A
//! string containing the `"` delimiter itself is not representable in this
//! grammar and is not escaped.

use crate::job::{JobSpec, Value};
use indexmap::IndexMap;

/// Format a single value as a grammar literal.
///
/// Sequences format recursively, each element by its own type rule. This
/// cannot fail: the [`Value`] enum is closed over the supported variants.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("r\"{}\"", s),
        Value::Int(n) => n.to_string(),
        Value::Float(x) => {
            if x.is_finite() && x.fract() == 0.0 {
                // Keep the decimal point so the engine parses a float
                format!("{:.1}", x)
            } else {
                x.to_string()
            }
        }
        Value::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Value::List(items) => {
            let rendered: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", rendered.join(", "))
        }
    }
}

/// Render the full rule block for a job.
///
/// Deterministic: identical field values and mapping insertion order yield
/// byte-identical output. Mapping order is the caller's insertion order,
/// never re-sorted.
pub fn render(spec: &JobSpec) -> String {
    let mut out = String::new();
    out.push_str(&format!("rule {}:\n", spec.name));

    render_section(&mut out, "input", "inputs", &spec.inputs);
    render_section(&mut out, "output", "outputs", &spec.outputs);
    render_section(&mut out, "params", "params", &spec.params);

    out.push_str(&format!("    threads: {}\n", spec.threads));
    out.push_str(&format!(
        "    wrapper: {}\n",
        format_value(&Value::Str(spec.wrapper.clone()))
    ));

    if let Some(extra) = &spec.extra_text {
        out.push_str(extra);
    }

    out
}

/// Render one keyed section, or its placeholder comment when empty.
///
/// An empty mapping must still leave a visible trace in the text, but a
/// dangling section header is not valid in the engine's grammar, so the
/// placeholder comment replaces the whole block.
fn render_section(out: &mut String, header: &str, plural: &str, map: &IndexMap<String, Value>) {
    if map.is_empty() {
        out.push_str(&format!("    # no {}\n", plural));
        return;
    }

    out.push_str(&format!("    {}:\n", header));
    for (key, value) in map {
        out.push_str(&format!("        {}={},\n", key, format_value(value)));
    }
}
