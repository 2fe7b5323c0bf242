//! Declarative job model consumed by the renderer and the execution adapter

use indexmap::IndexMap;

/// A single value carried by a job mapping entry.
///
/// "Absent" is not a variant: an omitted argument is simply never inserted
/// into its mapping (see the `*_opt` builder methods on [`JobSpec`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Structured description of one unit of work.
///
/// Mapping keys are unique and insertion order is the rendering order; a
/// spec is built once per invocation and never reused.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub name: String,
    pub inputs: IndexMap<String, Value>,
    pub outputs: IndexMap<String, Value>,
    pub params: IndexMap<String, Value>,
    pub threads: u32,
    /// Locator of the engine-side wrapper that performs the real work
    pub wrapper: String,
    /// Raw text appended verbatim after the rendered rule
    pub extra_text: Option<String>,
}

impl JobSpec {
    pub fn new(name: impl Into<String>, wrapper: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
            params: IndexMap::new(),
            threads: 1,
            wrapper: wrapper.into(),
            extra_text: None,
        }
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

    /// Insert an input only when a value is present
    pub fn input_opt(self, key: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.input(key, v),
            None => self,
        }
    }

    /// Insert an output only when a value is present
    pub fn output_opt(self, key: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.output(key, v),
            None => self,
        }
    }

    /// Insert a param only when a value is present
    pub fn param_opt(self, key: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Thread hint forwarded to the engine; clamped to at least 1
    pub fn threads(mut self, threads: u32) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn extra(mut self, text: impl Into<String>) -> Self {
        self.extra_text = Some(text.into());
        self
    }
}
