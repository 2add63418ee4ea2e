use serde_json::{json, Map, Value};

use crate::core::error::ClassifyError;
use crate::domain::Card;

/// Primitive types a tool parameter may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    /// Array whose items are all of the given primitive kind.
    Array(ItemKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    String,
    Integer,
}

impl ItemKind {
    fn json_type(self) -> &'static str {
        match self {
            ItemKind::String => "string",
            ItemKind::Integer => "integer",
        }
    }

    fn coerce(self, v: &Value) -> Option<Value> {
        match self {
            ItemKind::String => v.is_string().then(|| v.clone()),
            ItemKind::Integer => coerce_integer(v).map(Value::from),
        }
    }
}

/// Lax integer reading: JSON integers, integral floats (`1813.0`) and
/// base-10 strings (`"1813"`). Fractions, bools and null are rejected.
fn coerce_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64().filter(|_| n.is_f64())?;
            let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
            (f.fract() == 0.0 && in_range).then_some(f as i64)
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

impl ParamKind {
    fn schema(self) -> Value {
        match self {
            ParamKind::String => json!({ "type": "string" }),
            ParamKind::Integer => json!({ "type": "integer" }),
            ParamKind::Array(item) => json!({ "type": "array", "items": { "type": item.json_type() } }),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Array(ItemKind::String) => "array of string",
            ParamKind::Array(ItemKind::Integer) => "array of integer",
        }
    }

    /// Checks a decoded value against this kind and returns it in canonical form;
    /// on failure returns the offending item index, if any.
    fn coerce(self, v: &Value) -> Result<Value, Option<usize>> {
        match self {
            ParamKind::String if v.is_string() => Ok(v.clone()),
            ParamKind::Integer => coerce_integer(v).map(Value::from).ok_or(None),
            ParamKind::Array(item) => {
                let arr = v.as_array().ok_or(None)?;
                arr.iter()
                    .enumerate()
                    .map(|(i, x)| item.coerce(x).ok_or(Some(i)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            _ => Err(None),
        }
    }
}

/// One required parameter of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
}

impl Param {
    pub const fn new(name: &'static str, kind: ParamKind) -> Self {
        Self { name, kind }
    }
}

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn params(&self) -> &'static [Param];

    /// JSON Schema for the tool's arguments. Every declared parameter is required.
    fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params()
            .iter()
            .map(|p| (p.name.to_string(), p.kind.schema()))
            .collect();
        let required: Vec<&str> = self.params().iter().map(|p| p.name).collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// The tool object in the shape chat-completion providers expect.
    fn as_openai_tool(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.input_schema(),
            }
        })
    }

    /// Presence and type check of decoded arguments against `params()`.
    /// Integer parameters are normalised to JSON integers; keys not declared
    /// by the tool are dropped.
    fn normalize(&self, args: Value) -> Result<Value, ClassifyError> {
        let fail = |field: &str, reason: String| ClassifyError::Validation {
            tool: self.name().to_string(),
            field: field.to_string(),
            reason,
        };
        let obj = args
            .as_object()
            .ok_or_else(|| fail("$", format!("expected an object, got {}", kind_of(&args))))?;
        let mut out = Map::new();
        for p in self.params() {
            let v = obj
                .get(p.name)
                .ok_or_else(|| fail(p.name, "missing required field".into()))?;
            let value = p.kind.coerce(v).map_err(|idx| match idx {
                Some(i) => fail(
                    p.name,
                    format!("item {i} is not a valid element of {}", p.kind.describe()),
                ),
                None => fail(p.name, format!("expected {}, got {}", p.kind.describe(), kind_of(v))),
            })?;
            out.insert(p.name.to_string(), value);
        }
        Ok(Value::Object(out))
    }
}

/// A tool the model may call to produce a [`Card`].
pub trait CardTool: ToolSpec + Send + Sync {
    /// Builds the card from arguments already passed through [`ToolSpec::normalize`].
    fn build(&self, args: Value) -> Result<Card, ClassifyError>;

    fn construct(&self, args: Value) -> Result<Card, ClassifyError> {
        let args = self.normalize(args)?;
        self.build(args)
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
