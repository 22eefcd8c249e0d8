use crate::strings;
use crate::types::Value;
use itertools::Itertools;

#[derive(Debug, Clone, Copy)]
pub enum PrintMode {
    /// Reader-friendly rendering: strings are quoted and re-escaped.
    Readable,
    /// Raw rendering, as `print` writes it: strings appear verbatim.
    Direct,
}

pub fn pr_str(value: &Value, mode: PrintMode) -> String {
    match value {
        Value::Nil => "nil".into(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Str(s) => match mode {
            PrintMode::Readable => strings::string_repr(s),
            PrintMode::Direct => s.clone(),
        },
        Value::Token(token) => token.text.clone(),
        Value::List(forms) => format!("({})", forms.iter().map(|v| pr_str(v, mode)).join(" ")),
        Value::Function(closure) => format!(
            "#<function ({})>",
            closure.parameters.iter().join(" ")
        ),
        Value::Macro(closure) => format!("#<macro ({})>", closure.parameters.iter().join(" ")),
        Value::Primitive(func) => format!("#<builtin {}>", func.name),
        Value::Special(form) => format!("#<special form {}>", form.name),
    }
}
