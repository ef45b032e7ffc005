use std::collections::HashMap;

use crate::{
    error::ShellError,
    value::{Host, Value, ValueType},
};

/// Session state shared by every command: bound variables and the active host.
///
/// The active host is itself a variable. The environment remembers which
/// binding it is, so header edits made through [`Environment::host_mut`] are
/// visible wherever that host is looked up.
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
    current_host: Option<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `name`, or drop the binding when the value is falsy.
    ///
    /// # Examples
    ///
    /// ```
    /// use httpsh::{Environment, Value};
    ///
    /// let mut env = Environment::new();
    /// env.bind("greeting", Value::text("hi"));
    /// assert!(env.lookup("greeting", None).is_ok());
    ///
    /// env.bind("greeting", Value::Null);
    /// assert!(env.lookup("greeting", None).is_err());
    /// ```
    pub fn bind(&mut self, name: &str, value: Value) -> Value {
        if value.is_truthy() {
            self.variables.insert(name.to_string(), value.clone());
        } else {
            self.unbind(name);
        }
        value
    }

    /// Remove a binding, returning what it held.
    pub fn unbind(&mut self, name: &str) -> Option<Value> {
        let removed = self.variables.remove(name);
        if removed.is_some() && self.current_host.as_deref() == Some(name) {
            self.current_host = None;
        }
        removed
    }

    /// Find a variable, optionally insisting on its type.
    pub fn lookup(&self, name: &str, expected: Option<ValueType>) -> Result<&Value, ShellError> {
        let value = self
            .variables
            .get(name)
            .ok_or_else(|| ShellError::NotFound(format!("no variable named: {}", name)))?;

        match expected {
            Some(expected) if value.value_type() != Some(expected) => {
                Err(ShellError::TypeMismatch {
                    name: name.to_string(),
                    actual: value.type_name(),
                    expected,
                })
            }
            _ => Ok(value),
        }
    }

    /// All variables sorted by name.
    pub fn variables(&self) -> Vec<(&str, &Value)> {
        let mut vars: Vec<_> = self
            .variables
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }

    pub fn host(&self) -> Option<&Host> {
        let alias = self.current_host.as_deref()?;
        self.variables.get(alias).and_then(Value::as_host)
    }

    pub fn host_mut(&mut self) -> Option<&mut Host> {
        let alias = self.current_host.as_deref()?;
        match self.variables.get_mut(alias) {
            Some(Value::Host(host)) => Some(host),
            _ => None,
        }
    }

    /// The variable name of the active host.
    pub fn host_alias(&self) -> Option<&str> {
        self.host()?;
        self.current_host.as_deref()
    }

    /// Make the host bound to `name` the active one.
    pub fn switch_host(&mut self, name: &str) -> Result<&Host, ShellError> {
        self.lookup(name, Some(ValueType::Host))?;
        self.current_host = Some(name.to_string());
        self.host()
            .ok_or_else(|| ShellError::NotFound(format!("no host named: {}", name)))
    }

    /// Bind a new host under its alias and activate it.
    pub fn add_host(&mut self, host: Host) {
        let alias = host.alias.clone();
        self.variables.insert(alias.clone(), Value::Host(host));
        self.current_host = Some(alias);
    }
}
