use {
    serde::Serialize,
    std::{collections::BTreeMap, fmt},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for FormMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Instruction for the caller to send the user's browser to the bank.
/// Rendering (auto-submitting HTML form, JSON for a SPA) is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectionForm {
    action: String,
    method: FormMethod,
    inputs: BTreeMap<String, String>,
}

impl RedirectionForm {
    pub fn new(action: impl Into<String>, method: FormMethod) -> Self {
        Self {
            action: action.into(),
            method,
            inputs: BTreeMap::new(),
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn method(&self) -> FormMethod {
        self.method
    }

    pub fn inputs(&self) -> &BTreeMap<String, String> {
        &self.inputs
    }

    pub fn input(&self, name: &str) -> Option<&str> {
        self.inputs.get(name).map(String::as_str)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "action": self.action,
            "method": self.method.as_str(),
            "inputs": self.inputs,
        })
    }
}
