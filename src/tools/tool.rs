use super::news::GetNewsParams;
use schemars::JsonSchema;
use serde_json::Value;

/// The closed set of functions the assistant may call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GetNews,
}

impl ToolKind {
    /// Every supported tool, in declaration order
    pub fn all() -> &'static [ToolKind] {
        &[ToolKind::GetNews]
    }

    /// Resolve a function name by exact match
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }

    /// The name of the tool (used in function calls)
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::GetNews => "get_news",
        }
    }

    /// A description of what the tool does
    pub fn description(self) -> &'static str {
        match self {
            ToolKind::GetNews => "Get the list of articles/news for the given topic.",
        }
    }

    /// JSON Schema for the tool's parameters
    pub fn parameters_schema(self) -> Value {
        match self {
            ToolKind::GetNews => schema_value::<GetNewsParams>(),
        }
    }

    /// Function declaration in the assistants tool format
    pub fn to_openai_tool(self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters_schema()
            }
        })
    }
}

/// Declarations for every supported tool
pub fn openai_tools() -> Vec<Value> {
    ToolKind::all()
        .iter()
        .map(|kind| kind.to_openai_tool())
        .collect()
}

fn schema_value<T: JsonSchema>() -> Value {
    let root = schemars::schema_for!(T);
    let mut value = serde_json::to_value(root).unwrap_or_else(|_| {
        serde_json::json!({
            "type": "object"
        })
    });
    if let Some(object) = value.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    value
}
