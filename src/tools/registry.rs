use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::core::tool::{CardTool, ToolSpec};
use crate::tools::author::AuthorCardTool;
use crate::tools::book::BookCardTool;

/// Name → tool lookup that remembers registration order. Immutable once built; cheap to clone.
#[derive(Clone)]
pub struct ToolRegistry {
    by_name: Arc<HashMap<&'static str, Arc<dyn CardTool>>>,
    order: Arc<Vec<&'static str>>,
}

impl ToolRegistry {
    /// A later tool with an already registered name replaces the earlier one in place.
    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn CardTool>>,
    {
        let mut by_name: HashMap<&'static str, Arc<dyn CardTool>> = HashMap::new();
        let mut order = Vec::new();
        for t in iter {
            if by_name.insert(t.name(), t.clone()).is_none() {
                order.push(t.name());
            }
        }
        Self {
            by_name: Arc::new(by_name),
            order: Arc::new(order),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn CardTool>> {
        self.by_name.get(name)
    }

    fn in_order(&self) -> impl Iterator<Item = &Arc<dyn CardTool>> + '_ {
        self.order.iter().filter_map(|n| self.by_name.get(n))
    }

    /// Tool metadata in registration order.
    pub fn list(&self) -> Vec<ToolMeta> {
        self.in_order()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Tool objects in registration order, which is the order the model sees them.
    pub fn openai_tools(&self) -> Vec<Value> {
        self.in_order().map(|t| t.as_openai_tool()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_tools([
            Arc::new(BookCardTool) as Arc<dyn CardTool>,
            Arc::new(AuthorCardTool) as Arc<dyn CardTool>,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}
