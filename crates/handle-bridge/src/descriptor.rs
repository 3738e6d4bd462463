use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the callable that constructed an actor.
///
/// Components are kept in the order they were recorded, e.g.
/// `[class, function, signature]` for Java or
/// `[module, class, function, function_hash]` for Python.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    components: Vec<String>,
}

impl FunctionDescriptor {
    pub fn new(components: Vec<String>) -> Self {
        Self { components }
    }

    pub fn java(
        class_name: impl Into<String>,
        function_name: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self::new(vec![
            class_name.into(),
            function_name.into(),
            signature.into(),
        ])
    }

    pub fn python(
        module_name: impl Into<String>,
        class_name: impl Into<String>,
        function_name: impl Into<String>,
        function_hash: impl Into<String>,
    ) -> Self {
        Self::new(vec![
            module_name.into(),
            class_name.into(),
            function_name.into(),
            function_hash.into(),
        ])
    }

    pub fn cpp(
        function_name: impl Into<String>,
        caller: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self::new(vec![function_name.into(), caller.into(), class_name.into()])
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components as owned byte buffers, in recorded order.
    pub fn to_byte_list(&self) -> Vec<Vec<u8>> {
        self.components
            .iter()
            .map(|c| c.as_bytes().to_vec())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FunctionDescriptor {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.components.join(", "))
    }
}
