use serde::{Deserialize, Serialize};

/// Identity and capability of the caller, passed explicitly into every
/// mutating operation.
///
/// Construction is decoupled from how the caller proved who they are: the API
/// builds this from request headers, tests build it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    display_name: String,
    editor: bool,
}

impl ActorContext {
    pub fn new(display_name: impl Into<String>, editor: bool) -> Self {
        Self {
            display_name: display_name.into().trim().to_string(),
            editor,
        }
    }

    /// An identified caller without the editor capability.
    pub fn viewer(display_name: impl Into<String>) -> Self {
        Self::new(display_name, false)
    }

    /// An identified caller holding the editor capability.
    pub fn editor(display_name: impl Into<String>) -> Self {
        Self::new(display_name, true)
    }

    /// A caller that did not identify itself.
    pub fn anonymous() -> Self {
        Self::new("", false)
    }

    /// Name recorded as `actor` in audit entries.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_editor(&self) -> bool {
        self.editor
    }

    pub fn is_anonymous(&self) -> bool {
        self.display_name.is_empty()
    }
}
