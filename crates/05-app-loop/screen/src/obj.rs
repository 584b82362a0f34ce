use serde::Serialize;

/// Node in the render-object tree handed to the engine.
///
/// The default value is the empty object the engine renders as nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Obj {
    /// Node name, unique among its siblings by convention.
    pub name: String,
    /// Text content, if the node displays any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child nodes in draw order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Obj>,
}

impl Obj {
    /// Named node with no content.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Named node displaying `text`.
    pub fn label(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).text(text)
    }

    /// Sets the text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child node.
    pub fn child(mut self, child: Obj) -> Self {
        self.children.push(child);
        self
    }

    /// Returns `true` for the empty default object.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.text.is_none() && self.children.is_empty()
    }

    /// Depth-first search for a node by name.
    pub fn find(&self, name: &str) -> Option<&Obj> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_walks_nested_children() {
        let tree = Obj::new("root").child(Obj::new("hud").child(Obj::label("gold", "12")));

        assert_eq!(tree.find("gold").and_then(|o| o.text.as_deref()), Some("12"));
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn empty_fields_are_omitted_from_json() {
        let json = serde_json::to_string(&Obj::new("title")).expect("serialize");
        assert_eq!(json, r#"{"name":"title"}"#);
        assert!(Obj::default().is_empty());
    }
}
