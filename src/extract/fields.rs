use crate::dom::{ElementNode, PageSnapshot};
use serde::{Deserialize, Serialize};

/// A form control found inside the selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// `name`, else `id`, else "unnamed"
    pub name: String,

    /// The control's `type`, else its tag name
    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub value: String,
}

impl FormField {
    /// Describe the form control at `index`
    pub fn from_element(snapshot: &PageSnapshot, index: usize, element: &ElementNode) -> Self {
        let form = element.form.clone().unwrap_or_default();

        let name = [form.name.as_str(), element.id().map(String::as_str).unwrap_or("")]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("unnamed")
            .to_string();

        let field_type = if form.input_type.is_empty() {
            element.tag_name.to_ascii_lowercase()
        } else {
            form.input_type.clone()
        };

        let label = resolve_label(snapshot, element);
        if label.is_none() {
            log::debug!("No label for <{}> #{} '{}'", element.tag_name, index, name);
        }

        Self {
            name,
            field_type,
            label,
            placeholder: Some(form.placeholder).filter(|p| !p.is_empty()),
            required: form.required,
            value: form.value,
        }
    }

    /// Label if known, otherwise the field name
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Find the label of a control: an enclosing `<label>`, else `label[for=<id>]`.
/// A parent chain that breaks off or loops ends the enclosing search early.
pub fn resolve_label(snapshot: &PageSnapshot, element: &ElementNode) -> Option<String> {
    let enclosing = element.parent.and_then(|parent| snapshot.closest(parent, "label"));
    if let Some((_, label)) = enclosing {
        return label_text(label);
    }

    element
        .id()
        .and_then(|id| snapshot.label_for(id))
        .and_then(|(_, label)| label_text(label))
}

fn label_text(label: &ElementNode) -> Option<String> {
    let text = label.text_content.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::FormProperties;

    fn text_input(id: &str, placeholder: &str) -> ElementNode {
        ElementNode::new("input")
            .with_attribute("id", id)
            .with_form(FormProperties {
                input_type: "text".to_string(),
                placeholder: placeholder.to_string(),
                ..Default::default()
            })
    }

    #[test]
    fn test_label_for_id() {
        let mut snapshot = PageSnapshot::default();
        let body = snapshot.push(ElementNode::new("body").with_child_count(2));
        snapshot.push(
            ElementNode::new("label")
                .with_parent(body)
                .with_attribute("for", "email")
                .with_text("Email address"),
        );
        let input = snapshot.push(text_input("email", "Email").with_parent(body));

        let element = snapshot.get(input).unwrap().clone();
        let field = FormField::from_element(&snapshot, input, &element);

        assert_eq!(field.label.as_deref(), Some("Email address"));
        assert_eq!(field.field_type, "text");
        assert_eq!(field.placeholder.as_deref(), Some("Email"));
        assert_eq!(field.name, "email");
        assert!(!field.required);
    }

    #[test]
    fn test_enclosing_label_wins() {
        let mut snapshot = PageSnapshot::default();
        let label = snapshot.push(
            ElementNode::new("label")
                .with_child_count(1)
                .with_direct_text("Nickname")
                .with_text_content("Nickname"),
        );
        snapshot.push(ElementNode::new("label").with_attribute("for", "nick").with_text("Other"));
        let input = snapshot.push(text_input("nick", "").with_parent(label));

        let element = snapshot.get(input).unwrap().clone();
        let field = FormField::from_element(&snapshot, input, &element);
        assert_eq!(field.label.as_deref(), Some("Nickname"));
        assert!(field.placeholder.is_none());
    }

    #[test]
    fn test_name_and_type_fallbacks() {
        let mut snapshot = PageSnapshot::default();
        let select = snapshot.push(ElementNode::new("select"));
        let element = snapshot.get(select).unwrap().clone();
        let field = FormField::from_element(&snapshot, select, &element);

        assert_eq!(field.name, "unnamed");
        assert_eq!(field.field_type, "select");
        assert!(field.label.is_none());
        assert_eq!(field.display_name(), "unnamed");
    }

    #[test]
    fn test_broken_parent_chain_falls_back_to_for() {
        let mut snapshot = PageSnapshot::default();
        let input = snapshot.push(text_input("lost", "").with_parent(42));
        snapshot.push(ElementNode::new("label").with_attribute("for", "lost").with_text("Lost"));

        let element = snapshot.get(input).unwrap().clone();
        let field = FormField::from_element(&snapshot, input, &element);
        assert_eq!(field.label.as_deref(), Some("Lost"));
        assert_eq!(field.name, "lost");
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let mut snapshot = PageSnapshot::default();
        snapshot.push(ElementNode::new("div").with_parent(1));
        snapshot.push(ElementNode::new("div").with_parent(0));
        let input = snapshot.push(text_input("loop", "").with_parent(0));

        let element = snapshot.get(input).unwrap().clone();
        assert_eq!(resolve_label(&snapshot, &element), None);
    }

    #[test]
    fn test_whitespace_label_is_none() {
        let mut snapshot = PageSnapshot::default();
        snapshot.push(ElementNode::new("label").with_attribute("for", "x").with_text("   "));
        let input = snapshot.push(text_input("x", ""));
        let element = snapshot.get(input).unwrap().clone();
        assert_eq!(resolve_label(&snapshot, &element), None);
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let field = FormField {
            name: "q".to_string(),
            field_type: "search".to_string(),
            label: None,
            placeholder: Some("Search".to_string()),
            required: true,
            value: "rust".to_string(),
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "search");
        assert!(json.get("label").is_none());
        assert_eq!(json["required"], true);
    }
}
