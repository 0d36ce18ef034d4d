use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::PatchError;

/// A property patch as produced by the property-editing panel.
pub type PropertyPatch = Map<String, Value>;

/// Opaque, globally unique node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Produces a fresh identifier. Random v4 ids, unique for the process lifetime.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for NodeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Container,
    Button,
    Input,
    Card,
    Label,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Container,
        Kind::Button,
        Kind::Input,
        Kind::Card,
        Kind::Label,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Container => "container",
            Kind::Button => "button",
            Kind::Input => "input",
            Kind::Card => "card",
            Kind::Label => "label",
        }
    }

    /// Human readable name shown in the palette.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Container => "Container",
            Kind::Button => "Button",
            Kind::Input => "Input",
            Kind::Card => "Card",
            Kind::Label => "Label",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown component kind '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerProps {
    pub direction: String,
    pub spacing: String,
    pub align: String,
    pub justify: String,
    pub padding: String,
    pub width: String,
    pub fill_children: bool,
    pub fill_width: bool,
    pub class_name: String,
    pub children: Vec<Arc<Node>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ContainerProps {
    fn default() -> Self {
        Self {
            direction: "vertical".to_string(),
            spacing: "4".to_string(),
            align: "start".to_string(),
            justify: "start".to_string(),
            padding: "4".to_string(),
            width: "full".to_string(),
            fill_children: false,
            fill_width: false,
            class_name: String::new(),
            children: Vec::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonProps {
    #[serde(rename = "children")]
    pub text: String,
    pub variant: String,
    pub size: String,
    pub left_icon: String,
    pub right_icon: String,
    pub show_shortcut: bool,
    pub shortcut_text: String,
    pub fill_width: bool,
    pub class_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: "Button".to_string(),
            variant: "primary".to_string(),
            size: "md".to_string(),
            left_icon: "none".to_string(),
            right_icon: "none".to_string(),
            show_shortcut: false,
            shortcut_text: String::new(),
            fill_width: false,
            class_name: String::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputProps {
    pub placeholder: String,
    pub fill_width: bool,
    pub class_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for InputProps {
    fn default() -> Self {
        Self {
            placeholder: "Type here...".to_string(),
            fill_width: false,
            class_name: String::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardProps {
    #[serde(rename = "children")]
    pub content: String,
    pub fill_width: bool,
    pub class_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CardProps {
    fn default() -> Self {
        Self {
            content: "Card Content".to_string(),
            fill_width: false,
            class_name: "p-4".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelProps {
    #[serde(rename = "children")]
    pub text: String,
    pub fill_width: bool,
    pub class_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LabelProps {
    fn default() -> Self {
        Self {
            text: "Label".to_string(),
            fill_width: false,
            class_name: String::new(),
            extra: Map::new(),
        }
    }
}

/// Widget payload, keyed by kind. Only `Container` can own children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props", rename_all = "lowercase")]
pub enum Widget {
    Container(ContainerProps),
    Button(ButtonProps),
    Input(InputProps),
    Card(CardProps),
    Label(LabelProps),
}

impl Widget {
    /// The default payload the palette drops for `kind`.
    pub fn default_for(kind: Kind) -> Self {
        match kind {
            Kind::Container => Widget::Container(ContainerProps::default()),
            Kind::Button => Widget::Button(ButtonProps::default()),
            Kind::Input => Widget::Input(InputProps::default()),
            Kind::Card => Widget::Card(CardProps::default()),
            Kind::Label => Widget::Label(LabelProps::default()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Widget::Container(_) => Kind::Container,
            Widget::Button(_) => Kind::Button,
            Widget::Input(_) => Kind::Input,
            Widget::Card(_) => Kind::Card,
            Widget::Label(_) => Kind::Label,
        }
    }

    /// The property record as a JSON object, as the property panel reads it.
    pub fn properties(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut tagged)) => match tagged.remove("props") {
                Some(Value::Object(props)) => props,
                _ => Map::new(),
            },
            _ => Map::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<Value> {
        self.properties().remove(key)
    }

    /// Merges `patch` into the record. Keys that cannot be applied are
    /// skipped and reported; the remaining keys still apply.
    pub fn apply_patch(&mut self, patch: &PropertyPatch) -> Vec<PatchError> {
        let mut rejected = Vec::new();
        for (key, value) in patch {
            if value.is_null() {
                continue;
            }
            let result = match self {
                Widget::Container(props) => props.assign(key, value),
                Widget::Button(props) => props.assign(key, value),
                Widget::Input(props) => props.assign(key, value),
                Widget::Card(props) => props.assign(key, value),
                Widget::Label(props) => props.assign(key, value),
            };
            if let Err(err) = result {
                rejected.push(err);
            }
        }
        rejected
    }
}

impl ContainerProps {
    fn assign(&mut self, key: &str, value: &Value) -> Result<(), PatchError> {
        match key {
            // The child sequence is owned by the tree operations, never by a patch.
            "children" => Ok(()),
            "direction" => assign_string(&mut self.direction, key, value),
            "spacing" => assign_string(&mut self.spacing, key, value),
            "align" => assign_string(&mut self.align, key, value),
            "justify" => assign_string(&mut self.justify, key, value),
            "padding" => assign_string(&mut self.padding, key, value),
            "width" => assign_string(&mut self.width, key, value),
            "fillChildren" => assign_bool(&mut self.fill_children, key, value),
            "fillWidth" => assign_bool(&mut self.fill_width, key, value),
            "className" => assign_string(&mut self.class_name, key, value),
            _ => {
                merge_extra(&mut self.extra, key, value);
                Ok(())
            }
        }
    }

    /// Same record with a different child sequence.
    pub fn with_children(&self, children: Vec<Arc<Node>>) -> Self {
        Self {
            direction: self.direction.clone(),
            spacing: self.spacing.clone(),
            align: self.align.clone(),
            justify: self.justify.clone(),
            padding: self.padding.clone(),
            width: self.width.clone(),
            fill_children: self.fill_children,
            fill_width: self.fill_width,
            class_name: self.class_name.clone(),
            children,
            extra: self.extra.clone(),
        }
    }
}

impl ButtonProps {
    fn assign(&mut self, key: &str, value: &Value) -> Result<(), PatchError> {
        match key {
            "children" => assign_string(&mut self.text, key, value),
            "variant" => assign_string(&mut self.variant, key, value),
            "size" => assign_string(&mut self.size, key, value),
            "leftIcon" => assign_string(&mut self.left_icon, key, value),
            "rightIcon" => assign_string(&mut self.right_icon, key, value),
            "showShortcut" => assign_bool(&mut self.show_shortcut, key, value),
            "shortcutText" => assign_string(&mut self.shortcut_text, key, value),
            "fillWidth" => assign_bool(&mut self.fill_width, key, value),
            "className" => assign_string(&mut self.class_name, key, value),
            _ => {
                merge_extra(&mut self.extra, key, value);
                Ok(())
            }
        }
    }
}

impl InputProps {
    fn assign(&mut self, key: &str, value: &Value) -> Result<(), PatchError> {
        match key {
            "placeholder" => assign_string(&mut self.placeholder, key, value),
            "fillWidth" => assign_bool(&mut self.fill_width, key, value),
            "className" => assign_string(&mut self.class_name, key, value),
            _ => {
                merge_extra(&mut self.extra, key, value);
                Ok(())
            }
        }
    }
}

impl CardProps {
    fn assign(&mut self, key: &str, value: &Value) -> Result<(), PatchError> {
        match key {
            "children" => assign_string(&mut self.content, key, value),
            "fillWidth" => assign_bool(&mut self.fill_width, key, value),
            "className" => assign_string(&mut self.class_name, key, value),
            _ => {
                merge_extra(&mut self.extra, key, value);
                Ok(())
            }
        }
    }
}

impl LabelProps {
    fn assign(&mut self, key: &str, value: &Value) -> Result<(), PatchError> {
        match key {
            "children" => assign_string(&mut self.text, key, value),
            "fillWidth" => assign_bool(&mut self.fill_width, key, value),
            "className" => assign_string(&mut self.class_name, key, value),
            _ => {
                merge_extra(&mut self.extra, key, value);
                Ok(())
            }
        }
    }
}

fn assign_string(field: &mut String, key: &str, value: &Value) -> Result<(), PatchError> {
    match value {
        Value::String(s) => *field = s.clone(),
        Value::Number(n) => *field = n.to_string(),
        Value::Bool(b) => *field = b.to_string(),
        other => {
            return Err(PatchError::TypeMismatch {
                key: key.to_string(),
                expected: "string",
                found: value_kind(other),
            })
        }
    }
    Ok(())
}

fn assign_bool(field: &mut bool, key: &str, value: &Value) -> Result<(), PatchError> {
    match value {
        Value::Bool(b) => *field = *b,
        Value::String(s) if s == "true" => *field = true,
        Value::String(s) if s == "false" => *field = false,
        other => {
            return Err(PatchError::TypeMismatch {
                key: key.to_string(),
                expected: "boolean",
                found: value_kind(other),
            })
        }
    }
    Ok(())
}

// Objects merge one level deep; everything else replaces.
fn merge_extra(extra: &mut Map<String, Value>, key: &str, value: &Value) {
    if let (Some(Value::Object(existing)), Value::Object(incoming)) = (extra.get_mut(key), value) {
        for (k, v) in incoming {
            existing.insert(k.clone(), v.clone());
        }
        return;
    }
    extra.insert(key.to_string(), value.clone());
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A single entry in the component tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub widget: Widget,
    /// Informational back-reference; containment defines the real shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
}

impl Node {
    pub fn new(widget: Widget) -> Self {
        Self {
            id: NodeId::generate(),
            widget,
            parent_id: None,
        }
    }

    pub fn of_kind(kind: Kind) -> Self {
        Self::new(Widget::default_for(kind))
    }

    pub fn kind(&self) -> Kind {
        self.widget.kind()
    }

    pub fn is_container(&self) -> bool {
        matches!(self.widget, Widget::Container(_))
    }

    /// Child sequence; always empty for non-containers.
    pub fn children(&self) -> &[Arc<Node>] {
        match &self.widget {
            Widget::Container(props) => &props.children,
            _ => &[],
        }
    }

    /// Copy of this node owning `children`, or `None` when it is not a container.
    pub fn with_children(&self, children: Vec<Arc<Node>>) -> Option<Node> {
        match &self.widget {
            Widget::Container(props) => Some(Node {
                id: self.id,
                widget: Widget::Container(props.with_children(children)),
                parent_id: self.parent_id,
            }),
            _ => None,
        }
    }

    /// Copy of this node with a different parent back-reference. Children are shared.
    pub fn with_parent(&self, parent_id: Option<NodeId>) -> Node {
        Node {
            id: self.id,
            widget: self.widget.clone(),
            parent_id,
        }
    }

    /// Copy of this node under `parent_id` whose descendants all point at
    /// their actual containers. Subtrees that already do are shared.
    pub fn adopted_by(&self, parent_id: Option<NodeId>) -> Node {
        let widget = match &self.widget {
            Widget::Container(props) => {
                let children = props
                    .children
                    .iter()
                    .map(|child| adopt(child, self.id))
                    .collect();
                Widget::Container(props.with_children(children))
            }
            other => other.clone(),
        };
        Node {
            id: self.id,
            widget,
            parent_id,
        }
    }
}

fn adopt(child: &Arc<Node>, parent: NodeId) -> Arc<Node> {
    let adopted: Vec<Arc<Node>> = child
        .children()
        .iter()
        .map(|grandchild| adopt(grandchild, child.id))
        .collect();
    let unchanged = child.parent_id == Some(parent)
        && adopted
            .iter()
            .zip(child.children())
            .all(|(after, before)| Arc::ptr_eq(after, before));
    if unchanged {
        return Arc::clone(child);
    }
    let widget = match &child.widget {
        Widget::Container(props) => Widget::Container(props.with_children(adopted)),
        other => other.clone(),
    };
    Arc::new(Node {
        id: child.id,
        widget,
        parent_id: Some(parent),
    })
}
