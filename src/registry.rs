//! Per-kind defaults and property schemas.
//!
//! The store never validates patches against these schemas; they exist for
//! the property-editing collaborator and for listing the palette.

use crate::model::{Kind, Node, Widget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Select(&'static [&'static str]),
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: &'static str,
    pub label: &'static str,
    pub ty: PropertyType,
    pub description: Option<&'static str>,
}

const fn spec(name: &'static str, label: &'static str, ty: PropertyType) -> PropertySpec {
    PropertySpec {
        name,
        label,
        ty,
        description: None,
    }
}

const fn described(
    name: &'static str,
    label: &'static str,
    ty: PropertyType,
    description: &'static str,
) -> PropertySpec {
    PropertySpec {
        name,
        label,
        ty,
        description: Some(description),
    }
}

const ICONS: &[&str] = &["none", "home", "settings"];

const FILL_WIDTH: PropertySpec = described(
    "fillWidth",
    "Fill Container Width",
    PropertyType::Boolean,
    "Make this component take up full width of its container",
);

const CLASS_NAME: PropertySpec = described(
    "className",
    "Custom Classes",
    PropertyType::String,
    "Add utility classes for styling",
);

const CONTAINER: &[PropertySpec] = &[
    spec(
        "direction",
        "Direction",
        PropertyType::Select(&["horizontal", "vertical"]),
    ),
    spec(
        "spacing",
        "Spacing",
        PropertyType::Select(&["0", "1", "2", "4", "6", "8", "12", "16"]),
    ),
    spec(
        "align",
        "Align Items",
        PropertyType::Select(&["start", "center", "end", "stretch"]),
    ),
    spec(
        "justify",
        "Justify Content",
        PropertyType::Select(&["start", "center", "end", "between", "around"]),
    ),
    spec(
        "padding",
        "Padding",
        PropertyType::Select(&["0", "2", "4", "6", "8", "12", "16"]),
    ),
    spec(
        "width",
        "Width",
        PropertyType::Select(&["full", "1/2", "1/3", "2/3", "1/4", "3/4", "auto"]),
    ),
    described(
        "fillChildren",
        "Fill All Children",
        PropertyType::Boolean,
        "Make all children take up full container width",
    ),
    FILL_WIDTH,
    CLASS_NAME,
];

const BUTTON: &[PropertySpec] = &[
    spec("children", "Text", PropertyType::String),
    spec(
        "variant",
        "Variant",
        PropertyType::Select(&["primary", "secondary", "ghost"]),
    ),
    spec("size", "Size", PropertyType::Select(&["sm", "md", "lg"])),
    spec("leftIcon", "Left Icon", PropertyType::Select(ICONS)),
    spec("rightIcon", "Right Icon", PropertyType::Select(ICONS)),
    described(
        "showShortcut",
        "Show Shortcut",
        PropertyType::Boolean,
        "Display keyboard shortcut badge",
    ),
    described(
        "shortcutText",
        "Shortcut Text",
        PropertyType::String,
        "Keyboard shortcut to display (e.g. Ctrl+S)",
    ),
    FILL_WIDTH,
    CLASS_NAME,
];

const INPUT: &[PropertySpec] = &[
    spec("placeholder", "Placeholder", PropertyType::String),
    FILL_WIDTH,
    CLASS_NAME,
];

const CARD: &[PropertySpec] = &[
    spec("children", "Content", PropertyType::String),
    FILL_WIDTH,
    CLASS_NAME,
];

const LABEL: &[PropertySpec] = &[
    spec("children", "Text", PropertyType::String),
    FILL_WIDTH,
    CLASS_NAME,
];

pub fn schema(kind: Kind) -> &'static [PropertySpec] {
    match kind {
        Kind::Container => CONTAINER,
        Kind::Button => BUTTON,
        Kind::Input => INPUT,
        Kind::Card => CARD,
        Kind::Label => LABEL,
    }
}

pub fn default_widget(kind: Kind) -> Widget {
    Widget::default_for(kind)
}

/// A palette drop: fresh id, default properties, no parent.
pub fn new_node(kind: Kind) -> Node {
    Node::new(default_widget(kind))
}
