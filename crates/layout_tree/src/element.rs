//! Leaf widget placeholders

use crate::{Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// Kind of widget an element stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Button,
    CheckBox,
    Image,
    ImageButton,
    ImageTextButton,
    Label,
    List,
    ProgressBar,
    SelectBox,
    Slider,
    TextButton,
    TextField,
    TextArea,
    Touchpad,
    Tree,
    Container,
    ScrollPane,
    SplitPane,
    Stack,
}

impl ElementKind {
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Button => "Button",
            ElementKind::CheckBox => "CheckBox",
            ElementKind::Image => "Image",
            ElementKind::ImageButton => "ImageButton",
            ElementKind::ImageTextButton => "ImageTextButton",
            ElementKind::Label => "Label",
            ElementKind::List => "List",
            ElementKind::ProgressBar => "ProgressBar",
            ElementKind::SelectBox => "SelectBox",
            ElementKind::Slider => "Slider",
            ElementKind::TextButton => "TextButton",
            ElementKind::TextField => "TextField",
            ElementKind::TextArea => "TextArea",
            ElementKind::Touchpad => "Touchpad",
            ElementKind::Tree => "Tree",
            ElementKind::Container => "Container",
            ElementKind::ScrollPane => "ScrollPane",
            ElementKind::SplitPane => "SplitPane",
            ElementKind::Stack => "Stack",
        }
    }
}

/// A leaf element. Rendering and style lookup belong to the host toolkit;
/// the tree only tracks placement, kind, name and style reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: NodeId,
    parent: Option<NodeId>,
    pub kind: ElementKind,
    pub name: Option<String>,
    /// Name of the skin style applied to this element
    pub style: Option<String>,
    /// Text content for text-bearing widgets
    pub text: Option<String>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: NodeId::new(),
            parent: None,
            kind,
            name: None,
            style: None,
            text: None,
        }
    }

    /// Create an element with a known id, used when replaying edits
    pub fn with_id(id: NodeId, kind: ElementKind) -> Self {
        Self {
            id,
            ..Self::new(kind)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl Node for Element {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Element
    }

    fn children(&self) -> &[NodeId] {
        &[]
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
