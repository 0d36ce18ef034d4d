pub mod config;
pub mod errors;
pub mod model;
pub mod outline;
pub mod persistence;
pub mod registry;
pub mod store;
pub mod tree;

// Transient editor state
pub mod clipboard;
pub mod selection;

// Internal modules
pub mod actions;

// Re-export commonly used types
pub use actions::{execute_action, Action, DropIntent};
pub use model::{Kind, Node, NodeId, PropertyPatch, Widget};
pub use store::DesignerStore;
pub use tree::Tree;
