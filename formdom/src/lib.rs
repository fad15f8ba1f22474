pub mod document;
pub mod element;
pub mod selector;

pub use document::{Document, NodeId};
pub use element::{find_element, Element, File};
pub use selector::{Selector, SelectorError};
