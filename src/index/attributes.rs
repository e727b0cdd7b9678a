//! Attribute lookup capability of queried records

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A record that exposes named string attributes.
///
/// The engine only ever reads attributes by name; a record missing an
/// attribute is a condition (it contributes no metadata), never an error.
pub trait AttributeSource {
    /// Value of the named attribute, if the record carries one.
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> AttributeSource for HashMap<String, String, S> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn attribute(&self, name: &str) -> Option<&str> {
        (**self).attribute(name)
    }
}
