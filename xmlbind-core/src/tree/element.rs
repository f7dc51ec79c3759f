// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use super::{is_valid_name, Attribute};
use crate::error::Error;

/// An element node: a name, attributes in insertion order, optional text
/// content and child elements in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates a detached element. The name is checked when the element is
    /// linked under a parent.
    pub fn new(name: impl Into<String>) -> Element {
        Element {
            name: name.into(),
            ..Element::default()
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content, or the empty string when the element has none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_owned()),
        }
    }

    pub(crate) fn clear_text(&mut self) {
        self.text = None;
    }

    pub fn attributes(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Sets `name` to `value`, replacing an existing attribute of that name.
    pub fn set_attribute(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<&mut Attribute, Error> {
        if !is_valid_name(name) {
            return Err(Error::tree(format!(
                "`{}` is not a valid attribute name on `{}`",
                name, self.name
            )));
        }
        let index = match self.attributes.iter().position(|a| a.name() == name) {
            Some(index) => {
                self.attributes[index].set_value(value);
                index
            }
            None => {
                self.attributes.push(Attribute::new(name, value));
                self.attributes.len() - 1
            }
        };
        Ok(&mut self.attributes[index])
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let index = self.attributes.iter().position(|a| a.name() == name)?;
        Some(self.attributes.remove(index))
    }

    // Parsed attributes are taken as they come; quick-xml already rejected
    // malformed ones.
    pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn child_elements(&self) -> std::slice::Iter<'_, Element> {
        self.children.iter()
    }

    pub fn child_elements_named<'e>(
        &'e self,
        name: &'e str,
    ) -> impl Iterator<Item = &'e Element> + 'e {
        self.children.iter().filter(move |c| c.name() == name)
    }

    /// The lookup name only lives for the call; the result borrows `self`.
    pub fn first_child_element(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name() == name)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Links a detached element as the last child and returns it.
    pub fn add_child(&mut self, child: Element) -> Result<&mut Element, Error> {
        if !is_valid_name(child.name()) {
            return Err(Error::tree(format!(
                "`{}` is not a valid element name under `{}`",
                child.name(),
                self.name
            )));
        }
        let index = self.children.len();
        self.children.push(child);
        Ok(&mut self.children[index])
    }

    pub fn remove_last_child(&mut self) -> Option<Element> {
        self.children.pop()
    }
}
