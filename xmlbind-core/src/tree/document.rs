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

use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::{markup, Element};
use crate::config::Config;
use crate::error::Error;

/// A whole document: an ordered list of top-level elements.
///
/// The top level is modelled as a nameless pseudo element so that a
/// document and an element share the same child-linking operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    node: Element,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    pub(crate) fn from_node(node: Element) -> Document {
        Document { node }
    }

    /// The pseudo element holding the top-level elements.
    pub fn node(&self) -> &Element {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut Element {
        &mut self.node
    }

    /// The first top-level element.
    pub fn root_element(&self) -> Option<&Element> {
        self.node.child_elements().next()
    }

    pub fn child_elements(&self) -> std::slice::Iter<'_, Element> {
        self.node.child_elements()
    }

    pub fn add_child(&mut self, child: Element) -> Result<&mut Element, Error> {
        self.node.add_child(child)
    }

    /// Parses `text` with the default [`Config`].
    pub fn parse(text: &str) -> Result<Document, Error> {
        Document::parse_with(text, &Config::default())
    }

    /// Parses `text`; elements nested deeper than the configured
    /// `max_depth` are a tree error.
    pub fn parse_with(text: &str, config: &Config) -> Result<Document, Error> {
        markup::parse(text, config.max_depth())
    }

    /// Prints the document with the default [`Config`].
    pub fn to_xml_string(&self) -> Result<String, Error> {
        self.to_xml_string_with(&Config::default())
    }

    pub fn to_xml_string_with(&self, config: &Config) -> Result<String, Error> {
        markup::print(self, config)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Document, Error> {
        Document::load_file_with(path, &Config::default())
    }

    pub fn load_file_with(path: impl AsRef<Path>, config: &Config) -> Result<Document, Error> {
        let text = fs::read_to_string(path)?;
        Document::parse_with(&text, config)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.save_file_with(path, &Config::default())
    }

    pub fn save_file_with(&self, path: impl AsRef<Path>, config: &Config) -> Result<(), Error> {
        let text = self.to_xml_string_with(config)?;
        fs::write(path, text)?;
        Ok(())
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(s)
    }
}
