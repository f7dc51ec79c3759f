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

use crate::bind::{from_element, nvp, to_element};
use crate::config::Config;
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::{Load, Save};
use crate::serializer::{GenericLoader, GenericSaver};
use crate::tree::{Document, Element};

/// Entry point binding a root value to a whole document.
///
/// ```rust
/// use xmlbind_core::XmlBind;
///
/// let bind = XmlBind::default()
///     .shared_names(false)
///     .max_depth(32)
///     .indent(Some(4));
/// assert_eq!(bind.config().max_depth(), 32);
/// ```
#[derive(Clone, Debug, Default)]
pub struct XmlBind {
    config: Config,
}

impl XmlBind {
    pub fn new(config: Config) -> Self {
        XmlBind { config }
    }

    /// Whether an attribute binding and an element binding may share a name
    /// within one schema.
    ///
    /// # Default
    ///
    /// The default value is `true`.
    pub fn shared_names(mut self, shared_names: bool) -> Self {
        self.config.shared_names = shared_names;
        self
    }

    /// Sets the maximum nesting depth of composite values, on both save and
    /// load.
    ///
    /// # Default
    ///
    /// The default value is `128`.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Sets the indentation width of printed markup; `None` prints on one
    /// line.
    ///
    /// # Default
    ///
    /// The default value is `Some(2)`.
    pub fn indent(mut self, indent: Option<usize>) -> Self {
        self.config.indent = indent;
        self
    }

    /// Whether printed markup starts with an XML declaration.
    ///
    /// # Default
    ///
    /// The default value is `true`.
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.config.declaration = declaration;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn write_context(&self) -> WriteContext {
        WriteContext::new(self.config.clone())
    }

    pub fn read_context(&self) -> ReadContext {
        ReadContext::new(self.config.clone())
    }

    /// Saves `value` as the top-level element `name` of a new document.
    pub fn save<T: ?Sized + Save<Element>>(&self, name: &str, value: &T) -> Result<Document, Error> {
        let mut document = Document::new();
        self.save_into(&mut document, name, value)?;
        Ok(document)
    }

    /// Appends `value` as a top-level element `name` of `document`.
    pub fn save_into<T: ?Sized + Save<Element>>(
        &self,
        document: &mut Document,
        name: &str,
        value: &T,
    ) -> Result<(), Error> {
        let mut context = self.write_context();
        let mut saver = GenericSaver::with_config(&self.config);
        saver.attach(nvp(name, to_element(value)))?;
        saver.save_document(&mut context, document)
    }

    /// Loads a default-constructed `T` from every top-level element `name`.
    ///
    /// A document without such an element yields `T::default()`.
    pub fn load<T: Load<Element> + Default>(&self, document: &Document, name: &str) -> Result<T, Error> {
        let mut value = T::default();
        self.load_into(document, name, &mut value)?;
        Ok(value)
    }

    /// Loads into existing storage from every top-level element `name`.
    pub fn load_into<T: Load<Element>>(
        &self,
        document: &Document,
        name: &str,
        value: &mut T,
    ) -> Result<(), Error> {
        let mut context = self.read_context();
        let mut loader = GenericLoader::with_config(&self.config);
        loader.attach(nvp(name, from_element(value)))?;
        loader.load_document(&mut context, document)
    }

    pub fn save_to_string<T: ?Sized + Save<Element>>(&self, name: &str, value: &T) -> Result<String, Error> {
        self.save(name, value)?.to_xml_string_with(&self.config)
    }

    pub fn load_from_str<T: Load<Element> + Default>(&self, text: &str, name: &str) -> Result<T, Error> {
        let document = Document::parse_with(text, &self.config)?;
        self.load(&document, name)
    }
}
