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

//! The generic serializer: a schema of bindings partitioned by holder kind.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::binding::{Access, Attach, BindingList, CanLoad, CanSave, Entry, LoadOnly, ReadWrite, SaveOnly};
use crate::config::Config;
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::{HolderKind, HolderRef};
use crate::tree::{Document, Element};

/// Drives saving and loading of one composite value.
///
/// Bindings are split at attach time into attribute bindings and element
/// bindings, each keyed by name and kept in declaration order. Saving
/// writes attribute bindings first, then element bindings, skipping values
/// whose policy reports them as not valid. Loading walks the holder's
/// attributes and then its child elements in document order and hands
/// every node to the binding of the same name and kind; nodes without a
/// binding are ignored.
///
/// ```
/// use xmlbind_core::bind::{as_attribute, as_text, nvp};
/// use xmlbind_core::context::WriteContext;
/// use xmlbind_core::serializer::GenericSaver;
/// use xmlbind_core::tree::Element;
///
/// let (name, hp) = ("Rex".to_string(), 100u32);
/// let mut saver = GenericSaver::new();
/// saver
///     .attach(nvp("name", as_attribute(&name)) & nvp("hp", as_text(&hp)))
///     .unwrap();
/// let mut monster = Element::new("monster");
/// saver.save(&mut WriteContext::default(), &mut monster).unwrap();
/// assert_eq!(monster.attribute("name").unwrap().value(), "Rex");
/// assert_eq!(monster.first_child_element("hp").unwrap().text(), "100");
/// ```
pub struct GenericSerializer<'a, A = ReadWrite> {
    entries: Vec<Box<dyn Entry + 'a>>,
    // Name to index into `entries`, one map per holder kind.
    attributes: IndexMap<String, usize>,
    elements: IndexMap<String, usize>,
    shared_names: bool,
    access: PhantomData<fn() -> A>,
}

/// A schema of save-capable bindings over `&T` or `&mut T` slots.
pub type GenericSaver<'a> = GenericSerializer<'a, SaveOnly>;

/// A schema of load-capable bindings over `&mut T` slots.
pub type GenericLoader<'a> = GenericSerializer<'a, LoadOnly>;

impl<'a, A: Access> GenericSerializer<'a, A> {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        GenericSerializer {
            entries: Vec::new(),
            attributes: IndexMap::new(),
            elements: IndexMap::new(),
            shared_names: config.is_shared_names(),
            access: PhantomData,
        }
    }

    /// Adds a binding, a `&` chain of bindings or a [`BindingList`].
    ///
    /// Fails with a configuration error when a name is already bound for the
    /// same holder kind, or for the other kind when names are not shared.
    /// Bindings before the offending one stay attached.
    pub fn attach<B: Attach<'a, A>>(&mut self, bindings: B) -> Result<&mut Self, Error> {
        let mut list = BindingList::new();
        bindings.attach_to(&mut list);
        for entry in list.into_entries() {
            self.insert(entry)?;
        }
        Ok(self)
    }

    fn insert(&mut self, entry: Box<dyn Entry + 'a>) -> Result<(), Error> {
        let kind = entry.kind();
        let names: Vec<String> = entry.names().into_iter().map(str::to_owned).collect();
        if names.is_empty() {
            return Err(Error::configuration(format!(
                "{} binding `{}` answers to no name",
                kind,
                entry.name()
            )));
        }
        let (own, other) = match kind {
            HolderKind::Attribute => (&mut self.attributes, &self.elements),
            HolderKind::Element => (&mut self.elements, &self.attributes),
        };
        for (i, name) in names.iter().enumerate() {
            if own.contains_key(name) || names[..i].contains(name) {
                return Err(Error::configuration(format!(
                    "Can't attach two {} bindings named `{}`",
                    kind, name
                )));
            }
            if !self.shared_names && other.contains_key(name) {
                return Err(Error::configuration(format!(
                    "`{}` is bound as both an attribute and an element, \
                    which requires shared names to be enabled",
                    name
                )));
            }
        }
        let index = self.entries.len();
        self.entries.push(entry);
        own.extend(names.into_iter().map(|name| (name, index)));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.attributes.len() + self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.keys().map(String::as_str)
    }

    pub fn element_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.elements.keys().map(String::as_str)
    }
}

impl<A: Access> Default for GenericSerializer<'_, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for GenericSerializer<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericSerializer")
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .field("elements", &self.elements.keys().collect::<Vec<_>>())
            .field("shared_names", &self.shared_names)
            .finish()
    }
}

impl<'a, A: CanSave> GenericSerializer<'a, A> {
    /// Saves every binding into `element`.
    pub fn save(&self, context: &mut WriteContext, element: &mut Element) -> Result<(), Error> {
        context.inc_depth()?;
        let result = self.save_entries(context, element, true);
        context.dec_depth();
        result
    }

    /// Saves the element bindings as top-level elements of `document`.
    pub fn save_document(
        &self,
        context: &mut WriteContext,
        document: &mut Document,
    ) -> Result<(), Error> {
        for name in self.attributes.keys() {
            debug!("attribute binding `{}` does not apply at document level", name);
        }
        context.inc_depth()?;
        let result = self.save_entries(context, document.node_mut(), false);
        context.dec_depth();
        result
    }

    fn save_entries(
        &self,
        context: &mut WriteContext,
        node: &mut Element,
        with_attributes: bool,
    ) -> Result<(), Error> {
        if with_attributes {
            for entry in self.entries_of(HolderKind::Attribute) {
                entry.save(context, node)?;
            }
        }
        for entry in self.entries_of(HolderKind::Element) {
            entry.save(context, node)?;
        }
        Ok(())
    }

    fn entries_of(&self, kind: HolderKind) -> impl Iterator<Item = &(dyn Entry + 'a)> + '_ {
        self.entries
            .iter()
            .map(|entry| &**entry)
            .filter(move |entry| entry.kind() == kind)
    }
}

impl<A: CanLoad> GenericSerializer<'_, A> {
    /// Loads every binding whose name occurs on `element`.
    pub fn load(&mut self, context: &mut ReadContext, element: &Element) -> Result<(), Error> {
        context.inc_depth()?;
        let result = self.load_entries(context, element, true);
        context.dec_depth();
        result
    }

    /// Loads the element bindings from the top-level elements of `document`.
    pub fn load_document(
        &mut self,
        context: &mut ReadContext,
        document: &Document,
    ) -> Result<(), Error> {
        for name in self.attributes.keys() {
            debug!("attribute binding `{}` does not apply at document level", name);
        }
        context.inc_depth()?;
        let result = self.load_entries(context, document.node(), false);
        context.dec_depth();
        result
    }

    fn load_entries(
        &mut self,
        context: &mut ReadContext,
        node: &Element,
        with_attributes: bool,
    ) -> Result<(), Error> {
        if with_attributes {
            for attribute in node.attributes() {
                match self.attributes.get(attribute.name()) {
                    Some(&index) => {
                        self.entries[index].load(context, HolderRef::Attribute(attribute))?
                    }
                    None => trace!(
                        "ignoring unbound attribute `{}` on `{}`",
                        attribute.name(),
                        node.name()
                    ),
                }
            }
        }
        for child in node.child_elements() {
            match self.elements.get(child.name()) {
                Some(&index) => self.entries[index].load(context, HolderRef::Element(child))?,
                None => trace!(
                    "ignoring unbound element `{}` under `{}`",
                    child.name(),
                    node.name()
                ),
            }
        }
        Ok(())
    }
}
