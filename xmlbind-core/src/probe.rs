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

//! Capability traits and their build-time probes.
//!
//! A type supports loading from a holder kind `H` when it implements
//! [`Load<H>`], and saving when it implements [`Save<H>`]. The
//! [`can_load!`](crate::can_load), [`can_save!`](crate::can_save) and
//! [`can_serialize!`](crate::can_serialize) macros answer the same question
//! as a `bool` for any concrete type, including trait objects, without
//! requiring the capability to exist.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::tree::{Attribute, Element};

/// The two tree-node kinds a policy can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HolderKind {
    Attribute,
    Element,
}

impl fmt::Display for HolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolderKind::Attribute => f.write_str("attribute"),
            HolderKind::Element => f.write_str("element"),
        }
    }
}

/// A borrowed tree node of either kind, as met while walking a parent.
#[derive(Clone, Copy, Debug)]
pub enum HolderRef<'t> {
    Attribute(&'t Attribute),
    Element(&'t Element),
}

impl HolderRef<'_> {
    pub fn kind(&self) -> HolderKind {
        match self {
            HolderRef::Attribute(_) => HolderKind::Attribute,
            HolderRef::Element(_) => HolderKind::Element,
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for crate::tree::Element {}
    impl Sealed for crate::tree::Attribute {}
}

/// A tree node a value can be loaded from or saved into.
pub trait Holder: sealed::Sealed + Sized {
    const KIND: HolderKind;

    /// Creates the holder called `name` under `parent`.
    fn materialize<'p>(parent: &'p mut Element, name: &str) -> Result<&'p mut Self, Error>;

    /// Every holder called `name` under `parent`, in document order.
    fn select<'t>(parent: &'t Element, name: &str) -> Vec<&'t Self>;

    fn cast(source: HolderRef<'_>) -> Option<&Self>;
}

impl Holder for Element {
    const KIND: HolderKind = HolderKind::Element;

    fn materialize<'p>(parent: &'p mut Element, name: &str) -> Result<&'p mut Self, Error> {
        parent.add_child(Element::new(name))
    }

    fn select<'t>(parent: &'t Element, name: &str) -> Vec<&'t Self> {
        parent.child_elements().filter(|c| c.name() == name).collect()
    }

    fn cast(source: HolderRef<'_>) -> Option<&Self> {
        match source {
            HolderRef::Element(element) => Some(element),
            HolderRef::Attribute(_) => None,
        }
    }
}

impl Holder for Attribute {
    const KIND: HolderKind = HolderKind::Attribute;

    fn materialize<'p>(parent: &'p mut Element, name: &str) -> Result<&'p mut Self, Error> {
        parent.set_attribute(name, String::new())
    }

    fn select<'t>(parent: &'t Element, name: &str) -> Vec<&'t Self> {
        parent.attribute(name).into_iter().collect()
    }

    fn cast(source: HolderRef<'_>) -> Option<&Self> {
        match source {
            HolderRef::Attribute(attribute) => Some(attribute),
            HolderRef::Element(_) => None,
        }
    }
}

/// A holder carrying a single string: element text or attribute value.
pub trait TextHolder: Holder {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);
}

impl TextHolder for Element {
    fn text(&self) -> &str {
        Element::text(self)
    }

    fn set_text(&mut self, text: String) {
        Element::set_text(self, text)
    }
}

impl TextHolder for Attribute {
    fn text(&self) -> &str {
        self.value()
    }

    fn set_text(&mut self, text: String) {
        self.set_value(text)
    }
}

/// Loads `Self` from a holder of kind `H`.
pub trait Load<H: Holder = Element> {
    fn load(&mut self, context: &mut ReadContext, holder: &H) -> Result<(), Error>;
}

/// Saves `Self` into a freshly materialized holder of kind `H`.
pub trait Save<H: Holder = Element> {
    fn save(&self, context: &mut WriteContext, holder: &mut H) -> Result<(), Error>;
}

/// Both directions.
pub trait Serializable<H: Holder = Element>: Load<H> + Save<H> {}

impl<T: ?Sized + Load<H> + Save<H>, H: Holder> Serializable<H> for T {}

impl<T: ?Sized + Load<H>, H: Holder> Load<H> for Box<T> {
    fn load(&mut self, context: &mut ReadContext, holder: &H) -> Result<(), Error> {
        T::load(self.as_mut(), context, holder)
    }
}

impl<T: ?Sized + Save<H>, H: Holder> Save<H> for Box<T> {
    fn save(&self, context: &mut WriteContext, holder: &mut H) -> Result<(), Error> {
        T::save(self.as_ref(), context, holder)
    }
}

impl<T: ?Sized + Save<H>, H: Holder> Save<H> for Rc<T> {
    fn save(&self, context: &mut WriteContext, holder: &mut H) -> Result<(), Error> {
        T::save(self.as_ref(), context, holder)
    }
}

impl<T: ?Sized + Save<H>, H: Holder> Save<H> for Arc<T> {
    fn save(&self, context: &mut WriteContext, holder: &mut H) -> Result<(), Error> {
        T::save(self.as_ref(), context, holder)
    }
}

/// Zero-sized stand-in for "a `T` in a holder `H`", used by the probe macros.
pub struct Probe<T: ?Sized, H> {
    value: PhantomData<*const T>,
    holder: PhantomData<H>,
}

impl<T: ?Sized, H> Probe<T, H> {
    #[inline(always)]
    pub const fn new() -> Self {
        Probe {
            value: PhantomData,
            holder: PhantomData,
        }
    }
}

impl<T: ?Sized, H> Default for Probe<T, H> {
    fn default() -> Self {
        Probe::new()
    }
}

// Method resolution tries `&Probe` receivers before `Probe` ones, so the
// `*Capable` impls win whenever their bound holds.

pub trait LoadCapable {
    fn can_load(&self) -> bool;
}

pub trait LoadIncapable {
    fn can_load(&self) -> bool;
}

impl<T: ?Sized + Load<H>, H: Holder> LoadCapable for &Probe<T, H> {
    #[inline(always)]
    fn can_load(&self) -> bool {
        true
    }
}

impl<T: ?Sized, H> LoadIncapable for Probe<T, H> {
    #[inline(always)]
    fn can_load(&self) -> bool {
        false
    }
}

pub trait SaveCapable {
    fn can_save(&self) -> bool;
}

pub trait SaveIncapable {
    fn can_save(&self) -> bool;
}

impl<T: ?Sized + Save<H>, H: Holder> SaveCapable for &Probe<T, H> {
    #[inline(always)]
    fn can_save(&self) -> bool {
        true
    }
}

impl<T: ?Sized, H> SaveIncapable for Probe<T, H> {
    #[inline(always)]
    fn can_save(&self) -> bool {
        false
    }
}

/// Whether `$ty` implements [`Load`] for the given holder (default
/// [`Element`]).
///
/// ```
/// use xmlbind_core::can_load;
/// use xmlbind_core::tree::Attribute;
///
/// struct Opaque;
/// assert!(!can_load!(Opaque));
/// assert!(!can_load!(Opaque, Attribute));
/// ```
#[macro_export]
macro_rules! can_load {
    ($ty:ty) => {
        $crate::can_load!($ty, $crate::tree::Element)
    };
    ($ty:ty, $holder:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::{LoadCapable as _, LoadIncapable as _};
        (&&$crate::probe::Probe::<$ty, $holder>::new()).can_load()
    }};
}

/// Whether `$ty` implements [`Save`] for the given holder (default
/// [`Element`]).
#[macro_export]
macro_rules! can_save {
    ($ty:ty) => {
        $crate::can_save!($ty, $crate::tree::Element)
    };
    ($ty:ty, $holder:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::{SaveCapable as _, SaveIncapable as _};
        (&&$crate::probe::Probe::<$ty, $holder>::new()).can_save()
    }};
}

/// `can_load! && can_save!`.
#[macro_export]
macro_rules! can_serialize {
    ($ty:ty) => {
        $crate::can_load!($ty) && $crate::can_save!($ty)
    };
    ($ty:ty, $holder:ty) => {
        $crate::can_load!($ty, $holder) && $crate::can_save!($ty, $holder)
    };
}
