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

//! # xmlbind-core
//!
//! The engine behind `xmlbind`: a declarative mapping between Rust values
//! and an XML document tree.
//!
//! A composite type describes itself once as a list of name-value
//! bindings. Each binding pairs a slot (`&T` for saving, `&mut T` for
//! loading) with a policy that decides where the value lives in the tree
//! and how it is converted:
//!
//! - [`TextConvert`](policy::TextConvert): a scalar as attribute value or
//!   element text
//! - [`Direct`](policy::Direct): a composite with its own [`Load`]/[`Save`]
//! - [`PointerIndirect`](policy::PointerIndirect): a pointer, with run-time
//!   subtype checks for polymorphic values
//! - [`ContainerElementSet`](policy::ContainerElementSet) and
//!   [`ContainerTextJoin`](policy::ContainerTextJoin): sequences as sibling
//!   elements or as one joined text
//!
//! The [`GenericSerializer`](serializer::GenericSerializer) partitions the
//! bindings into attributes and elements and walks the tree. The
//! [`xml_element!`] macro writes both directions from one declaration, and
//! [`XmlBind`] binds a root value to a whole document.

pub mod bind;
pub mod binding;
pub mod config;
pub mod constructor;
pub mod context;
pub mod error;
mod macros;
pub mod policy;
pub mod probe;
pub mod serializer;
pub mod subtype_set;
pub mod tree;
pub mod xmlbind;

pub use crate::binding::{Binding, BindingList, Field, Shared};
pub use crate::config::Config;
pub use crate::context::{ReadContext, WriteContext};
pub use crate::error::Error;
pub use crate::probe::{Holder, HolderKind, Load, Save, Serializable};
pub use crate::serializer::{GenericLoader, GenericSaver, GenericSerializer};
pub use crate::tree::{Attribute, Document, Element};
pub use crate::xmlbind::XmlBind;
