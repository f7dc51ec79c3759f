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

//! Load/save strategies, one per value shape.
//!
//! Every policy names the holder kind it targets through
//! [`Policy::Holder`]; the generic serializer reads that affinity when a
//! binding is attached and never infers it from tree content.

use log::debug;

use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::Holder;
use crate::tree::Element;

pub mod container;
pub mod custom;
pub mod datetime;
pub mod direct;
pub mod joined;
pub mod nested;
pub mod optional;
pub mod pointer;
pub mod text;

pub use container::{ContainerElementSet, Sequence};
pub use custom::Custom;
pub use direct::Direct;
pub use joined::ContainerTextJoin;
pub use nested::Nested;
pub use optional::Optional;
pub use pointer::{OwnedPointer, Pointer, PointerIndirect, Polymorphic, SharedPointer, Subtype};
pub use text::{TextConvert, TextValue};

/// Which way a value is travelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Load,
    Save,
}

pub trait Policy<T: ?Sized> {
    type Holder: Holder;

    /// Whether `value` takes part in the given direction at all. Returning
    /// `false` on save leaves no trace in the tree; on load the policy is
    /// not invoked.
    #[inline(always)]
    #[allow(unused_variables)]
    fn valid(&self, value: &T, direction: Direction) -> bool {
        true
    }
}

pub trait SavePolicy<T: ?Sized>: Policy<T> {
    fn save(
        &self,
        context: &mut WriteContext,
        holder: &mut Self::Holder,
        value: &T,
    ) -> Result<(), Error>;

    /// Saves `value` under `parent` as the holder called `name`.
    fn save_named(
        &self,
        context: &mut WriteContext,
        parent: &mut Element,
        name: &str,
        value: &T,
    ) -> Result<(), Error> {
        if !self.valid(value, Direction::Save) {
            debug!("skipping `{}` under `{}`: nothing to save", name, parent.name());
            return Ok(());
        }
        let holder = <Self::Holder as Holder>::materialize(parent, name)?;
        self.save(context, holder, value)
    }
}

pub trait LoadPolicy<T: ?Sized>: Policy<T> {
    fn load(
        &self,
        context: &mut ReadContext,
        holder: &Self::Holder,
        value: &mut T,
    ) -> Result<(), Error>;
}
