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


//! Policies backed by closures, for values whose layout no other policy
//! expresses.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use super::{LoadPolicy, Policy, SavePolicy};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::Holder;
use crate::tree::Element;

/// Loads with `L` and saves with `S`.
///
/// Either side may be `()`, which leaves that direction unimplemented, so a
/// load-only custom field cannot be attached to a saver.
pub struct Custom<L, S, H = Element> {
    load: L,
    save: S,
    holder: PhantomData<fn() -> H>,
}

impl<L, S, H> Custom<L, S, H> {
    pub fn new(load: L, save: S) -> Self {
        Custom {
            load,
            save,
            holder: PhantomData,
        }
    }
}

impl<L, H> Custom<L, (), H> {
    pub fn loader(load: L) -> Self {
        Custom::new(load, ())
    }
}

impl<S, H> Custom<(), S, H> {
    pub fn saver(save: S) -> Self {
        Custom::new((), save)
    }
}

impl<L: Clone, S: Clone, H> Clone for Custom<L, S, H> {
    fn clone(&self) -> Self {
        Custom::new(self.load.clone(), self.save.clone())
    }
}

impl<L, S, H> fmt::Debug for Custom<L, S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom<{}>", type_name::<H>())
    }
}

impl<T: ?Sized, L, S, H: Holder> Policy<T> for Custom<L, S, H> {
    type Holder = H;
}

impl<T: ?Sized, L, S, H> SavePolicy<T> for Custom<L, S, H>
where
    S: Fn(&mut WriteContext, &mut H, &T) -> Result<(), Error>,
    H: Holder,
{
    fn save(&self, context: &mut WriteContext, holder: &mut H, value: &T) -> Result<(), Error> {
        (self.save)(context, holder, value)
    }
}

impl<T: ?Sized, L, S, H> LoadPolicy<T> for Custom<L, S, H>
where
    L: Fn(&mut ReadContext, &H, &mut T) -> Result<(), Error>,
    H: Holder,
{
    fn load(&self, context: &mut ReadContext, holder: &H, value: &mut T) -> Result<(), Error> {
        (self.load)(context, holder, value)
    }
}
