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

use log::debug;

use super::{Direction, LoadPolicy, Policy, SavePolicy};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::tree::Element;

/// Lifts a policy over `Option<T>`.
///
/// `None` saves nothing. A holder found on load turns `None` into
/// `Some(T::default())` before the inner policy runs; a missing holder
/// leaves the value untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Optional<P>(P);

impl<P> Optional<P> {
    pub fn new(inner: P) -> Self {
        Optional(inner)
    }

    pub fn inner(&self) -> &P {
        &self.0
    }
}

impl<T, P: Policy<T>> Policy<Option<T>> for Optional<P> {
    type Holder = P::Holder;

    fn valid(&self, value: &Option<T>, direction: Direction) -> bool {
        match (value, direction) {
            (Some(inner), _) => self.0.valid(inner, direction),
            (None, Direction::Load) => true,
            (None, Direction::Save) => false,
        }
    }
}

impl<T, P: SavePolicy<T>> SavePolicy<Option<T>> for Optional<P> {
    fn save(
        &self,
        context: &mut WriteContext,
        holder: &mut P::Holder,
        value: &Option<T>,
    ) -> Result<(), Error> {
        match value {
            Some(inner) => self.0.save(context, holder, inner),
            None => Ok(()),
        }
    }

    // Element sets emit their own holders, so the inner policy names them.
    fn save_named(
        &self,
        context: &mut WriteContext,
        parent: &mut Element,
        name: &str,
        value: &Option<T>,
    ) -> Result<(), Error> {
        match value {
            Some(inner) => self.0.save_named(context, parent, name, inner),
            None => {
                debug!("skipping `{}` under `{}`: no value", name, parent.name());
                Ok(())
            }
        }
    }
}

impl<T: Default, P: LoadPolicy<T>> LoadPolicy<Option<T>> for Optional<P> {
    fn load(
        &self,
        context: &mut ReadContext,
        holder: &P::Holder,
        value: &mut Option<T>,
    ) -> Result<(), Error> {
        let inner = value.get_or_insert_with(T::default);
        self.0.load(context, holder, inner)
    }
}
