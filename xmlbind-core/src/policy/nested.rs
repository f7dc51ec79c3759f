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

use std::borrow::Cow;

use super::{Direction, LoadPolicy, Policy, SavePolicy};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::Holder;
use crate::tree::Element;

/// A binding inside a binding: the holder is a wrapper element, and the
/// value lives in holders called `name` under it.
///
/// `Nested::new("ability", element_set)` bound as `abilities` gives
/// `<abilities><ability/><ability/></abilities>`.
#[derive(Clone, Debug)]
pub struct Nested<P> {
    name: Cow<'static, str>,
    inner: P,
}

impl<P> Nested<P> {
    pub fn new(name: impl Into<Cow<'static, str>>, inner: P) -> Self {
        Nested {
            name: name.into(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: ?Sized, P: Policy<T>> Policy<T> for Nested<P> {
    type Holder = Element;

    fn valid(&self, value: &T, direction: Direction) -> bool {
        self.inner.valid(value, direction)
    }
}

impl<T: ?Sized, P: SavePolicy<T>> SavePolicy<T> for Nested<P> {
    fn save(&self, context: &mut WriteContext, holder: &mut Element, value: &T) -> Result<(), Error> {
        context.inc_depth()?;
        let result = self.inner.save_named(context, holder, &self.name, value);
        context.dec_depth();
        result
    }
}

impl<T: ?Sized, P: LoadPolicy<T>> LoadPolicy<T> for Nested<P> {
    fn load(&self, context: &mut ReadContext, holder: &Element, value: &mut T) -> Result<(), Error> {
        context.inc_depth()?;
        let result = <P::Holder as Holder>::select(holder, &self.name)
            .into_iter()
            .try_for_each(|source| self.inner.load(context, source, value));
        context.dec_depth();
        result
    }
}
