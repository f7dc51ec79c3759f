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

use std::fmt;
use std::marker::PhantomData;

use super::{LoadPolicy, Policy, SavePolicy};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::{Holder, Load, Save};
use crate::tree::Element;

/// Forwards to the value's own [`Load`]/[`Save`] implementation.
pub struct Direct<H = Element>(PhantomData<fn() -> H>);

impl<H> Direct<H> {
    pub const fn new() -> Self {
        Direct(PhantomData)
    }
}

impl<H> Default for Direct<H> {
    fn default() -> Self {
        Direct::new()
    }
}

impl<H> Clone for Direct<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Direct<H> {}

impl<H> fmt::Debug for Direct<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Direct")
    }
}

impl<T: ?Sized, H: Holder> Policy<T> for Direct<H> {
    type Holder = H;
}

impl<T: ?Sized + Save<H>, H: Holder> SavePolicy<T> for Direct<H> {
    #[inline(always)]
    fn save(&self, context: &mut WriteContext, holder: &mut H, value: &T) -> Result<(), Error> {
        value.save(context, holder)
    }
}

impl<T: ?Sized + Load<H>, H: Holder> LoadPolicy<T> for Direct<H> {
    #[inline(always)]
    fn load(&self, context: &mut ReadContext, holder: &H, value: &mut T) -> Result<(), Error> {
        value.load(context, holder)
    }
}
