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


//! Sequences of pointers whose items are saved under the name of their
//! concrete subtype.
//!
//! One [`SubtypeSet`] covers every subtype of a field, so saving walks the
//! sequence once and `[A, B, A]` comes out as `<a/><b/><a/>`. Loading
//! dispatches each child by name and appends in document order.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::ops::BitAnd;

use log::{debug, trace};

use crate::binding::{
    Attach, BindingList, BothSides, Chain, Entry, LoadOnly, LoadSide, ReadWrite, SaveOnly,
    SaveSide, Slot, SlotMut,
};
use crate::constructor::{Constructor, HeapAllocate, SharedAllocate};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::policy::{Direction, LoadPolicy, PointerIndirect, SavePolicy, Sequence};
use crate::probe::{HolderKind, HolderRef};
use crate::tree::Element;

/// How a [`SubtypeSet`] allocates the items it loads.
pub trait Allocation {
    type Allocator<Y>: Default;
}

/// Items are `Box` (or `Option<Box>`) pointers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Boxed;

/// Items are `Rc` or `Arc` pointers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counted;

impl Allocation for Boxed {
    type Allocator<Y> = HeapAllocate<Y>;
}

impl Allocation for Counted {
    type Allocator<Y> = SharedAllocate<Y>;
}

type Item<R> = <<R as Slot>::Target as Sequence>::Item;

trait Variant<P> {
    fn name(&self) -> &str;

    fn accepts(&self, item: &P) -> bool;

    fn save(&self, context: &mut WriteContext, holder: &mut Element, item: &P)
        -> Result<(), Error>;

    fn load(&self, context: &mut ReadContext, holder: &Element) -> Result<P, Error>;
}

struct Tagged<Q, K> {
    name: String,
    policy: Q,
    constructor: K,
}

impl<P, Q, K> Variant<P> for Tagged<Q, K>
where
    Q: SavePolicy<P, Holder = Element> + LoadPolicy<P, Holder = Element>,
    K: Constructor<P>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, item: &P) -> bool {
        self.policy.valid(item, Direction::Save)
    }

    fn save(
        &self,
        context: &mut WriteContext,
        holder: &mut Element,
        item: &P,
    ) -> Result<(), Error> {
        self.policy.save(context, holder, item)
    }

    fn load(&self, context: &mut ReadContext, holder: &Element) -> Result<P, Error> {
        let mut item = self.constructor.construct().ok_or_else(|| {
            Error::configuration(format!(
                "subtype `{}` needs a constructor that allocates items",
                self.name
            ))
        })?;
        if self.policy.valid(&item, Direction::Load) {
            self.policy.load(context, holder, &mut item)?;
        }
        Ok(item)
    }
}

/// A sequence of pointers bound under one name per concrete subtype.
///
/// Built with [`as_subtype_set`](crate::bind::as_subtype_set) or
/// [`as_shared_subtype_set`](crate::bind::as_shared_subtype_set) and
/// extended with [`subtype`](SubtypeSet::subtype). Items matching no
/// registered subtype are skipped on save. When several subtypes match an
/// item, the first registered one wins.
pub struct SubtypeSet<R, A = Boxed>
where
    R: Slot,
    R::Target: Sequence,
{
    slot: R,
    variants: Vec<Box<dyn Variant<Item<R>>>>,
    allocation: PhantomData<fn() -> A>,
}

impl<R, A> SubtypeSet<R, A>
where
    R: Slot,
    R::Target: Sequence,
    A: Allocation,
{
    pub fn new(slot: R) -> Self {
        SubtypeSet {
            slot,
            variants: Vec::new(),
            allocation: PhantomData,
        }
    }

    /// Registers `Y` under the element name `name`.
    pub fn subtype<Y: 'static>(mut self, name: impl Into<String>) -> Self
    where
        PointerIndirect<Y>:
            SavePolicy<Item<R>, Holder = Element> + LoadPolicy<Item<R>, Holder = Element>,
        A::Allocator<Y>: Constructor<Item<R>> + 'static,
    {
        self.variants.push(Box::new(Tagged {
            name: name.into(),
            policy: PointerIndirect::<Y>::new(),
            constructor: <A::Allocator<Y> as Default>::default(),
        }));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variants.iter().map(|v| v.name())
    }

    fn save(&self, context: &mut WriteContext, parent: &mut Element) -> Result<(), Error> {
        self.slot.with(|sequence| {
            for item in sequence.items() {
                match self.variants.iter().find(|v| v.accepts(item)) {
                    Some(variant) => {
                        let holder = parent.add_child(Element::new(variant.name()))?;
                        variant.save(context, holder, item)?;
                    }
                    None => debug!(
                        "skipping a `{}` under `{}`: no registered subtype matches",
                        type_name::<Item<R>>(),
                        parent.name()
                    ),
                }
            }
            Ok(())
        })
    }

    fn load(&mut self, context: &mut ReadContext, source: HolderRef<'_>) -> Result<(), Error>
    where
        R: SlotMut,
    {
        let HolderRef::Element(holder) = source else {
            trace!("subtype set ignores a holder of kind {}", source.kind());
            return Ok(());
        };
        let Some(variant) = self.variants.iter().find(|v| v.name() == holder.name()) else {
            trace!("no subtype registered as `{}`", holder.name());
            return Ok(());
        };
        let item = variant.load(context, holder)?;
        self.slot.with_mut(|sequence| {
            sequence.push_item(item);
            Ok(())
        })
    }

    fn first_name(&self) -> &str {
        self.variants.first().map_or("", |v| v.name())
    }
}

impl<R, A> fmt::Debug for SubtypeSet<R, A>
where
    R: Slot,
    R::Target: Sequence,
    A: Allocation,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubtypeSet")
            .field("item", &type_name::<Item<R>>())
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl<R, A> Entry for SaveSide<SubtypeSet<R, A>>
where
    R: Slot,
    R::Target: Sequence,
    A: Allocation,
{
    fn name(&self) -> &str {
        self.0.first_name()
    }

    fn names(&self) -> Vec<&str> {
        self.0.names().collect()
    }

    fn kind(&self) -> HolderKind {
        HolderKind::Element
    }

    fn save(&self, context: &mut WriteContext, parent: &mut Element) -> Result<(), Error> {
        self.0.save(context, parent)
    }

    fn load(&mut self, _: &mut ReadContext, _: HolderRef<'_>) -> Result<(), Error> {
        Err(Error::configuration(format!(
            "subtype set `{}` was attached for saving only",
            self.0.first_name()
        )))
    }
}

impl<R, A> Entry for LoadSide<SubtypeSet<R, A>>
where
    R: SlotMut,
    R::Target: Sequence,
    A: Allocation,
{
    fn name(&self) -> &str {
        self.0.first_name()
    }

    fn names(&self) -> Vec<&str> {
        self.0.names().collect()
    }

    fn kind(&self) -> HolderKind {
        HolderKind::Element
    }

    fn save(&self, _: &mut WriteContext, _: &mut Element) -> Result<(), Error> {
        Err(Error::configuration(format!(
            "subtype set `{}` was attached for loading only",
            self.0.first_name()
        )))
    }

    fn load(&mut self, context: &mut ReadContext, source: HolderRef<'_>) -> Result<(), Error> {
        self.0.load(context, source)
    }
}

impl<R, A> Entry for BothSides<SubtypeSet<R, A>>
where
    R: SlotMut,
    R::Target: Sequence,
    A: Allocation,
{
    fn name(&self) -> &str {
        self.0.first_name()
    }

    fn names(&self) -> Vec<&str> {
        self.0.names().collect()
    }

    fn kind(&self) -> HolderKind {
        HolderKind::Element
    }

    fn save(&self, context: &mut WriteContext, parent: &mut Element) -> Result<(), Error> {
        self.0.save(context, parent)
    }

    fn load(&mut self, context: &mut ReadContext, source: HolderRef<'_>) -> Result<(), Error> {
        self.0.load(context, source)
    }
}

impl<'a, R, A> Attach<'a, SaveOnly> for SubtypeSet<R, A>
where
    R: Slot + 'a,
    R::Target: Sequence,
    Item<R>: 'a,
    A: Allocation + 'a,
{
    fn attach_to(self, list: &mut BindingList<'a, SaveOnly>) {
        list.push(Box::new(SaveSide(self)));
    }
}

impl<'a, R, A> Attach<'a, LoadOnly> for SubtypeSet<R, A>
where
    R: SlotMut + 'a,
    R::Target: Sequence,
    Item<R>: 'a,
    A: Allocation + 'a,
{
    fn attach_to(self, list: &mut BindingList<'a, LoadOnly>) {
        list.push(Box::new(LoadSide(self)));
    }
}

impl<'a, R, A> Attach<'a, ReadWrite> for SubtypeSet<R, A>
where
    R: SlotMut + 'a,
    R::Target: Sequence,
    Item<R>: 'a,
    A: Allocation + 'a,
{
    fn attach_to(self, list: &mut BindingList<'a, ReadWrite>) {
        list.push(Box::new(BothSides(self)));
    }
}

impl<R, A, Rhs> BitAnd<Rhs> for SubtypeSet<R, A>
where
    R: Slot,
    R::Target: Sequence,
{
    type Output = Chain<Self, Rhs>;

    fn bitand(self, rhs: Rhs) -> Self::Output {
        Chain(self, rhs)
    }
}
