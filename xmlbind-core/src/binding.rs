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

//! Name-value bindings and their composition.
//!
//! A [`Binding`] pairs a name with a [`Field`]: a slot in caller-owned
//! storage, the policy that moves it to and from the tree, and the
//! constructor that prepares it before loading. Bindings are combined with
//! `&` into a flat, ordered chain, or collected at run time in a
//! [`BindingList`].

use std::any::type_name;
use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::ops::BitAnd;
use std::rc::Rc;

use log::{debug, trace};

use crate::constructor::{Constructor, DefaultConstructor, InPlace};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::policy::{Direction, LoadPolicy, Nested, Optional, Policy, SavePolicy};
use crate::probe::{Holder, HolderKind, HolderRef};
use crate::tree::Element;

/// Caller-owned storage a binding reads from.
pub trait Slot {
    type Target: ?Sized;

    fn with<O>(&self, f: impl FnOnce(&Self::Target) -> Result<O, Error>) -> Result<O, Error>;
}

/// Caller-owned storage a binding also writes to.
pub trait SlotMut: Slot {
    fn with_mut<O>(
        &mut self,
        f: impl FnOnce(&mut Self::Target) -> Result<O, Error>,
    ) -> Result<O, Error>;
}

impl<T: ?Sized> Slot for &T {
    type Target = T;

    #[inline(always)]
    fn with<O>(&self, f: impl FnOnce(&T) -> Result<O, Error>) -> Result<O, Error> {
        f(self)
    }
}

impl<T: ?Sized> Slot for &mut T {
    type Target = T;

    #[inline(always)]
    fn with<O>(&self, f: impl FnOnce(&T) -> Result<O, Error>) -> Result<O, Error> {
        f(self)
    }
}

impl<T: ?Sized> SlotMut for &mut T {
    #[inline(always)]
    fn with_mut<O>(&mut self, f: impl FnOnce(&mut T) -> Result<O, Error>) -> Result<O, Error> {
        f(self)
    }
}

/// A `&mut T` slot that several bindings hold at once.
///
/// The per-subtype bindings of one polymorphic field all load into the same
/// storage, each through a clone of one `Shared`. Entering the value through
/// one clone while another clone is using it is a configuration error.
pub struct Shared<'s, T: ?Sized>(Rc<RefCell<&'s mut T>>);

impl<'s, T: ?Sized> Shared<'s, T> {
    pub fn new(value: &'s mut T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }
}

impl<T: ?Sized> Clone for Shared<'_, T> {
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> fmt::Debug for Shared<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared<{}>", type_name::<T>())
    }
}

fn reentered<T: ?Sized>() -> Error {
    Error::configuration(format!(
        "shared `{}` slot was re-entered while in use",
        type_name::<T>()
    ))
}

impl<T: ?Sized> Slot for Shared<'_, T> {
    type Target = T;

    fn with<O>(&self, f: impl FnOnce(&T) -> Result<O, Error>) -> Result<O, Error> {
        let value = self.0.try_borrow().map_err(|_| reentered::<T>())?;
        f(&**value)
    }
}

impl<T: ?Sized> SlotMut for Shared<'_, T> {
    fn with_mut<O>(&mut self, f: impl FnOnce(&mut T) -> Result<O, Error>) -> Result<O, Error> {
        let mut value = self.0.try_borrow_mut().map_err(|_| reentered::<T>())?;
        f(&mut **value)
    }
}

/// A slot with its policy and constructor, not yet named.
#[derive(Clone, Debug)]
pub struct Field<R, P, C = DefaultConstructor> {
    slot: R,
    policy: P,
    constructor: C,
}

impl<R, P, C> Field<R, P, C> {
    pub fn new(slot: R, policy: P, constructor: C) -> Self {
        Field {
            slot,
            policy,
            constructor,
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn with_policy<Q>(self, policy: Q) -> Field<R, Q, C> {
        Field::new(self.slot, policy, self.constructor)
    }

    pub fn with_constructor<K>(self, constructor: K) -> Field<R, P, K> {
        Field::new(self.slot, self.policy, constructor)
    }

    /// Load through the existing value instead of resetting it first.
    pub fn in_place(self) -> Field<R, P, InPlace> {
        self.with_constructor(InPlace)
    }

    /// Lift the field over an `Option` slot.
    pub fn optional(self) -> Field<R, Optional<P>, InPlace> {
        Field::new(self.slot, Optional::new(self.policy), InPlace)
    }

    /// Move the value into holders called `name` under a wrapper element.
    pub fn nested(self, name: impl Into<Cow<'static, str>>) -> Field<R, Nested<P>, C> {
        Field::new(self.slot, Nested::new(name, self.policy), self.constructor)
    }

    pub fn named(self, name: impl Into<String>) -> Binding<R, P, C> {
        Binding::new(name, self)
    }
}

/// A named [`Field`]: one schema entry.
pub struct Binding<R, P, C = DefaultConstructor> {
    name: String,
    field: Field<R, P, C>,
}

impl<R, P, C> Binding<R, P, C> {
    pub fn new(name: impl Into<String>, field: Field<R, P, C>) -> Self {
        Binding {
            name: name.into(),
            field,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<R, P, C> fmt::Debug for Binding<R, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding").field("name", &self.name).finish()
    }
}

impl<R: Slot, P: Policy<R::Target>, C> Binding<R, P, C> {
    /// The holder kind this binding materializes, fixed by its policy.
    pub fn kind(&self) -> HolderKind {
        <P::Holder as Holder>::KIND
    }
}

impl<R: Slot, P: SavePolicy<R::Target>, C> Binding<R, P, C> {
    pub fn save(&self, context: &mut WriteContext, parent: &mut Element) -> Result<(), Error> {
        trace!("saving `{}` under `{}`", self.name, parent.name());
        let Field { slot, policy, .. } = &self.field;
        slot.with(|value| policy.save_named(context, parent, &self.name, value))
    }
}

impl<R, P, C> Binding<R, P, C>
where
    R: SlotMut,
    R::Target: Sized,
    P: LoadPolicy<R::Target>,
    C: Constructor<R::Target>,
{
    pub fn load(&mut self, context: &mut ReadContext, source: HolderRef<'_>) -> Result<(), Error> {
        let Some(holder) = <P::Holder as Holder>::cast(source) else {
            trace!("`{}` ignores a holder of kind {}", self.name, source.kind());
            return Ok(());
        };
        let name = &self.name;
        let Field {
            slot,
            policy,
            constructor,
        } = &mut self.field;
        slot.with_mut(|value| {
            constructor.prepare(value);
            if !policy.valid(value, Direction::Load) {
                debug!("skipping `{}`: the prepared value does not accept loading", name);
                return Ok(());
            }
            trace!("loading `{}`", name);
            policy.load(context, holder, value)
        })
    }
}

/// Which directions a schema supports.
pub trait Access: sealed::Sealed {}

/// Schemas that can save.
pub trait CanSave: Access {}

/// Schemas that can load.
pub trait CanLoad: Access {}

#[derive(Clone, Copy, Debug, Default)]
pub struct SaveOnly;

#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOnly;

#[derive(Clone, Copy, Debug, Default)]
pub struct ReadWrite;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::SaveOnly {}
    impl Sealed for super::LoadOnly {}
    impl Sealed for super::ReadWrite {}
}

impl Access for SaveOnly {}
impl Access for LoadOnly {}
impl Access for ReadWrite {}
impl CanSave for SaveOnly {}
impl CanSave for ReadWrite {}
impl CanLoad for LoadOnly {}
impl CanLoad for ReadWrite {}

/// A binding with its types erased, as stored in a schema.
pub(crate) trait Entry {
    fn name(&self) -> &str;

    /// Every name the entry dispatches on; most entries answer to one.
    fn names(&self) -> Vec<&str> {
        vec![self.name()]
    }

    fn kind(&self) -> HolderKind;
    fn save(&self, context: &mut WriteContext, parent: &mut Element) -> Result<(), Error>;
    fn load(&mut self, context: &mut ReadContext, source: HolderRef<'_>) -> Result<(), Error>;
}

pub(crate) struct SaveSide<B>(pub(crate) B);
pub(crate) struct LoadSide<B>(pub(crate) B);
pub(crate) struct BothSides<B>(pub(crate) B);

impl<R, P, C> Entry for SaveSide<Binding<R, P, C>>
where
    R: Slot,
    P: SavePolicy<R::Target>,
{
    fn name(&self) -> &str {
        self.0.name()
    }

    fn kind(&self) -> HolderKind {
        self.0.kind()
    }

    fn save(&self, context: &mut WriteContext, parent: &mut Element) -> Result<(), Error> {
        self.0.save(context, parent)
    }

    fn load(&mut self, _: &mut ReadContext, _: HolderRef<'_>) -> Result<(), Error> {
        Err(Error::configuration(format!(
            "binding `{}` was attached for saving only",
            self.0.name()
        )))
    }
}

impl<R, P, C> Entry for LoadSide<Binding<R, P, C>>
where
    R: SlotMut,
    R::Target: Sized,
    P: LoadPolicy<R::Target>,
    C: Constructor<R::Target>,
{
    fn name(&self) -> &str {
        self.0.name()
    }

    fn kind(&self) -> HolderKind {
        self.0.kind()
    }

    fn save(&self, _: &mut WriteContext, _: &mut Element) -> Result<(), Error> {
        Err(Error::configuration(format!(
            "binding `{}` was attached for loading only",
            self.0.name()
        )))
    }

    fn load(&mut self, context: &mut ReadContext, source: HolderRef<'_>) -> Result<(), Error> {
        self.0.load(context, source)
    }
}

impl<R, P, C> Entry for BothSides<Binding<R, P, C>>
where
    R: SlotMut,
    R::Target: Sized,
    P: SavePolicy<R::Target> + LoadPolicy<R::Target>,
    C: Constructor<R::Target>,
{
    fn name(&self) -> &str {
        self.0.name()
    }

    fn kind(&self) -> HolderKind {
        self.0.kind()
    }

    fn save(&self, context: &mut WriteContext, parent: &mut Element) -> Result<(), Error> {
        self.0.save(context, parent)
    }

    fn load(&mut self, context: &mut ReadContext, source: HolderRef<'_>) -> Result<(), Error> {
        self.0.load(context, source)
    }
}

/// An ordered, flat run-time list of bindings for a schema of access `A`.
pub struct BindingList<'a, A = ReadWrite> {
    entries: Vec<Box<dyn Entry + 'a>>,
    access: PhantomData<fn() -> A>,
}

impl<'a, A> BindingList<'a, A> {
    pub fn new() -> Self {
        BindingList {
            entries: Vec::new(),
            access: PhantomData,
        }
    }

    /// Appends `bindings` (a binding, a `&` chain or another list) in order.
    pub fn append<B: Attach<'a, A>>(&mut self, bindings: B) -> &mut Self {
        bindings.attach_to(self);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().flat_map(|e| e.names())
    }

    pub(crate) fn push(&mut self, entry: Box<dyn Entry + 'a>) {
        self.entries.push(entry);
    }

    pub(crate) fn into_entries(self) -> Vec<Box<dyn Entry + 'a>> {
        self.entries
    }
}

impl<A> Default for BindingList<'_, A> {
    fn default() -> Self {
        BindingList::new()
    }
}

impl<A> fmt::Debug for BindingList<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Two bindings (or chains) in declaration order, built with `&`.
#[derive(Debug)]
pub struct Chain<X, Y>(pub(crate) X, pub(crate) Y);

/// Something that flattens into a [`BindingList`] of access `A`.
pub trait Attach<'a, A> {
    fn attach_to(self, list: &mut BindingList<'a, A>);
}

impl<'a, R, P, C> Attach<'a, SaveOnly> for Binding<R, P, C>
where
    R: Slot + 'a,
    P: SavePolicy<R::Target> + 'a,
    C: 'a,
{
    fn attach_to(self, list: &mut BindingList<'a, SaveOnly>) {
        list.push(Box::new(SaveSide(self)));
    }
}

impl<'a, R, P, C> Attach<'a, LoadOnly> for Binding<R, P, C>
where
    R: SlotMut + 'a,
    R::Target: Sized,
    P: LoadPolicy<R::Target> + 'a,
    C: Constructor<R::Target> + 'a,
{
    fn attach_to(self, list: &mut BindingList<'a, LoadOnly>) {
        list.push(Box::new(LoadSide(self)));
    }
}

impl<'a, R, P, C> Attach<'a, ReadWrite> for Binding<R, P, C>
where
    R: SlotMut + 'a,
    R::Target: Sized,
    P: SavePolicy<R::Target> + LoadPolicy<R::Target> + 'a,
    C: Constructor<R::Target> + 'a,
{
    fn attach_to(self, list: &mut BindingList<'a, ReadWrite>) {
        list.push(Box::new(BothSides(self)));
    }
}

impl<'a, A, X: Attach<'a, A>, Y: Attach<'a, A>> Attach<'a, A> for Chain<X, Y> {
    fn attach_to(self, list: &mut BindingList<'a, A>) {
        self.0.attach_to(list);
        self.1.attach_to(list);
    }
}

impl<'a, A> Attach<'a, A> for BindingList<'a, A> {
    fn attach_to(self, list: &mut BindingList<'a, A>) {
        list.entries.extend(self.entries);
    }
}

impl<R, P, C, Rhs> BitAnd<Rhs> for Binding<R, P, C> {
    type Output = Chain<Self, Rhs>;

    fn bitand(self, rhs: Rhs) -> Self::Output {
        Chain(self, rhs)
    }
}

impl<X, Y, Rhs> BitAnd<Rhs> for Chain<X, Y> {
    type Output = Chain<Self, Rhs>;

    fn bitand(self, rhs: Rhs) -> Self::Output {
        Chain(self, rhs)
    }
}

impl<'a, A, Rhs: Attach<'a, A>> BitAnd<Rhs> for BindingList<'a, A> {
    type Output = BindingList<'a, A>;

    fn bitand(mut self, rhs: Rhs) -> Self::Output {
        self.append(rhs);
        self
    }
}
