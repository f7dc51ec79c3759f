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

//! Factory functions pairing a slot with the policy and constructor for
//! its shape.
//!
//! `as_*` accept either `&T` or `&mut T`; the `to_*` and `from_*` variants
//! pin the slot to `&T` (save) or `&mut T` (load).

use crate::binding::{Binding, Field, Slot};
use crate::constructor::{DefaultConstructor, HeapAllocate, InPlace, SharedAllocate};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::policy::{
    ContainerElementSet, ContainerTextJoin, Custom, Direct, PointerIndirect, Sequence, TextConvert,
};
use crate::subtype_set::{Boxed, Counted, SubtypeSet};
use crate::tree::{Attribute, Element};

/// Names a field.
pub fn nvp<R, P, C>(name: impl Into<String>, field: Field<R, P, C>) -> Binding<R, P, C> {
    Binding::new(name, field)
}

/// A scalar as the value of an attribute.
pub fn as_attribute<R: Slot>(slot: R) -> Field<R, TextConvert<Attribute>> {
    Field::new(slot, TextConvert::new(), DefaultConstructor)
}

pub fn to_attribute<T: ?Sized>(value: &T) -> Field<&T, TextConvert<Attribute>> {
    as_attribute(value)
}

pub fn from_attribute<T>(value: &mut T) -> Field<&mut T, TextConvert<Attribute>> {
    as_attribute(value)
}

/// A scalar as the text of a child element.
pub fn as_text<R: Slot>(slot: R) -> Field<R, TextConvert<Element>> {
    Field::new(slot, TextConvert::new(), DefaultConstructor)
}

pub fn to_text<T: ?Sized>(value: &T) -> Field<&T, TextConvert<Element>> {
    as_text(value)
}

pub fn from_text<T>(value: &mut T) -> Field<&mut T, TextConvert<Element>> {
    as_text(value)
}

/// A composite with its own `Load`/`Save` as a child element, loaded in
/// place.
pub fn as_element<R: Slot>(slot: R) -> Field<R, Direct<Element>, InPlace> {
    Field::new(slot, Direct::new(), InPlace)
}

pub fn to_element<T: ?Sized>(value: &T) -> Field<&T, Direct<Element>, InPlace> {
    as_element(value)
}

pub fn from_element<T>(value: &mut T) -> Field<&mut T, Direct<Element>, InPlace> {
    as_element(value)
}

/// A pointer whose pointee is saved only when it is a `Y`, and reallocated
/// as a `Y` on load unless it already is one.
pub fn as_subtype<Y, R: Slot>(slot: R) -> Field<R, PointerIndirect<Y>, HeapAllocate<Y>> {
    Field::new(slot, PointerIndirect::new(), HeapAllocate::new())
}

/// [`as_subtype`] for `Rc`/`Arc` pointers.
pub fn as_shared_subtype<Y, R: Slot>(slot: R) -> Field<R, PointerIndirect<Y>, SharedAllocate<Y>> {
    Field::new(slot, PointerIndirect::new(), SharedAllocate::new())
}

/// One child element per item of a sequence of composites.
pub fn as_element_set<R: Slot>(
    slot: R,
) -> Field<R, ContainerElementSet<Direct<Element>, DefaultConstructor>, InPlace> {
    Field::new(
        slot,
        ContainerElementSet::new(Direct::new(), DefaultConstructor),
        InPlace,
    )
}

/// One child element per item of a sequence of scalars, each item as the
/// element's text.
pub fn as_text_set<R: Slot>(
    slot: R,
) -> Field<R, ContainerElementSet<TextConvert<Element>, DefaultConstructor>, InPlace> {
    Field::new(
        slot,
        ContainerElementSet::new(TextConvert::new(), DefaultConstructor),
        InPlace,
    )
}

/// A sequence of `Box` pointers, each item saved under the name of its
/// subtype. Register the subtypes with
/// [`subtype`](crate::subtype_set::SubtypeSet::subtype).
pub fn as_subtype_set<R>(slot: R) -> SubtypeSet<R, Boxed>
where
    R: Slot,
    R::Target: Sequence,
{
    SubtypeSet::new(slot)
}

/// [`as_subtype_set`] for sequences of `Rc`/`Arc` pointers.
pub fn as_shared_subtype_set<R>(slot: R) -> SubtypeSet<R, Counted>
where
    R: Slot,
    R::Target: Sequence,
{
    SubtypeSet::new(slot)
}

/// A sequence of scalars as the concatenated text of one child element.
pub fn as_text_join<R: Slot>(slot: R) -> Field<R, ContainerTextJoin<Element>> {
    Field::new(slot, ContainerTextJoin::new(), DefaultConstructor)
}

/// A sequence of fixed-width scalars as the text of one child element.
pub fn as_fixed_width_text<R: Slot>(slot: R, width: usize) -> Field<R, ContainerTextJoin<Element>> {
    Field::new(slot, ContainerTextJoin::fixed_width(width), DefaultConstructor)
}

/// A value read and written by closures over its own element.
pub fn as_custom_element<R, L, S>(
    slot: R,
    load: L,
    save: S,
) -> Field<R, Custom<L, S, Element>, InPlace>
where
    R: Slot,
    L: Fn(&mut ReadContext, &Element, &mut R::Target) -> Result<(), Error>,
    S: Fn(&mut WriteContext, &mut Element, &R::Target) -> Result<(), Error>,
{
    Field::new(slot, Custom::new(load, save), InPlace)
}

pub fn to_custom_element<T: ?Sized, S>(
    value: &T,
    save: S,
) -> Field<&T, Custom<(), S, Element>, InPlace>
where
    S: Fn(&mut WriteContext, &mut Element, &T) -> Result<(), Error>,
{
    Field::new(value, Custom::saver(save), InPlace)
}

pub fn from_custom_element<T, L>(
    value: &mut T,
    load: L,
) -> Field<&mut T, Custom<L, (), Element>, InPlace>
where
    L: Fn(&mut ReadContext, &Element, &mut T) -> Result<(), Error>,
{
    Field::new(value, Custom::loader(load), InPlace)
}

/// A value read and written by closures over its own attribute.
pub fn as_custom_attribute<R, L, S>(
    slot: R,
    load: L,
    save: S,
) -> Field<R, Custom<L, S, Attribute>, InPlace>
where
    R: Slot,
    L: Fn(&mut ReadContext, &Attribute, &mut R::Target) -> Result<(), Error>,
    S: Fn(&mut WriteContext, &mut Attribute, &R::Target) -> Result<(), Error>,
{
    Field::new(slot, Custom::new(load, save), InPlace)
}

pub fn to_custom_attribute<T: ?Sized, S>(
    value: &T,
    save: S,
) -> Field<&T, Custom<(), S, Attribute>, InPlace>
where
    S: Fn(&mut WriteContext, &mut Attribute, &T) -> Result<(), Error>,
{
    Field::new(value, Custom::saver(save), InPlace)
}

pub fn from_custom_attribute<T, L>(
    value: &mut T,
    load: L,
) -> Field<&mut T, Custom<L, (), Attribute>, InPlace>
where
    L: Fn(&mut ReadContext, &Attribute, &mut T) -> Result<(), Error>,
{
    Field::new(value, Custom::loader(load), InPlace)
}
