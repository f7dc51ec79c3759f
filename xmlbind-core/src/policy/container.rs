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

//! One child element per item of a homogeneous sequence.

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::Hash;

use log::trace;

use super::{Direction, LoadPolicy, Policy, SavePolicy};
use crate::constructor::{Constructor, DefaultConstructor};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::misconfigured;
use crate::tree::Element;

/// A sequence that can be walked in order and grown at its insertion point.
pub trait Sequence {
    type Item;
    type Iter<'s>: Iterator<Item = &'s Self::Item>
    where
        Self: 's;

    fn items(&self) -> Self::Iter<'_>;

    fn push_item(&mut self, item: Self::Item);
}

impl<T> Sequence for Vec<T> {
    type Item = T;
    type Iter<'s> = std::slice::Iter<'s, T> where Self: 's;

    fn items(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn push_item(&mut self, item: T) {
        self.push(item)
    }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;
    type Iter<'s> = std::collections::vec_deque::Iter<'s, T> where Self: 's;

    fn items(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn push_item(&mut self, item: T) {
        self.push_back(item)
    }
}

impl<T> Sequence for LinkedList<T> {
    type Item = T;
    type Iter<'s> = std::collections::linked_list::Iter<'s, T> where Self: 's;

    fn items(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn push_item(&mut self, item: T) {
        self.push_back(item)
    }
}

impl<T: Ord> Sequence for BTreeSet<T> {
    type Item = T;
    type Iter<'s> = std::collections::btree_set::Iter<'s, T> where Self: 's;

    fn items(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn push_item(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T: Eq + Hash> Sequence for HashSet<T> {
    type Item = T;
    type Iter<'s> = std::collections::hash_set::Iter<'s, T> where Self: 's;

    fn items(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn push_item(&mut self, item: T) {
        self.insert(item);
    }
}

/// Saves every item passing the item policy's `valid` as a sibling element
/// named after the binding; loads one constructed item per matching child.
///
/// The generic serializer calls `load` once per matching child, so items
/// come back in document order. Only [`SavePolicy::save_named`] is
/// meaningful on save: a set has no single holder of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContainerElementSet<P, K = DefaultConstructor> {
    item: P,
    constructor: K,
}

impl<P, K> ContainerElementSet<P, K> {
    pub fn new(item: P, constructor: K) -> Self {
        ContainerElementSet { item, constructor }
    }
}

impl<S, P, K> Policy<S> for ContainerElementSet<P, K>
where
    S: Sequence,
    P: Policy<S::Item, Holder = Element>,
{
    type Holder = Element;
}

impl<S, P, K> SavePolicy<S> for ContainerElementSet<P, K>
where
    S: Sequence,
    P: SavePolicy<S::Item, Holder = Element>,
{
    fn save(&self, _: &mut WriteContext, holder: &mut Element, _: &S) -> Result<(), Error> {
        misconfigured!(format!(
            "an element set cannot be saved into the single holder `{}`; bind it by name",
            holder.name()
        ))
    }

    fn save_named(
        &self,
        context: &mut WriteContext,
        parent: &mut Element,
        name: &str,
        value: &S,
    ) -> Result<(), Error> {
        let mut first = None;
        for item in value.items() {
            if !self.item.valid(item, Direction::Save) {
                continue;
            }
            let position = parent.child_count();
            let holder = parent.add_child(Element::new(name))?;
            self.item.save(context, holder, item)?;
            first.get_or_insert(position);
        }
        match first {
            Some(position) => trace!(
                "element set `{}` starts at child {} of `{}`",
                name,
                position,
                parent.name()
            ),
            None => trace!("element set `{}` saved no items", name),
        }
        Ok(())
    }
}

impl<S, P, K> LoadPolicy<S> for ContainerElementSet<P, K>
where
    S: Sequence,
    P: LoadPolicy<S::Item, Holder = Element>,
    K: Constructor<S::Item>,
{
    fn load(&self, context: &mut ReadContext, holder: &Element, value: &mut S) -> Result<(), Error> {
        let Some(mut item) = self.constructor.construct() else {
            misconfigured!(format!(
                "items of the element set at `{}` need a constructor that can allocate",
                holder.name()
            ));
        };
        if self.item.valid(&item, Direction::Load) {
            self.item.load(context, holder, &mut item)?;
        } else {
            trace!("constructed item for `{}` is not loadable", holder.name());
        }
        value.push_item(item);
        Ok(())
    }
}
