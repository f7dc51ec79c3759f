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

//! How a slot is prepared before a value is loaded into it.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::policy::{OwnedPointer, Pointer, SharedPointer, Subtype};

pub trait Constructor<T> {
    /// A fresh value, or `None` when this strategy never replaces storage.
    fn construct(&self) -> Option<T>;

    /// Readies `slot` for loading.
    fn prepare(&self, slot: &mut T) {
        if let Some(fresh) = self.construct() {
            *slot = fresh;
        }
    }
}

/// Resets the slot to `T::default()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultConstructor;

impl<T: Default> Constructor<T> for DefaultConstructor {
    #[inline(always)]
    fn construct(&self) -> Option<T> {
        Some(T::default())
    }
}

/// Loads through the caller's existing storage without replacing it.
#[derive(Clone, Copy, Debug, Default)]
pub struct InPlace;

impl<T> Constructor<T> for InPlace {
    #[inline(always)]
    fn construct(&self) -> Option<T> {
        None
    }
}

/// Allocates a `Y` behind an owning pointer (`Box`, `Option<Box>`).
///
/// An exclusively owned pointee that already is a `Y` is kept.
pub struct HeapAllocate<Y>(PhantomData<fn() -> Y>);

/// Allocates a `Y` behind a sharing pointer (`Rc`, `Arc` and their
/// `Option` forms).
///
/// An exclusively owned pointee that already is a `Y` is kept.
pub struct SharedAllocate<Y>(PhantomData<fn() -> Y>);

macro_rules! impl_allocator_traits {
    ($name:ident) => {
        impl<Y> $name<Y> {
            pub const fn new() -> Self {
                $name(PhantomData)
            }
        }

        impl<Y> Default for $name<Y> {
            fn default() -> Self {
                $name::new()
            }
        }

        impl<Y> Clone for $name<Y> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<Y> Copy for $name<Y> {}

        impl<Y> fmt::Debug for $name<Y> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>", stringify!($name), type_name::<Y>())
            }
        }
    };
}

impl_allocator_traits!(HeapAllocate);
impl_allocator_traits!(SharedAllocate);

#[inline(always)]
fn reusable<Y: Subtype<P::Target>, P: Pointer>(slot: &P) -> bool {
    slot.is_exclusive() && slot.target().and_then(Y::downcast_ref).is_some()
}

impl<Y, P> Constructor<P> for HeapAllocate<Y>
where
    P: OwnedPointer,
    Y: Subtype<P::Target> + Default,
{
    fn construct(&self) -> Option<P> {
        Some(P::allocate(Y::default()))
    }

    fn prepare(&self, slot: &mut P) {
        if !reusable::<Y, P>(slot) {
            *slot = P::allocate(Y::default());
        }
    }
}

impl<Y, P> Constructor<P> for SharedAllocate<Y>
where
    P: SharedPointer,
    Y: Subtype<P::Target> + Default,
{
    fn construct(&self) -> Option<P> {
        Some(P::allocate_shared(Y::default()))
    }

    fn prepare(&self, slot: &mut P) {
        if !reusable::<Y, P>(slot) {
            *slot = P::allocate_shared(Y::default());
        }
    }
}
