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

//! Pointer indirection with run-time subtype resolution.
//!
//! A polymorphic field or collection holds `Box<dyn Base>` (or `Rc`/`Arc`,
//! optionally wrapped in `Option`). [`PointerIndirect<Y>`] only accepts
//! pointees that downcast to `Y`. A single pointer gets one binding per
//! concrete subtype, reaching the field through a
//! [`Shared`](crate::binding::Shared) slot on load. A sequence of pointers
//! goes through a [`SubtypeSet`](crate::subtype_set::SubtypeSet), which
//! saves `[A, B, A]` as `a`, `b`, `a` and loads children in document order.

use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use super::{Direction, LoadPolicy, Policy, SavePolicy};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::{Holder, Load, Save};
use crate::tree::Element;

/// Access to the concrete value behind a trait object.
///
/// Implemented for every `'static` type; a polymorphic base trait lists it
/// as a supertrait so that [`register_subtypes!`](crate::register_subtypes)
/// can downcast `dyn Base`.
pub trait Polymorphic: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> Polymorphic for T {
    #[inline(always)]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline(always)]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// `Self` is a concrete type that can stand behind a `B` pointer.
pub trait Subtype<B: ?Sized>: Sized + 'static {
    fn upcast_box(self: Box<Self>) -> Box<B>;
    fn upcast_rc(self: Rc<Self>) -> Rc<B>;
    fn upcast_arc(self: Arc<Self>) -> Arc<B>;
    fn downcast_ref(base: &B) -> Option<&Self>;
    fn downcast_mut(base: &mut B) -> Option<&mut Self>;
}

impl<T: 'static> Subtype<T> for T {
    #[inline(always)]
    fn upcast_box(self: Box<Self>) -> Box<T> {
        self
    }

    #[inline(always)]
    fn upcast_rc(self: Rc<Self>) -> Rc<T> {
        self
    }

    #[inline(always)]
    fn upcast_arc(self: Arc<Self>) -> Arc<T> {
        self
    }

    #[inline(always)]
    fn downcast_ref(base: &T) -> Option<&Self> {
        Some(base)
    }

    #[inline(always)]
    fn downcast_mut(base: &mut T) -> Option<&mut Self> {
        Some(base)
    }
}

/// Declares the concrete subtypes of a polymorphic trait.
///
/// The trait must have [`Polymorphic`] as a supertrait.
///
/// ```
/// use xmlbind_core::policy::Polymorphic;
/// use xmlbind_core::register_subtypes;
///
/// trait Shape: Polymorphic {}
/// struct Circle;
/// struct Square;
/// impl Shape for Circle {}
/// impl Shape for Square {}
///
/// register_subtypes!(Shape: Circle, Square);
/// ```
#[macro_export]
macro_rules! register_subtypes {
    ($base:ident: $($subtype:ty),+ $(,)?) => {
        $(
            impl $crate::policy::Subtype<dyn $base> for $subtype {
                #[inline(always)]
                fn upcast_box(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn $base> {
                    self
                }

                #[inline(always)]
                fn upcast_rc(self: ::std::rc::Rc<Self>) -> ::std::rc::Rc<dyn $base> {
                    self
                }

                #[inline(always)]
                fn upcast_arc(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<dyn $base> {
                    self
                }

                #[inline(always)]
                fn downcast_ref(base: &(dyn $base)) -> ::std::option::Option<&Self> {
                    $crate::policy::Polymorphic::as_any(base).downcast_ref::<Self>()
                }

                #[inline(always)]
                fn downcast_mut(base: &mut (dyn $base)) -> ::std::option::Option<&mut Self> {
                    $crate::policy::Polymorphic::as_any_mut(base).downcast_mut::<Self>()
                }
            }
        )+
    };
}

/// An owning or sharing pointer, possibly absent.
pub trait Pointer {
    type Target: ?Sized;

    fn target(&self) -> Option<&Self::Target>;

    /// The pointee, when it is present and owned exclusively.
    fn target_mut(&mut self) -> Option<&mut Self::Target>;

    fn is_exclusive(&self) -> bool;
}

impl<T: ?Sized> Pointer for Box<T> {
    type Target = T;

    fn target(&self) -> Option<&T> {
        Some(self.as_ref())
    }

    fn target_mut(&mut self) -> Option<&mut T> {
        Some(self.as_mut())
    }

    fn is_exclusive(&self) -> bool {
        true
    }
}

impl<T: ?Sized> Pointer for Rc<T> {
    type Target = T;

    fn target(&self) -> Option<&T> {
        Some(self.as_ref())
    }

    fn target_mut(&mut self) -> Option<&mut T> {
        Rc::get_mut(self)
    }

    fn is_exclusive(&self) -> bool {
        Rc::strong_count(self) == 1 && Rc::weak_count(self) == 0
    }
}

impl<T: ?Sized> Pointer for Arc<T> {
    type Target = T;

    fn target(&self) -> Option<&T> {
        Some(self.as_ref())
    }

    fn target_mut(&mut self) -> Option<&mut T> {
        Arc::get_mut(self)
    }

    fn is_exclusive(&self) -> bool {
        Arc::strong_count(self) == 1 && Arc::weak_count(self) == 0
    }
}

impl<P: Pointer> Pointer for Option<P> {
    type Target = P::Target;

    fn target(&self) -> Option<&P::Target> {
        self.as_ref().and_then(Pointer::target)
    }

    fn target_mut(&mut self) -> Option<&mut P::Target> {
        self.as_mut().and_then(Pointer::target_mut)
    }

    fn is_exclusive(&self) -> bool {
        self.as_ref().is_some_and(Pointer::is_exclusive)
    }
}

/// A pointer that can allocate a fresh, exclusively owned pointee.
pub trait OwnedPointer: Pointer {
    fn allocate<Y: Subtype<Self::Target>>(value: Y) -> Self;
}

impl<T: ?Sized + 'static> OwnedPointer for Box<T> {
    fn allocate<Y: Subtype<T>>(value: Y) -> Self {
        Y::upcast_box(Box::new(value))
    }
}

impl<P: OwnedPointer> OwnedPointer for Option<P> {
    fn allocate<Y: Subtype<P::Target>>(value: Y) -> Self {
        Some(P::allocate(value))
    }
}

/// A pointer that allocates with shared ownership.
pub trait SharedPointer: Pointer {
    fn allocate_shared<Y: Subtype<Self::Target>>(value: Y) -> Self;
}

impl<T: ?Sized + 'static> SharedPointer for Rc<T> {
    fn allocate_shared<Y: Subtype<T>>(value: Y) -> Self {
        Y::upcast_rc(Rc::new(value))
    }
}

impl<T: ?Sized + 'static> SharedPointer for Arc<T> {
    fn allocate_shared<Y: Subtype<T>>(value: Y) -> Self {
        Y::upcast_arc(Arc::new(value))
    }
}

impl<P: SharedPointer> SharedPointer for Option<P> {
    fn allocate_shared<Y: Subtype<P::Target>>(value: Y) -> Self {
        Some(P::allocate_shared(value))
    }
}

/// Dereferences a [`Pointer`] and delegates to the concrete subtype `Y`.
///
/// `valid` is a downcast check: on save a pointee of another type (or no
/// pointee) is skipped; on load the pointee must also be exclusively owned
/// so it can be mutated. The binding's constructor runs first and replaces
/// a mismatching pointee with a fresh `Y`.
pub struct PointerIndirect<Y, H = Element>(PhantomData<fn() -> (Y, H)>);

impl<Y, H> PointerIndirect<Y, H> {
    pub const fn new() -> Self {
        PointerIndirect(PhantomData)
    }
}

impl<Y, H> Default for PointerIndirect<Y, H> {
    fn default() -> Self {
        PointerIndirect::new()
    }
}

impl<Y, H> Clone for PointerIndirect<Y, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Y, H> Copy for PointerIndirect<Y, H> {}

impl<Y, H> fmt::Debug for PointerIndirect<Y, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointerIndirect<{}>", type_name::<Y>())
    }
}

impl<P, Y, H> Policy<P> for PointerIndirect<Y, H>
where
    P: Pointer,
    Y: Subtype<P::Target>,
    H: Holder,
{
    type Holder = H;

    fn valid(&self, value: &P, direction: Direction) -> bool {
        let matches = value.target().and_then(Y::downcast_ref).is_some();
        match direction {
            Direction::Save => matches,
            Direction::Load => matches && value.is_exclusive(),
        }
    }
}

impl<P, Y, H> SavePolicy<P> for PointerIndirect<Y, H>
where
    P: Pointer,
    Y: Subtype<P::Target> + Save<H>,
    H: Holder,
{
    fn save(&self, context: &mut WriteContext, holder: &mut H, value: &P) -> Result<(), Error> {
        let target = value.target().and_then(Y::downcast_ref).ok_or_else(|| {
            Error::configuration(format!("pointer does not hold a `{}`", type_name::<Y>()))
        })?;
        target.save(context, holder)
    }
}

impl<P, Y, H> LoadPolicy<P> for PointerIndirect<Y, H>
where
    P: Pointer,
    Y: Subtype<P::Target> + Load<H>,
    H: Holder,
{
    fn load(&self, context: &mut ReadContext, holder: &H, value: &mut P) -> Result<(), Error> {
        let target = value.target_mut().and_then(Y::downcast_mut).ok_or_else(|| {
            Error::configuration(format!(
                "pointer does not exclusively hold a `{}`",
                type_name::<Y>()
            ))
        })?;
        target.load(context, holder)
    }
}
