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

/// Implements [`Load`](crate::probe::Load) and [`Save`](crate::probe::Save)
/// for a struct from one list of bindings.
///
/// Each entry reads `"name" => factory(field, args...)`, where `factory` is
/// any function of [`bind`](crate::bind) (with its subtype argument for the
/// pointer factories) and `args` are its remaining arguments, followed by
/// optional [`Field`](crate::binding::Field) adapters such as `.optional()`
/// or `.nested("item")`. The save side binds `&self.field`, the load side
/// `&mut self.field`, so both directions share one declaration.
///
/// A single pointer bound under several names, one per concrete subtype, is
/// written as a group `field => ["name" => factory::<Subtype>, ...]`; its
/// load bindings share the field through a [`Shared`](crate::binding::Shared)
/// slot. A sequence of pointers is written
/// `field => as_subtype_set["name" => Subtype, ...]` (or
/// `as_shared_subtype_set`) and keeps its item order.
///
/// ```
/// use xmlbind_core::{xml_element, XmlBind};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Monster {
///     name: String,
///     hp: u32,
///     nickname: Option<String>,
///     digits: Vec<u8>,
/// }
///
/// xml_element!(Monster {
///     "name" => as_attribute(name),
///     "hp" => as_text(hp),
///     "nickname" => as_text(nickname).optional(),
///     "digits" => as_fixed_width_text(digits, 1),
/// });
///
/// let bind = XmlBind::default().indent(None).declaration(false);
/// let rex = Monster { name: "Rex".into(), hp: 100, nickname: None, digits: vec![4, 2] };
/// let text = bind.save_to_string("monster", &rex).unwrap();
/// assert_eq!(text, r#"<monster name="Rex"><hp>100</hp><digits>42</digits></monster>"#);
/// assert_eq!(bind.load_from_str::<Monster>(&text, "monster").unwrap(), rex);
/// ```
#[macro_export]
macro_rules! xml_element {
    (@save $serializer:ident $this:ident) => {};
    (@save $serializer:ident $this:ident
        $name:literal => $factory:ident $(::<$($generic:ty),+>)? ($field:tt $(, $extra:expr)*)
            $(.$adapter:ident($($arg:expr),*))*
        $(, $($rest:tt)*)?
    ) => {
        $serializer.attach($crate::bind::nvp(
            $name,
            $crate::bind::$factory $(::<$($generic),+, _>)? (&$this.$field $(, $extra)*)
                $(.$adapter($($arg),*))*,
        ))?;
        $($crate::xml_element!(@save $serializer $this $($rest)*);)?
    };
    (@save $serializer:ident $this:ident
        $field:tt => $factory:ident [ $($name:literal => $subtype:ty),* $(,)? ]
        $(, $($rest:tt)*)?
    ) => {
        $serializer.attach(
            $crate::bind::$factory(&$this.$field) $(.subtype::<$subtype>($name))*
        )?;
        $($crate::xml_element!(@save $serializer $this $($rest)*);)?
    };
    (@save $serializer:ident $this:ident
        $field:tt => [
            $(
                $name:literal => $factory:ident $(::<$($generic:ty),+>)?
                    $(($($extra:expr),+))?
                    $(.$adapter:ident($($arg:expr),*))*
            ),* $(,)?
        ]
        $(, $($rest:tt)*)?
    ) => {
        $(
            $serializer.attach($crate::bind::nvp(
                $name,
                $crate::bind::$factory $(::<$($generic),+, _>)?
                    (&$this.$field $($(, $extra)+)?)
                    $(.$adapter($($arg),*))*,
            ))?;
        )*
        $($crate::xml_element!(@save $serializer $this $($rest)*);)?
    };

    (@load $serializer:ident $this:ident) => {};
    (@load $serializer:ident $this:ident
        $name:literal => $factory:ident $(::<$($generic:ty),+>)? ($field:tt $(, $extra:expr)*)
            $(.$adapter:ident($($arg:expr),*))*
        $(, $($rest:tt)*)?
    ) => {
        $serializer.attach($crate::bind::nvp(
            $name,
            $crate::bind::$factory $(::<$($generic),+, _>)? (&mut $this.$field $(, $extra)*)
                $(.$adapter($($arg),*))*,
        ))?;
        $($crate::xml_element!(@load $serializer $this $($rest)*);)?
    };
    (@load $serializer:ident $this:ident
        $field:tt => $factory:ident [ $($name:literal => $subtype:ty),* $(,)? ]
        $(, $($rest:tt)*)?
    ) => {
        $serializer.attach(
            $crate::bind::$factory(&mut $this.$field) $(.subtype::<$subtype>($name))*
        )?;
        $($crate::xml_element!(@load $serializer $this $($rest)*);)?
    };
    (@load $serializer:ident $this:ident
        $field:tt => [
            $(
                $name:literal => $factory:ident $(::<$($generic:ty),+>)?
                    $(($($extra:expr),+))?
                    $(.$adapter:ident($($arg:expr),*))*
            ),* $(,)?
        ]
        $(, $($rest:tt)*)?
    ) => {
        let shared = $crate::binding::Shared::new(&mut $this.$field);
        $(
            $serializer.attach($crate::bind::nvp(
                $name,
                $crate::bind::$factory $(::<$($generic),+, _>)?
                    (shared.clone() $($(, $extra)+)?)
                    $(.$adapter($($arg),*))*,
            ))?;
        )*
        $($crate::xml_element!(@load $serializer $this $($rest)*);)?
    };

    ($ty:ty { $($body:tt)* }) => {
        impl $crate::probe::Save<$crate::tree::Element> for $ty {
            fn save(
                &self,
                context: &mut $crate::context::WriteContext,
                holder: &mut $crate::tree::Element,
            ) -> ::std::result::Result<(), $crate::error::Error> {
                #[allow(unused_mut)]
                let mut serializer = $crate::serializer::GenericSaver::with_config(context.config());
                $crate::xml_element!(@save serializer self $($body)*);
                serializer.save(context, holder)
            }
        }

        impl $crate::probe::Load<$crate::tree::Element> for $ty {
            fn load(
                &mut self,
                context: &mut $crate::context::ReadContext,
                holder: &$crate::tree::Element,
            ) -> ::std::result::Result<(), $crate::error::Error> {
                #[allow(unused_mut)]
                let mut serializer = $crate::serializer::GenericLoader::with_config(context.config());
                $crate::xml_element!(@load serializer self $($body)*);
                serializer.load(context, holder)
            }
        }
    };
}
