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

//! # xmlbind
//!
//! Declarative, statically typed binding of Rust values to XML documents,
//! for configuration files and object persistence without hand-written
//! visitors.
//!
//! ```rust
//! use xmlbind::{xml_element, XmlBind};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Ability {
//!     name: String,
//!     power: u8,
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Hero {
//!     name: String,
//!     abilities: Vec<Ability>,
//! }
//!
//! xml_element!(Ability {
//!     "name" => as_attribute(name),
//!     "power" => as_attribute(power),
//! });
//!
//! xml_element!(Hero {
//!     "name" => as_attribute(name),
//!     "abilities" => as_element_set(abilities).nested("ability"),
//! });
//!
//! let hero = Hero {
//!     name: "Superman".into(),
//!     abilities: vec![
//!         Ability { name: "flight".into(), power: 9 },
//!         Ability { name: "x-ray".into(), power: 7 },
//!     ],
//! };
//! let bind = XmlBind::default();
//! let text = bind.save_to_string("hero", &hero).unwrap();
//! let back: Hero = bind.load_from_str(&text, "hero").unwrap();
//! assert_eq!(back, hero);
//! ```
//!
//! See [`xmlbind_core`] for the policy vocabulary.

pub use xmlbind_core::*;
