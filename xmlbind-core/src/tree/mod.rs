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

//! Minimal owned document tree.
//!
//! The generic serializer only needs named child iteration, string-valued
//! attributes, text content, detached node creation and child linking. This
//! module provides exactly that, with markup handled by `quick-xml`.

mod attribute;
mod document;
mod element;
mod markup;

pub use attribute::Attribute;
pub use document::Document;
pub use element::Element;

/// Whether `name` can be used as an element or attribute name.
///
/// Names must start with a letter, `_` or `:` and continue with letters,
/// digits, `-`, `.`, `_` or `:`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
}
