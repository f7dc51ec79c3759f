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

use std::fmt::Debug;

use xmlbind::{Element, Load, Save, XmlBind};

/// Prints without indentation or declaration so expected markup fits on
/// one line.
pub fn compact() -> XmlBind {
    XmlBind::default().indent(None).declaration(false)
}

/// Saves `value` as `name`, prints, parses and loads it back.
pub fn test_roundtrip<T>(bind: &XmlBind, name: &str, value: &T) -> String
where
    T: Load<Element> + Save<Element> + Default + PartialEq + Debug,
{
    let text = bind.save_to_string(name, value).unwrap();
    let result: T = bind.load_from_str(&text, name).unwrap();
    assert_eq!(&result, value, "markup was:\n{}", text);
    text
}
