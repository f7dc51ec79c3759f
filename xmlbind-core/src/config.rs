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

/// Configuration for loading and saving.
///
/// This struct is shared between the [`XmlBind`](crate::xmlbind::XmlBind)
/// facade and every `WriteContext`/`ReadContext`, so nested generic
/// serializers apply the same rules as the outermost one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Whether an attribute binding and an element binding may share a name
    /// within one schema.
    pub shared_names: bool,
    /// Maximum nesting depth of composite values.
    pub max_depth: u32,
    /// Indentation width used when printing markup; `None` prints everything
    /// on one line.
    pub indent: Option<usize>,
    /// Whether printed markup starts with an `<?xml ...?>` declaration.
    pub declaration: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shared_names: true,
            max_depth: 128,
            indent: Some(2),
            declaration: true,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if attribute and element bindings may share names.
    #[inline(always)]
    pub fn is_shared_names(&self) -> bool {
        self.shared_names
    }

    /// Get maximum nesting depth.
    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Get the pretty-print indentation width.
    #[inline(always)]
    pub fn indent(&self) -> Option<usize> {
        self.indent
    }

    /// Check if printed markup carries an XML declaration.
    #[inline(always)]
    pub fn is_declaration(&self) -> bool {
        self.declaration
    }
}
