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

//! Per-call state threaded through every policy.

use crate::config::Config;
use crate::error::Error;

/// State of one save call: the shared [`Config`] and the current nesting
/// depth of composite values.
#[derive(Clone, Debug, Default)]
pub struct WriteContext {
    config: Config,
    current_depth: u32,
}

impl WriteContext {
    pub fn new(config: Config) -> WriteContext {
        WriteContext {
            config,
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline(always)]
    pub fn depth(&self) -> u32 {
        self.current_depth
    }

    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        check_depth(self.current_depth, self.config.max_depth())
    }

    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

/// State of one load call; the mirror of [`WriteContext`].
#[derive(Clone, Debug, Default)]
pub struct ReadContext {
    config: Config,
    current_depth: u32,
}

impl ReadContext {
    pub fn new(config: Config) -> ReadContext {
        ReadContext {
            config,
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline(always)]
    pub fn depth(&self) -> u32 {
        self.current_depth
    }

    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        check_depth(self.current_depth, self.config.max_depth())
    }

    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

#[inline(always)]
fn check_depth(current: u32, max: u32) -> Result<(), Error> {
    if current > max {
        return Err(Error::depth_exceed(format!(
            "Maximum nesting depth ({}) exceeded. Current depth: {}. \
            This may indicate a self-referencing value or an overly deep document. \
            Consider increasing max_depth if this is expected.",
            max, current
        )));
    }
    Ok(())
}
