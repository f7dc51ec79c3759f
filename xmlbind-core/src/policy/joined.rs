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

//! A whole sequence as the text of one holder.

use std::fmt;
use std::marker::PhantomData;

use super::{Direction, LoadPolicy, Policy, SavePolicy, Sequence, TextValue};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::TextHolder;
use crate::tree::Element;
use crate::{bail, ensure, misconfigured};

/// Concatenates the textual form of every item, with no separator.
///
/// Item representations must therefore delimit themselves. Loading scans
/// items with [`TextValue::scan`], which by default skips whitespace and
/// reads one token; [`fixed_width`](ContainerTextJoin::fixed_width) instead
/// gives every item exactly `n` characters, checked on save and sliced on
/// load (surrounding whitespace of the whole text is ignored).
///
/// An empty sequence saves nothing. Loading appends items until the text is
/// exhausted; a parse failure aborts the load with the sequence partially
/// filled.
pub struct ContainerTextJoin<H = Element> {
    width: Option<usize>,
    holder: PhantomData<fn() -> H>,
}

impl<H> ContainerTextJoin<H> {
    pub const fn new() -> Self {
        ContainerTextJoin {
            width: None,
            holder: PhantomData,
        }
    }

    pub const fn fixed_width(width: usize) -> Self {
        ContainerTextJoin {
            width: Some(width),
            holder: PhantomData,
        }
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }
}

impl<H> Default for ContainerTextJoin<H> {
    fn default() -> Self {
        ContainerTextJoin::new()
    }
}

impl<H> Clone for ContainerTextJoin<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for ContainerTextJoin<H> {}

impl<H> fmt::Debug for ContainerTextJoin<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerTextJoin")
            .field("width", &self.width)
            .finish()
    }
}

impl<S, H> Policy<S> for ContainerTextJoin<H>
where
    S: Sequence,
    S::Item: TextValue,
    H: TextHolder,
{
    type Holder = H;

    fn valid(&self, value: &S, direction: Direction) -> bool {
        match direction {
            Direction::Save => value.items().next().is_some(),
            Direction::Load => true,
        }
    }
}

impl<S, H> SavePolicy<S> for ContainerTextJoin<H>
where
    S: Sequence,
    S::Item: TextValue,
    H: TextHolder,
{
    fn save(&self, _: &mut WriteContext, holder: &mut H, value: &S) -> Result<(), Error> {
        if self.width == Some(0) {
            misconfigured!("fixed-width text items need a width above zero");
        }
        let mut text = String::new();
        for item in value.items() {
            let piece = item.to_text()?;
            if let Some(width) = self.width {
                let actual = piece.chars().count();
                ensure!(
                    actual == width,
                    "`{}` is {} characters wide, expected {}",
                    piece,
                    actual,
                    width
                );
            }
            text.push_str(&piece);
        }
        holder.set_text(text);
        Ok(())
    }
}

impl<S, H> LoadPolicy<S> for ContainerTextJoin<H>
where
    S: Sequence,
    S::Item: TextValue,
    H: TextHolder,
{
    fn load(&self, _: &mut ReadContext, holder: &H, value: &mut S) -> Result<(), Error> {
        let text = holder.text();
        match self.width {
            Some(0) => misconfigured!("fixed-width text items need a width above zero"),
            Some(width) => {
                let chars: Vec<char> = text.trim().chars().collect();
                for chunk in chars.chunks(width) {
                    let piece: String = chunk.iter().collect();
                    ensure!(
                        chunk.len() == width,
                        "trailing `{}` is shorter than the item width {}",
                        piece,
                        width
                    );
                    value.push_item(S::Item::from_text(&piece)?);
                }
            }
            None => {
                let mut rest = text;
                while !rest.trim_start().is_empty() {
                    let (item, tail) = S::Item::scan(rest)?;
                    if tail.len() >= rest.len() {
                        bail!("no progress reading items from `{}`", rest);
                    }
                    value.push_item(item);
                    rest = tail;
                }
            }
        }
        Ok(())
    }
}
