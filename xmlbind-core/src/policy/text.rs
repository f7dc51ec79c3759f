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

use std::fmt;
use std::marker::PhantomData;

use super::{LoadPolicy, Policy, SavePolicy};
use crate::context::{ReadContext, WriteContext};
use crate::error::Error;
use crate::probe::TextHolder;
use crate::tree::Element;

/// A scalar with a canonical textual form.
pub trait TextValue: Sized {
    fn to_text(&self) -> Result<String, Error>;

    fn from_text(text: &str) -> Result<Self, Error>;

    /// Reads one value from the front of `input` and returns it with the
    /// unread rest. The default skips leading whitespace and reads up to the
    /// next whitespace character.
    fn scan(input: &str) -> Result<(Self, &str), Error> {
        let input = input.trim_start();
        let end = input.find(char::is_whitespace).unwrap_or(input.len());
        let (token, rest) = input.split_at(end);
        Ok((Self::from_text(token)?, rest))
    }
}

macro_rules! impl_parsed_text_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TextValue for $ty {
                #[inline(always)]
                fn to_text(&self) -> Result<String, Error> {
                    Ok(self.to_string())
                }

                #[inline]
                fn from_text(text: &str) -> Result<Self, Error> {
                    text.trim().parse::<$ty>().map_err(|err| {
                        Error::enhance_format_error::<$ty>(Error::format(format!(
                            "cannot parse `{}`: {}",
                            text, err
                        )))
                    })
                }
            }
        )+
    };
}

impl_parsed_text_value!(i8, i16, i32, i64, i128, isize);
impl_parsed_text_value!(u8, u16, u32, u64, u128, usize);
impl_parsed_text_value!(f32, f64, bool);

impl TextValue for String {
    fn to_text(&self) -> Result<String, Error> {
        Ok(self.clone())
    }

    fn from_text(text: &str) -> Result<Self, Error> {
        Ok(text.to_owned())
    }
}

impl TextValue for char {
    fn to_text(&self) -> Result<String, Error> {
        Ok(self.to_string())
    }

    fn from_text(text: &str) -> Result<Self, Error> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::format(format!(
                "expected exactly one character, got `{}`",
                text
            ))),
        }
    }

    // every character is an item, whitespace included
    fn scan(input: &str) -> Result<(Self, &str), Error> {
        let mut chars = input.chars();
        match chars.next() {
            Some(c) => Ok((c, chars.as_str())),
            None => Err(Error::format("expected a character, got end of text")),
        }
    }
}

/// Round-trips a [`TextValue`] through element text (`H = Element`) or an
/// attribute value (`H = Attribute`).
pub struct TextConvert<H = Element>(PhantomData<fn() -> H>);

impl<H> TextConvert<H> {
    pub const fn new() -> Self {
        TextConvert(PhantomData)
    }
}

impl<H> Default for TextConvert<H> {
    fn default() -> Self {
        TextConvert::new()
    }
}

impl<H> Clone for TextConvert<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for TextConvert<H> {}

impl<H> fmt::Debug for TextConvert<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TextConvert")
    }
}

impl<T: TextValue, H: TextHolder> Policy<T> for TextConvert<H> {
    type Holder = H;
}

impl<T: TextValue, H: TextHolder> SavePolicy<T> for TextConvert<H> {
    #[inline]
    fn save(&self, _: &mut WriteContext, holder: &mut H, value: &T) -> Result<(), Error> {
        holder.set_text(value.to_text()?);
        Ok(())
    }
}

impl<T: TextValue, H: TextHolder> LoadPolicy<T> for TextConvert<H> {
    #[inline]
    fn load(&self, _: &mut ReadContext, holder: &H, value: &mut T) -> Result<(), Error> {
        *value = T::from_text(holder.text())?;
        Ok(())
    }
}
