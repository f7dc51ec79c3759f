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

//! ISO-8601 text forms of the `chrono` naive date and time types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::TextValue;
use crate::error::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

macro_rules! impl_datetime_text_value {
    ($ty:ty, $format:expr) => {
        impl TextValue for $ty {
            fn to_text(&self) -> Result<String, Error> {
                Ok(self.format($format).to_string())
            }

            fn from_text(text: &str) -> Result<Self, Error> {
                <$ty>::parse_from_str(text.trim(), $format).map_err(|err| {
                    Error::enhance_format_error::<$ty>(Error::format(format!(
                        "cannot parse `{}`: {}",
                        text, err
                    )))
                })
            }
        }
    };
}

impl_datetime_text_value!(NaiveDate, DATE_FORMAT);
impl_datetime_text_value!(NaiveTime, TIME_FORMAT);
impl_datetime_text_value!(NaiveDateTime, DATE_TIME_FORMAT);
