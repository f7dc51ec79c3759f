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

mod test_helpers;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use test_helpers::{compact, test_roundtrip};
use xmlbind::xml_element;

#[derive(Debug, Default, PartialEq)]
struct Scalars {
    small: i8,
    big: u64,
    ratio: f64,
    alive: bool,
    grade: char,
    label: String,
}

xml_element!(Scalars {
    "small" => as_attribute(small),
    "big" => as_attribute(big),
    "ratio" => as_text(ratio),
    "alive" => as_text(alive),
    "grade" => as_attribute(grade),
    "label" => as_text(label),
});

#[test]
fn test_scalars_roundtrip() {
    let scalars = Scalars {
        small: -7,
        big: u64::MAX,
        ratio: 0.25,
        alive: true,
        grade: 'A',
        label: "a < b & c".into(),
    };
    let text = test_roundtrip(&compact(), "scalars", &scalars);
    assert_eq!(
        text,
        concat!(
            r#"<scalars small="-7" big="18446744073709551615" grade="A">"#,
            r#"<ratio>0.25</ratio><alive>true</alive><label>a &lt; b &amp; c</label>"#,
            r#"</scalars>"#
        )
    );
}

#[test]
fn test_numbers_tolerate_surrounding_whitespace() {
    let scalars: Scalars = compact()
        .load_from_str(
            "<scalars small=' 3 '><ratio>\n  1.5\n</ratio></scalars>",
            "scalars",
        )
        .unwrap();
    assert_eq!(scalars.small, 3);
    assert_eq!(scalars.ratio, 1.5);
}

#[test]
fn test_out_of_range_is_format_error() {
    let err = compact()
        .load_from_str::<Scalars>(r#"<scalars small="300"/>"#, "scalars")
        .unwrap_err();
    assert!(err.is_format(), "{}", err);
    assert!(err.to_string().contains("i8"), "{}", err);
}

#[test]
fn test_char_needs_exactly_one_character() {
    let err = compact()
        .load_from_str::<Scalars>(r#"<scalars grade="AB"/>"#, "scalars")
        .unwrap_err();
    assert!(err.is_format(), "{}", err);
}

#[test]
fn test_bool_spelling() {
    let err = compact()
        .load_from_str::<Scalars>("<scalars><alive>yes</alive></scalars>", "scalars")
        .unwrap_err();
    assert!(err.is_format(), "{}", err);
}

#[derive(Debug, Default, PartialEq)]
struct Calendar {
    day: Option<NaiveDate>,
    alarm: Option<NaiveTime>,
    launch: Option<NaiveDateTime>,
    note: Option<String>,
}

xml_element!(Calendar {
    "day" => as_attribute(day).optional(),
    "alarm" => as_text(alarm).optional(),
    "launch" => as_text(launch).optional(),
    "note" => as_text(note).optional(),
});

#[test]
fn test_chrono_fields() {
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let calendar = Calendar {
        day: Some(day),
        alarm: NaiveTime::from_hms_opt(6, 30, 0),
        launch: day.and_hms_milli_opt(23, 59, 58, 250),
        note: None,
    };
    let text = test_roundtrip(&compact(), "calendar", &calendar);
    assert_eq!(
        text,
        concat!(
            r#"<calendar day="2024-02-29">"#,
            r#"<alarm>06:30:00</alarm>"#,
            r#"<launch>2024-02-29T23:59:58.250</launch>"#,
            r#"</calendar>"#
        )
    );
}

#[test]
fn test_missing_optionals_stay_none() {
    let calendar: Calendar = compact().load_from_str("<calendar/>", "calendar").unwrap();
    assert_eq!(calendar, Calendar::default());
    test_roundtrip(&compact(), "calendar", &calendar);
}

#[test]
fn test_present_optional_is_filled() {
    let calendar: Calendar = compact()
        .load_from_str("<calendar><note/></calendar>", "calendar")
        .unwrap();
    assert_eq!(calendar.note.as_deref(), Some(""));
}

#[test]
fn test_bad_date() {
    let err = compact()
        .load_from_str::<Calendar>(r#"<calendar day="2023-02-29"/>"#, "calendar")
        .unwrap_err();
    assert!(err.is_format(), "{}", err);
}
