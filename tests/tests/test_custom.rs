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

use test_helpers::{compact, test_roundtrip};
use xmlbind::bind::{from_custom_element, nvp, to_custom_attribute, to_custom_element};
use xmlbind::{xml_element, Attribute, Element, Error, GenericLoader, GenericSaver};
use xmlbind::{ReadContext, WriteContext};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
}

fn load_color(_: &mut ReadContext, holder: &Attribute, color: &mut Color) -> Result<(), Error> {
    let bad = || Error::format(format!("`{}` is not a #rrggbb color", holder.value()));
    let hex = holder.value().strip_prefix('#').ok_or_else(bad)?;
    if hex.len() != 6 {
        return Err(bad());
    }
    let channel = |at: usize| {
        hex.get(at..at + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(bad)
    };
    *color = Color {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    };
    Ok(())
}

fn save_color(_: &mut WriteContext, holder: &mut Attribute, color: &Color) -> Result<(), Error> {
    holder.set_value(format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b));
    Ok(())
}

fn load_outline(
    _: &mut ReadContext,
    holder: &Element,
    outline: &mut Vec<(i32, i32)>,
) -> Result<(), Error> {
    outline.clear();
    for point in holder.child_elements_named("p") {
        let coordinate = |name: &str| -> Result<i32, Error> {
            let attribute = point
                .attribute(name)
                .ok_or_else(|| Error::format(format!("point without `{}`", name)))?;
            attribute
                .value()
                .parse()
                .map_err(|_| Error::format(format!("bad coordinate `{}`", attribute.value())))
        };
        outline.push((coordinate("x")?, coordinate("y")?));
    }
    Ok(())
}

fn save_outline(
    _: &mut WriteContext,
    holder: &mut Element,
    outline: &Vec<(i32, i32)>,
) -> Result<(), Error> {
    for (x, y) in outline {
        let point = holder.add_child(Element::new("p"))?;
        point.set_attribute("x", x.to_string())?;
        point.set_attribute("y", y.to_string())?;
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct Banner {
    color: Color,
    label: String,
    outline: Vec<(i32, i32)>,
}

xml_element!(Banner {
    "color" => as_custom_attribute(color, load_color, save_color),
    "label" => as_text(label),
    "outline" => as_custom_element(outline, load_outline, save_outline),
});

#[test]
fn test_custom_roundtrip() {
    let banner = Banner {
        color: Color {
            r: 255,
            g: 128,
            b: 0,
        },
        label: "Sale".into(),
        outline: vec![(0, 0), (3, 4)],
    };
    let text = test_roundtrip(&compact(), "banner", &banner);
    assert_eq!(
        text,
        concat!(
            r##"<banner color="#ff8000"><label>Sale</label>"##,
            r#"<outline><p x="0" y="0"/><p x="3" y="4"/></outline>"#,
            r#"</banner>"#
        )
    );
}

#[test]
fn test_custom_errors_propagate() {
    let err = compact()
        .load_from_str::<Banner>(r#"<banner color="orange"/>"#, "banner")
        .unwrap_err();
    assert!(err.is_format());
    let err = compact()
        .load_from_str::<Banner>(r#"<banner><outline><p x="1"/></outline></banner>"#, "banner")
        .unwrap_err();
    assert!(err.is_format());
}

#[test]
fn test_one_sided_closures() {
    let (total, color) = (7u32, Color { r: 1, g: 2, b: 3 });
    let mut root = Element::new("root");
    let mut saver = GenericSaver::new();
    saver
        .attach(
            nvp(
                "total",
                to_custom_element(&total, |_, holder, value| {
                    holder.set_text(format!("{} items", value));
                    Ok(())
                }),
            ) & nvp("color", to_custom_attribute(&color, save_color)),
        )
        .unwrap();
    saver.save(&mut WriteContext::default(), &mut root).unwrap();
    assert_eq!(root.attribute("color").unwrap().value(), "#010203");
    assert_eq!(root.first_child_element("total").unwrap().text(), "7 items");

    let mut count = 0u32;
    let mut loader = GenericLoader::new();
    loader
        .attach(nvp(
            "total",
            from_custom_element(&mut count, |_, holder, value| {
                let first = holder.text().split_whitespace().next().unwrap_or_default();
                *value = first
                    .parse()
                    .map_err(|_| Error::format(format!("no count in `{}`", holder.text())))?;
                Ok(())
            }),
        ))
        .unwrap();
    loader.load(&mut ReadContext::default(), &root).unwrap();
    drop(loader);
    assert_eq!(count, 7);
}
