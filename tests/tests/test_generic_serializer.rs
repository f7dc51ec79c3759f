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
use xmlbind::binding::SaveOnly;
use xmlbind::bind::{as_attribute, as_element, as_text, from_attribute, from_text, nvp, to_attribute, to_text};
use xmlbind::{
    xml_element, BindingList, Document, Element, GenericLoader, GenericSaver, GenericSerializer,
    ReadContext, WriteContext, XmlBind,
};

#[derive(Debug, Default, PartialEq)]
struct Monster {
    name: String,
    hp: u32,
}

xml_element!(Monster {
    "name" => as_attribute(name),
    "hp" => as_text(hp),
});

#[test]
fn test_monster_markup() {
    let rex = Monster {
        name: "Rex".to_string(),
        hp: 100,
    };
    let text = compact().save_to_string("monster", &rex).unwrap();
    assert_eq!(text, r#"<monster name="Rex"><hp>100</hp></monster>"#);
    let back: Monster = compact().load_from_str(&text, "monster").unwrap();
    assert_eq!(back, rex);
}

#[test]
fn test_monster_pretty_roundtrip() {
    let rex = Monster {
        name: "Rex & \"friends\"".to_string(),
        hp: 7,
    };
    let text = test_roundtrip(&XmlBind::default(), "monster", &rex);
    assert!(text.starts_with("<?xml"));
}

#[test]
fn test_unknown_data_is_ignored() {
    let text = r#"
        <monster name="Rex" color="green">
            <claws>4</claws>
            <hp>55</hp>
            <tail><spikes/></tail>
        </monster>
        <treasure/>"#;
    let monster: Monster = compact().load_from_str(text, "monster").unwrap();
    assert_eq!(
        monster,
        Monster {
            name: "Rex".to_string(),
            hp: 55
        }
    );
}

#[test]
fn test_missing_data_leaves_defaults() {
    let monster: Monster = compact().load_from_str("<monster/>", "monster").unwrap();
    assert_eq!(monster, Monster::default());
    let monster: Monster = compact().load_from_str("<other/>", "monster").unwrap();
    assert_eq!(monster, Monster::default());
}

#[test]
fn test_format_error_aborts_load() {
    let err = compact()
        .load_from_str::<Monster>(r#"<monster><hp>lots</hp></monster>"#, "monster")
        .unwrap_err();
    assert!(err.is_format());
    assert!(err.to_string().contains("lots"));
}

#[test]
fn test_duplicate_element_names_rejected() {
    let (a, b) = (1u32, 2u32);
    let mut saver = GenericSaver::new();
    let err = saver
        .attach(nvp("hp", to_text(&a)) & nvp("hp", to_text(&b)))
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_attribute_and_element_may_share_a_name() {
    let (a, b) = (1u32, 2u32);
    let mut saver = GenericSaver::new();
    saver
        .attach(nvp("hp", to_attribute(&a)) & nvp("hp", to_text(&b)))
        .unwrap();
    let mut element = Element::new("monster");
    saver.save(&mut WriteContext::default(), &mut element).unwrap();
    assert_eq!(element.attribute("hp").unwrap().value(), "1");
    assert_eq!(element.first_child_element("hp").unwrap().text(), "2");

    let (mut x, mut y) = (0u32, 0u32);
    let mut loader = GenericLoader::new();
    loader
        .attach(nvp("hp", from_attribute(&mut x)) & nvp("hp", from_text(&mut y)))
        .unwrap();
    loader.load(&mut ReadContext::default(), &element).unwrap();
    drop(loader);
    assert_eq!((x, y), (1, 2));
}

#[derive(Debug, Default, PartialEq)]
struct Clash {
    id: u32,
    also_id: u32,
}

xml_element!(Clash {
    "id" => as_attribute(id),
    "id" => as_text(also_id),
});

#[test]
fn test_unshared_names_fail_inside_nested_saves() {
    let clash = Clash { id: 1, also_id: 2 };
    assert!(compact().save("clash", &clash).is_ok());
    let err = compact()
        .shared_names(false)
        .save("clash", &clash)
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_save_order_follows_declaration() {
    let (c, a, b) = (3u8, 1u8, 2u8);
    let mut saver = GenericSaver::new();
    saver
        .attach(nvp("c", to_text(&c)) & (nvp("a", to_text(&a)) & nvp("b", to_text(&b))))
        .unwrap();
    let mut list = BindingList::<SaveOnly>::new();
    list.append(nvp("z", to_text(&c))).append(nvp("y", to_attribute(&a)));
    saver.attach(list).unwrap();
    let mut element = Element::new("root");
    saver.save(&mut WriteContext::default(), &mut element).unwrap();
    let names: Vec<_> = element.child_elements().map(|c| c.name()).collect();
    assert_eq!(names, ["c", "a", "b", "z"]);
    assert!(element.has_attribute("y"));
}

#[test]
fn test_binding_list_combines_with_and() {
    let (a, b, c) = (1u8, 2u8, 3u8);
    let list = BindingList::<SaveOnly>::new() & nvp("a", to_text(&a)) & nvp("b", to_text(&b));
    let list = list & (nvp("c", to_text(&c)) & nvp("d", to_attribute(&c)));
    assert_eq!(list.len(), 4);
    assert_eq!(list.names().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
    let mut saver: GenericSaver = GenericSerializer::new();
    saver.attach(list).unwrap();
    assert_eq!(saver.len(), 4);
}

#[test]
fn test_read_write_schema_roundtrip() {
    let mut rex = Monster {
        name: "Rex".to_string(),
        hp: 9,
    };
    let mut element = Element::new("monster");
    {
        let mut serializer: GenericSerializer = GenericSerializer::new();
        serializer
            .attach(nvp("name", as_attribute(&mut rex.name)) & nvp("hp", as_text(&mut rex.hp)))
            .unwrap();
        serializer.save(&mut WriteContext::default(), &mut element).unwrap();
    }
    let mut copy = Monster::default();
    {
        let mut serializer: GenericSerializer = GenericSerializer::new();
        serializer
            .attach(nvp("name", as_attribute(&mut copy.name)) & nvp("hp", as_text(&mut copy.hp)))
            .unwrap();
        serializer.load(&mut ReadContext::default(), &element).unwrap();
    }
    assert_eq!(copy, rex);
}

/// Written with one shape, read with another.
#[derive(Debug, Default, PartialEq)]
struct Helicopter {
    name: String,
    max_speed: f32,
    mass: f32,
    max_passengers: u32,
}

impl xmlbind::Save for Helicopter {
    fn save(&self, context: &mut WriteContext, holder: &mut Element) -> Result<(), xmlbind::Error> {
        let mut saver = GenericSaver::with_config(context.config());
        saver.attach(
            nvp("name", to_attribute(&self.name))
                & nvp("max_speed", to_text(&self.max_speed))
                & nvp("mass", to_text(&self.mass))
                & nvp("max_passengers", to_text(&self.max_passengers)),
        )?;
        saver.save(context, holder)
    }
}

impl xmlbind::Load for Helicopter {
    fn load(&mut self, context: &mut ReadContext, holder: &Element) -> Result<(), xmlbind::Error> {
        let mut loader = GenericLoader::with_config(context.config());
        loader.attach(
            nvp("name", from_attribute(&mut self.name))
                & nvp("max_speed", from_text(&mut self.max_speed))
                & nvp("max_passengers", from_text(&mut self.max_passengers)),
        )?;
        loader.load(context, holder)
    }
}

#[test]
fn test_asymmetric_loader_and_saver() {
    let ka50 = Helicopter {
        name: "Ka-50".to_string(),
        max_speed: 315.0,
        mass: 7800.0,
        max_passengers: 1,
    };
    let document = compact().save("helicopter", &ka50).unwrap();
    let root = document.root_element().unwrap();
    assert_eq!(root.first_child_element("mass").unwrap().text(), "7800");
    let back: Helicopter = compact().load(&document, "helicopter").unwrap();
    assert_eq!(
        back,
        Helicopter {
            mass: 0.0,
            ..ka50
        }
    );
}

#[test]
fn test_document_level_attributes_are_skipped() {
    let (hp, name) = (5u8, "Rex".to_string());
    let mut saver = GenericSaver::new();
    saver
        .attach(nvp("name", to_attribute(&name)) & nvp("hp", to_text(&hp)))
        .unwrap();
    let mut document = Document::new();
    saver
        .save_document(&mut WriteContext::default(), &mut document)
        .unwrap();
    assert!(!document.node().has_attribute("name"));
    assert_eq!(document.root_element().unwrap().name(), "hp");

    let mut loaded = 0u8;
    let mut loader = GenericLoader::new();
    loader.attach(nvp("hp", from_text(&mut loaded))).unwrap();
    loader
        .load_document(&mut ReadContext::default(), &document)
        .unwrap();
    drop(loader);
    assert_eq!(loaded, 5);
}

#[test]
fn test_as_element_loads_in_place() {
    let mut rex = Monster {
        name: "kept".to_string(),
        hp: 1,
    };
    let mut document = Document::new();
    document
        .add_child(Element::new("monster"))
        .unwrap()
        .add_child(Element::new("hp"))
        .unwrap()
        .set_text("2");
    let mut loader = GenericLoader::new();
    loader.attach(nvp("monster", as_element(&mut rex))).unwrap();
    loader
        .load_document(&mut ReadContext::default(), &document)
        .unwrap();
    drop(loader);
    assert_eq!(rex.name, "kept");
    assert_eq!(rex.hp, 2);
}
