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

use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;

use test_helpers::compact;
use xmlbind::bind::{as_shared_subtype_set, nvp};
use xmlbind::policy::Polymorphic;
use xmlbind::{register_subtypes, xml_element, Element, GenericLoader, GenericSaver, Serializable};
use xmlbind::{ReadContext, WriteContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Godzilla,
    StoneGiant,
    Teapot,
}

trait Foe: Polymorphic + Serializable + Debug {
    fn kind(&self) -> Kind;
    fn level(&self) -> u32;
}

#[derive(Debug, Default, PartialEq)]
struct Godzilla {
    level: u32,
    hp: u32,
}

#[derive(Debug, Default, PartialEq)]
struct StoneGiant {
    level: u32,
    armor: u32,
}

#[derive(Debug, Default, PartialEq)]
struct Teapot;

xml_element!(Godzilla {
    "level" => as_attribute(level),
    "hp" => as_text(hp),
});

xml_element!(StoneGiant {
    "level" => as_attribute(level),
    "armor" => as_text(armor),
});

xml_element!(Teapot {});

impl Foe for Godzilla {
    fn kind(&self) -> Kind {
        Kind::Godzilla
    }

    fn level(&self) -> u32 {
        self.level
    }
}

impl Foe for StoneGiant {
    fn kind(&self) -> Kind {
        Kind::StoneGiant
    }

    fn level(&self) -> u32 {
        self.level
    }
}

impl Foe for Teapot {
    fn kind(&self) -> Kind {
        Kind::Teapot
    }

    fn level(&self) -> u32 {
        0
    }
}

register_subtypes!(Foe: Godzilla, StoneGiant, Teapot);

#[derive(Debug, Default)]
struct Lair {
    foes: Vec<Box<dyn Foe>>,
}

xml_element!(Lair {
    foes => as_subtype_set[
        "godzilla" => Godzilla,
        "stone_giant" => StoneGiant,
        "teapot" => Teapot,
    ],
});

fn kinds(foes: &[Box<dyn Foe>]) -> Vec<(Kind, u32)> {
    foes.iter().map(|f| (f.kind(), f.level())).collect()
}

#[test]
fn test_polymorphic_vec_roundtrip() {
    let lair = Lair {
        foes: vec![
            Box::new(Godzilla { level: 1, hp: 100 }),
            Box::new(StoneGiant { level: 2, armor: 50 }),
            Box::new(Godzilla { level: 3, hp: 300 }),
            Box::new(Teapot),
        ],
    };
    let text = compact().save_to_string("lair", &lair).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"<lair>"#,
            r#"<godzilla level="1"><hp>100</hp></godzilla>"#,
            r#"<stone_giant level="2"><armor>50</armor></stone_giant>"#,
            r#"<godzilla level="3"><hp>300</hp></godzilla>"#,
            r#"<teapot/>"#,
            r#"</lair>"#
        )
    );
    let back: Lair = compact().load_from_str(&text, "lair").unwrap();
    assert_eq!(
        kinds(&back.foes),
        [
            (Kind::Godzilla, 1),
            (Kind::StoneGiant, 2),
            (Kind::Godzilla, 3),
            (Kind::Teapot, 0)
        ]
    );
}

#[test]
fn test_repeated_subtypes_keep_sequence_order() {
    let lair = Lair {
        foes: vec![
            Box::new(Godzilla { level: 1, hp: 0 }),
            Box::new(StoneGiant { level: 2, armor: 0 }),
            Box::new(Godzilla { level: 3, hp: 0 }),
        ],
    };
    let text = compact().save_to_string("lair", &lair).unwrap();
    let back: Lair = compact().load_from_str(&text, "lair").unwrap();
    assert_eq!(kinds(&back.foes), kinds(&lair.foes));
}

#[test]
fn test_load_follows_document_order() {
    let text = r#"<lair>
        <godzilla level="1"/>
        <stone_giant level="2"/>
        <godzilla level="3"/>
    </lair>"#;
    let lair: Lair = compact().load_from_str(text, "lair").unwrap();
    assert_eq!(
        kinds(&lair.foes),
        [(Kind::Godzilla, 1), (Kind::StoneGiant, 2), (Kind::Godzilla, 3)]
    );
}

#[test]
fn test_shared_pointer_set() {
    let foes: Vec<Rc<dyn Foe>> = vec![
        Rc::new(StoneGiant { level: 4, armor: 1 }),
        Rc::new(Godzilla { level: 5, hp: 2 }),
    ];
    let mut root = Element::new("lair");
    {
        let mut saver = GenericSaver::new();
        saver
            .attach(
                as_shared_subtype_set(&foes)
                    .subtype::<Godzilla>("godzilla")
                    .subtype::<StoneGiant>("stone_giant"),
            )
            .unwrap();
        saver.save(&mut WriteContext::default(), &mut root).unwrap();
    }
    let mut back: Vec<Rc<dyn Foe>> = Vec::new();
    {
        let mut loader = GenericLoader::new();
        loader
            .attach(
                as_shared_subtype_set(&mut back)
                    .subtype::<Godzilla>("godzilla")
                    .subtype::<StoneGiant>("stone_giant"),
            )
            .unwrap();
        loader.load(&mut ReadContext::default(), &root).unwrap();
    }
    let loaded: Vec<_> = back.iter().map(|f| (f.kind(), f.level())).collect();
    assert_eq!(loaded, [(Kind::StoneGiant, 4), (Kind::Godzilla, 5)]);
}

#[derive(Debug, Default)]
struct Arena {
    title: String,
    champion: Option<Box<dyn Foe>>,
}

xml_element!(Arena {
    "title" => as_attribute(title),
    champion => [
        "godzilla" => as_subtype::<Godzilla>,
        "stone_giant" => as_subtype::<StoneGiant>,
    ],
});

#[test]
fn test_single_pointer_field() {
    let arena = Arena {
        title: "Colosseum".into(),
        champion: Some(Box::new(StoneGiant { level: 9, armor: 3 })),
    };
    let text = compact().save_to_string("arena", &arena).unwrap();
    assert_eq!(
        text,
        r#"<arena title="Colosseum"><stone_giant level="9"><armor>3</armor></stone_giant></arena>"#
    );
    let back: Arena = compact().load_from_str(&text, "arena").unwrap();
    assert_eq!(back.title, "Colosseum");
    let champion = back.champion.unwrap();
    assert_eq!((champion.kind(), champion.level()), (Kind::StoneGiant, 9));

    let empty = compact().save_to_string("arena", &Arena::default()).unwrap();
    assert_eq!(empty, r#"<arena title=""/>"#);
}

#[test]
fn test_mismatched_pointee_is_replaced_on_load() {
    let mut arena = Arena {
        champion: Some(Box::new(Godzilla { level: 1, hp: 1 })),
        ..Default::default()
    };
    let document = xmlbind::Document::parse(r#"<arena><stone_giant level="6"/></arena>"#).unwrap();
    compact().load_into(&document, "arena", &mut arena).unwrap();
    let champion = arena.champion.unwrap();
    assert_eq!((champion.kind(), champion.level()), (Kind::StoneGiant, 6));
}

#[test]
fn test_matching_pointee_is_loaded_in_place() {
    let mut arena = Arena {
        champion: Some(Box::new(Godzilla { level: 1, hp: 77 })),
        ..Default::default()
    };
    let document = xmlbind::Document::parse(r#"<arena><godzilla level="2"/></arena>"#).unwrap();
    compact().load_into(&document, "arena", &mut arena).unwrap();
    let champion = arena.champion.unwrap();
    let godzilla = (*champion).as_any().downcast_ref::<Godzilla>().unwrap();
    assert_eq!(godzilla, &Godzilla { level: 2, hp: 77 });
}

#[test]
fn test_arc_field() {
    let shared: Arc<dyn Foe> = Arc::new(Godzilla { level: 8, hp: 8 });
    let mut root = Element::new("holder");
    let mut saver = GenericSaver::new();
    saver
        .attach(nvp("godzilla", xmlbind::bind::as_shared_subtype::<Godzilla, _>(&shared)))
        .unwrap();
    saver.save(&mut WriteContext::default(), &mut root).unwrap();
    assert_eq!(
        root.first_child_element("godzilla")
            .unwrap()
            .attribute("level")
            .unwrap()
            .value(),
        "8"
    );
}
