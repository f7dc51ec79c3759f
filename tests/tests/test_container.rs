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

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};

use test_helpers::{compact, test_roundtrip};
use xmlbind::bind::{as_element_set, as_fixed_width_text, as_text_join, as_text_set, nvp};
use xmlbind::{xml_element, Document, GenericLoader, GenericSaver, ReadContext, WriteContext};

#[derive(Debug, Default, Clone, PartialEq)]
struct Ability {
    name: String,
    damage: u32,
}

xml_element!(Ability {
    "name" => as_attribute(name),
    "damage" => as_text(damage),
});

#[derive(Debug, Default, PartialEq)]
struct Hero {
    name: String,
    abilities: Vec<Ability>,
    aliases: VecDeque<String>,
    weaknesses: BTreeSet<String>,
}

xml_element!(Hero {
    "name" => as_attribute(name),
    "abilities" => as_element_set(abilities).nested("ability"),
    "alias" => as_text_set(aliases),
    "weakness" => as_text_set(weaknesses),
});

fn superman() -> Hero {
    Hero {
        name: "Superman".into(),
        abilities: vec![
            Ability {
                name: "flight".into(),
                damage: 0,
            },
            Ability {
                name: "heat vision".into(),
                damage: 90,
            },
        ],
        aliases: VecDeque::from(["Clark".to_string(), "Kal-El".to_string()]),
        weaknesses: BTreeSet::from(["kryptonite".to_string(), "magic".to_string()]),
    }
}

#[test]
fn test_nested_element_set_markup() {
    let text = compact().save_to_string("hero", &superman()).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"<hero name="Superman">"#,
            r#"<abilities>"#,
            r#"<ability name="flight"><damage>0</damage></ability>"#,
            r#"<ability name="heat vision"><damage>90</damage></ability>"#,
            r#"</abilities>"#,
            r#"<alias>Clark</alias><alias>Kal-El</alias>"#,
            r#"<weakness>kryptonite</weakness><weakness>magic</weakness>"#,
            r#"</hero>"#
        )
    );
}

#[test]
fn test_hero_roundtrip() {
    test_roundtrip(&compact(), "hero", &superman());
    test_roundtrip(&xmlbind::XmlBind::default(), "hero", &superman());
}

#[test]
fn test_set_load_appends_in_document_order() {
    let text = r#"<hero name="Batman">
        <alias>Bruce</alias>
        <abilities><ability name="money"><damage>5</damage></ability></abilities>
        <alias>The Bat</alias>
    </hero>"#;
    let hero: Hero = compact().load_from_str(text, "hero").unwrap();
    assert_eq!(hero.name, "Batman");
    assert_eq!(hero.aliases, ["Bruce", "The Bat"]);
    assert_eq!(
        hero.abilities,
        [Ability {
            name: "money".into(),
            damage: 5
        }]
    );
    assert!(hero.weaknesses.is_empty());
}

#[test]
fn test_empty_sets() {
    let hero = Hero {
        name: "Nobody".into(),
        ..Default::default()
    };
    let text = compact().save_to_string("hero", &hero).unwrap();
    assert_eq!(text, r#"<hero name="Nobody"><abilities/></hero>"#);
    test_roundtrip(&compact(), "hero", &hero);
}

#[derive(Debug, Default, PartialEq)]
struct Board {
    digits: Vec<u8>,
    scores: LinkedList<i64>,
    tags: HashSet<String>,
}

xml_element!(Board {
    "digits" => as_fixed_width_text(digits, 1),
    "scores" => as_text_join(scores),
    "tag" => as_text_set(tags),
});

#[test]
fn test_fixed_width_join() {
    let board = Board {
        digits: vec![1, 2, 3],
        ..Default::default()
    };
    let text = compact().save_to_string("board", &board).unwrap();
    assert_eq!(text, "<board><digits>123</digits></board>");
    test_roundtrip(&compact(), "board", &board);
}

#[test]
fn test_fixed_width_rejects_wide_items() {
    let board = Board {
        digits: vec![1, 23],
        ..Default::default()
    };
    let err = compact().save_to_string("board", &board).unwrap_err();
    assert!(err.is_format(), "{}", err);
}

#[test]
fn test_fixed_width_trims_surrounding_whitespace() {
    let board: Board = compact()
        .load_from_str("<board><digits> 12\n</digits></board>", "board")
        .unwrap();
    assert_eq!(board.digits, [1, 2]);
}

#[test]
fn test_fixed_width_rejects_short_tail() {
    let mut wide: Vec<u16> = Vec::new();
    let mut loader = GenericLoader::new();
    loader
        .attach(nvp("wide", as_fixed_width_text(&mut wide, 2)))
        .unwrap();
    let document = Document::parse("<root><wide>10203</wide></root>").unwrap();
    let err = loader
        .load(&mut ReadContext::default(), document.root_element().unwrap())
        .unwrap_err();
    assert!(err.is_format(), "{}", err);
    drop(loader);
    assert_eq!(wide, [10, 20]);
}

#[test]
fn test_whitespace_tokens() {
    let board: Board = compact()
        .load_from_str("<board><scores> 1\n-22  333 </scores></board>", "board")
        .unwrap();
    assert_eq!(board.scores.into_iter().collect::<Vec<_>>(), [1, -22, 333]);
}

#[test]
fn test_token_join_stops_at_bad_token() {
    let err = compact()
        .load_from_str::<Board>("<board><scores>1 two 3</scores></board>", "board")
        .unwrap_err();
    assert!(err.is_format(), "{}", err);
}

#[test]
fn test_empty_join_saves_nothing() {
    let text = compact().save_to_string("board", &Board::default()).unwrap();
    assert_eq!(text, "<board/>");
}

#[test]
fn test_hash_set_roundtrip() {
    let board = Board {
        tags: HashSet::from(["red".to_string(), "blue".to_string()]),
        ..Default::default()
    };
    let text = test_roundtrip(&compact(), "board", &board);
    assert!(text.contains("<tag>red</tag>"));
    assert!(text.contains("<tag>blue</tag>"));
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Helicopter {
    model: String,
    rotors: u8,
}

xml_element!(Helicopter {
    "model" => as_attribute(model),
    "rotors" => as_attribute(rotors),
});

#[test]
fn test_document_level_element_set() {
    let fleet = vec![
        Helicopter {
            model: "Huey".into(),
            rotors: 2,
        },
        Helicopter {
            model: "Chinook".into(),
            rotors: 2,
        },
    ];
    let characters = vec!["Airwolf".to_string()];

    let mut document = Document::new();
    {
        let mut saver = GenericSaver::new();
        saver
            .attach(
                nvp("helicopter", as_element_set(&fleet))
                    & nvp("character", as_text_set(&characters)),
            )
            .unwrap();
        saver
            .save_document(&mut WriteContext::default(), &mut document)
            .unwrap();
    }
    let names: Vec<_> = document.child_elements().map(|e| e.name()).collect();
    assert_eq!(names, ["helicopter", "helicopter", "character"]);

    let mut fleet_back: Vec<Helicopter> = Vec::new();
    let mut characters_back: Vec<String> = Vec::new();
    {
        let mut loader = GenericLoader::new();
        loader
            .attach(
                nvp("helicopter", as_element_set(&mut fleet_back))
                    & nvp("character", as_text_set(&mut characters_back)),
            )
            .unwrap();
        loader
            .load_document(&mut ReadContext::default(), &document)
            .unwrap();
    }
    assert_eq!(fleet_back, fleet);
    assert_eq!(characters_back, characters);
}
