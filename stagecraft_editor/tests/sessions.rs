// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit sessions against level rules where the data length depends on the
//! type and the container.

use kurbo::Point;
use stagecraft_editor::{AddSession, EditError, EditSession, HexInput, parse_type};
use stagecraft_objects::{
    AddressAllocator, Container, DataLayout, ObjectId, ObjectRegistry, PlacedObject, StagePoint,
};

/// Types below 0x100 carry four bytes, the rest eight; the initial table adds
/// two more.
struct SplitRules;

impl DataLayout for SplitRules {
    fn data_len(&self, object_type: u16, container: Container) -> usize {
        let base = if object_type < 0x100 { 4 } else { 8 };
        match container {
            Container::InitialTable => base + 2,
            _ => base,
        }
    }
}

fn registry() -> (ObjectRegistry, ObjectId) {
    let reg = ObjectRegistry::from_objects([PlacedObject::new(
        StagePoint::new(5, 5),
        0x0042,
        vec![0xAA, 0xBB, 0xCC, 0xDD],
        0xE300,
        Container::RegionTable,
    )])
    .unwrap();
    let id = reg.iter().next().unwrap().0;
    (reg, id)
}

#[test]
fn data_is_sized_for_the_edited_type_and_container() {
    let (mut reg, id) = registry();
    let mut session = EditSession::open(&reg, id, &SplitRules).unwrap();
    assert_eq!(session.data_field.max_digits(), 8);

    session.type_field.set_text("0142");
    session.container = Container::InitialTable;
    let outcome = session.commit(&mut reg, &SplitRules).unwrap();
    assert!(outcome.type_changed);

    let obj = reg.get(id).unwrap();
    assert_eq!(obj.data(), [0xAA, 0xBB, 0xCC, 0xDD, 0, 0, 0, 0, 0, 0]);
    assert!(obj.has_valid_data_len(&SplitRules));
}

#[test]
fn shrinking_truncates_silently() {
    let (mut reg, id) = registry();
    let mut session = EditSession::open(&reg, id, &SplitRules).unwrap();
    session.type_field.set_text("0142");
    session.commit(&mut reg, &SplitRules).unwrap();
    assert_eq!(reg.get(id).unwrap().data().len(), 8);

    let mut session = EditSession::open(&reg, id, &SplitRules).unwrap();
    session.type_field.set_text("0001");
    session.commit(&mut reg, &SplitRules).unwrap();
    assert_eq!(reg.get(id).unwrap().data(), [0xAA, 0xBB, 0xCC, 0xDD]);
}

#[test]
fn rejected_type_text_is_malformed() {
    // Field filtering keeps junk out of a `HexField`, so feed the parser directly.
    assert_eq!(
        parse_type("12g4"),
        Err(EditError::MalformedHex {
            input: HexInput::Type
        })
    );
    assert!(parse_type("1 2 3 4 5").is_err());
}

#[test]
fn commit_after_removal_fails() {
    let (mut reg, id) = registry();
    let mut session = EditSession::open(&reg, id, &SplitRules).unwrap();
    session.container = Container::AllTables;
    reg.remove(id);
    assert_eq!(
        session.commit(&mut reg, &SplitRules),
        Err(EditError::UnknownObject)
    );
}

#[test]
fn cancelled_pick_keeps_the_old_address() {
    let (mut reg, id) = registry();
    let before = reg.get(id).unwrap().clone();
    let mut session = EditSession::open(&reg, id, &SplitRules).unwrap();

    let mut picker = session.address_picker(AddressAllocator::default(), &reg);
    picker.select(None);
    assert_eq!(
        session.apply_picker(&picker),
        Err(EditError::NoBlockSelected)
    );
    // A picker that is simply dropped changes nothing either.
    let _ = session.address_picker(AddressAllocator::default(), &reg);

    let outcome = session.commit(&mut reg, &SplitRules).unwrap();
    assert!(!outcome.address_changed);
    assert_eq!(reg.get(id).unwrap(), &before);
}

#[test]
fn added_objects_show_up_as_occupants() {
    let (mut reg, existing) = registry();
    let alloc = AddressAllocator::default();
    let mut add = AddSession::open(&reg, Point::new(12.0, 12.0), &SplitRules).unwrap();
    assert_eq!(add.data_field.max_digits(), 8);

    let mut picker = add.address_picker(alloc, &reg);
    let block = alloc.layout().block_index_of(0xE300).unwrap();
    assert_eq!(picker.rows()[block].occupants.as_slice(), &[existing]);
    picker.select(Some(block));
    assert_eq!(add.apply_picker(&picker), Ok(0xE300));

    let added = add.commit(&mut reg, &SplitRules).unwrap();
    let table = alloc.block_table(&reg, None);
    assert_eq!(table[block].occupants.as_slice(), &[existing, added]);
}
