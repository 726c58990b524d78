//! Slot-indexed inventory helpers and a human-readable tag walker, shared by every operation
//! that edits an `Inventory` or `EnderItems` list rather than poking at raw tags directly.

use std::fmt::Write as _;
use std::ops::Range;

use playerdat_nbt::{Compound, Tag, TagList};

use crate::error::DomainError;

pub const INVENTORY_SLOTS: Range<i8> = 0..36;
pub const ENDER_CHEST_SLOTS: Range<i8> = 0..27;
pub const ARMOR_BOOTS_SLOT: i8 = 36;
pub const ARMOR_LEGS_SLOT: i8 = 37;
pub const ARMOR_CHEST_SLOT: i8 = 38;
pub const ARMOR_HELMET_SLOT: i8 = 39;
pub const OFFHAND_SLOT: i8 = 40;

fn slot_of(item: &Tag) -> Option<i8> {
    match item {
        Tag::Compound(compound) => compound.get::<i8>("Slot").ok(),
        _ => None,
    }
}

/// Finds the lowest slot in `range` not occupied by any element of `list`, or `None` if the
/// range is full.
pub fn find_free_slot(list: &TagList, range: Range<i8>) -> Option<i8> {
    range.into_iter().find(|slot| !list.iter().any(|item| slot_of(item) == Some(*slot)))
}

/// Removes every element of `list` whose `Slot` field equals `slot`, returning how many were
/// removed (normally 0 or 1, since a well-formed inventory has at most one entry per slot).
pub fn remove_at_slot(list: &mut TagList, slot: i8) -> usize {
    let mut removed = 0;
    let mut index = 0;
    while index < list.len() {
        if list.get(index).ok().and_then(slot_of) == Some(slot) {
            let _ = list.remove(index);
            removed += 1;
        } else {
            index += 1;
        }
    }
    removed
}

/// Removes any existing element occupying `item`'s slot, then appends `item`. `item` must carry
/// its own `Slot` field; the function does not assign one.
pub fn replace_at_slot(list: &mut TagList, item: Compound) -> Result<(), DomainError> {
    let slot: i8 = item.get("Slot")?;
    remove_at_slot(list, slot);
    list.push(Tag::Compound(item))?;
    Ok(())
}

/// Returns a new, empty list retaining the same declared element kind as `list`, the NBT-level
/// equivalent of clearing a Rust `Vec` without losing its type.
pub fn clear(list: &TagList) -> TagList {
    TagList::with_kind(list.element_kind())
}

/// Renders a tag tree as indented, human-readable text, matching the layout of an in-editor
/// inspector rather than any serialization format.
pub fn pretty_print(tag: &Tag) -> String {
    pretty_print_with_depth_limit(tag, None)
}

/// As [`pretty_print`], but truncates nested containers past `max_depth` so a deeply recursive
/// tree doesn't flood the output.
pub fn pretty_print_with_depth_limit(tag: &Tag, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    write_node(None, tag, 0, max_depth, &mut out);
    out
}

fn write_node(label: Option<&str>, tag: &Tag, depth: usize, max_depth: Option<usize>, out: &mut String) {
    let indent = "  ".repeat(depth);
    let prefix = label.map_or_else(|| indent.clone(), |label| format!("{indent}{label}: "));

    if max_depth.is_some_and(|limit| depth > limit) {
        let _ = writeln!(out, "{prefix}<{:?}, truncated>", tag.kind());
        return;
    }

    match tag {
        Tag::Compound(compound) => {
            let _ = writeln!(out, "{prefix}Compound ({} entries)", compound.len());
            for (key, value) in compound.iter() {
                write_node(Some(key), value, depth + 1, max_depth, out);
            }
        }
        Tag::List(list) => {
            let _ = writeln!(out, "{prefix}List<{:?}> ({} elements)", list.element_kind(), list.len());
            for (index, element) in list.iter().enumerate() {
                write_node(Some(&format!("[{index}]")), element, depth + 1, max_depth, out);
            }
        }
        other => {
            let _ = writeln!(out, "{prefix}{}", scalar_text(other));
        }
    }
}

fn scalar_text(tag: &Tag) -> String {
    match tag {
        Tag::Byte(value) => format!("Byte {value}"),
        Tag::Short(value) => format!("Short {value}"),
        Tag::Int(value) => format!("Int {value}"),
        Tag::Long(value) => format!("Long {value}"),
        Tag::Float(value) => format!("Float {value}"),
        Tag::Double(value) => format!("Double {value}"),
        Tag::ByteArray(value) => format!("ByteArray [{} bytes]", value.len()),
        Tag::String(value) => format!("String {value:?}"),
        Tag::RawString(value) => format!("RawString [{} bytes]", value.len()),
        Tag::IntArray(value) => format!("IntArray [{} ints]", value.len()),
        Tag::LongArray(value) => format!("LongArray [{} longs]", value.len()),
        Tag::Compound(_) | Tag::List(_) => {
            unreachable!("write_node handles Compound and List before reaching scalar_text")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_at(slot: i8) -> Compound {
        let mut item = Compound::new();
        item.insert("Slot", Tag::Byte(slot));
        item.insert("id", Tag::String("minecraft:stick".to_owned()));
        item
    }

    #[test]
    fn find_free_slot_skips_occupied_slots() {
        let mut list = TagList::new();
        list.push(Tag::Compound(item_at(0))).unwrap();
        list.push(Tag::Compound(item_at(1))).unwrap();
        assert_eq!(find_free_slot(&list, INVENTORY_SLOTS), Some(2));
    }

    #[test]
    fn find_free_slot_returns_none_when_full() {
        let mut list = TagList::new();
        for slot in ENDER_CHEST_SLOTS {
            list.push(Tag::Compound(item_at(slot))).unwrap();
        }
        assert_eq!(find_free_slot(&list, ENDER_CHEST_SLOTS), None);
    }

    #[test]
    fn replace_at_slot_keeps_one_entry_per_slot() {
        let mut list = TagList::new();
        list.push(Tag::Compound(item_at(5))).unwrap();
        replace_at_slot(&mut list, item_at(5)).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_at_slot_is_a_no_op_when_nothing_matches() {
        let mut list = TagList::new();
        list.push(Tag::Compound(item_at(0))).unwrap();
        assert_eq!(remove_at_slot(&mut list, 9), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn clear_preserves_element_kind() {
        let mut list = TagList::new();
        list.push(Tag::Compound(item_at(0))).unwrap();
        let cleared = clear(&list);
        assert_eq!(cleared.element_kind(), list.element_kind());
        assert!(cleared.is_empty());
    }

    #[test]
    fn pretty_print_renders_nested_structure() {
        let mut root = Compound::new();
        root.insert("Score", Tag::Int(3));
        let text = pretty_print(&Tag::Compound(root));
        assert!(text.contains("Score: Int 3"));
    }

    #[test]
    fn pretty_print_truncates_past_depth_limit() {
        let mut inner = Compound::new();
        inner.insert("Deep", Tag::Int(1));
        let mut outer = Compound::new();
        outer.insert("Inner", Tag::Compound(inner));
        let text = pretty_print_with_depth_limit(&Tag::Compound(outer), Some(1));
        assert!(text.contains("truncated"));
        assert!(!text.contains("Deep"));
    }
}
