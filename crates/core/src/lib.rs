//! Repository lookup, safe persistence, and slot-level editing for Java Edition per-player NBT
//! files, built on top of [`playerdat_nbt`].

mod domain;
mod error;
mod player_file;
mod repository;
mod safe_write;
mod usercache;

pub use self::domain::{
    clear, find_free_slot, pretty_print, pretty_print_with_depth_limit, remove_at_slot,
    replace_at_slot, ARMOR_BOOTS_SLOT, ARMOR_CHEST_SLOT, ARMOR_HELMET_SLOT, ARMOR_LEGS_SLOT,
    ENDER_CHEST_SLOTS, INVENTORY_SLOTS, OFFHAND_SLOT,
};
pub use self::error::{CoreError, DomainError, SafeWriteError};
pub use self::player_file::{PlayerFile, SessionState};
pub use self::repository::{PlayerDataRepository, PlayerEntry};
pub use self::safe_write::{restore_backup, restore_undo, save, DEFAULT_UNDO_LIMIT};
