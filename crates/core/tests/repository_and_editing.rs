use std::fs;

use playerdat_core::{
    find_free_slot, replace_at_slot, PlayerDataRepository, PlayerFile, INVENTORY_SLOTS,
};
use playerdat_nbt::{Compound, Tag, TagList};

fn write_player_file(dir: &std::path::Path, identifier: &str) -> std::path::PathBuf {
    let mut inventory = TagList::new();
    let mut boots = Compound::new();
    boots.insert("Slot", Tag::Byte(0));
    boots.insert("id", Tag::String("minecraft:stick".to_owned()));
    inventory.push(Tag::Compound(boots)).unwrap();

    let mut data = Compound::new();
    data.insert("Inventory", Tag::List(inventory));
    let mut root = Compound::new();
    root.insert("Data", Tag::Compound(data));

    let bytes = playerdat_nbt::io::write_gzip("", &root).unwrap();
    let path = dir.join(format!("{identifier}.dat"));
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn server_install_round_trip() {
    let server_root = tempfile::tempdir().unwrap();
    let playerdata_dir = server_root.path().join("world").join("playerdata");
    fs::create_dir_all(&playerdata_dir).unwrap();

    let identifier = "11111111-2222-3333-4444-555555555555";
    write_player_file(&playerdata_dir, identifier);
    fs::write(
        server_root.path().join("world").join("usercache.json"),
        format!(r#"[{{"uuid":"{identifier}","name":"Alex"}}]"#),
    )
    .unwrap();

    let repo = PlayerDataRepository::with_defaults(server_root.path());
    let players = repo.list_players().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].display_name, "Alex");

    let resolved = repo.resolve("Alex").expect("resolves by display name");
    let mut file = PlayerFile::load(&resolved, identifier, "Alex").unwrap();

    let mut inventory: TagList = file.data().get::<TagList>("Inventory").unwrap();
    let free_slot = find_free_slot(&inventory, INVENTORY_SLOTS).unwrap();
    assert_eq!(free_slot, 1);

    let mut new_item = Compound::new();
    new_item.insert("Slot", Tag::Byte(free_slot));
    new_item.insert("id", Tag::String("minecraft:diamond".to_owned()));
    replace_at_slot(&mut inventory, new_item).unwrap();

    file.data_mut().insert("Inventory", Tag::List(inventory));
    file.save().unwrap();

    let reloaded = PlayerFile::load(&resolved, identifier, "Alex").unwrap();
    let reloaded_inventory: TagList = reloaded.data().get::<TagList>("Inventory").unwrap();
    assert_eq!(reloaded_inventory.len(), 2);

    let backup = {
        let mut name = resolved.clone().into_os_string();
        name.push(".bak");
        std::path::PathBuf::from(name)
    };
    assert!(backup.is_file());
}
