use krst::{Direction, SortBarState, SortBarStore, SortKey, statics};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn store_roundtrips_through_the_state_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // Nested path: save_path must create the missing .krst directory.
    let path = dir
        .path()
        .join(statics::STORE_DIR_NAME)
        .join(statics::STORE_FILE_NAME);

    let mut store = SortBarStore::default();
    store.set(
        "Available",
        SortBarState {
            key: Some(SortKey::Level),
            direction: Direction::Descending,
        },
    );
    store.set(
        "Applicants",
        SortBarState {
            key: Some(SortKey::Courage),
            direction: Direction::Ascending,
        },
    );
    store.save_path(&path)?;

    let reloaded = SortBarStore::load_path(&path);
    assert_eq!(reloaded, store);
    Ok(())
}

#[test]
fn missing_state_file_loads_the_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SortBarStore::load_path(&dir.path().join("nope.json5"));
    assert_eq!(store, SortBarStore::default());
}

#[test]
fn malformed_state_file_loads_the_default() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sortbars.json5");
    std::fs::write(&path, "{ this is not json5")?;

    let store = SortBarStore::load_path(&path);
    assert_eq!(store, SortBarStore::default());
    Ok(())
}

#[test]
fn future_versioned_state_file_is_ignored() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sortbars.json5");
    std::fs::write(
        &path,
        "{ version: 99, bars: { \"Available\": { key: \"Name\", direction: \"Ascending\" } } }",
    )?;

    let store = SortBarStore::load_path(&path);
    assert_eq!(store, SortBarStore::default());
    Ok(())
}

#[test]
fn state_file_accepts_hand_edits() -> Result<()> {
    // json5 niceties: unquoted keys, trailing comma, a comment.
    let text = concat!(
        "{\n",
        "    // switched by hand\n",
        "    version: 1,\n",
        "    bars: {\n",
        "        Killed: { key: \"Level\", direction: \"Descending\", },\n",
        "    },\n",
        "}\n",
    );

    let store = SortBarStore::from_json5(text)?;
    assert_eq!(
        store.get("Killed"),
        Some(SortBarState {
            key: Some(SortKey::Level),
            direction: Direction::Descending,
        })
    );
    Ok(())
}

#[test]
fn escaped_names_survive_a_save_and_reload() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sortbars.json5");
    // A hand-edited file may carry an escaped key; re-saving it must keep
    // the file parseable instead of silently falling back to the default.
    std::fs::write(
        &path,
        "{ version: 1, bars: { \"My \\\"B\\\" Roster\": { key: \"Name\", direction: \"Ascending\" } } }",
    )?;

    let store = SortBarStore::load_path(&path);
    assert_eq!(
        store.get(r#"My "B" Roster"#),
        Some(SortBarState {
            key: Some(SortKey::Name),
            direction: Direction::Ascending,
        })
    );

    store.save_path(&path)?;
    assert_eq!(SortBarStore::load_path(&path), store);
    Ok(())
}
