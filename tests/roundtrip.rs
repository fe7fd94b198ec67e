use krst::{CrewList, Direction, LoadedRoster, SortBarState, SortKey};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// Writer-canonical layout: tab indent, `key = value`, LF endings.
const SAMPLE: &str = concat!(
    "GAME\n",
    "{\n",
    "\tversion = 1.12.5\n",
    "\tTitle = Roundtrip Test\n",
    "\tROSTER\n",
    "\t{\n",
    "\t\tKERBAL\n",
    "\t\t{\n",
    "\t\t\tname = Jebediah Kerman\n",
    "\t\t\tgender = Male\n",
    "\t\t\ttype = Crew\n",
    "\t\t\ttrait = Pilot\n",
    "\t\t\tbrave = 0.5\n",
    "\t\t\tdumb = 0.5\n",
    "\t\t\tbadS = True\n",
    "\t\t\tveteran = True\n",
    "\t\t\tstate = Available\n",
    "\t\t\texperience = 0\n",
    "\t\t}\n",
    "\t\tKERBAL\n",
    "\t\t{\n",
    "\t\t\tname = Mitster Kerman\n",
    "\t\t\tgender = Male\n",
    "\t\t\ttype = Applicant\n",
    "\t\t\ttrait = Engineer\n",
    "\t\t\tbrave = 0.3\n",
    "\t\t\tdumb = 0.8\n",
    "\t\t\tbadS = False\n",
    "\t\t\tstate = Available\n",
    "\t\t\texperience = 0\n",
    "\t\t}\n",
    "\t}\n",
    "}\n",
);

#[test]
fn roundtrip_unmodified_sfs_bytes_identical() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("persistent.sfs");
    std::fs::write(&path, SAMPLE.as_bytes())?;

    let roster = LoadedRoster::load_path(&path)?;
    assert!(!roster.dirty);
    assert_eq!(roster.save_bytes(), SAMPLE.as_bytes());
    Ok(())
}

#[test]
fn unmodified_save_keeps_comments_and_blank_lines() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("persistent.sfs");

    // Not writer-canonical: a comment and a blank line the writer would drop.
    let input = concat!(
        "// save edited by hand\n",
        "GAME\n",
        "{\n",
        "\n",
        "\tversion = 1.12.5\n",
        "\tROSTER\n",
        "\t{\n",
        "\t\tKERBAL\n",
        "\t\t{\n",
        "\t\t\tname = Valentina Kerman\n",
        "\t\t\ttype = Crew\n",
        "\t\t\tstate = Available\n",
        "\t\t}\n",
        "\t}\n",
        "}\n",
    );
    std::fs::write(&path, input.as_bytes())?;

    let roster = LoadedRoster::load_path(&path)?;
    assert_eq!(roster.save_bytes(), input.as_bytes());
    Ok(())
}

#[test]
fn modified_save_reparses() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("persistent.sfs");
    std::fs::write(&path, SAMPLE.as_bytes())?;

    let mut roster = LoadedRoster::load_path(&path)?;
    roster.hire("Mitster Kerman")?;
    assert!(roster.dirty);

    let bytes = roster.save_bytes();
    assert_ne!(bytes, SAMPLE.as_bytes());

    let reparsed = krst::ConfigNode::parse(std::str::from_utf8(&bytes)?)?;
    let game = reparsed.child("GAME").expect("GAME survives");
    assert!(game.child("ROSTER").is_some());
    Ok(())
}

#[test]
fn sorting_permutes_lines_without_losing_any() -> Result<()> {
    fn kerbal_lines(name: &str) -> String {
        format!(
            "\t\tKERBAL\n\t\t{{\n\t\t\tname = {name}\n\t\t\ttype = Crew\n\t\t\tstate = Available\n\t\t}}\n"
        )
    }

    let input = format!(
        "GAME\n{{\n\tROSTER\n\t{{\n{}{}{}\t}}\n}}\n",
        kerbal_lines("Bob Kerman"),
        kerbal_lines("Alice Kerman"),
        kerbal_lines("Carol Kerman"),
    );

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("persistent.sfs");
    std::fs::write(&path, input.as_bytes())?;

    let mut roster = LoadedRoster::load_path(&path)?;
    let state = SortBarState {
        key: Some(SortKey::Name),
        direction: Direction::Ascending,
    };
    assert!(roster.sort_list(CrewList::Available, |a, b| state.compare(a, b)));

    let output = String::from_utf8(roster.save_bytes())?;
    assert_ne!(output, input);

    // A sort moves whole KERBAL blocks around; every line must survive.
    let mut input_lines: Vec<&str> = input.lines().collect();
    let mut output_lines: Vec<&str> = output.lines().collect();
    input_lines.sort_unstable();
    output_lines.sort_unstable();
    assert_eq!(output_lines, input_lines);
    Ok(())
}

#[test]
fn save_to_path_resets_dirty_and_roundtrips_again() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("persistent.sfs");
    let out_path = dir.path().join("sorted.sfs");
    std::fs::write(&path, SAMPLE.as_bytes())?;

    let mut roster = LoadedRoster::load_path(&path)?;
    roster.hire("Mitster Kerman")?;
    roster.save_to_path(&out_path)?;
    assert!(!roster.dirty);
    assert_eq!(roster.source_path.as_deref(), Some(out_path.as_path()));

    // The rewritten file is now the baseline for byte-exact roundtripping.
    let reloaded = LoadedRoster::load_path(&out_path)?;
    assert_eq!(reloaded.save_bytes(), std::fs::read(&out_path)?);
    Ok(())
}
