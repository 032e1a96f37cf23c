use std::fs;
use std::path::{Path, PathBuf};

use map_content::ContentFactory;
use map_core::{Direction, LayoutConfig, LayoutEngine, StrategyKind};
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn bundled_temple() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../games/temple")
}

#[test]
fn loads_bundled_temple_game() {
    let game = ContentFactory::new(bundled_temple()).load_game().unwrap();

    assert_eq!(game.rooms.len(), 10);
    assert_eq!(game.starting_room().as_str(), "jungleClearing");
    assert_eq!(game.manifest.title.as_deref(), Some("Temple Adventure"));
    assert_eq!(game.layout.strategy, StrategyKind::DepthGrid);
    assert_eq!(
        game.rooms.room("chamberOfIdol").unwrap().label(),
        "Chamber of the Idol"
    );

    let layout = LayoutEngine::new(game.layout.clone())
        .unwrap()
        .layout(&game.rooms, game.starting_room().as_str())
        .unwrap();
    assert_eq!(layout.len(), 10);
}

#[test]
fn missing_layout_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "data/config.json", r#"{ "startingRoom": "a" }"#);
    write(
        dir.path(),
        "data/rooms.json",
        r#"{ "a": { "exits": { "east": "b" } }, "b": { "exits": { "west": "a" } } }"#,
    );

    let game = ContentFactory::new(dir.path()).load_game().unwrap();
    assert_eq!(game.layout, LayoutConfig::default());
    assert_eq!(
        game.rooms.exit("a", Direction::East).map(|id| id.as_str()),
        Some("b")
    );
}

#[test]
fn ron_rooms_are_used_when_json_is_absent() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "data/config.json", r#"{ "startingRoom": "cellar" }"#);
    write(
        dir.path(),
        "data/rooms.ron",
        r#"{ "cellar": (exits: { "up": "kitchen" }), "kitchen": (exits: { "down": "cellar" }) }"#,
    );
    write(dir.path(), "layout.toml", "strategy = \"axis\"\n");

    let factory = ContentFactory::new(dir.path());
    assert!(factory.rooms_path().ends_with("rooms.ron"));

    let game = factory.load_game().unwrap();
    assert_eq!(game.rooms.len(), 2);
    assert_eq!(game.layout.strategy, StrategyKind::AxisGrid);
}

#[test]
fn starting_room_must_exist() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "data/config.json", r#"{ "startingRoom": "nowhere" }"#);
    write(dir.path(), "data/rooms.json", r#"{ "a": {} }"#);

    let err = ContentFactory::new(dir.path()).load_game().unwrap_err();
    assert!(err.to_string().contains("nowhere"), "{err}");
}

#[test]
fn missing_game_dir_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = ContentFactory::new(dir.path().join("absent"))
        .load_game()
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"), "{err}");
}

#[test]
fn invalid_layout_config_names_the_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "data/config.json", r#"{ "startingRoom": "a" }"#);
    write(dir.path(), "data/rooms.json", r#"{ "a": {} }"#);
    write(dir.path(), "layout.toml", "[canvas]\nmargin = 75.0\n");

    let err = ContentFactory::new(dir.path()).load_game().unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("layout.toml"), "{chain}");
    assert!(chain.contains("canvas.margin"), "{chain}");
}
