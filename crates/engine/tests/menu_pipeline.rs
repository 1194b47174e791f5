use engine::{CommandRegistry, LoggingOpener, MenuContext, MenuEngine, OutlineToolkit, Settings};
use menu_model::{Callback, FavoriteRule, OwningApp, RawCommand};
use url::Url;

fn register(
    registry: &mut CommandRegistry,
    name: &str,
    app: Option<&OwningApp>,
    kind: Option<&str>,
) {
    registry
        .register(RawCommand {
            name: name.into(),
            app: app.cloned(),
            kind: kind.map(str::to_string),
            icon: None,
            callback: Some(Callback::new(|| {})),
        })
        .expect("register");
}

#[test]
fn registry_to_outline_matches_expected_layout() {
    let loader = OwningApp::new("tk-multi-loader", "Loader").expect("app");
    let publisher = OwningApp::new("tk-multi-publish2", "Publisher").expect("app");
    let workfiles = OwningApp::new("tk-multi-workfiles2", "Workfiles").expect("app");

    let mut registry = CommandRegistry::new();
    register(&mut registry, "Publish", Some(&loader), None);
    register(&mut registry, "Open", Some(&loader), None);
    register(&mut registry, "Scan", None, None);
    register(&mut registry, "Work Area Info...", Some(&workfiles), Some("context_menu"));
    register(&mut registry, "File Open...", Some(&workfiles), None);
    register(&mut registry, "File Save...", Some(&workfiles), None);
    register(&mut registry, "Publish...", Some(&publisher), None);

    let settings = Settings {
        menu_favourites: vec![
            FavoriteRule::new("tk-multi-publish2", "Publish..."),
            FavoriteRule::new("tk-multi-snapshot", "Snapshot..."),
        ],
        ..Settings::default()
    };
    let context = MenuContext::new(
        "Shot bunny_010",
        Url::parse("https://studio.example.com/detail/Shot/1184").expect("url"),
    )
    .with_filesystem_locations(["/projects/bunny/shots/bunny_010"]);

    let engine = MenuEngine::new(registry, context, settings, LoggingOpener::new());
    let mut outline = OutlineToolkit::new();
    engine.render(&mut outline);

    assert_eq!(
        outline.to_string(),
        "\
Shotgun >
  Shot bunny_010 >
    Jump to Shotgun
    Jump to File System
    ---
    Work Area Info...
  ---
  Publish...
  ---
  Loader >
    Publish
    Open
  Scan
  Workfiles >
    File Open...
    File Save...
"
    );
    assert_eq!(engine.missed_favorites().len(), 1);
}

#[test]
fn jump_actions_reach_the_opener() {
    let context = MenuContext::new(
        "Asset Bunny",
        Url::parse("https://studio.example.com/detail/Asset/7").expect("url"),
    )
    .with_filesystem_locations(["/projects/bunny/assets/Bunny"]);
    let engine = MenuEngine::new(
        CommandRegistry::new(),
        context,
        Settings::default(),
        LoggingOpener::new(),
    );

    engine
        .activate_path(&["Asset Bunny", "Jump to Shotgun"])
        .expect("site");
    engine
        .activate_path(&["Asset Bunny", "Jump to File System"])
        .expect("fs");

    let opened: Vec<String> = engine
        .opener()
        .opened()
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(
        opened,
        vec![
            "https://studio.example.com/detail/Asset/7".to_string(),
            "file:///projects/bunny/assets/Bunny".to_string(),
        ]
    );
}
