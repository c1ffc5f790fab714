#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing
)]
//! Integration tests for diagnostics.
//!
//! Every warning a broken configuration produces is rendered with its file
//! and line, and the load still returns what it could build.

mod common;

use common::TestContextBuilder;

const BROKEN: &str = r#"<JWM>
<FocusModel>hover</FocusModel>
<SnapMode distance="99">border</SnapMode>
<Bogus/>
<Key key="x">bogus</Key>
<Key mask="Q" key="y">close</Key>
<Key mask="A">close</Key>
<Key key="F1">root:7</Key>
<Group><Option>floaty</Option></Group>
<Tray><Swallow/><Dock/><Dock/></Tray>
<RootMenu onroot="1x"><Program/></RootMenu>
<Include>{dir}/missing.xml</Include>
</JWM>"#;

#[test]
fn broken_configuration_diagnostics() {
    let ctx = TestContextBuilder::new().with_config(BROKEN).build();

    let outcome = ctx.load();

    let rendered = ctx.messages(&outcome).join("\n");
    insta::assert_snapshot!(rendered);
}

#[test]
fn broken_configuration_still_builds_what_it_can() {
    let ctx = TestContextBuilder::new().with_config(BROKEN).build();

    let outcome = ctx.load();

    let config = &outcome.config;
    assert_eq!(config.keys.len(), 2);
    assert_eq!(config.snap.distance, 5);
    assert_eq!(config.trays[0].components.len(), 1);
    let menu = config.root_menus.get(1).expect("root menu 1");
    assert_eq!(menu.items.len(), 1);
    assert_eq!(
        menu.items[0].action,
        jwmrc::menu::MenuAction::Execute(String::new())
    );
    assert_eq!(config.groups.len(), 1);
}

#[test]
fn malformed_markup_is_a_single_diagnostic() {
    let ctx = TestContextBuilder::new()
        .with_config("<JWM>\n<Tray>\n</JWM>")
        .build();

    let outcome = ctx.load();

    assert_eq!(outcome.diagnostics.len(), 1);
    let origin = outcome.diagnostics[0].origin.as_ref().expect("origin");
    assert_eq!(origin.file, ctx.path(common::PRIMARY).display().to_string());
    assert!(outcome.config.trays.is_empty());
}
