//! Menu tests - opening, filtering, navigation, exclusivity

mod common;

use common::{
    has_debounced_search, menu_labels, press, test_model, test_model_with_templates, type_str,
};
use inlay::commands::Cmd;
use inlay::input::KeyInput;
use inlay::messages::{HostMsg, Msg, SearchMsg};
use inlay::model::{CaretRect, MenuKind};
use inlay::search::SearchResult;
use inlay::trigger::TriggerKind;
use inlay::update::update;

// ========================================================================
// Command menu ("/")
// ========================================================================

#[test]
fn test_slash_opens_command_menu_with_all_templates() {
    let mut model = test_model_with_templates("");
    type_str(&mut model, "/");
    assert_eq!(model.menus.active_kind(), Some(MenuKind::Command));
    assert_eq!(menu_labels(&model), vec!["Meeting notes", "Todo", "Journal"]);
}

#[test]
fn test_slash_filter_narrows_templates() {
    let mut model = test_model_with_templates("");
    type_str(&mut model, "/WORK");
    assert_eq!(menu_labels(&model), vec!["Meeting notes"]);

    type_str(&mut model, "x");
    assert!(model.is_menu_open());
    assert!(menu_labels(&model).is_empty());
}

#[test]
fn test_slash_mid_word_does_nothing() {
    let mut model = test_model_with_templates("");
    type_str(&mut model, "and/or");
    assert!(!model.is_menu_open());
    assert_eq!(model.trigger, None);
}

#[test]
fn test_space_closes_menu() {
    let mut model = test_model_with_templates("");
    type_str(&mut model, "/todo");
    assert!(model.is_menu_open());
    type_str(&mut model, " ");
    assert!(!model.is_menu_open());
    assert_eq!(model.trigger, None);
}

#[test]
fn test_backspacing_over_trigger_closes_menu() {
    let mut model = test_model_with_templates("");
    type_str(&mut model, "/t");
    press(&mut model, KeyInput::Backspace);
    assert!(model.is_menu_open());
    press(&mut model, KeyInput::Backspace);
    assert!(!model.is_menu_open());
}

#[test]
fn test_moving_cursor_away_closes_menu() {
    let mut model = test_model_with_templates("hello ");
    type_str(&mut model, "/to");
    press(&mut model, KeyInput::Home);
    assert!(!model.is_menu_open());
    press(&mut model, KeyInput::End);
    assert!(model.is_menu_open());
}

// ========================================================================
// Navigation
// ========================================================================

#[test]
fn test_arrow_keys_wrap_highlight() {
    let mut model = test_model_with_templates("");
    type_str(&mut model, "/");
    let highlighted = |m: &inlay::ComposerModel| m.active_menu().unwrap().highlighted;

    press(&mut model, KeyInput::ArrowUp);
    assert_eq!(highlighted(&model), 2);
    press(&mut model, KeyInput::ArrowDown);
    assert_eq!(highlighted(&model), 0);
    press(&mut model, KeyInput::ArrowDown);
    assert_eq!(highlighted(&model), 1);

    // Refiltering resets the highlight
    type_str(&mut model, "o");
    assert_eq!(highlighted(&model), 0);
}

// ========================================================================
// Mention menu ("@")
// ========================================================================

#[test]
fn test_at_opens_mention_menu_and_debounces() {
    let mut model = test_model("");
    let cmds = type_str(&mut model, "@");
    assert_eq!(model.menus.active_kind(), Some(MenuKind::Mention));
    assert!(!cmds.iter().any(|c| matches!(c, Cmd::DebouncedSearch { .. })));

    let cmds = type_str(&mut model, "ro");
    assert!(has_debounced_search(&cmds, "r"));
    assert!(has_debounced_search(&cmds, "ro"));
    assert!(model.search.loading);
    assert!(cmds.iter().any(|c| matches!(
        c,
        Cmd::DebouncedSearch { delay_ms: 300, .. }
    )));
}

#[test]
fn test_debounce_elapsed_runs_search_only_when_current() {
    let mut model = test_model("");
    type_str(&mut model, "@rob");

    let stale = update(
        &mut model,
        Msg::Search(SearchMsg::DebounceElapsed { query: "ro".into() }),
    );
    assert_eq!(stale, None);

    let current = update(
        &mut model,
        Msg::Search(SearchMsg::DebounceElapsed { query: "rob".into() }),
    );
    assert_eq!(
        current,
        Some(Cmd::RunSearch {
            query: "rob".into(),
            limit: 20
        })
    );
}

#[test]
fn test_cache_hit_skips_debounce() {
    let mut model = test_model("");
    model
        .search
        .cache
        .insert("rob", vec![SearchResult::page("r", "Robert")]);

    let cmds = type_str(&mut model, "@rob");
    // The last keystroke hit the cache and cancelled the pending "ro" timer
    assert!(!has_debounced_search(&cmds, "rob"));
    assert_eq!(cmds.iter().filter(|c| **c == Cmd::CancelSearch).count(), 1);
    assert_eq!(menu_labels(&model), vec!["Robert"]);
    assert!(!model.search.loading);
}

#[test]
fn test_completed_applies_only_exact_filter() {
    let mut model = test_model("");
    type_str(&mut model, "@abz");

    update(
        &mut model,
        Msg::Search(SearchMsg::Completed {
            query: "ab".into(),
            result: Ok(vec![SearchResult::page("ab", "AB")]),
        }),
    );
    assert!(menu_labels(&model).is_empty());
    assert!(model.search.loading);
    assert!(model.search.cache.contains("ab"));

    update(
        &mut model,
        Msg::Search(SearchMsg::Completed {
            query: "abz".into(),
            result: Ok(vec![SearchResult::page("abz", "ABZ")]),
        }),
    );
    assert_eq!(menu_labels(&model), vec!["ABZ"]);
    assert!(!model.search.loading);
}

#[test]
fn test_search_error_yields_empty_list() {
    let mut model = test_model("");
    type_str(&mut model, "@x");
    update(
        &mut model,
        Msg::Search(SearchMsg::Completed {
            query: "x".into(),
            result: Err("timeout".into()),
        }),
    );
    assert!(model.is_menu_open());
    assert!(menu_labels(&model).is_empty());
    assert!(!model.search.loading);
    assert!(!model.search.cache.contains("x"));
}

// ========================================================================
// Exclusivity, anchors, host control
// ========================================================================

#[test]
fn test_menus_are_mutually_exclusive() {
    let mut model = test_model_with_templates("");
    type_str(&mut model, "@ab");
    assert_eq!(model.menus.active_kind(), Some(MenuKind::Mention));

    let cmds = type_str(&mut model, " /");
    assert_eq!(model.menus.active_kind(), Some(MenuKind::Command));
    assert!(!model.menus.mention.is_open());
    assert!(cmds.contains(&Cmd::CancelSearch));
}

#[test]
fn test_menu_anchor_snapshots_caret() {
    let mut model = test_model("");
    update(
        &mut model,
        Msg::Host(HostMsg::SetCaretRect(CaretRect::new(10.0, 20.0, 16.0))),
    );
    type_str(&mut model, "@");
    update(
        &mut model,
        Msg::Host(HostMsg::SetCaretRect(CaretRect::new(18.0, 20.0, 16.0))),
    );
    type_str(&mut model, "a");

    let anchor = model.active_menu().unwrap().anchor;
    assert_eq!(anchor, Some(CaretRect::new(10.0, 20.0, 16.0)));
}

#[test]
fn test_host_close_menus_dismisses_trigger() {
    let mut model = test_model("");
    type_str(&mut model, "@ro");
    update(&mut model, Msg::Host(HostMsg::CloseMenus));
    assert!(!model.is_menu_open());
    assert_eq!(model.dismissed_trigger, Some((TriggerKind::At, 0)));
}

#[test]
fn test_templates_loaded_refilters_open_menu() {
    let mut model = test_model("");
    type_str(&mut model, "/jour");
    assert!(menu_labels(&model).is_empty());

    update(
        &mut model,
        Msg::Host(HostMsg::TemplatesLoaded(common::sample_templates())),
    );
    assert_eq!(menu_labels(&model), vec!["Journal"]);
}
