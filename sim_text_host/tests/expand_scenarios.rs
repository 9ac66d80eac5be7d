//! End-to-end expansion scenarios
//!
//! These tests drive the whole pipeline through the simulated host with
//! keys, the way an editor would.

use expand_core::{
    AbortReason, Dialect, ExpandCommand, ExpandError, ExpandOutcome, ExpandSettings, Expansion,
    Key, ProjectionVeto, Span, SpanLocator, TabStopCandidate, TextHost,
};
use sim_text_host::{
    MarkupClassifier, RecordingReformatter, SimTextHost, StaticProjection, TableGrammar,
    TagPerLineReformatter,
};
use std::io::Write;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn grammar() -> TableGrammar {
    TableGrammar::new()
        .with_rule("p", "<p></p>")
        .with_rule("div>p", "<div><p></p></div>")
        .with_rule("a[href]", r#"<a href=""></a>"#)
        .with_rule("br", "<br/>")
        .with_rule("ul>li", "<ul><li></li></ul>")
}

fn command() -> ExpandCommand<MarkupClassifier, TableGrammar> {
    init_tracing();
    ExpandCommand::new(MarkupClassifier::new().unwrap(), grammar()).unwrap()
}

#[test]
fn test_nested_element_lands_in_innermost_content() {
    let mut host = SimTextHost::with_text("div>p");
    let mut cmd = command();

    let outcome = cmd.exec(Key::Tab, &mut host).unwrap();

    assert_eq!(outcome, ExpandOutcome::Handled);
    assert_eq!(host.text(), "<div><p></p></div>");
    // Between <p> and </p>
    assert_eq!(host.caret(), 8);
    assert!(host.selection().is_empty());
    assert!(!host.is_edit_open());
}

#[test]
fn test_empty_attribute_is_the_only_stop() {
    let mut host = SimTextHost::with_text("a[href]");
    let mut cmd = command();

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), r#"<a href=""></a>"#);
    // Inside the empty href quotes
    assert_eq!(host.caret(), 9);
}

#[test]
fn test_void_element_falls_back_to_end() {
    let mut host = SimTextHost::with_text("x br");
    let mut cmd = command();

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), "x <br/>");
    assert_eq!(host.caret(), 7);
}

#[test]
fn test_selection_aborts_without_editing() {
    let mut host = SimTextHost::with_text("div>p");
    host.select(Span::new(0, 5)).unwrap();
    let before = host.snapshot();
    let mut cmd = command();

    let outcome = cmd.exec(Key::Tab, &mut host).unwrap();

    assert_eq!(outcome, ExpandOutcome::NotHandled(AbortReason::SelectionNotEmpty));
    assert_eq!(host.snapshot().hash(), before.hash());
}

#[test]
fn test_completion_list_blocks_expansion() {
    let mut host = SimTextHost::with_text("div>p");
    host.set_completion_active(true);
    let before = host.snapshot();
    let mut cmd = command();

    assert_eq!(
        cmd.exec(Key::Tab, &mut host).unwrap(),
        ExpandOutcome::NotHandled(AbortReason::CompletionActive)
    );
    assert_eq!(host.snapshot(), before);
}

#[test]
fn test_caret_at_start_never_expands() {
    let mut cmd = command();
    let classifier = MarkupClassifier::new().unwrap();
    let locator = SpanLocator::new(&classifier);

    for text in ["", "p", "div>p", "<ul>\n  li", "   "] {
        let mut host = SimTextHost::with_text(text);
        host.set_caret(0).unwrap();
        assert_eq!(locator.locate(&host.current_snapshot(), 0), None);

        let before = host.snapshot();
        assert_eq!(
            cmd.exec(Key::Tab, &mut host).unwrap(),
            ExpandOutcome::NotHandled(AbortReason::NoAbbreviationFound)
        );
        assert_eq!(host.snapshot(), before);
    }
}

#[test]
fn test_unknown_abbreviation_is_rejected() {
    let mut host = SimTextHost::with_text("blink");
    let before = host.snapshot();
    let mut cmd = command();

    assert_eq!(
        cmd.exec(Key::Tab, &mut host).unwrap(),
        ExpandOutcome::NotHandled(AbortReason::ExpansionRejected)
    );
    assert_eq!(host.snapshot(), before);
}

#[test]
fn test_grammar_fault_propagates_without_edit() {
    init_tracing();
    let mut host = SimTextHost::with_text("ul>(li");
    let before = host.snapshot();
    let grammar = grammar().failing_on("ul>(li");
    let mut cmd = ExpandCommand::new(MarkupClassifier::new().unwrap(), grammar).unwrap();

    assert!(matches!(
        cmd.exec(Key::Tab, &mut host),
        Err(ExpandError::Grammar(_))
    ));
    assert_eq!(host.snapshot(), before);
    assert!(!host.is_edit_open());
}

#[test]
fn test_abbreviation_starts_after_last_tag() {
    let mut host = SimTextHost::with_text("<b>é</b>p");
    let mut cmd = command();

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), "<b>é</b><p></p>");
    // The earlier <b> content is before the insertion and is skipped
    assert_eq!(host.caret(), 12);
}

#[test]
fn test_indented_abbreviation_keeps_indent() {
    let mut host = SimTextHost::with_text("<ul>\n    p");
    let mut cmd = command();

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), "<ul>\n    <p></p>");
    assert_eq!(host.caret(), 12);
}

#[test]
fn test_expansion_is_one_undo_unit() {
    let mut host = SimTextHost::with_text("div>p");
    let mut cmd = command();

    cmd.exec(Key::Tab, &mut host).unwrap();
    assert_eq!(host.undo_depth(), 1);
    assert_eq!(host.last_undo_name(), Some("Expand Abbreviation"));

    assert!(host.undo());
    assert_eq!(host.text(), "div>p");
    assert_eq!(host.caret(), 5);

    assert!(host.redo());
    assert_eq!(host.text(), "<div><p></p></div>");
}

#[test]
fn test_reformat_runs_inside_the_transaction() {
    init_tracing();
    let mut host = SimTextHost::with_text("ul>li");
    let mut cmd = ExpandCommand::new(MarkupClassifier::new().unwrap(), grammar())
        .unwrap()
        .with_reformatter(TagPerLineReformatter);

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), "<ul>\n<li>\n</li>\n</ul>");
    // Content of <li> after formatting: the line break between the tags
    assert_eq!(host.caret(), 9);
    assert_eq!(host.undo_depth(), 1);

    host.undo();
    assert_eq!(host.text(), "ul>li");
}

#[test]
fn test_reformat_failure_rolls_back() {
    init_tracing();
    let mut host = SimTextHost::with_text("div>p");
    let before = host.snapshot();
    let mut cmd = ExpandCommand::new(MarkupClassifier::new().unwrap(), grammar())
        .unwrap()
        .with_reformatter(RecordingReformatter::failing());

    assert!(matches!(
        cmd.exec(Key::Tab, &mut host),
        Err(ExpandError::Reformat(_))
    ));
    assert_eq!(cmd.reformatter().calls(), 1);
    assert_eq!(host.snapshot().hash(), before.hash());
    assert!(!host.is_edit_open());
}

#[test]
fn test_reformatter_sees_inserted_selection() {
    init_tracing();
    let mut host = SimTextHost::with_text("x div>p");
    let mut cmd = ExpandCommand::new(MarkupClassifier::new().unwrap(), grammar())
        .unwrap()
        .with_reformatter(RecordingReformatter::new());

    cmd.exec(Key::Tab, &mut host).unwrap();
    assert_eq!(cmd.reformatter().seen(), &[Span::new(2, 18)]);
}

#[test]
fn test_format_can_be_disabled() {
    init_tracing();
    let mut settings = ExpandSettings::default();
    settings.format_after_expand = false;
    let mut host = SimTextHost::with_text("p");
    let mut cmd = ExpandCommand::new(MarkupClassifier::new().unwrap(), grammar())
        .unwrap()
        .with_reformatter(RecordingReformatter::new())
        .with_settings(settings);

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(cmd.reformatter().calls(), 0);
}

#[test]
fn test_engine_tab_stops_are_preferred() {
    init_tracing();
    // The engine marks the end of "Term"; a rescan would pick its start
    let expansion = Expansion::with_tab_stops(
        "<dl><dt>Term</dt></dl>",
        vec![TabStopCandidate::bracket(Span::at(12))],
    );
    let grammar = grammar().with_expansion("dl>dt", expansion);
    let mut host = SimTextHost::with_text("dl>dt");
    let mut cmd = ExpandCommand::new(MarkupClassifier::new().unwrap(), grammar).unwrap();

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.caret(), 12);
}

#[test]
fn test_engine_tab_stops_ignored_after_reformat() {
    init_tracing();
    let expansion = Expansion::with_tab_stops(
        "<dl><dt>Term</dt></dl>",
        vec![TabStopCandidate::bracket(Span::at(12))],
    );
    let grammar = grammar().with_expansion("dl>dt", expansion);
    let mut host = SimTextHost::with_text("dl>dt");
    let mut cmd = ExpandCommand::new(MarkupClassifier::new().unwrap(), grammar)
        .unwrap()
        .with_reformatter(TagPerLineReformatter);

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), "<dl>\n<dt>Term</dt>\n</dl>");
    // Rescanned: start of the <dt> content
    assert_eq!(host.caret(), 9);
}

#[test]
fn test_projection_veto() {
    init_tracing();
    let settings = ExpandSettings::default();
    let graph = StaticProjection::plain()
        .with_region(Span::new(0, 6), "html")
        .with_region(Span::new(5, 1), "JavaScript");
    let veto = ProjectionVeto::from_settings(graph, &settings);

    let mut host = SimTextHost::with_text("<div>p");
    let before = host.snapshot();
    let mut cmd = command().with_context(veto);

    assert_eq!(
        cmd.exec(Key::Tab, &mut host).unwrap(),
        ExpandOutcome::NotHandled(AbortReason::InvalidContext)
    );
    assert_eq!(host.snapshot(), before);
}

#[test]
fn test_projection_allows_listed_languages() {
    init_tracing();
    let settings = ExpandSettings::default();
    let graph = StaticProjection::plain()
        .with_region(Span::new(0, 6), "html")
        .with_region(Span::new(5, 1), "CSharp");
    let veto = ProjectionVeto::from_settings(graph, &settings);

    let mut host = SimTextHost::with_text("<div>p");
    let mut cmd = command().with_context(veto);

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), "<div><p></p>");
}

#[test]
fn test_settings_file_extends_allow_list() {
    init_tracing();
    let graph = || {
        StaticProjection::plain()
            .with_region(Span::new(0, 6), "html")
            .with_region(Span::new(5, 1), "JavaScript")
    };

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"version": 1, "allowed_content_types": ["html", "JavaScript"]}"#)
        .unwrap();
    let settings = ExpandSettings::load(file.path()).unwrap();

    // Default list vetoes the script region
    let mut host = SimTextHost::with_text("<div>p");
    let defaults = ExpandSettings::default();
    let mut cmd = command().with_context(ProjectionVeto::from_settings(graph(), &defaults));
    assert_eq!(
        cmd.exec(Key::Tab, &mut host).unwrap(),
        ExpandOutcome::NotHandled(AbortReason::InvalidContext)
    );

    // The loaded list allows it
    let veto = ProjectionVeto::from_settings(graph(), &settings);
    let mut cmd = command().with_settings(settings).with_context(veto);
    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), "<div><p></p>");
}

#[test]
fn test_back_tab_returns_to_earlier_expansion() {
    let mut host = SimTextHost::with_text("<p></p>\ndiv>p");
    let mut cmd = command();

    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.text(), "<p></p>\n<div><p></p></div>");
    assert_eq!(host.caret(), 16);

    assert_eq!(cmd.exec(Key::BackTab, &mut host).unwrap(), ExpandOutcome::Handled);
    assert_eq!(host.caret(), 3);
    // Navigation is not an edit
    assert_eq!(host.undo_depth(), 1);
}

#[test]
fn test_back_tab_has_no_fallback() {
    let mut host = SimTextHost::with_text("a[href]");
    let mut cmd = command();

    cmd.exec(Key::Tab, &mut host).unwrap();
    assert_eq!(host.caret(), 9);

    // Nothing starts before the caret: the caret stays put, unlike the
    // forward fallback to the end of the insertion
    assert_eq!(
        cmd.exec(Key::BackTab, &mut host).unwrap(),
        ExpandOutcome::NotHandled(AbortReason::NoTabStopFound)
    );
    assert_eq!(host.caret(), 9);
}

#[test]
fn test_other_keys_pass_through() {
    let mut host = SimTextHost::with_text("div>p");
    let before = host.snapshot();
    let mut cmd = command();

    for key in [Key::Enter, Key::Space, Key::Char('x'), Key::Escape] {
        assert_eq!(
            cmd.exec(key, &mut host).unwrap(),
            ExpandOutcome::NotHandled(AbortReason::UnhandledKey)
        );
    }
    assert_eq!(host.snapshot(), before);
}

#[test]
fn test_settings_file_drives_command() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"version": 1, "transaction_name": "ZenCoding", "dialect": "Css"}"#)
        .unwrap();
    let settings = ExpandSettings::load(file.path()).unwrap();
    assert_eq!(settings.dialect, Dialect::Css);

    let mut host = SimTextHost::with_text("p");
    let mut cmd = command().with_settings(settings);

    // The table only answers for HTML
    assert_eq!(
        cmd.exec(Key::Tab, &mut host).unwrap(),
        ExpandOutcome::NotHandled(AbortReason::ExpansionRejected)
    );

    let mut cmd = command().with_settings(ExpandSettings {
        dialect: Dialect::Html,
        ..ExpandSettings::load(file.path()).unwrap()
    });
    assert!(cmd.exec(Key::Tab, &mut host).unwrap().is_handled());
    assert_eq!(host.last_undo_name(), Some("ZenCoding"));
}
