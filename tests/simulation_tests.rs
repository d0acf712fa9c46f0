use keysim::{Direction, Document, Error, Harness, Modifier, NodeId, codes};

mod support;
use support::mock_editor::MockEditor;

/// An editable div holding one empty text node with a collapsed cursor.
fn editable_doc() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();
    let mut text_node = None;
    let root = doc.build(|t| {
        let text = t.text("");
        text_node = Some(text);
        t.el("div", &[("contenteditable", "true")], vec![text])
    });
    let text = text_node.unwrap();
    doc.move_cursor_to(text, 0).unwrap();
    (doc, root, text)
}

#[test]
fn insert_text_dispatches_per_character() {
    let (mut doc, root, text) = editable_doc();
    let mut editor = MockEditor::new(root);
    let mut harness = Harness::new();

    harness.insert_text(&mut doc, &mut editor, "ab").unwrap();

    assert_eq!(
        editor.event_names(),
        vec!["keydown", "input", "keyup", "keydown", "input", "keyup"]
    );
    assert_eq!(editor.events[0].key_code, 'A' as u32);
    assert_eq!(editor.events[3].key_code, 'B' as u32);
    assert_eq!(doc.text_content(text), Some("ab"));
}

#[test]
fn prevented_keydown_skips_that_character_only() {
    let (mut doc, root, text) = editable_doc();
    let mut editor = MockEditor::new(root);
    editor.prevent_keydown_codes.push('B' as u32);
    let mut harness = Harness::new();

    harness.insert_text(&mut doc, &mut editor, "abc").unwrap();

    assert_eq!(
        editor.event_names(),
        vec![
            "keydown", "input", "keyup", // a
            "keydown", // b, prevented
            "keydown", "input", "keyup", // c
        ]
    );
    assert_eq!(doc.text_content(text), Some("ac"));
}

#[test]
fn prevented_input_skips_the_keyup() {
    let (mut doc, root, text) = editable_doc();
    let mut editor = MockEditor::new(root);
    editor.prevent_types.push("input".to_string());
    let mut harness = Harness::new();

    harness.insert_text(&mut doc, &mut editor, "a").unwrap();

    // insertion already happened; only the keyup is short-circuited
    assert_eq!(editor.event_names(), vec!["keydown", "input"]);
    assert_eq!(doc.text_content(text), Some("a"));
}

#[test]
fn insert_text_keeps_grapheme_clusters_whole() {
    let (mut doc, root, text) = editable_doc();
    let mut editor = MockEditor::new(root);
    let mut harness = Harness::new();

    // e + combining acute is one simulated keystroke
    harness.insert_text(&mut doc, &mut editor, "e\u{301}x").unwrap();

    assert_eq!(editor.event_names().len(), 6);
    assert_eq!(doc.text_content(text), Some("e\u{301}x"));
}

#[test]
fn delete_and_enter_key_codes() {
    let (mut doc, root, _) = editable_doc();
    let mut editor = MockEditor::new(root);
    let mut harness = Harness::new();

    harness
        .trigger_delete(&mut doc, &mut editor, Direction::Backward)
        .unwrap();
    harness.trigger_forward_delete(&mut doc, &mut editor).unwrap();
    harness.trigger_enter(&mut doc, &mut editor).unwrap();

    let codes_seen: Vec<u32> = editor.events.iter().map(|e| e.key_code).collect();
    assert_eq!(codes_seen, vec![codes::BACKSPACE, codes::DELETE, codes::ENTER]);
    assert!(editor.event_names().iter().all(|n| *n == "keydown"));
}

#[test]
fn key_command_sets_the_requested_modifier() {
    let (mut doc, root, _) = editable_doc();
    let mut editor = MockEditor::new(root);
    let mut harness = Harness::new();

    harness
        .trigger_key_command(&mut doc, &mut editor, 'b', Modifier::Meta)
        .unwrap();
    harness
        .trigger_key_command(&mut doc, &mut editor, 'k', Modifier::Ctrl)
        .unwrap();

    let meta_b = &editor.events[0];
    assert_eq!(meta_b.key_code, 'B' as u32);
    assert!(meta_b.meta_key);
    assert!(!meta_b.ctrl_key);

    let ctrl_k = &editor.events[1];
    assert_eq!(ctrl_k.key_code, 'K' as u32);
    assert!(ctrl_k.ctrl_key);
    assert!(!ctrl_k.meta_key);
}

#[test]
fn arrow_keys_send_keydown_then_keyup() {
    let (mut doc, root, _) = editable_doc();
    let mut editor = MockEditor::new(root);
    let mut harness = Harness::new();

    harness
        .trigger_right_arrow_key(&mut doc, &mut editor, None)
        .unwrap();
    harness
        .trigger_left_arrow_key(&mut doc, &mut editor, Some(Modifier::Shift))
        .unwrap();

    assert_eq!(
        editor.event_names(),
        vec!["keydown", "keyup", "keydown", "keyup"]
    );
    assert_eq!(editor.events[0].key_code, codes::RIGHT);
    assert!(!editor.events[0].shift_key);
    assert_eq!(editor.events[2].key_code, codes::LEFT);
    assert!(editor.events[2].shift_key);
    assert!(editor.events[3].shift_key);
}

#[test]
fn trigger_event_reports_default_prevention() {
    let (mut doc, root, _) = editable_doc();
    let mut editor = MockEditor::new(root);
    let mut harness = Harness::new();

    assert!(harness
        .trigger_event(&mut doc, &mut editor, root, "focus")
        .unwrap());

    editor.prevent_types.push("submit".to_string());
    assert!(!harness
        .trigger_event(&mut doc, &mut editor, root, "submit")
        .unwrap());
}

#[test]
fn trigger_event_rejects_stale_nodes() {
    let (mut doc, root, _) = editable_doc();
    let mut editor = MockEditor::new(root);
    let mut harness = Harness::new();

    let mut other = Document::new();
    let _ = other.create_text("pad");
    let _ = other.create_text("pad");
    let stale = other.create_text("stale");

    let err = harness
        .trigger_event(&mut doc, &mut editor, stale, "focus")
        .unwrap_err();
    assert_eq!(err, Error::MissingNode);
}
