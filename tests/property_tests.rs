use proptest::prelude::*;

use keysim::{
    Direction, Document, KeyClassifier, KeyInput, Modifier, Modifiers, codes,
};

fn code_strategy() -> impl Strategy<Value = u32> {
    // legacy keycode space plus some slack past it
    0u32..=300
}

fn mods_strategy() -> impl Strategy<Value = Modifiers> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(meta, ctrl, shift)| {
        let mut mods = Modifiers::empty();
        if meta {
            mods |= Modifiers::META;
        }
        if ctrl {
            mods |= Modifiers::CTRL;
        }
        if shift {
            mods |= Modifiers::SHIFT;
        }
        mods
    })
}

proptest! {
    #[test]
    fn ctrl_or_meta_suppresses_printable_for_any_code(
        code in code_strategy(),
        use_ctrl in any::<bool>(),
    ) {
        let mods = if use_ctrl { Modifiers::CTRL } else { Modifiers::META };
        let k = KeyClassifier::new(KeyInput::new(code, mods));
        prop_assert!(!k.is_printable());
    }

    #[test]
    fn modifier_queries_mirror_input_flags(code in code_strategy(), mods in mods_strategy()) {
        let k = KeyClassifier::new(KeyInput::new(code, mods));
        prop_assert_eq!(k.has_modifier(Modifier::Meta), mods.contains(Modifiers::META));
        prop_assert_eq!(k.has_modifier(Modifier::Ctrl), mods.contains(Modifiers::CTRL));
        prop_assert_eq!(k.has_modifier(Modifier::Shift), mods.contains(Modifiers::SHIFT));
        prop_assert_eq!(k.has_any_modifier(), !mods.is_empty());
    }

    #[test]
    fn is_char_matches_uppercased_code_point(ch in prop::char::range('a', 'z')) {
        let upper = ch.to_ascii_uppercase() as u32;
        let k = KeyClassifier::new(KeyInput::new(upper, Modifiers::empty()));
        prop_assert!(k.is_char(ch));
        prop_assert!(k.is_char(ch.to_ascii_uppercase()));

        let other = KeyClassifier::new(KeyInput::new(upper + 1, Modifiers::empty()));
        prop_assert!(!other.is_char(ch));
    }

    #[test]
    fn direction_exists_only_for_deletes_and_horizontal_arrows(code in code_strategy()) {
        let k = KeyClassifier::new(KeyInput::new(code, Modifiers::empty()));
        let expected = match code {
            codes::BACKSPACE | codes::LEFT => Some(Direction::Backward),
            codes::DELETE | codes::RIGHT => Some(Direction::Forward),
            _ => None,
        };
        prop_assert_eq!(k.direction(), expected);
        prop_assert_eq!(k.direction().is_some(), k.is_delete() || k.is_horizontal_arrow());
    }

    #[test]
    fn walk_until_finds_the_unique_matching_text((n, i) in (1usize..8).prop_flat_map(|n| (Just(n), 0..n))) {
        let mut doc = Document::new();
        let root = doc.build(|t| {
            let children: Vec<_> = (0..n).map(|j| t.text(&format!("t{j}"))).collect();
            t.el("div", &[], children)
        });

        let needle = format!("t{i}");
        let hit = doc
            .walk_until(root, |d, id| d.text_content(id) == Some(needle.as_str()))
            .unwrap();
        prop_assert!(hit.is_some());
        prop_assert_eq!(doc.text_content(hit.unwrap()), Some(needle.as_str()));

        let miss = doc
            .walk_until(root, |d, id| d.text_content(id) == Some("absent"))
            .unwrap();
        prop_assert_eq!(miss, None);
    }

    #[test]
    fn select_text_stringifies_to_the_needle(
        prefix in "[a-z ]{0,12}",
        needle in "[a-z]{1,6}",
        suffix in "[a-z ]{0,12}",
    ) {
        let mut doc = Document::new();
        let content = format!("{prefix}{needle}{suffix}");
        let root = doc.build(|t| {
            let text = t.text(&content);
            t.el("p", &[], vec![text])
        });

        doc.select_text(&needle, root).unwrap();
        prop_assert_eq!(doc.selected_text().unwrap(), Some(needle));
    }
}
