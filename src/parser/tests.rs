//! Tests for the parser module

use super::*;
use crate::types::script::Guard;

/// Follow first successors from the root, skipping the root itself
fn main_path(script: &Script) -> Vec<&Node> {
    let mut path = Vec::new();
    let mut current = script.root();
    while let Some(&next) = script.successors(current).first() {
        path.push(script.node(next));
        current = next;
    }
    path
}

fn say(speaker: &str, content: &str) -> Node {
    Node::Say {
        speaker: speaker.to_string(),
        content: content.to_string(),
    }
}

fn first_choice(script: &Script) -> NodeId {
    script
        .reachable()
        .into_iter()
        .find(|&id| matches!(script.node(id), Node::Choice { .. }))
        .expect("script has a choice node")
}

#[test]
fn linear_script_compiles_to_chain() {
    let script = compile(&["<scene>Forest", "<A>Hello", "<END>"]).unwrap();

    assert_eq!(
        main_path(&script),
        vec![
            &Node::Scene {
                content: "Forest".to_string()
            },
            &say("A", "Hello"),
            &Node::End,
        ]
    );
}

#[test]
fn two_tags_make_a_thought() {
    let script = compile(&["<Mia><aside>Not again."]).unwrap();
    assert_eq!(
        main_path(&script),
        vec![&Node::Think {
            speaker: "Mia".to_string(),
            content: "Not again.".to_string()
        }]
    );
}

#[test]
fn script_without_end_stops_after_last_line() {
    let script = compile(&["<A>One", "<A>Two"]).unwrap();
    assert_eq!(main_path(&script), vec![&say("A", "One"), &say("A", "Two")]);
}

#[test]
fn option_block_collects_labels() {
    let script = compile(&[
        "<option>pick",
        "<go_left>Go left",
        "<go_right>",
        "</>",
        "<A>Done",
    ])
    .unwrap();

    assert_eq!(
        main_path(&script),
        vec![
            &Node::Option {
                name: "pick".to_string(),
                choices: vec!["Go left".to_string(), "go_right".to_string()],
            },
            &say("A", "Done"),
        ]
    );
}

#[test]
fn choices_block_keeps_one_child_per_branch() {
    let script = compile_str(
        r#"
<option>pick
<go_left>Left
<go_right>Right
</>
<choices>
<pick,1>
<A>You went left.
<END>
<pick,2>
<A>You went right.
<END>
</>
"#,
    )
    .unwrap();

    let choice = first_choice(&script);
    assert_eq!(
        script.node(choice),
        &Node::Choice {
            guards: vec![Guard::new("pick", 1), Guard::new("pick", 2)]
        }
    );
    let branches = script.successors(choice);
    assert_eq!(branches.len(), 2);
    assert_eq!(script.node(branches[0]), &say("A", "You went left."));
    assert_eq!(script.node(branches[1]), &say("A", "You went right."));
    assert_eq!(script.line(choice), 6);
}

#[test]
fn label_pair_form_is_accepted() {
    let script = compile(&[
        "<option>pick",
        "<a>A",
        "<b>B",
        "</>",
        "<choices>",
        "<pick><1>",
        "<A>First",
        "<END>",
        "<pick><2>",
        "<A>Second",
        "<END>",
        "</>",
    ])
    .unwrap();

    let choice = first_choice(&script);
    assert_eq!(script.successors(choice).len(), 2);
}

#[test]
fn dead_branches_reconverge_after_block() {
    let script = compile_str(
        r#"
<option>mood
<a>Happy
<b>Sad
</>
<choices>
<mood,1>
<A>Glad to hear.
<//>
<mood,2>
<//>
</>
<A>Anyway...
"#,
    )
    .unwrap();

    let choice = first_choice(&script);
    let branches = script.successors(choice).to_vec();
    assert_eq!(branches.len(), 2);
    assert_eq!(script.node(branches[0]), &say("A", "Glad to hear."));
    assert_eq!(script.node(branches[1]), &say("A", "Anyway..."));
    assert_eq!(script.successors(branches[0]), &[branches[1]]);
    assert!(!fixup::has_placeholders(&script));
}

#[test]
fn branch_without_terminator_falls_through() {
    let script = compile_str(
        r#"
<option>pick
<a>A
<b>B
</>
<choices>
<pick,1>
<A>First
<pick,2>
<A>Second
</>
<A>Together
"#,
    )
    .unwrap();

    let choice = first_choice(&script);
    let branches = script.successors(choice).to_vec();
    let together = say("A", "Together");
    for branch in branches {
        let next = script.successors(branch)[0];
        assert_eq!(script.node(next), &together);
    }
}

#[test]
fn trailing_loose_ends_meet_a_synthesized_end() {
    let script = compile_str(
        r#"
<option>pick
<a>A
<b>B
</>
<choices>
<pick,1>
<//>
<pick,2>
<A>Second
<//>
</>
"#,
    )
    .unwrap();

    let choice = first_choice(&script);
    let branches = script.successors(choice).to_vec();
    assert_eq!(branches.len(), 2);
    assert_eq!(script.node(branches[0]), &Node::End);
    assert_eq!(script.successors(branches[1]), &[branches[0]]);
}

#[test]
fn top_level_comment_ends_dialogue() {
    let script = compile(&["<A>Hi", "<//>"]).unwrap();
    assert_eq!(main_path(&script), vec![&say("A", "Hi"), &Node::End]);
}

#[test]
fn lines_after_top_level_end_are_ignored() {
    let script = compile(&["<A>Hi", "<END>", "<A>Never"]).unwrap();
    assert_eq!(main_path(&script), vec![&say("A", "Hi"), &Node::End]);
}

#[test]
fn nested_blocks_reconverge_inside_out() {
    let script = compile_str(
        r#"
<option>first
<x>X
<y>Y
</>
<choices>
<first,1>
<option>second
<p>P
<q>Q
</>
<choices>
<second,1>
<A>one-one
<//>
<second,2>
<A>one-two
<//>
</>
<A>inner done
<//>
<first,2>
<A>two
<//>
</>
<A>outer done
"#,
    )
    .unwrap();

    let outer = first_choice(&script);
    let outer_branches = script.successors(outer).to_vec();
    assert_eq!(outer_branches.len(), 2);

    let second = outer_branches[0];
    assert!(matches!(script.node(second), Node::Option { name, .. } if name == "second"));
    let inner = script.successors(second)[0];
    let inner_branches = script.successors(inner).to_vec();
    assert_eq!(inner_branches.len(), 2);

    let inner_done = say("A", "inner done");
    let outer_done = say("A", "outer done");
    for branch in &inner_branches {
        let next = script.successors(*branch)[0];
        assert_eq!(script.node(next), &inner_done);
        let after = script.successors(next)[0];
        assert_eq!(script.node(after), &outer_done);
    }
    let two = outer_branches[1];
    assert_eq!(script.node(two), &say("A", "two"));
    assert_eq!(script.node(script.successors(two)[0]), &outer_done);
}

#[test]
fn nested_label_with_outer_option_name_is_not_an_outer_branch() {
    let script = compile_str(
        r#"
<option>pick
<a>A
<b>B
</>
<choices>
<pick,1>
<choices>
<pick,1>
<A>inner one
<//>
<pick,2>
<A>inner two
<//>
</>
<//>
<pick,2>
<A>outer two
<//>
</>
<A>after
"#,
    )
    .unwrap();

    let outer = first_choice(&script);
    assert_eq!(
        script.node(outer),
        &Node::Choice {
            guards: vec![Guard::new("pick", 1), Guard::new("pick", 2)]
        }
    );
    let branches = script.successors(outer);
    assert!(matches!(script.node(branches[0]), Node::Choice { guards } if guards.len() == 2));
    assert_eq!(script.node(branches[1]), &say("A", "outer two"));
}

#[test]
fn labels_may_reference_options_declared_later() {
    let script = compile_str(
        r#"
<choices>
<later,1>
<A>Matched
<//>
<later,2>
<A>Fallback
<//>
</>
<option>later
<a>A
<b>B
</>
"#,
    )
    .unwrap();

    let choice = first_choice(&script);
    assert_eq!(script.successors(choice).len(), 2);
}

#[test]
fn two_tags_before_the_option_is_defined_stay_a_thought() {
    let script = compile_str(
        "<Hero><worried>Should I ask?\n<option>Hero\n<yes>Yes\n<no>No\n</>\n<END>",
    )
    .unwrap();

    assert_eq!(
        main_path(&script),
        vec![
            &Node::Think {
                speaker: "Hero".to_string(),
                content: "Should I ask?".to_string()
            },
            &Node::Option {
                name: "Hero".to_string(),
                choices: vec!["Yes".to_string(), "No".to_string()]
            },
            &Node::End,
        ]
    );
}

#[test]
fn two_tags_after_the_option_is_defined_are_skipped() {
    let script = compile_str("<option>pick\n<a>A\n</>\n<pick><angry>inline text\n<A>after\n<END>")
        .unwrap();

    assert_eq!(
        main_path(&script),
        vec![
            &Node::Option {
                name: "pick".to_string(),
                choices: vec!["A".to_string()]
            },
            &say("A", "after"),
            &Node::End,
        ]
    );
}

#[test]
fn malformed_first_branch_label_is_rejected() {
    let err = compile(&["<option>pick", "<a>A", "</>", "<choices>", "<pick><first>", "<END>", "</>"])
        .unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidThreshold {
            line: 5,
            option: "pick".to_string(),
            value: "first".to_string()
        }
    );
}

#[test]
fn unreachable_content_is_still_compiled() {
    let script = compile_str(
        r#"
<option>pick
<a>A
</>
<choices>
<pick,1>
<END>
</>
<A>Nobody hears this
"#,
    )
    .unwrap();

    let reachable = script.reachable();
    let orphan = script
        .ids()
        .find(|&id| script.node(id) == &say("A", "Nobody hears this"))
        .unwrap();
    assert!(!reachable.contains(&orphan));
}

#[test]
fn empty_input_is_rejected() {
    let empty: [&str; 0] = [];
    assert_eq!(compile(&empty).unwrap_err(), ParseError::Empty);
    assert_eq!(compile_str("\n   \n").unwrap_err(), ParseError::Empty);
}

#[test]
fn unterminated_option_reports_opening_line() {
    let err = compile_str("<A>Hi\n\n<option>pick\n<a>A\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedOption {
            name: "pick".to_string(),
            line: 3
        }
    );
}

#[test]
fn option_without_choices_is_rejected() {
    let err = compile(&["<option>pick", "</>"]).unwrap_err();
    assert!(matches!(err, ParseError::EmptyOption { line: 1, .. }));
}

#[test]
fn unterminated_choices_is_rejected() {
    let err = compile(&["<option>pick", "<a>A", "</>", "<choices>", "<pick,1>", "<A>Hi"])
        .unwrap_err();
    assert_eq!(err, ParseError::UnterminatedChoices { line: 4 });
}

#[test]
fn choices_without_label_is_rejected() {
    let err = compile(&["<choices>", "<A>Hi", "</>"]).unwrap_err();
    assert!(matches!(err, ParseError::ExpectedBranch { line: 2, .. }));
}

#[test]
fn error_messages_name_the_line() {
    let err = compile_str("<A>Hi\nplain text").unwrap_err();
    assert_eq!(err.to_string(), "line 2 has no tag: plain text");
}

#[test]
fn compiling_twice_gives_equal_scripts() {
    let source = "<scene>Hall\n<option>pick\n<a>A\n<b>B\n</>\n<choices>\n<pick,1>\n<A>a\n<//>\n<pick,2>\n<//>\n</>\n<A>end";
    assert_eq!(compile_str(source).unwrap(), compile_str(source).unwrap());
}
