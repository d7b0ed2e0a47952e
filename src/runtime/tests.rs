//! Tests for the runtime module

use super::*;
use crate::types::dialog::DisplayMode;
use crate::types::instruction::Instruction;
use crate::types::screenplay::{EventBlock, ScreenplayData};
use std::cell::RefCell;
use std::rc::Rc;

fn dialog(line: &str) -> Instruction {
    Instruction::new("PlayDialog", vec![0, 1], vec![line.to_string()])
}

fn decision(labels: &[&str]) -> Instruction {
    Instruction::new(
        "ShowDecision",
        vec![],
        labels.iter().map(|l| l.to_string()).collect(),
    )
}

fn op(tag: &str) -> Instruction {
    Instruction::new(tag, vec![], vec![])
}

fn interpreter(events: Vec<EventBlock>, pool: &[&str]) -> Interpreter {
    let data = ScreenplayData {
        events,
        text_pool: pool.iter().map(|s| s.to_string()).collect(),
    };
    let screenplay = Screenplay::from_data(data).unwrap();
    Interpreter::new(screenplay, SpeakerRoster::new(["守", "美咲"]))
}

fn recorded(interpreter: &mut Interpreter) -> Rc<RefCell<Recorder>> {
    let recorder = Rc::new(RefCell::new(Recorder::new()));
    interpreter.subscribe(Rc::clone(&recorder));
    recorder
}

#[test]
fn dialog_at_block_end_transfers_and_yields_speaker() {
    let mut interp = interpreter(
        vec![
            EventBlock::new(1, vec![op("PlayBgm"), dialog("守「やあ」")], vec![7]),
            EventBlock::new(7, vec![dialog("美咲「うん」")], vec![]),
        ],
        &[],
    );

    let suspension = interp.advance_until_suspension(None).unwrap();
    assert_eq!(suspension.speaker(), "守");
    assert_eq!(interp.context().current_block_index(), 1);
    assert_eq!(interp.context().current_instruction_index(), 0);

    let Suspension::Line(line) = suspension else {
        panic!("expected a dialog line");
    };
    assert_eq!(line.content(), "やあ");
    assert_eq!(line.mode(), DisplayMode::Display);
    assert_eq!(line.block_index, 1);
    assert_eq!(line.line_number, Some(1));
}

#[test]
fn decision_routes_down_chosen_edge() {
    let mut interp = interpreter(
        vec![
            EventBlock::new(1, vec![decision(&["A", "B", "C"])], vec![10, 20, 30]),
            EventBlock::new(10, vec![dialog("a")], vec![]),
            EventBlock::new(20, vec![dialog("b")], vec![]),
            EventBlock::new(30, vec![dialog("c")], vec![]),
        ],
        &[],
    );

    let suspension = interp.advance_until_suspension(None).unwrap();
    assert_eq!(
        suspension,
        Suspension::Decision {
            labels: vec!["A".into(), "B".into(), "C".into()]
        }
    );
    // Cursor stays on the decision
    assert_eq!(interp.context().cursor(), Cursor::new(0, 0));

    let next = interp.apply_decision(2).unwrap();
    let Suspension::Line(line) = next else {
        panic!("expected a dialog line");
    };
    assert_eq!(line.content(), "c");
    assert_eq!(interp.context().current_block().unwrap().id, 30);
}

#[test]
fn decision_labels_skip_empty_entries() {
    let mut interp = interpreter(
        vec![EventBlock::new(1, vec![decision(&["$0", "", "$1", ""])], vec![1, 1])],
        &["進む", "戻る"],
    );
    let suspension = interp.advance_until_suspension(None).unwrap();
    assert_eq!(
        suspension,
        Suspension::Decision {
            labels: vec!["進む".into(), "戻る".into()]
        }
    );
    assert_eq!(interp.pending_decision().map(<[String]>::len), Some(2));
}

#[test]
fn reset_is_emitted_once_after_decision() {
    let mut interp = interpreter(
        vec![
            EventBlock::new(1, vec![decision(&["A", "B"])], vec![2, 2]),
            EventBlock::new(2, vec![op("PlaySe"), dialog("x")], vec![]),
        ],
        &[],
    );
    let recorder = recorded(&mut interp);

    interp.advance_until_suspension(None).unwrap();
    recorder.borrow_mut().clear();
    interp.apply_decision(1).unwrap();

    assert_eq!(
        recorder.borrow().names(),
        vec!["ResetLineCounter", "PlaySe", "PlayDialog", "PlayDialogInternal"]
    );
}

#[test]
fn notifications_follow_program_order() {
    let mut interp = interpreter(
        vec![EventBlock::new(
            1,
            vec![op("SetBgImg"), op("PlayBgm"), dialog("守「a」")],
            vec![],
        )],
        &[],
    );
    let recorder = recorded(&mut interp);

    interp.advance_until_suspension(None).unwrap();
    assert_eq!(
        recorder.borrow().names(),
        vec!["SetBgImg", "PlayBgm", "PlayDialog", "PlayDialogInternal"]
    );
}

#[test]
fn string_tokens_are_resolved_before_notification() {
    let mut interp = interpreter(
        vec![EventBlock::new(1, vec![dialog("$1")], vec![])],
        &["unused", "守「こんにちは」"],
    );
    let recorder = recorded(&mut interp);

    let suspension = interp.advance_until_suspension(None).unwrap();
    assert_eq!(suspension.speaker(), "守");

    let recorder = recorder.borrow();
    let Notification::Instruction(resolved) = &recorder.notifications[0] else {
        panic!("expected an instruction notification");
    };
    assert_eq!(resolved.string_params, vec!["守「こんにちは」"]);
}

#[test]
fn terminal_block_ends_screenplay() {
    let mut interp = interpreter(
        vec![EventBlock::new(1, vec![dialog("終"), op("StopBgm")], vec![])],
        &[],
    );

    assert!(matches!(
        interp.advance_until_suspension(None),
        Ok(Suspension::Line(_))
    ));
    assert_eq!(interp.advance_until_suspension(None), Ok(Suspension::End));
    assert!(interp.is_finished());
    assert_eq!(
        interp.advance_until_suspension(None),
        Err(EngineError::Finished)
    );
}

#[test]
fn dialog_as_final_instruction_ends_on_next_advance() {
    let mut interp = interpreter(vec![EventBlock::new(1, vec![dialog("終")], vec![])], &[]);

    assert!(matches!(
        interp.advance_until_suspension(None),
        Ok(Suspension::Line(_))
    ));
    assert_eq!(interp.advance_until_suspension(None), Ok(Suspension::End));
}

#[test]
fn choice_without_pending_decision_is_rejected() {
    let mut interp = interpreter(vec![EventBlock::new(1, vec![dialog("a")], vec![])], &[]);
    assert_eq!(interp.apply_decision(0), Err(EngineError::NoPendingDecision));
}

#[test]
fn out_of_range_choice_keeps_decision_pending() {
    let mut interp = interpreter(
        vec![
            EventBlock::new(1, vec![decision(&["A", "B"])], vec![2, 2]),
            EventBlock::new(2, vec![dialog("a")], vec![]),
        ],
        &[],
    );
    interp.advance_until_suspension(None).unwrap();

    assert_eq!(
        interp.apply_decision(5),
        Err(EngineError::EdgeOutOfRange {
            block_id: 1,
            edge: 5,
            available: 2
        })
    );
    assert!(interp.pending_decision().is_some());
    assert!(interp.apply_decision(1).is_ok());
}

#[test]
fn cycle_without_suspension_is_runaway() {
    let mut interp = interpreter(vec![EventBlock::new(1, vec![op("PlaySe")], vec![1])], &[])
        .with_max_steps(50);
    assert_eq!(
        interp.advance_until_suspension(None),
        Err(EngineError::RunawayExecution { steps: 50 })
    );
}

#[test]
fn last_executed_instruction_is_pre_advance() {
    let mut interp = interpreter(
        vec![
            EventBlock::new(1, vec![dialog("$0")], vec![2]),
            EventBlock::new(2, vec![dialog("b")], vec![]),
        ],
        &["守「もう一度」"],
    );
    assert!(interp.resolve_last_executed_instruction().is_none());

    interp.advance_until_suspension(None).unwrap();
    let last = interp.resolve_last_executed_instruction().unwrap();
    assert_eq!(last.type_tag, "PlayDialog");
    assert_eq!(last.text(), Some("守「もう一度」"));
    // The cursor has already moved on to block 2
    assert_eq!(interp.context().current_block_index(), 1);
}

#[test]
fn restore_cursor_clears_pending_decision() {
    let mut interp = interpreter(
        vec![
            EventBlock::new(1, vec![decision(&["A"])], vec![2]),
            EventBlock::new(2, vec![dialog("b")], vec![]),
        ],
        &[],
    );
    interp.advance_until_suspension(None).unwrap();
    interp.restore_cursor(Cursor::new(1, 0)).unwrap();

    assert!(interp.pending_decision().is_none());
    assert!(matches!(
        interp.advance_until_suspension(None),
        Ok(Suspension::Line(_))
    ));
}
