//! End-to-end ordered-editing flows through the public library surface:
//! hydrate a working copy, mutate and reorder it, validate, and check the
//! exact payload shape a save would carry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use gestelit::api::AssignmentDiff;
use gestelit::i18n::Lang;
use gestelit::ordered::{move_to_key, renumber, Direction, OrderedStore, Sequenced};
use gestelit::session::{EditPhase, EditSession};
use gestelit::types::{ChecklistItem, ChecklistSide, PresetStep};
use gestelit::ui::dialogs::{ChecklistEditor, ChecklistOutcome};
use gestelit::validate;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

fn items(labels: &[(&str, &str, &str)]) -> Vec<ChecklistItem> {
    labels
        .iter()
        .enumerate()
        .map(|(idx, (key, he, ru))| ChecklistItem::new(key, he, ru, idx))
        .collect()
}

#[test]
fn test_positions_contiguous_after_any_mutation_sequence() {
    let mut store: OrderedStore<ChecklistItem> = OrderedStore::new();
    store.hydrate(items(&[
        ("a", "בדיקת שמן", "Проверка масла"),
        ("b", "בדיקת להב", "Проверка ножа"),
        ("c", "ניקוי", "Уборка"),
    ]));

    store.push(ChecklistItem::new("d", "כיול", "Калибровка", 99));
    store.move_to("d", "a");
    let _ = store.remove("b");
    store.move_step(2, Direction::Up);

    let positions: Vec<usize> = store.items().iter().map(Sequenced::position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn test_move_to_target_slot_shifts_rest_down() {
    // Moving the last item onto the first slot: [A,B,C] -> [C,A,B]
    let mut steps = vec![
        PresetStep {
            station_id: "A".to_string(),
            station_name: "A".to_string(),
            position: 0,
        },
        PresetStep {
            station_id: "B".to_string(),
            station_name: "B".to_string(),
            position: 1,
        },
        PresetStep {
            station_id: "C".to_string(),
            station_name: "C".to_string(),
            position: 2,
        },
    ];
    move_to_key(&mut steps, "C", "A");

    let order: Vec<&str> = steps.iter().map(|s| s.station_id.as_str()).collect();
    assert_eq!(order, vec!["C", "A", "B"]);
    assert_eq!(steps[0].position, 0);
    assert_eq!(steps[2].position, 2);
}

#[test]
fn test_unknown_keys_and_edges_are_no_ops() {
    let mut list = items(&[("a", "x", "y"), ("b", "p", "q")]);
    let before = list.clone();

    move_to_key(&mut list, "a", "a");
    move_to_key(&mut list, "missing", "a");
    move_to_key(&mut list, "a", "missing");
    assert_eq!(list, before);

    let mut store: OrderedStore<ChecklistItem> = OrderedStore::new();
    store.hydrate(list);
    store.move_step(0, Direction::Up);
    store.move_step(1, Direction::Down);
    store.move_step(7, Direction::Up);
    assert_eq!(store.keys_in_order(), vec!["a", "b"]);
}

#[test]
fn test_renumber_is_idempotent() {
    let mut list = items(&[("a", "x", "y"), ("b", "p", "q"), ("c", "m", "n")]);
    list[0].position = 5;
    list[2].position = 5;

    renumber(&mut list);
    let first: Vec<usize> = list.iter().map(Sequenced::position).collect();
    renumber(&mut list);
    let second: Vec<usize> = list.iter().map(Sequenced::position).collect();

    assert_eq!(first, vec![0, 1, 2]);
    assert_eq!(first, second);
}

#[test]
fn test_validation_failure_leaves_sequence_untouched() {
    let start = items(&[("a", "בדיקה", "")]);
    let end = items(&[("b", "ניקוי", "Уборка")]);
    let before = start.clone();

    let err = validate::validate_checklists(&start, &end).unwrap_err();
    assert_eq!(err.focus_side(), Some(ChecklistSide::Start));
    assert_eq!(start, before);
}

#[test]
fn test_save_cycle_keeps_working_copy_on_failure() {
    let mut session = EditSession::new();
    session.begin_loading();
    session.loaded();
    assert!(session.begin_saving());

    session.save_failed("duplicate");
    assert_eq!(session.phase(), EditPhase::Editing);

    // A second submit is accepted after the failure
    assert!(session.begin_saving());
    session.save_succeeded("ok");
    assert_eq!(session.phase(), EditPhase::Idle);
}

#[test]
fn test_checklist_editor_full_edit_reorder_save_flow() {
    let mut editor = ChecklistEditor::new(Lang::He);
    editor.open("s1", "CNC-1");
    editor.hydrate(
        items(&[
            ("a", "בדיקת שמן", "Проверка масла"),
            ("b", "בדיקת להב", "Проверка ножа"),
        ]),
        items(&[("c", "ניקוי", "Уборка")]),
    );

    // Add a row, type both labels, move it to the top
    editor.handle_key(ctrl(KeyCode::Char('a')));
    for c in "כיול".chars() {
        editor.handle_key(key(KeyCode::Char(c)));
    }
    editor.handle_key(key(KeyCode::Tab));
    for c in "Калибровка".chars() {
        editor.handle_key(key(KeyCode::Char(c)));
    }
    editor.handle_key(ctrl(KeyCode::Up));
    editor.handle_key(ctrl(KeyCode::Up));

    match editor.handle_key(key(KeyCode::Enter)) {
        Some(ChecklistOutcome::Save {
            station_id,
            start,
            end,
        }) => {
            assert_eq!(station_id, "s1");
            assert_eq!(start.len(), 3);
            assert_eq!(start[0].label_he, "כיול");
            assert_eq!(start[0].label_ru, "Калибровка");
            let positions: Vec<usize> = start.iter().map(|i| i.position).collect();
            assert_eq!(positions, vec![0, 1, 2]);
            assert_eq!(end.len(), 1);
        }
        other => panic!("expected save outcome, got {other:?}"),
    }
}

#[test]
fn test_assignment_diff_against_server_state() {
    let current = vec!["s1".to_string(), "s2".to_string()];
    let desired = vec!["s2".to_string(), "s3".to_string(), "s4".to_string()];

    let diff = AssignmentDiff::compute(&current, &desired);
    assert_eq!(diff.to_add, vec!["s3".to_string(), "s4".to_string()]);
    assert_eq!(diff.to_remove, vec!["s1".to_string()]);

    // Applying the diff conceptually yields the desired set
    let mut result: Vec<String> = current
        .into_iter()
        .filter(|id| !diff.to_remove.contains(id))
        .chain(diff.to_add.iter().cloned())
        .collect();
    result.sort();
    assert_eq!(result, desired);
}
