use std::cell::RefCell;
use std::rc::Rc;

use egui::{Color32, Pos2};
use slide_editor::command::{Command, CommandError, UndoManager};
use slide_editor::document::Deck;
use slide_editor::element::{Element, ElementProperty, ElementType, factory};
use slide_editor::event::{EditorEvent, HistoryEvent};
use slide_editor::geometry::rect_xywh;
use slide_editor::id_generator::ElementId;
use slide_editor::layout::PageLayout;

fn deck_with(elements: Vec<ElementType>) -> Deck {
    let mut deck = Deck::default();
    for element in elements {
        deck.current_page_mut().add_element(element);
    }
    deck
}

fn ids(deck: &Deck) -> Vec<ElementId> {
    deck.current_page().elements().iter().map(|e| e.id()).collect()
}

#[test]
fn two_adds_two_undos_and_a_redo_leave_the_first_element() {
    let mut deck = Deck::default();
    let mut history = UndoManager::new();
    let page = deck.current_page().id();
    let first = factory::create_rectangle(0.0, 0.0, 10.0, 10.0);
    let second = factory::create_oval(20.0, 0.0, 10.0, 10.0);
    let first_id = first.id();

    history.execute(Command::add_element(page, first), &mut deck).unwrap();
    history.execute(Command::add_element(page, second), &mut deck).unwrap();
    history.undo(&mut deck).unwrap();
    history.undo(&mut deck).unwrap();
    assert!(deck.current_page().is_empty());
    history.redo(&mut deck).unwrap();

    assert_eq!(ids(&deck), vec![first_id]);
    assert_eq!((history.undo_len(), history.redo_len()), (1, 1));
}

#[test]
fn a_new_command_clears_redo() {
    let mut deck = Deck::default();
    let mut history = UndoManager::new();
    let page = deck.current_page().id();

    history
        .execute(Command::add_element(page, factory::create_rectangle(0.0, 0.0, 1.0, 1.0)), &mut deck)
        .unwrap();
    history.undo(&mut deck).unwrap();
    assert!(history.can_redo());
    history
        .execute(Command::add_element(page, factory::create_rectangle(0.0, 0.0, 1.0, 1.0)), &mut deck)
        .unwrap();
    assert!(!history.can_redo());
}

#[test]
fn undo_and_redo_on_empty_stacks_do_nothing() {
    let mut deck = Deck::default();
    let mut history = UndoManager::new();
    assert!(history.undo(&mut deck).is_ok());
    assert!(history.redo(&mut deck).is_ok());
    assert!(!history.can_undo());
}

#[test]
fn z_order_commands_restore_the_original_index() {
    let elements: Vec<ElementType> = (0..4)
        .map(|i| factory::create_rectangle(i as f32 * 10.0, 0.0, 10.0, 10.0))
        .collect();
    let mut deck = deck_with(elements);
    let original = ids(&deck);
    let mut history = UndoManager::new();

    let front = Command::bring_to_front(deck.current_page(), original[1]).unwrap();
    history.execute(front, &mut deck).unwrap();
    assert_eq!(ids(&deck), vec![original[0], original[2], original[3], original[1]]);
    history.undo(&mut deck).unwrap();
    assert_eq!(ids(&deck), original);

    let back = Command::send_to_back(deck.current_page(), original[2]).unwrap();
    history.execute(back, &mut deck).unwrap();
    assert_eq!(ids(&deck)[0], original[2]);
    history.undo(&mut deck).unwrap();
    assert_eq!(ids(&deck), original);
}

#[test]
fn removed_element_returns_to_its_slot() {
    let elements: Vec<ElementType> = (0..3)
        .map(|i| factory::create_rectangle(i as f32 * 10.0, 0.0, 10.0, 10.0))
        .collect();
    let mut deck = deck_with(elements);
    let original = ids(&deck);
    let mut history = UndoManager::new();

    let remove = Command::remove_element(deck.current_page(), original[1]).unwrap();
    history.execute(remove.clone(), &mut deck).unwrap();
    assert_eq!(ids(&deck), vec![original[0], original[2]]);
    history.undo(&mut deck).unwrap();
    assert_eq!(ids(&deck), original);

    // A second undo must not duplicate it
    remove.undo(&mut deck).unwrap();
    assert_eq!(ids(&deck), original);
}

#[test]
fn re_executing_a_command_is_harmless() {
    let rect = factory::create_rectangle(10.0, 10.0, 100.0, 50.0);
    let id = rect.id();
    let mut deck = deck_with(vec![rect]);
    let page = deck.current_page().id();
    let command = Command::ChangeBounds {
        page,
        element: id,
        before: rect_xywh(10.0, 10.0, 100.0, 50.0),
        after: rect_xywh(10.0, 10.0, 120.0, 60.0),
    };

    command.execute(&mut deck).unwrap();
    command.execute(&mut deck).unwrap();
    assert_eq!(
        deck.current_page().get_element(id).unwrap().bounds(),
        rect_xywh(10.0, 10.0, 120.0, 60.0)
    );

    let add = Command::add_element(page, factory::create_oval(0.0, 0.0, 5.0, 5.0));
    add.execute(&mut deck).unwrap();
    add.execute(&mut deck).unwrap();
    assert_eq!(deck.current_page().len(), 2);
}

#[test]
fn property_change_reads_the_before_value_from_the_scene() {
    let text = factory::create_text(0.0, 0.0, 100.0, 40.0, "old");
    let id = text.id();
    let mut deck = deck_with(vec![text]);
    let mut history = UndoManager::new();

    let command =
        Command::change_property(deck.current_page(), id, ElementProperty::Text("new".into())).unwrap();
    match &command {
        Command::ChangeProperty { before, .. } => {
            assert_eq!(before, &ElementProperty::Text("old".into()))
        }
        other => panic!("unexpected command {other:?}"),
    }
    history.execute(command, &mut deck).unwrap();
    let text = deck.current_page().get_element(id).unwrap().as_text().unwrap();
    assert_eq!(text.text(), "new");

    history.undo(&mut deck).unwrap();
    let text = deck.current_page().get_element(id).unwrap().as_text().unwrap();
    assert_eq!(text.text(), "old");
}

#[test]
fn property_that_does_not_apply_cannot_be_built() {
    let line = factory::create_line(Pos2::ZERO, Pos2::new(10.0, 0.0), Color32::BLACK, 1.0);
    let id = line.id();
    let deck = deck_with(vec![line]);
    let result = Command::change_property(deck.current_page(), id, ElementProperty::Text("x".into()));
    assert!(matches!(result, Err(CommandError::PropertyMismatch { .. })));
}

#[test]
fn failed_execute_is_not_recorded() {
    let rect = factory::create_rectangle(0.0, 0.0, 10.0, 10.0);
    let id = rect.id();
    let mut deck = deck_with(vec![rect]);
    let page = deck.current_page().id();
    let mut history = UndoManager::new();

    let command = Command::ChangeLineEndpoints {
        page,
        element: id,
        before: [Pos2::ZERO, Pos2::ZERO],
        after: [Pos2::ZERO, Pos2::new(1.0, 1.0)],
    };
    let err = history.execute(command, &mut deck).unwrap_err();
    assert!(matches!(err, CommandError::NotALine(e) if e == id));
    assert!(!history.can_undo());
}

#[test]
fn failed_undo_keeps_the_command() {
    let rect = factory::create_rectangle(0.0, 0.0, 10.0, 10.0);
    let id = rect.id();
    let mut deck = deck_with(vec![rect]);
    let page = deck.current_page().id();
    let mut history = UndoManager::new();

    history
        .execute(
            Command::ChangeBounds {
                page,
                element: id,
                before: rect_xywh(0.0, 0.0, 10.0, 10.0),
                after: rect_xywh(0.0, 0.0, 30.0, 30.0),
            },
            &mut deck,
        )
        .unwrap();
    deck.current_page_mut().remove_element(id);

    let err = history.undo(&mut deck).unwrap_err();
    assert!(matches!(err, CommandError::ElementNotFound(e) if e == id));
    assert_eq!((history.undo_len(), history.redo_len()), (1, 0));
}

#[test]
fn layout_swaps_the_whole_page_and_back() {
    let rect = factory::create_rectangle(0.0, 0.0, 10.0, 10.0);
    let mut deck = deck_with(vec![rect]);
    let before = ids(&deck);
    let mut history = UndoManager::new();

    let command = Command::apply_layout(deck.current_page(), PageLayout::TwoColumns.elements());
    history.execute(command, &mut deck).unwrap();
    let page = deck.current_page();
    assert_eq!(page.len(), 3);
    assert_eq!(page.elements()[2].bounds(), rect_xywh(610.0, 180.0, 540.0, 550.0));

    history.undo(&mut deck).unwrap();
    assert_eq!(ids(&deck), before);
}

#[test]
fn commands_on_a_page_not_in_the_deck_fail() {
    let mut deck = Deck::default();
    let other = Deck::default();
    let command = Command::add_element(
        other.current_page().id(),
        factory::create_rectangle(0.0, 0.0, 1.0, 1.0),
    );
    assert!(matches!(command.execute(&mut deck), Err(CommandError::PageNotFound(_))));
}

#[test]
fn history_changes_are_announced() {
    let mut deck = Deck::default();
    let mut history = UndoManager::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    history.subscribe(move |event: &EditorEvent| sink.borrow_mut().push(event.clone()));

    let page = deck.current_page().id();
    history
        .execute(Command::add_element(page, factory::create_rectangle(0.0, 0.0, 1.0, 1.0)), &mut deck)
        .unwrap();
    history.undo(&mut deck).unwrap();
    history.redo(&mut deck).unwrap();
    history.clear();

    assert_eq!(
        *seen.borrow(),
        vec![
            EditorEvent::History(HistoryEvent::Executed { command: "add element" }),
            EditorEvent::History(HistoryEvent::Undone { command: "add element" }),
            EditorEvent::History(HistoryEvent::Redone { command: "add element" }),
            EditorEvent::History(HistoryEvent::Cleared),
        ]
    );
    assert!(!history.can_undo() && !history.can_redo());
}

#[test]
fn commands_are_plain_data() {
    let deck = deck_with(vec![factory::create_text(1.0, 2.0, 30.0, 40.0, "hi")]);
    let id = ids(&deck)[0];
    let command = Command::remove_element(deck.current_page(), id).unwrap();
    let json = serde_json::to_string(&command).unwrap();
    let back: Command = serde_json::from_str(&json).unwrap();
    assert_eq!(back, command);
}
