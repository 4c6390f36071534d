use std::cell::RefCell;
use std::rc::Rc;

use egui::{Color32, CursorIcon, Key, Modifiers, PointerButton, Pos2, Rect, Vec2};
use slide_editor::element::{Element, ElementType, factory};
use slide_editor::event::EditorEvent;
use slide_editor::geometry::hit_testing::handle_positions;
use slide_editor::geometry::{rect_xywh, rotate_point};
use slide_editor::id_generator::ElementId;
use slide_editor::input::InputEvent;
use slide_editor::selection::ResizeHandle;
use slide_editor::state::EditorContext;
use slide_editor::tools::SelectionState;

// With no viewport set the view is unzoomed and unpanned, so screen and logical points coincide.

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-2
}

fn approx_pos(a: Pos2, b: Pos2) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y)
}

fn press_with(editor: &mut EditorContext, p: Pos2, button: PointerButton) {
    editor
        .handle_input(InputEvent::PointerDown {
            position: p,
            button,
            modifiers: Modifiers::NONE,
        })
        .unwrap();
}

fn press(editor: &mut EditorContext, p: Pos2) {
    press_with(editor, p, PointerButton::Primary);
}

fn move_to(editor: &mut EditorContext, p: Pos2, modifiers: Modifiers) {
    editor
        .handle_input(InputEvent::PointerMove {
            position: p,
            modifiers,
        })
        .unwrap();
}

fn release(editor: &mut EditorContext, p: Pos2) {
    editor
        .handle_input(InputEvent::PointerUp {
            position: p,
            button: PointerButton::Primary,
        })
        .unwrap();
}

fn drag(editor: &mut EditorContext, from: Pos2, to: Pos2, modifiers: Modifiers) {
    press(editor, from);
    move_to(editor, to, modifiers);
    release(editor, to);
}

fn key(editor: &mut EditorContext, key: Key, modifiers: Modifiers) {
    editor
        .handle_input(InputEvent::KeyDown { key, modifiers })
        .unwrap();
}

fn element(editor: &EditorContext, id: ElementId) -> &ElementType {
    editor.current_page().get_element(id).expect("element on page")
}

fn editor_with(element: ElementType) -> (EditorContext, ElementId) {
    let mut editor = EditorContext::default();
    let id = editor.insert_element(element).unwrap();
    (editor, id)
}

#[test]
fn dragging_the_bottom_right_handle_resizes_and_undoes() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));

    press(&mut editor, Pos2::new(110.0, 60.0));
    assert!(matches!(editor.tool_state(), SelectionState::Resizing { .. }));
    move_to(&mut editor, Pos2::new(130.0, 70.0), Modifiers::NONE);
    release(&mut editor, Pos2::new(130.0, 70.0));

    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 120.0, 60.0));
    assert_eq!(editor.history().undo_len(), 2);

    editor.undo().unwrap();
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn dragging_a_line_end_moves_only_that_end() {
    let line = factory::create_line(Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), Color32::BLACK, 2.0);
    let (mut editor, id) = editor_with(line);

    drag(&mut editor, Pos2::new(100.0, 0.0), Pos2::new(100.0, 50.0), Modifiers::SHIFT);
    let endpoints = element(&editor, id).as_line().unwrap().endpoints();
    assert_eq!(endpoints, (Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0)));

    editor.undo().unwrap();
    let endpoints = element(&editor, id).as_line().unwrap().endpoints();
    assert_eq!(endpoints, (Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0)));
}

#[test]
fn rotation_handle_follows_the_pointer_with_a_quarter_turn_offset() {
    let (mut editor, id) = editor_with(factory::create_rectangle(100.0, 100.0, 100.0, 100.0));
    editor.set_selected_rotation(90.0).unwrap();
    let pivot = Pos2::new(150.0, 150.0);

    // Rotation handle sits 30 above the top edge in the element's own frame
    let handle = rotate_point(Pos2::new(150.0, 70.0), pivot, 90.0);
    press(&mut editor, handle);
    assert!(matches!(editor.tool_state(), SelectionState::Rotating { .. }));

    // Straight below the pivot is 90 degrees by atan2, so the element ends up at 180
    move_to(&mut editor, Pos2::new(150.0, 250.0), Modifiers::NONE);
    release(&mut editor, Pos2::new(150.0, 250.0));
    assert!(approx(element(&editor, id).rotation(), 180.0));

    editor.undo().unwrap();
    assert!(approx(element(&editor, id).rotation(), 90.0));
}

#[test]
fn a_drag_that_ends_where_it_started_records_nothing() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    let depth = editor.history().undo_len();

    press(&mut editor, Pos2::new(50.0, 30.0));
    move_to(&mut editor, Pos2::new(80.0, 60.0), Modifiers::NONE);
    move_to(&mut editor, Pos2::new(50.0, 30.0), Modifiers::NONE);
    release(&mut editor, Pos2::new(50.0, 30.0));

    assert_eq!(editor.history().undo_len(), depth);
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn moving_an_element_is_one_undoable_step() {
    let (mut editor, id) = editor_with(factory::create_oval(10.0, 10.0, 100.0, 50.0));

    press(&mut editor, Pos2::new(50.0, 30.0));
    move_to(&mut editor, Pos2::new(55.0, 31.0), Modifiers::NONE);
    move_to(&mut editor, Pos2::new(65.0, 35.0), Modifiers::NONE);
    release(&mut editor, Pos2::new(65.0, 35.0));

    assert_eq!(element(&editor, id).bounds(), rect_xywh(25.0, 15.0, 100.0, 50.0));
    assert_eq!(editor.history().undo_len(), 2);
    editor.undo().unwrap();
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn aspect_lock_keeps_the_opposite_anchor_for_every_handle() {
    let start = rect_xywh(100.0, 100.0, 200.0, 100.0);
    for (index, handle) in ResizeHandle::ALL.into_iter().enumerate() {
        let (mut editor, id) = editor_with(factory::create_rectangle(100.0, 100.0, 200.0, 100.0));
        let from = handle_positions(start)[index];

        drag(&mut editor, from, from + Vec2::new(30.0, 20.0), Modifiers::SHIFT);

        let after = element(&editor, id).bounds();
        assert!(
            approx_pos(handle.anchor(after), handle.anchor(start)),
            "{handle:?}: anchor moved, {after:?}"
        );
        assert!(
            approx(after.height() / after.width(), 0.5),
            "{handle:?}: ratio lost, {after:?}"
        );
        assert_ne!(after, start, "{handle:?} did not resize");
    }
}

#[test]
fn resizing_never_goes_below_the_minimum_size() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    drag(&mut editor, Pos2::new(110.0, 60.0), Pos2::new(-200.0, -200.0), Modifiers::NONE);
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 20.0, 20.0));
}

#[test]
fn resizing_a_rotated_box_keeps_the_anchor_edge_in_place() {
    let (mut editor, id) = editor_with(factory::create_rectangle(100.0, 100.0, 200.0, 100.0));
    editor.set_selected_rotation(90.0).unwrap();

    let anchor_world = |e: &ElementType| {
        rotate_point(ResizeHandle::Right.anchor(e.bounds()), e.pivot(), e.rotation())
    };
    let before = anchor_world(element(&editor, id));

    // The right handle of the unrotated box now points down
    let handle = rotate_point(Pos2::new(300.0, 150.0), Pos2::new(200.0, 150.0), 90.0);
    drag(&mut editor, handle, handle + Vec2::new(0.0, 40.0), Modifiers::NONE);

    let rect = element(&editor, id);
    assert!(approx(rect.bounds().width(), 240.0), "{:?}", rect.bounds());
    assert!(approx(rect.bounds().height(), 100.0));
    assert!(approx_pos(anchor_world(rect), before));
}

#[test]
fn dragging_an_end_of_a_rotated_line_leaves_the_other_end_in_place() {
    let line = factory::create_line(Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), Color32::BLACK, 2.0);
    let (mut editor, id) = editor_with(line);
    editor.set_selected_rotation(90.0).unwrap();

    let world_ends = |e: &ElementType| {
        let (start, end) = e.as_line().unwrap().endpoints();
        (
            rotate_point(start, e.pivot(), e.rotation()),
            rotate_point(end, e.pivot(), e.rotation()),
        )
    };
    let (start, end) = world_ends(element(&editor, id));
    assert!(approx_pos(start, Pos2::new(50.0, -50.0)), "{start:?}");
    assert!(approx_pos(end, Pos2::new(50.0, 50.0)), "{end:?}");

    drag(&mut editor, end, Pos2::new(50.0, 100.0), Modifiers::NONE);
    let (start, end) = world_ends(element(&editor, id));
    assert!(approx_pos(start, Pos2::new(50.0, -50.0)), "{start:?}");
    assert!(approx_pos(end, Pos2::new(50.0, 100.0)), "{end:?}");

    editor.undo().unwrap();
    let endpoints = element(&editor, id).as_line().unwrap().endpoints();
    assert_eq!(endpoints, (Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0)));
}

#[test]
fn resize_handle_stays_under_the_pointer_after_hitting_the_minimum() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    let original = element(&editor, id).bounds();

    press(&mut editor, Pos2::new(110.0, 60.0));
    move_to(&mut editor, Pos2::new(-200.0, -200.0), Modifiers::NONE);
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 20.0, 20.0));
    move_to(&mut editor, Pos2::new(130.0, 70.0), Modifiers::NONE);
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 120.0, 60.0));
    move_to(&mut editor, Pos2::new(110.0, 60.0), Modifiers::NONE);
    release(&mut editor, Pos2::new(110.0, 60.0));

    assert_eq!(element(&editor, id).bounds(), original);
    // Only the insert is on the stack
    assert_eq!(editor.history().undo_len(), 1);
}

#[test]
fn rotated_elements_are_hit_in_their_own_frame() {
    let (mut editor, id) = editor_with(factory::create_rectangle(100.0, 140.0, 200.0, 20.0));
    editor.set_selected_rotation(90.0).unwrap();
    press(&mut editor, Pos2::new(600.0, 600.0));
    assert_eq!(editor.selected(), None);

    // Below the centre: outside the unrotated strip, inside the rotated one
    press(&mut editor, Pos2::new(200.0, 230.0));
    assert_eq!(editor.selected(), Some(id));
    release(&mut editor, Pos2::new(200.0, 230.0));

    press(&mut editor, Pos2::new(120.0, 150.0));
    assert_eq!(editor.selected(), None);
}

#[test]
fn clicking_empty_canvas_clears_the_selection() {
    let (mut editor, _) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    press(&mut editor, Pos2::new(500.0, 500.0));
    release(&mut editor, Pos2::new(500.0, 500.0));
    assert_eq!(editor.selected(), None);
    assert!(matches!(editor.tool_state(), SelectionState::Idle));
}

#[test]
fn secondary_button_pans_the_view() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    let depth = editor.history().undo_len();

    press_with(&mut editor, Pos2::new(50.0, 30.0), PointerButton::Secondary);
    move_to(&mut editor, Pos2::new(80.0, 20.0), Modifiers::NONE);
    release(&mut editor, Pos2::new(80.0, 20.0));

    assert_eq!(editor.view().pan(), Vec2::new(30.0, -10.0));
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 100.0, 50.0));
    assert_eq!(editor.history().undo_len(), depth);
    assert_eq!(editor.view().to_logical(Pos2::new(80.0, 20.0)), Pos2::new(50.0, 30.0));
}

#[test]
fn held_space_turns_a_primary_drag_into_a_pan() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    key(&mut editor, Key::Space, Modifiers::NONE);
    drag(&mut editor, Pos2::new(50.0, 30.0), Pos2::new(60.0, 50.0), Modifiers::NONE);
    editor.handle_input(InputEvent::KeyUp { key: Key::Space }).unwrap();

    assert_eq!(editor.view().pan(), Vec2::new(10.0, 20.0));
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 100.0, 50.0));
    assert!(!editor.editor_state().pan_key_held());
}

#[test]
fn handles_keep_their_screen_size_when_zoomed() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    editor.set_zoom_and_center(2.0).unwrap();
    let view = editor.view().clone();

    let corner = view.to_screen(Pos2::new(110.0, 60.0));
    // 3 screen px off the corner is inside the 8 px handle at any zoom
    drag(
        &mut editor,
        corner + Vec2::new(3.0, 3.0),
        corner + Vec2::new(43.0, 23.0),
        Modifiers::NONE,
    );
    assert_eq!(element(&editor, id).bounds(), rect_xywh(10.0, 10.0, 120.0, 60.0));
}

#[test]
fn zoom_steps_are_clamped() {
    let mut editor = EditorContext::default();
    editor.handle_input(InputEvent::Zoom { steps: 1.0 }).unwrap();
    assert!(approx(editor.view().scale(), 1.1));
    for _ in 0..100 {
        editor.handle_input(InputEvent::Zoom { steps: 1.0 }).unwrap();
    }
    assert_eq!(editor.view().scale(), 5.0);
    assert!(!editor.zoom_by(1.0).unwrap());
}

#[test]
fn zoom_to_fit_uses_the_viewport() {
    let mut editor = EditorContext::default();
    assert!(!editor.zoom_to_fit().unwrap());
    editor.set_viewport_size(Vec2::new(680.0, 1000.0));
    assert!(editor.zoom_to_fit().unwrap());
    assert_eq!(editor.view().scale(), 0.5);
    assert_eq!(editor.view().pan(), Vec2::new(40.0, 300.0));
}

#[test]
fn typing_into_a_text_box_commits_one_change() {
    let placeholder = EditorContext::default().config().text_placeholder.clone();
    let (mut editor, id) = editor_with(factory::create_text(100.0, 100.0, 300.0, 100.0, &placeholder));
    let depth = editor.history().undo_len();

    press(&mut editor, Pos2::new(150.0, 110.0));
    release(&mut editor, Pos2::new(150.0, 110.0));
    let session = editor.editor_state().text_edit().expect("editing");
    assert_eq!(session.buffer, "");

    editor.handle_input(InputEvent::Text("Hello".into())).unwrap();
    key(&mut editor, Key::Enter, Modifiers::NONE);
    editor.handle_input(InputEvent::Text("World!".into())).unwrap();
    key(&mut editor, Key::Backspace, Modifiers::NONE);
    // Nothing is written until the edit is committed
    assert_eq!(element(&editor, id).as_text().unwrap().text(), placeholder);

    press(&mut editor, Pos2::new(700.0, 600.0));
    assert!(!editor.editor_state().is_editing_text());
    assert_eq!(element(&editor, id).as_text().unwrap().text(), "Hello\nWorld");
    assert_eq!(editor.history().undo_len(), depth + 1);

    editor.undo().unwrap();
    assert_eq!(element(&editor, id).as_text().unwrap().text(), placeholder);
}

#[test]
fn clearing_the_text_restores_the_placeholder() {
    let (mut editor, id) = editor_with(factory::create_text(0.0, 0.0, 300.0, 100.0, "abc"));

    press(&mut editor, Pos2::new(10.0, 5.0));
    assert_eq!(editor.editor_state().text_edit().unwrap().buffer, "abc");
    for _ in 0..3 {
        key(&mut editor, Key::Backspace, Modifiers::NONE);
    }
    key(&mut editor, Key::Escape, Modifiers::NONE);

    let placeholder = editor.config().text_placeholder.clone();
    assert_eq!(element(&editor, id).as_text().unwrap().text(), placeholder);
    // Backspace went to the buffer, the box is still there
    assert!(editor.current_page().contains_element(id));
}

#[test]
fn unchanged_text_edit_records_nothing() {
    let (mut editor, _) = editor_with(factory::create_text(0.0, 0.0, 300.0, 100.0, "abc"));
    let depth = editor.history().undo_len();
    press(&mut editor, Pos2::new(10.0, 5.0));
    editor.handle_input(InputEvent::FocusLost).unwrap();
    assert!(!editor.editor_state().is_editing_text());
    assert_eq!(editor.history().undo_len(), depth);
}

#[test]
fn pressing_below_the_text_moves_the_box() {
    let (mut editor, id) = editor_with(factory::create_text(0.0, 0.0, 300.0, 100.0, "abc"));
    press(&mut editor, Pos2::new(150.0, 80.0));
    assert!(!editor.editor_state().is_editing_text());
    assert!(matches!(editor.tool_state(), SelectionState::Moving { element, .. } if *element == id));
}

#[test]
fn zooming_commits_the_text_edit() {
    let (mut editor, id) = editor_with(factory::create_text(0.0, 0.0, 300.0, 100.0, "abc"));
    press(&mut editor, Pos2::new(10.0, 5.0));
    editor.handle_input(InputEvent::Text("d".into())).unwrap();
    editor.handle_input(InputEvent::Zoom { steps: -1.0 }).unwrap();
    assert!(!editor.editor_state().is_editing_text());
    assert_eq!(element(&editor, id).as_text().unwrap().text(), "abcd");
}

#[test]
fn delete_key_removes_the_selection_undoably() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    key(&mut editor, Key::Delete, Modifiers::NONE);
    assert!(!editor.current_page().contains_element(id));
    assert_eq!(editor.selected(), None);

    key(&mut editor, Key::Z, Modifiers::COMMAND);
    assert!(editor.current_page().contains_element(id));

    let redo = Modifiers {
        shift: true,
        ..Modifiers::COMMAND
    };
    key(&mut editor, Key::Z, redo);
    assert!(!editor.current_page().contains_element(id));
}

#[test]
fn undoing_an_insert_drops_the_selection() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    assert_eq!(editor.selected(), Some(id));
    editor.undo().unwrap();
    assert_eq!(editor.selected(), None);
    editor.redo().unwrap();
    assert!(editor.current_page().contains_element(id));
}

#[test]
fn z_order_buttons_act_on_the_selection() {
    let mut editor = EditorContext::default();
    let a = editor.insert_element(factory::create_rectangle(0.0, 0.0, 50.0, 50.0)).unwrap();
    let b = editor.insert_element(factory::create_rectangle(10.0, 10.0, 50.0, 50.0)).unwrap();
    assert_eq!(editor.selected(), Some(b));

    editor.send_selected_to_back().unwrap();
    assert_eq!(editor.current_page().index_of(b), Some(0));
    press(&mut editor, Pos2::new(30.0, 30.0));
    release(&mut editor, Pos2::new(30.0, 30.0));
    assert_eq!(editor.selected(), Some(a));

    editor.undo().unwrap();
    assert_eq!(editor.current_page().index_of(b), Some(1));
}

#[test]
fn losing_focus_mid_drag_finishes_the_gesture() {
    let (mut editor, id) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    press(&mut editor, Pos2::new(50.0, 30.0));
    move_to(&mut editor, Pos2::new(60.0, 30.0), Modifiers::NONE);
    editor.handle_input(InputEvent::FocusLost).unwrap();

    assert!(matches!(editor.tool_state(), SelectionState::Idle));
    assert_eq!(element(&editor, id).bounds(), rect_xywh(20.0, 10.0, 100.0, 50.0));
    assert_eq!(editor.history().undo_len(), 2);
}

#[test]
fn hover_cursor_reflects_what_a_press_would_do() {
    let (editor, _) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    assert_eq!(editor.hover_cursor(Pos2::new(110.0, 60.0)), CursorIcon::ResizeSouthEast);
    assert_eq!(editor.hover_cursor(Pos2::new(60.0, -20.0)), CursorIcon::Grab);
    assert_eq!(editor.hover_cursor(Pos2::new(50.0, 30.0)), CursorIcon::Move);
    assert_eq!(editor.hover_cursor(Pos2::new(500.0, 500.0)), CursorIcon::Default);
}

#[test]
fn selection_handles_are_reported_for_drawing() {
    let (editor, _) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    let handles = editor.selection_handles().unwrap();
    assert_eq!(handles.resize.len(), 8);
    assert_eq!(handles.resize[4], Rect::from_center_size(Pos2::new(110.0, 60.0), Vec2::splat(8.0)));
    assert!(handles.rotate.is_some());

    let (editor, _) = editor_with(factory::create_line(
        Pos2::ZERO,
        Pos2::new(10.0, 10.0),
        Color32::BLACK,
        1.0,
    ));
    let handles = editor.selection_handles().unwrap();
    assert!(handles.resize.is_empty() && handles.rotate.is_none());
    assert!(handles.line_ends.is_some());
}

#[test]
fn page_changes_clear_the_selection_and_are_announced() {
    let (mut editor, _) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    editor.subscribe(move |event: &EditorEvent| sink.borrow_mut().push(event.clone()));

    editor.add_page().unwrap();
    assert_eq!(editor.deck().page_count(), 2);
    assert_eq!(editor.deck().current_page_index(), 1);
    assert_eq!(editor.selected(), None);
    assert!(!editor.next_page().unwrap());
    assert!(editor.previous_page().unwrap());
    assert!(!editor.go_to_page(7).unwrap());

    let pages: Vec<usize> = seen
        .borrow()
        .iter()
        .filter_map(|event| match event {
            EditorEvent::PageChanged { index } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![1, 0]);
    assert!(seen.borrow().iter().any(|event| matches!(
        event,
        EditorEvent::SelectionChanged { new: None, .. }
    )));
}

#[test]
fn layouts_replace_the_page_in_one_step() {
    let (mut editor, _) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    editor
        .apply_layout(slide_editor::layout::PageLayout::TitleAndContent)
        .unwrap();
    assert_eq!(editor.current_page().len(), 2);
    assert_eq!(editor.selected(), None);
    editor.undo().unwrap();
    assert_eq!(editor.current_page().len(), 1);
}

#[test]
fn opening_a_document_resets_history() {
    let (mut editor, _) = editor_with(factory::create_rectangle(10.0, 10.0, 100.0, 50.0));
    assert!(editor.history().can_undo());
    editor.new_document().unwrap();
    assert!(!editor.history().can_undo());
    assert!(editor.current_page().is_empty());
    assert_eq!(editor.selected(), None);
}
