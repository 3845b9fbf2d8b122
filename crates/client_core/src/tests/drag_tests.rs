use super::*;
use shared::domain::{Alignment, Price};

fn product(id: &str) -> Product {
    Product {
        id: ProductId::from(id),
        name: id.to_uppercase(),
        image: format!("https://img.example/{id}.jpg"),
        price: Price {
            amount: 9.99,
            currency: "EUR".into(),
        },
    }
}

fn row(id: &str, products: &[&str]) -> Row {
    Row {
        id: RowId::from(id),
        products: products.iter().map(|p| product(p)).collect(),
        alignment: Some(Alignment::Left),
    }
}

fn ids(row: &Row) -> Vec<&str> {
    row.products.iter().map(|p| p.id.as_str()).collect()
}

fn row_ids(rows: &[Row]) -> Vec<&str> {
    rows.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn start_tracks_product_and_source_row() {
    let mut drag = ProductDragController::new();
    drag.start(product("a"), RowId::from("r1"));
    assert!(drag.state().is_dragging);
    assert_eq!(drag.state().source_row_id, Some(RowId::from("r1")));

    drag.start(product("b"), RowId::from("r2"));
    assert_eq!(
        drag.state().dragged_product.as_ref().map(|p| p.id.as_str()),
        Some("b")
    );

    drag.end();
    assert_eq!(*drag.state(), ProductDragState::default());
}

#[test]
fn drop_without_active_drag_is_a_no_op() {
    let rows = vec![row("r1", &["a"]), row("r2", &["b"])];
    let mut drag = ProductDragController::new();
    assert_eq!(drag.drop(&rows, &RowId::from("r2"), None), DropOutcome::Unchanged);
}

#[test]
fn same_row_without_position_is_a_no_op_and_resets() {
    let rows = vec![row("r1", &["a", "b"])];
    let mut drag = ProductDragController::new();
    drag.start(product("a"), RowId::from("r1"));
    assert_eq!(drag.drop(&rows, &RowId::from("r1"), None), DropOutcome::Unchanged);
    assert!(!drag.state().is_dragging);
}

#[test]
fn first_product_dropped_at_end_of_its_row() {
    let rows = vec![row("r1", &["a", "b", "c"])];
    let mut drag = ProductDragController::new();
    drag.start(product("a"), RowId::from("r1"));

    let updated = drag
        .drop(&rows, &RowId::from("r1"), Some(3))
        .into_rows()
        .expect("applied");
    assert_eq!(ids(&updated[0]), vec!["b", "c", "a"]);
    assert!(!drag.state().is_dragging);
}

#[test]
fn last_product_moved_to_the_front() {
    let rows = vec![row("r1", &["a", "b", "c"])];
    let mut drag = ProductDragController::new();
    drag.start(product("c"), RowId::from("r1"));

    let updated = drag
        .drop(&rows, &RowId::from("r1"), Some(0))
        .into_rows()
        .expect("applied");
    assert_eq!(ids(&updated[0]), vec!["c", "a", "b"]);
}

#[test]
fn dropping_onto_own_slot_changes_nothing() {
    let rows = vec![row("r1", &["a", "b", "c"])];
    let mut drag = ProductDragController::new();
    drag.start(product("b"), RowId::from("r1"));
    assert_eq!(drag.drop(&rows, &RowId::from("r1"), Some(1)), DropOutcome::Unchanged);

    drag.start(product("b"), RowId::from("r1"));
    assert_eq!(drag.drop(&rows, &RowId::from("r1"), Some(2)), DropOutcome::Unchanged);
}

#[test]
fn cross_row_move_appends_by_default() {
    let rows = vec![row("r1", &["a", "b"]), row("r2", &["c"])];
    let mut drag = ProductDragController::new();
    drag.start(product("a"), RowId::from("r1"));

    let updated = drag
        .drop(&rows, &RowId::from("r2"), None)
        .into_rows()
        .expect("applied");
    assert_eq!(ids(&updated[0]), vec!["b"]);
    assert_eq!(ids(&updated[1]), vec!["c", "a"]);
    assert!(!drag.state().is_dragging);
}

#[test]
fn cross_row_move_honours_position_and_appends_when_out_of_range() {
    let rows = vec![row("r1", &["a", "b"]), row("r2", &["c"])];

    let mut drag = ProductDragController::new();
    drag.start(product("b"), RowId::from("r1"));
    let updated = drag
        .drop(&rows, &RowId::from("r2"), Some(0))
        .into_rows()
        .expect("applied");
    assert_eq!(ids(&updated[1]), vec!["b", "c"]);

    drag.start(product("b"), RowId::from("r1"));
    let updated = drag
        .drop(&rows, &RowId::from("r2"), Some(7))
        .into_rows()
        .expect("applied");
    assert_eq!(ids(&updated[1]), vec!["c", "b"]);
}

#[test]
fn drop_into_full_row_is_rejected_and_resets() {
    let rows = vec![row("r1", &["a", "b"]), row("r2", &["c", "d", "e"])];
    let mut drag = ProductDragController::new();
    drag.start(product("a"), RowId::from("r1"));

    let outcome = drag.drop(&rows, &RowId::from("r2"), None);
    assert_eq!(outcome, DropOutcome::Rejected(DropRejection::TargetRowFull));
    assert!(!drag.state().is_dragging);
    assert_eq!(ids(&rows[0]), vec!["a", "b"]);
    assert_eq!(ids(&rows[1]), vec!["c", "d", "e"]);
}

#[test]
fn moving_the_last_product_out_of_a_row_is_rejected() {
    let rows = vec![row("r1", &["a"]), row("r2", &["b"])];
    let mut drag = ProductDragController::new();
    drag.start(product("a"), RowId::from("r1"));

    let outcome = drag.drop(&rows, &RowId::from("r2"), None);
    assert_eq!(outcome, DropOutcome::Rejected(DropRejection::SourceRowWouldEmpty));
    assert!(!drag.state().is_dragging);
}

#[test]
fn unknown_target_row_is_ignored() {
    let rows = vec![row("r1", &["a", "b"])];
    let mut drag = ProductDragController::new();
    drag.start(product("a"), RowId::from("r1"));
    assert_eq!(drag.drop(&rows, &RowId::from("ghost"), None), DropOutcome::Unchanged);
    assert!(!drag.state().is_dragging);
}

#[test]
fn row_drag_moves_first_row_to_last() {
    let rows = vec![row("A", &["a"]), row("B", &["b"]), row("C", &["c"])];
    let mut drag = RowDragController::new();
    drag.start(RowId::from("A"));

    let updated = drag
        .drop(&rows, &RowId::from("C"))
        .into_rows()
        .expect("applied");
    assert_eq!(row_ids(&updated), vec!["B", "C", "A"]);
    assert_eq!(*drag.state(), RowDragState::default());
}

#[test]
fn row_drag_moves_last_row_to_first() {
    let rows = vec![row("A", &["a"]), row("B", &["b"]), row("C", &["c"])];
    let mut drag = RowDragController::new();
    drag.start(RowId::from("C"));

    let updated = drag
        .drop(&rows, &RowId::from("A"))
        .into_rows()
        .expect("applied");
    assert_eq!(row_ids(&updated), vec!["C", "A", "B"]);
}

#[test]
fn row_drop_ignored_without_drag_or_onto_itself() {
    let rows = vec![row("A", &["a"]), row("B", &["b"])];
    let mut drag = RowDragController::new();
    assert_eq!(drag.drop(&rows, &RowId::from("B")), DropOutcome::Unchanged);

    drag.start(RowId::from("A"));
    assert_eq!(drag.drop(&rows, &RowId::from("A")), DropOutcome::Unchanged);
    assert!(drag.state().is_dragging);

    drag.end();
    assert!(!drag.state().is_dragging);
    assert_eq!(drag.state().source_row_id, None);
}
