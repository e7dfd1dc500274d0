//! Tests for longer sequences of edits
//!
//! This tests:
//! - Cascading deletes across all three levels
//! - Move then delete chains
//! - Serialized intents replayed against a course
//! - Tree integrity after mixed operations

use coursekit_editor::{
    add_attachment, add_lesson, add_module, add_unit, delete_module, delete_unit,
    move_across_parent, update_lesson_field, AttachmentMeta, ContainerPath, Course, DragKind,
    EntityKind, Mutation, MutationError, NodeDefaults,
};
use serde_json::json;

fn pdf(name: &str) -> AttachmentMeta {
    AttachmentMeta {
        name: name.to_string(),
        size: 1024,
        mime_type: "application/pdf".to_string(),
        url: format!("blob:{}", name),
    }
}

#[test]
fn test_delete_module_cascades_to_attachments() {
    let (course, m1) = add_module(&Course::new("c1", "Rust"));
    let (course, m2) = add_module(&course);
    let (course, u) = add_unit(&course, &m1).unwrap();
    let (course, l) = add_lesson(&course, &m1, &u).unwrap();
    let (course, _) = add_attachment(&course, &m1, &u, &l, &pdf("slides.pdf")).unwrap();
    let (course, _) = add_unit(&course, &m2).unwrap();

    assert_eq!(course.attachment_count(), 1);

    let next = delete_module(&course, &m1).unwrap();
    assert_eq!(next.modules.len(), 1);
    assert_eq!(next.unit_count(), 1);
    assert_eq!(next.lesson_count(), 0);
    assert_eq!(next.attachment_count(), 0);

    // Lookups into the removed subtree now fail
    assert_eq!(
        add_lesson(&next, &m1, &u).unwrap_err(),
        MutationError::NotFound {
            kind: EntityKind::Module,
            id: m1.clone()
        }
    );
}

#[test]
fn test_move_then_delete_sequence() {
    let (course, m) = add_module(&Course::new("c1", "Rust"));
    let (course, u1) = add_unit(&course, &m).unwrap();
    let (course, u2) = add_unit(&course, &m).unwrap();
    let (course, l) = add_lesson(&course, &m, &u1).unwrap();
    let course = update_lesson_field(&course, &m, &u1, &l, "title", &json!("Borrowing")).unwrap();

    // Move the lesson into the second unit
    let course = move_across_parent(
        &course,
        DragKind::Lesson,
        &ContainerPath::unit(&m, &u1).at(0),
        &ContainerPath::unit(&m, &u2),
    )
    .unwrap();
    assert_eq!(course.lesson(&m, &u2, &l).unwrap().title, "Borrowing");
    assert!(course.lesson(&m, &u1, &l).is_none());

    // Deleting the now empty source unit leaves the lesson intact
    let course = delete_unit(&course, &m, &u1).unwrap();
    assert_eq!(course.lesson_count(), 1);

    // Deleting the destination unit takes the lesson with it
    let course = delete_unit(&course, &m, &u2).unwrap();
    assert_eq!(course.lesson_count(), 0);
    assert_eq!(
        delete_unit(&course, &m, &u2).unwrap_err(),
        MutationError::NotFound {
            kind: EntityKind::Unit,
            id: u2
        }
    );
}

#[test]
fn test_replay_serialized_intents() {
    let defaults = NodeDefaults::default();
    let course = Course::new("c1", "Rust");

    let applied = Mutation::AddModule.apply(&course, &defaults).unwrap();
    let module_id = applied.created_id.unwrap();

    let intents = json!([
        { "op": "updateModuleField", "moduleId": module_id, "field": "title",
          "value": "Ownership" },
        { "op": "updateModuleField", "moduleId": module_id, "field": "duration",
          "value": "2 hours" },
        { "op": "addUnit", "moduleId": module_id },
        { "op": "updateCourseField", "field": "price", "value": 29.99 }
    ]);
    let intents: Vec<Mutation> = serde_json::from_value(intents).unwrap();

    let mut course = applied.course;
    for intent in &intents {
        course = intent.apply(&course, &defaults).unwrap().course;
    }

    assert_eq!(course.modules[0].title, "Ownership");
    assert_eq!(course.modules[0].duration, "2 hours");
    assert_eq!(course.modules[0].units.len(), 1);
    assert_eq!(course.price, 29.99);
}

#[test]
fn test_failed_intent_leaves_course_unchanged() {
    let defaults = NodeDefaults::default();
    let (course, m) = add_module(&Course::new("c1", "Rust"));
    let snapshot = course.clone();

    let bad_field = Mutation::UpdateModuleField {
        module_id: m.clone(),
        field: "lessons".to_string(),
        value: json!([]),
    };
    assert!(matches!(
        bad_field.apply(&course, &defaults),
        Err(MutationError::InvalidField { kind: EntityKind::Module, .. })
    ));

    let bad_value = Mutation::UpdateModuleField {
        module_id: m,
        field: "title".to_string(),
        value: json!(42),
    };
    assert!(matches!(
        bad_value.apply(&course, &defaults),
        Err(MutationError::InvalidValue { .. })
    ));

    assert_eq!(course, snapshot);
}

#[test]
fn test_cross_moves_keep_every_lesson_owned_once() {
    let (course, m) = add_module(&Course::new("c1", "Rust"));
    let (mut course, u1) = add_unit(&course, &m).unwrap();
    let (next, u2) = add_unit(&course, &m).unwrap();
    course = next;
    for _ in 0..4 {
        course = add_lesson(&course, &m, &u1).unwrap().0;
    }

    // Shuttle lessons back and forth
    for round in 0..6 {
        let (from, to) = if round % 2 == 0 { (&u1, &u2) } else { (&u2, &u1) };
        course = move_across_parent(
            &course,
            DragKind::Lesson,
            &ContainerPath::unit(&m, from).at(0),
            &ContainerPath::unit(&m, to),
        )
        .unwrap();
        assert_eq!(course.lesson_count(), 4);
    }

    let mut ids: Vec<_> = course.modules[0]
        .units
        .iter()
        .flat_map(|u| u.lessons.iter().map(|l| l.id.clone()))
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}
