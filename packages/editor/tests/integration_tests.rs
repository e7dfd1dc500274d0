//! Integration tests for editor crate

use coursekit_editor::{
    add_lesson, add_module, add_unit, delete_module, move_across_parent, reorder_same_parent,
    update_module_field, validate, ContainerPath, Course, CourseSession, DragKind, DropTarget,
    EditorConfig, FailurePath, LessonType, MemorySink, Mutation, RecordingNotifier, SaveState,
};
use serde_json::json;
use std::sync::Arc;

fn titled_modules(titles: &[&str]) -> Course {
    let mut course = Course::new("course-1", "Systems Programming");
    for title in titles {
        let (next, id) = add_module(&course);
        course = update_module_field(&next, &id, "title", &json!(title)).unwrap();
    }
    course
}

fn module_titles(course: &Course) -> Vec<String> {
    course.modules.iter().map(|m| m.title.clone()).collect()
}

/// Moving `i` to `j` lands the node at `j` and keeps everything else in order
fn assert_moved(before: &[String], after: &[String], i: usize, j: usize) {
    assert_eq!(after.len(), before.len());
    assert_eq!(after[j], before[i], "moved node lands at target ({} -> {})", i, j);

    let mut others = before.to_vec();
    others.remove(i);
    let mut rest = after.to_vec();
    rest.remove(j);
    assert_eq!(rest, others, "others keep relative order ({} -> {})", i, j);
}

#[test]
fn test_build_outline_from_scratch() {
    let course = Course::new("course-1", "Systems Programming");
    assert!(course.modules.is_empty());

    let (course, m) = add_module(&course);
    assert_eq!(course.modules.len(), 1);
    assert_eq!(course.modules[0].title, "New Module");
    assert!(course.modules[0].units.is_empty());

    let (course, u) = add_unit(&course, &m).unwrap();
    let unit = course.unit(&m, &u).unwrap();
    assert_eq!(unit.title, "New Unit");
    assert!(unit.lessons.is_empty());

    let (course, l) = add_lesson(&course, &m, &u).unwrap();
    let lesson = course.lesson(&m, &u, &l).unwrap();
    assert_eq!(lesson.title, "New Lesson");
    assert_eq!(lesson.lesson_type, LessonType::Article);

    assert!(validate(&course).is_ok());
}

#[test]
fn test_add_then_delete_module_restores_course() {
    let course = titled_modules(&["Intro", "Memory", "Concurrency"]);

    let (with_extra, id) = add_module(&course);
    let restored = delete_module(&with_extra, &id).unwrap();

    assert_eq!(restored, course);
}

#[test]
fn test_reorder_is_a_permutation_for_every_index_pair() {
    let titles = ["A", "B", "C", "D"];
    let course = titled_modules(&titles);
    assert_eq!(module_titles(&course), titles);

    for i in 0..titles.len() {
        for j in 0..titles.len() {
            if i == j {
                continue;
            }

            let next = reorder_same_parent(
                &course,
                DragKind::Module,
                &ContainerPath::Course.at(i),
                &ContainerPath::Course.at(j),
            )
            .unwrap();

            assert_moved(&module_titles(&course), &module_titles(&next), i, j);
        }
    }
}

#[test]
fn test_unit_reorder_is_a_permutation() {
    let (mut course, m) = add_module(&Course::new("course-1", "Systems Programming"));
    for _ in 0..4 {
        course = add_unit(&course, &m).unwrap().0;
    }
    let unit_ids = |c: &Course| -> Vec<String> {
        c.module(&m).unwrap().units.iter().map(|u| u.id.clone()).collect()
    };
    let before = unit_ids(&course);

    for i in 0..before.len() {
        for j in 0..before.len() {
            let next = reorder_same_parent(
                &course,
                DragKind::Unit,
                &ContainerPath::module(&m).at(i),
                &ContainerPath::module(&m).at(j),
            )
            .unwrap();
            assert_moved(&before, &unit_ids(&next), i, j);
        }
    }
}

#[test]
fn test_lesson_reorder_is_a_permutation() {
    let (course, m) = add_module(&Course::new("course-1", "Systems Programming"));
    let (mut course, u) = add_unit(&course, &m).unwrap();
    for _ in 0..4 {
        course = add_lesson(&course, &m, &u).unwrap().0;
    }
    let lesson_ids = |c: &Course| -> Vec<String> {
        c.unit(&m, &u).unwrap().lessons.iter().map(|l| l.id.clone()).collect()
    };
    let before = lesson_ids(&course);

    for i in 0..before.len() {
        for j in 0..before.len() {
            let next = reorder_same_parent(
                &course,
                DragKind::Lesson,
                &ContainerPath::unit(&m, &u).at(i),
                &ContainerPath::unit(&m, &u).at(j),
            )
            .unwrap();
            assert_moved(&before, &lesson_ids(&next), i, j);
            assert_eq!(next.lesson_count(), course.lesson_count());
        }
    }
}

#[test]
fn test_unit_cross_move_preserves_total() {
    let course = titled_modules(&["Intro", "Memory"]);
    let m1 = course.modules[0].id.clone();
    let m2 = course.modules[1].id.clone();
    let (course, moved) = add_unit(&course, &m1).unwrap();
    let (course, _) = add_unit(&course, &m1).unwrap();
    let (course, _) = add_unit(&course, &m2).unwrap();

    let next = move_across_parent(
        &course,
        DragKind::Unit,
        &ContainerPath::module(&m1).at(0),
        &ContainerPath::module(&m2),
    )
    .unwrap();

    assert_eq!(next.unit_count(), course.unit_count());
    assert_eq!(next.module(&m1).unwrap().units.len(), 1);
    let target = &next.module(&m2).unwrap().units;
    assert_eq!(target.len(), 2);
    assert_eq!(target.last().unwrap().id, moved);
}

#[test]
fn test_validation_names_first_failing_module() {
    assert!(matches!(
        validate(&Course::new("c", "Empty")).unwrap_err().path,
        FailurePath::Root
    ));

    let course = titled_modules(&["Intro"]);
    let err = validate(&course).unwrap_err();
    assert!(matches!(
        err.path,
        FailurePath::Module { ref module_title, .. } if module_title == "Intro"
    ));
}

#[tokio::test]
async fn test_session_drag_and_publish() {
    let sink = Arc::new(MemorySink::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let mut session = CourseSession::new(
        Course::new("course-1", "Systems Programming"),
        EditorConfig::default(),
        sink.clone(),
        notifier.clone(),
    );

    let mut module_ids = Vec::new();
    for _ in 0..2 {
        let m = session.apply(Mutation::AddModule).unwrap().unwrap();
        let u = session
            .apply(Mutation::AddUnit { module_id: m.clone() })
            .unwrap()
            .unwrap();
        session
            .apply(Mutation::AddLesson { module_id: m.clone(), unit_id: u })
            .unwrap();
        module_ids.push(m);
    }

    // Drag the second module to the front
    assert!(session.begin_drag(DragKind::Module, ContainerPath::Course.at(1)).unwrap());
    assert!(session
        .drop(&DropTarget::Sibling(ContainerPath::Course.at(0)))
        .unwrap());
    assert_eq!(session.course().modules[0].id, module_ids[1]);
    assert_eq!(session.version(), 7);

    let ack = session.publish().unwrap();
    assert_eq!(ack.revision, 1);
    assert_eq!(session.save_state(), SaveState::Saved);
    assert_eq!(sink.last().as_ref(), Some(session.course()));
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_session_drop_on_unit_moves_lesson_across_modules() {
    let sink = Arc::new(MemorySink::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let mut session = CourseSession::new(
        Course::new("course-1", "Systems Programming"),
        EditorConfig::default(),
        sink,
        notifier.clone(),
    );

    let mut units = Vec::new();
    for _ in 0..2 {
        let m = session.apply(Mutation::AddModule).unwrap().unwrap();
        let u = session
            .apply(Mutation::AddUnit { module_id: m.clone() })
            .unwrap()
            .unwrap();
        units.push((m, u));
    }
    let (m1, u1) = units[0].clone();
    let (m2, u2) = units[1].clone();
    let lesson = session
        .apply(Mutation::AddLesson { module_id: m1.clone(), unit_id: u1.clone() })
        .unwrap()
        .unwrap();
    let version = session.version();

    assert!(session.begin_drag(DragKind::Lesson, ContainerPath::unit(&m1, &u1).at(0)).unwrap());
    let target = DropTarget::Container(ContainerPath::unit(&m2, &u2));
    assert!(session.drop(&target).unwrap());

    let course = session.course();
    assert!(course.unit(&m1, &u1).unwrap().lessons.is_empty());
    assert_eq!(course.unit(&m2, &u2).unwrap().lessons[0].id, lesson);
    assert_eq!(course.lesson_count(), 1);
    assert_eq!(session.version(), version + 1);
    assert_eq!(session.save_state(), SaveState::Saving);
    assert!(notifier.notices().is_empty());
}
