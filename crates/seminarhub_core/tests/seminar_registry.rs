use rusqlite::Connection;
use seminarhub_core::db::open_db_in_memory;
use seminarhub_core::{
    Requester, SeminarField, SeminarForm, SeminarService, SeminarServiceError,
    SqliteCategoryRepository, SqliteSeminarRepository, Violation,
};

type Service<'conn> = SeminarService<SqliteSeminarRepository<'conn>, SqliteCategoryRepository<'conn>>;

fn service(conn: &Connection) -> Service<'_> {
    SeminarService::new(
        SqliteSeminarRepository::try_new(conn).unwrap(),
        SqliteCategoryRepository::try_new(conn).unwrap(),
    )
}

fn organizer() -> Requester {
    Requester::new("user-organizer", "olga@example.com")
}

fn intruder() -> Requester {
    Requester::new("user-intruder", "ivan@example.com")
}

fn rust_form() -> SeminarForm {
    SeminarForm {
        topic: "Intro to Rust".to_string(),
        lecturer: "Jane Doe".to_string(),
        details: "A ten-week overview of systems programming.".to_string(),
        date_and_time: "10/09/2025 18:00".to_string(),
        duration: 90,
        category_id: 1,
    }
}

fn seminar_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM seminars;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_then_get_details_roundtrips_form_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.create(&rust_form(), &organizer()).unwrap();
    assert_eq!(created.organizer_id, "user-organizer");

    let detail = service.get_details(created.id).unwrap();
    assert_eq!(detail.id, created.id);
    assert_eq!(detail.topic, "Intro to Rust");
    assert_eq!(detail.lecturer, "Jane Doe");
    assert_eq!(
        detail.details,
        "A ten-week overview of systems programming."
    );
    assert_eq!(detail.date_and_time, "10/09/2025 18:00");
    assert_eq!(detail.duration, 90);
    assert_eq!(detail.category, "Technology");
    assert_eq!(detail.organizer, "olga@example.com");
}

#[test]
fn list_all_resolves_names_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let first = service.create(&rust_form(), &organizer()).unwrap();
    let mut second_form = rust_form();
    second_form.topic = "Quarterly budgeting".to_string();
    second_form.category_id = 2;
    let second = service.create(&second_form, &intruder()).unwrap();

    let all = service.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[0].category, "Technology");
    assert_eq!(all[0].organizer, "olga@example.com");
    assert_eq!(all[0].date_and_time, "10/09/2025 18:00");
    assert_eq!(all[1].id, second.id);
    assert_eq!(all[1].category, "Business");
    assert_eq!(all[1].organizer, "ivan@example.com");
}

#[test]
fn create_rejects_invalid_form_without_persisting() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let form = SeminarForm {
        topic: "Go".to_string(),
        lecturer: "Al".to_string(),
        details: "too short".to_string(),
        date_and_time: "2025-09-10 18:00".to_string(),
        duration: 10,
        category_id: 77,
    };

    match service.create(&form, &organizer()).unwrap_err() {
        SeminarServiceError::Validation(errors) => {
            assert_eq!(errors.len(), 6);
            assert!(errors.has(SeminarField::DateAndTime));
            assert!(errors.has(SeminarField::CategoryId));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(seminar_count(&conn), 0);
}

#[test]
fn duration_boundaries_are_inclusive() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for (duration, accepted) in [(29, false), (30, true), (180, true), (181, false)] {
        let mut form = rust_form();
        form.duration = duration;
        let result = service.create(&form, &organizer());
        assert_eq!(result.is_ok(), accepted, "duration {duration}");
        if let Err(SeminarServiceError::Validation(errors)) = result {
            assert_eq!(
                errors.for_field(SeminarField::Duration).next(),
                Some(&Violation::DurationRange {
                    min: 30,
                    max: 180,
                    actual: duration
                })
            );
        }
    }
    assert_eq!(seminar_count(&conn), 2);
}

#[test]
fn text_length_boundaries_are_inclusive() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let cases = [
        (SeminarField::Topic, 3, 100),
        (SeminarField::Lecturer, 5, 60),
        (SeminarField::Details, 10, 500),
    ];
    let mut accepted_count = 0;
    for (field, min, max) in cases {
        for (actual, accepted) in [(min, true), (max, true), (max + 1, false)] {
            let mut form = rust_form();
            let value = "x".repeat(actual);
            match field {
                SeminarField::Topic => form.topic = value,
                SeminarField::Lecturer => form.lecturer = value,
                SeminarField::Details => form.details = value,
                _ => unreachable!(),
            }

            let result = service.create(&form, &organizer());
            assert_eq!(result.is_ok(), accepted, "{} length {actual}", field.as_str());
            match result {
                Ok(_) => accepted_count += 1,
                Err(SeminarServiceError::Validation(errors)) => {
                    assert_eq!(errors.len(), 1);
                    assert_eq!(
                        errors.for_field(field).next(),
                        Some(&Violation::Length { min, max, actual })
                    );
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
    assert_eq!(seminar_count(&conn), accepted_count);
    assert_eq!(accepted_count, 6);
}

#[test]
fn control_characters_are_rejected_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let mut form = rust_form();
    form.topic = "a\0bcd".to_string();
    let err = service.create(&form, &organizer()).unwrap_err();
    assert!(matches!(
        err,
        SeminarServiceError::Validation(ref errors)
            if errors.for_field(SeminarField::Topic).next() == Some(&Violation::ControlCharacter)
    ));
    assert_eq!(seminar_count(&conn), 0);

    let created = service.create(&rust_form(), &organizer()).unwrap();
    let mut edit = rust_form();
    edit.details = "Ten chars\0 and more".to_string();
    assert!(matches!(
        service.update(created.id, &edit, "user-organizer").unwrap_err(),
        SeminarServiceError::Validation(ref errors) if errors.has(SeminarField::Details)
    ));
    assert_eq!(service.get_details(created.id).unwrap().details, rust_form().details);
}

#[test]
fn year_zero_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let mut form = rust_form();
    form.date_and_time = "01/01/0000 10:00".to_string();
    assert!(matches!(
        service.create(&form, &organizer()).unwrap_err(),
        SeminarServiceError::Validation(ref errors)
            if errors.for_field(SeminarField::DateAndTime).next() == Some(&Violation::DateTimeFormat)
    ));
    assert_eq!(seminar_count(&conn), 0);
}

#[test]
fn impossible_calendar_date_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let mut form = rust_form();
    form.date_and_time = "31/02/2025 10:00".to_string();
    let err = service.create(&form, &organizer()).unwrap_err();
    assert!(matches!(
        err,
        SeminarServiceError::Validation(ref errors)
            if errors.for_field(SeminarField::DateAndTime).next() == Some(&Violation::DateTimeFormat)
    ));
    assert!(err.to_string().contains("dd/MM/yyyy HH:mm"));
}

#[test]
fn anonymous_requester_cannot_create() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .create(&rust_form(), &Requester::new("", "nobody"))
        .unwrap_err();
    assert!(matches!(err, SeminarServiceError::Unauthenticated));
    assert_eq!(seminar_count(&conn), 0);
}

#[test]
fn organizer_update_overwrites_every_field() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&rust_form(), &organizer()).unwrap();

    let form = SeminarForm {
        topic: "Advanced Rust".to_string(),
        lecturer: "John Roe".to_string(),
        details: "Lifetimes, traits and async in depth.".to_string(),
        date_and_time: "01/12/2025 09:30".to_string(),
        duration: 180,
        category_id: 3,
    };
    let updated = service
        .update(created.id, &form, "user-organizer")
        .unwrap();
    assert_eq!(updated.organizer_id, "user-organizer");

    let detail = service.get_details(created.id).unwrap();
    assert_eq!(detail.topic, "Advanced Rust");
    assert_eq!(detail.lecturer, "John Roe");
    assert_eq!(detail.details, "Lifetimes, traits and async in depth.");
    assert_eq!(detail.date_and_time, "01/12/2025 09:30");
    assert_eq!(detail.duration, 180);
    assert_eq!(detail.category, "Science");
    assert_eq!(detail.organizer, "olga@example.com");
}

#[test]
fn non_organizer_update_is_unauthorized_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&rust_form(), &organizer()).unwrap();

    let mut form = rust_form();
    form.topic = "Hijacked".to_string();
    let err = service
        .update(created.id, &form, "user-intruder")
        .unwrap_err();
    assert!(matches!(
        err,
        SeminarServiceError::Unauthorized { seminar_id, ref requester_id }
            if seminar_id == created.id && requester_id == "user-intruder"
    ));

    assert_eq!(service.get_details(created.id).unwrap().topic, "Intro to Rust");
}

#[test]
fn non_organizer_with_invalid_form_is_still_unauthorized() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&rust_form(), &organizer()).unwrap();

    let mut form = rust_form();
    form.duration = 5;
    let err = service
        .update(created.id, &form, "user-intruder")
        .unwrap_err();
    assert!(matches!(err, SeminarServiceError::Unauthorized { .. }));
}

#[test]
fn organizer_update_with_invalid_form_keeps_stored_values() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&rust_form(), &organizer()).unwrap();

    let mut form = rust_form();
    form.topic = "Renamed".to_string();
    form.date_and_time = "10/9/2025 18:00".to_string();
    let err = service
        .update(created.id, &form, "user-organizer")
        .unwrap_err();
    assert!(matches!(err, SeminarServiceError::Validation(_)));
    assert_eq!(service.get_details(created.id).unwrap().topic, "Intro to Rust");
}

#[test]
fn update_and_delete_of_missing_seminar_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    assert!(matches!(
        service.update(404, &rust_form(), "user-organizer").unwrap_err(),
        SeminarServiceError::NotFound(404)
    ));
    assert!(matches!(
        service.delete(404, "user-organizer").unwrap_err(),
        SeminarServiceError::NotFound(404)
    ));
    assert!(matches!(
        service.get_details(404).unwrap_err(),
        SeminarServiceError::NotFound(404)
    ));
}

#[test]
fn non_organizer_delete_is_unauthorized_and_keeps_seminar() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&rust_form(), &organizer()).unwrap();

    let err = service.delete(created.id, "user-intruder").unwrap_err();
    assert!(matches!(err, SeminarServiceError::Unauthorized { .. }));
    assert!(service.get_details(created.id).is_ok());
}

#[test]
fn organizer_delete_removes_seminar() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&rust_form(), &organizer()).unwrap();

    service.delete(created.id, "user-organizer").unwrap();
    assert!(matches!(
        service.get_details(created.id).unwrap_err(),
        SeminarServiceError::NotFound(_)
    ));
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn forms_are_prefilled_for_create_and_edit() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let empty = service.new_form().unwrap();
    assert_eq!(empty.form, SeminarForm::default());
    assert_eq!(empty.categories.len(), 4);
    assert!(empty.errors.is_empty());

    let created = service.create(&rust_form(), &organizer()).unwrap();
    let edit = service.edit_form(created.id, "user-organizer").unwrap();
    assert_eq!(edit.form, rust_form());
    assert_eq!(edit.categories.len(), 4);

    assert!(matches!(
        service.edit_form(created.id, "user-intruder").unwrap_err(),
        SeminarServiceError::Unauthorized { .. }
    ));
}

#[test]
fn rejected_form_is_rerendered_with_errors() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let mut form = rust_form();
    form.duration = 0;
    let errors = match service.create(&form, &organizer()).unwrap_err() {
        SeminarServiceError::Validation(errors) => errors,
        other => panic!("unexpected error: {other}"),
    };

    let view = service.form_with_errors(form.clone(), errors).unwrap();
    assert_eq!(view.form, form);
    assert_eq!(view.categories.len(), 4);
    assert!(view.errors.has(SeminarField::Duration));
}

#[test]
fn delete_preview_requires_ownership() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&rust_form(), &organizer()).unwrap();

    let preview = service.delete_preview(created.id, "user-organizer").unwrap();
    assert_eq!(preview.id, created.id);
    assert_eq!(preview.topic, "Intro to Rust");
    assert_eq!(preview.date_and_time, "10/09/2025 18:00");

    assert!(matches!(
        service.delete_preview(created.id, "user-intruder").unwrap_err(),
        SeminarServiceError::Unauthorized { .. }
    ));
}

#[test]
fn organizer_display_name_follows_identity_provider() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service.create(&rust_form(), &organizer()).unwrap();

    let renamed = Requester::new("user-organizer", "olga.new@example.com");
    service.create(&rust_form(), &renamed).unwrap();

    let all = service.list_all().unwrap();
    assert!(all
        .iter()
        .all(|summary| summary.organizer == "olga.new@example.com"));
}

#[test]
fn summaries_serialize_with_wire_date_format() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service.create(&rust_form(), &organizer()).unwrap();

    let json = serde_json::to_value(service.list_all().unwrap()).unwrap();
    assert_eq!(json[0]["date_and_time"], "10/09/2025 18:00");
    assert_eq!(json[0]["category"], "Technology");
}
