use speculate2::speculate;

speculate! {
    use board_core::models::*;
    use board_core::{Database, StoreError};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn setup_db() -> Database {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        db
    }

    fn create_test_board(db: &Database, title: &str) -> Board {
        let board = Board::new(Uuid::new_v4(), title);
        db.with_connection(|conn| board.insert(conn))
            .expect("Failed to insert board");
        board
    }

    describe "boards" {
        it "round trips dates, custom fields and assignees" {
            let db = setup_db();
            let mut board = Board::new(Uuid::new_v4(), "Launch");
            board.start_date = Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
            board.custom_fields = r#"{"a":"b"}"#.to_string();
            board.assignee_ids = vec![Uuid::new_v4()];
            db.with_connection(|conn| board.insert(conn)).unwrap();

            let loaded = db.with_connection(|conn| Board::find_by_id(conn, board.id))
                .unwrap()
                .unwrap();

            assert_eq!(loaded.start_date, board.start_date);
            assert_eq!(loaded.due_date, None);
            assert_eq!(loaded.custom_fields, board.custom_fields);
            assert_eq!(loaded.assignee_ids, board.assignee_ids);
        }

        it "returns None for an unknown id" {
            let db = setup_db();
            let found = db.with_connection(|conn| Board::find_by_id(conn, Uuid::new_v4())).unwrap();
            assert!(found.is_none());
        }

        it "update leaves project and creation time alone" {
            let db = setup_db();
            let board = create_test_board(&db, "Before");

            let mut changed = board.clone();
            changed.title = "After".to_string();
            changed.project_id = Uuid::new_v4();
            assert!(db.with_connection(|conn| changed.update(conn)).unwrap());

            let loaded = db.with_connection(|conn| Board::find_by_id(conn, board.id))
                .unwrap()
                .unwrap();
            assert_eq!(loaded.title, "After");
            assert_eq!(loaded.project_id, board.project_id);
        }

        it "loads bound attachments and participants as associations" {
            let db = setup_db();
            let board = create_test_board(&db, "Assoc");
            let other = create_test_board(&db, "Other");

            let mine = Attachment::new_temporary("a.png", "boards/a.png", 10);
            let theirs = Attachment::new_temporary("b.png", "boards/b.png", 10);
            db.with_connection(|conn| {
                mine.insert(conn)?;
                theirs.insert(conn)?;
                Attachment::bind(conn, mine.id, EntityType::Board, board.id)?;
                Attachment::bind(conn, theirs.id, EntityType::Board, other.id)?;
                Participant::new(board.id, Uuid::new_v4()).insert(conn)
            }).unwrap();

            let loaded = db.with_connection(|conn| Board::find_with_associations(conn, board.id))
                .unwrap()
                .unwrap();

            assert_eq!(loaded.attachments.len(), 1);
            assert_eq!(loaded.attachments[0].id, mine.id);
            assert_eq!(loaded.attachments[0].status, AttachmentStatus::Confirmed);
            assert_eq!(loaded.participants.len(), 1);
        }
    }

    describe "participants" {
        it "rejects a second row for the same member" {
            let db = setup_db();
            let board = create_test_board(&db, "Unique");
            let user = Uuid::new_v4();

            db.with_connection(|conn| Participant::new(board.id, user).insert(conn)).unwrap();
            let second = db.with_connection(|conn| Participant::new(board.id, user).insert(conn));

            assert!(matches!(second, Err(StoreError::Conflict(_))));
            let rows = db.with_connection(|conn| Participant::list_by_board(conn, board.id)).unwrap();
            assert_eq!(rows.len(), 1);
        }

        it "delete reports whether a row was removed" {
            let db = setup_db();
            let board = create_test_board(&db, "Delete");
            let participant = Participant::new(board.id, Uuid::new_v4());
            db.with_connection(|conn| participant.insert(conn)).unwrap();

            assert!(db.with_connection(|conn| Participant::delete(conn, participant.id)).unwrap());
            assert!(!db.with_connection(|conn| Participant::delete(conn, participant.id)).unwrap());
        }
    }

    describe "field definitions" {
        it "lists options for the project's fields only" {
            let db = setup_db();
            let project = Uuid::new_v4();
            let status = FieldDefinition::new(project, "Status", FieldType::SingleSelect);
            let foreign = FieldDefinition::new(Uuid::new_v4(), "Status", FieldType::SingleSelect);

            db.with_connection(|conn| {
                status.insert(conn)?;
                foreign.insert(conn)?;
                FieldOption::new(status.id, "Open", 0).insert(conn)?;
                FieldOption::new(status.id, "Closed", 1).insert(conn)?;
                FieldOption::new(foreign.id, "Open", 0).insert(conn)
            }).unwrap();

            let fields = db.with_connection(|conn| FieldDefinition::list_by_project(conn, project)).unwrap();
            let options = db.with_connection(|conn| FieldOption::list_by_project(conn, project)).unwrap();

            assert_eq!(fields.len(), 1);
            assert_eq!(options.len(), 2);
            assert!(options.iter().all(|o| o.field_id == status.id));
        }
    }
}
