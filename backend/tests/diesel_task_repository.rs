//! `DieselTaskRepository` against embedded PostgreSQL.
//!
//! Exercises the constraint mappings the in-memory adapter can only imitate:
//! the board-wide `tasks_title_key`, the `tasks_user_id_fkey` owner key and
//! writes against rows that are gone.

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use embedded_postgres::{Database, database};
use taskboard::domain::ports::{TaskPersistenceError, TaskRepository, UserRepository};
use taskboard::domain::{
    EmailAddress, PasswordHash, Task, TaskFields, TaskId, TaskStatus, User, UserId,
};
use taskboard::outbound::persistence::{DieselTaskRepository, DieselUserRepository};

fn member(email: &str) -> User {
    User::new(
        UserId::random(),
        EmailAddress::new(email).expect("valid email"),
        PasswordHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA").expect("digest"),
    )
}

fn fields(title: &str) -> TaskFields {
    TaskFields {
        title: title.to_owned(),
        content: None,
        status: TaskStatus::Todo,
        deadline: None,
    }
}

fn task_for(owner: &UserId, title: &str) -> Task {
    Task::new(TaskId::random(), *owner, fields(title))
}

struct Board {
    db: Database,
    tasks: DieselTaskRepository,
    ada: UserId,
    bob: UserId,
}

#[fixture]
fn board() -> Option<Board> {
    let db = database()?;
    let users = DieselUserRepository::new(db.pool());
    let (ada, bob) = (member("ada@example.org"), member("bob@example.org"));
    db.block_on(async {
        users.insert(&ada).await?;
        users.insert(&bob).await
    })
    .expect("members are seeded");
    Some(Board {
        tasks: DieselTaskRepository::new(db.pool()),
        ada: *ada.id(),
        bob: *bob.id(),
        db,
    })
}

#[rstest]
fn tasks_round_trip(board: Option<Board>) {
    let Some(board) = board else {
        eprintln!("SKIP-TEST-CLUSTER: tasks_round_trip skipped");
        return;
    };
    let deadline = Utc
        .with_ymd_and_hms(2031, 5, 6, 7, 8, 9)
        .single()
        .expect("valid instant");
    let task = Task::new(
        TaskId::random(),
        board.ada,
        TaskFields {
            title: "Buy milk".to_owned(),
            content: Some("Semi-skimmed".to_owned()),
            status: TaskStatus::Doing,
            deadline: Some(deadline),
        },
    );

    board.db.block_on(async {
        board.tasks.insert(&task).await.expect("insert");
        let by_id = board.tasks.find_by_id(task.id()).await.expect("find by id");
        assert_eq!(by_id.as_ref(), Some(&task));
        let by_title = board.tasks.find_by_title("Buy milk").await.expect("find by title");
        assert_eq!(by_title, Some(task.clone()));
        assert!(
            board
                .tasks
                .list_by_owner(&board.bob)
                .await
                .expect("list")
                .is_empty()
        );
    });
}

#[rstest]
fn titles_are_unique_across_owners(board: Option<Board>) {
    let Some(board) = board else {
        eprintln!("SKIP-TEST-CLUSTER: titles_are_unique_across_owners skipped");
        return;
    };

    board.db.block_on(async {
        board
            .tasks
            .insert(&task_for(&board.ada, "Buy milk"))
            .await
            .expect("first insert");
        let err = board
            .tasks
            .insert(&task_for(&board.bob, "Buy milk"))
            .await
            .expect_err("title is taken");
        assert_eq!(err, TaskPersistenceError::DuplicateTitle);
        assert_eq!(board.tasks.list().await.expect("list").len(), 1);
    });
}

#[rstest]
fn renaming_onto_a_taken_title_is_rejected(board: Option<Board>) {
    let Some(board) = board else {
        eprintln!("SKIP-TEST-CLUSTER: renaming_onto_a_taken_title_is_rejected skipped");
        return;
    };
    let adas = task_for(&board.ada, "Buy milk");
    let bobs = task_for(&board.bob, "Walk dog");

    board.db.block_on(async {
        board.tasks.insert(&adas).await.expect("insert");
        board.tasks.insert(&bobs).await.expect("insert");

        let stolen = bobs.clone().with_fields(fields("Buy milk"));
        let err = board.tasks.update(&stolen).await.expect_err("title is taken");
        assert_eq!(err, TaskPersistenceError::DuplicateTitle);

        let kept = board.tasks.find_by_id(bobs.id()).await.expect("find");
        assert_eq!(kept.map(|task| task.title().to_owned()).as_deref(), Some("Walk dog"));
    });
}

#[rstest]
fn unknown_owner_violates_the_owner_key(board: Option<Board>) {
    let Some(board) = board else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_owner_violates_the_owner_key skipped");
        return;
    };

    board.db.block_on(async {
        let err = board
            .tasks
            .insert(&task_for(&UserId::random(), "Orphan"))
            .await
            .expect_err("owner does not exist");
        assert_eq!(err, TaskPersistenceError::UnknownOwner);
    });
}

#[rstest]
fn vanished_tasks_are_reported(board: Option<Board>) {
    let Some(board) = board else {
        eprintln!("SKIP-TEST-CLUSTER: vanished_tasks_are_reported skipped");
        return;
    };
    let task = task_for(&board.ada, "Tidy desk");

    board.db.block_on(async {
        board.tasks.insert(&task).await.expect("insert");
        assert!(board.tasks.delete(task.id()).await.expect("delete"));
        assert!(!board.tasks.delete(task.id()).await.expect("second delete"));

        let err = board.tasks.update(&task).await.expect_err("row is gone");
        assert_eq!(err, TaskPersistenceError::Missing);
    });
}
