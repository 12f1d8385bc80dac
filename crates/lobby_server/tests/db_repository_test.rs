//! Tests for database repository operations.

use tempfile::NamedTempFile;

use lobby_games::{FieldError, GameErrorKind, GameStatus};
use lobby_server::{
    GameFilter, GameRepository, NewGame, NewUser, RepoError, SEED_LOGIN, User, seed,
};

const EMPTY_FIELD: &str = "[null,null,null,null,null,null,null,null,null]";
const PLAYED_FIELD: &str = r#"["X",null,"O",null,null,null,null,null,null]"#;
const WON_FIELD: &str = r#"["X","X","X","O","O",null,null,null,null]"#;

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

fn create_user(repo: &GameRepository, id: &str, login: &str, rating: i32) -> User {
    repo.create_user(NewUser::new(
        id.to_string(),
        login.to_string(),
        "hash".to_string(),
        rating,
    ))
    .expect("Create user failed")
}

fn create_game(
    repo: &GameRepository,
    id: &str,
    status: &str,
    field: Option<&str>,
    winner: Option<&str>,
    players: &[&str],
) {
    let game = NewGame::new(
        id.to_string(),
        status.to_string(),
        field.map(str::to_string),
        winner.map(str::to_string),
    );
    let player_ids: Vec<String> = players.iter().map(|p| p.to_string()).collect();
    repo.create_game(game, &player_ids)
        .expect("Create game failed");
}

/// Two users and one game per status: g1 idle, g2 in progress, g3 won, g4 drawn.
fn populate(repo: &GameRepository) {
    create_user(repo, "u1", "ann", 1000);
    create_user(repo, "u2", "ben", 1200);
    create_user(repo, "u3", "cat", 800);

    create_game(repo, "g1", "idle", Some(EMPTY_FIELD), None, &["u1"]);
    create_game(repo, "g2", "inProgress", Some(PLAYED_FIELD), None, &["u2", "u1"]);
    create_game(repo, "g3", "gameOver", Some(WON_FIELD), Some("u1"), &["u1", "u3"]);
    create_game(repo, "g4", "gameOverDraw", Some(PLAYED_FIELD), None, &["u3", "u2"]);
}

fn mapping_error(result: Result<Vec<lobby_games::GameEntity>, RepoError>) -> lobby_games::GameError {
    match result {
        Err(RepoError::Mapping(err)) => err,
        other => panic!("Expected mapping error, got {:?}", other),
    }
}

#[test]
fn test_new_repository_rejects_empty_path() {
    assert!(GameRepository::new("  ".to_string()).is_err());
}

#[test]
fn test_list_games_empty() {
    let (_db, repo) = setup_test_db();
    let games = repo.list_games(&GameFilter::all()).expect("List failed");
    assert!(games.is_empty());
}

#[test]
fn test_list_games_maps_every_status_in_storage_order() {
    let (_db, repo) = setup_test_db();
    populate(&repo);

    let games = repo.list_games(&GameFilter::all()).expect("List failed");
    let ids: Vec<&str> = games.iter().map(|g| g.id()).collect();
    assert_eq!(ids, ["g1", "g2", "g3", "g4"]);

    let statuses: Vec<GameStatus> = games.iter().map(|g| g.status()).collect();
    assert_eq!(
        statuses,
        [
            GameStatus::Idle,
            GameStatus::InProgress,
            GameStatus::GameOver,
            GameStatus::GameOverDraw
        ]
    );

    assert!(games[0].field().is_none());
    assert!(games[1].field().is_some());
    assert_eq!(games[2].winner().map(|w| w.login().as_str()), Some("ann"));
    assert!(games[3].winner().is_none());
}

#[test]
fn test_list_games_keeps_seat_order() {
    let (_db, repo) = setup_test_db();
    populate(&repo);

    let game = repo
        .get_game("g2")
        .expect("Lookup failed")
        .expect("Game missing");
    let logins: Vec<&str> = game.players().iter().map(|p| p.login().as_str()).collect();
    assert_eq!(logins, ["ben", "ann"]);
    assert_eq!(*game.players()[0].rating(), 1200);
}

#[test]
fn test_list_games_filters_by_status() {
    let (_db, repo) = setup_test_db();
    populate(&repo);

    let idle = repo.list_games(&GameFilter::idle()).expect("List failed");
    assert_eq!(idle.len(), 1);
    assert_eq!(idle[0].id(), "g1");

    let drawn = repo
        .list_games(&GameFilter::all().with_status(GameStatus::GameOverDraw))
        .expect("List failed");
    assert_eq!(drawn.len(), 1);
    assert_eq!(drawn[0].id(), "g4");
}

#[test]
fn test_list_games_filters_by_player() {
    let (_db, repo) = setup_test_db();
    populate(&repo);

    let games = repo
        .list_games(&GameFilter::all().with_player("u3"))
        .expect("List failed");
    let ids: Vec<&str> = games.iter().map(|g| g.id()).collect();
    assert_eq!(ids, ["g3", "g4"]);

    let finished = repo
        .list_games(
            &GameFilter::all()
                .with_player("u3")
                .with_status(GameStatus::GameOver),
        )
        .expect("List failed");
    assert_eq!(finished.len(), 1);

    let nobody = repo
        .list_games(&GameFilter::all().with_player("missing"))
        .expect("List failed");
    assert!(nobody.is_empty());
}

#[test]
fn test_list_idle_games_exposes_creator() {
    let (_db, repo) = setup_test_db();
    populate(&repo);

    let idle = repo.list_idle_games().expect("List failed");
    assert_eq!(idle.len(), 1);
    assert_eq!(idle[0].creator().login(), "ann");
    assert_eq!(*idle[0].creator().rating(), 1000);
}

#[test]
fn test_list_idle_games_keeps_every_idle_game() {
    let (_db, repo) = setup_test_db();
    populate(&repo);
    create_game(&repo, "g5", "idle", None, None, &["u2", "u3"]);

    let idle = repo.list_idle_games().expect("List failed");
    let ids: Vec<&str> = idle.iter().map(|game| game.id().as_str()).collect();
    assert_eq!(ids, ["g1", "g5"]);
    assert_eq!(idle[1].creator().login(), "ben");
    assert_eq!(idle[1].players().len(), 2);
}

#[test]
fn test_one_bad_record_fails_the_listing() {
    let (_db, repo) = setup_test_db();
    populate(&repo);
    create_game(&repo, "g5", "gameOver", Some(WON_FIELD), None, &["u1", "u2"]);

    let err = mapping_error(repo.list_games(&GameFilter::all()));
    assert_eq!(err.kind, GameErrorKind::MissingWinner);
    assert_eq!(err.game_id, "g5");

    // Rows outside the filter are never mapped.
    let idle = repo.list_games(&GameFilter::idle()).expect("List failed");
    assert_eq!(idle.len(), 1);
}

#[test]
fn test_idle_game_without_players_fails() {
    let (_db, repo) = setup_test_db();
    create_game(&repo, "g1", "idle", Some(EMPTY_FIELD), None, &[]);

    let err = mapping_error(repo.list_games(&GameFilter::all()));
    assert_eq!(err.kind, GameErrorKind::MissingCreator);
}

#[test]
fn test_unknown_stored_status_fails() {
    let (_db, repo) = setup_test_db();
    create_user(&repo, "u1", "ann", 1000);
    create_game(&repo, "g1", "abandoned", Some(EMPTY_FIELD), None, &["u1"]);

    let err = mapping_error(repo.list_games(&GameFilter::all()));
    assert_eq!(err.kind, GameErrorKind::UnhandledStatus("abandoned".to_string()));
}

#[test]
fn test_non_json_field_fails() {
    let (_db, repo) = setup_test_db();
    create_user(&repo, "u1", "ann", 1000);
    create_game(&repo, "g1", "inProgress", Some("X,O,,,,,,,"), None, &["u1"]);

    let err = mapping_error(repo.list_games(&GameFilter::all()));
    assert!(matches!(
        err.kind,
        GameErrorKind::InvalidField(FieldError::Malformed(_))
    ));
    assert_eq!(err.game_id, "g1");
}

#[test]
fn test_non_json_field_ignored_for_idle_game() {
    let (_db, repo) = setup_test_db();
    create_user(&repo, "u1", "ann", 1000);
    create_game(&repo, "g1", "idle", Some("not json"), None, &["u1"]);

    let games = repo.list_games(&GameFilter::all()).expect("List failed");
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].status(), GameStatus::Idle);
    assert!(games[0].field().is_none());

    let idle = repo.list_idle_games().expect("List failed");
    assert_eq!(idle[0].creator().login(), "ann");
}

#[test]
fn test_non_json_field_does_not_hide_missing_winner() {
    let (_db, repo) = setup_test_db();
    create_user(&repo, "u1", "ann", 1000);
    create_game(&repo, "g1", "gameOver", Some("not json"), None, &["u1"]);

    let err = mapping_error(repo.list_games(&GameFilter::all()));
    assert_eq!(err.kind, GameErrorKind::MissingWinner);
    assert!(err.is_data_integrity());
}

#[test]
fn test_non_json_field_does_not_hide_unknown_status() {
    let (_db, repo) = setup_test_db();
    create_user(&repo, "u1", "ann", 1000);
    create_game(&repo, "g1", "abandoned", Some("not json"), None, &["u1"]);

    let err = mapping_error(repo.list_games(&GameFilter::all()));
    assert_eq!(err.kind, GameErrorKind::UnhandledStatus("abandoned".to_string()));

    let found = repo.get_game("g1");
    assert!(matches!(
        found,
        Err(RepoError::Mapping(ref err))
            if err.kind == GameErrorKind::UnhandledStatus("abandoned".to_string())
    ));
}

#[test]
fn test_short_field_fails() {
    let (_db, repo) = setup_test_db();
    create_user(&repo, "u1", "ann", 1000);
    create_game(&repo, "g1", "inProgress", Some(r#"["X","O"]"#), None, &["u1"]);

    let err = mapping_error(repo.list_games(&GameFilter::all()));
    assert_eq!(
        err.kind,
        GameErrorKind::InvalidField(FieldError::WrongLength(2))
    );
}

#[test]
fn test_get_game_not_found() {
    let (_db, repo) = setup_test_db();
    assert!(repo.get_game("nope").expect("Lookup failed").is_none());
}

#[test]
fn test_create_game_with_unknown_player_writes_nothing() {
    let (_db, repo) = setup_test_db();
    let game = NewGame::new(
        "g1".to_string(),
        "idle".to_string(),
        Some(EMPTY_FIELD.to_string()),
        None,
    );
    let result = repo.create_game(game, &["ghost".to_string()]);
    assert!(result.is_err(), "Unknown player should fail");

    assert!(repo.get_game("g1").expect("Lookup failed").is_none());
}

#[test]
fn test_create_user_duplicate_login_fails() {
    let (_db, repo) = setup_test_db();
    create_user(&repo, "u1", "ann", 1000);
    let result = repo.create_user(NewUser::generated(
        "ann".to_string(),
        "hash".to_string(),
        900,
    ));
    assert!(result.is_err(), "Duplicate login should fail");
}

#[test]
fn test_seed_creates_user_and_two_idle_games() {
    let (_db, repo) = setup_test_db();

    let summary = seed(&repo).expect("Seed failed");
    assert_eq!(summary.user().login(), SEED_LOGIN);
    assert_eq!(*summary.user().rating(), 1000);
    assert_eq!(summary.game_ids().len(), 2);

    let idle = repo.list_idle_games().expect("List failed");
    assert_eq!(idle.len(), 2);
    for game in &idle {
        assert_eq!(game.creator().login(), SEED_LOGIN);
        assert_eq!(game.players().len(), 1);
    }
}

#[test]
fn test_seed_twice_reuses_user() {
    let (_db, repo) = setup_test_db();

    let first = seed(&repo).expect("Seed failed");
    let second = seed(&repo).expect("Seed failed");
    assert_eq!(first.user().id(), second.user().id());

    let games = repo.list_games(&GameFilter::all()).expect("List failed");
    assert_eq!(games.len(), 4);
}
