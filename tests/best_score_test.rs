//! Integration test: best score persistence across runs and restarts

mod common;

use std::fs;
use std::process;

use common::{FrameDriver, hover_config, new_game};
use skyhop::{FileScoreStore, GameOver, MemoryScoreStore, ScoreStore};

fn temp_path(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("skyhop-it-{}-{name}.json", process::id()));
    let _ = fs::remove_file(&path);
    path
}

// =============================================================================
// Within a session
// =============================================================================

#[test]
fn test_better_run_replaces_best() {
    let store = MemoryScoreStore::with_best(4);
    let mut game = new_game(hover_config(), store.clone());
    let mut driver = FrameDriver::default();

    let over = driver.play_run(&mut game, 5);
    assert_eq!(
        over,
        GameOver {
            score: 5,
            best: 5,
            new_best: true
        }
    );
    assert_eq!(game.best_score(), 5);
    assert_eq!(store.load_best_score(), 5);
}

#[test]
fn test_worse_run_keeps_best() {
    let store = MemoryScoreStore::with_best(4);
    let mut game = new_game(hover_config(), store.clone());
    let mut driver = FrameDriver::default();

    driver.play_run(&mut game, 5);
    let over = driver.play_run(&mut game, 3);

    assert_eq!(
        over,
        GameOver {
            score: 3,
            best: 5,
            new_best: false
        }
    );
    assert_eq!(store.load_best_score(), 5);
}

#[test]
fn test_equal_score_is_not_a_new_best() {
    let mut game = new_game(hover_config(), MemoryScoreStore::with_best(2));
    let mut driver = FrameDriver::default();

    let over = driver.play_run(&mut game, 2);
    assert!(!over.new_best);
    assert_eq!(over.best, 2);
}

#[test]
fn test_best_never_decreases() {
    let mut game = new_game(hover_config(), MemoryScoreStore::default());
    let mut driver = FrameDriver::default();

    let mut previous_best = game.best_score();
    let mut highest = 0;
    for passes in [2, 0, 3, 1, 3, 4, 0] {
        let over = driver.play_run(&mut game, passes);
        highest = highest.max(passes);

        assert_eq!(over.score, passes);
        assert!(over.best >= previous_best);
        assert_eq!(over.best, highest);
        assert_eq!(over.new_best, passes > previous_best);
        previous_best = over.best;
    }
}

// =============================================================================
// Across restarts
// =============================================================================

#[test]
fn test_memory_store_survives_a_new_game() {
    let store = MemoryScoreStore::with_best(0);
    let mut driver = FrameDriver::default();

    let mut first = new_game(hover_config(), store.clone());
    driver.play_run(&mut first, 2);
    drop(first);

    let second = new_game(hover_config(), store);
    assert_eq!(second.best_score(), 2);
}

#[test]
fn test_file_store_survives_a_new_game() {
    let path = temp_path("restart");
    let mut driver = FrameDriver::default();

    let mut first = new_game(hover_config(), FileScoreStore::at(&path));
    assert_eq!(first.best_score(), 0);
    driver.play_run(&mut first, 3);
    drop(first);

    let mut second = new_game(hover_config(), FileScoreStore::at(&path));
    assert_eq!(second.best_score(), 3);

    // A worse run leaves the file alone.
    let over = driver.play_run(&mut second, 1);
    assert_eq!(over.best, 3);
    assert_eq!(FileScoreStore::at(&path).read().unwrap(), 3);

    fs::remove_file(&path).expect("Failed to remove score file");
}

#[test]
fn test_unreadable_file_starts_from_zero() {
    let path = temp_path("garbage");
    fs::write(&path, "{ \"best_score\": \"lots\" }").unwrap();

    let mut game = new_game(hover_config(), FileScoreStore::at(&path));
    assert_eq!(game.best_score(), 0);

    // The next best overwrites the bad file.
    let mut driver = FrameDriver::default();
    driver.play_run(&mut game, 1);
    assert_eq!(FileScoreStore::at(&path).read().unwrap(), 1);

    fs::remove_file(&path).expect("Failed to remove score file");
}

#[test]
fn test_boxed_store_drives_a_game() {
    let shared = MemoryScoreStore::with_best(1);
    let boxed: Box<dyn ScoreStore> = Box::new(shared.clone());
    let mut game = new_game(hover_config(), boxed);
    let mut driver = FrameDriver::default();

    assert_eq!(game.best_score(), 1);
    driver.play_run(&mut game, 2);
    assert_eq!(shared.load_best_score(), 2);
}
