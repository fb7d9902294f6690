// Integration tests for replay, animation and the session guards

use std::time::Duration;

use hanoi_tty::animation::{AnimationRecord, Point, Scheduler};
use hanoi_tty::config::Config;
use hanoi_tty::errors::HanoiError;
use hanoi_tty::model::{Peg, VisualPegs};
use hanoi_tty::session::Session;

/// Tick the session on its frame clock until nothing is moving
async fn play_until_settled(session: &mut Session) -> usize {
    let frame = session.config().frame_interval();
    let mut frames = 0;
    while !session.is_settled() {
        tokio::time::sleep(frame).await;
        session.tick();
        frames += 1;
        assert!(frames < 200_000, "playback never settled");
    }
    frames
}

fn assert_visual_well_formed(visual: &VisualPegs, disks: u32) {
    let mut all: Vec<u32> = Vec::new();
    for peg in Peg::ALL {
        let stack = visual.disks(peg);
        assert!(
            stack.windows(2).all(|pair| pair[0] > pair[1]),
            "peg {} out of order: {:?}",
            peg,
            stack
        );
        all.extend_from_slice(stack);
    }
    all.sort_unstable();
    assert_eq!(all, (1..=disks).collect::<Vec<_>>());
}

#[test]
fn test_scheduler_lands_record_exactly() {
    let mut visual = VisualPegs::new(0, Peg::Left);
    let mut scheduler = Scheduler::new(10);
    let id = scheduler.insert(AnimationRecord::new(
        3,
        Peg::Left,
        Peg::Middle,
        Point::new(200, 100),
        Point::new(500, 180),
        100 - 30,
        10,
    ));

    let mut final_position = None;
    let mut ticks = 0;
    while let Some(record) = scheduler.get(id) {
        final_position = Some(record.current);
        scheduler.advance(&mut visual);
        ticks += 1;
        assert!(ticks < 1000);
    }

    assert_eq!(final_position, Some(Point::new(500, 180)));
    assert_eq!(visual.disks(Peg::Middle), &[3]);
    assert!(visual.disks(Peg::Left).is_empty());
    assert!(visual.disks(Peg::Right).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_full_replay_matches_logical_state() {
    let mut session = Session::new(Config {
        disks: 4,
        ..Config::default()
    });
    session.visualize().unwrap();
    assert!(session.is_replaying());

    play_until_settled(&mut session).await;

    for peg in Peg::ALL {
        assert_eq!(session.visual().disks(peg), session.logical().peg(peg));
    }
    assert_eq!(session.visual().disks(Peg::Right), &[4, 3, 2, 1]);
    assert_eq!(session.caption(), "#16. Solved");
    assert_eq!(session.shown(), 15);
    assert_eq!(session.scheduler().landed_total(), 15);
}

#[tokio::test(start_paused = true)]
async fn test_replay_with_slow_disks_and_fast_pacing() {
    // Disks take far longer to travel than the delay between moves
    let mut session = Session::new(Config {
        disks: 5,
        speed: 3,
        delay: Duration::from_millis(5),
        ..Config::default()
    });
    session.visualize().unwrap();
    play_until_settled(&mut session).await;

    assert_eq!(session.visual().disks(Peg::Right), &[5, 4, 3, 2, 1]);
    assert_eq!(session.scheduler().landed_total(), 31);
}

#[tokio::test(start_paused = true)]
async fn test_requests_rejected_while_replaying() {
    let mut session = Session::new(Config::default());
    session.visualize().unwrap();

    let rejected = |result: Result<(), HanoiError>| {
        matches!(
            result,
            Err(HanoiError::ConcurrentOperationRejected { .. })
        )
    };
    assert!(rejected(session.visualize()));
    assert!(rejected(session.solve().map(|_| ())));
    assert!(rejected(session.reset()));
    assert!(rejected(session.set_disk_count("5").map(|_| ())));
    assert_eq!(session.config().disks, 3);

    play_until_settled(&mut session).await;
    assert!(session.visualize().is_ok());
    play_until_settled(&mut session).await;
}

#[tokio::test(start_paused = true)]
async fn test_visualize_reuses_existing_solution() {
    let mut session = Session::new(Config::default());
    session.solve().unwrap();
    let log_lines = session.log().len();

    session.visualize().unwrap();
    assert_eq!(session.log().len(), log_lines);
    assert_eq!(session.ledger().counter(), 7);
    play_until_settled(&mut session).await;
}

#[tokio::test(start_paused = true)]
async fn test_cancel_lets_in_flight_disks_land() {
    let mut session = Session::new(Config {
        disks: 6,
        ..Config::default()
    });
    session.visualize().unwrap();

    let frame = session.config().frame_interval();
    for _ in 0..30 {
        tokio::time::sleep(frame).await;
        session.tick();
    }

    assert!(session.cancel());
    assert!(!session.is_replaying());
    assert_eq!(session.caption(), "Cancelled");
    assert_eq!(session.scheduler().pending_len(), 0);

    play_until_settled(&mut session).await;
    assert_visual_well_formed(session.visual(), 6);
    assert!(session.scheduler().landed_total() < 63);

    // A fresh replay starts from the canonical position again
    session.visualize().unwrap();
    assert_eq!(session.visual().disks(Peg::Left), &[6, 5, 4, 3, 2, 1]);
    session.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_replay_to_middle_peg() {
    let mut session = Session::new(Config {
        target: Peg::Middle,
        ..Config::default()
    });
    session.visualize().unwrap();
    play_until_settled(&mut session).await;

    assert_eq!(session.visual().disks(Peg::Middle), &[3, 2, 1]);
}
