//! Runtime tests: a game driven through [`GameHandle`] while the worker owns
//! the state on its own task.

use avalon_core::{
    ActionResult, Alignment, Character, ErrorCategory, FixedOrder, GameError, GameSetup, Mode,
    PlayerId, VoteOutcome,
};
use avalon_runtime::{
    Event, GameHandle, GameStateEvent, LedgerEvent, Runtime, RuntimeConfig, RuntimeError, Topic,
};

const FIVE: [&str; 5] = ["ann", "bob", "cat", "dee", "eve"];

/// ann=Morgana bob=Assassin cat=Merlin dee=Percival eve=Knight, ann leads.
async fn scripted_runtime() -> Runtime {
    let state = GameSetup::new(FIVE)
        .with_rng(FixedOrder)
        .build()
        .expect("five players deal");
    Runtime::builder()
        .initial_state(state)
        .build()
        .await
        .expect("runtime starts")
}

async fn approve_team(handle: &GameHandle, team: &[&str]) {
    let leader = handle
        .status()
        .current_turn_player
        .expect("leader exists")
        .to_string();
    handle
        .propose_team(leader, team.iter().copied())
        .await
        .expect("proposal accepted");
    for player in FIVE {
        handle.cast_vote(player, true).await.expect("vote accepted");
    }
}

async fn clean_mission(handle: &GameHandle, team: &[&str]) {
    approve_team(handle, team).await;
    for &member in team {
        handle
            .perform_mission_action(member, true)
            .await
            .expect("mission action accepted");
    }
}

#[tokio::test]
async fn builds_from_players_and_seed() {
    let runtime = Runtime::builder()
        .players(FIVE)
        .config(RuntimeConfig {
            seed: Some(7),
            ..RuntimeConfig::default()
        })
        .build()
        .await
        .expect("runtime starts");
    let handle = runtime.handle();

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.game_seed, 7);
    assert_eq!(snapshot.player_count(), 5);
    assert_eq!(handle.current_mode(), Mode::Proposal);
    assert_eq!(handle.params().mission_sizes, [2, 3, 2, 3, 3]);

    let again = GameSetup::new(FIVE).with_seed(7).build().expect("deal");
    assert_eq!(*snapshot, again);

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn builder_reports_setup_problems() {
    let err = Runtime::builder().build().await.err().expect("no players");
    assert!(matches!(err, RuntimeError::MissingPlayers));

    let err = Runtime::builder()
        .players(["ann", "bob", "cat", "dee"])
        .build()
        .await
        .err()
        .expect("too few players");
    assert_eq!(
        err.game_error().map(|e| e.category()),
        Some(ErrorCategory::Configuration)
    );

    let err = Runtime::builder()
        .players(FIVE)
        .roles(["merlin", "jester", "knight", "assassin", "morgana"])
        .build()
        .await
        .err()
        .expect("unknown role");
    assert_eq!(
        err.game_error().map(|e| e.error_code()),
        Some("SETUP_UNKNOWN_CHARACTER")
    );
}

#[tokio::test]
async fn plays_to_an_assassination() {
    let runtime = scripted_runtime().await;
    let handle = runtime.handle();

    clean_mission(&handle, &["cat", "dee"]).await;
    clean_mission(&handle, &["cat", "dee", "eve"]).await;
    clean_mission(&handle, &["dee", "eve"]).await;
    assert_eq!(handle.current_mode(), Mode::Assassination);

    let err = handle.results().unwrap_err();
    assert_eq!(err.game_error().map(|e| e.category()), Some(ErrorCategory::Phase));

    let result = handle.assassinate("bob", "cat").await.expect("assassination");
    assert!(matches!(
        result,
        ActionResult::Assassination(outcome) if outcome.target_was_merlin
    ));

    let results = handle.results().expect("game over");
    assert_eq!(results.winner, Alignment::Evil);
    assert_eq!(results.roles[2], (PlayerId::from("cat"), Character::Merlin));
    assert_eq!(results.log.len(), handle.snapshot().ledger.len());

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn rejected_operations_leave_the_game_untouched() {
    let runtime = scripted_runtime().await;
    let handle = runtime.handle();
    let before = handle.query_state().await.expect("query");

    let err = handle
        .propose_team("bob", ["cat", "dee"])
        .await
        .unwrap_err();
    assert_eq!(err.game_error().map(|e| e.category()), Some(ErrorCategory::Turn));

    let err = handle.cast_vote("ann", true).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Execute(_)));
    assert_eq!(err.game_error().map(|e| e.category()), Some(ErrorCategory::Phase));

    assert_eq!(handle.query_state().await.expect("query"), before);
    assert_eq!(handle.snapshot().nonce, 0);

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn concurrent_voters_are_serialized() {
    let runtime = scripted_runtime().await;
    let handle = runtime.handle();
    handle
        .propose_team("ann", ["cat", "dee"])
        .await
        .expect("proposal");

    let voters: Vec<_> = FIVE
        .into_iter()
        .map(|player| {
            let handle = handle.clone();
            tokio::spawn(async move { handle.cast_vote(player, player != "ann").await })
        })
        .collect();

    let mut approved = 0;
    let mut pending = 0;
    for voter in voters {
        match voter.await.expect("voter task").expect("vote accepted") {
            ActionResult::Vote(VoteOutcome::Approved { approvals, total }) => {
                assert_eq!((approvals, total), (4, 5));
                approved += 1;
            }
            ActionResult::Vote(VoteOutcome::Pending { .. }) => pending += 1,
            other => panic!("unexpected vote result {other:?}"),
        }
    }

    // Exactly one vote completes the tally, whichever arrived last.
    assert_eq!((approved, pending), (1, 4));
    assert_eq!(handle.current_mode(), Mode::Mission);
    assert_eq!(handle.snapshot().nonce, 6);

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn views_hide_other_players_choices() {
    let runtime = scripted_runtime().await;
    let handle = runtime.handle();
    handle
        .propose_team("ann", ["cat", "dee"])
        .await
        .expect("proposal");
    handle.cast_vote("bob", false).await.expect("vote");

    let bob = handle.player_view("bob").expect("bob plays");
    assert_eq!(bob.own_vote, Some(false));
    assert_eq!(bob.status.votes_cast, 1);
    assert!(!bob.on_team);

    let cat = handle.player_view("cat").expect("cat plays");
    assert_eq!(cat.own_vote, None);
    assert!(cat.on_team);
    assert_eq!(cat.known.character, Character::Merlin);
    assert_eq!(cat.known.revealed, vec![PlayerId::from("ann"), PlayerId::from("bob")]);

    let err = handle.known_info("zed").unwrap_err();
    assert_eq!(
        err.game_error().map(|e| e.category()),
        Some(ErrorCategory::UnknownPlayer)
    );

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn publishes_events_for_each_operation() {
    let runtime = scripted_runtime().await;
    let handle = runtime.handle();
    let mut state_rx = handle.subscribe(Topic::GameState);
    let mut ledger_rx = handle.subscribe(Topic::Ledger);

    handle
        .propose_team("ann", ["cat", "dee"])
        .await
        .expect("proposal");
    let _ = handle.cast_vote("zed", true).await.unwrap_err();

    let executed = state_rx.recv().await.expect("executed event");
    let Event::GameState(GameStateEvent::ActionExecuted { nonce, delta, .. }) = &executed else {
        panic!("expected ActionExecuted, got {executed:?}");
    };
    assert_eq!(*nonce, 0);
    assert_eq!(delta.mode_after, Mode::Voting);

    let failed = state_rx.recv().await.expect("failed event");
    let Event::GameState(GameStateEvent::ActionFailed {
        category,
        error_code,
        ..
    }) = &failed
    else {
        panic!("expected ActionFailed, got {failed:?}");
    };
    assert_eq!(*category, ErrorCategory::Membership);
    assert_eq!(error_code, "VOTE_UNKNOWN_VOTER");

    let ledger = ledger_rx.recv().await.expect("ledger event");
    let Event::Ledger(LedgerEvent { index, line, .. }) = &ledger else {
        panic!("expected a ledger event, got {ledger:?}");
    };
    assert_eq!(*index, 0);
    assert_eq!(line, "ann proposed cat, dee for mission 1");

    let json = serde_json::to_string(&executed).expect("serialize");
    let decoded: Event = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, executed);

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn announces_the_end_of_the_game() {
    let runtime = scripted_runtime().await;
    let mut handle = runtime.handle();
    let mut state_rx = handle.subscribe(Topic::GameState);

    for _ in 0..5 {
        let leader = handle
            .status()
            .current_turn_player
            .expect("leader exists")
            .to_string();
        handle
            .propose_team(leader, ["cat", "dee"])
            .await
            .expect("proposal");
        for player in FIVE {
            handle.cast_vote(player, false).await.expect("vote");
        }
    }

    let mut ended = None;
    while let Ok(event) = state_rx.try_recv() {
        if let Event::GameState(GameStateEvent::GameEnded { winner, .. }) = event {
            ended = Some(winner);
        }
    }
    assert_eq!(ended, Some(Alignment::Evil));

    let latest = handle.changed().await.expect("snapshot published");
    assert_eq!(latest.mode, Mode::Ended);
    assert_eq!(latest.progress.consecutive_rejects, 5);

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn waiting_for_changes_after_shutdown_reports_the_snapshot_channel() {
    let runtime = scripted_runtime().await;
    let mut handle = runtime.handle();
    runtime.shutdown().await.expect("clean shutdown");

    assert!(matches!(
        handle.changed().await,
        Err(RuntimeError::SnapshotChannelClosed)
    ));
    assert!(matches!(
        handle.cast_vote("ann", true).await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}

#[tokio::test]
async fn rejections_serialize_for_transport() {
    let runtime = scripted_runtime().await;
    let handle = runtime.handle();

    let Err(RuntimeError::Execute(error)) = handle.cast_vote("ann", true).await else {
        panic!("voting during a proposal must be rejected");
    };
    let json = serde_json::to_string(&error).expect("serialize");
    assert!(json.contains("cast_vote"));
    let decoded: avalon_core::ExecuteError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, error);
    assert_eq!(decoded.category(), ErrorCategory::Phase);

    runtime.shutdown().await.expect("clean shutdown");
}
