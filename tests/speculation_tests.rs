//! Speculative resolution against a ledger.
//!
//! The client resolves a turn locally, then compares its prediction with
//! the snapshot the ledger returns.

use lane_duel::cards::{CardCatalog, CardId};
use lane_duel::core::{reconcile, AccountId, ActionType, Divergence, Game, PlayerId, Reconciliation, RulesConfig};
use lane_duel::rules::{TurnEngine, TurnSubmission};

fn opening() -> Game {
    let deck: Vec<CardId> = [4, 6, 8, 5, 7, 2].map(CardId::new).to_vec();
    Game::new_match(21, [AccountId([5; 20]), AccountId([6; 20])], &deck, &RulesConfig::default(), 0)
}

fn submission(seed: u64) -> TurnSubmission {
    TurnSubmission::new(PlayerId::FIRST, [ActionType::EndTurn]).with_draw_seed(seed)
}

#[test]
fn test_same_seed_confirms_prediction() {
    let catalog = CardCatalog::standard();
    let engine = TurnEngine::new(&catalog);
    let game = opening();

    let predicted = engine.resolve_turn(&game, &submission(8)).unwrap();
    let ledger = engine.resolve_turn(&game, &submission(8)).unwrap();

    assert!(reconcile(&predicted, &ledger).is_confirmed());
}

#[test]
fn test_ledger_snapshot_survives_encoding() {
    let catalog = CardCatalog::standard();
    let game = opening();
    let ledger = TurnEngine::new(&catalog).resolve_turn(&game, &submission(8)).unwrap();

    let received = Game::decode(&ledger.encode().unwrap()).unwrap();

    assert_eq!(received, ledger);
    assert!(reconcile(&ledger, &received).is_confirmed());
}

#[test]
fn test_stale_prediction_is_reported() {
    let catalog = CardCatalog::standard();
    let engine = TurnEngine::new(&catalog);
    let game = opening();

    // The client predicted no turn was taken; the ledger already handed over.
    let ledger = engine.resolve_turn(&game, &submission(8)).unwrap();

    match reconcile(&game, &ledger) {
        Reconciliation::Diverged(diffs) => {
            assert!(diffs.contains(&Divergence::ActivePlayer));
            assert!(diffs.contains(&Divergence::Turn));
            assert!(diffs.contains(&Divergence::Player(PlayerId::SECOND)));
            assert!(!diffs.contains(&Divergence::Player(PlayerId::FIRST)));
        }
        Reconciliation::Confirmed => panic!("prediction should be stale"),
    }
}
