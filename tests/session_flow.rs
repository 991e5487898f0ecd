//! End-to-end session behaviour with recording collaborators

mod common;

use common::Host;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use spell_drop::config::{SessionConfig, Tint};
use spell_drop::session::{
    Decision, OutcomeKind, Phase, PracticeSession, Transition, Word, WordQueue,
};
use spell_drop::Error;

fn start(words: &[&str], host: &mut Host) -> PracticeSession {
    let queue = WordQueue::in_order(words).unwrap();
    PracticeSession::start(queue, SessionConfig::default(), &mut host.collaborators()).unwrap()
}

/// Report every queued utterance as finished; returns the last transition
fn play_all(session: &mut PracticeSession, host: &mut Host) -> Transition {
    let ids = host.speaker.play(usize::MAX);
    let mut last = Transition::Ignored;
    for id in ids {
        last = session.on_utterance_end(id, &mut host.collaborators()).unwrap();
    }
    last
}

#[test]
fn two_correct_answers_exhaust_the_pool() {
    let mut host = Host::default();
    let mut session = start(&["dog", "cat"], &mut host);
    assert_eq!(host.stage.text, "cat");

    let first = session
        .decide(Decision::Correct, &mut host.collaborators())
        .unwrap();
    assert_eq!(first, Transition::Judged(OutcomeKind::Correct));
    assert_eq!(host.stage.text, "dog");

    let second = session
        .decide(Decision::Correct, &mut host.collaborators())
        .unwrap();
    assert_eq!(second, Transition::Finished(OutcomeKind::Correct));

    let tally = session.tally();
    assert_eq!(
        tally.bucket(OutcomeKind::Correct),
        &[Word::from("cat"), Word::from("dog")]
    );
    assert_eq!(tally.count_of(OutcomeKind::Correct), 2);
    assert_eq!(session.phase(), Phase::Exhausted);
    assert_eq!(session.current_word(), None);
    assert_eq!(host.score.shown, vec![0, 1, 2]);
}

#[test]
fn exhausted_session_ignores_everything() {
    let mut host = Host::default();
    let mut session = start(&["cat"], &mut host);
    session
        .decide(Decision::Correct, &mut host.collaborators())
        .unwrap();
    assert!(session.is_exhausted());

    let mut c = host.collaborators();
    assert_eq!(session.decide(Decision::Correct, &mut c).unwrap(), Transition::Ignored);
    assert_eq!(session.decide(Decision::Incorrect, &mut c).unwrap(), Transition::Ignored);
    assert_eq!(session.boundary_collision(&mut c).unwrap(), Transition::Ignored);
    assert_eq!(session.tally().total(), 1);
}

#[test]
fn missed_word_is_spelled_and_shown_again() {
    let mut host = Host::default();
    let mut session = start(&["cat", "dog"], &mut host);
    assert_eq!(host.stage.text, "dog");

    let judged = session
        .decide(Decision::Incorrect, &mut host.collaborators())
        .unwrap();
    assert_eq!(judged, Transition::Narrating(OutcomeKind::Incorrect));
    assert_eq!(host.stage.tint, Some(Tint::MISSED));
    assert_eq!(host.stage.velocity, (0.0, 0.0));
    assert_eq!(host.speaker.texts(), vec!["dog", "d", "o", "g", "dog"]);

    assert_eq!(play_all(&mut session, &mut host), Transition::Presented);

    let spawn = SessionConfig::default().spawn;
    assert_eq!(session.current_word(), Some(&Word::from("dog")));
    assert_eq!(session.phase(), Phase::AwaitingDecision);
    assert!(session.accepting_input());
    assert_eq!(host.stage.text, "dog");
    assert_eq!(host.stage.position, spawn.position);
    assert_eq!(host.stage.velocity, spawn.velocity);
    assert_eq!(host.stage.tint, Some(Tint::DEFAULT));
    assert_eq!(session.remaining(), 1);
}

#[test]
fn narration_completes_only_after_the_fifth_utterance() {
    let mut host = Host::default();
    let mut session = start(&["cat"], &mut host);
    session
        .decide(Decision::Incorrect, &mut host.collaborators())
        .unwrap();
    assert_eq!(host.speaker.texts(), vec!["cat", "c", "a", "t", "cat"]);

    for id in host.speaker.play(4) {
        let t = session.on_utterance_end(id, &mut host.collaborators()).unwrap();
        assert_eq!(t, Transition::Ignored);
        assert_eq!(session.phase(), Phase::Narrating);
    }
    assert_eq!(host.speaker.pending().len(), 1);
    assert_eq!(play_all(&mut session, &mut host), Transition::Presented);
}

#[test]
fn repeated_signals_in_one_period_judge_once() {
    let mut host = Host::default();
    let mut session = start(&["dog", "cat"], &mut host);
    let mut c = host.collaborators();

    let transitions = [
        session.decide(Decision::Incorrect, &mut c).unwrap(),
        session.decide(Decision::Incorrect, &mut c).unwrap(),
        session.boundary_collision(&mut c).unwrap(),
        session.decide(Decision::Correct, &mut c).unwrap(),
    ];
    let judged = transitions
        .iter()
        .filter(|t| **t != Transition::Ignored)
        .count();
    assert_eq!(judged, 1);
    assert_eq!(session.tally().total(), 1);
    assert_eq!(session.tally().count_of(OutcomeKind::Incorrect), 1);
}

#[test]
fn collision_counts_as_a_miss() {
    let mut host = Host::default();
    let mut session = start(&["cat"], &mut host);
    session.boundary_collision(&mut host.collaborators()).unwrap();
    assert_eq!(session.tally().count_of(OutcomeKind::Incorrect), 1);
    assert_eq!(session.tally().count_of(OutcomeKind::Timeout), 0);
    assert_eq!(session.phase(), Phase::Narrating);
}

#[test]
fn unavailable_speech_never_stalls() {
    let mut host = Host::default();
    host.speaker.unavailable = true;
    let mut session = start(&["cat"], &mut host);

    for _ in 0..3 {
        let t = session
            .decide(Decision::Incorrect, &mut host.collaborators())
            .unwrap();
        assert_eq!(t, Transition::Judged(OutcomeKind::Incorrect));
        assert!(session.accepting_input());
    }
    session
        .decide(Decision::Correct, &mut host.collaborators())
        .unwrap();
    assert!(session.is_exhausted());
    assert_eq!(session.tally().count_of(OutcomeKind::Incorrect), 3);
}

#[test]
fn empty_pool_cannot_start() {
    let empty: [&str; 0] = [];
    let mut rng = StdRng::seed_from_u64(3);
    assert!(matches!(
        WordQueue::build(&empty, &mut rng),
        Err(Error::EmptyWordList)
    ));
}

#[derive(Clone, Copy, Debug)]
enum Signal {
    Correct,
    Incorrect,
    Collision,
    PlayOne,
}

fn signal() -> impl Strategy<Value = Signal> {
    prop_oneof![
        Just(Signal::Correct),
        Just(Signal::Incorrect),
        Just(Signal::Collision),
        Just(Signal::PlayOne),
    ]
}

proptest! {
    #[test]
    fn tally_matches_judgments_and_every_word_is_eventually_correct(
        words in prop::collection::hash_set("[a-z]{1,6}", 1..8),
        signals in prop::collection::vec(signal(), 0..60),
        seed in any::<u64>(),
    ) {
        let words: Vec<String> = words.into_iter().collect();
        let mut host = Host::default();
        let queue = WordQueue::build(&words, &mut StdRng::seed_from_u64(seed)).unwrap();
        let mut session =
            PracticeSession::start(queue, SessionConfig::default(), &mut host.collaborators())
                .unwrap();

        let mut judgments = 0;
        let mut apply = |session: &mut PracticeSession, host: &mut Host, signal: Signal| {
            let transition = match signal {
                Signal::Correct => session.decide(Decision::Correct, &mut host.collaborators()),
                Signal::Incorrect => session.decide(Decision::Incorrect, &mut host.collaborators()),
                Signal::Collision => session.boundary_collision(&mut host.collaborators()),
                Signal::PlayOne => {
                    let mut last = Ok(Transition::Ignored);
                    for id in host.speaker.play(1) {
                        last = session.on_utterance_end(id, &mut host.collaborators());
                    }
                    last
                }
            }
            .unwrap();
            if matches!(
                transition,
                Transition::Judged(_) | Transition::Narrating(_) | Transition::Finished(_)
            ) {
                judgments += 1;
            }
        };

        for signal in signals {
            apply(&mut session, &mut host, signal);
        }

        // Drive to the end: finish any narration, then answer correctly
        let mut guard = 0;
        while !session.is_exhausted() {
            guard += 1;
            prop_assert!(guard < 1000);
            if session.phase() == Phase::Narrating {
                apply(&mut session, &mut host, Signal::PlayOne);
            } else {
                apply(&mut session, &mut host, Signal::Correct);
            }
        }

        let tally = session.tally();
        prop_assert_eq!(tally.total(), judgments);
        prop_assert_eq!(
            tally.count_of(OutcomeKind::Correct)
                + tally.count_of(OutcomeKind::Incorrect)
                + tally.count_of(OutcomeKind::Timeout),
            judgments
        );

        let correct: FxHashSet<&str> = tally
            .bucket(OutcomeKind::Correct)
            .iter()
            .map(Word::as_str)
            .collect();
        let pool: FxHashSet<&str> = words.iter().map(String::as_str).collect();
        prop_assert_eq!(correct, pool);
        prop_assert_eq!(tally.count_of(OutcomeKind::Correct), words.len());
    }
}
