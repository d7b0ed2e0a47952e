//! Engine playthrough tests over the demo screenplay

use tsuzuri::application::api::{Directive, NextAction};
use tsuzuri::application::engine::Engine;
use tsuzuri::config::EngineConfig;
use tsuzuri::types::DisplayMode;

const SCREENPLAY: &str = include_str!("../demos/sample_screenplay.json");
const CONFIG: &str = include_str!("../demos/config.json");

fn engine() -> Engine {
    let config = EngineConfig::from_json_str(CONFIG).expect("demo config");
    Engine::from_json(SCREENPLAY, &config).expect("demo screenplay")
}

fn say(speaker: &str, text: &str, mode: DisplayMode) -> Directive {
    Directive::Say {
        speaker: speaker.to_string(),
        text: text.to_string(),
        mode,
    }
}

fn voice(path: &str) -> Directive {
    Directive::PlayVoice {
        path: path.to_string(),
    }
}

#[test]
fn opening_lines() {
    let mut engine = engine();

    let first = engine.step().unwrap();
    assert_eq!(first.next, NextAction::WaitUser);
    assert_eq!(
        first.directives,
        vec![
            Directive::ShowImage {
                layer: "background".into(),
                path: Some("/assets/scenes/BG/ROOM/A01.webp".into()),
            },
            Directive::PlayBgm {
                path: Some("/assets/audio/bgm/M01.mp3".into()),
            },
            say("", "静かな朝だった。", DisplayMode::Hidden),
        ]
    );

    let second = engine.step().unwrap();
    assert_eq!(
        second.directives,
        vec![
            Directive::ShowImage {
                layer: "portrait".into(),
                path: Some("/assets/scenes/Portraits/MAM/normal.webp".into()),
            },
            say("守", "おはよう", DisplayMode::Display),
            voice("/assets/audio/voice/MAM.REN0001.002.ogg"),
        ]
    );

    let third = engine.step().unwrap();
    assert_eq!(
        third.directives,
        vec![
            say("美咲", "……誰？", DisplayMode::Hidden),
            voice("/assets/audio/voice/MIS.REN0001.003.ogg"),
        ]
    );
}

#[test]
fn outside_route_to_the_end() {
    let mut engine = engine();
    for _ in 0..3 {
        engine.step().unwrap();
    }

    let decision = engine.step().unwrap();
    assert_eq!(decision.next, NextAction::WaitBranch);
    assert_eq!(
        decision.directives,
        vec![Directive::Branch {
            choices: vec!["外に出る".into(), "ここに残る".into()],
        }]
    );

    let outside = engine.choose(0).unwrap();
    assert_eq!(
        outside.directives,
        vec![
            Directive::PlaySe {
                path: "/assets/audio/se/door.mp3".into(),
            },
            say("美咲", "行こう", DisplayMode::Display),
            voice("/assets/audio/voice/MIS.REN0004.001.ogg"),
        ]
    );

    let last = engine.step().unwrap();
    assert_eq!(
        last.directives,
        vec![
            Directive::PlayBgm { path: None },
            say("", "おわり。", DisplayMode::Hidden),
        ]
    );
    assert_eq!(engine.presentation().bgm, None);

    let end = engine.step().unwrap();
    assert_eq!(end.next, NextAction::Halt);
    assert!(end.directives.is_empty());
    assert!(engine.step().is_err());
}

#[test]
fn staying_route_shows_cg() {
    let mut engine = engine();
    for _ in 0..4 {
        engine.step().unwrap();
    }

    let stay = engine.choose(1).unwrap();
    assert_eq!(
        stay.directives,
        vec![
            Directive::ShowImage {
                layer: "portrait".into(),
                path: None,
            },
            Directive::ShowImage {
                layer: "background".into(),
                path: Some("/assets/scenes/CG/EV01/EV01.webp".into()),
            },
            say("守", "ここにいよう", DisplayMode::Display),
            voice("/assets/audio/voice/MAM.REN0004.001.ogg"),
        ]
    );
    assert_eq!(engine.context().current_block().unwrap().id, 400);
    assert_eq!(engine.presentation().portrait, None);
}

#[test]
fn choices_are_only_accepted_at_a_decision() {
    let mut engine = engine();
    assert!(engine.choose(0).is_err());
    engine.step().unwrap();
    assert!(engine.choices().is_none());
}

#[test]
fn replayed_voice_matches_spoken_line() {
    let mut engine = engine();
    engine.step().unwrap();
    assert!(engine.replay_voice().is_none(), "narration has no voice");

    let spoken = engine.step().unwrap();
    let cue = engine.replay_voice().unwrap();
    assert!(spoken.directives.contains(&voice(&cue.path)));
}

#[tokio::test]
async fn loads_demo_from_disk() {
    let config = EngineConfig::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/config.json"))
        .unwrap();
    let mut engine = Engine::load(
        concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample_screenplay.json"),
        &config,
    )
    .await
    .unwrap();
    assert_eq!(engine.step().unwrap().next, NextAction::WaitUser);
}
