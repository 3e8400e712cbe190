mod common;

use common::engine_for;
use ifhub_sound::{Preset, presets};

#[test]
fn test_every_preset_initialises_an_engine() {
    for preset in Preset::all() {
        let config = preset.load().expect("preset should validate");
        let h = engine_for(&config);
        assert!(h.engine.is_initialized(), "{} failed", preset.name());
    }
}

#[test]
fn test_zork1_triggers_fire_on_game_text() {
    let mut h = engine_for(&presets::zork1().expect("zork1"));

    assert_eq!(h.engine.on_text("Opening the small mailbox reveals a leaflet."), 0);
    assert_eq!(h.engine.on_text("You open the small mailbox."), 1);
    assert_eq!(
        h.engine.on_text("The cyclops, hearing the name of his father's deadly nemesis, flees the room by knocking down the wall on the east of the room."),
        1
    );
    assert_eq!(
        h.engine.on_text("Your sword is glowing with a faint blue glow."),
        1
    );
    assert_eq!(
        h.player.paths(),
        vec![
            "audio/sfx/creak.mp3",
            "audio/sfx/footsteps.mp3",
            "audio/sfx/sword.mp3"
        ]
    );
}

#[test]
fn test_zork1_grue_death_text() {
    let mut h = engine_for(&presets::zork1().expect("zork1"));
    let text = "Oh, no! You have walked into the slavering fangs of a lurking grue!";
    assert_eq!(h.engine.on_text(text), 1);
    assert_eq!(h.player.paths(), vec!["audio/sfx/grue.mp3"]);
}

#[test]
fn test_zork1_sword_respects_long_cooldown() {
    let mut h = engine_for(&presets::zork1().expect("zork1"));
    let text = "Your sword is glowing very brightly.";

    assert_eq!(h.engine.on_text(text), 1);
    h.clock.set(29_999);
    assert_eq!(h.engine.on_text(text), 0);
    h.clock.set(30_000);
    assert_eq!(h.engine.on_text(text), 1);
}

#[test]
fn test_feverdream_glass_marker() {
    let mut h = engine_for(&presets::feverdream().expect("feverdream"));
    assert!(h.engine.fire_style("glass"));
    assert_eq!(h.engine.on_text("A glass shatters somewhere."), 0);
    let plays = h.player.plays();
    assert_eq!(plays.len(), 1);
    assert!((plays[0].volume - 0.4).abs() < f32::EPSILON);
}
