//! Audio system
//!
//! Click sound is generated with Web Audio oscillators; background tracks
//! loop through `<audio>` elements. Every handle is optional: a missing or
//! blocked asset turns the corresponding calls into no-ops, never errors.

use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::sim::{MusicTrack, SoundEffect};

const MENU_MUSIC: &str = "sounds/menu_music.wav";
const GAME_MUSIC: &str = "sounds/game_music.wav";
const GAME_OVER_MUSIC: &str = "sounds/game_over_music.wav";

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    tracks: [Option<HtmlAudioElement>; 3],
    current: Option<MusicTrack>,
    sfx_volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context; sounds then degrade to no-ops
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - sound effects disabled");
        }
        Self {
            ctx,
            tracks: [
                load_track(MENU_MUSIC),
                load_track(GAME_MUSIC),
                load_track(GAME_OVER_MUSIC),
            ],
            current: None,
            sfx_volume: 0.5,
        }
    }

    /// Resume audio context (required after first user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Whether sound effects can actually play
    pub fn is_loaded(&self) -> bool {
        self.ctx.is_some()
    }

    /// Whether the given track has a usable element
    pub fn track_loaded(&self, track: MusicTrack) -> bool {
        self.tracks[track as usize].is_some()
    }

    /// Play a one-shot sound effect
    pub fn play(&self, effect: SoundEffect) {
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        match effect {
            SoundEffect::Click => self.play_click(ctx, self.sfx_volume),
        }
    }

    /// Stop whatever is playing and loop the given track from the start
    pub fn play_music(&mut self, track: MusicTrack) {
        self.stop_music();
        if let Some(el) = &self.tracks[track as usize] {
            el.set_current_time(0.0);
            // Autoplay policy may reject before the first gesture
            let _ = el.play();
            self.current = Some(track);
        }
    }

    /// Stop the current background track
    pub fn stop_music(&mut self) {
        if let Some(track) = self.current.take() {
            if let Some(el) = &self.tracks[track as usize] {
                let _ = el.pause();
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Button click - short falling blip
    fn play_click(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();
        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(220.0, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }
}

/// Build a looping audio element, or `None` when the element can't exist.
/// A URL that later 404s leaves a handle whose `play` calls silently fail,
/// which is the degradation the game wants.
fn load_track(src: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(src) {
        Ok(el) => {
            el.set_loop(true);
            Some(el)
        }
        Err(_) => {
            log::warn!("failed to create audio element for {src}");
            None
        }
    }
}
