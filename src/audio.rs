//! Sound output
//!
//! The game only queues [`SoundRequest`](crate::engine::SoundRequest)s; the
//! platform host hands them to an [`AudioManager`] after each frame, which
//! resolves each request to the loaded clip's bytes and plays it without
//! waiting.
//!
//! - Web: Web Audio API. Each clip is decoded once with `decodeAudioData` and
//!   played through an `AudioBufferSourceNode` -> `GainNode` chain.
//! - Native with the `native-audio` feature: `rodio` decodes the WAV bytes and
//!   plays them on a detached sink.
//! - Native without it: requests are logged at debug level.

use std::sync::Arc;

use crate::engine::Engine;
use crate::settings::Settings;

/// A queued request resolved against the asset manager
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    pub path: String,
    /// Encoded clip bytes
    pub data: Arc<[u8]>,
    /// Final volume after master volume and mute
    pub volume: f32,
}

/// Audio manager for the game
pub struct AudioManager {
    output: Option<Output>,
    master_volume: f32,
    muted: bool,
    played: u64,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let muted = settings.muted;
        // A muted session never needs the device
        let output = if muted { None } else { Output::open() };
        Self {
            output,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            muted,
            played: 0,
        }
    }

    /// Volume a clip requested at `volume` actually plays at
    pub fn effective_volume(&self, volume: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * volume.clamp(0.0, 1.0)
        }
    }

    /// Number of clips handed to the output so far
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Drain the engine's sound queue into playable clips.
    ///
    /// Silent requests and requests for released clips are dropped.
    pub fn resolve_queued(&self, engine: &mut Engine) -> Vec<Playback> {
        let mut out = Vec::new();
        for request in engine.drain_sounds() {
            let Some(clip) = engine.assets.audio(request.clip) else {
                log::warn!("Dropping sound for released clip {:?}", request.clip);
                continue;
            };
            let volume = self.effective_volume(request.volume);
            if volume <= 0.0 {
                continue;
            }
            out.push(Playback {
                path: clip.path.clone(),
                data: clip.data.clone(),
                volume,
            });
        }
        out
    }

    /// Drain the engine's sound queue and start every clip
    pub fn play_queued(&mut self, engine: &mut Engine) {
        for playback in self.resolve_queued(engine) {
            self.played += 1;
            match &mut self.output {
                Some(output) => output.play(&playback),
                None => log::debug!("Sound {} at volume {:.2}", playback.path, playback.volume),
            }
        }
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "native-audio"))]
struct Output {
    // Dropping the stream stops every sink
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
}

#[cfg(all(not(target_arch = "wasm32"), feature = "native-audio"))]
impl Output {
    fn open() -> Option<Self> {
        match rodio::OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                log::warn!("No audio output device ({}) - sound effects disabled", e);
                None
            }
        }
    }

    fn play(&mut self, playback: &Playback) {
        let source = match rodio::Decoder::new_wav(std::io::Cursor::new(playback.data.clone())) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("Failed to decode {}: {}", playback.path, e);
                return;
            }
        };
        match rodio::Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(playback.volume);
                sink.append(source);
                sink.detach();
            }
            Err(e) => log::warn!("Failed to play {}: {}", playback.path, e),
        }
    }
}

#[cfg(all(not(target_arch = "wasm32"), not(feature = "native-audio")))]
struct Output;

#[cfg(all(not(target_arch = "wasm32"), not(feature = "native-audio")))]
impl Output {
    fn open() -> Option<Self> {
        log::warn!("Built without native-audio - sound effects disabled");
        None
    }

    fn play(&mut self, _playback: &Playback) {}
}

#[cfg(target_arch = "wasm32")]
struct Output {
    ctx: web_sys::AudioContext,
    /// Decoded clips by asset path
    buffers: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, web_sys::AudioBuffer>>>,
    decoding: std::collections::HashSet<String>,
}

#[cfg(target_arch = "wasm32")]
impl Output {
    fn open() -> Option<Self> {
        // May fail outside a secure context
        match web_sys::AudioContext::new() {
            Ok(ctx) => Some(Self {
                ctx,
                buffers: Default::default(),
                decoding: Default::default(),
            }),
            Err(e) => {
                log::warn!("Failed to create AudioContext ({:?}) - audio disabled", e);
                None
            }
        }
    }

    fn play(&mut self, playback: &Playback) {
        // Browsers keep the context suspended until a user gesture
        if self.ctx.state() == web_sys::AudioContextState::Suspended {
            if let Err(e) = self.ctx.resume() {
                log::debug!("AudioContext resume failed: {:?}", e);
            }
        }

        let cached = self.buffers.borrow().get(&playback.path).cloned();
        if let Some(buffer) = cached {
            play_buffer(&self.ctx, &buffer, playback.volume);
            return;
        }
        if !self.decoding.insert(playback.path.clone()) {
            log::debug!("{} still decoding; skipped", playback.path);
            return;
        }

        let bytes = js_sys::Uint8Array::from(&playback.data[..]);
        let promise = match self.ctx.decode_audio_data(&bytes.buffer()) {
            Ok(promise) => promise,
            Err(e) => {
                log::warn!("Failed to decode {}: {:?}", playback.path, e);
                return;
            }
        };

        let ctx = self.ctx.clone();
        let buffers = self.buffers.clone();
        let path = playback.path.clone();
        let volume = playback.volume;
        wasm_bindgen_futures::spawn_local(async move {
            use wasm_bindgen::JsCast;

            match wasm_bindgen_futures::JsFuture::from(promise).await {
                Ok(buffer) => {
                    let buffer: web_sys::AudioBuffer = buffer.unchecked_into();
                    play_buffer(&ctx, &buffer, volume);
                    buffers.borrow_mut().insert(path, buffer);
                }
                Err(e) => log::warn!("Failed to decode {}: {:?}", path, e),
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn play_buffer(ctx: &web_sys::AudioContext, buffer: &web_sys::AudioBuffer, volume: f32) {
    let result = (|| -> Result<(), wasm_bindgen::JsValue> {
        let source = ctx.create_buffer_source()?;
        let gain = ctx.create_gain()?;
        source.set_buffer(Some(buffer));
        gain.gain().set_value(volume);
        source.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        source.start()
    })();
    if let Err(e) = result {
        log::warn!("Audio playback failed: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemorySource;
    use glam::Vec2;

    const WAV: &[u8] = b"RIFF\0\0\0\0WAVE";

    fn engine_with_clip() -> (Engine, crate::engine::AudioHandle) {
        let source = MemorySource::new().with("hit.wav", WAV.to_vec());
        let mut engine = Engine::new(Vec2::new(800.0, 600.0), source);
        let clip = engine.load_audio("hit.wav").unwrap();
        (engine, clip)
    }

    fn muted() -> Settings {
        Settings {
            muted: true,
            ..Settings::default()
        }
    }

    #[test]
    fn test_effective_volume() {
        let audio = AudioManager::new(&Settings {
            master_volume: 0.5,
            ..muted()
        });
        assert_eq!(audio.effective_volume(0.5), 0.0);

        let audio = AudioManager {
            output: None,
            master_volume: 0.5,
            muted: false,
            played: 0,
        };
        assert_eq!(audio.effective_volume(0.5), 0.25);
    }

    #[test]
    fn test_queued_request_resolves_to_clip_bytes() {
        let (mut engine, clip) = engine_with_clip();
        engine.play_sound(clip, 0.5);

        let audio = AudioManager {
            output: None,
            master_volume: 0.5,
            muted: false,
            played: 0,
        };
        let queued = audio.resolve_queued(&mut engine);
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].path, "hit.wav");
        assert_eq!(&queued[0].data[..], WAV);
        assert_eq!(queued[0].volume, 0.25);
        assert!(engine.drain_sounds().is_empty());
    }

    #[test]
    fn test_play_queued_drains_engine() {
        let (mut engine, clip) = engine_with_clip();
        engine.play_sound(clip, 0.5);
        engine.play_sound(clip, 0.5);

        let mut audio = AudioManager {
            output: None,
            master_volume: 1.0,
            muted: false,
            played: 0,
        };
        audio.play_queued(&mut engine);
        assert_eq!(audio.played(), 2);
        assert!(engine.drain_sounds().is_empty());
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut engine, clip) = engine_with_clip();
        engine.play_sound(clip, 0.5);

        let mut audio = AudioManager::new(&muted());
        audio.play_queued(&mut engine);
        assert_eq!(audio.played(), 0);
    }
}
