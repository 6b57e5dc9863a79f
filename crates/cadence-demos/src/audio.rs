//! Audio collaborator interfaces and an in-process simulation of them.
//!
//! Decoding and playback belong to the audio backend. The demos only need
//! the handle-level operations below, so [`SimulatedAudio`] and
//! [`SimulatedMusic`] track handles and playback position without producing
//! sound.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("sound file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unknown sound handle {0:?}")]
    UnknownSound(SoundId),

    #[error("sound {0:?} still has live aliases")]
    StillAliased(SoundId),

    #[error("sound {0:?} is an alias; unload it with unload_sound_alias")]
    NotOwning(SoundId),

    #[error("sound {0:?} owns its sample data; unload it with unload_sound")]
    NotAlias(SoundId),
}

/// Opaque handle issued by an [`AudioDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundId(pub u32);

/// Fully buffered sound effects.
pub trait AudioDevice {
    /// Decode a sound file into a handle that owns its sample data.
    fn load_sound(&mut self, path: &Path) -> Result<SoundId, AudioError>;
    /// New handle that plays `source`'s sample data without owning it.
    fn load_sound_alias(&mut self, source: SoundId) -> Result<SoundId, AudioError>;
    fn play_sound(&mut self, sound: SoundId) -> Result<(), AudioError>;
    /// Release an owning handle. Fails while aliases of it are alive.
    fn unload_sound(&mut self, sound: SoundId) -> Result<(), AudioError>;
    fn unload_sound_alias(&mut self, alias: SoundId) -> Result<(), AudioError>;
}

#[derive(Debug, Clone)]
struct SimSound {
    path: PathBuf,
    alias_of: Option<SoundId>,
    plays: u32,
}

/// Audio device that records what it was asked to do.
///
/// Files are accepted if they exist on disk or were registered with
/// [`with_virtual_file`](Self::with_virtual_file).
#[derive(Debug, Default)]
pub struct SimulatedAudio {
    virtual_files: HashSet<PathBuf>,
    sounds: HashMap<SoundId, SimSound>,
    next_id: u32,
}

impl SimulatedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_virtual_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.virtual_files.insert(path.into());
        self
    }

    /// Handles currently loaded, owning and aliased.
    pub fn live_sounds(&self) -> usize {
        self.sounds.len()
    }

    pub fn play_count(&self, sound: SoundId) -> Option<u32> {
        self.sounds.get(&sound).map(|s| s.plays)
    }

    fn issue(&mut self, sound: SimSound) -> SoundId {
        let id = SoundId(self.next_id);
        self.next_id += 1;
        self.sounds.insert(id, sound);
        id
    }
}

impl AudioDevice for SimulatedAudio {
    fn load_sound(&mut self, path: &Path) -> Result<SoundId, AudioError> {
        if !self.virtual_files.contains(path) && !path.is_file() {
            return Err(AudioError::FileNotFound(path.to_path_buf()));
        }
        let id = self.issue(SimSound {
            path: path.to_path_buf(),
            alias_of: None,
            plays: 0,
        });
        log::debug!("loaded sound {id:?} from {}", path.display());
        Ok(id)
    }

    fn load_sound_alias(&mut self, source: SoundId) -> Result<SoundId, AudioError> {
        let path = match self.sounds.get(&source) {
            Some(SimSound {
                alias_of: None,
                path,
                ..
            }) => path.clone(),
            Some(_) => return Err(AudioError::NotOwning(source)),
            None => return Err(AudioError::UnknownSound(source)),
        };
        Ok(self.issue(SimSound {
            path,
            alias_of: Some(source),
            plays: 0,
        }))
    }

    fn play_sound(&mut self, sound: SoundId) -> Result<(), AudioError> {
        let entry = self
            .sounds
            .get_mut(&sound)
            .ok_or(AudioError::UnknownSound(sound))?;
        entry.plays += 1;
        log::trace!("play {sound:?} ({})", entry.path.display());
        Ok(())
    }

    fn unload_sound(&mut self, sound: SoundId) -> Result<(), AudioError> {
        match self.sounds.get(&sound) {
            None => return Err(AudioError::UnknownSound(sound)),
            Some(entry) if entry.alias_of.is_some() => return Err(AudioError::NotOwning(sound)),
            Some(_) => {}
        }
        if self.sounds.values().any(|s| s.alias_of == Some(sound)) {
            return Err(AudioError::StillAliased(sound));
        }
        self.sounds.remove(&sound);
        Ok(())
    }

    fn unload_sound_alias(&mut self, alias: SoundId) -> Result<(), AudioError> {
        match self.sounds.get(&alias) {
            None => Err(AudioError::UnknownSound(alias)),
            Some(entry) if entry.alias_of.is_none() => Err(AudioError::NotAlias(alias)),
            Some(_) => {
                self.sounds.remove(&alias);
                Ok(())
            }
        }
    }
}

/// One slot of a [`SoundPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSlot {
    /// Owns the decoded sample data.
    Owning(SoundId),
    /// Plays `source`'s data; must be released before `source`.
    Aliased { alias: SoundId, source: SoundId },
}

impl SoundSlot {
    pub fn handle(&self) -> SoundId {
        match *self {
            Self::Owning(id) => id,
            Self::Aliased { alias, .. } => alias,
        }
    }
}

/// Fixed set of voices sharing one sample, played round-robin so rapid
/// triggers overlap instead of restarting each other.
#[derive(Debug)]
pub struct SoundPool {
    slots: Vec<SoundSlot>,
    next: usize,
}

impl SoundPool {
    /// Load `path` once and alias it until the pool has `voices` slots.
    ///
    /// If an alias fails to load, every handle loaded so far is released
    /// before the error is returned.
    pub fn load<D>(device: &mut D, path: &Path, voices: usize) -> Result<Self, AudioError>
    where
        D: AudioDevice + ?Sized,
    {
        let source = device.load_sound(path)?;
        let mut pool = Self {
            slots: Vec::with_capacity(voices.max(1)),
            next: 0,
        };
        pool.slots.push(SoundSlot::Owning(source));
        for _ in 1..voices {
            match device.load_sound_alias(source) {
                Ok(alias) => pool.slots.push(SoundSlot::Aliased { alias, source }),
                Err(err) => {
                    if let Err(release_err) = pool.release(device) {
                        log::warn!("releasing partially loaded pool failed: {release_err}");
                    }
                    return Err(err);
                }
            }
        }
        Ok(pool)
    }

    pub fn slots(&self) -> &[SoundSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot that the next [`play_next`](Self::play_next) will use.
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Play the next voice and return the slot index used.
    pub fn play_next<D>(&mut self, device: &mut D) -> Result<usize, AudioError>
    where
        D: AudioDevice + ?Sized,
    {
        let index = self.next;
        device.play_sound(self.slots[index].handle())?;
        self.next = (self.next + 1) % self.slots.len();
        Ok(index)
    }

    /// Unload every alias, then the owning slot.
    pub fn release<D>(self, device: &mut D) -> Result<(), AudioError>
    where
        D: AudioDevice + ?Sized,
    {
        let (aliases, owners): (Vec<_>, Vec<_>) = self
            .slots
            .into_iter()
            .partition(|slot| matches!(slot, SoundSlot::Aliased { .. }));
        for slot in aliases {
            device.unload_sound_alias(slot.handle())?;
        }
        for slot in owners {
            device.unload_sound(slot.handle())?;
        }
        Ok(())
    }
}

/// Streamed music: decoded incrementally, so it must be fed once per frame.
pub trait MusicStream {
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    /// Stop and rewind to the beginning.
    fn stop(&mut self);
    /// Refill stream buffers. `elapsed` is the wall time since the previous
    /// call.
    fn update(&mut self, elapsed: Duration) -> Result<(), AudioError>;
    fn is_playing(&self) -> bool;
    fn time_played(&self) -> Duration;
    fn time_length(&self) -> Duration;
}

/// Looping music stream that advances its position on every update.
#[derive(Debug, Clone)]
pub struct SimulatedMusic {
    name: String,
    length: Duration,
    position: Duration,
    playing: bool,
    updates: u64,
}

impl SimulatedMusic {
    pub fn new(name: impl Into<String>, length: Duration) -> Self {
        Self {
            name: name.into(),
            length,
            position: Duration::ZERO,
            playing: false,
            updates: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of buffer refills requested so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl MusicStream for SimulatedMusic {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn resume(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.position = Duration::ZERO;
    }

    fn update(&mut self, elapsed: Duration) -> Result<(), AudioError> {
        self.updates += 1;
        if self.playing && !self.length.is_zero() {
            let nanos = (self.position + elapsed).as_nanos() % self.length.as_nanos();
            self.position = Duration::from_nanos(nanos as u64);
        }
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn time_played(&self) -> Duration {
        self.position
    }

    fn time_length(&self) -> Duration {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> SimulatedAudio {
        SimulatedAudio::new().with_virtual_file("sound.wav")
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut device = SimulatedAudio::new();
        assert_eq!(
            device.load_sound(Path::new("nope.wav")),
            Err(AudioError::FileNotFound(PathBuf::from("nope.wav")))
        );
    }

    #[test]
    fn pool_has_one_owner_and_aliases() {
        let mut device = device();
        let pool = SoundPool::load(&mut device, Path::new("sound.wav"), 10).unwrap();
        assert_eq!(pool.len(), 10);
        assert!(matches!(pool.slots()[0], SoundSlot::Owning(_)));
        let source = pool.slots()[0].handle();
        assert!(pool.slots()[1..]
            .iter()
            .all(|slot| matches!(slot, SoundSlot::Aliased { source: s, .. } if *s == source)));
        assert_eq!(device.live_sounds(), 10);
    }

    #[test]
    fn play_next_cycles_through_voices() {
        let mut device = device();
        let mut pool = SoundPool::load(&mut device, Path::new("sound.wav"), 3).unwrap();
        let played: Vec<usize> = (0..4).map(|_| pool.play_next(&mut device).unwrap()).collect();
        assert_eq!(played, [0, 1, 2, 0]);
        assert_eq!(device.play_count(pool.slots()[0].handle()), Some(2));
        assert_eq!(device.play_count(pool.slots()[2].handle()), Some(1));
    }

    #[test]
    fn source_cannot_be_unloaded_before_aliases() {
        let mut device = device();
        let pool = SoundPool::load(&mut device, Path::new("sound.wav"), 2).unwrap();
        let source = pool.slots()[0].handle();
        assert_eq!(device.unload_sound(source), Err(AudioError::StillAliased(source)));
        pool.release(&mut device).unwrap();
        assert_eq!(device.live_sounds(), 0);
    }

    #[test]
    fn aliases_and_owners_use_their_own_unload() {
        let mut device = device();
        let source = device.load_sound(Path::new("sound.wav")).unwrap();
        let alias = device.load_sound_alias(source).unwrap();
        assert_eq!(device.unload_sound(alias), Err(AudioError::NotOwning(alias)));
        assert_eq!(device.unload_sound_alias(source), Err(AudioError::NotAlias(source)));
        assert_eq!(device.load_sound_alias(alias), Err(AudioError::NotOwning(alias)));
    }

    /// Simulated device that refuses aliases after `aliases_left` succeed.
    struct AliasLimit {
        inner: SimulatedAudio,
        aliases_left: usize,
    }

    impl AudioDevice for AliasLimit {
        fn load_sound(&mut self, path: &Path) -> Result<SoundId, AudioError> {
            self.inner.load_sound(path)
        }
        fn load_sound_alias(&mut self, source: SoundId) -> Result<SoundId, AudioError> {
            if self.aliases_left == 0 {
                return Err(AudioError::UnknownSound(source));
            }
            self.aliases_left -= 1;
            self.inner.load_sound_alias(source)
        }
        fn play_sound(&mut self, sound: SoundId) -> Result<(), AudioError> {
            self.inner.play_sound(sound)
        }
        fn unload_sound(&mut self, sound: SoundId) -> Result<(), AudioError> {
            self.inner.unload_sound(sound)
        }
        fn unload_sound_alias(&mut self, alias: SoundId) -> Result<(), AudioError> {
            self.inner.unload_sound_alias(alias)
        }
    }

    #[test]
    fn failed_alias_releases_partial_pool() {
        let mut device = AliasLimit {
            inner: device(),
            aliases_left: 3,
        };
        let err = SoundPool::load(&mut device, Path::new("sound.wav"), 10).unwrap_err();
        assert!(matches!(err, AudioError::UnknownSound(_)));
        assert_eq!(device.inner.live_sounds(), 0);
    }

    #[test]
    fn music_advances_only_while_playing_and_loops() {
        let mut music = SimulatedMusic::new("track", Duration::from_secs(10));
        music.update(Duration::from_secs(1)).unwrap();
        assert_eq!(music.time_played(), Duration::ZERO);

        music.play();
        music.update(Duration::from_secs(4)).unwrap();
        music.pause();
        music.update(Duration::from_secs(4)).unwrap();
        assert_eq!(music.time_played(), Duration::from_secs(4));

        music.resume();
        music.update(Duration::from_secs(7)).unwrap();
        assert_eq!(music.time_played(), Duration::from_secs(1));

        music.stop();
        assert_eq!(music.time_played(), Duration::ZERO);
        assert_eq!(music.updates(), 4);
    }
}
