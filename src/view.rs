//! Host-facing game view
//!
//! A [`GameView`] is what a screen holds while a game is open: the session, the
//! audio it plays and an optional feedback observer. Every call pumps the session's
//! events so cues reach the speaker and messages reach the observer in order.
//! Dropping the view tears the session down and silences audio.
//!
//! Routed events are also kept for [`GameView::drain_events`]. Hosts that only use
//! the observer never drain, so the backlog is capped and cleared on every start.

use std::collections::VecDeque;

use crate::audio::{AudioManager, SoundSink};
use crate::games::GameKind;
use crate::settings::Settings;
use crate::sim::{
    FeedbackEvent, Rules, RunId, Session, SessionEvent, SessionPhase, Snapshot, Verdict,
};

type FeedbackObserver = Box<dyn FnMut(&FeedbackEvent)>;

/// Undrained events kept per view; the oldest are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

pub struct GameView<R: Rules, S: SoundSink> {
    kind: GameKind,
    session: Session<R>,
    audio: AudioManager<S>,
    observer: Option<FeedbackObserver>,
    pending: VecDeque<SessionEvent>,
    pause_on_blur: bool,
    mute_on_blur: bool,
}

impl<R: Rules, S: SoundSink> GameView<R, S> {
    pub fn new(kind: GameKind, session: Session<R>, audio: AudioManager<S>) -> Self {
        Self {
            kind,
            session,
            audio,
            observer: None,
            pending: VecDeque::new(),
            pause_on_blur: true,
            mute_on_blur: true,
        }
    }

    /// Build a view with the player's audio, feedback timing and remembered difficulty
    pub fn from_settings(kind: GameKind, rules: R, seed: u64, sink: S, settings: &Settings) -> Self {
        let mut session = Session::new(rules, seed).with_feedback_ms(settings.feedback_duration_ms());
        if let Some(difficulty) = settings.starting_difficulty(kind) {
            session.set_difficulty(difficulty);
        }
        let mut view = Self::new(kind, session, AudioManager::from_settings(sink, settings));
        view.pause_on_blur = settings.pause_on_blur;
        view.mute_on_blur = settings.mute_on_blur;
        view
    }

    /// Register the feedback observer (replaces any previous one)
    pub fn on_feedback(&mut self, observer: impl FnMut(&FeedbackEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    /// Rules of the game, only between runs
    pub fn rules_mut(&mut self) -> Option<&mut R> {
        self.session.rules_mut()
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<S> {
        &mut self.audio
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Start (or restart) a run
    pub fn start(&mut self) -> RunId {
        self.audio.silence();
        self.pending.clear();
        let run = self.session.start();
        self.pump();
        run
    }

    /// Feed an action into the current run
    pub fn act(&mut self, action: &R::Action) -> Option<Verdict> {
        let verdict = self.session.act(self.session.run(), action);
        self.pump();
        verdict
    }

    /// Feed an action tagged with the run it was issued for. Actions from an
    /// earlier run are ignored.
    pub fn act_in(&mut self, run: RunId, action: &R::Action) -> Option<Verdict> {
        let verdict = self.session.act(run, action);
        self.pump();
        verdict
    }

    pub fn advance(&mut self, dt_ms: u32) {
        self.session.advance(dt_ms);
        self.pump();
    }

    pub fn toggle_pause(&mut self) -> bool {
        let toggled = self.session.toggle_pause();
        self.pump();
        toggled
    }

    /// Player ended the run
    pub fn end(&mut self) -> bool {
        let ended = self.session.end();
        self.pump();
        ended
    }

    /// Window or tab lost focus
    pub fn on_blur(&mut self) {
        if self.pause_on_blur && self.session.pause() {
            log::info!("{}: auto-paused (focus lost)", self.kind.title());
        }
        self.pump();
        if self.mute_on_blur {
            self.audio.silence();
        }
    }

    /// Store the adapted difficulty so the next visit starts there
    pub fn remember_difficulty(&self, settings: &mut Settings) {
        settings.remember_difficulty(self.kind, self.session.next_difficulty());
    }

    /// Events since the last drain (or start), after cues and feedback were routed.
    /// At most [`MAX_PENDING_EVENTS`] are kept.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.pending.drain(..).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    fn pump(&mut self) {
        let now = self.session.now_ms();
        for event in self.session.drain_events() {
            match &event {
                SessionEvent::Cue(cue) => self.audio.play(*cue, now),
                SessionEvent::Feedback(feedback) => {
                    if let Some(observer) = self.observer.as_mut() {
                        observer(feedback);
                    }
                }
                SessionEvent::PhaseChanged {
                    from: SessionPhase::Active,
                    ..
                } => {
                    let stopped = self.audio.silence();
                    if stopped > 0 {
                        log::debug!("{}: silenced {} voices", self.kind.title(), stopped);
                    }
                }
                _ => {}
            }
            if self.pending.len() == MAX_PENDING_EVENTS {
                self.pending.pop_front();
            }
            self.pending.push_back(event);
        }
    }
}

impl<R: Rules, S: SoundSink> Drop for GameView<R, S> {
    fn drop(&mut self) {
        self.session.teardown();
        self.audio.silence();
    }
}
