//! Headless demo: plays each game with a scripted player and logs the results.
//!
//! Usage: `neurobridge-games [game|all] [seed]`. Set `NEUROBRIDGE_SETTINGS` to a JSON
//! file to load preferences from it and store the adapted difficulties back.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use neurobridge_games::GameKind;
    use neurobridge_games::audio::LogSink;
    use neurobridge_games::games::{
        Answer, BreathPattern, Breathing, BubblePop, FocusFlow, FocusForest, FocusFrenzy,
        MathRescue, MemoryMatch, PatternRecall, ScenarioQuiz, SensoryAction, SensorySort,
        StoryAction, StoryBuilder, TimeTurtle, TurtleAction, TurtlePhase, WordBuilder,
    };
    use neurobridge_games::settings::Settings;
    use neurobridge_games::sim::{Color, EntityId, Rules, Session, SessionPhase};
    use neurobridge_games::view::GameView;

    /// Host frame step
    const STEP_MS: u32 = 250;
    /// Longest any demo run is allowed to go
    const MAX_DEMO_MS: u32 = 180_000;
    /// Breathing never ends by itself
    const BREATHING_DEMO_MS: u32 = 20_000;

    fn play<R: Rules>(
        kind: GameKind,
        rules: R,
        seed: u64,
        settings: &mut Settings,
        budget_ms: u32,
        mut choose: impl FnMut(&Session<R>) -> Option<R::Action>,
    ) {
        log::info!("=== {} ===", kind.title());
        let mut view = GameView::from_settings(kind, rules, seed, LogSink::default(), settings);
        view.on_feedback(|f| log::info!("  [{:?}] {}", f.kind, f.message));
        view.start();

        let mut elapsed = 0;
        while view.session().phase() == SessionPhase::Active && elapsed < budget_ms {
            if let Some(action) = choose(view.session()) {
                view.act(&action);
            }
            view.advance(STEP_MS);
            elapsed += STEP_MS;
        }
        view.end();

        match view.session().last_summary() {
            Some(summary) => log::info!(
                "{}: {:?} after {}s, score {} (accuracy {}%, best streak {}), next difficulty {}",
                kind.title(),
                summary.reason,
                summary.elapsed_secs,
                summary.score.score,
                summary.score.accuracy,
                summary.score.best_streak,
                summary.next_difficulty
            ),
            None => log::warn!("{}: no summary", kind.title()),
        }
        view.remember_difficulty(settings);
    }

    fn bubble(session: &Session<BubblePop>) -> Option<EntityId> {
        let rule = session.rules().rule()?;
        session.board().live().find(|b| rule.matches(&b.attrs)).map(|b| b.id)
    }

    fn math(session: &Session<MathRescue>) -> Option<Answer> {
        let alien = session.board().live().next()?;
        Some(Answer {
            alien: alien.id,
            value: alien.attrs.problem()?.answer,
        })
    }

    fn word(session: &Session<WordBuilder>) -> Option<EntityId> {
        let rules = session.rules();
        let next = rules.current().word.to_uppercase().chars().nth(rules.built().chars().count())?;
        session
            .board()
            .live()
            .find(|t| t.attrs.lexical().is_some_and(|l| l.starts_with(next)))
            .map(|t| t.id)
    }

    fn frenzy(session: &Session<FocusFrenzy>) -> Option<EntityId> {
        session.board().live().next().map(|t| t.id)
    }

    /// Perfect memory: always knows where the partner card is
    fn memory(session: &Session<MemoryMatch>) -> Option<EntityId> {
        let board = session.board();
        match session.rules().face_up() {
            [] => board.live().next().map(|c| c.id),
            [first] => {
                let picture = board.get(*first)?.attrs.picture();
                board
                    .live()
                    .find(|c| c.id != *first && c.attrs.picture() == picture)
                    .map(|c| c.id)
            }
            _ => None,
        }
    }

    fn sensory(session: &Session<SensorySort>) -> Option<SensoryAction> {
        let board = session.board();
        if let Some(sense) = session.rules().selected() {
            if let Some(item) = board.live().find(|e| e.attrs.sense() == Some(sense)) {
                return Some(SensoryAction::Pick(item.id));
            }
        }
        board
            .live()
            .find_map(|e| e.attrs.sense())
            .map(SensoryAction::ChooseSense)
    }

    fn flow(session: &Session<FocusFlow>) -> Option<EntityId> {
        session.rules().target()
    }

    fn quiz(session: &Session<ScenarioQuiz>) -> Option<usize> {
        let rules = session.rules();
        if rules.is_locked() {
            return None;
        }
        rules.scenario()?.correct_choice()
    }

    /// Predicts each task exactly and "does" it in a few seconds
    fn turtle(session: &Session<TimeTurtle>) -> Option<TurtleAction> {
        let rules = session.rules();
        match rules.phase() {
            TurtlePhase::Prediction => Some(TurtleAction::Predict {
                minutes: rules.task()?.actual_secs / 60,
            }),
            TurtlePhase::Execution if !rules.is_running() => Some(TurtleAction::StartTimer),
            TurtlePhase::Execution if rules.elapsed_secs() >= 3 => Some(TurtleAction::Done),
            TurtlePhase::Execution => None,
            TurtlePhase::Review => Some(TurtleAction::NextTask),
        }
    }

    /// Alex, proud, helped clean up, classroom; then finish
    fn story(session: &Session<StoryBuilder>) -> Option<StoryAction> {
        const SCRIPT: [usize; 4] = [0, 9, 4, 12];
        let chosen = session.rules().chosen().count();
        Some(match SCRIPT.get(chosen) {
            Some(idx) => StoryAction::Add(*idx),
            None => StoryAction::Finish,
        })
    }

    pub fn run(filter: Option<GameKind>, seed: u64) {
        let settings_path = std::env::var("NEUROBRIDGE_SETTINGS").ok();
        let mut settings = match &settings_path {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };

        let wanted = |kind: GameKind| filter.is_none_or(|f| f == kind);

        if wanted(GameKind::BubblePop) {
            play(GameKind::BubblePop, BubblePop::new(), seed, &mut settings, MAX_DEMO_MS, bubble);
        }
        if wanted(GameKind::MathRescue) {
            play(GameKind::MathRescue, MathRescue::new(), seed, &mut settings, MAX_DEMO_MS, math);
        }
        if wanted(GameKind::PatternRecall) {
            let mut seen: Vec<Color> = Vec::new();
            play(
                GameKind::PatternRecall,
                PatternRecall::new(),
                seed,
                &mut settings,
                MAX_DEMO_MS,
                move |session: &Session<PatternRecall>| {
                    let rules = session.rules();
                    if let Some(sequence) = rules.revealed() {
                        seen = sequence.to_vec();
                        return None;
                    }
                    if !rules.accepting() {
                        return None;
                    }
                    seen.get(rules.entered().len()).copied()
                },
            );
        }
        if wanted(GameKind::WordBuilder) {
            play(GameKind::WordBuilder, WordBuilder::new(), seed, &mut settings, MAX_DEMO_MS, word);
        }
        if wanted(GameKind::FocusFrenzy) {
            play(GameKind::FocusFrenzy, FocusFrenzy::new(), seed, &mut settings, MAX_DEMO_MS, frenzy);
        }
        if wanted(GameKind::MemoryMatch) {
            play(GameKind::MemoryMatch, MemoryMatch::new(), seed, &mut settings, MAX_DEMO_MS, memory);
        }
        if wanted(GameKind::SensorySort) {
            play(GameKind::SensorySort, SensorySort::new(), seed, &mut settings, MAX_DEMO_MS, sensory);
        }
        if wanted(GameKind::Breathing) {
            play(
                GameKind::Breathing,
                Breathing::new(BreathPattern::Box),
                seed,
                &mut settings,
                BREATHING_DEMO_MS,
                |_| None,
            );
        }

        if wanted(GameKind::FocusFlow) {
            play(GameKind::FocusFlow, FocusFlow::new(), seed, &mut settings, MAX_DEMO_MS, flow);
        }
        if wanted(GameKind::FocusForest) {
            // an idle player, to show the nudges
            play(GameKind::FocusForest, FocusForest::new(), seed, &mut settings, MAX_DEMO_MS, |_| None);
        }
        if wanted(GameKind::TimeTurtle) {
            play(GameKind::TimeTurtle, TimeTurtle::new(), seed, &mut settings, MAX_DEMO_MS, turtle);
        }
        if wanted(GameKind::EmotionExplorer) {
            play(GameKind::EmotionExplorer, ScenarioQuiz::emotions(), seed, &mut settings, MAX_DEMO_MS, quiz);
        }
        if wanted(GameKind::ConversationQuest) {
            play(
                GameKind::ConversationQuest,
                ScenarioQuiz::conversation(),
                seed,
                &mut settings,
                MAX_DEMO_MS,
                quiz,
            );
        }

        if wanted(GameKind::StoryBuilder) {
            play(GameKind::StoryBuilder, StoryBuilder::new(), seed, &mut settings, MAX_DEMO_MS, story);
        }

        if let Some(path) = settings_path {
            if let Err(e) = settings.save(&path) {
                log::warn!("Could not save settings to {}: {}", path, e);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("NeuroBridge games (headless demo) starting...");

    let mut args = std::env::args().skip(1);
    let filter = match args.next().as_deref() {
        None | Some("all") => None,
        Some(name) => match neurobridge_games::GameKind::from_name(name) {
            Some(kind) => Some(kind),
            None => {
                log::error!("Unknown game '{}'", name);
                std::process::exit(2);
            }
        },
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    log::info!("Seed: {}", seed);

    demo::run(filter, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library; there is no standalone wasm binary
}
