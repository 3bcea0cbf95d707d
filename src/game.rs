use crate::engine::board::Board;
use crate::engine::direction::Direction;
use crate::engine::grid::Score;
use crate::error::Result;
use crate::scores::ScoreStore;
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::frame::{Layout, View};
use crate::tui::renderer::Renderer;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Outcome {
    Won,
    Lost,
    Quit,
}

impl Outcome {
    pub(crate) fn message(&self) -> &'static str {
        match self {
            Self::Won => "You won!",
            Self::Lost => "Game Over",
            Self::Quit => "Bye!",
        }
    }
}

/// The result of a finished game, reported once the terminal has been released.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) outcome: Outcome,
    pub(crate) score: Score,
    pub(crate) best_score: Score,
}

pub(crate) struct Game<R: Renderer, E: EventSource> {
    board: Board,
    score: Score,
    best_score: Score,
    store: Option<ScoreStore>,
    layout: Layout,
    renderer: R,
    event_source: E,
}

impl<R: Renderer, E: EventSource> Game<R, E> {
    pub(crate) fn new(
        board: Board,
        store: Option<ScoreStore>,
        layout: Layout,
        renderer: R,
        event_source: E,
    ) -> Self {
        let best_score = store.as_ref().map_or(0, |s| s.load());
        Self {
            board,
            score: 0,
            best_score,
            store,
            layout,
            renderer,
            event_source,
        }
    }

    /// A game is over once the goal is reached or no shift can change the board.
    pub(crate) fn is_over(&self) -> bool {
        self.board.won() || !self.board.can_move()
    }

    /// Run consumes the Game and drives the render/input/shift loop until the game ends or the
    /// player quits.
    pub(crate) fn run(mut self) -> Result<Summary> {
        match self.inner_run() {
            Err(e) => {
                self.renderer.recover();
                Err(e)
            }
            Ok(outcome) => Ok(Summary {
                outcome,
                score: self.score,
                best_score: self.best_score,
            }),
        }
    }

    fn inner_run(&mut self) -> Result<Outcome> {
        log::info!("starting game, best score {}", self.best_score);
        loop {
            self.render(None)?;
            if self.is_over() {
                break;
            }
            match self.event_source.next_event()? {
                Event::UserInput(UserInput::Direction(d)) => self.shift(d),
                Event::UserInput(UserInput::Quit) => {
                    log::info!("player quit with score {}", self.score);
                    self.save_best_score();
                    return Ok(Outcome::Quit);
                }
                Event::Resize => self.renderer.clear()?,
            }
        }

        self.save_best_score();
        let outcome = if self.board.won() {
            Outcome::Won
        } else {
            Outcome::Lost
        };
        log::info!(
            "game over: {:?} with score {}, largest tile {}",
            outcome,
            self.score,
            self.board.max_tile()
        );

        // keep the final board on screen until the player acknowledges it
        self.render(Some(&format!("{} Press any key to exit.", outcome.message())))?;
        let _ = self.event_source.next_event()?;
        Ok(outcome)
    }

    fn shift(&mut self, direction: Direction) {
        self.score += self.board.shift(direction);
        if self.score > self.best_score {
            self.best_score = self.score;
        }
    }

    fn render(&mut self, message: Option<&str>) -> Result<()> {
        let (width, _) = self.renderer.size_hint()?;
        let view = View {
            board: &self.board,
            score: self.score,
            best_score: self.best_score,
            message,
        };
        let frame = self.layout.frame(&view, width as usize)?;
        self.renderer.render(&frame)
    }

    fn save_best_score(&mut self) {
        if self.score > self.best_score {
            self.best_score = self.score;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.save(self.best_score) {
                log::warn!(
                    "unable to save best score to {}: {}",
                    store.path().display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use std::rc::Rc;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::grid::Card;
    use crate::engine::spawn::SpawnPolicy;
    use crate::tui::frame::Frame;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Clone, Default)]
    struct Recorder {
        frames: Rc<RefCell<Vec<Frame>>>,
        clears: Rc<RefCell<usize>>,
        recovered: Rc<RefCell<bool>>,
    }

    impl Renderer for Recorder {
        fn size_hint(&self) -> Result<(u16, u16)> {
            Ok((80, 40))
        }

        fn render(&mut self, frame: &Frame) -> Result<()> {
            self.frames.borrow_mut().push(frame.clone());
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            *self.clears.borrow_mut() += 1;
            Ok(())
        }

        fn recover(&mut self) {
            *self.recovered.borrow_mut() = true;
        }
    }

    // replays the given events, then quits; fails once `fail_after` events were handed out
    struct Script {
        events: VecDeque<Event>,
        fail_after: Option<usize>,
        served: usize,
    }

    impl Script {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events: events.into(),
                fail_after: None,
                served: 0,
            }
        }
    }

    impl EventSource for Script {
        fn next_event(&mut self) -> Result<Event> {
            if Some(self.served) == self.fail_after {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "input gone").into());
            }
            self.served += 1;
            Ok(self
                .events
                .pop_front()
                .unwrap_or(Event::UserInput(UserInput::Quit)))
        }
    }

    fn moves(directions: &[Direction]) -> Vec<Event> {
        directions
            .iter()
            .map(|d| Event::UserInput(UserInput::Direction(*d)))
            .collect()
    }

    fn board(cells: Vec<Vec<Card>>, goal: Card) -> Board {
        Board::from_cells(
            cells,
            goal,
            SpawnPolicy::default(),
            SmallRng::seed_from_u64(42),
        )
        .unwrap()
    }

    fn temp_store(name: &str) -> ScoreStore {
        let path = std::env::temp_dir().join(format!(
            "term48-game-{}-{}.scores",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        ScoreStore::new(path)
    }

    #[test]
    fn quit_returns_running_score() -> Result<()> {
        init_logger();
        let recorder = Recorder::default();
        let b = board(
            vec![
                vec![2, 2, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            2048,
        );
        let game = Game::new(
            b,
            None,
            Layout::default(),
            recorder.clone(),
            Script::new(moves(&[Direction::Left])),
        );
        let summary = game.run()?;
        assert_eq!(Outcome::Quit, summary.outcome);
        assert_eq!(4, summary.score);
        assert_eq!(4, summary.best_score);
        // initial render plus one after the shift
        assert_eq!(2, recorder.frames.borrow().len());
        Ok(())
    }

    #[test]
    fn reaching_goal_wins() -> Result<()> {
        init_logger();
        let recorder = Recorder::default();
        let b = board(vec![vec![4, 4], vec![0, 0]], 8);
        let game = Game::new(
            b,
            None,
            Layout::default(),
            recorder.clone(),
            Script::new(moves(&[Direction::Right])),
        );
        let summary = game.run()?;
        assert_eq!(Outcome::Won, summary.outcome);
        assert_eq!(8, summary.score);
        let frames = recorder.frames.borrow();
        let last = frames.last().unwrap();
        assert!(last
            .lines()
            .iter()
            .any(|l| l.text().contains("You won!")));
        Ok(())
    }

    #[test]
    fn stuck_board_is_lost_without_input() -> Result<()> {
        init_logger();
        let b = board(vec![vec![2, 4], vec![4, 2]], 2048);
        let game = Game::new(
            b,
            None,
            Layout::default(),
            Recorder::default(),
            Script::new(vec![]),
        );
        assert!(game.is_over());
        let summary = game.run()?;
        assert_eq!(Outcome::Lost, summary.outcome);
        assert_eq!(0, summary.score);
        Ok(())
    }

    #[test]
    fn noop_moves_do_not_score() -> Result<()> {
        init_logger();
        let b = board(
            vec![
                vec![2, 4, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            2048,
        );
        let game = Game::new(
            b,
            None,
            Layout::default(),
            Recorder::default(),
            Script::new(moves(&[Direction::Left, Direction::Up, Direction::Left])),
        );
        let summary = game.run()?;
        assert_eq!(0, summary.score);
        Ok(())
    }

    #[test]
    fn resize_clears_and_rerenders() -> Result<()> {
        init_logger();
        let recorder = Recorder::default();
        let b = board(vec![vec![2, 0], vec![0, 0]], 2048);
        let game = Game::new(
            b,
            None,
            Layout::default(),
            recorder.clone(),
            Script::new(vec![Event::Resize, Event::Resize]),
        );
        game.run()?;
        assert_eq!(2, *recorder.clears.borrow());
        assert_eq!(3, recorder.frames.borrow().len());
        Ok(())
    }

    #[test]
    fn best_score_is_loaded_and_saved() -> Result<()> {
        init_logger();
        let store = temp_store("best");
        store.save(2)?;
        let b = board(vec![vec![4, 4], vec![0, 0]], 2048);
        let game = Game::new(
            b,
            Some(store.clone()),
            Layout::default(),
            Recorder::default(),
            Script::new(moves(&[Direction::Left])),
        );
        let summary = game.run()?;
        assert_eq!(8, summary.score);
        assert_eq!(8, summary.best_score);
        assert_eq!(8, store.load());
        fs::remove_file(store.path())?;
        Ok(())
    }

    #[test]
    fn lower_score_keeps_best() -> Result<()> {
        init_logger();
        let store = temp_store("keep");
        store.save(5000)?;
        let b = board(vec![vec![4, 4], vec![0, 0]], 2048);
        let game = Game::new(
            b,
            Some(store.clone()),
            Layout::default(),
            Recorder::default(),
            Script::new(moves(&[Direction::Left])),
        );
        let summary = game.run()?;
        assert_eq!(8, summary.score);
        assert_eq!(5000, summary.best_score);
        assert_eq!(5000, store.load());
        fs::remove_file(store.path())?;
        Ok(())
    }

    #[test]
    fn input_failure_recovers_terminal() {
        init_logger();
        let recorder = Recorder::default();
        let b = board(vec![vec![2, 0], vec![0, 0]], 2048);
        let mut script = Script::new(vec![]);
        script.fail_after = Some(0);
        let game = Game::new(b, None, Layout::default(), recorder.clone(), script);
        assert!(game.run().is_err());
        assert!(*recorder.recovered.borrow());
    }

    #[test]
    fn random_play_until_the_end() -> Result<()> {
        init_logger();
        let b = Board::new(4, 2048, SmallRng::seed_from_u64(7))?;
        let directions = (0..5000)
            .map(|i| Direction::ALL[i % 4])
            .collect::<Vec<Direction>>();
        let game = Game::new(
            b,
            None,
            Layout::default(),
            Recorder::default(),
            Script::new(moves(&directions)),
        );
        let summary = game.run()?;
        assert!(summary.score > 0);
        assert_eq!(summary.score, summary.best_score);
        Ok(())
    }
}
