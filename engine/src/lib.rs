pub mod app;
pub mod graphics;
pub mod pixels_renderer;
pub mod regression;
pub mod surface;
pub mod ui;

/// Pure game rules: a starting state plus a transition per input.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a `GameLogic` without a window, keeping every state it passes through.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    states: Vec<G::State>,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let initial_state = game.initial_state();
        Self {
            game,
            states: vec![initial_state],
        }
    }

    /// Index of the current state; `0` is the initial state.
    pub fn frame(&self) -> usize {
        self.states.len() - 1
    }

    pub fn state(&self) -> &G::State {
        &self.states[self.frame()]
    }

    pub fn history(&self) -> &[G::State] {
        &self.states
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        let next_state = self.game.step(self.state(), input);
        self.states.push(next_state);
        self.frame()
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        let mut last_frame = self.frame();
        for input in inputs {
            last_frame = self.step(input);
        }
        last_frame
    }
}
