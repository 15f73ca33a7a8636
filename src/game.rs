use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{prelude::*, widgets::*};
use std::time::Instant;

use crate::config::SimConfig;
use crate::input::{HeldKeys, Turn};
use crate::render::ArenaView;
use crate::sim::{Simulation, StepResult};

#[derive(Debug)]
pub enum GameState {
    ReadyToStart,
    Playing(Simulation),
    Paused(Simulation),
    GameOver {
        sim: Simulation,
        final_score: u32,
        // segments greyed out so far, head first
        fade: usize,
    },
    Exit,
}

pub struct Game {
    pub state: GameState,
    config: SimConfig,
    keys: HeldKeys,
    session_rng: StdRng,
    high_score: u32,
    last_score: Option<u32>,
}

fn turn_for(code: KeyCode) -> Option<Turn> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Turn::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Turn::Right),
        _ => None,
    }
}

fn fade_step(len: usize) -> usize {
    1 + len / 240
}

impl Game {
    pub fn new(config: SimConfig, keys: HeldKeys) -> Self {
        let session_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Game {
            state: GameState::ReadyToStart,
            config,
            keys,
            session_rng,
            high_score: 0,
            last_score: None,
        }
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    fn start(&mut self) -> GameState {
        let config = SimConfig {
            seed: Some(self.session_rng.gen()),
            ..self.config.clone()
        };
        self.keys.clear();
        match Simulation::new(config) {
            Ok(sim) => {
                info!("New game, {} segments", sim.len());
                GameState::Playing(sim)
            }
            Err(e) => {
                error!("Cannot start game: {}", e);
                GameState::ReadyToStart
            }
        }
    }

    fn finish(&mut self, sim: Simulation) -> GameState {
        let final_score = sim.score();
        if final_score > self.high_score {
            self.high_score = final_score;
        }
        self.last_score = Some(final_score);
        self.keys.clear();
        info!("Game over after {} ticks, score {}", sim.ticks(), final_score);
        GameState::GameOver {
            sim,
            final_score,
            fade: 0,
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let score_text = match &self.state {
            GameState::Playing(sim) | GameState::Paused(sim) => format!(
                "SNAKE    High Score: {}    Score: {}    Length: {}",
                self.high_score,
                sim.score(),
                sim.len()
            ),
            _ => format!("SNAKE    High Score: {}", self.high_score),
        };

        let layout = Layout::default()
            .direction(layout::Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + scores
                Constraint::Min(0),    // Plane
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(score_text)
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL)),
            layout[0],
        );

        match &self.state {
            GameState::ReadyToStart => {
                frame.render_widget(
                    Paragraph::new("Press SPACE to start, LEFT/RIGHT to steer")
                        .alignment(Alignment::Center)
                        .block(Block::default().borders(Borders::ALL)),
                    layout[1],
                );
            }
            GameState::Playing(sim) => {
                let block = Block::default().title("Playing").borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);
                frame.render_widget(block, layout[1]);
                frame.render_widget(
                    ArenaView::new(*sim.torus(), sim.chain(), sim.apple()),
                    inner_area,
                );
            }
            GameState::Paused(sim) => {
                let block = Block::default()
                    .title("Paused. Press SPACE to continue")
                    .borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);
                frame.render_widget(block, layout[1]);
                frame.render_widget(
                    ArenaView::new(*sim.torus(), sim.chain(), sim.apple()),
                    inner_area,
                );
            }
            GameState::GameOver {
                sim,
                final_score,
                fade,
            } => {
                let block = Block::default().borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);
                frame.render_widget(block, layout[1]);
                frame.render_widget(
                    ArenaView::new(*sim.torus(), sim.chain(), sim.apple()).greyed(*fade),
                    inner_area,
                );
                if *fade > sim.len() {
                    frame.render_widget(
                        Paragraph::new(format!(
                            "GAME OVER\nFinal Score: {}\nPress SPACE to play again",
                            final_score
                        ))
                        .alignment(Alignment::Center),
                        inner_area,
                    );
                }
            }
            GameState::Exit => {}
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            if let Some(turn) = turn_for(key.code) {
                self.keys.release(turn);
            }
            return;
        }
        if key.kind == KeyEventKind::Repeat && turn_for(key.code).is_none() {
            return;
        }

        let state = std::mem::replace(&mut self.state, GameState::Exit);
        self.state = match state {
            GameState::ReadyToStart => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') => self.start(),
                _ => GameState::ReadyToStart,
            },
            GameState::Playing(sim) => match key.code {
                KeyCode::Char('q') => self.finish(sim),
                KeyCode::Esc => {
                    self.last_score = Some(sim.score());
                    GameState::Exit
                }
                KeyCode::Char(' ') => {
                    self.keys.clear();
                    GameState::Paused(sim)
                }
                code => {
                    if let Some(turn) = turn_for(code) {
                        self.keys.press(turn, now);
                    }
                    GameState::Playing(sim)
                }
            },
            GameState::Paused(sim) => match key.code {
                KeyCode::Char('q') => self.finish(sim),
                KeyCode::Esc => {
                    self.last_score = Some(sim.score());
                    GameState::Exit
                }
                KeyCode::Char(' ') => GameState::Playing(sim),
                _ => GameState::Paused(sim),
            },
            GameState::GameOver {
                sim,
                final_score,
                fade,
            } => match key.code {
                KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') | KeyCode::Char('q') => GameState::ReadyToStart,
                _ => GameState::GameOver {
                    sim,
                    final_score,
                    fade,
                },
            },
            GameState::Exit => GameState::Exit,
        };
    }

    pub fn update(&mut self, now: Instant) {
        let state = std::mem::replace(&mut self.state, GameState::Exit);
        self.state = match state {
            GameState::Playing(mut sim) => match sim.tick(self.keys.steering(now)) {
                StepResult::Collision { .. } => self.finish(sim),
                StepResult::Nommed(score) => {
                    info!("Score {}, length {}", score, sim.len());
                    GameState::Playing(sim)
                }
                StepResult::Ongoing => GameState::Playing(sim),
            },
            GameState::GameOver {
                sim,
                final_score,
                fade,
            } => {
                let fade = if fade > sim.len() {
                    fade
                } else {
                    fade + fade_step(sim.len())
                };
                GameState::GameOver {
                    sim,
                    final_score,
                    fade,
                }
            }
            other => other,
        };
    }
}
