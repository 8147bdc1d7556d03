use super::InkportGame;
use bracket_lib::prelude::*;

pub enum AppState {
    Menu,
    Running(Box<InkportGame>),
}

/// Top level application state machine wrapping the menu and a session.
pub struct InkportApp {
    state: AppState,
}

impl InkportApp {
    pub fn new() -> Self {
        Self {
            state: AppState::Menu,
        }
    }

    fn update_state(&mut self, ctx: &mut BTerm) -> bool {
        use VirtualKeyCode::*;
        match &mut self.state {
            AppState::Menu => match ctx.key {
                Some(Return) => match InkportGame::new(0) {
                    Ok(mut game) => {
                        game.start();
                        self.state = AppState::Running(Box::new(game));
                        false
                    }
                    Err(e) => {
                        log::error!("failed to start session: {}", e);
                        true
                    }
                },
                Some(Q) => true,
                _ => false,
            },
            AppState::Running(game) => {
                game.tick(ctx);
                false
            }
        }
    }
}

impl Default for InkportApp {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for InkportApp {
    fn tick(&mut self, ctx: &mut BTerm) {
        let quit = self.update_state(ctx);
        if quit {
            ctx.quit();
            return;
        }
        match &self.state {
            AppState::Menu => {
                ctx.cls();
                ctx.print_centered(10, "Inkport");
                ctx.print_centered(12, "A small harbor town needs a mayor.");
                ctx.print_centered(14, "Enter: Begin the day");
                ctx.print_centered(15, "Press Q to Quit");
            }
            AppState::Running(_) => {
                // game.tick already rendered
            }
        }
    }
}
