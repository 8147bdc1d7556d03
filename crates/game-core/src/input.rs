use bracket_lib::prelude::VirtualKeyCode;
use common::GameResult;

/// Configuration for keyboard controls.
#[derive(Clone, Debug)]
pub struct InputConfig {
    pub left: VirtualKeyCode,
    pub right: VirtualKeyCode,
    pub up: VirtualKeyCode,
    pub down: VirtualKeyCode,
    pub up_left: VirtualKeyCode,
    pub up_right: VirtualKeyCode,
    pub down_left: VirtualKeyCode,
    pub down_right: VirtualKeyCode,
    pub greet: VirtualKeyCode,
    pub mailbox: VirtualKeyCode,
    pub accept: VirtualKeyCode,
    pub complete: VirtualKeyCode,
    pub prev_task: VirtualKeyCode,
    pub next_task: VirtualKeyCode,
    pub pause: VirtualKeyCode,
    pub fast: VirtualKeyCode,
    pub end_day: VirtualKeyCode,
    pub help: VirtualKeyCode,
    pub quit: VirtualKeyCode,
    pub scroll_up: VirtualKeyCode,
    pub scroll_down: VirtualKeyCode,
    pub colorblind: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        use VirtualKeyCode::*;
        Self {
            left: H,
            right: L,
            up: K,
            down: J,
            up_left: Y,
            up_right: U,
            down_left: B,
            down_right: N,
            greet: Space,
            mailbox: M,
            accept: A,
            complete: C,
            prev_task: Comma,
            next_task: Period,
            pause: P,
            fast: F,
            end_day: Return,
            help: F1,
            quit: Q,
            scroll_up: PageUp,
            scroll_down: PageDown,
            colorblind: false,
        }
    }
}

impl InputConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let mut cfg = Self::default();
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(cfg),
            Err(e) => return Err(e.into()),
        };
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, val) = match line.split_once('=') {
                Some(v) => v,
                None => continue,
            };
            let val = val.trim().trim_matches('"');
            if key.trim() == "colorblind" {
                cfg.colorblind = matches!(val, "true" | "1");
                continue;
            }
            if let Some(kc) = parse_key(val) {
                match key.trim() {
                    "left" => cfg.left = kc,
                    "right" => cfg.right = kc,
                    "up" => cfg.up = kc,
                    "down" => cfg.down = kc,
                    "up_left" => cfg.up_left = kc,
                    "up_right" => cfg.up_right = kc,
                    "down_left" => cfg.down_left = kc,
                    "down_right" => cfg.down_right = kc,
                    "greet" => cfg.greet = kc,
                    "mailbox" => cfg.mailbox = kc,
                    "accept" => cfg.accept = kc,
                    "complete" => cfg.complete = kc,
                    "prev_task" => cfg.prev_task = kc,
                    "next_task" => cfg.next_task = kc,
                    "pause" => cfg.pause = kc,
                    "fast" => cfg.fast = kc,
                    "end_day" => cfg.end_day = kc,
                    "help" => cfg.help = kc,
                    "quit" => cfg.quit = kc,
                    "scroll_up" => cfg.scroll_up = kc,
                    "scroll_down" => cfg.scroll_down = kc,
                    _ => {}
                }
            }
        }
        Ok(cfg)
    }
}

fn parse_key(name: &str) -> Option<VirtualKeyCode> {
    use VirtualKeyCode::*;
    match name.to_ascii_lowercase().as_str() {
        "left" => Some(Left),
        "right" => Some(Right),
        "up" => Some(Up),
        "down" => Some(Down),
        "y" => Some(Y),
        "u" => Some(U),
        "h" => Some(H),
        "j" => Some(J),
        "k" => Some(K),
        "l" => Some(L),
        "b" => Some(B),
        "n" => Some(N),
        "m" => Some(M),
        "a" => Some(A),
        "c" => Some(C),
        "g" => Some(G),
        "p" => Some(P),
        "f" => Some(F),
        "q" => Some(Q),
        "space" => Some(Space),
        "comma" => Some(Comma),
        "period" => Some(Period),
        "return" => Some(Return),
        "f1" => Some(F1),
        "pageup" => Some(PageUp),
        "pagedown" => Some(PageDown),
        _ => None,
    }
}
