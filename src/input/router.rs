//! Routing of key presses into parameter mutations, and the key-script reader thread.

use std::io::BufRead;
use std::marker::PhantomData;
use std::time::Duration;

use crate::clock::ClockHandle;
use crate::foundation::error::{SketchError, SketchResult};
use crate::input::keys::KeyEvent;
use crate::model::store::Mutator;
use crate::scene::Scene;

/// Turns key presses into queued mutations for a scene's parameter store.
///
/// Each press enqueues at most one mutation; nothing is coalesced. The router never touches
/// the parameters directly.
pub struct InputRouter<S: Scene> {
    mutator: Mutator<S::Params>,
    _scene: PhantomData<fn() -> S>,
}

impl<S: Scene> Clone for InputRouter<S> {
    fn clone(&self) -> Self {
        Self {
            mutator: self.mutator.clone(),
            _scene: PhantomData,
        }
    }
}

impl<S: Scene> InputRouter<S> {
    pub fn new(mutator: Mutator<S::Params>) -> Self {
        Self {
            mutator,
            _scene: PhantomData,
        }
    }

    /// Route one key-down event. Returns `true` if a mutation was queued.
    pub fn on_key_pressed(&self, event: KeyEvent) -> bool {
        match S::key_mutation(event) {
            Some(m) => self.mutator.enqueue_boxed(m),
            None => false,
        }
    }
}

/// Counters from a key reader run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputStats {
    /// Key tokens parsed.
    pub keys: u64,
    /// Keys that queued a mutation.
    pub routed: u64,
    /// Tokens that failed to parse.
    pub rejected: u64,
}

enum Token {
    Key(KeyEvent),
    Sleep(Duration),
    Quit,
}

fn parse_token(tok: &str) -> SketchResult<Token> {
    if tok.eq_ignore_ascii_case("quit") || tok.eq_ignore_ascii_case("exit") {
        return Ok(Token::Quit);
    }
    if let Some(ms) = tok.strip_prefix("sleep:") {
        let ms: u64 = ms
            .parse()
            .map_err(|_| SketchError::validation(format!("invalid sleep token '{tok}'")))?;
        return Ok(Token::Sleep(Duration::from_millis(ms)));
    }
    KeyEvent::parse(tok).map(Token::Key)
}

/// Feed key tokens from `reader` into `router` until EOF or a `quit` token.
///
/// Tokens are separated by whitespace or commas; `#` starts a comment running to the end of
/// the line. `sleep:<ms>` pauses the reader and `quit` stops `clock`. Malformed tokens are
/// logged and skipped.
pub fn read_keys<S, R>(
    reader: R,
    router: &InputRouter<S>,
    clock: &ClockHandle,
) -> SketchResult<InputStats>
where
    S: Scene,
    R: BufRead,
{
    let mut stats = InputStats::default();
    for line in reader.lines() {
        let line = line.map_err(|e| SketchError::Other(anyhow::Error::new(e)))?;
        let body = line.split('#').next().unwrap_or_default();
        let tokens = body
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());
        for tok in tokens {
            match parse_token(tok) {
                Ok(Token::Key(ev)) => {
                    stats.keys += 1;
                    if router.on_key_pressed(ev) {
                        stats.routed += 1;
                    }
                }
                Ok(Token::Sleep(d)) => std::thread::sleep(d),
                Ok(Token::Quit) => {
                    tracing::info!("quit requested from input");
                    clock.stop();
                    return Ok(stats);
                }
                Err(e) => {
                    stats.rejected += 1;
                    tracing::warn!("skipping key token: {e}");
                }
            }
            if clock.is_stopped() {
                return Ok(stats);
            }
        }
    }
    Ok(stats)
}

/// Run [`read_keys`] on a dedicated input thread.
pub fn spawn_key_reader<S, R>(
    reader: R,
    router: InputRouter<S>,
    clock: ClockHandle,
) -> std::thread::JoinHandle<SketchResult<InputStats>>
where
    S: Scene + 'static,
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || read_keys(reader, &router, &clock))
}

#[cfg(test)]
#[path = "../../tests/unit/input/router.rs"]
mod tests;
