//! Terminal Threes runner (default binary).
//!
//! Runs the frame loop: poll input, advance the game, redraw when something
//! changed, present the diff. The terminal is always restored before an error
//! is reported.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use terminal_threes::core::GameState;
use terminal_threes::input::read_game_input;
use terminal_threes::logging;
use terminal_threes::style::{load_style, load_style_or_default, paths, Style, StyleWatcher};
use terminal_threes::term::{open_backend, Backend, BoardView, EngineConfig, Tui};

/// Fixed RNG seed for reproducible games.
const SEED_ENV: &str = "THREES_SEED";

fn main() -> ExitCode {
    if let Err(err) = logging::init_from_env() {
        eprintln!("terminal-threes: logging disabled: {err:#}");
    }

    let config = EngineConfig::from_env();
    let mut tui = Tui::new(open_backend(config.backend));

    let result = run(&mut tui, &config);

    // Always try to restore terminal state.
    let restored = tui.shutdown();

    match result.and(restored.map_err(Into::into)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "fatal");
            eprintln!("terminal-threes: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(tui: &mut Tui<Box<dyn Backend>>, config: &EngineConfig) -> Result<()> {
    let seed = seed_from_env();
    let style_path = paths::default_style_path();
    let style = style_path.as_deref().map(initial_style).unwrap_or_default();
    let watcher = style_path.as_deref().and_then(open_watcher);

    let (layout, theme) = style.into_parts();
    let mut view = BoardView::new(layout, theme);
    let mut game = GameState::new(seed);
    game.set_anim_seconds(layout.anim_seconds);

    tui.init(config.double_buffered)
        .context("failed to initialize terminal")?;
    info!(
        seed,
        backend = tui.backend().kind().name(),
        fps = config.target_fps,
        "game started"
    );

    loop {
        let mut dirty = tui.begin_frame()?;

        if let Some(watcher) = &watcher {
            if watcher.check_modified() && reload_style(watcher.path(), &mut view, &mut game) {
                dirty = true;
            }
        }

        let input = read_game_input(tui.input());
        let dt = tui.delta_seconds(config.max_delta);
        dirty |= game.update(input, dt);
        if game.should_quit() {
            break;
        }

        if dirty {
            view.render(tui.canvas(), &game);
        }
        tui.end_frame(config.target_fps)?;
    }

    info!("game quit");
    Ok(())
}

fn seed_from_env() -> u32 {
    if let Some(seed) = env::var(SEED_ENV).ok().and_then(|s| s.trim().parse().ok()) {
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn initial_style(path: &Path) -> Style {
    load_style_or_default(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "ignoring style file");
        Style::default()
    })
}

fn open_watcher(path: &Path) -> Option<StyleWatcher> {
    match StyleWatcher::new(path) {
        Ok(w) => Some(w),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "style hot reload unavailable");
            None
        }
    }
}

/// Returns true when the view changed. A broken file keeps the previous style.
fn reload_style(path: &Path, view: &mut BoardView, game: &mut GameState) -> bool {
    match load_style(path) {
        Ok(style) => {
            let (layout, theme) = style.into_parts();
            view.set_style(layout, theme);
            game.set_anim_seconds(layout.anim_seconds);
            info!(path = %path.display(), "style reloaded");
            true
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "style reload failed");
            false
        }
    }
}
