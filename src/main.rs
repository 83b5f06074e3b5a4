use std::io;
use std::time::Instant;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use corkboard::app::BoardApp;
use corkboard::constants::TICK_INTERVAL;
use corkboard::drivers::InputDriver;
use corkboard::drivers::console::ConsoleDriver;
use corkboard::event_loop::{ControlFlow, EventLoop};
use corkboard::richtext::RichText;
use corkboard::spawn::ThreadSpawnRng;
use corkboard::{tracing_sub, ui};

const KEY_HELP: &str = indoc! {"
    Keys:
      Ctrl+P           post the compose box as a note
      Ctrl+B/I/U       toggle bold / italic / underline
      Ctrl+Y, Ctrl+T   cycle note color / paper style
      Ctrl+D or Esc    finish editing a note
      Ctrl+Q           quit

    Mouse:
      drag a note to move it
      rest the pointer on a note: 3s reveals the edit pencil, 5s raises
      the note above the stack (or reports what covers it)
      click the pencil to edit in place, the corner x to delete
"};

#[derive(Debug, Parser)]
#[command(name = "corkboard", version, about, after_help = KEY_HELP)]
struct Cli {
    /// Board name shown in the title row.
    #[arg(long, default_value = "My Board")]
    board_name: String,

    /// Opaque board code shown next to the name.
    #[arg(long, default_value = "ABC123")]
    board_code: String,

    /// Markdown posted onto the board at startup; repeatable.
    #[arg(long = "seed-note", value_name = "MARKDOWN")]
    seed_notes: Vec<String>,

    /// Increase log verbosity on stderr (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> corkboard::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init(tracing_sub::level_for_verbosity(cli.verbose));

    let mut app = BoardApp::new(cli.board_name, cli.board_code, Box::new(ThreadSpawnRng));
    for seed in &cli.seed_notes {
        app.seed_note(RichText::from_markdown(seed));
    }

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut BoardApp,
) -> corkboard::Result<()> {
    let mut event_loop = EventLoop::new(ConsoleDriver::new(), TICK_INTERVAL);
    event_loop.driver().set_mouse_capture(true)?;
    event_loop.run(|_, event| match event {
        Some(Event::Key(key))
            if key.code == KeyCode::Char('q')
                && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Ok(ControlFlow::Quit)
        }
        Some(event) => {
            app.handle_event(&event, Instant::now());
            Ok(ControlFlow::Continue)
        }
        None => {
            app.tick(Instant::now());
            terminal
                .draw(|frame| ui::draw(frame, app))
                .map_err(|e| io::Error::other(e.to_string()))?;
            Ok(ControlFlow::Continue)
        }
    })?;
    Ok(())
}
