//! Echo Console: a script-engine stand-in reading from a line editor.
//!
//! The consumer thread blocks in `read_line` exactly as it would on a real
//! terminal; the UI loop on the main thread never blocks. Type lines, use
//! Up/Down for history and Tab to complete. Ctrl-D ends input, Esc quits.
//! Engine transitions are logged to `echo_console.log`; set `RUST_LOG` to
//! change the filter.

use crossbeam_channel::{bounded, select, Receiver};
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use flywheel_readline::logging::{init_logging, LogConfig};
use flywheel_readline::{
    InputActor, InputEvent, KeyCode, LineEditor, ReadlineConfig, UiThread, WordCompleter,
};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const WORDS: &[&str] = &["echo", "exit", "help", "history", "print", "println", "puts"];

/// Consumer: prompts, reads, answers. Runs until input ends.
fn run_consumer(readline: &flywheel_readline::Readline) -> io::Result<()> {
    let mut out = readline.output();
    let mut count = 0u32;
    while let Some(line) = readline.read_line("echo>")? {
        count += 1;
        if line == "exit" {
            break;
        }
        writeln!(out, "=> {line:?} ({} bytes)", line.len())?;
    }
    writeln!(out, "input ended after {count} lines")?;
    out.flush()
}

fn draw(editor: &LineEditor, stdout: &mut io::Stdout, height: u16) -> io::Result<()> {
    let lines = editor.visible_lines(usize::from(height));
    queue!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for (row, line) in lines.iter().enumerate() {
        let color = if line.starts_with("=>") {
            Color::Blue
        } else {
            Color::Reset
        };
        #[allow(clippy::cast_possible_truncation)]
        queue!(
            stdout,
            cursor::MoveTo(0, row as u16),
            SetForegroundColor(color),
            Print(line),
            ResetColor
        )?;
    }
    if let Some(menu) = editor.completion_menu() {
        let row = lines.len().min(usize::from(height.saturating_sub(1)));
        #[allow(clippy::cast_possible_truncation)]
        queue!(
            stdout,
            cursor::MoveTo(0, row as u16),
            SetForegroundColor(Color::DarkGrey),
            Print(menu.items().join("  ")),
            ResetColor
        )?;
    }

    #[allow(clippy::cast_possible_truncation)]
    let caret_row = lines.len().saturating_sub(1) as u16;
    #[allow(clippy::cast_possible_truncation)]
    let caret_col = editor.caret_column() as u16;
    queue!(stdout, cursor::MoveTo(caret_col, caret_row))?;
    stdout.flush()
}

fn ui_loop(
    editor: &mut LineEditor,
    input_rx: &Receiver<InputEvent>,
    done_rx: &Receiver<()>,
    mut height: u16,
) -> io::Result<()> {
    let mut stdout = io::stdout();
    loop {
        select! {
            recv(input_rx) -> event => {
                let Ok(event) = event else { break };
                match event {
                    InputEvent::Key { code: KeyCode::Esc, .. } if editor.completion_menu().is_none() => break,
                    InputEvent::Resize { height: h, .. } => height = h,
                    _ => {}
                }
                editor.handle_input(&event);
            }
            recv(done_rx) -> _ => {
                editor.pump();
                draw(editor, &mut stdout, height)?;
                thread::sleep(Duration::from_millis(800));
                break;
            }
            default(Duration::from_millis(16)) => {}
        }

        editor.pump();
        if editor.needs_redraw() {
            draw(editor, &mut stdout, height)?;
            editor.clear_redraw();
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    // Logs go to a file; stderr would tear the raw-mode screen.
    init_logging(&LogConfig {
        level: "flywheel_readline=debug".to_string(),
        file: Some("echo_console.log".into()),
    })
    .map_err(io::Error::other)?;

    let config = ReadlineConfig::default().with_banner("Echo console. Ctrl-D ends input, Esc quits.");
    let poll_timeout = config.input_poll_timeout;

    let mut editor = LineEditor::new(config, UiThread::current());
    editor.set_completer(Box::new(WordCompleter::new(WORDS.iter().copied())));
    let readline = editor.readline();

    let (_, height) = terminal::size()?;
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let (input_tx, input_rx) = bounded::<InputEvent>(64);
    let input_actor = InputActor::spawn(input_tx, poll_timeout);

    let (done_tx, done_rx) = bounded::<()>(1);
    let consumer = thread::Builder::new()
        .name("echo-consumer".to_string())
        .spawn(move || {
            let result = run_consumer(&readline);
            let _ = done_tx.send(());
            result
        })?;

    let result = ui_loop(&mut editor, &input_rx, &done_rx, height);

    // Unblocks the consumer if it is still waiting for a line.
    editor.dispose();
    let _ = consumer.join();
    input_actor.join();

    execute!(stdout, LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;
    result
}
