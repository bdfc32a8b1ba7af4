use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::cloze::make_rng;
use crate::export::write_export;
use crate::session::{EMPTY_RESULT_MESSAGE, Session};
use crate::tui::{Editor, Theme};
use crate::utils::{flatten_error, pluralize};

const FLASH_SECS: f64 = 2.0;

struct Status {
    message: String,
    ok: bool,
    at: Instant,
}

struct Studio {
    editor: Editor,
    session: Session,
    rng: StdRng,
    output: PathBuf,
    status: Option<Status>,
    view_height: usize,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(initial_text: String, output: PathBuf, seed: Option<u64>) -> Result<()> {
    let mut studio = Studio {
        editor: Editor::from_text(&initial_text),
        session: Session::with_input(initial_text),
        rng: make_rng(seed),
        output,
        status: None,
        view_height: 0,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.show_cursor()?;

    let loop_result = event_loop(&mut terminal, &mut studio);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    loop_result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    studio: &mut Studio,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, studio))?;

        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Flow::Quit = studio.handle_key(key) {
                    return Ok(());
                }
            }
            Event::Paste(text) => {
                studio.editor.insert_str(&text);
                studio.sync_input();
            }
            _ => {}
        }
    }
}

impl Studio {
    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('g') if ctrl => {
                let blanks = self.session.generate(&mut self.rng).blank_count();
                self.flash(format!("Generated {}.", pluralize("blank", blanks)), true);
            }
            KeyCode::Char('t') if ctrl => self.session.cycle_strategy(),
            KeyCode::Char('u') if ctrl => self.session.increment_custom_count(),
            KeyCode::Char('d') if ctrl => self.session.decrement_custom_count(),
            KeyCode::Char('s') if ctrl => self.export(),
            KeyCode::Char(c) if !ctrl => self.edit(|editor| editor.insert_char(c)),
            KeyCode::Enter => self.edit(Editor::insert_newline),
            KeyCode::Tab => self.edit(|editor| editor.insert_char('\t')),
            KeyCode::Backspace => self.edit(Editor::backspace),
            KeyCode::Delete => self.edit(Editor::delete),
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.move_home(),
            KeyCode::End => self.editor.move_end(),
            KeyCode::PageUp => {
                for _ in 0..self.view_height.max(1) {
                    self.editor.move_up();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..self.view_height.max(1) {
                    self.editor.move_down();
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn edit(&mut self, action: impl FnOnce(&mut Editor)) {
        action(&mut self.editor);
        self.sync_input();
    }

    fn sync_input(&mut self) {
        self.session.set_input(self.editor.text());
    }

    fn export(&mut self) {
        match write_export(&self.output, &self.session.export_snapshot()) {
            Ok(()) => self.flash(format!("Exported to {}.", self.output.display()), true),
            Err(err) => self.flash(format!("Unable to export: {}", flatten_error(&err)), false),
        }
    }

    fn flash(&mut self, message: String, ok: bool) {
        self.status = Some(Status {
            message,
            ok,
            at: Instant::now(),
        });
    }

    fn live_status(&self) -> Option<&Status> {
        self.status
            .as_ref()
            .filter(|status| status.at.elapsed().as_secs_f64() < FLASH_SECS)
    }
}

fn draw(frame: &mut Frame<'_>, studio: &mut Studio) {
    let area = frame.area();
    frame.render_widget(Theme::backdrop(), area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(area);

    studio.view_height = chunks[0].height.saturating_sub(2) as usize;
    studio.editor.ensure_cursor_visible(studio.view_height.max(1));

    let input = Paragraph::new(studio.editor.text())
        .block(Theme::panel("Enter your text"))
        .scroll((studio.editor.scroll_top() as u16, 0));
    frame.render_widget(input, chunks[0]);

    frame.render_widget(settings_panel(&studio.session), chunks[1]);
    frame.render_widget(result_panel(&studio.session), chunks[2]);
    frame.render_widget(help_panel(studio), chunks[3]);

    place_cursor(frame, chunks[0], &studio.editor);
}

fn settings_panel(session: &Session) -> Paragraph<'static> {
    Paragraph::new(settings_line(session)).block(Theme::panel("Settings"))
}

fn settings_line(session: &Session) -> Line<'static> {
    let mut spans = vec![
        Theme::span("Word count:"),
        Theme::label_span(format!(" {}", session.word_count())),
        Theme::bullet(),
        Theme::span("Mode:"),
        Theme::label_span(format!(" {}", session.strategy().label())),
    ];
    if session.strategy().uses_count() {
        spans.push(Theme::bullet());
        spans.push(Theme::span("Number of blanks:"));
        spans.push(Theme::label_span(format!(
            " {}",
            session.effective_custom_count()
        )));
    }
    Line::from(spans)
}

fn result_panel(session: &Session) -> Paragraph<'static> {
    let body = match session.result() {
        Some(result) if !result.is_empty() => Theme::cloze_line(result),
        _ => Line::from(Span::styled(EMPTY_RESULT_MESSAGE, Theme::muted())),
    };
    Paragraph::new(body)
        .block(Theme::panel("Generated Cloze Test"))
        .wrap(Wrap { trim: false })
}

fn help_panel(studio: &Studio) -> Paragraph<'static> {
    let mut lines = vec![Line::from(vec![
        Theme::key_chip("Ctrl+G"),
        Theme::span(" generate"),
        Theme::bullet(),
        Theme::key_chip("Ctrl+T"),
        Theme::span(" mode"),
        Theme::bullet(),
        Theme::key_chip("Ctrl+U"),
        Theme::span("/"),
        Theme::key_chip("Ctrl+D"),
        Theme::span(" blanks"),
        Theme::bullet(),
        Theme::key_chip("Ctrl+S"),
        Theme::span(format!(" export to {}", display_name(&studio.output))),
        Theme::bullet(),
        Theme::key_chip("Esc"),
        Theme::span(" exit"),
    ])];
    if let Some(status) = studio.live_status() {
        let style = if status.ok {
            Theme::success()
        } else {
            Theme::danger()
        };
        lines.push(Line::from(Span::styled(status.message.clone(), style)));
    }
    Paragraph::new(lines)
        .block(Theme::panel("Help"))
        .wrap(Wrap { trim: true })
}

fn place_cursor(frame: &mut Frame<'_>, area: Rect, editor: &Editor) {
    let (row, col) = editor.cursor();
    let visible_row = row.saturating_sub(editor.scroll_top());
    let x = area.x + 1 + (col as u16).min(area.width.saturating_sub(2));
    let y = area.y + 1 + (visible_row as u16).min(area.height.saturating_sub(2));
    frame.set_cursor_position((x, y));
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::SeedableRng;

    use super::*;
    use crate::strategy::Strategy;

    fn studio(text: &str, output: PathBuf) -> Studio {
        Studio {
            editor: Editor::from_text(text),
            session: Session::with_input(text),
            rng: StdRng::seed_from_u64(4),
            output,
            status: None,
            view_height: 3,
        }
    }

    fn press(studio: &mut Studio, code: KeyCode, modifiers: KeyModifiers) -> Flow {
        studio.handle_key(KeyEvent::new(code, modifiers))
    }

    fn ctrl(studio: &mut Studio, c: char) -> Flow {
        press(studio, KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_updates_word_count() {
        let mut s = studio("", PathBuf::from("unused.txt"));
        for c in "apple pie".chars() {
            press(&mut s, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert_eq!(s.session.input(), "apple pie");
        assert_eq!(s.session.word_count(), 2);

        press(&mut s, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(s.session.input(), "apple pi");
    }

    #[test]
    fn generate_then_export_writes_displayed_text() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cloze_test.txt");
        let mut s = studio("cat apple test", output.clone());

        ctrl(&mut s, 'g');
        ctrl(&mut s, 's');

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "cat _____ test");
        assert_eq!(Some(written), s.session.display_text());
        assert!(s.live_status().is_some_and(|status| status.ok));
    }

    #[test]
    fn mode_and_count_keys() {
        let mut s = studio("one two three four", PathBuf::from("unused.txt"));
        ctrl(&mut s, 't');
        ctrl(&mut s, 't');
        assert_eq!(s.session.strategy(), Strategy::Custom);

        ctrl(&mut s, 'u');
        ctrl(&mut s, 'u');
        assert_eq!(s.session.custom_count(), 4);
        ctrl(&mut s, 'd');
        assert_eq!(s.session.custom_count(), 3);

        ctrl(&mut s, 'g');
        assert_eq!(s.session.result().map(|r| r.blank_count()), Some(3));
    }

    #[test]
    fn export_failure_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = studio("text", dir.path().to_path_buf());

        ctrl(&mut s, 's');

        let status = s.live_status().unwrap();
        assert!(!status.ok);
        assert!(status.message.starts_with("Unable to export"));
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut s = studio("", PathBuf::from("unused.txt"));
        assert!(matches!(
            press(&mut s, KeyCode::Esc, KeyModifiers::NONE),
            Flow::Quit
        ));
        assert!(matches!(ctrl(&mut s, 'c'), Flow::Quit));
        assert!(matches!(ctrl(&mut s, 'x'), Flow::Continue));
    }

    #[test]
    fn blank_count_shown_is_clamped_to_edited_text() {
        let mut s = studio("one two three", PathBuf::from("unused.txt"));
        s.session.set_strategy(Strategy::Custom);
        s.session.set_custom_count(3);
        press(&mut s, KeyCode::Backspace, KeyModifiers::NONE);
        for _ in 0.."three".len() {
            press(&mut s, KeyCode::Backspace, KeyModifiers::NONE);
        }
        assert_eq!(s.session.input(), "one two");

        let line = settings_line(&s.session);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert!(text.ends_with("Number of blanks: 2"), "got {text}");

        ctrl(&mut s, 'g');
        assert_eq!(s.session.result().map(|r| r.blank_count()), Some(2));
    }

    #[test]
    fn display_name_prefers_file_name() {
        assert_eq!(display_name(Path::new("out/cloze_test.txt")), "cloze_test.txt");
    }
}
