use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEvent,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color as TermColor, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use txmenu::config::{Color, Theme};
use txmenu::debug_log;
use txmenu::input::TouchEvent;
use txmenu::menu::{CloseReason, Menu, MenuHost, MenuSpawner, MenuState};
use txmenu::surface::{BufferSurface, Font, Surface, TextStyle, cell_to_pixel};
use txmenu::window::{Coord, Rect as LcdRect};

use super::help::render_help;
use super::input::{KeyAction, PointerTracker, map_key};
use super::toolbar::PageToolbar;

/// Shared status line, written by menu line actions.
type Status = Rc<RefCell<Option<String>>>;

fn set_status(status: &Status, message: impl Into<String>) {
    *status.borrow_mut() = Some(message.into());
}

/// Where the simulated display was drawn in the last frame.
#[derive(Debug, Clone, Copy)]
struct DisplayArea {
    area: Rect,
    scale_x: Coord,
    scale_y: Coord,
}

/// Demo application: a simulated transmitter display in the terminal.
pub struct App {
    host: MenuHost,

    /// Page toolbar, when started with `--toolbar`.
    toolbar: Option<Rc<RefCell<PageToolbar>>>,

    pointer: PointerTracker,

    /// Display placement from the last frame, for mouse mapping.
    display: Option<DisplayArea>,

    /// Whether the help overlay is shown.
    show_help: bool,

    /// Whether the app should quit.
    should_quit: bool,

    /// Status message to display.
    status: Status,

    /// How the most recently closed menu went away.
    last_close: Option<CloseReason>,
}

impl App {
    pub fn new(theme: Theme, with_toolbar: bool) -> Self {
        let toolbar = with_toolbar
            .then(|| Rc::new(RefCell::new(PageToolbar::new(vec!["Model", "Radio", "Tools"]))));

        let mut app = Self {
            host: MenuHost::new(theme),
            toolbar,
            pointer: PointerTracker::new(),
            display: None,
            show_help: false,
            should_quit: false,
            status: Rc::new(RefCell::new(None)),
            last_close: None,
        };
        app.open_model_menu();
        app
    }

    /// Run the application main loop.
    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        terminal.clear()?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            self.note_closing_menus();
            self.host.tick();

            if self.should_quit {
                break;
            }
        }
        self.host.close_all();
        Ok(())
    }

    fn render(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let theme = self.host.theme().clone();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" txmenu {}x{} ", theme.lcd_width, theme.lcd_height));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let (scale_x, scale_y) = BufferSurface::scale_for(inner, theme.lcd_width, theme.lcd_height);
        self.display = Some(DisplayArea {
            area: inner,
            scale_x,
            scale_y,
        });

        {
            let mut surface = BufferSurface::new(frame.buffer_mut(), inner, scale_x, scale_y);
            self.paint_display(&mut surface, &theme);
        }

        let status = self.status_line();
        let status_widget = Paragraph::new(status).style(Style::default().fg(TermColor::Yellow));
        frame.render_widget(status_widget, chunks[1]);

        if self.show_help {
            render_help(frame, area);
        }
    }

    fn paint_display(&mut self, surface: &mut dyn Surface, theme: &Theme) {
        surface.clear(theme.background);

        if !self.host.has_open_menu() {
            surface.draw_text(
                theme.lcd_width / 2,
                theme.lcd_height / 2,
                "Press m for the menu",
                TextStyle::new(theme.text).centered(),
            );
        }

        if let Some(toolbar) = &self.toolbar {
            toolbar.borrow().paint(surface, theme);
        }

        self.host.paint(surface);
    }

    fn status_line(&self) -> String {
        let mut line = self
            .status
            .borrow()
            .clone()
            .unwrap_or_else(|| "? for help, q to quit".to_string());
        if let Some(toolbar) = &self.toolbar {
            line.push_str(&format!("  | page: {}", toolbar.borrow().page_name()));
        }
        if let Some(reason) = self.last_close {
            line.push_str(&format!("  | last close: {:?}", reason));
        }
        line
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match map_key(key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::ToggleHelp => self.show_help = true,
            KeyAction::OpenMenu => {
                if !self.host.has_open_menu() {
                    self.open_model_menu();
                }
            }
            KeyAction::Menu(event) => {
                if !self.host.on_event(event) {
                    set_status(&self.status, "No menu open, press m");
                }
            }
            KeyAction::Ignored => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(display) = self.display else {
            return;
        };
        let Some((x, y)) = cell_to_pixel(
            display.area,
            mouse.column,
            mouse.row,
            display.scale_x,
            display.scale_y,
        ) else {
            return;
        };

        match self.pointer.on_mouse(mouse.kind, x, y) {
            Some(TouchEvent::Tap { x, y }) => {
                self.host.on_touch_end(x, y);
            }
            Some(TouchEvent::Slide {
                x,
                y,
                start_x,
                start_y,
                slide_x,
                slide_y,
            }) => {
                self.host
                    .on_touch_slide(x, y, start_x, start_y, slide_x, slide_y);
            }
            None => {}
        }
    }

    fn note_closing_menus(&mut self) {
        if let Some(reason) = self
            .host
            .menus()
            .iter()
            .filter(|menu| menu.state() == MenuState::Closing)
            .find_map(Menu::close_reason)
        {
            self.last_close = Some(reason);
        }
    }

    fn open_model_menu(&mut self) {
        let theme = self.host.theme().clone();
        let spawner = self.host.spawner();
        let status = self.status.clone();
        let toolbar = self.toolbar.clone();

        let menu = self.host.open_menu();
        menu.set_title("Model");

        for label in ["Select model", "Copy model", "Move model"] {
            let status = status.clone();
            menu.add_line(label, move || set_status(&status, format!("{label}: done")));
        }

        // Empty label shows the placeholder
        let placeholder_status = status.clone();
        menu.add_line("", move || set_status(&placeholder_status, "Placeholder line pressed"));

        let swatch_status = status.clone();
        let line_height = theme.line_height;
        menu.add_custom_line(
            move |surface, x, y, flags| {
                let font = surface.font_height(Font::Normal);
                let swatch = Color::rgb(0xe0, 0x40, 0x40);
                surface.fill_rect(
                    LcdRect::new(x + 10, y + line_height / 4, 20, line_height / 2),
                    swatch,
                );
                surface.draw_text(
                    x + 40,
                    y + (line_height - font) / 2,
                    "Model color",
                    TextStyle::new(flags.color),
                );
            },
            move || set_status(&swatch_status, "Model color picked"),
        );

        let more_status = status.clone();
        menu.add_line("More...", move || open_channel_menu(&spawner, &more_status));

        let cancel_status = status;
        menu.set_cancel_handler(move || set_status(&cancel_status, "Menu cancelled"));

        if let Some(toolbar) = &toolbar {
            menu.set_toolbar(toolbar);
            menu.set_window_rect(PageToolbar::menu_rect(&theme));
        }

        debug_log::log_debug(&format!("opened model menu {}", menu.id()));
    }
}

/// Queue a long menu, opened once the current one is torn down.
fn open_channel_menu(spawner: &MenuSpawner, status: &Status) {
    let status = status.clone();
    spawner.open(move |menu| {
        menu.set_title("Channels");
        for channel in 1..=16 {
            let status = status.clone();
            menu.add_line(format!("Channel {channel}"), move || {
                set_status(&status, format!("Channel {channel} selected"));
            });
        }
        menu.select(0);
    });
}
