use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Text},
    widgets::{
        Block, BorderType, Cell, HighlightSpacing, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, TableState,
    },
};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{INFO_TEXT, ITEM_HEIGHT, PALETTES, POLL_DURATION_MS};
use crate::data::Asset;
use crate::feed::{FeedState, InfiniteScroll, PaginatedAssetFeed, ScrollListener, ViewportMetrics};
use crate::ui::TableColors;

const HEADER: [&str; 5] = ["Rank", "Icon", "Name", "Price (USD)", "Market Cap (USD)"];

/// Text of one table row.
pub fn asset_cells(asset: &Asset, show_icon_url: bool) -> [String; 5] {
    let icon = if show_icon_url {
        asset.icon_url()
    } else {
        asset.symbol.clone()
    };
    [
        asset.rank.clone(),
        icon,
        asset.name.clone(),
        asset.price_display(),
        asset.market_cap_display(),
    ]
}

pub fn status_line(state: &FeedState) -> String {
    let activity = if state.is_loading {
        "loading"
    } else if !state.has_more {
        "end of list"
    } else {
        "idle"
    };
    format!(
        "{} / {} assets | offset {} | {}",
        state.len(),
        state.expected_total,
        state.offset.max(0),
        activity
    )
}

pub struct TuiApp {
    state: TableState,
    feed: Arc<PaginatedAssetFeed>,
    snapshot: FeedState,
    scroll_state: ScrollbarState,
    colors: TableColors,
    color_index: usize,
    show_icon_url: bool,
    viewport_rows: usize,
    scroll_listener: ScrollListener,
    infinite_scroll: InfiniteScroll,
    pending_scroll: bool,
    on_load_more: Box<dyn FnMut() + Send>,
}

impl TuiApp {
    pub fn new(
        feed: Arc<PaginatedAssetFeed>,
        scroll_listener: ScrollListener,
        infinite_scroll: InfiniteScroll,
        on_load_more: impl FnMut() + Send + 'static,
    ) -> Self {
        let snapshot = feed.snapshot();
        Self {
            state: TableState::default(),
            scroll_state: ScrollbarState::new(0),
            colors: TableColors::new(&PALETTES[0]),
            color_index: 0,
            feed,
            snapshot,
            show_icon_url: false,
            viewport_rows: 0,
            scroll_listener,
            infinite_scroll,
            pending_scroll: false,
            on_load_more: Box::new(on_load_more),
        }
    }

    fn viewport_metrics(&self) -> ViewportMetrics {
        ViewportMetrics {
            scroll_offset: self.state.offset(),
            viewport_height: self.viewport_rows,
            document_height: self.snapshot.len(),
        }
    }

    fn select(&mut self, row: usize) {
        self.state.select(Some(row));
        self.scroll_state = self.scroll_state.position(row * ITEM_HEIGHT);
        self.pending_scroll = true;
    }

    fn last_row(&self) -> Option<usize> {
        self.snapshot.len().checked_sub(1)
    }

    fn next_row(&mut self) {
        let Some(last) = self.last_row() else {
            self.pending_scroll = true;
            return;
        };
        let i = match self.state.selected() {
            Some(i) => (i + 1).min(last),
            None => 0,
        };
        self.select(i);
    }

    fn previous_row(&mut self) {
        if self.last_row().is_none() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => 0,
            Some(i) => i - 1,
            None => 0,
        };
        self.select(i);
    }

    fn next_page(&mut self) {
        let Some(last) = self.last_row() else {
            self.pending_scroll = true;
            return;
        };
        let step = self.viewport_rows.max(1);
        let i = self.state.selected().map_or(0, |i| (i + step).min(last));
        self.select(i);
    }

    fn previous_page(&mut self) {
        if self.last_row().is_none() {
            return;
        }
        let step = self.viewport_rows.max(1);
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(step));
        self.select(i);
    }

    fn first_row(&mut self) {
        if self.last_row().is_some() {
            self.select(0);
        }
    }

    fn bottom_row(&mut self) {
        match self.last_row() {
            Some(last) => self.select(last),
            None => self.pending_scroll = true,
        }
    }

    fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTES.len();
    }

    fn previous_color(&mut self) {
        let count = PALETTES.len();
        self.color_index = (self.color_index + count - 1) % count;
    }

    fn set_colors(&mut self) {
        self.colors = TableColors::new(&PALETTES[self.color_index]);
    }

    fn toggle_icon_url(&mut self) {
        self.show_icon_url = !self.show_icon_url;
    }

    fn update_scrollbar_size(&mut self) {
        self.scroll_state = self
            .scroll_state
            .content_length((self.snapshot.len().saturating_sub(1)) * ITEM_HEIGHT);
    }

    fn refresh(&mut self) {
        self.snapshot = self.feed.snapshot();
        if self.state.selected().is_none() && !self.snapshot.is_empty() {
            self.state.select(Some(0));
        }
        self.update_scrollbar_size();
    }

    fn dispatch_scroll(&mut self) {
        if !self.pending_scroll {
            return;
        }
        self.pending_scroll = false;
        let metrics = self.viewport_metrics();
        self.scroll_listener.on_scroll(metrics);
        self.infinite_scroll
            .on_scroll(self.snapshot.has_more, metrics);
    }

    fn mount_triggers(&mut self) {
        self.infinite_scroll
            .mount(self.snapshot.has_more, self.viewport_metrics());
    }

    /// One tick of trigger work: pending scroll for both triggers, then the
    /// update check for the prefetch trigger.
    fn drive_triggers(&mut self) {
        self.dispatch_scroll();
        self.infinite_scroll.on_update(
            self.snapshot.has_more,
            self.snapshot.is_loading,
            self.viewport_metrics(),
        );
    }

    fn unmount(&mut self) {
        self.scroll_listener.detach();
        self.infinite_scroll.unmount();
        log::info!("ui.unmount rows={}", self.snapshot.len());
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.refresh();
        terminal.draw(|frame| self.draw(frame))?;
        self.mount_triggers();

        loop {
            self.refresh();
            terminal.draw(|frame| self.draw(frame))?;

            // Offsets are only settled after a draw
            self.drive_triggers();

            if event::poll(Duration::from_millis(POLL_DURATION_MS))? {
                // Drain ALL events, not just one
                while event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            let shift = key.modifiers.contains(KeyModifiers::SHIFT);
                            match key.code {
                                KeyCode::Char('q') | KeyCode::Esc => {
                                    self.unmount();
                                    return Ok(());
                                }
                                KeyCode::Char('j') | KeyCode::Down => self.next_row(),
                                KeyCode::Char('k') | KeyCode::Up => self.previous_row(),
                                KeyCode::PageDown => self.next_page(),
                                KeyCode::PageUp => self.previous_page(),
                                KeyCode::Char('g') | KeyCode::Home => self.first_row(),
                                KeyCode::Char('G') | KeyCode::End => self.bottom_row(),
                                KeyCode::Char('l') | KeyCode::Right if shift => {
                                    self.next_color()
                                }
                                KeyCode::Char('h') | KeyCode::Left if shift => {
                                    self.previous_color()
                                }
                                KeyCode::Char('i') => self.toggle_icon_url(),
                                KeyCode::Char('m') => (self.on_load_more)(),
                                _ => {}
                            }
                        }
                        Event::Mouse(_)
                        | Event::Resize(_, _)
                        | Event::FocusGained
                        | Event::FocusLost
                        | Event::Paste(_) => {}
                        _ => {}
                    }
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let vertical = &Layout::vertical([Constraint::Min(5), Constraint::Length(5)]);
        let rects = vertical.split(frame.area());
        self.set_colors();
        self.render_table(frame, rects[0]);
        self.render_scrollbar(frame, rects[0]);
        self.render_footer(frame, rects[1]);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        // one header row
        self.viewport_rows = area.height.saturating_sub(1) as usize;

        let header_style = Style::default()
            .fg(self.colors.header_fg)
            .bg(self.colors.header_bg);
        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .fg(self.colors.selected_row_style_fg);

        let header: Row<'_> = HEADER
            .into_iter()
            .map(Cell::from)
            .collect::<Row>()
            .style(header_style);

        let mut rows: Vec<Row> = self
            .snapshot
            .items
            .iter()
            .enumerate()
            .map(|(i, asset)| {
                let [rank, icon, name, price, market_cap] =
                    asset_cells(asset, self.show_icon_url);
                Row::new(vec![
                    Cell::from(rank).style(Style::new().fg(self.colors.rank_fg)),
                    Cell::from(icon),
                    Cell::from(name).style(Style::new().add_modifier(Modifier::BOLD)),
                    Cell::from(Text::from(price).right_aligned()),
                    Cell::from(Text::from(market_cap).right_aligned()),
                ])
                .style(
                    Style::new()
                        .fg(self.colors.row_fg)
                        .bg(self.colors.row_bg(i)),
                )
            })
            .collect();

        if self.snapshot.is_loading {
            rows.push(
                Row::new(vec![Cell::from(""), Cell::from(self.infinite_scroll.config().loader)])
                    .style(Style::new().fg(self.colors.loading_fg)),
            );
        }

        let icon_width = if self.show_icon_url {
            Constraint::Length(56)
        } else {
            Constraint::Length(8)
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                icon_width,
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .row_highlight_style(selected_row_style)
        .highlight_spacing(HighlightSpacing::Always)
        .bg(self.colors.buffer_bg);

        frame.render_stateful_widget(table, area, &mut self.state);
    }

    fn render_scrollbar(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_stateful_widget(
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.scroll_state,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(status_line(&self.snapshot)),
            Line::from(INFO_TEXT[0]),
            Line::from(INFO_TEXT[1]),
        ];
        let info_footer = Paragraph::new(lines)
            .style(
                Style::new()
                    .fg(self.colors.row_fg)
                    .bg(self.colors.buffer_bg),
            )
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Double)
                    .border_style(Style::new().fg(self.colors.footer_border_color)),
            );
        frame.render_widget(info_footer, area);
    }
}
