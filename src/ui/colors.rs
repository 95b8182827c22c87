use ratatui::style::{Color, palette::tailwind};

pub struct TableColors {
    pub buffer_bg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub row_fg: Color,
    pub rank_fg: Color,
    pub selected_row_style_fg: Color,
    pub normal_row_color: Color,
    pub alt_row_color: Color,
    pub loading_fg: Color,
    pub footer_border_color: Color,
}

impl TableColors {
    pub const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            header_bg: color.c900,
            header_fg: tailwind::SLATE.c200,
            row_fg: tailwind::SLATE.c200,
            rank_fg: tailwind::SLATE.c400,
            selected_row_style_fg: color.c400,
            normal_row_color: tailwind::SLATE.c950,
            alt_row_color: tailwind::SLATE.c900,
            loading_fg: tailwind::BLUE.c400,
            footer_border_color: color.c400,
        }
    }

    pub fn row_bg(&self, index: usize) -> Color {
        if index % 2 == 0 {
            self.normal_row_color
        } else {
            self.alt_row_color
        }
    }
}
