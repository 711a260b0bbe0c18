//! Screen layout
//!
//! Two screens share a 1 px outer frame:
//!
//! - editor: title, a boxed line with the code (or the send status) and
//!   two hint lines
//! - help: the scrolled help document with up/down markers on the right

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;
use tumbler_core::help::{Bitmap, HelpDocument, HelpItem};
use tumbler_core::state::{Field, SendStatus, Snapshot};
use tumbler_protocol::CODE_LEN;

use crate::framebuffer::WIDTH;

const TITLE: &str = "TUMBLER";

/// Top edge of the help viewport
const HELP_TOP: i32 = 4;
/// Left margin of help text
const HELP_LEFT: i32 = 3;
/// Width reserved for the scroll markers
const MARKER_WIDTH: u32 = 8;

/// Editor line, e.g. `" 1 [2] 3  4  5 - P "`
pub type CodeLine = String<24>;

/// Build the editor line with the selected field in brackets
pub fn code_line(snapshot: &Snapshot) -> CodeLine {
    let mut line = CodeLine::new();
    let selected = snapshot.selector.field();

    for index in 0..CODE_LEN {
        let digit = snapshot.code.get(index).map(|d| d.value()).unwrap_or(0);
        // Capacity covers the longest line
        let _ = if selected == Field::Digit(index) {
            write!(line, "[{}]", digit)
        } else {
            write!(line, " {} ", digit)
        };
    }

    let label = snapshot.mode.label();
    let _ = if selected == Field::Mode {
        write!(line, "-[{}]", label)
    } else {
        write!(line, "- {} ", label)
    };
    line
}

/// Text shown in place of the code line, if any
pub fn status_text(status: SendStatus) -> Option<&'static str> {
    match status {
        SendStatus::Idle => None,
        SendStatus::Sending => Some("Sending..."),
        SendStatus::Done => Some("Done!"),
        SendStatus::Failed => Some("Send failed"),
    }
}

/// Draws snapshots of the editing session
pub struct Renderer {
    help: HelpDocument,
}

impl Renderer {
    pub const fn new(help: HelpDocument) -> Self {
        Self { help }
    }

    pub fn help(&self) -> &HelpDocument {
        &self.help
    }

    /// Draw the screen for `snapshot`, replacing what was there
    pub fn render<D>(&self, snapshot: &Snapshot, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        target.clear(BinaryColor::Off)?;
        frame(target)?;

        if snapshot.help_visible {
            self.render_help(snapshot.scroll, target)
        } else {
            render_editor(snapshot, target)
        }
    }

    fn render_help<D>(&self, scroll: u8, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let layout = self.help.layout();
        let viewport = Rectangle::new(
            Point::new(1, HELP_TOP),
            Size::new(
                WIDTH as u32 - 2 - MARKER_WIDTH,
                layout.viewport_height as u32,
            ),
        );
        let text_style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);

        {
            let mut clipped = target.clipped(&viewport);
            for (top, item) in self.help.visible(scroll) {
                let y = HELP_TOP + top as i32;
                match item {
                    HelpItem::Text(text) => {
                        Text::with_baseline(
                            text,
                            Point::new(HELP_LEFT, y),
                            text_style,
                            Baseline::Top,
                        )
                        .draw(&mut clipped)?;
                    }
                    HelpItem::Graphic(bitmap) => {
                        let x = (viewport.size.width as i32 - bitmap.width as i32) / 2 + 1;
                        draw_bitmap(bitmap, Point::new(x.max(1), y), &mut clipped)?;
                    }
                }
            }
        }

        let marker = PrimitiveStyle::with_fill(BinaryColor::On);
        if scroll > 0 {
            Triangle::new(Point::new(120, 9), Point::new(126, 9), Point::new(123, 5))
                .into_styled(marker)
                .draw(target)?;
        }
        if self.help.can_scroll_down(scroll) {
            Triangle::new(Point::new(120, 54), Point::new(126, 54), Point::new(123, 58))
                .into_styled(marker)
                .draw(target)?;
        }
        Ok(())
    }
}

fn frame<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let bounds = target.bounding_box();
    bounds
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(target)
}

fn render_editor<D>(snapshot: &Snapshot, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let outline = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    let title_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let body_style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);

    Rectangle::new(Point::new(24, 0), Size::new(80, 13))
        .into_styled(outline)
        .draw(target)?;
    Text::with_text_style(TITLE, Point::new(64, 6), title_style, centered)
        .draw(target)?;

    Rectangle::new(Point::new(10, 20), Size::new(108, 14))
        .into_styled(outline)
        .draw(target)?;
    match status_text(snapshot.status) {
        Some(text) => {
            Text::with_text_style(text, Point::new(64, 27), body_style, centered)
                .draw(target)?;
        }
        None => {
            let line = code_line(snapshot);
            Text::with_text_style(&line, Point::new(64, 27), body_style, centered)
                .draw(target)?;
        }
    }

    let hint = if snapshot.status.is_finished() {
        "OK = Continue"
    } else {
        "Hold OK = Help"
    };
    Text::with_text_style(hint, Point::new(64, 45), body_style, centered)
        .draw(target)?;
    Text::with_text_style("Press OK = Send", Point::new(64, 54), body_style, centered)
        .draw(target)?;
    Ok(())
}

fn draw_bitmap<D>(bitmap: &Bitmap, origin: Point, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let pixels = (0..bitmap.height).flat_map(move |y| {
        (0..bitmap.width)
            .filter(move |&x| bitmap.pixel(x, y))
            .map(move |x| Pixel(origin + Point::new(x as i32, y as i32), BinaryColor::On))
    });
    target.draw_iter(pixels)
}
