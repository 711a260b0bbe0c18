//! Help document layout
//!
//! Help content is a tagged sequence of text lines and graphics. The
//! scroll offset counts items, not pixels, so the furthest useful offset
//! depends on the height of each item. [`HelpDocument::max_scroll`] is the
//! smallest offset at which everything below it fits in the viewport:
//! scrolling further would only reveal blank space, and the last item
//! (typically a graphic) is never cut off at that offset.

/// 1-bit bitmap in XBM layout (rows padded to whole bytes, LSB first)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u16,
    pub height: u16,
    pub data: &'static [u8],
}

impl Bitmap {
    /// Bytes per row
    pub const fn stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Check that `data` covers every row
    pub const fn is_well_formed(&self) -> bool {
        self.data.len() >= self.stride() * self.height as usize
    }

    /// Whether the pixel at (`x`, `y`) is set; out-of-range reads are unset
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.stride() + x as usize / 8;
        self.data
            .get(index)
            .is_some_and(|byte| byte & (1 << (x % 8)) != 0)
    }
}

/// One element of the help document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpItem {
    /// Single line of text
    Text(&'static str),
    /// Inline picture, drawn centred
    Graphic(Bitmap),
}

/// Vertical metrics of the help viewport, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HelpLayout {
    /// Height of a text line
    pub line_height: u16,
    /// Space added below a graphic
    pub graphic_margin: u16,
    /// Height available for content
    pub viewport_height: u16,
}

impl HelpLayout {
    /// 128x64 panel with an 8 px font and a 54 px content window
    pub const OLED_128X64: Self = Self {
        line_height: 8,
        graphic_margin: 2,
        viewport_height: 54,
    };

    /// Height taken by `item`
    pub const fn item_height(&self, item: &HelpItem) -> u16 {
        match item {
            HelpItem::Text(_) => self.line_height,
            HelpItem::Graphic(bitmap) => bitmap.height + self.graphic_margin,
        }
    }
}

/// Help content together with the layout it is shown in
#[derive(Debug, Clone, Copy)]
pub struct HelpDocument {
    items: &'static [HelpItem],
    layout: HelpLayout,
}

impl HelpDocument {
    /// Create a document
    pub const fn new(items: &'static [HelpItem], layout: HelpLayout) -> Self {
        Self { items, layout }
    }

    /// All items, top to bottom
    pub const fn items(&self) -> &'static [HelpItem] {
        self.items
    }

    /// Layout metrics
    pub const fn layout(&self) -> &HelpLayout {
        &self.layout
    }

    /// Total content height in pixels
    pub const fn content_height(&self) -> u32 {
        let mut total = 0u32;
        let mut i = 0;
        while i < self.items.len() {
            total += self.layout.item_height(&self.items[i]) as u32;
            i += 1;
        }
        total
    }

    /// Largest useful scroll offset
    ///
    /// Walks up from the last item while the tail still fits. The last
    /// item is always reachable, even when it is taller than the viewport.
    pub const fn max_scroll(&self) -> u8 {
        let len = self.items.len();
        if len == 0 {
            return 0;
        }

        let viewport = self.layout.viewport_height as u32;
        let mut first = len - 1;
        let mut used = self.layout.item_height(&self.items[first]) as u32;

        while first > 0 {
            let height = self.layout.item_height(&self.items[first - 1]) as u32;
            if used + height > viewport {
                break;
            }
            used += height;
            first -= 1;
        }

        if first > u8::MAX as usize {
            u8::MAX
        } else {
            first as u8
        }
    }

    /// Items drawn at `scroll`, with their top offset inside the viewport
    ///
    /// The last item yielded may extend past the bottom edge.
    pub fn visible(&self, scroll: u8) -> impl Iterator<Item = (u16, &'static HelpItem)> {
        let layout = self.layout;
        let items: &'static [HelpItem] = self.items;
        let start = (scroll as usize).min(items.len());
        let mut y = 0u16;

        items[start..].iter().map_while(move |item| {
            if y >= layout.viewport_height {
                return None;
            }
            let top = y;
            y = y.saturating_add(layout.item_height(item));
            Some((top, item))
        })
    }

    /// Whether content exists below the viewport at `scroll`
    pub fn can_scroll_down(&self, scroll: u8) -> bool {
        scroll < self.max_scroll()
    }
}
