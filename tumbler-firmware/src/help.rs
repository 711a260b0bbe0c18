//! Help screen content

use tumbler_core::help::{HelpDocument, HelpItem, HelpLayout};

const ITEMS: &[HelpItem] = &[
    HelpItem::Text("-- TUMBLER --"),
    HelpItem::Text(""),
    HelpItem::Text("Rewrites the lock code"),
    HelpItem::Text("over the service port,"),
    HelpItem::Text("then opens with it."),
    HelpItem::Text(""),
    HelpItem::Text("Connect the wires, set"),
    HelpItem::Text("a code, press OK."),
    HelpItem::Text(""),
    HelpItem::Text("+------ WIRING ------+"),
    HelpItem::Text("  BLACK  <->  GND"),
    HelpItem::Text("  GREEN  <->  DATA"),
    HelpItem::Text("+--------------------+"),
    HelpItem::Text(""),
    HelpItem::Text("Left/Right: select"),
    HelpItem::Text("Up/Down: change value"),
    HelpItem::Text("P = primary code"),
    HelpItem::Text("S = secondary code"),
    HelpItem::Text(""),
    HelpItem::Text("Press OK: send"),
    HelpItem::Text("Hold OK: this help"),
    HelpItem::Text("Back: end session"),
    HelpItem::Text(""),
    HelpItem::Text("Code 00000 removes"),
    HelpItem::Text("the stored code."),
    HelpItem::Text(""),
];

/// Help document for the 128x64 panel
pub const HELP: HelpDocument = HelpDocument::new(ITEMS, HelpLayout::OLED_128X64);

/// Largest scroll offset of [`HELP`]
pub const MAX_SCROLL: u8 = HELP.max_scroll();

const _: () = assert!(MAX_SCROLL > 0);
