//! Screen chrome: header, navigation, footer, and the startup banner.

use std::fmt::Write;

use chrono::Datelike;

use crate::consts::{AUTHOR, ORGANISATION, VERSION};

const WIDTH: usize = 48;

/// Session configuration shown in the startup banner.
pub struct BannerInfo<'a> {
    pub api_url: &'a str,
    pub exchange_rate: &'a str,
    pub timeout: &'a str,
    pub opener: &'a str,
    pub settings: &'a str,
}

pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║     B O N D   S I M U L A T O R       ║
   ║    bond investment analysis tool      ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   endpoint  {}
   rate      {} ZMW / USD
   timeout   {}
   files     {}
   settings  {}

   type /help for commands
"#,
        VERSION,
        AUTHOR,
        info.api_url,
        info.exchange_rate,
        info.timeout,
        info.opener,
        info.settings,
    );
}

/// A navigation entry. The shell only links home.
pub struct NavLink {
    pub label: &'static str,
    pub command: &'static str,
}

pub const HOME: NavLink = NavLink {
    label: "🏠 Home",
    command: "/home",
};

/// Wraps one rendered child in the application chrome.
pub struct Shell {
    title: &'static str,
    header: &'static str,
    nav: Vec<NavLink>,
    year: i32,
}

impl Shell {
    pub fn new() -> Self {
        Self::for_year(chrono::Local::now().year())
    }

    /// Fixed footer year, for reproducible output.
    pub fn for_year(year: i32) -> Self {
        Self {
            title: "📊 Simulator",
            header: "Bond Investment Analysis Tool",
            nav: vec![HOME],
            year,
        }
    }

    pub fn footer(&self) -> String {
        format!("© {} {}", self.year, ORGANISATION)
    }

    pub fn render(&self, content: &str) -> String {
        let rule = "─".repeat(WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "╔{}╗", "═".repeat(WIDTH));
        let _ = writeln!(out, "║{:^WIDTH$}║", self.header);
        let _ = writeln!(out, "╚{}╝", "═".repeat(WIDTH));

        let nav = self
            .nav
            .iter()
            .map(|link| format!("{} ({})", link.label, link.command))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, " {}  │  {}", self.title, nav);
        let _ = writeln!(out, "{rule}");

        for line in content.lines() {
            let _ = writeln!(out, "  {line}");
        }

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, " {}", self.footer());
        out
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
