//! Command-line driver
//!
//! Runs one headless session of the docking shell: creates the window,
//! docks the requested views, shows it (restoring the saved layout),
//! reports the resulting layout and closes it, which persists the state.
//!
//! Supports:
//! - Choosing the GUI name (and so its state directory)
//! - Requesting views by kind, with an optional count (`--view TraceView=2`)
//! - Ignoring the saved layout for one session

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::config::ShellConfig;
use crate::dock::DockArea;
use crate::gui::{Gui, GuiOptions};
use crate::toolkit::HeadlessToolkit;
use crate::view::ViewKind;
use crate::views::{default_registry, STANDARD_VIEWS};

/// Docking shell for spike-sorting views
#[derive(Parser, Debug)]
#[command(name = "spikegui", version, about = "Docking shell for spike-sorting views")]
pub struct CliArgs {
    /// Name of the GUI; selects the state directory
    #[arg(long, default_value = crate::gui::DEFAULT_NAME)]
    pub name: String,

    /// Shown after the name in the window title
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Config directory (defaults to ~/.config/spikegui)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// View to create, optionally with a count (e.g. `WaveformView=2`)
    #[arg(long = "view", value_name = "KIND[=N]", value_parser = parse_view_request)]
    pub views: Vec<(ViewKind, usize)>,

    /// Ignore the saved layout for this session
    #[arg(long)]
    pub reset: bool,

    /// Print the persisted state file after closing
    #[arg(long)]
    pub print_state: bool,

    /// Debug logging on the console
    #[arg(short, long)]
    pub verbose: bool,
}

/// What one driver session does, derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Session {
    pub name: String,
    pub subtitle: Option<String>,
    pub config_dir: Option<PathBuf>,
    pub views: Vec<(ViewKind, usize)>,
    pub restore_layout: bool,
    pub print_state: bool,
}

fn parse_view_request(s: &str) -> Result<(ViewKind, usize), String> {
    let (kind, count) = match s.split_once('=') {
        Some((kind, count)) => {
            let count = count
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("Invalid view count in '{}': {}", s, e))?;
            (kind.trim(), count)
        }
        None => (s.trim(), 1),
    };
    if kind.is_empty() {
        return Err(format!("Missing view kind in '{}'", s));
    }
    Ok((ViewKind::from(kind), count))
}

impl CliArgs {
    /// Convert parsed CLI args into a session
    ///
    /// Without any `--view`, one view of every standard kind is created.
    pub fn into_session(self) -> Result<Session> {
        let registry = default_registry();
        for (kind, _) in &self.views {
            if !registry.contains(kind) {
                let known: Vec<_> = registry.kinds().map(ViewKind::as_str).collect();
                bail!("Unknown view kind {} (known: {})", kind, known.join(", "));
            }
        }

        let views = if self.views.is_empty() {
            STANDARD_VIEWS.into_iter().map(|kind| (kind, 1)).collect()
        } else {
            self.views
        };

        Ok(Session {
            name: self.name,
            subtitle: self.subtitle,
            config_dir: self.config_dir,
            views,
            restore_layout: !self.reset,
            print_state: self.print_state,
        })
    }
}

/// Run a session and return its report
pub fn run(session: &Session, config: &ShellConfig) -> Result<String> {
    let mut options = GuiOptions::from_config(config)
        .name(session.name.clone())
        .view_creator(default_registry())
        .restore_layout(session.restore_layout);
    if let Some(subtitle) = &session.subtitle {
        options = options.subtitle(subtitle.clone());
    }
    if let Some(dir) = &session.config_dir {
        options = options.config_dir(dir.clone());
    }

    let mut gui = Gui::new(HeadlessToolkit::new(), options)?;
    let created = gui.create_views(&session.views);
    gui.set_status_message(format!("{} views", created.len()));
    gui.show();

    let report = layout_report(&gui);

    if !gui.close() {
        bail!("The window refused to close");
    }

    if session.print_state {
        let path = gui.state().path();
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(format!("{}\n{}", report, contents));
    }
    Ok(report)
}

/// One line per dock area listing its docked views, then floating views
pub fn layout_report(gui: &Gui<HeadlessToolkit>) -> String {
    let toolkit = gui.toolkit();
    let mut report = String::new();
    let _ = writeln!(report, "{}", gui.title());
    for area in DockArea::ALL {
        let names = toolkit.docks_in(area);
        if !names.is_empty() {
            let _ = writeln!(report, "  {}: {}", area, names.join(", "));
        }
    }
    let floating: Vec<String> = toolkit
        .docks()
        .into_iter()
        .filter(|d| d.floating)
        .map(|d| d.name)
        .collect();
    if !floating.is_empty() {
        let _ = writeln!(report, "  floating: {}", floating.join(", "));
    }
    let _ = write!(report, "  status: {}", gui.status_message());
    report
}
