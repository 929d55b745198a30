//! Application state and main event loop.

use std::cell::RefCell;
use std::io::Stdout;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use tracing::{debug, warn};

use learnmap_core::graph::{
    GraphSurface, KnowledgeNode, NodeIndex, Point, PointerEvent, SurfaceSettings, ZoomDirection,
};
use learnmap_core::{
    Config, FileMasteryStore, MasteryStore, NavigationPlan, PrerequisiteNavigator, Stage,
};

use super::event::{Event, EventHandler};
use super::ui;
use crate::commands::Session;

const TICK_RATE: Duration = Duration::from_millis(50);

/// Mastery change applied by the `+` / `-` keys.
const MASTERY_STEP: f32 = 0.1;

/// Main application state.
pub struct App {
    /// Interactive graph being shown
    pub surface: GraphSurface,
    /// Curriculum stage of the graph
    pub stage: Stage,
    /// Node shown in the details panel
    pub selected: Option<NodeIndex>,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Canvas area inside the graph border, in terminal cells.
    /// Updated on every draw so mouse positions map onto the surface.
    pub graph_area: Rect,
    store: FileMasteryStore,
    fallback: String,
    /// Nodes reported by the surface's tap callback, drained after each release.
    taps: Rc<RefCell<Vec<NodeIndex>>>,
    started: Instant,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: &Config, session: Session) -> Self {
        let mut surface =
            GraphSurface::new(session.graph, SurfaceSettings::from(&config.surface));
        surface.center_graph();
        surface.start_entrance(Duration::ZERO);

        let taps = Rc::new(RefCell::new(Vec::new()));
        let inbox = Rc::clone(&taps);
        surface.set_on_tap(move |idx, node: &KnowledgeNode| {
            debug!(id = %node.id, "knowledge point tapped");
            inbox.borrow_mut().push(idx);
        });

        Self {
            surface,
            stage: session.stage,
            selected: None,
            status_message: None,
            should_quit: false,
            graph_area: Rect::default(),
            store: session.store,
            fallback: config.curriculum.fallback_prerequisite.clone(),
            taps,
            started: Instant::now(),
        }
    }

    /// Time since the view opened; drives the animations.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Run the main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> color_eyre::Result<()> {
        let mut events = EventHandler::new(TICK_RATE);

        loop {
            terminal.draw(|frame| {
                self.fit_to_area(ui::graph_canvas_area(frame.area()));
                ui::render(self, frame);
            })?;

            if let Some(event) = events.next().await {
                match event {
                    Event::Key(key) => self.handle_key_event(key),
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    // Redraw only
                    Event::Resize | Event::Tick => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// The selected node, if any.
    pub fn selected_node(&self) -> Option<&KnowledgeNode> {
        self.selected.and_then(|idx| self.surface.graph().node(idx))
    }

    /// Navigation plan for the selected node.
    pub fn selected_plan(&self) -> Option<NavigationPlan> {
        let node = self.selected_node()?;
        Some(self.navigator().plan(&node.label))
    }

    fn navigator(&self) -> PrerequisiteNavigator<'_> {
        PrerequisiteNavigator::with_fallback(self.surface.graph(), &self.fallback)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('c') => {
                self.surface.center_graph();
                self.status_message = Some("Graph centred".to_string());
            }
            KeyCode::Char('z') => {
                let message = match self.surface.toggle_zoom() {
                    ZoomDirection::In => "Zoomed in",
                    ZoomDirection::Out => "Zoomed out",
                };
                self.status_message = Some(message.to_string());
            }
            KeyCode::Char('p') => self.highlight_learning_path(),
            KeyCode::Char('x') => {
                self.surface.clear_highlight();
                self.status_message = None;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_mastery(MASTERY_STEP),
            KeyCode::Char('-') => self.adjust_mastery(-MASTERY_STEP),
            KeyCode::Tab => self.cycle_selection(true),
            KeyCode::BackTab => self.cycle_selection(false),
            KeyCode::Esc => self.selected = None,
            _ => {}
        }
    }

    /// Handle a mouse event by feeding it to the surface as pointer input.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let Some(point) = self.cell_to_point(mouse.column, mouse.row) else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self
                    .graph_area
                    .contains(Position::new(mouse.column, mouse.row))
                {
                    self.surface.handle_pointer(PointerEvent::Down(point));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.surface.handle_pointer(PointerEvent::Move(point));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.surface.handle_pointer(PointerEvent::Up(point));
                let tapped = self.taps.borrow_mut().drain(..).last();
                if let Some(idx) = tapped {
                    self.select(idx);
                }
            }
            _ => {}
        }
    }

    /// Track the canvas area, resizing the surface when it changes.
    ///
    /// A terminal cell is about twice as tall as wide, so the surface
    /// height follows the area's aspect ratio to keep circles round.
    fn fit_to_area(&mut self, area: Rect) {
        if area == self.graph_area {
            return;
        }
        self.graph_area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = self.surface.settings().width;
        let height = width * 2.0 * f64::from(area.height) / f64::from(area.width);
        debug!(columns = area.width, rows = area.height, height, "fitting surface to terminal");
        self.surface.resize(width, height);
        self.surface.center_graph();
    }

    /// Map a terminal cell to the surface point at its centre.
    ///
    /// Cells outside the canvas still map (a drag may leave the canvas);
    /// `None` only before the first draw.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.graph_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let settings = self.surface.settings();
        let x = (f64::from(column) - f64::from(area.x) + 0.5) / f64::from(area.width);
        let y = (f64::from(row) - f64::from(area.y) + 0.5) / f64::from(area.height);
        Some(Point::new(x * settings.width, y * settings.height))
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn select(&mut self, idx: NodeIndex) {
        self.selected = Some(idx);
        if let Some(node) = self.surface.graph().node(idx) {
            self.status_message = Some(format!("{} ({})", node.label, node.status.display_name()));
        }
    }

    fn cycle_selection(&mut self, forward: bool) {
        let len = self.surface.graph().len();
        if len == 0 {
            return;
        }
        let next = match self.selected.map(NodeIndex::index) {
            None if forward => 0,
            None => len - 1,
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        };
        let idx = self.surface.graph().iter().nth(next).map(|(idx, _)| idx);
        if let Some(idx) = idx {
            self.select(idx);
        }
    }

    /// Glow the selected node's learning path and the node itself.
    fn highlight_learning_path(&mut self) {
        let Some(plan) = self.selected_plan() else {
            self.status_message = Some("Select a knowledge point first".to_string());
            return;
        };

        let mut labels = if plan.offer_start {
            plan.path
        } else {
            plan.prerequisites
        };
        labels.push(plan.target.clone());

        let count = self.surface.highlight(&labels);
        self.status_message = Some(format!(
            "Learning path to {}: {} knowledge points",
            plan.target, count
        ));
    }

    /// Change the selected node's mastery and persist it.
    fn adjust_mastery(&mut self, delta: f32) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let id = node.id.clone();
        let level = (node.mastery + delta).clamp(0.0, 1.0);

        match self.store.record(self.stage, &id, level) {
            Ok(record) => {
                self.surface.graph_mut().set_mastery(&id, record.level);
                self.status_message = Some(format!("Mastery {:.0}%", record.level * 100.0));
            }
            Err(e) => {
                warn!(error = %e, "failed to save mastery");
                self.status_message = Some(format!("Failed to save mastery: {}", e));
            }
        }
    }
}
